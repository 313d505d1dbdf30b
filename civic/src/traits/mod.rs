mod repository;
mod storage;
mod unifier;

pub use repository::*;
pub use storage::*;
pub use unifier::*;
