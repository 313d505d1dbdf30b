mod unifier;

pub use unifier::Json;
