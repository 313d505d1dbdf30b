//! File-based storage implementation for civic stores.
//!
//! This crate provides a simple, human-readable file-based storage backend.
//! Each key-value pair is stored as a separate file, named after the
//! percent-encoded key, holding the JSON-encoded value.
//!
//! # Example
//!
//! ```no_run
//! use civic::Client;
//! use civic_fs::FileStore;
//!
//! let file_store = FileStore::new("./data").expect("Failed to create storage");
//! let client = Client::open(file_store).expect("Failed to open client");
//! ```

mod error;
pub mod filename;
mod repository;

use civic::{Json, Storage};

pub use error::FileStoreError;
pub use repository::FileStore;

impl Storage for FileStore {
    type Repo = Self;
    type Serializer = Json;

    fn repository(&self) -> &Self::Repo {
        self
    }

    fn repository_mut(&mut self) -> &mut Self::Repo {
        self
    }

    fn serializer(&self) -> &Self::Serializer {
        &Json
    }
}
