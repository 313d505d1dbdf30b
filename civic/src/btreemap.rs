use std::{collections::BTreeMap, fmt::Display};

use crate::{Json, Repository, Storage};

/// A memory-based storage implementation using a [`BTreeMap`].
///
/// This backend keeps all data in memory and stores JSON values.
/// Implements both [`Repository`] and [`Storage`], so it can be handed
/// directly to [`crate::Client::open`].
pub type MemoryStorage = BTreeMap<String, Vec<u8>>;

/// Error type for [`MemoryStorage`] operations.
///
/// [`MemoryStorage`] operations don't actually fail, so this is an empty error type.
#[derive(Debug, PartialEq, Eq)]
pub struct MemoryStorageError;

impl Display for MemoryStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory storage operations do not fail")
    }
}

impl std::error::Error for MemoryStorageError {}

impl Repository for MemoryStorage {
    type Error = MemoryStorageError;

    fn insert_entry(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get_entry(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.get(key).cloned())
    }

    fn remove_entry(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.remove(key))
    }
}

impl Storage for MemoryStorage {
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
