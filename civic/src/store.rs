use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::errors::{Operation, StorageError};
use crate::traits::{Repository, Storage, Unifier};

enum Op {
    Write { key: String, value: Vec<u8> },
    Delete { key: String },
}

impl Op {
    fn key(&self) -> &str {
        match self {
            Op::Write { key, .. } | Op::Delete { key } => key,
        }
    }
}

/// A buffered set of writes and deletes, applied together by [`Store::commit`].
///
/// Values are serialized when they are added, so a commit never starts
/// writing unless every value already encoded successfully.
pub struct Transaction<U: Unifier> {
    pending_ops: Vec<Op>,
    serializer: U,
    operation: Operation,
}

impl<U: Unifier> Transaction<U> {
    /// Buffers a serialized write of `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if `value` fails to serialize.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = self
            .serializer
            .serialize(value)
            .map_err(|e| StorageError::serialization(self.operation, e))?;
        self.pending_ops.push(Op::Write {
            key: key.to_owned(),
            value,
        });
        Ok(())
    }

    /// Buffers a raw UTF-8 write, bypassing the serializer.
    pub fn put_text(&mut self, key: &str, value: &str) {
        self.pending_ops.push(Op::Write {
            key: key.to_owned(),
            value: value.as_bytes().to_vec(),
        });
    }

    pub fn remove(&mut self, key: &str) {
        self.pending_ops.push(Op::Delete {
            key: key.to_owned(),
        });
    }

    /// Returns true if the transaction has no pending operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending_ops.is_empty()
    }
}

/// Typed access to a [`Storage`] backend: decoded reads and all-or-nothing commits.
pub struct Store<S: Storage> {
    storage: S,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads and decodes the value under `key`. Missing keys read as `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails or the bytes do not decode.
    pub fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        operation: Operation,
    ) -> Result<Option<T>, StorageError> {
        let Some(bytes) = self.get_raw(key, operation)? else {
            return Ok(None);
        };
        self.storage
            .serializer()
            .deserialize(&bytes)
            .map(Some)
            .map_err(|e| StorageError::deserialization(operation, e))
    }

    /// Reads a raw UTF-8 value written with [`Transaction::put_text`].
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails or the bytes are not UTF-8.
    pub fn get_text(&self, key: &str, operation: Operation) -> Result<Option<String>, StorageError> {
        let Some(bytes) = self.get_raw(key, operation)? else {
            return Ok(None);
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::deserialization(operation, e))
    }

    fn get_raw(&self, key: &str, operation: Operation) -> Result<Option<Vec<u8>>, StorageError> {
        debug!(key = %key, %operation, "reading entry");
        self.storage
            .repository()
            .get_entry(key)
            .map_err(|e| StorageError::repository(operation, e))
    }

    pub fn transaction(&self, operation: Operation) -> Transaction<S::Serializer> {
        Transaction {
            pending_ops: Vec::new(),
            serializer: *self.storage.serializer(),
            operation,
        }
    }

    /// Applies every buffered operation in order. An empty transaction
    /// touches nothing.
    ///
    /// If one of them fails, the entries already touched are put back to the
    /// values they held before the commit started, then the error is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails to read or write an entry.
    pub fn commit(&mut self, transaction: Transaction<S::Serializer>) -> Result<(), StorageError> {
        if transaction.is_empty() {
            return Ok(());
        }
        let Transaction {
            pending_ops,
            operation,
            ..
        } = transaction;
        let repo = self.storage.repository_mut();

        let mut undo: Vec<(String, Option<Vec<u8>>)> = Vec::with_capacity(pending_ops.len());
        for op in pending_ops {
            let key = op.key().to_owned();
            debug!(key = %key, %operation, "writing entry");
            let applied = repo.get_entry(&key).and_then(|previous| {
                match &op {
                    Op::Write { key, value } => repo.insert_entry(key, value)?,
                    Op::Delete { key } => {
                        repo.remove_entry(key)?;
                    }
                }
                Ok(previous)
            });
            match applied {
                Ok(previous) => undo.push((key, previous)),
                Err(e) => {
                    let error = StorageError::repository(operation, e);
                    rollback(repo, undo, operation);
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Consumes the store and returns the underlying storage.
    pub fn dissolve(self) -> S {
        self.storage
    }
}

fn rollback<R: Repository>(repo: &mut R, undo: Vec<(String, Option<Vec<u8>>)>, operation: Operation) {
    for (key, previous) in undo.into_iter().rev() {
        let restored = match previous {
            Some(value) => repo.insert_entry(&key, &value),
            None => repo.remove_entry(&key).map(drop),
        };
        if let Err(e) = restored {
            warn!(key = %key, %operation, error = %e, "failed to roll back entry");
        }
    }
}
