use core::fmt::{Debug, Display};

/// A trait defining a key-value backend decoupled from serialization.
///
/// The repository stores opaque byte values under string keys and knows nothing
/// about how those bytes were produced. Serialization lives in [`crate::Unifier`],
/// and the two are paired by [`crate::Storage`].
pub trait Repository {
    /// Error type returned by repository operations.
    type Error: Debug + Display;

    /// Insert or overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails to write the entry.
    fn insert_entry(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Retrieve the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails while reading the entry.
    fn get_entry(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Remove the value stored under `key` and return it.
    ///
    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails while removing the entry.
    fn remove_entry(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;
}

