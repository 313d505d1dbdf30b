use core::fmt::{Debug, Display};

use serde::{Serialize, de::DeserializeOwned};

/// A value serializer used to turn records into the bytes a [`crate::Repository`] stores.
///
/// Serializers are small configuration values and are copied into each
/// [`crate::Transaction`].
pub trait Unifier: Copy {
    type SerError: Debug + Display;
    type DeError: Debug + Display;

    /// Serializes `data` into a fresh buffer.
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<Vec<u8>, Self::SerError>;

    /// Deserializes a value from the given buffer.
    /// # Errors
    ///
    /// Returns an error if the bytes do not decode into `T`.
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, Self::DeError>;
}
