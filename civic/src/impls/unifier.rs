//! Implementations of the `Unifier` trait for the supported value formats.

use bincode::{
    config::Configuration,
    error::{DecodeError, EncodeError},
    serde::{decode_from_slice, encode_to_vec},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::Unifier;

/// JSON values via `serde_json`.
///
/// This is the default serializer: stored values stay human-readable, which
/// matters for the file backend where every key is a file on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl Unifier for Json {
    type SerError = serde_json::Error;
    type DeError = serde_json::Error;

    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<Vec<u8>, Self::SerError> {
        serde_json::to_vec(data)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, Self::DeError> {
        serde_json::from_slice(data)
    }
}

/// Implementation of `Unifier` for bincode's `Configuration`.
///
/// Compact binary values for backends where readability does not matter.
impl Unifier for Configuration {
    type SerError = EncodeError;
    type DeError = DecodeError;

    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<Vec<u8>, Self::SerError> {
        encode_to_vec(data, *self)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, Self::DeError> {
        Ok(decode_from_slice(data, *self)?.0)
    }
}
