use core::fmt::{self, Display};

/// Errors returned by every core operation.
///
/// Only [`CivicError::Storage`] may be transient. The core never retries; callers
/// may repeat the whole logical operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CivicError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("account not found, please sign up first")]
    AccountNotFound,
    #[error("invalid password")]
    InvalidCredentials,
    #[error("no active session, please sign in")]
    NotAuthenticated,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The input field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    FullName,
    MobileNumber,
    Password,
    ConfirmPassword,
    Image,
    Location,
    Description,
    Category,
}

/// The rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Absent or blank.
    Missing,
    /// Present but malformed, e.g. a mobile number that is not 10 digits.
    Format,
    TooShort,
    TooLong,
    /// Confirmation does not match.
    Mismatch,
}

/// The first field of an input that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {}", .rule.describe())]
pub struct ValidationError {
    pub field: Field,
    pub rule: Rule,
}

impl ValidationError {
    pub(crate) const fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl Rule {
    fn describe(self) -> &'static str {
        match self {
            Self::Missing => "required",
            Self::Format => "malformed",
            Self::TooShort => "too short",
            Self::TooLong => "too long",
            Self::Mismatch => "does not match",
        }
    }
}

/// The core operation during which a storage failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Register,
    Login,
    Logout,
    RestoreSession,
    Submit,
    List,
    Delete,
}

/// What went wrong underneath a [`StorageError`].
///
/// Backend and serializer errors are flattened to their messages so the
/// domain error stays independent of the storage type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageFault {
    /// The repository failed to read or write an entry.
    Repository(String),
    Serialization(String),
    /// A stored value did not decode, most likely caused by corruption.
    Deserialization(String),
}

/// A persistence failure, tagged with the operation that hit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    pub operation: Operation,
    pub fault: StorageFault,
}

impl StorageError {
    pub(crate) fn repository(operation: Operation, e: impl Display) -> Self {
        Self {
            operation,
            fault: StorageFault::Repository(e.to_string()),
        }
    }

    pub(crate) fn serialization(operation: Operation, e: impl Display) -> Self {
        Self {
            operation,
            fault: StorageFault::Serialization(e.to_string()),
        }
    }

    pub(crate) fn deserialization(operation: Operation, e: impl Display) -> Self {
        Self {
            operation,
            fault: StorageFault::Deserialization(e.to_string()),
        }
    }
}

impl Display for StorageFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Repository(ref e) => write!(f, "Storage error: {e}"),
            Self::Serialization(ref e) => write!(f, "Value serialization error: {e}"),
            Self::Deserialization(ref e) => write!(f, "Value deserialization error: {e}"),
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.fault)
    }
}

impl core::error::Error for StorageError {}
