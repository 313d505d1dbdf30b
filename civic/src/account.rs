//! Registered accounts and the live session.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Field, Rule, ValidationError};

/// Length of a valid mobile number.
pub const MOBILE_NUMBER_LEN: usize = 10;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A mobile number of exactly ten ASCII digits.
///
/// This is the unique key of an [`Account`]. Deserialization runs the same
/// check, so a corrupted value fails to decode instead of leaking through.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// # Errors
    ///
    /// Returns a [`Rule::Missing`] error for blank input and [`Rule::Format`]
    /// for anything other than exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::new(Field::MobileNumber, Rule::Missing));
        }
        if raw.len() != MOBILE_NUMBER_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new(Field::MobileNumber, Rule::Format));
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered user's stored profile and credential.
///
/// The password is kept verbatim; there is no hashing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub full_name: String,
    pub mobile_number: MobileNumber,
    pub password: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("mobile_number", &self.mobile_number)
            .finish_non_exhaustive()
    }
}

/// Sign-up form input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Registration<'a> {
    pub full_name: &'a str,
    pub mobile_number: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Sign-up input that passed every rule.
pub(crate) struct ValidRegistration {
    pub full_name: String,
    pub mobile_number: MobileNumber,
    pub password: String,
}

impl Registration<'_> {
    /// Checks the fields in form order and reports the first failure.
    pub(crate) fn validate(&self) -> Result<ValidRegistration, ValidationError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::new(Field::FullName, Rule::Missing));
        }
        let mobile_number = MobileNumber::parse(self.mobile_number)?;
        check_password_present(self.password)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(Field::Password, Rule::TooShort));
        }
        if self.confirm_password.trim().is_empty() {
            return Err(ValidationError::new(Field::ConfirmPassword, Rule::Missing));
        }
        if self.confirm_password != self.password {
            return Err(ValidationError::new(Field::ConfirmPassword, Rule::Mismatch));
        }
        Ok(ValidRegistration {
            full_name: full_name.to_owned(),
            mobile_number,
            password: self.password.to_owned(),
        })
    }
}

/// Sign-in checks only the number's format and that a password was typed.
/// Unlike [`Registration::validate`], there is no length rule.
pub(crate) fn validate_login(
    mobile_number: &str,
    password: &str,
) -> Result<MobileNumber, ValidationError> {
    let mobile_number = MobileNumber::parse(mobile_number)?;
    check_password_present(password)?;
    Ok(mobile_number)
}

fn check_password_present(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::new(Field::Password, Rule::Missing));
    }
    Ok(())
}

/// The current authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// A copy of the account taken at sign-in.
    pub account: Account,
}
