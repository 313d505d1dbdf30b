//! Stable store key names.

use crate::account::MobileNumber;

/// Profile cache of the signed-in account.
pub const USER_DATA: &str = "user_data";
/// Opaque token of the live session, stored as raw text.
pub const USER_TOKEN: &str = "user_token";
/// The whole report collection, newest first.
pub const CIVIC_REPORTS: &str = "civic_reports";

const CREDENTIALS_PREFIX: &str = "user_credentials_";

/// Key of the stored account for `mobile_number`.
pub fn credentials(mobile_number: &MobileNumber) -> String {
    format!("{CREDENTIALS_PREFIX}{mobile_number}")
}
