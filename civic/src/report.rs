//! Civic-issue report records and the draft they are built from.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    account::Account,
    errors::{Field, Rule, ValidationError},
};

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Name stamped on reports whose author has no usable name.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Road,
    Water,
    Electricity,
    Waste,
    Safety,
    Other,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Review status of a report. Every report is created as `Submitted`;
/// nothing in this crate moves it on.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ReportStatus {
    #[default]
    Submitted,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

/// How the location of a report was captured.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LocationMode {
    #[default]
    Auto,
    Manual,
}

/// A position fix in floating-point degrees.
///
/// Decoding goes through [`Coordinates::new`], so a stored fix that is out of
/// range or not finite fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// # Errors
    ///
    /// Rejects non-finite values and values outside the valid degree ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(ValidationError::new(Field::Location, Rule::Format));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Where the issue is: either a position fix or text the reporter typed.
///
/// Stored as `{"locationMode": "auto" | "manual", "location": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "locationMode", content = "location")]
pub enum Location {
    Auto(Coordinates),
    Manual(String),
}

impl Location {
    pub fn mode(&self) -> LocationMode {
        match self {
            Self::Auto(_) => LocationMode::Auto,
            Self::Manual(_) => LocationMode::Manual,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto(c) => write!(f, "{:.6}, {:.6}", c.latitude, c.longitude),
            Self::Manual(text) => f.write_str(text),
        }
    }
}

/// Form state handed over by the presentation layer.
///
/// Collaborator outputs may be absent: a cancelled photo capture leaves
/// `image_ref` empty, a denied location permission leaves `coordinates` empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub image_ref: Option<String>,
    pub location_mode: LocationMode,
    pub coordinates: Option<Coordinates>,
    pub manual_location: Option<String>,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Priority,
}

/// A draft that passed validation, ready to be stamped and stored.
#[derive(Debug)]
pub(crate) struct ValidDraft {
    image_ref: String,
    location: Location,
    description: String,
    category: Category,
    priority: Priority,
}

impl ReportDraft {
    /// Checks image, location, description and category, in that order.
    pub(crate) fn validate(self) -> Result<ValidDraft, ValidationError> {
        let image_ref = self
            .image_ref
            .filter(|image| !image.trim().is_empty())
            .ok_or(ValidationError::new(Field::Image, Rule::Missing))?;

        let location = match self.location_mode {
            LocationMode::Auto => self.coordinates.map(Location::Auto),
            LocationMode::Manual => self
                .manual_location
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| Location::Manual(text.to_owned())),
        }
        .ok_or(ValidationError::new(Field::Location, Rule::Missing))?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::new(Field::Description, Rule::Missing));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::new(Field::Description, Rule::TooLong));
        }

        let category = self
            .category
            .ok_or(ValidationError::new(Field::Category, Rule::Missing))?;

        Ok(ValidDraft {
            image_ref,
            location,
            description: description.to_owned(),
            category,
            priority: self.priority,
        })
    }
}

/// One submitted civic issue. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub image_ref: String,
    pub location: Location,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub reported_by_name: String,
    pub reported_by_mobile: Option<String>,
}

impl Report {
    pub(crate) fn create(
        draft: ValidDraft,
        id: String,
        created_at: DateTime<Utc>,
        reporter: Option<&Account>,
    ) -> Self {
        let reported_by_name = reporter
            .map(|account| account.full_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS)
            .to_owned();
        Self {
            id,
            image_ref: draft.image_ref,
            location: draft.location,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            status: ReportStatus::Submitted,
            created_at,
            reported_by_name,
            reported_by_mobile: reporter.map(|account| account.mobile_number.to_string()),
        }
    }

    pub fn location_mode(&self) -> LocationMode {
        self.location.mode()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self.location {
            Location::Auto(coordinates) => Some(coordinates),
            Location::Manual(_) => None,
        }
    }

    pub fn manual_location_text(&self) -> Option<&str> {
        match &self.location {
            Location::Auto(_) => None,
            Location::Manual(text) => Some(text),
        }
    }
}
