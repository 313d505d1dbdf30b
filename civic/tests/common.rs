#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Local, TimeZone, Utc};
use civic::{
    Category, Client, Coordinates, Json, LocationMode, MemoryStorage, Priority, Repository,
    ReportDraft, Storage,
};
use mockable::Clock;
use thiserror::Error;

pub const ASHA_MOBILE: &str = "9876543210";
pub const ASHA_PASSWORD: &str = "secret1";

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// A clock that never moves, so every id after the first is derived from the floor.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub fn open<S: Storage>(storage: S) -> Client<S> {
    Client::open_with_clock(storage, fixture_clock()).expect("client opens")
}

/// A fresh in-memory client with Asha Rao registered and signed in.
pub fn signed_in() -> Client<MemoryStorage> {
    let mut client = open(MemoryStorage::new());
    client
        .sessions()
        .register("Asha Rao", ASHA_MOBILE, ASHA_PASSWORD, ASHA_PASSWORD)
        .expect("registration succeeds");
    client
}

pub fn manual_draft(description: &str) -> ReportDraft {
    ReportDraft {
        image_ref: Some("img1".into()),
        location_mode: LocationMode::Manual,
        coordinates: None,
        manual_location: Some("MG Road".into()),
        description: description.into(),
        category: Some(Category::Road),
        priority: Priority::High,
    }
}

pub fn auto_draft(latitude: f64, longitude: f64) -> ReportDraft {
    ReportDraft {
        image_ref: Some("file:///photos/42.jpg".into()),
        location_mode: LocationMode::Auto,
        coordinates: Some(Coordinates::new(latitude, longitude).expect("valid fix")),
        manual_location: None,
        description: "Streetlight out".into(),
        category: Some(Category::Electricity),
        priority: Priority::default(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("simulated failure writing {0}")]
pub struct FlakyError(pub String);

/// In-memory storage that can be told to fail a chosen write, or every read.
#[derive(Debug, Default)]
pub struct FlakyStorage {
    pub data: BTreeMap<String, Vec<u8>>,
    /// Number of writes that still succeed before one fails.
    pub writes_before_failure: Option<usize>,
    pub fail_reads: bool,
}

impl FlakyStorage {
    pub fn fail_write_after(&mut self, successful_writes: usize) {
        self.writes_before_failure = Some(successful_writes);
    }

    fn check_write(&mut self, key: &str) -> Result<(), FlakyError> {
        match self.writes_before_failure {
            Some(0) => {
                self.writes_before_failure = None;
                Err(FlakyError(key.to_owned()))
            }
            Some(n) => {
                self.writes_before_failure = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Repository for FlakyStorage {
    type Error = FlakyError;

    fn insert_entry(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.check_write(key)?;
        self.data.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get_entry(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        if self.fail_reads {
            return Err(FlakyError(key.to_owned()));
        }
        Ok(self.data.get(key).cloned())
    }

    fn remove_entry(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        self.check_write(key)?;
        Ok(self.data.remove(key))
    }
}

impl Storage for FlakyStorage {
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
