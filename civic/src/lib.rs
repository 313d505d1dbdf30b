//! # Civic
//!
//! The local core of a civic-issue reporting app: citizens register, sign in,
//! and file reports that persist on the device with no backend server.
//!
//! ## Features
//!
//! - Pluggable key-value backends through the [`Repository`] and [`Storage`] traits
//! - JSON or bincode value encoding through [`Unifier`]
//! - All-or-nothing commits across several keys
//! - Session/credential management and a newest-first report collection
//!
//! ```
//! use civic::{Category, Client, LocationMode, MemoryStorage, Priority, ReportDraft};
//!
//! let mut client = Client::open(MemoryStorage::new())?;
//! client
//!     .sessions()
//!     .register("Asha Rao", "9876543210", "secret1", "secret1")?;
//!
//! let report = client.reports()?.submit(ReportDraft {
//!     image_ref: Some("img1".into()),
//!     location_mode: LocationMode::Manual,
//!     manual_location: Some("MG Road".into()),
//!     description: "Pothole".into(),
//!     category: Some(Category::Road),
//!     priority: Priority::High,
//!     ..ReportDraft::default()
//! })?;
//! assert_eq!(report.reported_by_name, "Asha Rao");
//! # Ok::<(), civic::CivicError>(())
//! ```

mod account;
mod btreemap;
mod client;
mod errors;
mod ids;
mod impls;
pub mod keys;
mod report;
mod reports;
mod session;
mod store;
mod traits;

pub use account::{Account, MIN_PASSWORD_LEN, MOBILE_NUMBER_LEN, MobileNumber, Session};
pub use btreemap::{MemoryStorage, MemoryStorageError};
pub use client::Client;
pub use errors::{CivicError, Field, Operation, Rule, StorageError, StorageFault, ValidationError};
pub use impls::Json;
pub use report::{
    ANONYMOUS, Category, Coordinates, Location, LocationMode, MAX_DESCRIPTION_LEN, Priority,
    Report, ReportDraft, ReportStatus,
};
pub use reports::ReportStore;
pub use session::SessionManager;
pub use store::{Store, Transaction};
pub use traits::*;
