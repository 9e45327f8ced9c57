//! Contact Book - a personal contact manager over a flat-file store.
//!
//! Clients list, add, update, delete, search and export contacts through a
//! small JSON API. Searching combines a prefix trie over first and last
//! names, exact-match maps over id, email and phone, and a substring scan
//! over the remaining fields. The index is rebuilt from the store on every
//! request.
//!
//! # Architecture
//!
//! - **models**: The contact record and its column order
//! - **repositories**: Whole-collection load/save and the flat-file line format
//! - **search**: Prefix trie, exact indexes and the combined contact index
//! - **services**: Per-request snapshot, duplicate policy, CSV export
//! - **server**: axum routes, CORS and static file serving
//! - **observability**: Counters and timers reported through `tracing`
//! - **config** / **error**: Environment configuration and error types

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;

pub use config::Config;
pub use error::{ConfigError, ServiceError, StoreError};
pub use models::{Contact, CONTACT_FIELDS};
pub use observability::{MetricsSnapshot, MetricsTracker, Timer};
pub use repositories::{ContactRepository, FileContactRepository, LoadReport};
pub use search::{ContactIndex, ExactIndexes, IndexState, PrefixIndex};
pub use server::AppState;
pub use services::{AddOutcome, ContactFilter, ContactService, ContactServiceImpl, ContactStats};
