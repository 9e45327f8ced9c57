//! Service layer for business logic.
//!
//! Services sit between the HTTP handlers and the repository: they load the
//! current snapshot, rebuild the search index over it and apply the
//! duplicate-contact policy.

mod contact_service;
pub mod export;

pub use contact_service::{
    AddOutcome, ContactFilter, ContactService, ContactServiceImpl, ContactStats,
};
