//! Data models for the contact book.
//!
//! The contact record is the only persisted entity; indexes hold derived
//! lookup structures keyed by its fields.

pub mod contact;

pub use contact::{Contact, CONTACT_FIELDS};
