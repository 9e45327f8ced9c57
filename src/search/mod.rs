//! In-memory contact search.
//!
//! A prefix trie over first and last names, exact-match maps over id, email
//! and phone, and a substring scan that together answer free-text queries.
//! Indexes are rebuilt from scratch for every snapshot of the contact store.

pub mod contact_index;
pub mod exact_index;
pub mod prefix_index;

pub use contact_index::{matches_substring, ContactIndex, IndexState};
pub use exact_index::ExactIndexes;
pub use prefix_index::PrefixIndex;
