use crate::error::StoreResult;
use crate::models::Contact;
use async_trait::async_trait;

/// Result of loading the full contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Contacts in stored order
    pub contacts: Vec<Contact>,

    /// Stored rows skipped because they were malformed
    pub dropped_rows: usize,
}

/// Repository for the contact collection.
///
/// The whole ordered collection is read and written at once; there are no
/// per-record operations at this layer.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Load every stored contact. A missing backing store is an empty collection.
    async fn load_all(&self) -> StoreResult<LoadReport>;

    /// Replace the stored collection with `contacts`.
    async fn save_all(&self, contacts: &[Contact]) -> StoreResult<()>;
}
