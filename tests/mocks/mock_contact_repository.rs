use async_trait::async_trait;
use contact_book::error::{StoreError, StoreResult};
use contact_book::models::Contact;
use contact_book::repositories::{ContactRepository, LoadReport};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Holds the collection in memory in stored order and tracks method calls
/// for verification. Can be told to report dropped rows or to fail saves.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    dropped_rows: Arc<Mutex<usize>>,
    fail_saves: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            dropped_rows: Arc::new(Mutex::new(0)),
            fail_saves: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a repository preloaded with `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let repo = Self::new();
        repo.add_contacts(contacts);
        repo
    }

    /// Append a contact to the stored collection.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    pub fn add_contacts(&self, contacts_list: Vec<Contact>) {
        self.contacts.lock().unwrap().extend(contacts_list);
    }

    /// Snapshot of the stored collection.
    pub fn stored(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Report `count` malformed rows on every load.
    pub fn set_dropped_rows(&self, count: usize) {
        *self.dropped_rows.lock().unwrap() = count;
    }

    /// Make every subsequent save fail.
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn load_all(&self) -> StoreResult<LoadReport> {
        self.track_call("load_all");

        Ok(LoadReport {
            contacts: self.contacts.lock().unwrap().clone(),
            dropped_rows: *self.dropped_rows.lock().unwrap(),
        })
    }

    async fn save_all(&self, contacts: &[Contact]) -> StoreResult<()> {
        self.track_call("save_all");

        if *self.fail_saves.lock().unwrap() {
            return Err(StoreError::Other("mock save failure".to_string()));
        }
        *self.contacts.lock().unwrap() = contacts.to_vec();
        Ok(())
    }
}
