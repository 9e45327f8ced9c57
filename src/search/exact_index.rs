//! Exact-match hash indexes over identifier-like contact fields.

use crate::models::Contact;
use std::collections::HashMap;

/// Three independent maps keyed by id, email and phone.
///
/// A later `put` with a colliding key replaces the earlier entry; conflict
/// policy lives in the caller.
#[derive(Debug, Default)]
pub struct ExactIndexes {
    by_id: HashMap<String, Contact>,
    by_email: HashMap<String, Contact>,
    by_phone: HashMap<String, Contact>,
}

impl ExactIndexes {
    /// Create empty indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the contact under its id, email and phone.
    pub fn put(&mut self, contact: &Contact) {
        self.by_id.insert(contact.id.clone(), contact.clone());
        self.by_email.insert(contact.email.clone(), contact.clone());
        self.by_phone.insert(contact.phone.clone(), contact.clone());
    }

    /// Drop every entry from all three maps.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_email.clear();
        self.by_phone.clear();
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.by_email.contains_key(email)
    }

    pub fn contains_phone(&self, phone: &str) -> bool {
        self.by_phone.contains_key(phone)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Contact> {
        self.by_id.get(id)
    }

    pub fn get_by_email(&self, email: &str) -> Option<&Contact> {
        self.by_email.get(email)
    }

    pub fn get_by_phone(&self, phone: &str) -> Option<&Contact> {
        self.by_phone.get(phone)
    }

    /// Number of distinct ids indexed.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
