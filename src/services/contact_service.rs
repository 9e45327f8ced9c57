//! Contact service layer.
//!
//! Every operation loads the full collection from the repository, rebuilds a
//! fresh [`ContactIndex`] over it, computes its answer and, for writes, saves
//! the whole collection back. Nothing is cached between calls.

use crate::error::{ServiceError, ServiceResult};
use crate::models::Contact;
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::ContactRepository;
use crate::search::ContactIndex;
use crate::services::export;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of adding a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Stored
    Added,
    /// Rejected: email, phone or id already present. The store is untouched.
    Duplicate,
}

/// Optional equality filters for listing contacts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFilter {
    /// Case-insensitive category match
    pub category: Option<String>,
    /// Case-insensitive country match
    pub country: Option<String>,
    /// Favorite flag match
    pub favorite: Option<bool>,
}

impl ContactFilter {
    fn matches(&self, contact: &Contact) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |c| contact.category.to_lowercase() == c.to_lowercase());
        let country_ok = self
            .country
            .as_ref()
            .map_or(true, |c| contact.country.to_lowercase() == c.to_lowercase());
        let favorite_ok = self.favorite.map_or(true, |f| contact.favorite == f);

        category_ok && country_ok && favorite_ok
    }
}

/// Aggregate counts over the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub favorites: usize,
    /// Contacts per non-empty category
    pub by_category: BTreeMap<String, usize>,
    /// Contacts per label
    pub by_label: BTreeMap<String, usize>,
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts in stored order, narrowed by `filter`.
    async fn list(&self, filter: &ContactFilter) -> ServiceResult<Vec<Contact>>;

    /// The contact with `id`.
    async fn get(&self, id: &str) -> ServiceResult<Contact>;

    /// Append a contact unless its email, phone or id is already taken.
    async fn add(&self, contact: Contact) -> ServiceResult<AddOutcome>;

    /// Replace the contact with `id`. The path id overrides any id in `contact`.
    ///
    /// Fails with [`ServiceError::Duplicate`] when the new email or phone
    /// belongs to another contact; the store is left untouched.
    async fn update(&self, id: &str, contact: Contact) -> ServiceResult<Contact>;

    /// Flip the favorite flag of the contact with `id`.
    async fn toggle_favorite(&self, id: &str) -> ServiceResult<Contact>;

    /// Remove every contact with `id`. Returns whether anything was removed.
    async fn delete(&self, id: &str) -> ServiceResult<bool>;

    /// Free-text search over names, fields and labels.
    async fn search(&self, query: &str) -> ServiceResult<Vec<Contact>>;

    /// The collection rendered as CSV.
    async fn export_csv(&self) -> ServiceResult<String>;

    /// Contacts whose `YYYY-MM-DD` birthday falls on `month`/`day` of any year.
    async fn birthdays_on(&self, month: u32, day: u32) -> ServiceResult<Vec<Contact>>;

    /// Totals by category and label.
    async fn stats(&self) -> ServiceResult<ContactStats>;
}

/// One loaded collection and the index built over it.
struct Snapshot {
    contacts: Vec<Contact>,
    index: ContactIndex,
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    metrics: MetricsTracker,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repository: Arc<dyn ContactRepository>, metrics: MetricsTracker) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    async fn load_snapshot(&self) -> ServiceResult<Snapshot> {
        let report = self.repository.load_all().await?;
        self.metrics
            .track_snapshot_load(report.contacts.len(), report.dropped_rows);

        let index = ContactIndex::build(&report.contacts);
        Ok(Snapshot {
            contacts: report.contacts,
            index,
        })
    }

    fn record<T>(&self, operation: &str, timer: Timer, result: &ServiceResult<T>) {
        self.metrics
            .track_request(operation, timer.finish(), result.is_ok());
    }

    fn validate_contact_id(id: &str) -> ServiceResult<()> {
        if id.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Contact ID cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn add_inner(&self, contact: Contact) -> ServiceResult<AddOutcome> {
        Self::validate_contact_id(&contact.id)?;

        let mut snapshot = self.load_snapshot().await?;
        let holder = snapshot
            .index
            .find_duplicate(&contact)
            .or_else(|| snapshot.index.exact().get_by_id(&contact.id));
        if let Some(existing) = holder {
            tracing::info!(
                contact_id = %contact.id,
                existing_id = %existing.id,
                "Rejected duplicate contact"
            );
            self.metrics.track_duplicate_rejected();
            return Ok(AddOutcome::Duplicate);
        }

        tracing::info!(contact_id = %contact.id, name = %contact.full_name(), "Adding contact");
        snapshot.contacts.push(contact);
        self.repository.save_all(&snapshot.contacts).await?;
        Ok(AddOutcome::Added)
    }

    async fn update_inner(&self, id: &str, contact: Contact) -> ServiceResult<Contact> {
        let mut snapshot = self.load_snapshot().await?;
        let position = snapshot
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let candidate = Contact {
            id: id.to_string(),
            ..contact
        };

        // uniqueness is checked against every other contact
        let others: Vec<Contact> = snapshot
            .contacts
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        if let Some(existing) = ContactIndex::build(&others).find_duplicate(&candidate) {
            tracing::info!(
                contact_id = %id,
                existing_id = %existing.id,
                "Rejected update reusing another contact's email or phone"
            );
            self.metrics.track_duplicate_rejected();
            return Err(ServiceError::Duplicate {
                id: id.to_string(),
                existing: existing.id.clone(),
            });
        }

        tracing::info!(contact_id = %id, name = %candidate.full_name(), "Updated contact");
        snapshot.contacts[position] = candidate.clone();
        self.repository.save_all(&snapshot.contacts).await?;
        Ok(candidate)
    }

    async fn toggle_inner(&self, id: &str) -> ServiceResult<Contact> {
        let mut snapshot = self.load_snapshot().await?;
        let contact = snapshot
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        contact.favorite = !contact.favorite;
        let updated = contact.clone();

        self.repository.save_all(&snapshot.contacts).await?;
        Ok(updated)
    }

    async fn delete_inner(&self, id: &str) -> ServiceResult<bool> {
        let mut snapshot = self.load_snapshot().await?;
        let before = snapshot.contacts.len();
        snapshot.contacts.retain(|c| c.id != id);
        let removed = snapshot.contacts.len() < before;

        self.repository.save_all(&snapshot.contacts).await?;
        tracing::info!(contact_id = %id, removed = removed, "Deleted contact");
        Ok(removed)
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list(&self, filter: &ContactFilter) -> ServiceResult<Vec<Contact>> {
        let timer = Timer::new("list");
        let result = self.load_snapshot().await.map(|snapshot| {
            snapshot
                .contacts
                .into_iter()
                .filter(|c| filter.matches(c))
                .collect()
        });
        self.record("list", timer, &result);
        result
    }

    async fn get(&self, id: &str) -> ServiceResult<Contact> {
        let timer = Timer::new("get");
        let result = self.load_snapshot().await.and_then(|snapshot| {
            snapshot
                .index
                .exact()
                .get_by_id(id)
                .cloned()
                .ok_or_else(|| ServiceError::NotFound(id.to_string()))
        });
        self.record("get", timer, &result);
        result
    }

    async fn add(&self, contact: Contact) -> ServiceResult<AddOutcome> {
        let timer = Timer::new("add");
        let result = self.add_inner(contact).await;
        self.record("add", timer, &result);
        result
    }

    async fn update(&self, id: &str, contact: Contact) -> ServiceResult<Contact> {
        let timer = Timer::new("update");
        let result = self.update_inner(id, contact).await;
        self.record("update", timer, &result);
        result
    }

    async fn toggle_favorite(&self, id: &str) -> ServiceResult<Contact> {
        let timer = Timer::new("toggle_favorite");
        let result = self.toggle_inner(id).await;
        self.record("toggle_favorite", timer, &result);
        result
    }

    async fn delete(&self, id: &str) -> ServiceResult<bool> {
        let timer = Timer::new("delete");
        let result = self.delete_inner(id).await;
        self.record("delete", timer, &result);
        result
    }

    async fn search(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let timer = Timer::new("search");
        let result = self.load_snapshot().await.map(|snapshot| {
            snapshot
                .index
                .search(query, &snapshot.contacts)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        });

        if let Ok(ref results) = result {
            self.metrics
                .track_search_query(timer.elapsed_ms(), results.len());
        }
        self.record("search", timer, &result);
        result
    }

    async fn export_csv(&self) -> ServiceResult<String> {
        let timer = Timer::new("export");
        let result = self
            .load_snapshot()
            .await
            .map(|snapshot| export::render_csv(&snapshot.contacts));
        self.record("export", timer, &result);
        result
    }

    async fn birthdays_on(&self, month: u32, day: u32) -> ServiceResult<Vec<Contact>> {
        let timer = Timer::new("birthdays");
        let result = self.load_snapshot().await.map(|snapshot| {
            snapshot
                .contacts
                .into_iter()
                .filter(|c| c.birthday_month_day() == Some((month, day)))
                .collect()
        });
        self.record("birthdays", timer, &result);
        result
    }

    async fn stats(&self) -> ServiceResult<ContactStats> {
        let timer = Timer::new("stats");
        let result = self.load_snapshot().await.map(|snapshot| {
            let mut stats = ContactStats {
                total: snapshot.contacts.len(),
                ..ContactStats::default()
            };
            for contact in &snapshot.contacts {
                if contact.favorite {
                    stats.favorites += 1;
                }
                if !contact.category.is_empty() {
                    *stats
                        .by_category
                        .entry(contact.category.clone())
                        .or_default() += 1;
                }
                for label in &contact.labels {
                    *stats.by_label.entry(label.clone()).or_default() += 1;
                }
            }
            stats
        });
        self.record("stats", timer, &result);
        result
    }
}
