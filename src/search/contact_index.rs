//! Contact index: rebuild over a snapshot and answer free-text queries.
//!
//! The index is only valid for the snapshot it was last rebuilt from. Any change
//! to the contact collection requires a fresh [`ContactIndex::rebuild`] before
//! the next query.

use super::exact_index::ExactIndexes;
use super::prefix_index::PrefixIndex;
use crate::models::Contact;

/// Lifecycle state of a [`ContactIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// Constructed, never rebuilt
    Empty,
    /// Rebuilt `generation` times; reflects the most recent snapshot
    Built { generation: u64 },
}

/// Name trie plus exact-match maps over one contact snapshot.
#[derive(Debug, Default)]
pub struct ContactIndex {
    names: PrefixIndex,
    exact: ExactIndexes,
    // lower-cased searched fields, one entry per snapshot position
    folded: Vec<Vec<String>>,
    generation: u64,
}

impl ContactIndex {
    /// Create an empty, unbuilt index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index already rebuilt over `contacts`.
    pub fn build(contacts: &[Contact]) -> Self {
        let mut index = Self::new();
        index.rebuild(contacts);
        index
    }

    /// Replace every structure with one derived from `contacts`.
    ///
    /// First and last names go into the trie under the contact id; each record
    /// is written to all three exact maps in sequence order, so the last record
    /// wins on a colliding key.
    pub fn rebuild(&mut self, contacts: &[Contact]) {
        self.names = PrefixIndex::new();
        self.exact.clear();
        self.folded.clear();

        for contact in contacts {
            self.names.insert(&contact.first_name, &contact.id);
            self.names.insert(&contact.last_name, &contact.id);
            self.exact.put(contact);
            self.folded
                .push(searched_fields(contact).map(|f| f.to_lowercase()).collect());
        }

        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            contacts = contacts.len(),
            trie_nodes = self.names.node_count(),
            "Contact index rebuilt"
        );
    }

    pub fn state(&self) -> IndexState {
        match self.generation {
            0 => IndexState::Empty,
            generation => IndexState::Built { generation },
        }
    }

    pub fn names(&self) -> &PrefixIndex {
        &self.names
    }

    pub fn exact(&self) -> &ExactIndexes {
        &self.exact
    }

    /// The indexed contact already holding `candidate`'s email or phone.
    ///
    /// Empty values never collide.
    pub fn find_duplicate(&self, candidate: &Contact) -> Option<&Contact> {
        let by_email = (!candidate.email.is_empty())
            .then(|| self.exact.get_by_email(&candidate.email))
            .flatten();
        by_email.or_else(|| {
            (!candidate.phone.is_empty())
                .then(|| self.exact.get_by_phone(&candidate.phone))
                .flatten()
        })
    }

    /// Whether `candidate` collides with an indexed contact on email or phone.
    pub fn is_duplicate(&self, candidate: &Contact) -> bool {
        self.find_duplicate(candidate).is_some()
    }

    /// Contacts matching `query`, in the order they appear in `contacts`.
    ///
    /// A contact matches when the lower-cased query is a prefix of its first or
    /// last name (via the trie), a substring of any searched field, or a
    /// substring of any label. The query is not trimmed, and the empty query
    /// matches everything through the substring rule.
    ///
    /// `contacts` must be the snapshot this index was last rebuilt from.
    pub fn search<'a>(&self, query: &str, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        let query_lower = query.to_lowercase();
        let prefix_ids = self.names.search(&query_lower);

        contacts
            .iter()
            .enumerate()
            .filter(|(position, contact)| {
                if prefix_ids.contains(&contact.id) {
                    return true;
                }
                match self.folded.get(*position) {
                    Some(fields) if self.folded.len() == contacts.len() => {
                        fields.iter().any(|field| field.contains(&query_lower))
                    }
                    _ => matches_substring(contact, &query_lower),
                }
            })
            .map(|(_, contact)| contact)
            .collect()
    }
}

/// Fields covered by the substring rule, labels last.
fn searched_fields(contact: &Contact) -> impl Iterator<Item = &String> {
    [
        &contact.first_name,
        &contact.last_name,
        &contact.phone,
        &contact.email,
        &contact.category,
        &contact.country,
        &contact.address,
        &contact.city,
        &contact.notes,
    ]
    .into_iter()
    .chain(contact.labels.iter())
}

/// Whether the already lower-cased `query_lower` occurs in any searched field
/// of `contact` or in any of its labels.
pub fn matches_substring(contact: &Contact, query_lower: &str) -> bool {
    searched_fields(contact).any(|field| field.to_lowercase().contains(query_lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Contact> {
        let mut ann = Contact::new("1", "Ann", "Lee");
        ann.phone = "1".to_string();
        ann.email = "a@x.com".to_string();
        ann.labels = vec!["vip".to_string()];

        let mut bob = Contact::new("2", "Bob", "Lane");
        bob.phone = "2".to_string();
        bob.email = "b@x.com".to_string();

        vec![ann, bob]
    }

    fn ids(results: &[&Contact]) -> Vec<String> {
        results.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut index = ContactIndex::new();
        assert_eq!(index.state(), IndexState::Empty);

        index.rebuild(&scenario());
        assert_eq!(index.state(), IndexState::Built { generation: 1 });

        index.rebuild(&[]);
        assert_eq!(index.state(), IndexState::Built { generation: 2 });
    }

    #[test]
    fn test_rebuild_replaces_previous_snapshot() {
        let mut index = ContactIndex::build(&scenario());
        assert!(index.names().contains("an", "1"));

        index.rebuild(&[Contact::new("9", "Zed", "Zulu")]);

        assert!(index.names().search("an").is_empty());
        assert!(!index.exact().contains_email("a@x.com"));
        assert!(index.exact().contains_id("9"));
        assert_eq!(index.exact().len(), 1);
    }

    #[test]
    fn test_rebuild_indexes_first_and_last_names() {
        let index = ContactIndex::build(&scenario());

        assert!(index.names().contains("le", "1"));
        assert!(index.names().contains("bo", "2"));
        assert!(index.names().contains("lan", "2"));
        assert!(!index.names().contains("lee", "2"));
    }

    #[test]
    fn test_search_prefix_and_substring() {
        let contacts = scenario();
        let index = ContactIndex::build(&contacts);

        // "Ann" by prefix, "Lane" by substring
        assert_eq!(ids(&index.search("an", &contacts)), vec!["1", "2"]);
    }

    #[test]
    fn test_search_label_substring() {
        let contacts = scenario();
        let index = ContactIndex::build(&contacts);

        assert_eq!(ids(&index.search("vip", &contacts)), vec!["1"]);
        assert_eq!(ids(&index.search("VI", &contacts)), vec!["1"]);
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let contacts = scenario();
        let index = ContactIndex::build(&contacts);

        assert_eq!(ids(&index.search("", &contacts)), vec!["1", "2"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut contacts = scenario();
        contacts.push(Contact::new("3", "John", "Smith"));
        let index = ContactIndex::build(&contacts);

        assert_eq!(
            ids(&index.search("SMITH", &contacts)),
            ids(&index.search("smith", &contacts))
        );
        assert_eq!(ids(&index.search("smith", &contacts)), vec!["3"]);
    }

    #[test]
    fn test_query_whitespace_is_literal() {
        let mut contacts = scenario();
        contacts[0].notes = "met at the conference".to_string();
        let index = ContactIndex::build(&contacts);

        assert_eq!(ids(&index.search(" at ", &contacts)), vec!["1"]);
        assert!(index.search(" ann", &contacts).is_empty());
    }

    #[test]
    fn test_search_other_fields() {
        let mut contacts = scenario();
        contacts[1].city = "Lisbon".to_string();
        contacts[1].category = "Work".to_string();
        let index = ContactIndex::build(&contacts);

        assert_eq!(ids(&index.search("lisb", &contacts)), vec!["2"]);
        assert_eq!(ids(&index.search("work", &contacts)), vec!["2"]);
        assert_eq!(ids(&index.search("x.com", &contacts)), vec!["1", "2"]);
        assert!(index.search("zzz", &contacts).is_empty());
    }

    #[test]
    fn test_birthday_and_image_are_not_searched() {
        let mut contacts = scenario();
        contacts[0].birthday = "1990-01-01".to_string();
        contacts[0].image_url = "http://images/qqq.png".to_string();
        let index = ContactIndex::build(&contacts);

        assert!(index.search("1990", &contacts).is_empty());
        assert!(index.search("qqq", &contacts).is_empty());
    }

    #[test]
    fn test_is_duplicate_on_email_or_phone() {
        let index = ContactIndex::build(&scenario());

        let mut same_email = Contact::new("3", "Cy", "Doe");
        same_email.email = "a@x.com".to_string();
        same_email.phone = "999".to_string();
        assert!(index.is_duplicate(&same_email));

        let mut same_phone = Contact::new("4", "Di", "Doe");
        same_phone.email = "d@x.com".to_string();
        same_phone.phone = "2".to_string();
        assert!(index.is_duplicate(&same_phone));

        let mut fresh = Contact::new("5", "Ed", "Doe");
        fresh.email = "e@x.com".to_string();
        fresh.phone = "5".to_string();
        assert!(!index.is_duplicate(&fresh));
    }

    #[test]
    fn test_find_duplicate_names_the_holder() {
        let index = ContactIndex::build(&scenario());

        let mut by_phone = Contact::new("7", "Flo", "Doe");
        by_phone.phone = "2".to_string();
        assert_eq!(index.find_duplicate(&by_phone).map(|c| c.id.as_str()), Some("2"));

        let mut by_both = Contact::new("8", "Gus", "Doe");
        by_both.email = "a@x.com".to_string();
        by_both.phone = "2".to_string();
        assert_eq!(index.find_duplicate(&by_both).map(|c| c.id.as_str()), Some("1"));
    }

    #[test]
    fn test_search_against_other_slice_falls_back_to_scan() {
        let index = ContactIndex::build(&scenario());
        let other = vec![Contact::new("5", "Hal", "Lanford")];

        assert_eq!(ids(&index.search("lan", &other)), vec!["5"]);
        assert!(index.search("vip", &other).is_empty());
    }

    #[test]
    fn test_folded_fields_match_direct_scan() {
        let mut contacts = scenario();
        contacts[1].notes = "Prefers ÉMAIL".to_string();
        let index = ContactIndex::build(&contacts);

        for query in ["émail", "VIP", "b@X", "ee", ""] {
            let lower = query.to_lowercase();
            let scanned: Vec<String> = contacts
                .iter()
                .filter(|c| index.names().contains(&lower, &c.id) || matches_substring(c, &lower))
                .map(|c| c.id.clone())
                .collect();
            assert_eq!(ids(&index.search(query, &contacts)), scanned, "query {query:?}");
        }
    }

    #[test]
    fn test_empty_email_and_phone_never_collide() {
        let contacts = vec![Contact::new("1", "Ann", "Lee")];
        let index = ContactIndex::build(&contacts);

        assert!(!index.is_duplicate(&Contact::new("2", "Bob", "Lane")));
    }
}
