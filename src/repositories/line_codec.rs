//! Line format of the flat contact file.
//!
//! One contact per line, the 14 fields of [`crate::models::CONTACT_FIELDS`] joined by `,`,
//! labels joined by `;`, favorite written as `True` or `False`. Values are not
//! escaped: a field containing `,`, `;` or a newline does not survive a round
//! trip.

use crate::models::Contact;

/// Fewest fields a stored row may carry (id through country).
pub const MIN_FIELDS: usize = 7;

const FIELD_SEPARATOR: char = ',';
const LABEL_SEPARATOR: char = ';';

/// Parse one stored line.
///
/// Returns `None` for a row with fewer than [`MIN_FIELDS`] fields. Missing
/// trailing fields default to empty, fields past the 14th are ignored.
pub fn parse_line(line: &str) -> Option<Contact> {
    let parts: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }

    let field = |i: usize| parts.get(i).copied().unwrap_or("").to_string();
    let labels = parts.get(10).copied().unwrap_or("");
    let favorite = parts.get(13).copied().unwrap_or("");

    Some(Contact {
        id: field(0),
        first_name: field(1),
        last_name: field(2),
        phone: field(3),
        email: field(4),
        category: field(5),
        country: field(6),
        birthday: field(7),
        address: field(8),
        city: field(9),
        labels: split_labels(labels),
        notes: field(11),
        image_url: field(12),
        favorite: favorite.eq_ignore_ascii_case("true"),
    })
}

/// Render a contact as one stored line, without the trailing newline.
pub fn format_line(contact: &Contact) -> String {
    let labels = contact.labels.join(&LABEL_SEPARATOR.to_string());
    let favorite = format_favorite(contact.favorite);

    let fields: [&str; 14] = [
        &contact.id,
        &contact.first_name,
        &contact.last_name,
        &contact.phone,
        &contact.email,
        &contact.category,
        &contact.country,
        &contact.birthday,
        &contact.address,
        &contact.city,
        &labels,
        &contact.notes,
        &contact.image_url,
        favorite,
    ];

    fields.join(&FIELD_SEPARATOR.to_string())
}

/// Parse a whole file body, returning the contacts and the number of
/// malformed rows skipped. Blank lines are ignored and not counted.
pub fn parse_document(content: &str) -> (Vec<Contact>, usize) {
    let mut contacts = Vec::new();
    let mut dropped = 0;

    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        match parse_line(line) {
            Some(contact) => contacts.push(contact),
            None => dropped += 1,
        }
    }

    (contacts, dropped)
}

/// Render the whole file body, one newline-terminated line per contact.
pub fn format_document(contacts: &[Contact]) -> String {
    contacts
        .iter()
        .map(|contact| format_line(contact) + "\n")
        .collect()
}

/// String form of the favorite flag, shared with CSV export.
pub fn format_favorite(favorite: bool) -> &'static str {
    if favorite {
        "True"
    } else {
        "False"
    }
}

fn split_labels(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(LABEL_SEPARATOR).map(str::to_string).collect()
}
