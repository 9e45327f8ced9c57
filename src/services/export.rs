//! CSV export of the contact collection.
//!
//! Columns follow [`CONTACT_FIELDS`] with a header row. Fields are quoted only
//! when they contain a comma, a double quote or a line break, with embedded
//! quotes doubled; rows end in CRLF.

use crate::models::{Contact, CONTACT_FIELDS};
use crate::repositories::line_codec::format_favorite;

const LINE_TERMINATOR: &str = "\r\n";

/// Render `contacts` as a CSV document.
pub fn render_csv(contacts: &[Contact]) -> String {
    let mut out = String::new();
    push_row(&mut out, CONTACT_FIELDS.iter().copied());

    for contact in contacts {
        let labels = contact.labels.join(";");
        push_row(
            &mut out,
            [
                contact.id.as_str(),
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
                format_favorite(contact.favorite),
            ],
        );
    }

    out
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(LINE_TERMINATOR);
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\r', '\n']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }

    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
