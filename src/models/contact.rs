//! Contact model representing one person in the contact book.

use serde::{Deserialize, Serialize};

/// Column order shared by the flat-file store and the CSV export.
pub const CONTACT_FIELDS: [&str; 14] = [
    "id",
    "firstName",
    "lastName",
    "phone",
    "email",
    "category",
    "country",
    "birthday",
    "address",
    "city",
    "labels",
    "notes",
    "imageUrl",
    "favorite",
];

/// A contact record.
///
/// Every field defaults when absent from a JSON payload, so partially filled
/// client submissions arrive with empty strings rather than missing values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Caller-supplied identifier, unique within the store
    pub id: String,

    /// First name (indexed by prefix)
    pub first_name: String,

    /// Last name (indexed by prefix)
    pub last_name: String,

    /// Phone number, used for duplicate detection
    pub phone: String,

    /// Email address, used for duplicate detection
    pub email: String,

    pub category: String,

    pub country: String,

    /// Birthday, conventionally `YYYY-MM-DD`
    pub birthday: String,

    pub address: String,

    pub city: String,

    /// Free-form labels, stored `;`-joined
    pub labels: Vec<String>,

    pub notes: String,

    /// Profile image URL
    pub image_url: String,

    pub favorite: bool,
}

impl Contact {
    /// Create a contact with an id and a name; every other field is empty.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// First and last name joined by a space, skipping empty parts.
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Month and day of the birthday, if it parses as `YYYY-MM-DD`.
    pub fn birthday_month_day(&self) -> Option<(u32, u32)> {
        use chrono::{Datelike, NaiveDate};

        NaiveDate::parse_from_str(self.birthday.trim(), "%Y-%m-%d")
            .ok()
            .map(|date| (date.month(), date.day()))
    }
}
