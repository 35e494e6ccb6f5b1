use serde::{Deserialize, Serialize};
use std::fmt;

use super::search::SearchField;

pub type ContactId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl Contact {
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Contact {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            notes: notes.into(),
        }
    }

    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Name => &self.name,
            SearchField::Email => &self.email,
            SearchField::Phone => &self.phone,
        }
    }

    /// Case-insensitive exact comparison of one searchable field.
    pub fn field_matches(&self, field: SearchField, text: &str) -> bool {
        let value = self.field(field);

        if value.len() == text.len() && value.eq_ignore_ascii_case(text) {
            return true;
        }
        value.to_lowercase() == text.to_lowercase()
    }
}

// Table row in ID, Name, Email, Phone, Notes order
impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} | {:<20} | {:<30} | {:<15} | {}",
            self.id, self.name, self.email, self.phone, self.notes
        )
    }
}
