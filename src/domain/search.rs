use std::fmt;

use crate::prelude::Contact;

/// Contact fields that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Email,
    Phone,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Name, SearchField::Email, SearchField::Phone];
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchField::Name => "Name",
            SearchField::Email => "Email",
            SearchField::Phone => "Phone",
        };
        f.write_str(label)
    }
}

/// Linear scan keeping insertion order.
pub fn filter_by_field<'a>(
    contacts: &'a [Contact],
    field: SearchField,
    text: &str,
) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|contact| contact.field_matches(field, text))
        .collect()
}
