use super::*;
use crate::helper;
use crate::prelude::ContactId;

use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

pub const JSON_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct JsonEnvelopeRef<'a> {
    version: u32,
    contacts: &'a [Contact],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonEnvelope {
    version: u32,
    contacts: Vec<Contact>,
}

pub struct JsonStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "json".to_string(),
            path: path.into(),
        }
    }
}

pub struct TxtStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl TxtStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "txt".to_string(),
            path: path.into(),
        }
    }
}

impl ContactStore for JsonStorage {
    fn load(&self) -> Result<Option<Vec<Contact>>, AppError> {
        let Some(data) = read_if_exists(&self.path)? else {
            return Ok(None);
        };

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let envelope: JsonEnvelope = serde_json::from_str(&data)
            .map_err(|e| AppError::Corrupt(format!("{}: {e}", self.path.display())))?;

        if envelope.version != JSON_FORMAT_VERSION {
            return Err(AppError::Corrupt(format!(
                "{}: unsupported format version {}",
                self.path.display(),
                envelope.version
            )));
        }

        Ok(Some(envelope.contacts))
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let envelope = JsonEnvelopeRef {
            version: JSON_FORMAT_VERSION,
            contacts,
        };
        let json_contact = serde_json::to_string_pretty(&envelope)?;

        write_replacing(&self.path, json_contact.as_bytes())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn backup(&self) -> Result<Option<PathBuf>, AppError> {
        copy_aside(&self.path)
    }
}

impl ContactStore for TxtStorage {
    fn load(&self) -> Result<Option<Vec<Contact>>, AppError> {
        let Some(data) = read_if_exists(&self.path)? else {
            return Ok(None);
        };

        helper::deserialize_contacts_from_txt_buffer(Cursor::new(data))
            .map(Some)
            .map_err(|e| match e {
                AppError::Corrupt(msg) => {
                    AppError::Corrupt(format!("{}: {msg}", self.path.display()))
                }
                other => other,
            })
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        // use our helper to serialize data for txt file
        let data = helper::serialize_contacts(contacts);
        write_replacing(&self.path, data.as_bytes())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn backup(&self) -> Result<Option<PathBuf>, AppError> {
        copy_aside(&self.path)
    }
}

/// One CSV row. Only `name` is required, so hand-made files may leave out
/// `id` and any of the other columns.
#[derive(Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: ContactId,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    notes: String,
}

impl From<CsvRow> for Contact {
    fn from(row: CsvRow) -> Self {
        Contact::new(row.id, row.name, row.email, row.phone, row.notes)
    }
}

/// Flat `id,name,email,phone,notes` rows used for import and export.
pub struct CsvStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: &str) -> Result<Self, AppError> {
        let mut file_path = PathBuf::from(if path.is_empty() {
            "./csv/contacts.csv"
        } else {
            path
        });

        if file_path.is_dir() {
            file_path = file_path.join("exported.csv");
        } else if file_path.extension().is_some_and(|ext| ext != "csv") {
            return Err(AppError::Validation(
                "Import/export file must be a .csv file".to_string(),
            ));
        }

        Ok(Self {
            medium: "csv".to_string(),
            path: file_path,
        })
    }
}

impl ContactStore for CsvStorage {
    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn load(&self) -> Result<Option<Vec<Contact>>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = Reader::from_path(&self.path)?;
        let mut contacts = Vec::new();

        for result in reader.deserialize() {
            let row: CsvRow = result?;
            contacts.push(row.into());
        }

        Ok(Some(contacts))
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut writer = Writer::from_path(&self.path)?;

        for contact in contacts {
            writer.serialize(contact)?;
        }

        writer.flush()?;

        Ok(())
    }
}
