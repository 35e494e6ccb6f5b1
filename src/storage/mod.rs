pub mod memory;
pub mod stores;

use crate::prelude::{AppError, Contact};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const JSON_STORAGE_PATH: &str = "./.instance/contacts.json";
pub const TXT_STORAGE_PATH: &str = "./.instance/contacts.txt";

pub trait ContactStore {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<Vec<Contact>>, AppError>;

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;

    /// Copies the stored data aside so a later save cannot destroy it.
    /// Returns where the copy went, or `None` when there is nothing to keep.
    fn backup(&self) -> Result<Option<PathBuf>, AppError> {
        Ok(None)
    }
}

impl<T: ContactStore + ?Sized> ContactStore for &T {
    fn load(&self) -> Result<Option<Vec<Contact>>, AppError> {
        (**self).load()
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        (**self).save(contacts)
    }

    fn get_medium(&self) -> &str {
        (**self).get_medium()
    }

    fn backup(&self) -> Result<Option<PathBuf>, AppError> {
        (**self).backup()
    }
}

impl<T: ContactStore + ?Sized> ContactStore for Box<T> {
    fn load(&self) -> Result<Option<Vec<Contact>>, AppError> {
        (**self).load()
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        (**self).save(contacts)
    }

    fn get_medium(&self) -> &str {
        (**self).get_medium()
    }

    fn backup(&self) -> Result<Option<PathBuf>, AppError> {
        (**self).backup()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMediums {
    Txt,
    Json,
    Mem,
}

impl StorageMediums {
    pub fn is_txt(&self) -> bool {
        matches!(self, StorageMediums::Txt)
    }

    pub fn is_which(&self) -> &str {
        match self {
            StorageMediums::Json => "json",
            StorageMediums::Txt => "txt",
            StorageMediums::Mem => "mem",
        }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.to_ascii_lowercase().as_str() {
            "json" => Ok(StorageMediums::Json),
            "txt" => Ok(StorageMediums::Txt),
            "mem" => Ok(StorageMediums::Mem),
            _ => Err(AppError::Validation(format!(
                "'{str}' is not a recognized storage medium"
            ))),
        }
    }

    pub fn default_path(&self) -> &'static str {
        if self.is_txt() {
            TXT_STORAGE_PATH
        } else {
            JSON_STORAGE_PATH
        }
    }
}

pub fn parse_storage_type(
    medium: StorageMediums,
    path: Option<&str>,
) -> Box<dyn ContactStore> {
    let path = path.unwrap_or(medium.default_path()).to_string();

    match medium {
        StorageMediums::Json => Box::new(stores::JsonStorage::new(path)),
        StorageMediums::Txt => Box::new(stores::TxtStorage::new(path)),
        StorageMediums::Mem => Box::new(memory::MemStorage::new()),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes `data` beside `path` first and renames it into place, so a failed
/// write never leaves a half-written data file behind.
pub fn write_replacing(path: &Path, data: &[u8]) -> Result<(), AppError> {
    create_file_parent(path)?;

    let tmp_path = sibling(path, ".tmp");
    let written = (|| -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Reads the whole file, mapping "not found" to `None`.
pub fn read_if_exists(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Copies `path` to `<path>.corrupt`, replacing any older copy.
pub fn copy_aside(path: &Path) -> Result<Option<PathBuf>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let backup_path = sibling(path, ".corrupt");
    fs::copy(path, &backup_path)?;
    Ok(Some(backup_path))
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "contacts".into());
    name.push(suffix);
    path.with_file_name(name)
}
