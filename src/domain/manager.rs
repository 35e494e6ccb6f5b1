use super::search::{SearchField, filter_by_field};
use crate::prelude::{AppError, Contact, ContactId, ContactStore};

use tracing::{debug, error, info, warn};

/// How the id counter is rebuilt from a loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdRestore {
    /// One past the largest id present.
    #[default]
    Max,
    /// One past the id of the last record in insertion order.
    Last,
}

/// Outcome of a mutation. The in-memory change always stands; `saved`
/// reports whether it also reached storage.
#[derive(Debug)]
#[must_use]
pub struct Applied<T> {
    pub value: T,
    pub saved: Result<(), AppError>,
}

impl<T> Applied<T> {
    pub fn into_result(self) -> Result<T, AppError> {
        self.saved.map(|_| self.value)
    }
}

/// Owns the contact collection, assigns ids and persists after every change.
pub struct ContactManager<S: ContactStore = Box<dyn ContactStore>> {
    mem: Vec<Contact>,
    /// `None` once the id space is used up.
    next_id: Option<ContactId>,
    storage: S,
    id_restore: IdRestore,
}

impl<S: ContactStore> ContactManager<S> {
    /// An empty manager. Call [`ContactManager::load`] to read persisted contacts.
    pub fn new(storage: S, id_restore: IdRestore) -> Self {
        Self {
            mem: Vec::new(),
            next_id: Some(1),
            storage,
            id_restore,
        }
    }

    /// Replaces the collection with what storage holds. Missing data is an
    /// empty book. Unreadable data also leaves an empty book, and the error
    /// is returned so the caller can report it. Corrupt data is copied aside
    /// before anything can overwrite it.
    pub fn load(&mut self) -> Result<(), AppError> {
        let medium = self.storage.get_medium().to_string();

        match self.storage.load() {
            Ok(Some(contacts)) => {
                warn_on_duplicate_ids(&contacts);
                self.next_id = restore_next_id(&contacts, self.id_restore);
                self.mem = contacts;
                if self.next_id.is_none() {
                    warn!(medium = %medium, "stored ids leave no room for new contacts");
                }
                info!(
                    medium = %medium,
                    count = self.mem.len(),
                    next_id = ?self.next_id,
                    "loaded contacts"
                );
                Ok(())
            }
            Ok(None) => {
                self.reset();
                info!(medium = %medium, "no stored contacts, starting empty");
                Ok(())
            }
            Err(e) => {
                self.reset();
                warn!(medium = %medium, error = %e, "could not load contacts, starting empty");
                if matches!(e, AppError::Corrupt(_)) {
                    self.keep_corrupt_copy(&medium);
                }
                Err(e)
            }
        }
    }

    fn keep_corrupt_copy(&self, medium: &str) {
        match self.storage.backup() {
            Ok(Some(path)) => {
                warn!(medium, backup = %path.display(), "kept a copy of the corrupt contacts")
            }
            Ok(None) => {}
            Err(e) => error!(medium, error = %e, "could not back up corrupt contacts"),
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.storage.save(&self.mem).inspect_err(|e| {
            error!(
                medium = self.storage.get_medium(),
                error = %e,
                "failed to save contacts"
            );
        })
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Applied<Contact>, AppError> {
        let contact = self.push_new(name.into(), email.into(), phone.into(), notes.into())?;
        debug!(id = contact.id, "added contact");

        Ok(Applied {
            value: contact,
            saved: self.save(),
        })
    }

    /// Appends every contact under a freshly assigned id and saves once.
    /// Nothing is added when there are not enough ids left for all of them.
    pub fn import(&mut self, contacts: Vec<Contact>) -> Result<Applied<Vec<Contact>>, AppError> {
        if contacts.len() as u64 > self.ids_left() {
            return Err(AppError::IdsExhausted);
        }

        let added = contacts
            .into_iter()
            .map(|c| self.push_new(c.name, c.email, c.phone, c.notes))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = added.len(), "imported contacts");

        let saved = if added.is_empty() {
            Ok(())
        } else {
            self.save()
        };

        Ok(Applied {
            value: added,
            saved,
        })
    }

    pub fn find_by(&self, field: SearchField, text: &str) -> Vec<&Contact> {
        filter_by_field(&self.mem, field, text)
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&Contact> {
        self.find_by(SearchField::Name, name)
    }

    pub fn find_by_email(&self, email: &str) -> Vec<&Contact> {
        self.find_by(SearchField::Email, email)
    }

    pub fn find_by_phone(&self, phone: &str) -> Vec<&Contact> {
        self.find_by(SearchField::Phone, phone)
    }

    pub fn list_all(&self) -> &[Contact] {
        &self.mem
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.mem.iter().find(|c| c.id == id)
    }

    /// Removes every record carrying `id`. Returns how many were removed;
    /// storage is only written when something changed.
    pub fn delete_by_id(&mut self, id: ContactId) -> Applied<usize> {
        let before = self.mem.len();
        self.mem.retain(|c| c.id != id);
        let removed = before - self.mem.len();

        if removed == 0 {
            debug!(id, "no contact to delete");
            return Applied {
                value: 0,
                saved: Ok(()),
            };
        }

        debug!(id, removed, "deleted contact");
        Applied {
            value: removed,
            saved: self.save(),
        }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    /// The id the next added contact gets, or `None` when none are left.
    pub fn next_id(&self) -> Option<ContactId> {
        self.next_id
    }

    fn ids_left(&self) -> u64 {
        self.next_id.map_or(0, |id| u64::from(ContactId::MAX - id) + 1)
    }

    fn push_new(
        &mut self,
        name: String,
        email: String,
        phone: String,
        notes: String,
    ) -> Result<Contact, AppError> {
        let id = self.next_id.ok_or(AppError::IdsExhausted)?;
        let contact = Contact {
            id,
            name,
            email,
            phone,
            notes,
        };
        self.next_id = id.checked_add(1);
        self.mem.push(contact.clone());
        Ok(contact)
    }

    fn reset(&mut self) {
        self.mem.clear();
        self.next_id = Some(1);
    }
}

fn restore_next_id(contacts: &[Contact], policy: IdRestore) -> Option<ContactId> {
    let anchor = match policy {
        IdRestore::Max => contacts.iter().map(|c| c.id).max(),
        IdRestore::Last => contacts.last().map(|c| c.id),
    };
    anchor.map_or(Some(1), |id| id.checked_add(1))
}

fn warn_on_duplicate_ids(contacts: &[Contact]) {
    let mut ids: Vec<ContactId> = contacts.iter().map(|c| c.id).collect();
    ids.sort_unstable();

    for pair in ids.windows(2) {
        if pair[0] == pair[1] {
            warn!(id = pair[0], "stored contacts share an id");
        }
    }
}
