use super::*;

use std::cell::{Cell, RefCell};

/// Keeps the last saved collection in memory. Nothing outlives the process.
#[derive(Default)]
pub struct MemStorage {
    data: RefCell<Option<Vec<Contact>>>,
    saves: Cell<usize>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            data: RefCell::new(Some(contacts)),
            saves: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<Vec<Contact>> {
        self.data.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ContactStore for MemStorage {
    fn load(&self) -> Result<Option<Vec<Contact>>, AppError> {
        Ok(self.snapshot())
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        *self.data.borrow_mut() = Some(contacts.to_vec());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
