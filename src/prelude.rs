pub use crate::cli::{command, run_app};
pub use crate::domain::{
    Applied, ContactManager, IdRestore, SearchField,
    contact::{self, Contact, ContactId},
};
pub use crate::errors::AppError;
pub use crate::storage::{
    self, ContactStore, StorageMediums, memory::MemStorage, parse_storage_type,
    stores::{CsvStorage, JsonStorage, TxtStorage},
};
