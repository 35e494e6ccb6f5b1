pub mod contact;
pub mod manager;
pub mod search;

pub use contact::{Contact, ContactId};
pub use manager::{Applied, ContactManager, IdRestore};
pub use search::SearchField;
