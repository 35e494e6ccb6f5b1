use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;
use crate::prelude::{ContactId, IdRestore, SearchField};

#[derive(Parser, Debug)]
#[command(name = "address-book", version, about = "Simple Address Book")]
pub struct Cli {
    /// Data file holding the contacts (defaults depend on the medium)
    #[arg(long, env = "ADDRESS_BOOK_FILE")]
    pub file: Option<String>,

    /// Storage medium (json, txt, mem) are available
    #[arg(long, env = "ADDRESS_BOOK_MEDIUM", default_value_t = String::from("json"))]
    pub medium: String,

    /// How the next contact id is restored from stored contacts
    #[arg(long, env = "ADDRESS_BOOK_ID_RESTORE", value_enum, default_value_t = IdRestoreKey::Max)]
    pub id_restore: IdRestoreKey,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Diagnostic output format
    #[arg(long, env = "ADDRESS_BOOK_LOG_FORMAT", value_enum, default_value_t = LogFormatKey::Pretty)]
    pub log_format: LogFormatKey,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact email address
        #[arg(long)]
        email: Option<String>,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Search contacts by exact field value, ignoring case
    Search {
        /// Field to search (default is name)
        #[arg(long, value_enum, default_value_t = SearchKey::Name)]
        by: SearchKey,

        /// Value to look for
        text: String,
    },
    /// List contacts in the order they were added
    List,
    /// Delete a contact by id
    Delete {
        /// Id of contact to delete
        #[arg(long)]
        id: ContactId,
    },

    /// Import contacts from .csv file
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: Option<String>,
    },

    /// Export contacts to a .csv file
    Export {
        /// File path to the destination location for export file
        #[arg(short, long)]
        des: Option<String>,
    },
}

/// Supported search keys
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SearchKey {
    Name,
    Email,
    Phone,
}

impl From<SearchKey> for SearchField {
    fn from(key: SearchKey) -> Self {
        match key {
            SearchKey::Name => SearchField::Name,
            SearchKey::Email => SearchField::Email,
            SearchKey::Phone => SearchField::Phone,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum IdRestoreKey {
    /// One past the largest stored id
    Max,
    /// One past the id of the last stored contact
    Last,
}

impl From<IdRestoreKey> for IdRestore {
    fn from(key: IdRestoreKey) -> Self {
        match key {
            IdRestoreKey::Max => IdRestore::Max,
            IdRestoreKey::Last => IdRestore::Last,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormatKey {
    Pretty,
    Json,
}

impl From<LogFormatKey> for LogFormat {
    fn from(key: LogFormatKey) -> Self {
        match key {
            LogFormatKey::Pretty => LogFormat::Pretty,
            LogFormatKey::Json => LogFormat::Json,
        }
    }
}
