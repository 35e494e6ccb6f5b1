use super::{display_contacts, menu::Menu};
use crate::{
    logging,
    prelude::{
        AppError, ContactManager, ContactStore, CsvStorage, StorageMediums,
        command::{Cli, Commands},
        parse_storage_type,
    },
};
use clap::Parser;
use dotenv::dotenv;
use std::io::{self, Write};
use tracing::{debug, info};

pub fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format.into())?;

    let medium = StorageMediums::from(&cli.medium)?;
    let storage = parse_storage_type(medium, cli.file.as_deref());
    info!(medium = medium.is_which(), file = ?cli.file, "starting address book");

    let mut manager = ContactManager::new(storage, cli.id_restore.into());
    if let Err(e) = manager.load() {
        // load has already warned; carry on with the empty book
        debug!(error = %e, "continuing with an empty address book");
    }

    match cli.command {
        None => {
            let stdin = io::stdin();
            Menu::new(&mut manager, stdin.lock(), io::stdout().lock()).run()
        }
        Some(command) => execute(&mut manager, command, &mut io::stdout().lock()),
    }
}

/// Runs one non-interactive command against the manager.
pub fn execute<S: ContactStore, W: Write>(
    manager: &mut ContactManager<S>,
    command: Commands,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        Commands::Add {
            name,
            email,
            phone,
            notes,
        } => {
            let contact = manager
                .add(
                    name,
                    email.unwrap_or_default(),
                    phone.unwrap_or_default(),
                    notes.unwrap_or_default(),
                )?
                .into_result()?;

            writeln!(out, "Contact added successfully with id {}", contact.id)?;
            Ok(())
        }

        Commands::Search { by, text } => {
            let found = manager.find_by(by.into(), &text);

            if found.is_empty() {
                writeln!(out, "No contact found.")?;
                return Ok(());
            }
            display_contacts(out, found)
        }

        Commands::List => {
            if manager.is_empty() {
                writeln!(out, "No contact yet")?;
                return Ok(());
            }
            display_contacts(out, manager.list_all())
        }

        Commands::Delete { id } => {
            let removed = manager.delete_by_id(id).into_result()?;

            if removed == 0 {
                eprintln!("{}", AppError::NotFound(format!("Contact with id {id}")));
                return Ok(());
            }
            writeln!(out, "Contact deleted successfully")?;
            Ok(())
        }

        // Import contacts into storage from .csv file
        Commands::Import { src } => {
            let csv = CsvStorage::new(&src.unwrap_or_default())?;
            let contacts = csv
                .load()?
                .ok_or_else(|| AppError::NotFound(format!("CSV file {}", csv.path.display())))?;

            let imported = manager.import(contacts)?.into_result()?;

            writeln!(
                out,
                "Successfully imported {} contacts from {:?}.",
                imported.len(),
                csv.path
            )?;
            Ok(())
        }

        Commands::Export { des } => {
            let csv = CsvStorage::new(&des.unwrap_or_default())?;
            csv.save(manager.list_all())?;

            writeln!(
                out,
                "Successfully exported {} contacts to {:?}.",
                manager.len(),
                csv.path
            )?;
            Ok(())
        }
    }
}
