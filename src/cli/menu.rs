use super::{display_contacts, get_input, get_raw_input, parse_choice, prompt};
use crate::prelude::{AppError, ContactId, ContactManager, ContactStore, SearchField};

use std::io::{BufRead, Write};
use tracing::debug;

/// The interactive text menu. Reads choices from `input`, writes the
/// transcript to `out`, and drives the contact manager in between.
pub struct Menu<'a, S: ContactStore, R: BufRead, W: Write> {
    manager: &'a mut ContactManager<S>,
    input: R,
    out: W,
}

impl<'a, S: ContactStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(manager: &'a mut ContactManager<S>, input: R, out: W) -> Self {
        Self {
            manager,
            input,
            out,
        }
    }

    /// Runs until the user quits or input ends. Both paths save once more.
    pub fn run(mut self) -> Result<(), AppError> {
        loop {
            self.show_main_menu()?;

            let step = match self.read_choice(1..=4) {
                Ok(1) => self.add_contact(),
                Ok(2) => self.search_contacts(),
                Ok(3) => self.display_all(),
                Ok(_) => return self.quit(),
                Err(AppError::InputClosed) => return self.quit(),
                Err(e) => {
                    debug!(error = %e, "invalid main menu choice");
                    writeln!(
                        self.out,
                        "\nInvalid input. Please enter a number between 1 and 4."
                    )?;
                    continue;
                }
            };

            match step {
                Ok(()) => {}
                Err(AppError::InputClosed) => return self.quit(),
                Err(e) => return Err(e),
            }
        }
    }

    fn show_main_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\nMain Window")?;
        writeln!(self.out, "============")?;
        writeln!(self.out, "Choose one of the following options:")?;
        writeln!(self.out, "\n(1) Add a new contact")?;
        writeln!(self.out, "(2) Search for a contact")?;
        writeln!(self.out, "(3) Display all contacts")?;
        writeln!(self.out, "(4) Quit")?;
        prompt(&mut self.out, "\nEnter Your Choice: ")
    }

    fn add_contact(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\nMain Window --> Add a new contact")?;
        writeln!(self.out, "================================")?;

        let name = self.ask("Name: ")?;
        let email = self.ask("Email: ")?;
        let phone = self.ask("Phone: ")?;
        let notes = self.ask("Notes: ")?;

        let applied = match self.manager.add(name, email, phone, notes) {
            Ok(applied) => applied,
            Err(e) => {
                writeln!(self.out, "Contact not added: {e}.")?;
                return Ok(());
            }
        };
        match applied.saved {
            Ok(()) => writeln!(self.out, "Saved successfully with id {}.", applied.value.id)?,
            Err(e) => writeln!(
                self.out,
                "Contact added with id {}, but it could not be saved: {e}",
                applied.value.id
            )?,
        }
        Ok(())
    }

    fn search_contacts(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\nMain Window --> Search for Contact")?;
        writeln!(self.out, "==================================")?;
        writeln!(self.out, "(1) Search by Name")?;
        writeln!(self.out, "(2) Search by Email")?;
        writeln!(self.out, "(3) Search by Phone")?;
        prompt(&mut self.out, "\nEnter Your Choice: ")?;

        let field = match self.read_choice(1..=3) {
            Ok(1) => SearchField::Name,
            Ok(2) => SearchField::Email,
            Ok(_) => SearchField::Phone,
            Err(AppError::InputClosed) => return Err(AppError::InputClosed),
            Err(e) => {
                debug!(error = %e, "invalid search choice");
                writeln!(
                    self.out,
                    "\nInvalid input. Please enter a number between 1 and 3."
                )?;
                return Ok(());
            }
        };

        writeln!(self.out, "\nSearch by {field}")?;
        let text = self.ask(&format!("Enter {field}: "))?;

        let found = self.manager.find_by(field, &text);
        debug!(field = %field, hits = found.len(), "search finished");

        if found.is_empty() {
            writeln!(self.out, "\nNo contact found.")?;
            return Ok(());
        }
        display_contacts(&mut self.out, found)?;

        self.offer_delete()
    }

    fn offer_delete(&mut self) -> Result<(), AppError> {
        let choice = self.retry(
            "\nChoose one of these options:\n(1) To delete a contact\n(2) Back to main Window\n\nEnter Your Choice: ",
            |s| parse_choice(s, 1..=2),
        )?;
        if choice != 1 {
            return Ok(());
        }

        let id = self.retry("Enter the Contact ID: ", |s| {
            Ok(s.trim().parse::<ContactId>()?)
        })?;

        let applied = self.manager.delete_by_id(id);
        match (applied.value, applied.saved) {
            (0, _) => writeln!(self.out, "\nNo contact with id {id}.")?,
            (_, Ok(())) => writeln!(self.out, "\nDeleted.")?,
            (_, Err(e)) => writeln!(self.out, "\nDeleted, but it could not be saved: {e}")?,
        }
        Ok(())
    }

    fn display_all(&mut self) -> Result<(), AppError> {
        let contacts = self.manager.list_all();
        if contacts.is_empty() {
            writeln!(self.out, "\nNo contact in the address book.")?;
            return Ok(());
        }
        display_contacts(&mut self.out, contacts)
    }

    fn quit(&mut self) -> Result<(), AppError> {
        if let Err(e) = self.manager.save() {
            writeln!(self.out, "Contacts could not be saved: {e}")?;
        }
        writeln!(self.out, "Goodbye...")?;
        self.out.flush()?;
        Ok(())
    }

    fn ask(&mut self, label: &str) -> Result<String, AppError> {
        prompt(&mut self.out, label)?;
        get_raw_input(&mut self.input)
    }

    fn read_choice(&mut self, valid: std::ops::RangeInclusive<u32>) -> Result<u32, AppError> {
        let line = get_input(&mut self.input)?;
        parse_choice(&line, valid)
    }

    /// Prompts until `parse` accepts the answer. Only end of input escapes.
    fn retry<T, F>(&mut self, label: &str, parse: F) -> Result<T, AppError>
    where
        F: Fn(&str) -> Result<T, AppError>,
    {
        loop {
            prompt(&mut self.out, label)?;
            let line = get_input(&mut self.input)?;

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.out, "\n{e}. Please try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{Contact, IdRestore, MemStorage};
    use std::io::Cursor;

    fn run_script(manager: &mut ContactManager<&MemStorage>, script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(manager, Cursor::new(script.to_string()), &mut out)
            .run()
            .expect("menu run");
        String::from_utf8(out).expect("utf8 transcript")
    }

    #[test]
    fn adds_and_lists_contacts() {
        let storage = MemStorage::new();
        let mut manager = ContactManager::new(&storage, IdRestore::Max);

        let transcript = run_script(
            &mut manager,
            "1\nAlice\na@x.com\n111\nvip\n1\nBob\nb@x.com\n222\n\n3\n4\n",
        );

        assert!(transcript.contains("Saved successfully with id 1."));
        assert!(transcript.contains("Saved successfully with id 2."));
        assert!(transcript.contains("Goodbye..."));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.list_all()[0].notes, "vip");
        assert_eq!(manager.list_all()[1].notes, "");
    }

    #[test]
    fn invalid_choices_reprompt() {
        let storage = MemStorage::new();
        let mut manager = ContactManager::new(&storage, IdRestore::Max);

        let transcript = run_script(&mut manager, "abc\n7\n2\nx\n4\n");

        assert_eq!(
            transcript
                .matches("Please enter a number between 1 and 4")
                .count(),
            2
        );
        assert!(transcript.contains("Please enter a number between 1 and 3"));
        assert!(transcript.contains("Goodbye..."));
    }

    #[test]
    fn search_then_delete() {
        let storage = MemStorage::new();
        let mut manager = ContactManager::new(&storage, IdRestore::Max);
        let _ = manager.add("Alice", "a@x.com", "111", "vip");
        let _ = manager.add("Bob", "b@x.com", "222", "");

        // search by email, bad option, then delete id 1 after a bad id
        let transcript = run_script(&mut manager, "2\n2\nA@X.COM\n5\n1\none\n1\n4\n");

        assert!(transcript.contains("Alice"));
        assert!(transcript.contains("Please try again."));
        assert!(transcript.contains("Deleted."));
        assert_eq!(manager.list_all().len(), 1);
        assert_eq!(manager.list_all()[0].name, "Bob");
        assert_eq!(storage.snapshot().unwrap_or_default(), manager.list_all());
    }

    #[test]
    fn search_miss_reports_no_contact() {
        let storage = MemStorage::new();
        let mut manager = ContactManager::new(&storage, IdRestore::Max);
        let _ = manager.add("Alice", "", "", "");

        let transcript = run_script(&mut manager, "2\n1\nalicia\n4\n");

        assert!(transcript.contains("No contact found."));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn deleting_unknown_id_is_reported() {
        let storage = MemStorage::new();
        let mut manager = ContactManager::new(&storage, IdRestore::Max);
        let _ = manager.add("Alice", "", "", "");

        let transcript = run_script(&mut manager, "2\n1\nALICE\n1\n9\n4\n");

        assert!(transcript.contains("No contact with id 9."));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn full_id_space_refuses_new_contacts() {
        let storage = MemStorage::with_contacts(vec![Contact::new(u32::MAX, "Max", "", "", "")]);
        let mut manager = ContactManager::new(&storage, IdRestore::Max);
        manager.load().expect("in-memory load");

        let transcript = run_script(&mut manager, "1\nNew\n\n\n\n3\n4\n");

        assert!(transcript.contains("Contact not added: No contact ids left to assign."));
        assert!(transcript.contains("Max"));
        assert!(transcript.contains("Goodbye..."));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn end_of_input_quits_and_saves() {
        let storage = MemStorage::new();
        let mut manager = ContactManager::new(&storage, IdRestore::Max);

        let transcript = run_script(&mut manager, "1\nAlice\n");

        assert!(transcript.contains("Goodbye..."));
        assert_eq!(manager.len(), 0);
        assert_eq!(storage.save_count(), 1);
    }
}
