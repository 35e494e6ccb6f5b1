pub mod command;
pub mod menu;
pub mod run;

pub use run::run_app;

use crate::prelude::{AppError, Contact};
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

const RULE: &str =
    "..........................................................................................";

// INPUT FUNCTIONS

/// Reads one trimmed line. End of input is `AppError::InputClosed`.
pub fn get_input<R: BufRead>(input: &mut R) -> Result<String, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Reads one line verbatim apart from the line ending.
pub fn get_raw_input<R: BufRead>(input: &mut R) -> Result<String, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AppError::InputClosed);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

pub fn parse_choice(input: &str, valid: RangeInclusive<u32>) -> Result<u32, AppError> {
    let choice = input.trim().parse::<u32>()?;
    if !valid.contains(&choice) {
        return Err(AppError::ParseCommand(input.to_string()));
    }
    Ok(choice)
}

// OUTPUT FUNCTIONS

pub fn prompt<W: Write>(out: &mut W, label: &str) -> Result<(), AppError> {
    write!(out, "{label}")?;
    out.flush()?;
    Ok(())
}

pub fn display_contacts<'a, W, I>(out: &mut W, contacts: I) -> Result<(), AppError>
where
    W: Write,
    I: IntoIterator<Item = &'a Contact>,
{
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "{:>4} | {:<20} | {:<30} | {:<15} | Notes",
        "ID", "Name", "Email", "Phone"
    )?;
    writeln!(out, "{RULE}")?;
    for contact in contacts {
        writeln!(out, "{contact}")?;
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}
