use std::io::BufRead;

use crate::prelude::{AppError, Contact, ContactId};

const FIELDS: [&str; 5] = ["id", "name", "email", "phone", "notes"];

pub fn serialize_contacts(contacts: &[Contact]) -> String {
    let mut data = String::new();

    for contact in contacts {
        let ser_contact = format!(
            "{{\n\
            id: {}\n\
            name: {}\n\
            email: {}\n\
            phone: {}\n\
            notes: {}\n\
            }}\n",
            contact.id,
            escape(&contact.name),
            escape(&contact.email),
            escape(&contact.phone),
            escape(&contact.notes),
        );

        data.push_str(&ser_contact);
    }
    data
}

/// Parses the tagged-record text format. Any malformed line is reported as
/// `AppError::Corrupt` with its line number.
pub fn deserialize_contacts_from_txt_buffer<R: BufRead>(
    buffer: R,
) -> Result<Vec<Contact>, AppError> {
    let mut contacts = Vec::new();
    let mut record: Option<[Option<String>; 5]> = None;

    for (number, line) in buffer.lines().enumerate() {
        let line = line?;
        let number = number + 1;

        if line.trim().is_empty() && record.is_none() {
            continue;
        }

        match line.as_str() {
            "{" => {
                if record.is_some() {
                    return Err(corrupt(number, "record opened before previous one closed"));
                }
                record = Some(Default::default());
            }
            "}" => {
                let fields = record
                    .take()
                    .ok_or_else(|| corrupt(number, "record closed without being opened"))?;
                contacts.push(build_contact(fields, number)?);
            }
            _ => {
                let fields = record
                    .as_mut()
                    .ok_or_else(|| corrupt(number, "field outside of a record"))?;

                let (tag, value) = line
                    .split_once(": ")
                    .or_else(|| line.strip_suffix(':').map(|tag| (tag, "")))
                    .ok_or_else(|| corrupt(number, "expected `tag: value`"))?;

                let slot = FIELDS
                    .iter()
                    .position(|&f| f == tag)
                    .ok_or_else(|| corrupt(number, &format!("unknown field `{tag}`")))?;

                if fields[slot].is_some() {
                    return Err(corrupt(number, &format!("duplicate field `{tag}`")));
                }
                fields[slot] = Some(unescape(value, number)?);
            }
        }
    }

    if record.is_some() {
        return Err(AppError::Corrupt("last record is not closed".to_string()));
    }

    Ok(contacts)
}

fn build_contact(fields: [Option<String>; 5], line: usize) -> Result<Contact, AppError> {
    let [id, name, email, phone, notes] = fields;

    let id = id
        .ok_or_else(|| corrupt(line, "missing field `id`"))?
        .parse::<ContactId>()
        .map_err(|e| corrupt(line, &format!("bad id: {e}")))?;

    Ok(Contact {
        id,
        name: name.ok_or_else(|| corrupt(line, "missing field `name`"))?,
        email: email.ok_or_else(|| corrupt(line, "missing field `email`"))?,
        phone: phone.ok_or_else(|| corrupt(line, "missing field `phone`"))?,
        notes: notes.ok_or_else(|| corrupt(line, "missing field `notes`"))?,
    })
}

fn corrupt(line: usize, msg: &str) -> AppError {
    AppError::Corrupt(format!("line {line}: {msg}"))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str, line: usize) -> Result<String, AppError> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            other => {
                return Err(corrupt(
                    line,
                    &format!("bad escape sequence `\\{}`", other.unwrap_or(' ')),
                ));
            }
        }
    }
    Ok(out)
}
