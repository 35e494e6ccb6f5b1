use assert_cmd::Command;
use std::path::Path;

/// The binary pointed at an isolated data file.
pub fn book(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("address-book").unwrap();
    cmd.env("ADDRESS_BOOK_FILE", file)
        .env_remove("ADDRESS_BOOK_MEDIUM")
        .env_remove("ADDRESS_BOOK_ID_RESTORE")
        .env_remove("ADDRESS_BOOK_LOG");
    cmd
}

#[allow(dead_code)]
pub fn add(file: &Path, name: &str, email: &str, phone: &str, notes: &str) {
    book(file)
        .args([
            "add", "--name", name, "--email", email, "--phone", phone, "--notes", notes,
        ])
        .assert()
        .success();
}
