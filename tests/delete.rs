mod common;

use common::{add, book};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn deleting_contacts() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("contacts.json");

    // Attempt to delete non existing contact
    book(&file)
        .args(["delete", "--id", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Contact with id 1 Not found"));

    add(&file, "Alice", "a@x.com", "111", "vip");
    add(&file, "Bob", "b@x.com", "222", "");
    add(&file, "Carol", "c@x.com", "333", "");

    book(&file)
        .args(["delete", "--id", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact deleted successfully"));

    book(&file)
        .args(["list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Alice")
                .and(predicate::str::contains("Carol"))
                .and(predicate::str::contains("Bob").not()),
        );

    // ids are never reused after a delete
    book(&file)
        .args(["add", "--name", "Dave"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with id 4"));
}

#[test]
fn delete_rejects_non_numeric_ids() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("contacts.json");

    book(&file)
        .args(["delete", "--id", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'Alice'"));
}
