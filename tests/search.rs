mod common;

use common::{add, book};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn searching_by_each_field() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("contacts.json");

    add(&file, "Alice", "a@x.com", "111", "vip");
    add(&file, "Bob", "b@x.com", "222", "");
    add(&file, "alice", "alice@y.org", "333", "");

    // default is by name, case-insensitive
    book(&file)
        .args(["search", "ALICE"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("a@x.com")
                .and(predicate::str::contains("alice@y.org"))
                .and(predicate::str::contains("Bob").not()),
        );

    book(&file)
        .args(["search", "--by", "email", "A@X.COM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice").and(predicate::str::contains("alice@y.org").not()));

    book(&file)
        .args(["search", "--by", "phone", "222"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn search_is_exact_not_substring() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("contacts.json");

    add(&file, "Alice Cooper", "a@x.com", "111", "");

    book(&file)
        .args(["search", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contact found."));
}
