use address_book::prelude::*;
use std::fs;
use tempfile::tempdir;

fn manager_for<S: ContactStore>(store: S, policy: IdRestore) -> ContactManager<S> {
    let mut manager = ContactManager::new(store, policy);
    manager.load().unwrap();
    manager
}

#[test]
fn json_round_trip_reconstructs_the_book() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join("contacts.json");

    let mut manager = manager_for(JsonStorage::new(&path), IdRestore::Max);
    manager.add("Alice", "a@x.com", "111", "vip")?.into_result()?;
    manager.add("Bob", "b@x.com", "222", "")?.into_result()?;
    manager.add("Émile", "", "", "two\nlines")?.into_result()?;
    manager.delete_by_id(2).into_result()?;
    let saved = manager.list_all().to_vec();

    let mut reloaded = manager_for(JsonStorage::new(&path), IdRestore::Max);
    assert_eq!(reloaded.list_all(), saved.as_slice());

    let next = reloaded.add("Dave", "", "", "")?.into_result()?;
    assert!(saved.iter().all(|c| c.id != next.id));
    assert_eq!(next.id, 4);
    Ok(())
}

#[test]
fn txt_round_trip_reconstructs_the_book() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join("contacts.txt");

    let mut manager = manager_for(TxtStorage::new(&path), IdRestore::Max);
    manager.add("Alice", "a@x.com", "111", "vip")?.into_result()?;
    manager.add("Bob", "b@x.com", "222", "back\\slash")?.into_result()?;
    let saved = manager.list_all().to_vec();

    let reloaded = manager_for(TxtStorage::new(&path), IdRestore::Max);
    assert_eq!(reloaded.list_all(), saved.as_slice());
    assert_eq!(reloaded.next_id(), Some(3));
    Ok(())
}

#[test]
fn scenario_restart_with_only_bob() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join("contacts.json");

    let mut manager = manager_for(JsonStorage::new(&path), IdRestore::Max);
    assert_eq!(manager.add("Alice", "a@x.com", "111", "vip")?.value.id, 1);
    assert_eq!(manager.add("Bob", "b@x.com", "222", "")?.value.id, 2);

    let found = manager.find_by_email("A@X.COM");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alice");

    manager.delete_by_id(1).into_result()?;
    assert_eq!(manager.list_all().len(), 1);
    assert_eq!(manager.list_all()[0].name, "Bob");

    for policy in [IdRestore::Last, IdRestore::Max] {
        let reloaded = manager_for(JsonStorage::new(&path), policy);
        assert_eq!(reloaded.next_id(), Some(3));
    }
    Ok(())
}

#[test]
fn last_policy_can_fall_behind_max() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join("contacts.json");
    fs::write(
        &path,
        r#"{"version": 1, "contacts": [
            {"id": 5, "name": "Eve", "email": "", "phone": "", "notes": ""},
            {"id": 2, "name": "Bob", "email": "", "phone": "", "notes": ""}
        ]}"#,
    )?;

    assert_eq!(manager_for(JsonStorage::new(&path), IdRestore::Last).next_id(), Some(3));
    assert_eq!(manager_for(JsonStorage::new(&path), IdRestore::Max).next_id(), Some(6));
    Ok(())
}

#[test]
fn absent_empty_and_corrupt_files_are_told_apart() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join("contacts.json");
    let storage = JsonStorage::new(&path);

    assert_eq!(storage.load()?, None);

    fs::write(&path, "")?;
    assert_eq!(storage.load()?, Some(Vec::new()));

    let mut manager = ContactManager::new(&storage, IdRestore::Max);
    manager.add("Stale", "", "", "")?.into_result()?;

    fs::write(&path, "[1, 2")?;
    assert!(matches!(storage.load(), Err(AppError::Corrupt(_))));
    assert!(manager.load().is_err());
    assert!(manager.is_empty());
    assert_eq!(manager.next_id(), Some(1));

    // the unreadable bytes survive the save that follows
    manager.save()?;
    assert_eq!(fs::read_to_string(dir.path().join("contacts.json.corrupt"))?, "[1, 2");
    assert_eq!(storage.load()?, Some(Vec::new()));
    Ok(())
}
