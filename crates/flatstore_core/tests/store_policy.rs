use flatstore_core::{
    bind_identifier, DocumentStore, JsonDocumentStore, StoreError, StoreOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Ticket {
    code: String,
    seat: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Unbound {
    code: String,
}

fn ticket(code: &str, seat: &str) -> Ticket {
    Ticket {
        code: code.to_string(),
        seat: seat.to_string(),
    }
}

fn open_tickets(dir: &TempDir, options: StoreOptions) -> JsonDocumentStore<Ticket> {
    bind_identifier::<Ticket>("code");
    JsonDocumentStore::open(dir.path().join("tickets.json"), options).unwrap()
}

fn no_unique() -> StoreOptions {
    StoreOptions {
        enforce_unique: false,
        ..StoreOptions::default()
    }
}

#[test]
fn open_fails_for_unbound_model_type() {
    let dir = TempDir::new().unwrap();
    let err = JsonDocumentStore::<Unbound>::open(
        dir.path().join("unbound.json"),
        StoreOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, StoreError::IdentifierNotBound { .. }));
    assert!(!dir.path().join("unbound.json").exists());
}

#[test]
fn open_without_auto_create_leaves_file_absent() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(
        &dir,
        StoreOptions {
            auto_create_file: false,
            ..StoreOptions::default()
        },
    );

    assert!(!store.path().exists());
    assert!(matches!(store.find_all().unwrap_err(), StoreError::Io(_)));
}

#[test]
fn save_skips_write_when_file_missing_and_auto_create_disabled() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(
        &dir,
        StoreOptions {
            auto_create_file: false,
            ..StoreOptions::default()
        },
    );

    store.save(&ticket("T1", "12A")).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn save_recreates_missing_file_when_auto_create_enabled() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(&dir, StoreOptions::default());

    store.unregister_model().unwrap();
    assert!(!store.path().exists());

    store.save(&ticket("T1", "12A")).unwrap();
    assert_eq!(store.find_all().unwrap().len(), 1);
}

#[test]
fn disabled_uniqueness_allows_duplicate_saves() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(&dir, no_unique());

    store.save(&ticket("T1", "12A")).unwrap();
    store.save(&ticket("T1", "14C")).unwrap();

    assert_eq!(store.find_all().unwrap().len(), 2);
}

#[test]
fn disabled_uniqueness_find_by_id_is_always_not_found() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(&dir, no_unique());

    store.save(&ticket("T1", "12A")).unwrap();
    assert!(store.find_by_id(&json!("T1")).unwrap().is_none());
}

#[test]
fn disabled_uniqueness_delete_and_update_leave_file_untouched() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(&dir, no_unique());

    store.save(&ticket("T1", "12A")).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    store.delete(&json!("T1")).unwrap();
    store.update(&ticket("T1", "99Z")).unwrap();

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn disabled_uniqueness_save_or_update_always_saves() {
    let dir = TempDir::new().unwrap();
    let store = open_tickets(&dir, no_unique());

    store.save_or_update(&ticket("T1", "12A")).unwrap();
    store.save_or_update(&ticket("T1", "14C")).unwrap();

    let all = store.find_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].seat, "12A");
    assert_eq!(all[1].seat, "14C");
}

#[test]
fn options_default_matches_documented_defaults() {
    let options = StoreOptions::default();

    assert!(!options.logging);
    assert!(options.warn_on_unsafe_ops);
    assert!(options.enforce_unique);
    assert!(options.auto_create_file);
    assert!(options.backup_path_prefix.is_none());
}
