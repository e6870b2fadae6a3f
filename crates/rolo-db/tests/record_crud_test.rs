//! CRUD behavior of the per-type record stores.
//!
//! Validates the store contract shared by all five record kinds:
//! - get of a missing id fails with RecordNotFound
//! - add returns the caller-populated canonical id
//! - list queries come back in the type's natural display order
//! - update and delete of a missing id silently succeed

use chrono::{Duration, Utc};
use uuid::Uuid;

use rolo_db::{Contact, Database, Error, Note};

mod helpers;

#[tokio::test]
async fn test_add_then_get_round_trips_record() {
    let db = helpers::db().await;

    let mut contact = Contact::new("Smith", "John");
    contact.comments = "met at the conference".to_string();

    let id = db.contacts.add(&contact).await.unwrap();
    assert_eq!(id, contact.id, "add returns the canonical client id");

    let fetched = db.contacts.get(id).await.unwrap();
    assert_eq!(fetched, contact);
}

#[tokio::test]
async fn test_get_missing_fails_with_record_not_found() {
    let db = helpers::db().await;

    let id = Uuid::new_v4();
    match db.contacts.get(id).await {
        Err(Error::RecordNotFound(missing)) => assert_eq!(missing, id),
        other => panic!("expected RecordNotFound, got {:?}", other.map(|c| c.id)),
    }
}

#[tokio::test]
async fn test_contacts_sorted_by_last_then_first_name() {
    let db = helpers::db().await;

    db.contacts.add(&Contact::new("young", "Ada")).await.unwrap();
    db.contacts.add(&Contact::new("Able", "Zoe")).await.unwrap();
    db.contacts.add(&Contact::new("Able", "Amy")).await.unwrap();

    let all = db.contacts.get_all().await.unwrap();
    let names: Vec<String> = all.iter().map(Contact::title).collect();
    // Case-insensitive, last name then first name ascending.
    assert_eq!(names, vec!["Able, Amy", "Able, Zoe", "young, Ada"]);
}

#[tokio::test]
async fn test_notes_sorted_newest_first() {
    let db = helpers::db().await;

    let mut yesterday = Note::new("Old entry", "");
    yesterday.created_at_utc = Utc::now() - Duration::days(1);
    yesterday.created_on_day = yesterday.created_at_utc.date_naive();
    let today = Note::new("Fresh entry", "");

    db.notes.add(&yesterday).await.unwrap();
    db.notes.add(&today).await.unwrap();

    let all = db.notes.get_all().await.unwrap();
    let titles: Vec<&str> = all.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Fresh entry", "Old entry"]);
}

#[tokio::test]
async fn test_note_round_trips_both_timestamps() {
    let db = helpers::db().await;

    let note = Note::new("Trip plan", "Pack light");
    db.notes.add(&note).await.unwrap();

    let fetched = db.notes.get(note.id).await.unwrap();
    assert_eq!(fetched.created_at_utc, note.created_at_utc);
    assert_eq!(fetched.created_on_day, note.created_on_day);
}

#[tokio::test]
async fn test_update_replaces_full_row() {
    let db = helpers::db().await;

    let mut contact = Contact::new("Smith", "John");
    db.contacts.add(&contact).await.unwrap();

    contact.first_name = "Jonathan".to_string();
    contact.comments = "prefers full name".to_string();
    db.contacts.update(&contact).await.unwrap();

    let fetched = db.contacts.get(contact.id).await.unwrap();
    assert_eq!(fetched.first_name, "Jonathan");
    assert_eq!(fetched.comments, "prefers full name");
}

#[tokio::test]
async fn test_update_of_missing_id_is_silent_noop() {
    let db = helpers::db().await;

    let ghost = Contact::new("Nobody", "Here");
    db.contacts.update(&ghost).await.unwrap();

    assert!(db.contacts.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_removes_row() {
    let db = helpers::db().await;

    let item = rolo_db::Item::new("Spare keys");
    db.items.add(&item).await.unwrap();
    db.items.delete_by_id(item.id).await.unwrap();

    assert!(matches!(
        db.items.get(item.id).await,
        Err(Error::RecordNotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_of_missing_id_is_silent_noop() {
    let db = helpers::db().await;
    db.items.delete_by_id(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_file_backed_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rolo.db");

    let contact = Contact::new("Durable", "Dana");
    {
        let db = Database::connect(&path).await.unwrap();
        db.migrate().await.unwrap();
        db.contacts.add(&contact).await.unwrap();
        db.pool().close().await;
    }

    let db = Database::connect(&path).await.unwrap();
    db.migrate().await.unwrap();
    let fetched = db.contacts.get(contact.id).await.unwrap();
    assert_eq!(fetched, contact);
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let db = helpers::db().await;
    // Schema was applied by in_memory(); applying again must be harmless.
    db.migrate().await.unwrap();
    db.migrate().await.unwrap();

    db.contacts.add(&Contact::new("Still", "Works")).await.unwrap();
    assert_eq!(db.contacts.get_all().await.unwrap().len(), 1);
}
