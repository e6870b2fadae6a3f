//! Live-query streams.
//!
//! Each watch method emits the current result immediately, then re-emits
//! after every mutation of a table the query depends on. Mutations of
//! unrelated tables never wake the stream.

use futures::StreamExt;

use rolo_db::{Contact, Item, Note, RecordType};

mod helpers;

#[tokio::test]
async fn test_watch_all_emits_initial_then_updated_list() {
    let db = helpers::db().await;

    let mut stream = db.contacts.watch_all();
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    let contact = Contact::new("Smith", "John");
    db.contacts.add(&contact).await.unwrap();

    let listed = stream.next().await.unwrap().unwrap();
    assert_eq!(listed, vec![contact]);
}

#[tokio::test]
async fn test_watch_single_record_sees_update() {
    let db = helpers::db().await;

    let mut contact = Contact::new("Smith", "John");
    db.contacts.add(&contact).await.unwrap();

    let mut stream = db.contacts.watch(contact.id);
    assert_eq!(stream.next().await.unwrap().unwrap(), contact);

    contact.comments = "moved to Berlin".to_string();
    db.contacts.update(&contact).await.unwrap();

    let seen = stream.next().await.unwrap().unwrap();
    assert_eq!(seen.comments, "moved to Berlin");
}

#[tokio::test]
async fn test_watch_ignores_other_tables() {
    let db = helpers::db().await;

    let mut stream = db.contacts.watch_all();
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    // A note mutation must not wake a contact stream.
    db.notes.add(&Note::new("Noise", "")).await.unwrap();
    let contact = Contact::new("Smith", "John");
    db.contacts.add(&contact).await.unwrap();

    // The very next emission is the contact insert, not the note insert.
    let listed = stream.next().await.unwrap().unwrap();
    assert_eq!(listed, vec![contact]);
}

#[tokio::test]
async fn test_watch_linked_ids_reacts_to_link_changes() {
    let db = helpers::db().await;

    let note = Note::new("Hub", "");
    let item = Item::new("Spare keys");
    db.notes.add(&note).await.unwrap();
    db.items.add(&item).await.unwrap();

    let mut stream = db.links.watch_linked_ids(note.id);
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    db.links
        .add_link(note.id, RecordType::Note, item.id, RecordType::Item)
        .await
        .unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), vec![item.id]);

    db.links.delete_links_touching(note.id).await.unwrap();
    assert!(stream.next().await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn test_watch_type_counts_reacts_to_link_changes() {
    let db = helpers::db().await;

    let note = Note::new("Hub", "");
    let item = Item::new("Spare keys");
    db.notes.add(&note).await.unwrap();
    db.items.add(&item).await.unwrap();

    let mut stream = db.links.watch_type_counts(note.id);
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    db.links
        .add_link(note.id, RecordType::Note, item.id, RecordType::Item)
        .await
        .unwrap();

    let counts = stream.next().await.unwrap().unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].record_type, RecordType::Item);
    assert_eq!(counts[0].count, 1);
}

#[tokio::test]
async fn test_watch_linked_records_tracks_link_and_target_tables() {
    let db = helpers::db().await;

    let note = Note::new("Hub", "");
    let mut contact = Contact::new("Smith", "John");
    db.notes.add(&note).await.unwrap();
    db.contacts.add(&contact).await.unwrap();

    let mut stream = db.links.watch_linked_records::<Contact>(note.id);
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    db.links
        .add_link(note.id, RecordType::Note, contact.id, RecordType::Contact)
        .await
        .unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), vec![contact.clone()]);

    // Editing the neighbor itself also re-emits.
    contact.first_name = "Jonathan".to_string();
    db.contacts.update(&contact).await.unwrap();
    let seen = stream.next().await.unwrap().unwrap();
    assert_eq!(seen[0].first_name, "Jonathan");
}

#[tokio::test]
async fn test_search_watch_re_emits_on_matching_insert() {
    let db = helpers::db().await;

    let mut stream = db.search.watch("%key%");
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    let item = Item::new("Spare keys");
    db.items.add(&item).await.unwrap();

    let hits = stream.next().await.unwrap().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record_id, item.id);
}
