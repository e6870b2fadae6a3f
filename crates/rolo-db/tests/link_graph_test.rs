//! Linked-record graph behavior.
//!
//! Edges are stored directionally but read symmetrically: every query
//! unions both endpoint columns, so a link added as (a, b) is visible
//! from b as well.

use rolo_db::{Contact, Note, Organization, RecordType};

mod helpers;

#[tokio::test]
async fn test_link_is_visible_from_both_endpoints() {
    let db = helpers::db().await;

    let note = Note::new("Trip plan", "");
    let contact = Contact::new("Smith", "John");
    db.notes.add(&note).await.unwrap();
    db.contacts.add(&contact).await.unwrap();

    db.links
        .add_link(note.id, RecordType::Note, contact.id, RecordType::Contact)
        .await
        .unwrap();

    assert_eq!(db.links.linked_ids(note.id).await.unwrap(), vec![contact.id]);
    assert_eq!(db.links.linked_ids(contact.id).await.unwrap(), vec![note.id]);
}

#[tokio::test]
async fn test_linked_records_loads_typed_neighbors() {
    let db = helpers::db().await;

    let note = Note::new("Trip plan", "");
    let smith = Contact::new("Smith", "John");
    let jones = Contact::new("Jones", "Amy");
    let acme = Organization::new("Acme");
    db.notes.add(&note).await.unwrap();
    db.contacts.add(&smith).await.unwrap();
    db.contacts.add(&jones).await.unwrap();
    db.organizations.add(&acme).await.unwrap();

    db.links
        .add_link(note.id, RecordType::Note, smith.id, RecordType::Contact)
        .await
        .unwrap();
    // Reverse storage direction; must still count as a neighbor of the note.
    db.links
        .add_link(jones.id, RecordType::Contact, note.id, RecordType::Note)
        .await
        .unwrap();
    db.links
        .add_link(note.id, RecordType::Note, acme.id, RecordType::Organization)
        .await
        .unwrap();

    let contacts: Vec<Contact> = db.links.linked_records(note.id).await.unwrap();
    let names: Vec<String> = contacts.iter().map(Contact::title).collect();
    assert_eq!(names, vec!["Jones, Amy", "Smith, John"]);

    let orgs: Vec<Organization> = db.links.linked_records(note.id).await.unwrap();
    assert_eq!(orgs, vec![acme]);
}

#[tokio::test]
async fn test_duplicate_edges_are_kept() {
    let db = helpers::db().await;

    let note = Note::new("Trip plan", "");
    let contact = Contact::new("Smith", "John");
    db.notes.add(&note).await.unwrap();
    db.contacts.add(&contact).await.unwrap();

    db.links
        .add_link(note.id, RecordType::Note, contact.id, RecordType::Contact)
        .await
        .unwrap();
    db.links
        .add_link(note.id, RecordType::Note, contact.id, RecordType::Contact)
        .await
        .unwrap();

    assert_eq!(db.links.count().await.unwrap(), 2);
    // The id list carries edge multiplicity, the typed list does not.
    assert_eq!(
        db.links.linked_ids(note.id).await.unwrap(),
        vec![contact.id, contact.id]
    );
    let contacts: Vec<Contact> = db.links.linked_records(note.id).await.unwrap();
    assert_eq!(contacts.len(), 1);
}

#[tokio::test]
async fn test_self_link_appears_on_both_union_branches() {
    let db = helpers::db().await;

    let note = Note::new("Recursive", "");
    db.notes.add(&note).await.unwrap();

    db.links
        .add_link(note.id, RecordType::Note, note.id, RecordType::Note)
        .await
        .unwrap();

    assert_eq!(
        db.links.linked_ids(note.id).await.unwrap(),
        vec![note.id, note.id]
    );
}

#[tokio::test]
async fn test_type_counts_ordered_by_count_desc() {
    let db = helpers::db().await;

    let note = Note::new("Hub", "");
    db.notes.add(&note).await.unwrap();

    for last in ["Smith", "Jones", "Able"] {
        let c = Contact::new(last, "X");
        db.contacts.add(&c).await.unwrap();
        db.links
            .add_link(note.id, RecordType::Note, c.id, RecordType::Contact)
            .await
            .unwrap();
    }
    let acme = Organization::new("Acme");
    db.organizations.add(&acme).await.unwrap();
    db.links
        .add_link(acme.id, RecordType::Organization, note.id, RecordType::Note)
        .await
        .unwrap();

    let counts = db.links.linked_type_counts(note.id).await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].record_type, RecordType::Contact);
    assert_eq!(counts[0].count, 3);
    assert_eq!(counts[1].record_type, RecordType::Organization);
    assert_eq!(counts[1].count, 1);
}

#[tokio::test]
async fn test_type_counts_empty_for_unlinked_record() {
    let db = helpers::db().await;

    let note = Note::new("Loner", "");
    db.notes.add(&note).await.unwrap();

    assert!(db.links.linked_type_counts(note.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_links_touching_removes_both_directions() {
    let db = helpers::db().await;

    let note = Note::new("Hub", "");
    let contact = Contact::new("Smith", "John");
    let acme = Organization::new("Acme");
    db.notes.add(&note).await.unwrap();
    db.contacts.add(&contact).await.unwrap();
    db.organizations.add(&acme).await.unwrap();

    db.links
        .add_link(note.id, RecordType::Note, contact.id, RecordType::Contact)
        .await
        .unwrap();
    db.links
        .add_link(acme.id, RecordType::Organization, note.id, RecordType::Note)
        .await
        .unwrap();
    // Unrelated edge must survive.
    db.links
        .add_link(contact.id, RecordType::Contact, acme.id, RecordType::Organization)
        .await
        .unwrap();

    let removed = db.links.delete_links_touching(note.id).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(db.links.count().await.unwrap(), 1);
    assert!(db.links.linked_ids(note.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_links_touching_with_no_edges_returns_zero() {
    let db = helpers::db().await;
    let note = Note::new("Loner", "");
    db.notes.add(&note).await.unwrap();

    assert_eq!(db.links.delete_links_touching(note.id).await.unwrap(), 0);
}
