use chrono::NaiveDate;
use designeros_core::db::{open_db, open_db_in_memory};
use designeros_core::{
    CollectionGateway, CollectionOrigin, GatewayError, MemoryKeyValueStore, Note, NoteDraft,
    NotePatch, NoteStore, Reminder, ReminderDraft, ReminderPatch, ReminderStore, SeedReason,
    SqliteKeyValueStore, StoredEntity, COLLECTION_SCHEMA_VERSION,
};
use serde_json::{json, Value};
use std::collections::HashSet;

#[test]
fn first_open_seeds_and_persists_seed() {
    let store = MemoryKeyValueStore::new();
    let notes = NoteStore::open(&store);

    assert_eq!(notes.origin(), CollectionOrigin::Seeded(SeedReason::Absent));
    assert_eq!(notes.list(), Note::seed_collection().as_slice());
    assert!(notes.init_warning().is_none());

    let reopened = NoteStore::open(&store);
    assert_eq!(reopened.origin(), CollectionOrigin::Stored);
    assert_eq!(reopened.list(), notes.list());
}

#[test]
fn create_prepends_and_persists() {
    let store = MemoryKeyValueStore::new();
    let mut notes = NoteStore::open(&store);
    let before = notes.len();

    let write = notes.create(NoteDraft::new("moodboard ideas").with_color("green"));
    assert!(write.is_durable());
    let created = write.into_value();

    assert_eq!(notes.len(), before + 1);
    assert_eq!(notes.list()[0], created);
    assert_eq!(created.content, "moodboard ideas");
    assert_eq!(created.color, "green");

    let persisted = CollectionGateway::<Note, _>::new(&store)
        .read()
        .unwrap()
        .unwrap();
    assert_eq!(persisted, notes.list());
}

#[test]
fn rapid_creates_never_collide() {
    let store = MemoryKeyValueStore::new();
    let mut reminders = ReminderStore::open(&store);
    for index in 0..200 {
        let _ = reminders.create(ReminderDraft::new(format!("reminder {index}")));
    }

    let ids: HashSet<&str> = reminders.list().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), reminders.len());
    assert_eq!(reminders.list()[0].text, "reminder 199");
}

#[test]
fn update_changes_fields_in_place_without_reordering() {
    let store = MemoryKeyValueStore::new();
    let mut notes = NoteStore::open(&store);
    let first = notes.create(NoteDraft::new("first")).into_value();
    let second = notes.create(NoteDraft::new("second")).into_value();

    let updated = notes
        .update(&first.id, NotePatch::content("first, edited"))
        .into_value()
        .unwrap();

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.created_at, first.created_at);
    assert_eq!(notes.list()[0].id, second.id);
    assert_eq!(notes.list()[1].content, "first, edited");
    assert_eq!(NoteStore::open(&store).list()[1].content, "first, edited");
}

#[test]
fn update_after_delete_is_a_no_op() {
    let store = MemoryKeyValueStore::new();
    let mut notes = NoteStore::open(&store);
    let created = notes.create(NoteDraft::new("temporary")).into_value();

    assert!(notes.delete(&created.id).into_value());
    let after_delete = notes.list().to_vec();
    let raw_after_delete = store.raw(Note::STORAGE_KEY);

    let write = notes.update(&created.id, NotePatch::content("resurrected"));
    assert!(write.is_durable());
    assert_eq!(write.into_value(), None);
    assert_eq!(notes.list(), after_delete.as_slice());
    assert_eq!(store.raw(Note::STORAGE_KEY), raw_after_delete);
}

#[test]
fn delete_unknown_id_is_a_no_op() {
    let store = MemoryKeyValueStore::new();
    let mut notes = NoteStore::open(&store);
    let before = notes.list().to_vec();

    assert!(!notes.delete("missing").into_value());
    assert_eq!(notes.list(), before.as_slice());
}

#[test]
fn malformed_stored_notes_fall_back_to_seed() {
    let store = MemoryKeyValueStore::new();
    store.insert_raw(Note::STORAGE_KEY, r#"{"not": "an array"}"#);

    let notes = NoteStore::open(&store);
    assert_eq!(notes.origin(), CollectionOrigin::Seeded(SeedReason::Malformed));
    assert_eq!(notes.list(), Note::seed_collection().as_slice());

    // The seed replaced the malformed value.
    let reopened = NoteStore::open(&store);
    assert_eq!(reopened.origin(), CollectionOrigin::Stored);
    assert_eq!(reopened.list(), Note::seed_collection().as_slice());
}

#[test]
fn storage_failure_keeps_in_memory_changes_and_warns() {
    let store = MemoryKeyValueStore::new();
    let mut reminders = ReminderStore::open(&store);
    store.set_available(false);

    let write = reminders.create(ReminderDraft::new("offline reminder"));
    assert!(!write.is_durable());
    assert!(matches!(
        write.storage_warning,
        Some(GatewayError::StorageUnavailable(_))
    ));
    assert_eq!(reminders.list()[0].text, "offline reminder");

    store.set_available(true);
    let reopened = ReminderStore::open(&store);
    assert!(reopened.list().iter().all(|r| r.text != "offline reminder"));
}

#[test]
fn unavailable_storage_on_open_degrades_to_seed() {
    let store = MemoryKeyValueStore::new();
    store.set_available(false);

    let notes = NoteStore::open(&store);
    assert_eq!(
        notes.origin(),
        CollectionOrigin::Seeded(SeedReason::StorageUnavailable)
    );
    assert!(notes.init_warning().is_some());
    assert_eq!(notes.list(), Note::seed_collection().as_slice());
}

#[test]
fn reminders_toggle_and_due_dates() {
    let store = MemoryKeyValueStore::new();
    let mut reminders = ReminderStore::open(&store);
    let due = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
    let created = reminders
        .create(ReminderDraft::new("renew domain").due(due))
        .into_value();
    assert!(!created.completed);

    let toggled = reminders.toggle_completed(&created.id).into_value().unwrap();
    assert!(toggled.completed);
    let toggled_back = reminders.toggle_completed(&created.id).into_value().unwrap();
    assert!(!toggled_back.completed);

    let edited = reminders
        .update(&created.id, ReminderPatch::text("renew domain and TLS"))
        .into_value()
        .unwrap();
    assert_eq!(edited.due_date, Some(due));

    assert_eq!(reminders.toggle_completed("missing").into_value(), None);
}

#[test]
fn notes_survive_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("designeros.sqlite3");

    let created = {
        let conn = open_db(&path).unwrap();
        let mut notes = NoteStore::open(SqliteKeyValueStore::new(&conn));
        notes.create(NoteDraft::new("kept across sessions")).into_value()
    };

    let conn = open_db(&path).unwrap();
    let notes = NoteStore::open(SqliteKeyValueStore::new(&conn));
    assert_eq!(notes.origin(), CollectionOrigin::Stored);
    assert_eq!(notes.list()[0], created);
}

#[test]
fn stores_on_one_connection_stay_independent() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    let mut notes = NoteStore::open(kv);
    let mut reminders = ReminderStore::open(kv);

    let _ = notes.create(NoteDraft::new("note only"));
    let _ = reminders.delete(&Reminder::seed_collection()[0].id);

    let notes_again = NoteStore::open(kv);
    let reminders_again = ReminderStore::open(kv);
    assert_eq!(notes_again.len(), Note::seed_collection().len() + 1);
    assert_eq!(
        reminders_again.len(),
        Reminder::seed_collection().len() - 1
    );
    assert!(reminders_again.get(&Reminder::seed_collection()[0].id).is_none());
    assert!(Reminder::seed_collection()
        .iter()
        .all(|seed| seed.validate().is_ok()));
}

#[test]
fn legacy_bare_array_is_rewritten_in_envelope_on_first_write() {
    let store = MemoryKeyValueStore::new();
    store.insert_raw(
        Note::STORAGE_KEY,
        json!([{"id": "legacy-1", "content": "old note", "color": "blue", "createdAt": "Mar 4, 2024"}])
            .to_string(),
    );

    let mut notes = NoteStore::open(&store);
    assert_eq!(notes.origin(), CollectionOrigin::Stored);
    let untouched: Value = serde_json::from_str(&store.raw(Note::STORAGE_KEY).unwrap()).unwrap();
    assert!(untouched.is_array());

    let created = notes.create(NoteDraft::new("new note")).into_value();

    let raw: Value = serde_json::from_str(&store.raw(Note::STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(raw["schemaVersion"], json!(COLLECTION_SCHEMA_VERSION));
    let items = raw["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], json!(created.id));
    assert_eq!(items[1]["id"], "legacy-1");
    assert_eq!(items[1]["createdAt"], "Mar 4, 2024");
}
