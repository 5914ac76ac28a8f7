#![allow(missing_docs, unused_results)]

use bayanihan_core::{ADMIN_EMAIL, ADMIN_PASSWORD, EventDetails, EventStatus, Role};
use bayanihan_engine::{EventRegistry, JoinOutcome, rehydrate, snapshot};
use bayanihan_store::{JsonStore, StorePaths};
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap()
}

fn details(title: &str, capacity: u32) -> EventDetails {
    EventDetails {
        title: title.into(),
        description: "Bring gloves".into(),
        location: "Baywalk".into(),
        date: now() + Duration::days(14),
        deadline: now() + Duration::days(7),
        max_volunteers: capacity,
    }
}

fn setup() -> (tempfile::TempDir, JsonStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(StorePaths::in_dir(dir.path()));
    (dir, store)
}

fn reload(store: &JsonStore, at: NaiveDateTime) -> EventRegistry {
    rehydrate(store.load(), at)
}

#[test]
fn first_run_seeds_admin_and_saves_it() {
    let (_tmp, store) = setup();
    let registry = reload(&store, now());
    store.save(&snapshot(&registry)).unwrap();

    let again = reload(&store, now());
    assert_eq!(again.users().count(), 1);
    assert!(again.login(ADMIN_EMAIL, ADMIN_PASSWORD).is_ok());
}

#[test]
fn session_survives_save_and_reload() {
    let (_tmp, store) = setup();
    let mut registry = reload(&store, now());
    let lgu = registry.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    let mia = registry
        .sign_up("Mia", "mia@x", "pw", Role::EventManager)
        .unwrap();
    let ana = registry.sign_up("Ana", "ana@x", "pw", Role::Volunteer).unwrap();

    let beach = registry.create_event(mia, details("Beach Cleanup", 2)).unwrap();
    registry.create_event(mia, details("Tree Planting", 5)).unwrap();
    registry.create_event(mia, details("Night Market", 5)).unwrap();
    registry.approve_event(lgu, "Beach Cleanup").unwrap();
    registry.deny_event(lgu, "Night Market").unwrap();
    assert_eq!(
        registry.join_event(ana, beach, now()).unwrap(),
        JoinOutcome::Joined
    );
    store.save(&snapshot(&registry)).unwrap();

    let loaded = reload(&store, now());
    let mia = loaded.login("mia@x", "pw").unwrap();
    let ana = loaded.login("ana@x", "pw").unwrap();

    let created: Vec<&str> = loaded
        .created_events(mia)
        .unwrap()
        .into_iter()
        .map(|e| e.title())
        .collect();
    assert_eq!(created, vec!["Beach Cleanup", "Tree Planting"]);

    let joined = loaded.joined_events(ana).unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].title(), "Beach Cleanup");
    assert_eq!(joined[0].roster().len(), 1);

    let denied: Vec<_> = loaded.denied().collect();
    assert_eq!(denied.len(), 1);
    assert_eq!(denied[0].status(), EventStatus::Denied);

    assert_eq!(snapshot(&loaded), snapshot(&registry));
}

#[test]
fn pending_join_history_is_dropped_from_cache_only() {
    let (_tmp, store) = setup();
    let mut registry = reload(&store, now());
    let lgu = registry.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    let mia = registry
        .sign_up("Mia", "mia@x", "pw", Role::EventManager)
        .unwrap();
    let ana = registry.sign_up("Ana", "ana@x", "pw", Role::Volunteer).unwrap();
    let key = registry.create_event(mia, details("Beach Cleanup", 2)).unwrap();
    registry.approve_event(lgu, "Beach Cleanup").unwrap();
    registry.join_event(ana, key, now()).unwrap();
    // Deleted and resubmitted: the title now lives in Pending.
    registry.delete_event(mia, "Beach Cleanup").unwrap();
    registry.create_event(mia, details("Beach Cleanup", 2)).unwrap();
    store.save(&snapshot(&registry)).unwrap();

    let loaded = reload(&store, now());
    let ana = loaded.find_user("ana@x").unwrap();
    let state = loaded.user(ana).as_volunteer().unwrap();
    assert!(state.joined().is_empty());
    assert_eq!(state.joined_titles(), &["Beach Cleanup".to_string()]);
}

#[test]
fn reload_after_deadline_empties_rosters() {
    let (_tmp, store) = setup();
    let mut registry = reload(&store, now());
    let lgu = registry.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    let mia = registry
        .sign_up("Mia", "mia@x", "pw", Role::EventManager)
        .unwrap();
    let ana = registry.sign_up("Ana", "ana@x", "pw", Role::Volunteer).unwrap();
    let key = registry.create_event(mia, details("Beach Cleanup", 2)).unwrap();
    registry.approve_event(lgu, "Beach Cleanup").unwrap();
    registry.join_event(ana, key, now()).unwrap();
    store.save(&snapshot(&registry)).unwrap();

    let later = reload(&store, now() + Duration::days(8));
    let key = later.find_approved("Beach Cleanup").unwrap();
    assert!(later.event(key).roster().is_empty());
    let mia = later.find_user("mia@x").unwrap();
    assert!(
        later
            .event_volunteers(mia, "Beach Cleanup")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn corrupt_events_file_keeps_users() {
    let (_tmp, store) = setup();
    let mut registry = reload(&store, now());
    registry
        .sign_up("Ana", "ana@x", "pw", Role::Volunteer)
        .unwrap();
    registry.add_approved(bayanihan_core::Event::new(details("Beach Cleanup", 2))).unwrap();
    store.save(&snapshot(&registry)).unwrap();
    std::fs::write(&store.paths().approved, "[{\"Title\": 42}").unwrap();

    let loaded = reload(&store, now());
    assert!(loaded.approved_keys().is_empty());
    assert!(loaded.find_user("ana@x").is_some());
}
