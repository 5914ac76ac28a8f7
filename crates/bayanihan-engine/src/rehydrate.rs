//! Two-phase load from persisted records, and the snapshot for saving.
//!
//! Phase 1 builds every event and user from its record and seeds the admin.
//! Phase 2 resolves the users' persisted title lists through a title index:
//!
//! - managers re-link created events found in Approved, then Pending
//! - volunteers re-join each title found in Approved, which also rebuilds
//!   the rosters since rosters are never persisted
//!
//! Titles that resolve nowhere are dropped from the strong lists. The title
//! lists themselves are kept as stored.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument, warn};

use bayanihan_core::{Event, EventKey, EventStatus, Role, UserKey};
use bayanihan_store::{EventRecord, Snapshot, UserRecord};

use crate::lifecycle::JoinOutcome;
use crate::registry::EventRegistry;

/// Rebuild the registry from a loaded snapshot.
///
/// Best-effort: records that cannot be placed are skipped with a warning.
#[instrument(skip(snapshot))]
pub fn rehydrate(snapshot: Snapshot, now: NaiveDateTime) -> EventRegistry {
    let mut registry = EventRegistry::empty();

    load_events(&mut registry, snapshot.approved, EventStatus::Approved);
    load_events(&mut registry, snapshot.pending, EventStatus::Pending);
    load_events(&mut registry, snapshot.denied, EventStatus::Denied);
    load_users(&mut registry, snapshot.users);
    let _ = registry.ensure_admin();

    relink(&mut registry, now);

    info!(
        users = registry.users().count(),
        approved = registry.approved_keys().len(),
        pending = registry.pending_keys().len(),
        denied = registry.denied_keys().len(),
        "registry rehydrated"
    );
    registry
}

/// Flatten the registry into persisted records, in list order.
pub fn snapshot(registry: &EventRegistry) -> Snapshot {
    Snapshot {
        users: registry.users().map(UserRecord::from_user).collect(),
        approved: registry.approved().map(EventRecord::from).collect(),
        pending: registry.pending().map(EventRecord::from).collect(),
        denied: registry.denied().map(EventRecord::from).collect(),
    }
}

// ── Phase 1 ─────────────────────────────────────────────────────────

/// The document an event sits in wins over its stored status.
fn load_events(registry: &mut EventRegistry, records: Vec<EventRecord>, list: EventStatus) {
    for record in records {
        let (details, stored) = record.into_parts();
        if stored != list {
            warn!(
                title = %details.title,
                %stored,
                %list,
                "event status disagrees with its document, using the document's"
            );
        }
        if let Err(e) = registry.insert_listed(Event::with_status(details, list)) {
            warn!(error = %e, kind = e.error_kind(), %list, "skipping event record");
        }
    }
}

fn load_users(registry: &mut EventRegistry, records: Vec<UserRecord>) {
    for record in records {
        let email = record.email.clone();
        match record.into_user() {
            Ok(user) => {
                if let Err(e) = registry.add_user(user) {
                    warn!(%email, error = %e, kind = e.error_kind(), "skipping user record");
                }
            }
            Err(e) => {
                warn!(%email, error = %e, kind = e.error_kind(), "skipping user record");
            }
        }
    }
}

// ── Phase 2 ─────────────────────────────────────────────────────────

fn title_index(registry: &EventRegistry, keys: &[EventKey]) -> HashMap<String, EventKey> {
    keys.iter()
        .map(|k| (registry.event(*k).title().to_string(), *k))
        .collect()
}

fn relink(registry: &mut EventRegistry, now: NaiveDateTime) {
    let approved = title_index(registry, registry.approved_keys());
    let pending = title_index(registry, registry.pending_keys());

    for user in registry.user_keys() {
        match registry.user(user).role() {
            Role::EventManager => relink_manager(registry, user, &approved, &pending),
            Role::Volunteer => rejoin_volunteer(registry, user, &approved, now),
            Role::Lgu => {}
        }
    }
}

fn relink_manager(
    registry: &mut EventRegistry,
    manager: UserKey,
    approved: &HashMap<String, EventKey>,
    pending: &HashMap<String, EventKey>,
) {
    let Some(state) = registry.user_mut(manager).as_manager_mut() else {
        return;
    };
    state.clear_created();
    let titles = state.created_titles().to_vec();
    for title in &titles {
        match approved.get(title).or_else(|| pending.get(title)) {
            Some(key) => state.link_created(*key),
            None => debug!(%manager, %title, "created title unresolved, dropped"),
        }
    }
}

fn rejoin_volunteer(
    registry: &mut EventRegistry,
    volunteer: UserKey,
    approved: &HashMap<String, EventKey>,
    now: NaiveDateTime,
) {
    let titles = match registry.user(volunteer).as_volunteer() {
        Some(state) => state.joined_titles().to_vec(),
        None => return,
    };
    for title in &titles {
        let Some(key) = approved.get(title) else {
            debug!(%volunteer, %title, "joined title not approved, dropped");
            continue;
        };
        match registry.join_event(volunteer, *key, now) {
            Ok(JoinOutcome::Joined | JoinOutcome::AlreadyJoined) => {}
            Ok(JoinOutcome::NotJoinable) => {
                debug!(%volunteer, %title, "joined event no longer joinable, dropped");
            }
            Err(e) => warn!(
                %volunteer,
                %title,
                error = %e,
                kind = e.error_kind(),
                "failed to restore join"
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
