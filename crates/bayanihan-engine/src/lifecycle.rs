//! Role-scoped event transitions.
//!
//! Every operation names the acting user by key and checks their role
//! first. Capacity and deadline guards go through [`Event::is_joinable`].
//!
//! [`Event::is_joinable`]: bayanihan_core::Event::is_joinable

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use bayanihan_core::{
    Event, EventDetails, EventKey, HubError, ManagerState, Result, Role, RosterEntry, UserKey,
    VolunteerState, is_visible_to,
};

use crate::registry::EventRegistry;

/// What a join attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The volunteer is now on the roster.
    Joined,
    /// The volunteer was already registered; nothing changed.
    AlreadyJoined,
    /// The event is full, closed, or not approved; nothing changed.
    NotJoinable,
}

/// What a cancellation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The volunteer left the event.
    Cancelled,
    /// The volunteer had no joined event with that title.
    NotJoined,
}

impl EventRegistry {
    fn require_role(&self, user: UserKey, expected: Role) -> Result<()> {
        let actual = self.user(user).role();
        if actual == expected {
            Ok(())
        } else {
            Err(HubError::WrongRole { expected, actual })
        }
    }

    fn volunteer_state(&self, user: UserKey) -> Result<&VolunteerState> {
        self.require_role(user, Role::Volunteer)?;
        self.user(user).as_volunteer().ok_or(HubError::WrongRole {
            expected: Role::Volunteer,
            actual: self.user(user).role(),
        })
    }

    fn manager_state(&self, user: UserKey) -> Result<&ManagerState> {
        self.require_role(user, Role::EventManager)?;
        self.user(user).as_manager().ok_or(HubError::WrongRole {
            expected: Role::EventManager,
            actual: self.user(user).role(),
        })
    }

    fn manager_state_mut(&mut self, user: UserKey) -> Result<&mut ManagerState> {
        let actual = self.user(user).role();
        self.user_mut(user)
            .as_manager_mut()
            .ok_or(HubError::WrongRole {
                expected: Role::EventManager,
                actual,
            })
    }

    // ── Volunteer ───────────────────────────────────────────────────

    /// Register `volunteer` on an approved event.
    ///
    /// No-op unless the event is listed as approved, joinable at `now`, and
    /// the volunteer is not already on it.
    #[instrument(skip(self))]
    pub fn join_event(
        &mut self,
        volunteer: UserKey,
        event: EventKey,
        now: NaiveDateTime,
    ) -> Result<JoinOutcome> {
        self.require_role(volunteer, Role::Volunteer)?;
        let listed = self.approved_keys().contains(&event);

        let (user, target) = self.user_and_event_mut(volunteer, event);
        let actual = user.role();
        let name = user.name().to_string();
        let state = user.as_volunteer_mut().ok_or(HubError::WrongRole {
            expected: Role::Volunteer,
            actual,
        })?;

        if state.has_joined(event) || target.has_volunteer(volunteer) {
            debug!("volunteer already on roster");
            return Ok(JoinOutcome::AlreadyJoined);
        }
        if !listed || !target.is_joinable(now) {
            debug!("event not joinable");
            return Ok(JoinOutcome::NotJoinable);
        }

        let title = target.title().to_string();
        if !target.add_volunteer(RosterEntry { volunteer, name }, now) {
            return Ok(JoinOutcome::NotJoinable);
        }
        state.record_join(event, &title);
        info!(%title, "volunteer joined event");
        Ok(JoinOutcome::Joined)
    }

    /// Leave the joined event with this title.
    ///
    /// The roster entry is removed by the volunteer's display name, so every
    /// entry sharing that name goes with it.
    #[instrument(skip(self))]
    pub fn cancel_event(&mut self, volunteer: UserKey, title: &str) -> Result<CancelOutcome> {
        let state = self.volunteer_state(volunteer)?;
        let Some(key) = state
            .joined()
            .iter()
            .copied()
            .find(|k| self.event(*k).title() == title)
        else {
            debug!("no joined event with that title");
            return Ok(CancelOutcome::NotJoined);
        };

        let (user, event) = self.user_and_event_mut(volunteer, key);
        let name = user.name().to_string();
        if let Some(state) = user.as_volunteer_mut() {
            state.forget_join(key, title);
        }
        let removed = event.remove_volunteer_named(&name);
        info!(removed, "volunteer cancelled event");
        Ok(CancelOutcome::Cancelled)
    }

    /// Events in the volunteer's joined cache, in join order.
    pub fn joined_events(&self, volunteer: UserKey) -> Result<Vec<&Event>> {
        let state = self.volunteer_state(volunteer)?;
        Ok(state.joined().iter().map(|k| self.event(*k)).collect())
    }

    // ── Event manager ───────────────────────────────────────────────

    /// Submit a new event for approval and record it as the manager's.
    ///
    /// The details must already be validated. A duplicate title fails
    /// before the manager's lists are touched.
    #[instrument(skip(self, details), fields(title = %details.title))]
    pub fn create_event(&mut self, manager: UserKey, details: EventDetails) -> Result<EventKey> {
        self.require_role(manager, Role::EventManager)?;
        let title = details.title.clone();
        let key = self.submit_for_approval(Event::new(details))?;
        self.manager_state_mut(manager)?.record_created(key, &title);
        info!(%key, "event created");
        Ok(key)
    }

    /// Replace every field of the manager's event titled `title`.
    ///
    /// Precondition: `patch` is already validated. Roster and status are
    /// kept. Renaming onto a title that exists anywhere in the registry is
    /// rejected.
    #[instrument(skip(self, patch), fields(new_title = %patch.title))]
    pub fn edit_event(
        &mut self,
        manager: UserKey,
        title: &str,
        patch: EventDetails,
    ) -> Result<EventKey> {
        let state = self.manager_state(manager)?;
        let key = state
            .created()
            .iter()
            .copied()
            .find(|k| self.event(*k).title() == title)
            .ok_or_else(|| HubError::event_not_found(title))?;

        if patch.title != title && self.contains_title(&patch.title) {
            return Err(HubError::DuplicateTitle(patch.title));
        }

        let new_title = patch.title.clone();
        self.event_mut(key).apply(patch);
        self.manager_state_mut(manager)?.rename_title(title, &new_title);
        info!(%key, "event edited");
        Ok(key)
    }

    /// Remove the title from the manager's lists and from the approved and
    /// pending lists. Idempotent. Returns how many registry entries went.
    #[instrument(skip(self))]
    pub fn delete_event(&mut self, manager: UserKey, title: &str) -> Result<usize> {
        let state = self.manager_state(manager)?;
        let matching: Vec<EventKey> = state
            .created()
            .iter()
            .copied()
            .filter(|k| self.event(*k).title() == title)
            .collect();
        self.manager_state_mut(manager)?
            .forget_created(&matching, title);
        let removed = self.remove_title(title);
        info!(removed, "event deleted");
        Ok(removed)
    }

    /// The manager's created events, in creation order.
    pub fn created_events(&self, manager: UserKey) -> Result<Vec<&Event>> {
        let state = self.manager_state(manager)?;
        Ok(state.created().iter().map(|k| self.event(*k)).collect())
    }

    /// Roster of the manager's event titled `title`. Empty when the manager
    /// has no such event.
    pub fn event_volunteers(&self, manager: UserKey, title: &str) -> Result<&[RosterEntry]> {
        let state = self.manager_state(manager)?;
        Ok(state
            .created()
            .iter()
            .map(|k| self.event(*k))
            .find(|e| e.title() == title)
            .map_or(&[][..], Event::roster))
    }

    // ── LGU ─────────────────────────────────────────────────────────

    /// Approve a pending event. `NotFound` covers "not found or not pending".
    pub fn approve_event(&mut self, lgu: UserKey, title: &str) -> Result<EventKey> {
        self.require_role(lgu, Role::Lgu)?;
        self.approve(title)
    }

    /// Deny a pending event. `NotFound` covers "not found or not pending".
    pub fn deny_event(&mut self, lgu: UserKey, title: &str) -> Result<EventKey> {
        self.require_role(lgu, Role::Lgu)?;
        self.deny(title)
    }

    // ── Browsing ────────────────────────────────────────────────────

    /// Approved events `role` may browse at `now`, in list order.
    pub fn viewable(&self, role: Role, now: NaiveDateTime) -> Vec<EventKey> {
        self.approved_keys()
            .iter()
            .copied()
            .filter(|k| is_visible_to(role, self.event(*k), now))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use bayanihan_core::{ADMIN_EMAIL, ADMIN_PASSWORD, EventStatus};
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn details(title: &str, capacity: u32) -> EventDetails {
        EventDetails {
            title: title.into(),
            description: "Community work".into(),
            location: "Barangay Hall".into(),
            date: now() + Duration::days(10),
            deadline: now() + Duration::days(5),
            max_volunteers: capacity,
        }
    }

    struct Hub {
        registry: EventRegistry,
        lgu: UserKey,
        manager: UserKey,
        ana: UserKey,
        ben: UserKey,
        cara: UserKey,
    }

    fn hub() -> Hub {
        let mut registry = EventRegistry::new();
        let lgu = registry.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let manager = registry
            .sign_up("Mia", "mia@x", "pw", Role::EventManager)
            .unwrap();
        let ana = registry.sign_up("Ana", "ana@x", "pw", Role::Volunteer).unwrap();
        let ben = registry.sign_up("Ben", "ben@x", "pw", Role::Volunteer).unwrap();
        let cara = registry
            .sign_up("Cara", "cara@x", "pw", Role::Volunteer)
            .unwrap();
        Hub {
            registry,
            lgu,
            manager,
            ana,
            ben,
            cara,
        }
    }

    fn approved_event(hub: &mut Hub, title: &str, capacity: u32) -> EventKey {
        let key = hub
            .registry
            .create_event(hub.manager, details(title, capacity))
            .unwrap();
        let _ = hub.registry.approve_event(hub.lgu, title).unwrap();
        key
    }

    #[test]
    fn capacity_two_third_join_is_noop() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 2);

        assert_eq!(
            hub.registry.join_event(hub.ana, key, now()).unwrap(),
            JoinOutcome::Joined
        );
        assert_eq!(
            hub.registry.join_event(hub.ben, key, now()).unwrap(),
            JoinOutcome::Joined
        );
        assert_eq!(
            hub.registry.join_event(hub.cara, key, now()).unwrap(),
            JoinOutcome::NotJoinable
        );

        assert_eq!(hub.registry.event(key).roster().len(), 2);
        assert!(hub.registry.event(key).is_full());
        assert!(hub.registry.joined_events(hub.cara).unwrap().is_empty());
        assert!(hub.registry.viewable(Role::Volunteer, now()).is_empty());
    }

    #[test]
    fn join_twice_reports_already_joined() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Tree Planting", 5);
        let _ = hub.registry.join_event(hub.ana, key, now()).unwrap();

        assert_eq!(
            hub.registry.join_event(hub.ana, key, now()).unwrap(),
            JoinOutcome::AlreadyJoined
        );
        assert_eq!(hub.registry.event(key).roster().len(), 1);
        let ana = hub.registry.user(hub.ana).as_volunteer().unwrap();
        assert_eq!(ana.joined_titles(), &["Tree Planting".to_string()]);
    }

    #[test]
    fn pending_event_cannot_be_joined() {
        let mut hub = hub();
        let key = hub
            .registry
            .create_event(hub.manager, details("Waiting", 5))
            .unwrap();
        assert_eq!(
            hub.registry.join_event(hub.ana, key, now()).unwrap(),
            JoinOutcome::NotJoinable
        );
    }

    #[test]
    fn join_after_deadline_is_noop() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Late", 5);
        let late = now() + Duration::days(6);
        assert_eq!(
            hub.registry.join_event(hub.ana, key, late).unwrap(),
            JoinOutcome::NotJoinable
        );
    }

    #[test]
    fn deleted_event_cannot_be_joined_by_stale_key() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Gone", 5);
        let _ = hub.registry.delete_event(hub.manager, "Gone").unwrap();
        assert_eq!(
            hub.registry.join_event(hub.ana, key, now()).unwrap(),
            JoinOutcome::NotJoinable
        );
    }

    #[test]
    fn only_volunteers_join() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 5);
        assert_matches!(
            hub.registry.join_event(hub.manager, key, now()),
            Err(HubError::WrongRole {
                expected: Role::Volunteer,
                actual: Role::EventManager
            })
        );
    }

    #[test]
    fn cancel_removes_from_both_sides() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 5);
        let _ = hub.registry.join_event(hub.ana, key, now()).unwrap();

        assert_eq!(
            hub.registry.cancel_event(hub.ana, "Beach Cleanup").unwrap(),
            CancelOutcome::Cancelled
        );
        assert!(hub.registry.event(key).roster().is_empty());
        let ana = hub.registry.user(hub.ana).as_volunteer().unwrap();
        assert!(ana.joined().is_empty());
        assert!(ana.joined_titles().is_empty());

        assert_eq!(
            hub.registry.cancel_event(hub.ana, "Beach Cleanup").unwrap(),
            CancelOutcome::NotJoined
        );
    }

    #[test]
    fn cancel_removes_every_roster_entry_with_the_same_name() {
        let mut hub = hub();
        let twin = hub
            .registry
            .sign_up("Ana", "ana2@x", "pw", Role::Volunteer)
            .unwrap();
        let key = approved_event(&mut hub, "Beach Cleanup", 5);
        let _ = hub.registry.join_event(hub.ana, key, now()).unwrap();
        let _ = hub.registry.join_event(twin, key, now()).unwrap();

        let _ = hub.registry.cancel_event(hub.ana, "Beach Cleanup").unwrap();
        assert!(hub.registry.event(key).roster().is_empty());
        // The second Ana's cache still holds the event.
        assert_eq!(hub.registry.joined_events(twin).unwrap().len(), 1);
    }

    #[test]
    fn create_records_pending_event_for_manager() {
        let mut hub = hub();
        let key = hub
            .registry
            .create_event(hub.manager, details("Beach Cleanup", 3))
            .unwrap();

        assert_eq!(hub.registry.pending_keys(), &[key]);
        let created = hub.registry.created_events(hub.manager).unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].status(), EventStatus::Pending);
    }

    #[test]
    fn create_duplicate_leaves_manager_untouched() {
        let mut hub = hub();
        let _ = approved_event(&mut hub, "Beach Cleanup", 3);
        assert_matches!(
            hub.registry
                .create_event(hub.manager, details("Beach Cleanup", 9)),
            Err(HubError::DuplicateTitle(_))
        );
        let mgr = hub.registry.user(hub.manager).as_manager().unwrap();
        assert_eq!(mgr.created().len(), 1);
        assert_eq!(mgr.created_titles().len(), 1);
    }

    #[test]
    fn volunteer_cannot_create() {
        let mut hub = hub();
        assert_matches!(
            hub.registry.create_event(hub.ana, details("Nope", 3)),
            Err(HubError::WrongRole { .. })
        );
        assert!(hub.registry.pending_keys().is_empty());
    }

    #[test]
    fn rename_while_approved_keeps_roster_and_status() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 3);
        let _ = hub.registry.join_event(hub.ana, key, now()).unwrap();

        let edited = hub
            .registry
            .edit_event(hub.manager, "Beach Cleanup", details("Coastal Cleanup", 3))
            .unwrap();

        assert_eq!(edited, key);
        let event = hub.registry.event(key);
        assert_eq!(event.title(), "Coastal Cleanup");
        assert_eq!(event.status(), EventStatus::Approved);
        assert_eq!(event.roster().len(), 1);
        let mgr = hub.registry.user(hub.manager).as_manager().unwrap();
        assert_eq!(mgr.created_titles(), &["Coastal Cleanup".to_string()]);
        assert_eq!(hub.registry.find_approved("Coastal Cleanup"), Some(key));
    }

    #[test]
    fn edit_unknown_title_is_not_found() {
        let mut hub = hub();
        assert_matches!(
            hub.registry
                .edit_event(hub.manager, "Missing", details("Missing", 3)),
            Err(HubError::NotFound { entity: "event", .. })
        );
    }

    #[test]
    fn edit_rename_onto_existing_title_is_rejected() {
        let mut hub = hub();
        let _ = approved_event(&mut hub, "Beach Cleanup", 3);
        let _ = approved_event(&mut hub, "Tree Planting", 3);
        assert_matches!(
            hub.registry
                .edit_event(hub.manager, "Beach Cleanup", details("Tree Planting", 3)),
            Err(HubError::DuplicateTitle(_))
        );
        assert!(hub.registry.find_approved("Beach Cleanup").is_some());
    }

    #[test]
    fn edit_keeping_title_updates_fields() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 3);
        let _ = hub
            .registry
            .edit_event(hub.manager, "Beach Cleanup", details("Beach Cleanup", 12))
            .unwrap();
        assert_eq!(hub.registry.event(key).max_volunteers(), 12);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut hub = hub();
        let _ = approved_event(&mut hub, "Beach Cleanup", 3);

        assert_eq!(
            hub.registry.delete_event(hub.manager, "Beach Cleanup").unwrap(),
            1
        );
        assert_eq!(
            hub.registry.delete_event(hub.manager, "Beach Cleanup").unwrap(),
            0
        );
        assert!(hub.registry.approved_keys().is_empty());
        assert!(hub.registry.created_events(hub.manager).unwrap().is_empty());
    }

    #[test]
    fn delete_keeps_volunteer_cache_until_reload() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 3);
        let _ = hub.registry.join_event(hub.ana, key, now()).unwrap();
        let _ = hub.registry.delete_event(hub.manager, "Beach Cleanup").unwrap();

        let joined = hub.registry.joined_events(hub.ana).unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].title(), "Beach Cleanup");
    }

    #[test]
    fn event_volunteers_lists_roster() {
        let mut hub = hub();
        let key = approved_event(&mut hub, "Beach Cleanup", 3);
        let _ = hub.registry.join_event(hub.ana, key, now()).unwrap();
        let _ = hub.registry.join_event(hub.ben, key, now()).unwrap();

        let names: Vec<&str> = hub
            .registry
            .event_volunteers(hub.manager, "Beach Cleanup")
            .unwrap()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana", "Ben"]);
        assert!(
            hub.registry
                .event_volunteers(hub.manager, "Missing")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn lgu_decisions_require_lgu() {
        let mut hub = hub();
        let _ = hub
            .registry
            .create_event(hub.manager, details("Beach Cleanup", 3))
            .unwrap();
        assert_matches!(
            hub.registry.approve_event(hub.manager, "Beach Cleanup"),
            Err(HubError::WrongRole { expected: Role::Lgu, .. })
        );
        assert_matches!(
            hub.registry.deny_event(hub.ana, "Beach Cleanup"),
            Err(HubError::WrongRole { .. })
        );
        assert_eq!(hub.registry.pending_keys().len(), 1);

        let _ = hub.registry.deny_event(hub.lgu, "Beach Cleanup").unwrap();
        assert_eq!(hub.registry.denied_keys().len(), 1);
    }

    #[test]
    fn viewable_depends_on_role() {
        let mut hub = hub();
        let open = approved_event(&mut hub, "Open", 1);
        let full = approved_event(&mut hub, "Full", 1);
        let _ = hub.registry.join_event(hub.ana, full, now()).unwrap();

        assert_eq!(hub.registry.viewable(Role::Volunteer, now()), vec![open]);
        assert_eq!(
            hub.registry.viewable(Role::EventManager, now()),
            vec![open, full]
        );
        assert_eq!(hub.registry.viewable(Role::Lgu, now()).len(), 2);
    }
}
