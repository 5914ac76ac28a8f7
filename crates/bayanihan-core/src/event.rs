//! Events, their status and their volunteer roster.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::UserKey;

/// Approval state of an event.
///
/// `Pending` is the initial state. The LGU moves it to `Approved` or
/// `Denied`; `Denied` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// Awaiting an LGU decision.
    #[default]
    Pending,
    /// Visible to volunteers and joinable while open.
    Approved,
    /// Rejected by the LGU.
    Denied,
}

impl EventStatus {
    /// The persisted tag for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The editable fields of an event.
///
/// Also serves as the patch applied by an edit: every field is replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDetails {
    /// Unique title across all registry lists.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Where the event takes place.
    pub location: String,
    /// When the event takes place.
    pub date: NaiveDateTime,
    /// Registration closes at this instant.
    pub deadline: NaiveDateTime,
    /// Roster capacity.
    pub max_volunteers: u32,
}

/// A volunteer registered on an event.
///
/// The key identifies the volunteer; the name is kept because roster removal
/// matches on display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    /// The registered volunteer.
    pub volunteer: UserKey,
    /// Display name at the time of joining.
    pub name: String,
}

/// A volunteer event with its status and roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    details: EventDetails,
    status: EventStatus,
    roster: Vec<RosterEntry>,
}

impl Event {
    /// New pending event with an empty roster.
    pub fn new(details: EventDetails) -> Self {
        Self::with_status(details, EventStatus::Pending)
    }

    /// Event with an explicit status, used when loading persisted records.
    pub fn with_status(details: EventDetails, status: EventStatus) -> Self {
        Self {
            details,
            status,
            roster: Vec::new(),
        }
    }

    /// Unique title.
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// All editable fields.
    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    /// Current approval state.
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Registration closing instant.
    pub fn deadline(&self) -> NaiveDateTime {
        self.details.deadline
    }

    /// Roster capacity.
    pub fn max_volunteers(&self) -> u32 {
        self.details.max_volunteers
    }

    /// Registered volunteers in join order.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Overwrite the approval state. The registry keeps lists in sync.
    pub fn set_status(&mut self, status: EventStatus) {
        self.status = status;
    }

    /// Replace every editable field. The roster and status are untouched.
    pub fn apply(&mut self, patch: EventDetails) {
        self.details = patch;
    }

    /// Roster has reached capacity.
    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.details.max_volunteers as usize
    }

    /// Registration is still open at `now`.
    pub fn is_registration_open(&self, now: NaiveDateTime) -> bool {
        now < self.details.deadline
    }

    /// Approved, not full, and the deadline has not passed.
    ///
    /// The single predicate behind browsing, joining and reload re-joins.
    pub fn is_joinable(&self, now: NaiveDateTime) -> bool {
        self.status == EventStatus::Approved && !self.is_full() && self.is_registration_open(now)
    }

    /// Whether this volunteer is already on the roster.
    pub fn has_volunteer(&self, volunteer: UserKey) -> bool {
        self.roster.iter().any(|e| e.volunteer == volunteer)
    }

    /// Add a volunteer if there is room, registration is open and they are
    /// not already registered. Returns whether the roster changed.
    pub fn add_volunteer(&mut self, entry: RosterEntry, now: NaiveDateTime) -> bool {
        if self.is_full() || !self.is_registration_open(now) || self.has_volunteer(entry.volunteer) {
            return false;
        }
        self.roster.push(entry);
        true
    }

    /// Remove every roster entry with this display name. Returns how many
    /// entries were removed.
    pub fn remove_volunteer_named(&mut self, name: &str) -> usize {
        let before = self.roster.len();
        self.roster.retain(|e| e.name != name);
        before - self.roster.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn details(capacity: u32) -> EventDetails {
        EventDetails {
            title: "Beach Cleanup".into(),
            description: "Pick up litter along the shore".into(),
            location: "Baywalk".into(),
            date: now() + Duration::days(2),
            deadline: now() + Duration::days(1),
            max_volunteers: capacity,
        }
    }

    fn entry(index: usize, name: &str) -> RosterEntry {
        RosterEntry {
            volunteer: UserKey::from_index(index),
            name: name.into(),
        }
    }

    fn approved(capacity: u32) -> Event {
        Event::with_status(details(capacity), EventStatus::Approved)
    }

    #[test]
    fn new_event_is_pending_and_empty() {
        let event = Event::new(details(3));
        assert_eq!(event.status(), EventStatus::Pending);
        assert!(event.roster().is_empty());
        assert!(!event.is_full());
    }

    #[test]
    fn pending_event_is_not_joinable() {
        let event = Event::new(details(3));
        assert!(!event.is_joinable(now()));
    }

    #[test]
    fn denied_event_is_not_joinable() {
        let event = Event::with_status(details(3), EventStatus::Denied);
        assert!(!event.is_joinable(now()));
    }

    #[test]
    fn approved_open_event_is_joinable() {
        assert!(approved(3).is_joinable(now()));
    }

    #[test]
    fn deadline_is_exclusive() {
        let event = approved(3);
        assert!(!event.is_joinable(event.deadline()));
        assert!(event.is_joinable(event.deadline() - Duration::seconds(1)));
    }

    #[test]
    fn full_event_is_not_joinable() {
        let mut event = approved(1);
        assert!(event.add_volunteer(entry(1, "Ana"), now()));
        assert!(event.is_full());
        assert!(!event.is_joinable(now()));
    }

    #[test]
    fn add_volunteer_is_idempotent() {
        let mut event = approved(3);
        assert!(event.add_volunteer(entry(1, "Ana"), now()));
        assert!(!event.add_volunteer(entry(1, "Ana"), now()));
        assert_eq!(event.roster().len(), 1);
    }

    #[test]
    fn add_volunteer_refuses_after_deadline() {
        let mut event = approved(3);
        let late = event.deadline() + Duration::minutes(5);
        assert!(!event.add_volunteer(entry(1, "Ana"), late));
        assert!(event.roster().is_empty());
    }

    #[test]
    fn remove_by_name_removes_every_match() {
        let mut event = approved(5);
        assert!(event.add_volunteer(entry(1, "Ana"), now()));
        assert!(event.add_volunteer(entry(2, "Ana"), now()));
        assert!(event.add_volunteer(entry(3, "Ben"), now()));

        assert_eq!(event.remove_volunteer_named("Ana"), 2);
        assert_eq!(event.roster().len(), 1);
        assert_eq!(event.roster()[0].name, "Ben");
        assert_eq!(event.remove_volunteer_named("Ana"), 0);
    }

    #[test]
    fn apply_keeps_roster_and_status() {
        let mut event = approved(3);
        assert!(event.add_volunteer(entry(1, "Ana"), now()));

        let mut patch = details(10);
        patch.title = "Coastal Cleanup".into();
        event.apply(patch);

        assert_eq!(event.title(), "Coastal Cleanup");
        assert_eq!(event.max_volunteers(), 10);
        assert_eq!(event.status(), EventStatus::Approved);
        assert_eq!(event.roster().len(), 1);
    }

    #[test]
    fn status_serde_uses_tags() {
        let json = serde_json::to_string(&EventStatus::Approved).unwrap();
        assert_eq!(json, "\"Approved\"");
        let parsed: EventStatus = serde_json::from_str("\"Denied\"").unwrap();
        assert_eq!(parsed, EventStatus::Denied);
    }
}
