//! Persisted record shapes.
//!
//! Field names are PascalCase so existing data files keep loading.

use bayanihan_core::{Event, EventDetails, EventStatus, HubError, Profile, Role, User};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of `users.json`.
///
/// The title lists are role-dependent: managers carry
/// `CreatedEventTitles`, volunteers carry `JoinedEventTitles`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    /// Display name.
    pub name: String,
    /// Unique account key.
    pub email: String,
    /// Stored as entered.
    pub password: String,
    /// `Volunteer`, `EventManager` or `LGU`.
    pub role: String,
    /// Titles of events the manager created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_event_titles: Option<Vec<String>>,
    /// Titles of events the volunteer joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_event_titles: Option<Vec<String>>,
}

impl UserRecord {
    /// Flatten a user into its persisted form.
    pub fn from_user(user: &User) -> Self {
        let (created, joined) = match user.profile() {
            Profile::Volunteer(state) => (None, Some(state.joined_titles().to_vec())),
            Profile::EventManager(state) => (Some(state.created_titles().to_vec()), None),
            Profile::Lgu => (None, None),
        };
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            password: user.password().to_string(),
            role: user.role().as_str().to_string(),
            created_event_titles: created,
            joined_event_titles: joined,
        }
    }

    /// Build a user with its persisted title lists. The strong lists stay
    /// empty until rehydration resolves the titles.
    pub fn into_user(self) -> Result<User, HubError> {
        let role: Role = self.role.parse()?;
        let mut user = User::new(self.name, self.email, self.password, role);
        if let Some(state) = user.as_volunteer_mut() {
            state.set_joined_titles(self.joined_event_titles.unwrap_or_default());
        }
        if let Some(state) = user.as_manager_mut() {
            state.set_created_titles(self.created_event_titles.unwrap_or_default());
        }
        Ok(user)
    }
}

/// One entry of an events document. Same shape in all three.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventRecord {
    /// Unique title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Event date, ISO-8601 without offset.
    pub date: NaiveDateTime,
    /// Registration deadline, ISO-8601 without offset.
    pub deadline: NaiveDateTime,
    /// Where the event takes place.
    #[serde(default)]
    pub location: String,
    /// Roster capacity.
    pub max_volunteers: u32,
    /// Approval status at save time.
    #[serde(default)]
    pub status: EventStatus,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        let d = event.details();
        Self {
            title: d.title.clone(),
            description: d.description.clone(),
            date: d.date,
            deadline: d.deadline,
            location: d.location.clone(),
            max_volunteers: d.max_volunteers,
            status: event.status(),
        }
    }
}

impl EventRecord {
    /// Split into editable details and the stored status.
    pub fn into_parts(self) -> (EventDetails, EventStatus) {
        (
            EventDetails {
                title: self.title,
                description: self.description,
                location: self.location,
                date: self.date,
                deadline: self.deadline,
                max_volunteers: self.max_volunteers,
            },
            self.status,
        )
    }
}

/// The whole persisted state: one collection per document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Contents of the users document.
    pub users: Vec<UserRecord>,
    /// Contents of the approved events document.
    pub approved: Vec<EventRecord>,
    /// Contents of the pending events document.
    pub pending: Vec<EventRecord>,
    /// Contents of the denied events document.
    pub denied: Vec<EventRecord>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
