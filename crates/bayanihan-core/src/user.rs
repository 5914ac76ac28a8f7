//! Users and their role-specific state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HubError;
use crate::ids::EventKey;

/// Display name of the seeded LGU administrator.
pub const ADMIN_NAME: &str = "LGU Admin";
/// Email of the seeded LGU administrator. Its presence is what seeding checks.
pub const ADMIN_EMAIL: &str = "lgu@admin.com";
/// Password of the seeded LGU administrator.
pub const ADMIN_PASSWORD: &str = "lgu123";

/// Role tag carried by every user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Browses and joins approved events.
    Volunteer,
    /// Proposes and maintains events.
    EventManager,
    /// Approves or denies pending events.
    #[serde(rename = "LGU")]
    Lgu,
}

impl Role {
    /// The persisted tag for this role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volunteer => "Volunteer",
            Self::EventManager => "EventManager",
            Self::Lgu => "LGU",
        }
    }

    /// Whether a user may pick this role at sign-up.
    pub const fn can_sign_up(self) -> bool {
        matches!(self, Self::Volunteer | Self::EventManager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Volunteer" => Ok(Self::Volunteer),
            "EventManager" => Ok(Self::EventManager),
            "LGU" => Ok(Self::Lgu),
            other => Err(HubError::UnknownRole(other.to_string())),
        }
    }
}

/// Joined events of a volunteer.
///
/// `joined` is a cache of strong keys rebuilt on every load; `joined_titles`
/// is the persisted weak form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VolunteerState {
    joined: Vec<EventKey>,
    joined_titles: Vec<String>,
}

impl VolunteerState {
    /// Resolved joined events, rebuilt on load.
    pub fn joined(&self) -> &[EventKey] {
        &self.joined
    }

    /// Persisted titles of joined events.
    pub fn joined_titles(&self) -> &[String] {
        &self.joined_titles
    }

    /// Replace the persisted titles, dropping duplicates but keeping order.
    pub fn set_joined_titles(&mut self, titles: Vec<String>) {
        self.joined_titles.clear();
        for title in titles {
            if !self.joined_titles.contains(&title) {
                self.joined_titles.push(title);
            }
        }
    }

    /// Whether the joined cache holds this event.
    pub fn has_joined(&self, event: EventKey) -> bool {
        self.joined.contains(&event)
    }

    /// Record a successful join. Neither list ever holds a duplicate.
    pub fn record_join(&mut self, event: EventKey, title: &str) {
        if !self.joined.contains(&event) {
            self.joined.push(event);
        }
        if !self.joined_titles.iter().any(|t| t == title) {
            self.joined_titles.push(title.to_string());
        }
    }

    /// Forget a joined event and the first matching title.
    pub fn forget_join(&mut self, event: EventKey, title: &str) {
        self.joined.retain(|k| *k != event);
        if let Some(pos) = self.joined_titles.iter().position(|t| t == title) {
            let _ = self.joined_titles.remove(pos);
        }
    }
}

/// Created events of an event manager.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerState {
    created: Vec<EventKey>,
    created_titles: Vec<String>,
}

impl ManagerState {
    /// Resolved created events, rebuilt on load.
    pub fn created(&self) -> &[EventKey] {
        &self.created
    }

    /// Persisted titles of created events.
    pub fn created_titles(&self) -> &[String] {
        &self.created_titles
    }

    /// Replace the persisted titles as loaded.
    pub fn set_created_titles(&mut self, titles: Vec<String>) {
        self.created_titles = titles;
    }

    /// Record a newly created event in both lists.
    pub fn record_created(&mut self, event: EventKey, title: &str) {
        self.created.push(event);
        self.created_titles.push(title.to_string());
    }

    /// Drop the strong list ahead of a rebuild. Titles are kept.
    pub fn clear_created(&mut self) {
        self.created.clear();
    }

    /// Re-link a resolved event during rebuild; duplicates are ignored.
    pub fn link_created(&mut self, event: EventKey) {
        if !self.created.contains(&event) {
            self.created.push(event);
        }
    }

    /// Move the title index from `old` to `new`.
    pub fn rename_title(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        if let Some(pos) = self.created_titles.iter().position(|t| t == old) {
            let _ = self.created_titles.remove(pos);
        }
        self.created_titles.push(new.to_string());
    }

    /// Drop the given events from the strong list and the first matching
    /// title from the title list.
    pub fn forget_created(&mut self, events: &[EventKey], title: &str) {
        self.created.retain(|k| !events.contains(k));
        if let Some(pos) = self.created_titles.iter().position(|t| t == title) {
            let _ = self.created_titles.remove(pos);
        }
    }
}

/// Role-specific state. The variant is the user's role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Volunteer with joined events.
    Volunteer(VolunteerState),
    /// Event manager with created events.
    EventManager(ManagerState),
    /// LGU administrator; acts on the registry directly.
    Lgu,
}

impl Profile {
    /// Empty profile for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Volunteer => Self::Volunteer(VolunteerState::default()),
            Role::EventManager => Self::EventManager(ManagerState::default()),
            Role::Lgu => Self::Lgu,
        }
    }

    /// Role implied by the variant.
    pub fn role(&self) -> Role {
        match self {
            Self::Volunteer(_) => Role::Volunteer,
            Self::EventManager(_) => Role::EventManager,
            Self::Lgu => Role::Lgu,
        }
    }
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    name: String,
    email: String,
    password: String,
    profile: Profile,
}

impl User {
    /// New account with an empty profile for `role`.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            profile: Profile::for_role(role),
        }
    }

    /// The seeded LGU administrator.
    pub fn admin() -> Self {
        Self::new(ADMIN_NAME, ADMIN_EMAIL, ADMIN_PASSWORD, Role::Lgu)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as entered.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Role tag.
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Role-specific state.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Exact match on both email and password. Not a security mechanism.
    pub fn login(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Observational only; the session layer drops its handle to the user.
    pub fn logout(&self) {
        tracing::info!(email = %self.email, "user logged out");
    }

    /// Volunteer state, if this is a volunteer.
    pub fn as_volunteer(&self) -> Option<&VolunteerState> {
        match &self.profile {
            Profile::Volunteer(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable volunteer state, if this is a volunteer.
    pub fn as_volunteer_mut(&mut self) -> Option<&mut VolunteerState> {
        match &mut self.profile {
            Profile::Volunteer(state) => Some(state),
            _ => None,
        }
    }

    /// Manager state, if this is an event manager.
    pub fn as_manager(&self) -> Option<&ManagerState> {
        match &self.profile {
            Profile::EventManager(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable manager state, if this is an event manager.
    pub fn as_manager_mut(&mut self) -> Option<&mut ManagerState> {
        match &mut self.profile {
            Profile::EventManager(state) => Some(state),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
