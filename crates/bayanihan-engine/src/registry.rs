//! The event registry: single source of truth for events and users.
//!
//! Events live in an append-only arena; the Approved, Pending and Denied
//! lists hold keys into it. A title appears in at most one list. Removing a
//! title from the lists leaves the event in the arena so keys held elsewhere
//! stay valid for the rest of the session.

use bayanihan_core::{
    ADMIN_EMAIL, Event, EventKey, EventStatus, HubError, Result, Role, User, UserKey,
    ValidationError,
};
use tracing::{debug, info, instrument};

/// Events by status plus the master user list.
#[derive(Clone, Debug)]
pub struct EventRegistry {
    events: Vec<Event>,
    approved: Vec<EventKey>,
    pending: Vec<EventKey>,
    denied: Vec<EventKey>,
    users: Vec<User>,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRegistry {
    /// Empty registry with the LGU admin seeded.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let _ = registry.ensure_admin();
        registry
    }

    /// Empty registry without the admin. Loading seeds it after users are read.
    pub(crate) fn empty() -> Self {
        Self {
            events: Vec::new(),
            approved: Vec::new(),
            pending: Vec::new(),
            denied: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Add the LGU admin if no account uses the admin email. Returns whether
    /// an account was created.
    pub fn ensure_admin(&mut self) -> bool {
        if self.find_user(ADMIN_EMAIL).is_some() {
            return false;
        }
        self.users.push(User::admin());
        info!(email = ADMIN_EMAIL, "seeded LGU admin account");
        true
    }

    // ── Events ──────────────────────────────────────────────────────

    /// The event behind `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was not handed out by this registry.
    pub fn event(&self, key: EventKey) -> &Event {
        &self.events[key.index()]
    }

    pub(crate) fn event_mut(&mut self, key: EventKey) -> &mut Event {
        &mut self.events[key.index()]
    }

    /// Keys of the approved list, in order.
    pub fn approved_keys(&self) -> &[EventKey] {
        &self.approved
    }

    /// Keys of the pending list, in order.
    pub fn pending_keys(&self) -> &[EventKey] {
        &self.pending
    }

    /// Keys of the denied list, in order.
    pub fn denied_keys(&self) -> &[EventKey] {
        &self.denied
    }

    /// Approved events in list order.
    pub fn approved(&self) -> impl Iterator<Item = &Event> + '_ {
        self.approved.iter().map(|k| self.event(*k))
    }

    /// Pending events in list order.
    pub fn pending(&self) -> impl Iterator<Item = &Event> + '_ {
        self.pending.iter().map(|k| self.event(*k))
    }

    /// Denied events in list order.
    pub fn denied(&self) -> impl Iterator<Item = &Event> + '_ {
        self.denied.iter().map(|k| self.event(*k))
    }

    fn find_in(&self, list: &[EventKey], title: &str) -> Option<EventKey> {
        list.iter().copied().find(|k| self.event(*k).title() == title)
    }

    /// Approved event with this title.
    pub fn find_approved(&self, title: &str) -> Option<EventKey> {
        self.find_in(&self.approved, title)
    }

    /// Pending event with this title.
    pub fn find_pending(&self, title: &str) -> Option<EventKey> {
        self.find_in(&self.pending, title)
    }

    /// Denied event with this title.
    pub fn find_denied(&self, title: &str) -> Option<EventKey> {
        self.find_in(&self.denied, title)
    }

    /// Whether any of the three lists holds this title.
    pub fn contains_title(&self, title: &str) -> bool {
        self.find_approved(title).is_some()
            || self.find_pending(title).is_some()
            || self.find_denied(title).is_some()
    }

    fn list_mut(&mut self, status: EventStatus) -> &mut Vec<EventKey> {
        match status {
            EventStatus::Approved => &mut self.approved,
            EventStatus::Pending => &mut self.pending,
            EventStatus::Denied => &mut self.denied,
        }
    }

    /// Put an event in the list matching its status, enforcing title
    /// uniqueness across all three lists.
    pub(crate) fn insert_listed(&mut self, event: Event) -> Result<EventKey> {
        if self.contains_title(event.title()) {
            return Err(HubError::DuplicateTitle(event.title().to_string()));
        }
        let status = event.status();
        let key = EventKey::from_index(self.events.len());
        self.events.push(event);
        self.list_mut(status).push(key);
        Ok(key)
    }

    /// Queue an event for LGU review with status `Pending`.
    #[instrument(skip(self, event), fields(title = %event.title()))]
    pub fn submit_for_approval(&mut self, mut event: Event) -> Result<EventKey> {
        event.set_status(EventStatus::Pending);
        let key = self.insert_listed(event)?;
        info!(%key, "event submitted for approval");
        Ok(key)
    }

    /// Add an event straight to the approved list.
    #[instrument(skip(self, event), fields(title = %event.title()))]
    pub fn add_approved(&mut self, mut event: Event) -> Result<EventKey> {
        event.set_status(EventStatus::Approved);
        let key = self.insert_listed(event)?;
        debug!(%key, "approved event added");
        Ok(key)
    }

    /// Move a pending event to the approved list.
    ///
    /// Fails with `NotFound` and changes nothing if no pending event has
    /// this title.
    #[instrument(skip(self))]
    pub fn approve(&mut self, title: &str) -> Result<EventKey> {
        self.decide(title, EventStatus::Approved)
    }

    /// Move a pending event to the denied list.
    #[instrument(skip(self))]
    pub fn deny(&mut self, title: &str) -> Result<EventKey> {
        self.decide(title, EventStatus::Denied)
    }

    fn decide(&mut self, title: &str, status: EventStatus) -> Result<EventKey> {
        let Some(pos) = self
            .pending
            .iter()
            .position(|k| self.events[k.index()].title() == title)
        else {
            return Err(HubError::NotFound {
                entity: "pending event",
                key: title.to_string(),
            });
        };
        let key = self.pending.remove(pos);
        self.event_mut(key).set_status(status);
        self.list_mut(status).push(key);
        info!(%key, %status, "pending event decided");
        Ok(key)
    }

    /// Drop the title from the approved and pending lists. Absent titles are
    /// fine. The denied list is not touched. Returns how many entries were
    /// removed.
    #[instrument(skip(self))]
    pub fn remove_title(&mut self, title: &str) -> usize {
        let events = &self.events;
        let before = self.approved.len() + self.pending.len();
        self.approved.retain(|k| events[k.index()].title() != title);
        self.pending.retain(|k| events[k.index()].title() != title);
        let removed = before - (self.approved.len() + self.pending.len());
        debug!(removed, "title removed from registry lists");
        removed
    }

    // ── Users ───────────────────────────────────────────────────────

    /// The user behind `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was not handed out by this registry.
    pub fn user(&self, key: UserKey) -> &User {
        &self.users[key.index()]
    }

    pub(crate) fn user_mut(&mut self, key: UserKey) -> &mut User {
        &mut self.users[key.index()]
    }

    /// A user and an event mutably at once.
    pub(crate) fn user_and_event_mut(
        &mut self,
        user: UserKey,
        event: EventKey,
    ) -> (&mut User, &mut Event) {
        (&mut self.users[user.index()], &mut self.events[event.index()])
    }

    /// Users in registration order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.iter()
    }

    /// Keys of every user in registration order.
    pub fn user_keys(&self) -> impl Iterator<Item = UserKey> + use<> {
        (0..self.users.len()).map(UserKey::from_index)
    }

    /// Account registered under this email.
    pub fn find_user(&self, email: &str) -> Option<UserKey> {
        self.users
            .iter()
            .position(|u| u.email() == email)
            .map(UserKey::from_index)
    }

    /// Register a user, rejecting an email that is already taken.
    pub fn add_user(&mut self, user: User) -> Result<UserKey> {
        if self.find_user(user.email()).is_some() {
            return Err(HubError::DuplicateEmail(user.email().to_string()));
        }
        let key = UserKey::from_index(self.users.len());
        self.users.push(user);
        Ok(key)
    }

    /// Self-service registration as a Volunteer or Event Manager.
    #[instrument(skip(self, name, password))]
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<UserKey> {
        for (field, value) in [("name", name), ("email", email), ("password", password)] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field).into());
            }
        }
        if !role.can_sign_up() {
            return Err(HubError::RoleNotAllowed(role));
        }
        let key = self.add_user(User::new(name, email, password, role))?;
        info!(%key, "user signed up");
        Ok(key)
    }

    /// First account whose email and password both match exactly.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<UserKey> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }
        let key = self
            .users
            .iter()
            .position(|u| u.login(email, password))
            .map(UserKey::from_index)
            .ok_or(HubError::AuthFailure)?;
        info!(%key, "user logged in");
        Ok(key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
