//! The interactive session: main menu and one menu per role.
//!
//! Menus list events with 1-based numbers and ask for a `y` confirmation
//! before acting. State is saved after every successful mutation and on
//! exit. A failed save is reported and the session continues.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use bayanihan_core::{Event, EventDraft, EventKey, Role, UserKey, ViewColumns};
use bayanihan_engine::{CancelOutcome, EventRegistry, JoinOutcome, snapshot};
use bayanihan_store::JsonStore;

use crate::console::Console;
use crate::parse::{is_confirmed, parse_capacity, parse_choice, parse_date};
use crate::table::{DETAILED, TableOptions, render_events};

/// Wall-clock time as a naive local timestamp.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// A console session over a registry and its store.
pub struct App<R, W> {
    registry: EventRegistry,
    store: JsonStore,
    console: Console<R, W>,
    clock: fn() -> NaiveDateTime,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Session over a loaded registry, using the local clock.
    pub fn new(registry: EventRegistry, store: JsonStore, console: Console<R, W>) -> Self {
        Self {
            registry,
            store,
            console,
            clock: local_now,
        }
    }

    /// Replace the clock, for deterministic sessions.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// The registry as the session has left it.
    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// The console, for inspecting written output.
    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn save(&mut self) -> io::Result<()> {
        match self.store.save(&snapshot(&self.registry)) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, kind = e.error_kind(), "failed to save data");
                self.console.say(format!("Warning: could not save data: {e}"))
            }
        }
    }

    fn show(&mut self, keys: &[EventKey], options: TableOptions) -> io::Result<()> {
        let events: Vec<&Event> = keys.iter().map(|k| self.registry.event(*k)).collect();
        let table = render_events(&events, options);
        self.console.say(table)
    }

    /// Show a numbered list, read a choice and confirm it.
    ///
    /// `None` when the input is invalid, declined or exhausted.
    fn pick(
        &mut self,
        keys: &[EventKey],
        columns: ViewColumns,
        action: &str,
    ) -> io::Result<Option<EventKey>> {
        self.show(keys, TableOptions::numbered(columns))?;
        let Some(answer) = self
            .console
            .prompt(&format!("\nEnter the number of the event to {action}: "))?
        else {
            return Ok(None);
        };
        let key = match parse_choice(&answer, keys.len()) {
            Ok(index) => keys[index],
            Err(e) => {
                self.console.say(format!("Invalid number: {e}."))?;
                return Ok(None);
            }
        };

        let details = self.registry.event(key).details().clone();
        self.console.say(format!("\nEvent: {}", details.title))?;
        self.console
            .say(format!("Description: {}", details.description))?;
        let Some(answer) = self
            .console
            .prompt(&format!("Do you want to {action} this event? (y/n): "))?
        else {
            return Ok(None);
        };
        if is_confirmed(&answer) {
            Ok(Some(key))
        } else {
            self.console.say("Action cancelled.")?;
            Ok(None)
        }
    }

    // ── Main menu ───────────────────────────────────────────────────

    /// Run the main menu until the user exits or input runs out, then save.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.say("\n=== Bayanihan Volunteer Hub ===")?;
            self.console.say("1. Sign Up")?;
            self.console.say("2. Login")?;
            self.console.say("3. Display All Available Events")?;
            self.console.say("4. Exit")?;
            let Some(choice) = self.console.prompt("Choose an option: ")? else {
                break;
            };
            match choice.trim() {
                "1" => self.sign_up()?,
                "2" => self.login()?,
                "3" => {
                    self.console.say("\n=== All Available Events ===")?;
                    let keys = self.registry.approved_keys().to_vec();
                    self.show(&keys, TableOptions::default())?;
                }
                "4" => break,
                _ => self.console.say("Invalid option. Try again.")?,
            }
        }
        self.save()?;
        info!("session ended");
        self.console.say("Goodbye!")
    }

    fn sign_up(&mut self) -> io::Result<()> {
        self.console.say("\n=== Sign Up ===")?;
        let Some(name) = self.console.prompt("Enter name: ")? else {
            return Ok(());
        };
        let Some(email) = self.console.prompt("Enter email: ")? else {
            return Ok(());
        };
        let Some(password) = self.console.prompt("Enter password: ")? else {
            return Ok(());
        };
        let Some(role) = self
            .console
            .prompt("Enter role (Volunteer/EventManager): ")?
        else {
            return Ok(());
        };

        let outcome = role
            .trim()
            .parse::<Role>()
            .and_then(|role| self.registry.sign_up(&name, &email, &password, role));
        match outcome {
            Ok(_) => {
                self.save()?;
                self.console.say("\nSuccessfully signed up!")
            }
            Err(e) => self.console.say(format!("\nError: {e}")),
        }
    }

    fn login(&mut self) -> io::Result<()> {
        self.console.say("\n=== Login ===")?;
        let Some(email) = self.console.prompt("Enter email: ")? else {
            return Ok(());
        };
        let Some(password) = self.console.prompt("Enter password: ")? else {
            return Ok(());
        };

        let user = match self.registry.login(&email, &password) {
            Ok(user) => user,
            Err(e) => return self.console.say(format!("\nError: {e}")),
        };
        let (name, role) = {
            let u = self.registry.user(user);
            (u.name().to_string(), u.role())
        };
        self.console.say(format!("\nWelcome, {name} ({role})!"))?;
        match role {
            Role::Volunteer => self.volunteer_menu(user)?,
            Role::EventManager => self.manager_menu(user)?,
            Role::Lgu => self.lgu_menu(user)?,
        }
        self.registry.user(user).logout();
        Ok(())
    }

    // ── Volunteer ───────────────────────────────────────────────────

    fn joined_keys(&self, volunteer: UserKey) -> Vec<EventKey> {
        self.registry
            .user(volunteer)
            .as_volunteer()
            .map(|s| s.joined().to_vec())
            .unwrap_or_default()
    }

    fn volunteer_menu(&mut self, volunteer: UserKey) -> io::Result<()> {
        loop {
            self.console.say("\n--- Volunteer Menu ---")?;
            self.console.say("[1] View Available Events (Joinable Only)")?;
            self.console.say("[2] Join Event")?;
            self.console.say("[3] Cancel Joined Event")?;
            self.console.say("[4] View Joined Events")?;
            self.console.say("[5] Logout")?;
            let Some(choice) = self.console.prompt("Choose an option: ")? else {
                return Ok(());
            };
            match choice.trim() {
                "1" => {
                    self.console.say("\n=== Available Events (Joinable Only) ===")?;
                    let keys = self.registry.viewable(Role::Volunteer, self.now());
                    self.show(&keys, TableOptions::plain(Role::Volunteer.view_columns()))?;
                }
                "2" => self.join(volunteer)?,
                "3" => self.cancel(volunteer)?,
                "4" => {
                    self.console.say("\n=== Your Joined Events ===")?;
                    let keys = self.joined_keys(volunteer);
                    if keys.is_empty() {
                        self.console.say("You haven't joined any events yet.")?;
                    } else {
                        self.show(&keys, TableOptions::default())?;
                    }
                }
                "5" => return Ok(()),
                _ => self.console.say("Invalid option. Try again.")?,
            }
        }
    }

    fn join(&mut self, volunteer: UserKey) -> io::Result<()> {
        self.console.say("\n=== Join an Event ===")?;
        let keys = self.registry.viewable(Role::Volunteer, self.now());
        if keys.is_empty() {
            return self.console.say("No joinable events available.");
        }
        let Some(key) = self.pick(&keys, Role::Volunteer.view_columns(), "join")? else {
            return Ok(());
        };
        let now = self.now();
        match self.registry.join_event(volunteer, key, now) {
            Ok(JoinOutcome::Joined) => {
                self.save()?;
                self.console.say("Joined successfully!")
            }
            Ok(JoinOutcome::AlreadyJoined) => {
                self.console.say("You have already joined this event.")
            }
            Ok(JoinOutcome::NotJoinable) => {
                self.console.say("This event is no longer open for joining.")
            }
            Err(e) => self.console.say(format!("Error: {e}")),
        }
    }

    fn cancel(&mut self, volunteer: UserKey) -> io::Result<()> {
        self.console.say("\n=== Cancel Joined Event ===")?;
        let keys = self.joined_keys(volunteer);
        if keys.is_empty() {
            return self.console.say("You have not joined any events yet.");
        }
        let Some(key) = self.pick(&keys, ViewColumns::default(), "cancel")? else {
            return Ok(());
        };
        let title = self.registry.event(key).title().to_string();
        match self.registry.cancel_event(volunteer, &title) {
            Ok(CancelOutcome::Cancelled) => {
                self.save()?;
                self.console.say(format!("You are no longer joined to '{title}'."))
            }
            Ok(CancelOutcome::NotJoined) => self.console.say("You have not joined this event."),
            Err(e) => self.console.say(format!("Error: {e}")),
        }
    }

    // ── Event manager ───────────────────────────────────────────────

    fn created_keys(&self, manager: UserKey) -> Vec<EventKey> {
        self.registry
            .user(manager)
            .as_manager()
            .map(|s| s.created().to_vec())
            .unwrap_or_default()
    }

    fn manager_menu(&mut self, manager: UserKey) -> io::Result<()> {
        loop {
            self.console.say("\n--- Event Manager Menu ---")?;
            self.console.say("1. Create Event")?;
            self.console.say("2. Edit Event")?;
            self.console.say("3. Delete Event")?;
            self.console.say("4. View Volunteers for Event")?;
            self.console.say("5. View All Events")?;
            self.console.say("6. Logout")?;
            let Some(choice) = self.console.prompt("Choose an option: ")? else {
                return Ok(());
            };
            match choice.trim() {
                "1" => self.create(manager)?,
                "2" => self.edit(manager)?,
                "3" => self.delete(manager)?,
                "4" => self.view_volunteers(manager)?,
                "5" => {
                    self.console.say("\n=== All Events ===")?;
                    let keys = self.registry.viewable(Role::EventManager, self.now());
                    self.show(
                        &keys,
                        TableOptions::plain(Role::EventManager.view_columns()),
                    )?;
                }
                "6" => return Ok(()),
                _ => self.console.say("Invalid option.")?,
            }
        }
    }

    fn create(&mut self, manager: UserKey) -> io::Result<()> {
        self.console.say("\n=== Create Event ===")?;
        let Some(title) = self.console.prompt("Enter event title: ")? else {
            return Ok(());
        };
        let Some(description) = self.console.prompt("Enter description: ")? else {
            return Ok(());
        };
        let Some(location) = self.console.prompt("Enter location: ")? else {
            return Ok(());
        };
        let Some(date) = self.console.prompt("Enter date (yyyy-mm-dd): ")? else {
            return Ok(());
        };
        let date = match parse_date(&date) {
            Ok(d) => d,
            Err(e) => return self.console.say(format!("\nError: {e}.")),
        };
        let Some(deadline) = self.console.prompt("Enter deadline (yyyy-mm-dd): ")? else {
            return Ok(());
        };
        let deadline = match parse_date(&deadline) {
            Ok(d) => d,
            Err(e) => return self.console.say(format!("\nError: {e}.")),
        };
        let Some(capacity) = self.console.prompt("Enter max volunteers: ")? else {
            return Ok(());
        };
        let max_volunteers = match parse_capacity(&capacity) {
            Ok(n) => n,
            Err(e) => return self.console.say(format!("\nError: {e}.")),
        };

        let draft = EventDraft {
            title,
            description,
            location,
            date,
            deadline,
            max_volunteers,
        };
        let details = match draft.validate(self.now()) {
            Ok(details) => details,
            Err(e) => return self.console.say(format!("\nError: {e}.")),
        };
        match self.registry.create_event(manager, details) {
            Ok(_) => {
                self.save()?;
                self.console
                    .say("\nEvent created and submitted for approval!")
            }
            Err(e) => self.console.say(format!("\nError: {e}.")),
        }
    }

    /// Blank answers keep the current value; unparseable ones are reported
    /// and also keep it.
    fn edit(&mut self, manager: UserKey) -> io::Result<()> {
        self.console.say("\n=== Edit Event ===")?;
        let keys = self.created_keys(manager);
        if keys.is_empty() {
            return self.console.say("\nYou haven't created any events yet.");
        }
        let Some(key) = self.pick(&keys, DETAILED, "edit")? else {
            return Ok(());
        };

        let current = self.registry.event(key).details().clone();
        let mut draft = EventDraft::from_details(&current);
        self.console.say(format!("\nEditing: {}", current.title))?;

        if let Some(title) = self.ask_optional("Enter new title (leave blank to keep current): ")? {
            draft.title = title;
        }
        if let Some(description) =
            self.ask_optional("Enter new description (leave blank to keep current): ")?
        {
            draft.description = description;
        }
        if let Some(raw) =
            self.ask_optional("Enter new date (yyyy-mm-dd, leave blank to keep current): ")?
        {
            match parse_date(&raw) {
                Ok(date) => draft.date = date,
                Err(_) => self.console.say("Invalid date format, keeping old date.")?,
            }
        }
        if let Some(raw) =
            self.ask_optional("Enter new deadline (yyyy-mm-dd, leave blank to keep current): ")?
        {
            match parse_date(&raw) {
                Ok(deadline) => draft.deadline = deadline,
                Err(_) => self
                    .console
                    .say("Invalid date format, keeping old deadline.")?,
            }
        }
        if let Some(location) =
            self.ask_optional("Enter new location (leave blank to keep current): ")?
        {
            draft.location = location;
        }
        if let Some(raw) =
            self.ask_optional("Enter new max volunteers (leave blank to keep current): ")?
        {
            match parse_capacity(&raw) {
                Ok(n) if n > 0 => draft.max_volunteers = n,
                _ => self
                    .console
                    .say("Invalid number, keeping old max volunteers.")?,
            }
        }

        let patch = match draft.validate_edit() {
            Ok(patch) => patch,
            Err(e) => {
                return self
                    .console
                    .say(format!("Error: {e}. Changes not applied."));
            }
        };
        match self.registry.edit_event(manager, &current.title, patch) {
            Ok(_) => {
                self.save()?;
                self.console.say("\nEvent updated successfully!")
            }
            Err(e) => self.console.say(format!("Error: {e}. Changes not applied.")),
        }
    }

    /// `None` for a blank answer or exhausted input.
    fn ask_optional(&mut self, label: &str) -> io::Result<Option<String>> {
        Ok(self
            .console
            .prompt(label)?
            .filter(|answer| !answer.trim().is_empty()))
    }

    fn delete(&mut self, manager: UserKey) -> io::Result<()> {
        self.console.say("\n=== Delete Event ===")?;
        let keys = self.created_keys(manager);
        if keys.is_empty() {
            return self.console.say("\nYou haven't created any events yet.");
        }
        let Some(key) = self.pick(&keys, DETAILED, "delete")? else {
            return Ok(());
        };
        let title = self.registry.event(key).title().to_string();
        match self.registry.delete_event(manager, &title) {
            Ok(_) => {
                self.save()?;
                self.console
                    .say(format!("\nEvent '{title}' deleted successfully!"))
            }
            Err(e) => self.console.say(format!("Error: {e}")),
        }
    }

    fn view_volunteers(&mut self, manager: UserKey) -> io::Result<()> {
        self.console.say("\n=== View Volunteers for Event ===")?;
        let keys = self.created_keys(manager);
        if keys.is_empty() {
            return self.console.say("\nYou haven't created any events yet.");
        }
        let Some(key) = self.pick(&keys, DETAILED, "view volunteers for")? else {
            return Ok(());
        };
        let title = self.registry.event(key).title().to_string();
        let names: Vec<String> = match self.registry.event_volunteers(manager, &title) {
            Ok(roster) => roster.iter().map(|e| e.name.clone()).collect(),
            Err(e) => return self.console.say(format!("Error: {e}")),
        };
        self.console.say(format!("\nVolunteers for '{title}':"))?;
        if names.is_empty() {
            return self.console.say("No volunteers have joined this event yet.");
        }
        for name in names {
            self.console.say(format!("- {name}"))?;
        }
        Ok(())
    }

    // ── LGU ─────────────────────────────────────────────────────────

    fn lgu_menu(&mut self, lgu: UserKey) -> io::Result<()> {
        loop {
            self.console.say("\n--- LGU Menu ---")?;
            self.console.say("[1] View Pending Events")?;
            self.console.say("[2] Approve Event")?;
            self.console.say("[3] Deny Event")?;
            self.console.say("[4] View All Approved Events")?;
            self.console.say("[5] View Denied Events")?;
            self.console.say("[6] Logout")?;
            let Some(choice) = self.console.prompt("Choose an option: ")? else {
                return Ok(());
            };
            let columns = Role::Lgu.view_columns();
            match choice.trim() {
                "1" => {
                    self.console.say("\n=== Pending Events ===")?;
                    let keys = self.registry.pending_keys().to_vec();
                    if keys.is_empty() {
                        self.console.say("No pending events.")?;
                    } else {
                        self.show(&keys, TableOptions::plain(columns))?;
                    }
                }
                "2" => self.decide(lgu, true)?,
                "3" => self.decide(lgu, false)?,
                "4" => {
                    self.console.say("\n=== All Approved Events ===")?;
                    let keys = self.registry.viewable(Role::Lgu, self.now());
                    self.show(&keys, TableOptions::plain(columns))?;
                }
                "5" => {
                    self.console.say("\n=== Denied Events ===")?;
                    let keys = self.registry.denied_keys().to_vec();
                    if keys.is_empty() {
                        self.console.say("No denied events.")?;
                    } else {
                        self.show(&keys, TableOptions::plain(columns))?;
                    }
                }
                "6" => return Ok(()),
                _ => self.console.say("Invalid option. Try again.")?,
            }
        }
    }

    fn decide(&mut self, lgu: UserKey, approve: bool) -> io::Result<()> {
        let action = if approve { "approve" } else { "deny" };
        self.console
            .say(format!("\n=== {} Event ===", if approve { "Approve" } else { "Deny" }))?;
        let keys = self.registry.pending_keys().to_vec();
        if keys.is_empty() {
            return self
                .console
                .say(format!("No pending events to {action}."));
        }
        let Some(key) = self.pick(&keys, Role::Lgu.view_columns(), action)? else {
            return Ok(());
        };
        let title = self.registry.event(key).title().to_string();
        let outcome = if approve {
            self.registry.approve_event(lgu, &title)
        } else {
            self.registry.deny_event(lgu, &title)
        };
        match outcome {
            Ok(_) => {
                self.save()?;
                self.console.say(if approve {
                    "Event approved!"
                } else {
                    "Event denied!"
                })
            }
            Err(e) => self
                .console
                .say(format!("Event not found or not pending: {e}")),
        }
    }
}
