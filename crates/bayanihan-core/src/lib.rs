//! # bayanihan-core
//!
//! Shared vocabulary for the Bayanihan volunteer hub.
//!
//! - **Keys**: [`EventKey`] and [`UserKey`], copyable handles into the registry arenas
//! - **Events**: [`Event`] with its [`EventStatus`], roster and the joinability predicate
//! - **Users**: [`User`] with a role-specific [`Profile`] (Volunteer, Event Manager, LGU)
//! - **Views**: [`viewable_events`], the single role-dispatched event filter
//! - **Validation**: [`EventDraft`] checks the interactive layer runs before mutating
//! - **Errors**: [`HubError`] taxonomy via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` subscriber

#![deny(unsafe_code)]

pub mod errors;
pub mod event;
pub mod ids;
pub mod logging;
pub mod user;
pub mod validate;
pub mod view;

pub use errors::{HubError, Result, ValidationError};
pub use event::{Event, EventDetails, EventStatus, RosterEntry};
pub use ids::{EventKey, UserKey};
pub use user::{
    ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD, ManagerState, Profile, Role, User, VolunteerState,
};
pub use validate::EventDraft;
pub use view::{ViewColumns, is_visible_to, viewable_events};
