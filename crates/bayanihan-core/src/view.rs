//! Role-dispatched event views.
//!
//! Each role sees a different slice of the approved list and a different set
//! of columns. Filtering lives here so it can be tested without any console.

use chrono::NaiveDateTime;

use crate::event::Event;
use crate::user::Role;

/// Extra columns a role's event listing shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewColumns {
    /// Show the registration deadline.
    pub deadline: bool,
    /// Show the approval status.
    pub status: bool,
}

impl Role {
    /// Columns this role sees when browsing events.
    pub const fn view_columns(self) -> ViewColumns {
        match self {
            Self::Lgu => ViewColumns {
                deadline: true,
                status: true,
            },
            Self::Volunteer | Self::EventManager => ViewColumns {
                deadline: false,
                status: false,
            },
        }
    }
}

/// Whether `role` sees `event` when browsing.
///
/// Volunteers only see joinable events; managers and the LGU see everything.
pub fn is_visible_to(role: Role, event: &Event, now: NaiveDateTime) -> bool {
    match role {
        Role::Volunteer => event.is_joinable(now),
        Role::EventManager | Role::Lgu => true,
    }
}

/// The events `role` may see out of `events`, in input order.
pub fn viewable_events<'a, I>(role: Role, events: I, now: NaiveDateTime) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| is_visible_to(role, e, now))
        .collect()
}
