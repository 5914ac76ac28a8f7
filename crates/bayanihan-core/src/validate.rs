//! Input validation for event creation and editing.
//!
//! The engine trusts its inputs; these checks run in the interactive layer
//! before `create_event` / `edit_event` are called.

use chrono::NaiveDateTime;

use crate::errors::ValidationError;
use crate::event::EventDetails;

/// Unvalidated event fields as collected from a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDraft {
    /// Proposed title.
    pub title: String,
    /// Proposed description.
    pub description: String,
    /// Proposed location.
    pub location: String,
    /// Proposed event date.
    pub date: NaiveDateTime,
    /// Proposed registration deadline.
    pub deadline: NaiveDateTime,
    /// Proposed capacity, signed so that negative input can be reported.
    pub max_volunteers: i64,
}

impl EventDraft {
    /// Start a draft from an existing event's fields (used by edits).
    pub fn from_details(details: &EventDetails) -> Self {
        Self {
            title: details.title.clone(),
            description: details.description.clone(),
            location: details.location.clone(),
            date: details.date,
            deadline: details.deadline,
            max_volunteers: i64::from(details.max_volunteers),
        }
    }

    /// Rules for a new event: deadline strictly before the date, both in the
    /// future, positive capacity and non-blank text fields.
    pub fn validate(self, now: NaiveDateTime) -> Result<EventDetails, ValidationError> {
        if self.deadline >= self.date {
            return Err(ValidationError::DeadlineNotBeforeDate);
        }
        if self.date <= now || self.deadline <= now {
            return Err(ValidationError::NotInFuture);
        }
        let max_volunteers = capacity(self.max_volunteers)?;
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(EventDetails {
            title: self.title,
            description: self.description,
            location: self.location,
            date: self.date,
            deadline: self.deadline,
            max_volunteers,
        })
    }

    /// Rules for an edit: deadline before the date and positive capacity.
    /// Dates already in the past are accepted.
    pub fn validate_edit(self) -> Result<EventDetails, ValidationError> {
        if self.deadline >= self.date {
            return Err(ValidationError::DeadlineNotBeforeDate);
        }
        let max_volunteers = capacity(self.max_volunteers)?;
        Ok(EventDetails {
            title: self.title,
            description: self.description,
            location: self.location,
            date: self.date,
            deadline: self.deadline,
            max_volunteers,
        })
    }
}

fn capacity(raw: i64) -> Result<u32, ValidationError> {
    u32::try_from(raw)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ValidationError::InvalidCapacity)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
