//! Error taxonomy for hub operations.
//!
//! Every failure is recoverable: operations return a [`HubError`] and the
//! caller decides whether to retry, report, or move on.

use thiserror::Error;

use crate::user::Role;

/// Errors returned by registry and lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    /// An event with this title already exists in Approved, Pending or Denied.
    #[error("an event titled '{0}' already exists")]
    DuplicateTitle(String),

    /// A lookup by title or email found nothing.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// What was being looked up (`"event"`, `"pending event"`, `"user"`).
        entity: &'static str,
        /// The title or email that failed to resolve.
        key: String,
    },

    /// Caller-supplied input broke a validation rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Login credentials did not match any account.
    #[error("invalid email or password")]
    AuthFailure,

    /// Sign-up with an email that is already registered.
    #[error("an account with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Sign-up requested a role that cannot be self-assigned.
    #[error("cannot sign up as {0}; choose Volunteer or EventManager")]
    RoleNotAllowed(Role),

    /// A role tag that is not one of the known roles.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// The acting user does not hold the role the operation requires.
    #[error("operation requires the {expected} role, user is {actual}")]
    WrongRole {
        /// Role the operation requires.
        expected: Role,
        /// Role the acting user holds.
        actual: Role,
    },
}

impl HubError {
    /// Shorthand for an event lookup miss.
    pub fn event_not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "event",
            key: title.into(),
        }
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::DuplicateTitle(_) => "duplicate_title",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_failure",
            Self::AuthFailure => "auth_failure",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::RoleNotAllowed(_) => "role_not_allowed",
            Self::UnknownRole(_) => "unknown_role",
            Self::WrongRole { .. } => "wrong_role",
        }
    }
}

/// Input rules the interactive layer enforces before calling the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The registration deadline is not strictly before the event date.
    #[error("deadline must be before the event date")]
    DeadlineNotBeforeDate,

    /// The event date or the deadline is not in the future.
    #[error("event date and deadline must be in the future")]
    NotInFuture,

    /// Capacity is zero, negative or too large.
    #[error("maximum volunteers must be a positive whole number")]
    InvalidCapacity,

    /// Email or password left blank at login.
    #[error("please enter both email and password")]
    MissingCredentials,
}

/// Result type for hub operations.
pub type Result<T> = std::result::Result<T, HubError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
