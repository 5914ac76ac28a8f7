//! # bayanihan-engine
//!
//! The event lifecycle and membership state machine.
//!
//! - [`registry`]: [`EventRegistry`] owns every event and user and the
//!   Approved / Pending / Denied lists, enforcing cross-list title uniqueness
//! - [`lifecycle`]: role-scoped transitions (create, edit, delete, approve,
//!   deny, join, cancel) with capacity and deadline guards
//! - [`rehydrate`]: two-phase load from persisted records, and the inverse
//!   [`snapshot`] for saving
//!
//! Everything is synchronous and single-threaded. Operations that depend on
//! the clock take `now` explicitly.

#![deny(unsafe_code)]

pub mod lifecycle;
pub mod registry;
pub mod rehydrate;

pub use lifecycle::{CancelOutcome, JoinOutcome};
pub use registry::EventRegistry;
pub use rehydrate::{rehydrate, snapshot};
