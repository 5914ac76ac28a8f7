//! # bayanihan-store
//!
//! Flat JSON persistence for the volunteer hub.
//!
//! State lives in four independent documents, each a JSON array:
//!
//! | Document              | Records          |
//! |-----------------------|------------------|
//! | `users.json`          | [`UserRecord`]   |
//! | `events.json`         | approved [`EventRecord`]s |
//! | `pending_events.json` | pending [`EventRecord`]s  |
//! | `denied_events.json`  | denied [`EventRecord`]s   |
//!
//! Loading is best-effort per document: a missing, unreadable or malformed
//! file yields an empty collection and a warning, never an abort. Saving
//! writes all four documents from a [`Snapshot`].
//!
//! Records hold weak references (titles), never rosters or live links; the
//! engine rebuilds those on load.

#![deny(unsafe_code)]

pub mod error;
pub mod file_store;
pub mod records;

pub use error::{Result, StoreError};
pub use file_store::{JsonStore, StorePaths};
pub use records::{EventRecord, Snapshot, UserRecord};
