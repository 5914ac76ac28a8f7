//! # bayanihan-cli
//!
//! Console front end for the Bayanihan volunteer hub.
//!
//! - [`app`]: the session loop with the main menu and the role menus
//! - [`console`]: prompts over any `BufRead` / `Write` pair
//! - [`parse`]: typed input parsing with [`ParseError`]
//! - [`table`]: event tables with truncated columns

#![deny(unsafe_code)]

pub mod app;
pub mod console;
pub mod parse;
pub mod table;

use bayanihan_settings::HubSettings;
use bayanihan_store::StorePaths;

pub use app::{App, local_now};
pub use console::Console;
pub use parse::ParseError;

/// Store locations named by the settings.
pub fn store_paths(settings: &HubSettings) -> StorePaths {
    StorePaths {
        users: settings.users_path(),
        approved: settings.approved_path(),
        pending: settings.pending_path(),
        denied: settings.denied_path(),
    }
}
