//! # bayanihan
//!
//! Volunteer hub console binary: loads settings, initialises logging,
//! rehydrates the registry from the JSON store and runs the menus.

#![deny(unsafe_code)]

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bayanihan_cli::{App, Console, local_now, store_paths};
use bayanihan_core::logging::init_subscriber;
use bayanihan_engine::rehydrate;
use bayanihan_settings::{HubSettings, load_settings_from_path, settings_path};
use bayanihan_store::JsonStore;

/// Bayanihan volunteer hub.
#[derive(Parser, Debug)]
#[command(name = "bayanihan", about = "Bayanihan volunteer event hub")]
struct Cli {
    /// Directory holding the JSON data files (overrides settings).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Settings file to read instead of `~/.bayanihan/settings.json`.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset (overrides settings).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(&self, settings: &mut HubSettings) {
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Settings first: the log level comes from them.
    let path = args.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings_from_path(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    args.apply(&mut settings);

    init_subscriber(&settings.logging.level);
    tracing::info!(data_dir = %settings.data_dir, "starting bayanihan");

    let store = JsonStore::new(store_paths(&settings));
    let registry = rehydrate(store.load(), local_now());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(registry, store, Console::new(stdin.lock(), stdout.lock()));
    app.run().context("Console session failed")?;
    Ok(())
}
