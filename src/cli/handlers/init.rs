// src/cli/handlers/init.rs

use anyhow::Result;
use colored::Colorize;

use crate::core::store::ConfigStore;

/// The main handler for the bare `init` command.
///
/// The default snapshot is materialized during startup config resolution,
/// so by the time this runs the file exists; the handler confirms where it
/// lives and points at the next steps.
pub fn handle(store: &ConfigStore) -> Result<()> {
    println!(
        "Configuration ready at '{}'.",
        store.snapshot_path().display()
    );
    println!(
        "Run '{}' to verify your tools, then '{}' to create your first project.",
        "devkit init check".cyan(),
        "devkit init project".cyan()
    );
    Ok(())
}
