// src/cli/handlers/run.rs

use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::core::store::ConfigStore;
use crate::models::ProjectConfig;
use crate::system::executor;

fn first_project(store: &ConfigStore) -> Result<&ProjectConfig> {
    store.config().projects.first().ok_or_else(|| {
        anyhow!(
            "no projects configured, create one with '{}'",
            "devkit init project".cyan()
        )
    })
}

/// The main handler for `run env`: runs one environment of the first
/// project, selected by index.
pub fn handle_env(store: &ConfigStore, id: usize) -> Result<()> {
    store.ensure_tools_checked()?;

    let project = first_project(store)?;
    let environment = project.environments.get(id).ok_or_else(|| {
        anyhow!(
            "project '{}' has no environment at index {} ({} configured)",
            project.name,
            id,
            project.environments.len()
        )
    })?;

    executor::run_environment(environment)?;
    Ok(())
}

/// The main handler for `run project`: runs every environment of the first
/// project concurrently and waits for the whole batch.
pub fn handle_project(store: &ConfigStore) -> Result<()> {
    store.ensure_tools_checked()?;

    let project = first_project(store)?;
    if project.environments.is_empty() {
        println!(
            "{}",
            format!("Project '{}' has no environments to run.", project.name).yellow()
        );
        return Ok(());
    }

    executor::run_environments(&project.environments)
}
