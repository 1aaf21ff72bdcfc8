// src/cli/handlers/project.rs

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::core::store::ConfigStore;

/// The main handler for `init project`: prompts for the project details and
/// appends the project to the store.
pub fn handle(store: &mut ConfigStore) -> Result<()> {
    store.ensure_tools_checked()?;

    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .default("Sample Project".to_string())
        .interact_text()?;

    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    let is_microservice = Confirm::with_theme(&theme)
        .with_prompt("Is this a microservice architecture?")
        .default(false)
        .interact()?;

    let id = store.create_project(name.trim(), description.trim(), is_microservice)?;

    println!("\n{}", "Success!".green().bold());
    println!("  Project '{}' created with ID {}.", name.trim(), id);
    Ok(())
}
