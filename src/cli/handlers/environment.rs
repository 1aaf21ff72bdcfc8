// src/cli/handlers/environment.rs

use anyhow::{Result, bail};
use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};
use std::env;

use crate::core::store::ConfigStore;
use crate::models::EnvironmentConfig;
use crate::server::client;
use crate::server::proto::{Request, StatusCode};

/// The main handler for `init env`: prompts for the environment details and
/// appends it to its project, either in the local store or through the
/// configuration service when `--server` is set.
pub fn handle(store: &mut ConfigStore, use_server: bool, addr: &str) -> Result<()> {
    store.ensure_tools_checked()?;

    let theme = ColorfulTheme::default();

    let project_id: String = Input::with_theme(&theme)
        .with_prompt("Project ID")
        .default("1".to_string())
        .interact_text()?;

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .default("Sample Env".to_string())
        .interact_text()?;

    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    let mut path: String = Input::with_theme(&theme)
        .with_prompt("Path")
        .default("/path/to/env".to_string())
        .interact_text()?;

    // `.` resolves to the current working directory.
    if path.trim() == "." {
        path = env::current_dir()?.display().to_string();
    }

    let environment = EnvironmentConfig {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        language: String::new(),
        path: path.trim().to_string(),
    };

    if use_server {
        let response = client::call(
            addr,
            &Request::CreateEnvironment {
                project_id: project_id.trim().to_string(),
                environment,
            },
        )?;
        match response.code {
            StatusCode::Ok => {
                println!("Environment created successfully on server.");
                Ok(())
            }
            code => bail!(
                "the configuration service refused the request ({:?}): {}",
                code,
                response.message.unwrap_or_default()
            ),
        }
    } else {
        store.create_environment(project_id.trim(), environment)?;
        println!("\n{}", "Success!".green().bold());
        println!("  Environment '{}' added to project {}.", name.trim(), project_id.trim());
        Ok(())
    }
}
