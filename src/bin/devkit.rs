// src/bin/devkit.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use devkit::cli::args::{Cli, Commands, InitCommands, RunCommands};
use devkit::cli::handlers;
use devkit::core::persistence;
use devkit::core::store::ConfigStore;

/// The main entry point of the `devkit` application.
/// It sets up logging, resolves the configuration store, dispatches to the
/// correct handler, and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// The main application dispatcher.
///
/// Every invocation resolves one configuration store (explicit `--config`
/// override or the per-user default, created on first run) and hands it to
/// the command's handler.
fn run_cli(cli: Cli) -> Result<()> {
    let (config, file) = persistence::load_with_override(cli.config.as_deref())?;
    let mut store = ConfigStore::from_parts(config, file);

    let Some(command) = cli.command else {
        // The bare root command prints help.
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init { command: None } => {
            store.set_current_command("init");
            handlers::init::handle(&store)
        }
        Commands::Init {
            command: Some(InitCommands::Project),
        } => {
            store.set_current_command("init project");
            handlers::project::handle(&mut store)
        }
        Commands::Init {
            command: Some(InitCommands::Env { server, addr }),
        } => {
            store.set_current_command("init env");
            handlers::environment::handle(&mut store, server, &addr)
        }
        Commands::Init {
            command: Some(InitCommands::Check),
        } => {
            store.set_current_command("init check");
            handlers::check::handle(&mut store)
        }
        Commands::Run {
            command: RunCommands::Env { id },
        } => {
            store.set_current_command("run env");
            handlers::run::handle_env(&store, id)
        }
        Commands::Run {
            command: RunCommands::Project,
        } => {
            store.set_current_command("run project");
            handlers::run::handle_project(&store)
        }
    }
}
