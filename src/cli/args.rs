// src/cli/args.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::DEFAULT_LISTEN_ADDR;

const ROOT_HELP: &str = "\
DevKit is a command-line tool designed to simplify the setup of development
environments. It provides a streamlined process for configuring tools,
dependencies, and project structures to help developers get started quickly
and efficiently.

Features:
- Easy installation of required tools
- Configuration of project settings, supporting microservices architecture
- Management of dependencies

Run 'devkit init' to start setting up your development environment.
Run 'devkit help' for more information on available commands and options.";

/// DevKit, prepared by Dev for Dev.
#[derive(Parser, Debug)]
#[command(name = "devkit", version, about = "DevKit, prepared by Dev for Dev", long_about = ROOT_HELP)]
pub struct Cli {
    /// Path to a configuration file overriding ~/.dev-kit/config.yaml.
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the configuration file and manage resources.
    Init {
        #[command(subcommand)]
        command: Option<InitCommands>,
    },
    /// Run an environment or a whole project.
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum InitCommands {
    /// Create a new project with the basic configuration.
    Project,
    /// Create a new environment under an existing project.
    Env {
        /// Create the environment through the configuration service
        /// instead of the local store.
        #[arg(long, short)]
        server: bool,

        /// Address of the configuration service.
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        addr: String,
    },
    /// Check that all needed tools are installed and record the result.
    Check,
}

#[derive(Subcommand, Debug)]
pub enum RunCommands {
    /// Run a single environment of the first project.
    Env {
        /// Index of the environment to run.
        #[arg(long, short, default_value_t = 0)]
        id: usize,
    },
    /// Run every environment of the first project concurrently.
    Project,
}
