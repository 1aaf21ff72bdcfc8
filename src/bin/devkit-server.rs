// src/bin/devkit-server.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use devkit::constants::DEFAULT_LISTEN_ADDR;
use devkit::core::persistence::{ConfigFile, SnapshotFormat};
use devkit::core::store::ConfigStore;
use devkit::server::facade::ConfigService;
use devkit::server::service;
use std::path::PathBuf;
use std::sync::Arc;

/// The devkit configuration service: exposes the configuration store to
/// out-of-process callers over TCP.
///
/// The service keeps its own JSON snapshot, independent of any CLI-local
/// file; the two stores are never reconciled.
#[derive(Parser, Debug)]
#[command(name = "devkit-server", version, about = "Remote configuration service for devkit")]
struct ServerArgs {
    /// Path to the JSON snapshot file (defaults to ./config.json).
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(ServerArgs::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run(args: ServerArgs) -> Result<()> {
    let file = match args.config {
        Some(path) => ConfigFile::new(path, SnapshotFormat::Json),
        None => ConfigFile::server_default(),
    };

    let store = ConfigStore::open(file)?;
    let service = Arc::new(ConfigService::new(store));

    service::serve(&args.listen, service).await
}
