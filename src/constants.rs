// src/constants.rs

/// The hidden directory holding devkit state inside the user's home.
pub const DEVKIT_DIR: &str = ".dev-kit";

/// The name of the CLI snapshot file (inside ~/.dev-kit/).
pub const CONFIG_FILENAME: &str = "config.yaml";

/// The name of the server snapshot file, relative to the server's working
/// directory.
pub const SERVER_CONFIG_FILENAME: &str = "config.json";

/// The default listen address of the configuration service.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50051";
