// src/core/persistence.rs

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::SERVER_CONFIG_FILENAME;
use crate::core::paths::{self, PathError};
use crate::core::rules::{self, ValidationError};
use crate::models::GlobalConfig;

/// Represents errors that can occur against a durable snapshot file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A filesystem I/O error occurred.
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    /// The state directory could not be resolved or created.
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// The snapshot could not be encoded to or decoded from YAML.
    #[error("Failed to process YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The snapshot could not be encoded to or decoded from JSON.
    #[error("Failed to process JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// A loaded snapshot failed the validation rules.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Encoding used by a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Yaml,
    Json,
}

/// Handle to one durable snapshot file.
///
/// The CLI and the server each hold their own `ConfigFile` (YAML under the
/// user's home vs. JSON in the working directory). The two stores describe
/// the same schema but are never reconciled with each other.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    format: SnapshotFormat,
}

impl ConfigFile {
    pub fn new(path: PathBuf, format: SnapshotFormat) -> Self {
        Self { path, format }
    }

    /// The default CLI-facing snapshot (`~/.dev-kit/config.yaml`), ensuring
    /// the state directory exists.
    pub fn cli_default() -> Result<Self, PersistenceError> {
        Ok(Self::new(paths::default_config_path()?, SnapshotFormat::Yaml))
    }

    /// The server-facing snapshot (`config.json` in the working directory).
    pub fn server_default() -> Self {
        Self::new(PathBuf::from(SERVER_CONFIG_FILENAME), SnapshotFormat::Json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deserializes the snapshot and runs the validation rules over it.
    pub fn load(&self) -> Result<GlobalConfig, PersistenceError> {
        let data = fs::read_to_string(&self.path)?;
        let mut config: GlobalConfig = match self.format {
            SnapshotFormat::Yaml => serde_yaml::from_str(&data)?,
            SnapshotFormat::Json => serde_json::from_str(&data)?,
        };
        rules::validate_and_set_defaults(&mut config)?;
        Ok(config)
    }

    /// Loads the snapshot, materializing the compiled-in defaults as the
    /// first snapshot if the file does not exist yet.
    pub fn load_or_init(&self) -> Result<GlobalConfig, PersistenceError> {
        if !self.exists() {
            log::info!(
                "No snapshot at '{}'. Creating the default configuration.",
                self.path.display()
            );
            let mut config = GlobalConfig::new();
            rules::validate_and_set_defaults(&mut config)?;
            self.persist(&config)?;
            return Ok(config);
        }
        self.load()
    }

    /// Serializes the full configuration and overwrites the snapshot file.
    ///
    /// The write is a plain full-file overwrite: a crash mid-write can
    /// leave a truncated snapshot, and callers tolerate that as a known
    /// risk.
    pub fn persist(&self, config: &GlobalConfig) -> Result<(), PersistenceError> {
        let data = match self.format {
            SnapshotFormat::Yaml => serde_yaml::to_string(config)?,
            SnapshotFormat::Json => {
                let mut encoded = serde_json::to_string_pretty(config)?;
                encoded.push('\n');
                encoded
            }
        };
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Resolves the snapshot for a CLI invocation.
///
/// An explicit `--config` override that exists wins, and also becomes the
/// persist target. A missing override is not fatal: it logs a warning and
/// falls through to the per-user default file, which is created on first
/// run.
pub fn load_with_override(
    explicit: Option<&Path>,
) -> Result<(GlobalConfig, ConfigFile), PersistenceError> {
    if let Some(path) = explicit {
        let file = ConfigFile::new(path.to_path_buf(), SnapshotFormat::Yaml);
        if file.exists() {
            let config = file.load()?;
            return Ok((config, file));
        }
        log::warn!("Configuration file '{}' does not exist.", path.display());
    }

    let file = ConfigFile::cli_default()?;
    let config = file.load_or_init()?;
    Ok((config, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnvironmentConfig, ProjectConfig};
    use tempfile::tempdir;

    fn sample_config() -> GlobalConfig {
        let mut config = GlobalConfig::new();
        config.checked_tools = true;
        config.projects = vec![
            ProjectConfig {
                id: "1".to_string(),
                name: "api".to_string(),
                description: "backend services".to_string(),
                is_microservice: true,
                environments: vec![
                    EnvironmentConfig {
                        name: "dev".to_string(),
                        description: "local loop".to_string(),
                        language: "go".to_string(),
                        path: "/tmp/api/dev".to_string(),
                    },
                    EnvironmentConfig {
                        name: "staging".to_string(),
                        description: String::new(),
                        language: "go".to_string(),
                        path: "/tmp/api/staging".to_string(),
                    },
                ],
            },
            ProjectConfig {
                id: "2".to_string(),
                name: "frontend".to_string(),
                description: String::new(),
                is_microservice: false,
                environments: vec![EnvironmentConfig {
                    name: "dev".to_string(),
                    description: String::new(),
                    language: "node".to_string(),
                    path: "/tmp/frontend".to_string(),
                }],
            },
        ];
        config
    }

    #[test]
    fn yaml_round_trip_is_identical() {
        let dir = tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yaml"), SnapshotFormat::Yaml);

        let config = sample_config();
        file.persist(&config).unwrap();
        let reloaded = file.load().unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn json_round_trip_is_identical() {
        let dir = tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.json"), SnapshotFormat::Json);

        let config = sample_config();
        file.persist(&config).unwrap();
        let reloaded = file.load().unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn load_or_init_materializes_the_default_snapshot() {
        let dir = tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yaml"), SnapshotFormat::Yaml);
        assert!(!file.exists());

        let config = file.load_or_init().unwrap();

        assert!(file.exists());
        assert!(config.projects.is_empty());
        assert!(!config.checked_tools);
        assert_eq!(config.pprof_addr, "localhost:6060");

        // The materialized file loads back to the same state.
        assert_eq!(file.load().unwrap(), config);
    }

    #[test]
    fn persist_overwrites_the_whole_snapshot() {
        let dir = tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.yaml"), SnapshotFormat::Yaml);

        file.persist(&sample_config()).unwrap();
        file.persist(&GlobalConfig::new()).unwrap();

        let reloaded = file.load().unwrap();
        assert!(reloaded.projects.is_empty());
    }

    #[test]
    fn loading_fills_defaults_into_sparse_snapshots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "checked_tools: true\n").unwrap();

        let file = ConfigFile::new(path, SnapshotFormat::Yaml);
        let config = file.load().unwrap();

        assert!(config.checked_tools);
        assert_eq!(config.pprof_addr, "localhost:6060");
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn override_path_wins_when_present() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("override.yaml");
        let file = ConfigFile::new(path.clone(), SnapshotFormat::Yaml);
        file.persist(&sample_config()).unwrap();

        let (config, resolved) = load_with_override(Some(path.as_path())).unwrap();

        assert_eq!(config.projects.len(), 2);
        assert_eq!(resolved.path(), path.as_path());
    }
}
