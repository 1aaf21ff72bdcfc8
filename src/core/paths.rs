// src/core/paths.rs

use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

use crate::constants::{CONFIG_FILENAME, DEVKIT_DIR};

lazy_static! {
    static ref DEVKIT_HOME: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find the user home directory.")]
    HomeDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the path to the devkit state directory (`~/.dev-kit`).
/// Creates it if it doesn't exist.
///
/// This function is memoized: the first call computes and caches the path,
/// subsequent calls return the cached value instantly.
pub fn get_devkit_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = DEVKIT_HOME.lock().unwrap();

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let devkit_dir = dirs::home_dir()
        .ok_or(PathError::HomeDirNotFound)?
        .join(DEVKIT_DIR);

    if !devkit_dir.exists() {
        fs::create_dir_all(&devkit_dir).map_err(|e| PathError::ConfigDirCreation {
            path: devkit_dir.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(devkit_dir.clone());

    Ok(devkit_dir)
}

/// Returns the path to the default CLI snapshot file
/// (`~/.dev-kit/config.yaml`).
pub fn default_config_path() -> Result<PathBuf, PathError> {
    get_devkit_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
