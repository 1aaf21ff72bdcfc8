// src/models.rs

use serde::{Deserialize, Serialize};

// --- SNAPSHOT MODELS ---
// These are what gets written to the durable snapshot files. The CLI store
// encodes them as YAML, the server store as JSON; the logical schema is the
// same on both sides.

/// A single runnable location within a project.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Language of the code at `path`; decides the launch command.
    #[serde(default)]
    pub language: String,
    /// Filesystem location of the environment's runnable code.
    pub path: String,
}

/// A named unit grouping one or more environments.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Assigned once at creation as `count of existing projects + 1`,
    /// never reassigned.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_microservice: bool,
    #[serde(default)]
    pub environments: Vec<EnvironmentConfig>,
}

/// Root configuration of a devkit process: scalar settings plus the ordered
/// project list. One instance exists per process, loaded at startup and
/// owned by the [`ConfigStore`](crate::core::store::ConfigStore).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub pprof_enabled: bool,
    #[serde(default)]
    pub pprof_addr: String,
    #[serde(default)]
    pub log_format: String,
    /// Path to the kubeconfig file. Only used if the API does not provide one.
    #[serde(default)]
    pub kubeconfig: String,
    /// Gate flag set by `devkit init check`; mutating commands require it.
    #[serde(default)]
    pub checked_tools: bool,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    /// Name of the command currently executing. Runtime-only, never
    /// serialized into a snapshot.
    #[serde(skip)]
    pub current_cmd: String,
}

impl GlobalConfig {
    /// Creates the compiled-in default configuration. This is what gets
    /// materialized as the first snapshot on a fresh machine.
    pub fn new() -> Self {
        Self {
            debug: false,
            pprof_enabled: false,
            pprof_addr: "localhost:6060".to_string(),
            log_format: "text".to_string(),
            kubeconfig: String::new(),
            checked_tools: false,
            projects: Vec::new(),
            current_cmd: String::new(),
        }
    }

    /// Copies out the scalar settings fields (everything except the
    /// project list).
    pub fn settings(&self) -> GlobalSettings {
        GlobalSettings {
            debug: self.debug,
            pprof_enabled: self.pprof_enabled,
            pprof_addr: self.pprof_addr.clone(),
            log_format: self.log_format.clone(),
            kubeconfig: self.kubeconfig.clone(),
            checked_tools: self.checked_tools,
            current_cmd: self.current_cmd.clone(),
        }
    }

    /// Wholesale-replaces the scalar settings fields, leaving the project
    /// list untouched.
    pub fn apply_settings(&mut self, settings: GlobalSettings) {
        self.debug = settings.debug;
        self.pprof_enabled = settings.pprof_enabled;
        self.pprof_addr = settings.pprof_addr;
        self.log_format = settings.log_format;
        self.kubeconfig = settings.kubeconfig;
        self.checked_tools = settings.checked_tools;
        self.current_cmd = settings.current_cmd;
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self::new()
    }
}

// --- WIRE MODELS ---

/// The scalar half of [`GlobalConfig`], exchanged over the remote interface
/// by the get/update global config calls.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalSettings {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub pprof_enabled: bool,
    #[serde(default)]
    pub pprof_addr: String,
    #[serde(default)]
    pub log_format: String,
    #[serde(default)]
    pub kubeconfig: String,
    #[serde(default)]
    pub checked_tools: bool,
    #[serde(default)]
    pub current_cmd: String,
}
