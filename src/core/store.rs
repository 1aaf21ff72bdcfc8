// src/core/store.rs

use thiserror::Error;

use crate::core::persistence::{ConfigFile, PersistenceError};
use crate::models::{EnvironmentConfig, GlobalConfig, GlobalSettings, ProjectConfig};

/// Represents errors that can occur during operations on the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A project with the requested name already exists.
    #[error("project with name '{name}' already exists")]
    DuplicateProject {
        /// The conflicting name.
        name: String,
    },
    /// The project already has an environment with the requested name.
    #[error("environment with name '{name}' already exists in project with ID '{project_id}'")]
    DuplicateEnvironment {
        name: String,
        project_id: String,
    },
    /// No project carries the requested id.
    #[error("project with ID '{id}' does not exist")]
    ProjectNotFound { id: String },
    /// An environment was submitted without a path.
    #[error("path cannot be empty")]
    EmptyEnvironmentPath,
    /// The tool check has not been run yet on this machine.
    #[error(
        "tools are not checked, start with \"devkit init check\" so that this tool can confirm all needed tools"
    )]
    ToolsNotChecked,
    /// The snapshot file could not be read or written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

type StoreResult<T> = Result<T, StoreError>;

/// The canonical in-memory configuration plus the snapshot file it persists
/// to.
///
/// Constructed once at startup and passed by handle to everything that needs
/// it. Every mutating operation validates before touching any field (no
/// partial mutation on failure) and ends with a full-snapshot persist. A
/// persist failure is reported to the caller but leaves the in-memory state
/// already mutated; the next successful mutation writes it out.
#[derive(Debug)]
pub struct ConfigStore {
    config: GlobalConfig,
    file: ConfigFile,
}

impl ConfigStore {
    /// Opens the store over a snapshot file, materializing the default
    /// snapshot on first run.
    pub fn open(file: ConfigFile) -> StoreResult<Self> {
        let config = file.load_or_init()?;
        Ok(Self { config, file })
    }

    /// Wraps an already-loaded configuration and its snapshot file.
    pub fn from_parts(config: GlobalConfig, file: ConfigFile) -> Self {
        Self { config, file }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// The snapshot file this store persists to.
    pub fn snapshot_path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Read-only lookup of a project by id.
    pub fn project(&self, id: &str) -> Option<&ProjectConfig> {
        self.config.projects.iter().find(|p| p.id == id)
    }

    /// Returns a snapshot copy of all projects.
    pub fn list_projects(&self) -> Vec<ProjectConfig> {
        self.config.projects.clone()
    }

    // Ids are `count + 1`, assigned once at creation. Monotonic only while
    // projects cannot be deleted.
    fn next_project_id(&self) -> String {
        (self.config.projects.len() + 1).to_string()
    }

    /// Appends a new project and persists the snapshot.
    pub fn create_project(
        &mut self,
        name: &str,
        description: &str,
        is_microservice: bool,
    ) -> StoreResult<String> {
        if self.config.projects.iter().any(|p| p.name == name) {
            return Err(StoreError::DuplicateProject {
                name: name.to_string(),
            });
        }

        let id = self.next_project_id();
        self.config.projects.push(ProjectConfig {
            id: id.clone(),
            name: name.to_string(),
            description: description.to_string(),
            is_microservice,
            environments: Vec::new(),
        });
        log::debug!("Created project '{}' with id {}.", name, id);

        self.file.persist(&self.config)?;
        Ok(id)
    }

    /// Appends a new environment to the project with `project_id` and
    /// persists the snapshot.
    pub fn create_environment(
        &mut self,
        project_id: &str,
        environment: EnvironmentConfig,
    ) -> StoreResult<()> {
        let Some(project) = self.config.projects.iter_mut().find(|p| p.id == project_id) else {
            return Err(StoreError::ProjectNotFound {
                id: project_id.to_string(),
            });
        };

        if project
            .environments
            .iter()
            .any(|e| e.name == environment.name)
        {
            return Err(StoreError::DuplicateEnvironment {
                name: environment.name,
                project_id: project_id.to_string(),
            });
        }

        if environment.path.is_empty() {
            return Err(StoreError::EmptyEnvironmentPath);
        }

        project.environments.push(environment);
        self.file.persist(&self.config)?;
        Ok(())
    }

    /// Replaces a project record wholesale, environments included, and
    /// persists the snapshot.
    ///
    /// The stored id is kept regardless of what the incoming record
    /// carries: ids are assigned once and never reassigned.
    pub fn update_project(
        &mut self,
        project_id: &str,
        mut project: ProjectConfig,
    ) -> StoreResult<ProjectConfig> {
        let Some(pos) = self.config.projects.iter().position(|p| p.id == project_id) else {
            return Err(StoreError::ProjectNotFound {
                id: project_id.to_string(),
            });
        };

        project.id = project_id.to_string();
        let updated = project.clone();
        if let Some(slot) = self.config.projects.get_mut(pos) {
            *slot = project;
        }

        self.file.persist(&self.config)?;
        Ok(updated)
    }

    /// Wholesale-replaces the scalar settings fields and persists the
    /// snapshot.
    pub fn update_settings(&mut self, settings: GlobalSettings) -> StoreResult<()> {
        self.config.apply_settings(settings);
        self.file.persist(&self.config)?;
        Ok(())
    }

    /// Records a completed tool check and persists the gate flag.
    pub fn mark_tools_checked(&mut self) -> StoreResult<()> {
        self.config.checked_tools = true;
        self.file.persist(&self.config)?;
        Ok(())
    }

    /// Precondition gate: mutating CLI commands require a prior successful
    /// `devkit init check`.
    pub fn ensure_tools_checked(&self) -> StoreResult<()> {
        if !self.config.checked_tools {
            return Err(StoreError::ToolsNotChecked);
        }
        Ok(())
    }

    /// Records the command currently executing. Runtime-only; never
    /// persisted.
    pub fn set_current_command(&mut self, name: &str) {
        self.config.current_cmd = name.to_string();
    }
}
