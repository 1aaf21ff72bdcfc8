// src/server/facade.rs

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::store::{ConfigStore, StoreError};
use crate::models::{EnvironmentConfig, GlobalSettings, ProjectConfig};
use crate::server::proto::{Payload, Request, Response, StatusCode};

/// The remote-procedure wrapper around the configuration store.
///
/// One process-wide reader/writer lock guards the store: read-only queries
/// share the read lock, and every mutation holds the exclusive write lock
/// for the full validate-mutate-persist span. Persistence happens while the
/// write lock is held, so no caller ever observes a state that has been
/// mutated in memory but not yet handed to the snapshot file. Lock
/// acquisition order is whatever the scheduler grants; only mutual
/// exclusion is promised.
#[derive(Debug)]
pub struct ConfigService {
    store: RwLock<ConfigStore>,
}

impl ConfigService {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    // Store operations hold no interior state across a panic boundary, so a
    // poisoned lock still guards a consistent store.
    fn read(&self) -> RwLockReadGuard<'_, ConfigStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConfigStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dispatches one request to the store under the appropriate lock.
    pub fn handle(&self, request: Request) -> Response {
        log::debug!("got the request: {:?}", request);
        match request {
            Request::GetGlobalConfig => self.get_global_config(),
            Request::UpdateGlobalConfig { settings } => self.update_global_config(settings),
            Request::GetProject { project_id } => self.get_project(&project_id),
            Request::UpdateProject {
                project_id,
                project,
            } => self.update_project(&project_id, project),
            Request::ListProjects => self.list_projects(),
            Request::CreateProject {
                name,
                description,
                is_microservice,
            } => self.create_project(&name, &description, is_microservice),
            Request::CreateEnvironment {
                project_id,
                environment,
            } => self.create_environment(&project_id, environment),
        }
    }

    fn get_global_config(&self) -> Response {
        let store = self.read();
        Response::ok(Payload::GlobalConfig {
            settings: store.config().settings(),
            projects: store.config().projects.clone(),
        })
    }

    fn update_global_config(&self, settings: GlobalSettings) -> Response {
        let mut store = self.write();
        match store.update_settings(settings) {
            Ok(()) => Response::ok(Payload::GlobalConfig {
                settings: store.config().settings(),
                projects: store.config().projects.clone(),
            }),
            Err(e) => failure(&e),
        }
    }

    fn get_project(&self, project_id: &str) -> Response {
        let store = self.read();
        match store.project(project_id) {
            Some(project) => Response::ok(Payload::Project(project.clone())),
            None => Response::error(StatusCode::NotFound, "project not found"),
        }
    }

    fn update_project(&self, project_id: &str, project: ProjectConfig) -> Response {
        let mut store = self.write();
        match store.update_project(project_id, project) {
            Ok(updated) => Response::ok(Payload::Project(updated)),
            Err(e) => failure(&e),
        }
    }

    fn list_projects(&self) -> Response {
        let store = self.read();
        Response::ok(Payload::Projects(store.list_projects()))
    }

    fn create_project(&self, name: &str, description: &str, is_microservice: bool) -> Response {
        let mut store = self.write();
        match store.create_project(name, description, is_microservice) {
            Ok(id) => match store.project(&id) {
                Some(project) => Response::ok(Payload::Project(project.clone())),
                None => Response::error(StatusCode::Internal, "created project vanished"),
            },
            Err(e) => failure(&e),
        }
    }

    fn create_environment(&self, project_id: &str, environment: EnvironmentConfig) -> Response {
        let mut store = self.write();
        match store.create_environment(project_id, environment) {
            Ok(()) => Response::empty(),
            Err(e) => failure(&e),
        }
    }
}

/// Maps a store failure to its standardized status outcome.
fn failure(error: &StoreError) -> Response {
    let code = match error {
        StoreError::ProjectNotFound { .. } => StatusCode::NotFound,
        StoreError::DuplicateProject { .. } | StoreError::DuplicateEnvironment { .. } => {
            StatusCode::AlreadyExists
        }
        StoreError::EmptyEnvironmentPath => StatusCode::InvalidArgument,
        StoreError::ToolsNotChecked | StoreError::Persistence(_) => StatusCode::Internal,
    };
    Response::error(code, error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::{ConfigFile, SnapshotFormat};
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};

    fn service() -> (TempDir, Arc<ConfigService>) {
        let dir = tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.json"), SnapshotFormat::Json);
        let store = ConfigStore::open(file).unwrap();
        (dir, Arc::new(ConfigService::new(store)))
    }

    fn create_project(service: &ConfigService, name: &str) -> Response {
        service.handle(Request::CreateProject {
            name: name.to_string(),
            description: String::new(),
            is_microservice: false,
        })
    }

    #[test]
    fn get_global_config_reports_the_defaults() {
        let (_dir, service) = service();

        let response = service.handle(Request::GetGlobalConfig);
        assert_eq!(response.code, StatusCode::Ok);
        let Some(Payload::GlobalConfig { settings, projects }) = response.payload else {
            panic!("expected a global config payload");
        };
        assert!(!settings.checked_tools);
        assert_eq!(settings.pprof_addr, "localhost:6060");
        assert!(projects.is_empty());
    }

    #[test]
    fn unknown_project_maps_to_not_found() {
        let (_dir, service) = service();

        let response = service.handle(Request::GetProject {
            project_id: "9".to_string(),
        });
        assert_eq!(response.code, StatusCode::NotFound);
    }

    #[test]
    fn duplicate_environment_maps_to_already_exists() {
        let (_dir, service) = service();
        create_project(&service, "Sample");

        let request = Request::CreateEnvironment {
            project_id: "1".to_string(),
            environment: EnvironmentConfig {
                name: "dev".to_string(),
                path: "/tmp/a".to_string(),
                ..EnvironmentConfig::default()
            },
        };
        assert_eq!(service.handle(request.clone()).code, StatusCode::Ok);
        assert_eq!(service.handle(request).code, StatusCode::AlreadyExists);

        let response = service.handle(Request::GetProject {
            project_id: "1".to_string(),
        });
        let Some(Payload::Project(project)) = response.payload else {
            panic!("expected a project payload");
        };
        assert_eq!(project.environments.len(), 1);
    }

    #[test]
    fn empty_environment_path_maps_to_invalid_argument() {
        let (_dir, service) = service();
        create_project(&service, "Sample");

        let response = service.handle(Request::CreateEnvironment {
            project_id: "1".to_string(),
            environment: EnvironmentConfig {
                name: "dev".to_string(),
                ..EnvironmentConfig::default()
            },
        });
        assert_eq!(response.code, StatusCode::InvalidArgument);
    }

    #[test]
    fn update_global_config_echoes_the_new_settings() {
        let (_dir, service) = service();

        let response = service.handle(Request::UpdateGlobalConfig {
            settings: GlobalSettings {
                debug: true,
                log_format: "json".to_string(),
                checked_tools: true,
                ..GlobalSettings::default()
            },
        });

        assert_eq!(response.code, StatusCode::Ok);
        let Some(Payload::GlobalConfig { settings, .. }) = response.payload else {
            panic!("expected a global config payload");
        };
        assert!(settings.debug);
        assert_eq!(settings.log_format, "json");
    }

    #[test]
    fn concurrent_project_creation_yields_sequential_ids() {
        let (_dir, service) = service();
        const WRITERS: usize = 8;

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || create_project(&service, &format!("project-{i}")))
            })
            .collect();

        for handle in handles {
            let response = handle.join().unwrap();
            assert_eq!(response.code, StatusCode::Ok);
        }

        let response = service.handle(Request::ListProjects);
        let Some(Payload::Projects(projects)) = response.payload else {
            panic!("expected a projects payload");
        };
        assert_eq!(projects.len(), WRITERS);

        // The write lock serializes creation: no id is skipped or
        // duplicated.
        let ids: BTreeSet<usize> = projects
            .iter()
            .map(|p| p.id.parse::<usize>().unwrap())
            .collect();
        assert_eq!(ids, (1..=WRITERS).collect::<BTreeSet<_>>());
    }

    #[test]
    fn reads_can_run_while_no_writer_holds_the_lock() {
        let (_dir, service) = service();
        create_project(&service, "api");

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.handle(Request::ListProjects))
            })
            .collect();

        for reader in readers {
            let response = reader.join().unwrap();
            assert_eq!(response.code, StatusCode::Ok);
        }
    }
}
