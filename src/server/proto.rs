// src/server/proto.rs

// The stable request/response contract of the configuration service.
// Messages travel as one JSON object per line in both directions.

use serde::{Deserialize, Serialize};

use crate::models::{EnvironmentConfig, GlobalSettings, ProjectConfig};

/// A call against the configuration service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Request {
    GetGlobalConfig,
    UpdateGlobalConfig {
        settings: GlobalSettings,
    },
    GetProject {
        project_id: String,
    },
    UpdateProject {
        project_id: String,
        project: ProjectConfig,
    },
    ListProjects,
    CreateProject {
        name: String,
        description: String,
        is_microservice: bool,
    },
    CreateEnvironment {
        project_id: String,
        environment: EnvironmentConfig,
    },
}

/// Standardized outcome of a remote call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Ok,
    NotFound,
    AlreadyExists,
    InvalidArgument,
    Internal,
}

/// Payload carried by a successful response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    GlobalConfig {
        settings: GlobalSettings,
        projects: Vec<ProjectConfig>,
    },
    Project(ProjectConfig),
    Projects(Vec<ProjectConfig>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response {
    pub code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Response {
    pub fn ok(payload: Payload) -> Self {
        Self {
            code: StatusCode::Ok,
            message: None,
            payload: Some(payload),
        }
    }

    /// A successful response with no payload.
    pub fn empty() -> Self {
        Self {
            code: StatusCode::Ok,
            message: None,
            payload: None,
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            payload: None,
        }
    }
}
