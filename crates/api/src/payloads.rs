//! Request and response payloads for the Contrail API.
//!
//! Responses carry an optional error envelope alongside their data; callers
//! must check it before trusting the body. The canonical compiler payload
//! ([`contrail_types::ConfigPayload`]) is produced elsewhere and travels
//! inside contract-upload requests unchanged.

use contrail_types::ConfigPayload;
use serde::{Deserialize, Serialize};

/// Error envelope returned by the remote service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Access rights the authenticated account holds on a shared project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPermissions {
    #[serde(default)]
    pub add_contract: bool,
}

/// A project as reported by the remote service.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub permissions: Option<ProjectPermissions>,
}

/// Body of a project-creation request.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectResponse {
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// A public network that exported transactions can declare as their fork
/// origin.
#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NetworksResponse {
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Body of a contract-upload request: sources plus the normalized compiler
/// configuration, when the project's tool provided one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadContractsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub network_ids: Vec<String>,
}
