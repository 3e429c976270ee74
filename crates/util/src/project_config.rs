//! Project-scoped configuration for the Contrail CLI.
//!
//! Each project directory carries a `contrail.yaml` recording the resolved
//! deployment provider, the remote project slug, and any exported-network
//! definitions. The file is read leniently (a missing or unparsable file
//! falls back to defaults) and written atomically enough for a CLI: full
//! serialize, single `fs::write`. Interior mutability keeps the store usable
//! behind a shared reference, mirroring how other invocations read and write
//! it within a single resolution.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use contrail_types::ProviderKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Filename of the per-project configuration file.
pub const PROJECT_CONFIG_FILE_NAME: &str = "contrail.yaml";

/// Error surfaced when reading or writing the project configuration fails.
#[derive(Debug, Error)]
pub enum ProjectConfigError {
    /// I/O failure (for example, permissions or a read-only project dir).
    #[error("project config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("project config serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

/// An exported network definition, written by `contrail export init`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportNetwork {
    pub rpc_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forked_network: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProjectConfigPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_slug: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    exports: BTreeMap<String, ExportNetwork>,
}

/// YAML-backed project configuration store.
#[derive(Debug, Default)]
pub struct ProjectConfig {
    path: PathBuf,
    payload: Mutex<ProjectConfigPayload>,
    persist_to_disk: bool,
}

impl ProjectConfig {
    /// Load the configuration for the project rooted at `project_dir`.
    ///
    /// A missing file yields defaults; an unparsable file is reported and
    /// also yields defaults so that a stray edit never bricks the CLI.
    pub fn load(project_dir: &Path) -> Result<Self, ProjectConfigError> {
        let path = project_dir.join(PROJECT_CONFIG_FILE_NAME);
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store that never touches the filesystem.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(ProjectConfigPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path of the underlying YAML file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted provider choice, if one is recorded and recognized.
    pub fn provider(&self) -> Option<ProviderKind> {
        let payload = self.payload.lock().expect("project config lock poisoned");
        let raw = payload.provider.as_deref()?;
        match raw.parse() {
            Ok(kind) => Some(kind),
            Err(error) => {
                warn!(%error, "ignoring unrecognized provider in project config");
                None
            }
        }
    }

    /// Record the resolved provider choice.
    pub fn set_provider(&self, kind: ProviderKind) -> Result<(), ProjectConfigError> {
        self.update(|payload| payload.provider = Some(kind.as_str().to_string()))
    }

    pub fn project_slug(&self) -> Option<String> {
        self.payload.lock().expect("project config lock poisoned").project_slug.clone()
    }

    pub fn set_project_slug(&self, slug: &str) -> Result<(), ProjectConfigError> {
        self.update(|payload| payload.project_slug = Some(slug.to_string()))
    }

    /// Look up an exported network definition by name.
    pub fn export_network(&self, name: &str) -> Option<ExportNetwork> {
        self.payload
            .lock()
            .expect("project config lock poisoned")
            .exports
            .get(name)
            .cloned()
    }

    /// Record an exported network definition under `name`.
    pub fn set_export_network(&self, name: &str, network: ExportNetwork) -> Result<(), ProjectConfigError> {
        self.update(|payload| {
            payload.exports.insert(name.to_string(), network);
        })
    }

    fn update(&self, mutate: impl FnOnce(&mut ProjectConfigPayload)) -> Result<(), ProjectConfigError> {
        let mut payload = self.payload.lock().expect("project config lock poisoned");
        mutate(&mut payload);
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    fn save_locked(&self, payload: &ProjectConfigPayload) -> Result<(), ProjectConfigError> {
        let data = serde_yaml::to_string(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn load_payload(path: &Path) -> Result<ProjectConfigPayload, ProjectConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_yaml::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse project config; using defaults"
                );
                Ok(ProjectConfigPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(ProjectConfigPayload::default()),
        Err(error) => Err(ProjectConfigError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.provider().is_none());
        assert!(config.project_slug().is_none());
    }

    #[test]
    fn provider_round_trips_through_yaml() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        config.set_provider(ProviderKind::OpenZeppelin).unwrap();

        let reloaded = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.provider(), Some(ProviderKind::OpenZeppelin));
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE_NAME), "provider: [not: valid").unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.provider().is_none());
    }

    #[test]
    fn unknown_persisted_provider_reads_as_absent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE_NAME), "provider: brownie\n").unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.provider().is_none());
    }

    #[test]
    fn export_networks_round_trip() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        let network = ExportNetwork {
            rpc_address: "127.0.0.1:8545".into(),
            forked_network: Some("Mainnet".into()),
        };
        config.set_export_network("staging", network.clone()).unwrap();

        let reloaded = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.export_network("staging"), Some(network));
        assert!(reloaded.export_network("production").is_none());
    }

    #[test]
    fn ephemeral_store_never_writes() {
        let config = ProjectConfig::ephemeral();
        config.set_provider(ProviderKind::Hardhat).unwrap();
        assert_eq!(config.provider(), Some(ProviderKind::Hardhat));
        assert_eq!(config.path(), Path::new(""));
    }
}
