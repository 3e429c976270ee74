//! Global (per-user) configuration: the access key used against the remote
//! service. Lives in the standard config directory, overridable for tests
//! and unusual setups via an environment variable.

use std::path::PathBuf;
use std::{env, fs};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the global config path.
pub const GLOBAL_CONFIG_PATH_ENV: &str = "CONTRAIL_CONFIG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
}

impl GlobalConfig {
    /// Read the global config, falling back to defaults when the file is
    /// missing or unparsable.
    pub fn load() -> Self {
        let path = default_global_config_path();
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|error| {
                warn!(path = %path.display(), %error, "Failed to parse global config; using defaults");
                GlobalConfig::default()
            }),
            Err(_) => GlobalConfig::default(),
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = default_global_config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

/// Get the default path for the global configuration file.
pub fn default_global_config_path() -> PathBuf {
    if let Ok(path) = env::var(GLOBAL_CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contrail")
        .join("config.json")
}
