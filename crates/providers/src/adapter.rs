//! Per-tool provider adapters.
//!
//! An adapter carries what the rest of the CLI needs to know about a
//! resolved tool: its identity, the configuration shape its marker file
//! implies, and the tool's conventional source/artifact directories.
//! Construction validates the project layout (the marker must be a regular
//! file); it never reads file contents.

use std::fs;
use std::path::{Path, PathBuf};

use contrail_types::{ConfigKind, ProviderKind};

use crate::error::AdapterError;

/// Marker file of an OpenZeppelin CLI project.
pub const OPENZEPPELIN_CONFIG_FILE: &str = "networks.js";
/// Marker file of a Buidler project.
pub const BUIDLER_CONFIG_FILE: &str = "buidler.config.js";
/// Marker file of a Hardhat project (JavaScript config).
pub const HARDHAT_CONFIG_FILE: &str = "hardhat.config.js";
/// Marker file of a Hardhat project (TypeScript config).
pub const HARDHAT_TS_CONFIG_FILE: &str = "hardhat.config.ts";
/// Marker file of a new-style Truffle project.
pub const NEW_TRUFFLE_CONFIG_FILE: &str = "truffle-config.js";
/// Marker file of a legacy Truffle project.
pub const OLD_TRUFFLE_CONFIG_FILE: &str = "truffle.js";

/// A resolved deployment tool, as consumed by the rest of the CLI.
pub trait ProviderAdapter: std::fmt::Debug {
    fn kind(&self) -> ProviderKind;

    /// Which configuration shape this project's marker file implies.
    fn config_kind(&self) -> ConfigKind;

    /// The marker file this adapter was resolved from, relative to the
    /// project root.
    fn config_file(&self) -> &'static str;

    /// Directory the tool compiles contract sources from.
    fn contracts_dir(&self) -> PathBuf;

    /// Directory the tool writes build artifacts to.
    fn build_dir(&self) -> PathBuf;
}

fn require_regular_file(root: &Path, marker: &str, kind: ProviderKind) -> Result<(), AdapterError> {
    let path = root.join(marker);
    let metadata = fs::metadata(&path).map_err(|_| AdapterError::InvalidLayout {
        kind,
        reason: format!("missing config file {marker}"),
    })?;
    if !metadata.is_file() {
        return Err(AdapterError::InvalidLayout {
            kind,
            reason: format!("{marker} is not a regular file"),
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct TruffleAdapter {
    project_root: PathBuf,
    config_kind: ConfigKind,
    config_file: &'static str,
}

impl TruffleAdapter {
    pub fn new(project_root: &Path, config_kind: ConfigKind) -> Result<Self, AdapterError> {
        let config_file = match config_kind {
            ConfigKind::OldTruffle => OLD_TRUFFLE_CONFIG_FILE,
            _ => NEW_TRUFFLE_CONFIG_FILE,
        };
        require_regular_file(project_root, config_file, ProviderKind::Truffle)?;
        Ok(Self {
            project_root: project_root.to_path_buf(),
            config_kind,
            config_file,
        })
    }
}

impl ProviderAdapter for TruffleAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Truffle
    }

    fn config_kind(&self) -> ConfigKind {
        self.config_kind
    }

    fn config_file(&self) -> &'static str {
        self.config_file
    }

    fn contracts_dir(&self) -> PathBuf {
        self.project_root.join("contracts")
    }

    fn build_dir(&self) -> PathBuf {
        self.project_root.join("build").join("contracts")
    }
}

#[derive(Debug)]
pub struct OpenZeppelinAdapter {
    project_root: PathBuf,
}

impl OpenZeppelinAdapter {
    pub fn new(project_root: &Path) -> Result<Self, AdapterError> {
        require_regular_file(project_root, OPENZEPPELIN_CONFIG_FILE, ProviderKind::OpenZeppelin)?;
        Ok(Self {
            project_root: project_root.to_path_buf(),
        })
    }
}

impl ProviderAdapter for OpenZeppelinAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenZeppelin
    }

    fn config_kind(&self) -> ConfigKind {
        ConfigKind::OpenZeppelin
    }

    fn config_file(&self) -> &'static str {
        OPENZEPPELIN_CONFIG_FILE
    }

    fn contracts_dir(&self) -> PathBuf {
        self.project_root.join("contracts")
    }

    fn build_dir(&self) -> PathBuf {
        self.project_root.join("build").join("contracts")
    }
}

#[derive(Debug)]
pub struct BuidlerAdapter {
    project_root: PathBuf,
}

impl BuidlerAdapter {
    pub fn new(project_root: &Path) -> Result<Self, AdapterError> {
        require_regular_file(project_root, BUIDLER_CONFIG_FILE, ProviderKind::Buidler)?;
        Ok(Self {
            project_root: project_root.to_path_buf(),
        })
    }
}

impl ProviderAdapter for BuidlerAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Buidler
    }

    fn config_kind(&self) -> ConfigKind {
        ConfigKind::Buidler
    }

    fn config_file(&self) -> &'static str {
        BUIDLER_CONFIG_FILE
    }

    fn contracts_dir(&self) -> PathBuf {
        self.project_root.join("contracts")
    }

    fn build_dir(&self) -> PathBuf {
        self.project_root.join("artifacts")
    }
}

#[derive(Debug)]
pub struct HardhatAdapter {
    project_root: PathBuf,
    config_file: &'static str,
}

impl HardhatAdapter {
    pub fn new(project_root: &Path) -> Result<Self, AdapterError> {
        // Either the JS or the TS config qualifies; remember which matched.
        let config_file = if require_regular_file(project_root, HARDHAT_CONFIG_FILE, ProviderKind::Hardhat).is_ok() {
            HARDHAT_CONFIG_FILE
        } else {
            require_regular_file(project_root, HARDHAT_TS_CONFIG_FILE, ProviderKind::Hardhat)?;
            HARDHAT_TS_CONFIG_FILE
        };
        Ok(Self {
            project_root: project_root.to_path_buf(),
            config_file,
        })
    }
}

impl ProviderAdapter for HardhatAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Hardhat
    }

    fn config_kind(&self) -> ConfigKind {
        ConfigKind::Hardhat
    }

    fn config_file(&self) -> &'static str {
        self.config_file
    }

    fn contracts_dir(&self) -> PathBuf {
        self.project_root.join("contracts")
    }

    fn build_dir(&self) -> PathBuf {
        self.project_root.join("artifacts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn adapter_construction_requires_marker_file() {
        let dir = tempdir().unwrap();
        assert!(BuidlerAdapter::new(dir.path()).is_err());

        fs::write(dir.path().join(BUIDLER_CONFIG_FILE), "module.exports = {};").unwrap();
        let adapter = BuidlerAdapter::new(dir.path()).unwrap();
        assert_eq!(adapter.kind(), ProviderKind::Buidler);
        assert_eq!(adapter.build_dir(), dir.path().join("artifacts"));
    }

    #[test]
    fn marker_directory_is_rejected() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(NEW_TRUFFLE_CONFIG_FILE)).unwrap();
        let error = TruffleAdapter::new(dir.path(), ConfigKind::NewTruffle).unwrap_err();
        assert!(matches!(error, AdapterError::InvalidLayout { .. }));
    }

    #[test]
    fn hardhat_accepts_typescript_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(HARDHAT_TS_CONFIG_FILE), "export default {};").unwrap();
        let adapter = HardhatAdapter::new(dir.path()).unwrap();
        assert_eq!(adapter.config_kind(), ConfigKind::Hardhat);
    }

    #[test]
    fn truffle_adapter_tracks_its_config_shape() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OLD_TRUFFLE_CONFIG_FILE), "module.exports = {};").unwrap();
        let adapter = TruffleAdapter::new(dir.path(), ConfigKind::OldTruffle).unwrap();
        assert_eq!(adapter.kind(), ProviderKind::Truffle);
        assert_eq!(adapter.config_kind(), ConfigKind::OldTruffle);
    }
}
