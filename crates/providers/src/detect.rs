use std::path::Path;

use tracing::debug;

use crate::descriptor::{PROVIDER_REGISTRY, ProviderDescriptor};

/// Probe `project_root` for every known tool's marker files.
///
/// Returns the candidates in registry (precedence) order, de-duplicated by
/// tool identity: a new-style Truffle marker shadows the legacy one, since
/// both name the same tool. Absent markers are a normal outcome, never an
/// error.
pub fn detect(project_root: &Path) -> Vec<&'static ProviderDescriptor> {
    let mut candidates: Vec<&'static ProviderDescriptor> = Vec::new();

    for descriptor in PROVIDER_REGISTRY {
        if candidates.iter().any(|seen| seen.kind == descriptor.kind) {
            continue;
        }
        match descriptor.first_existing_marker(project_root) {
            Some(path) => {
                debug!(provider = %descriptor.kind, marker = %path.display(), "detected tool marker");
                candidates.push(descriptor);
            }
            None => {
                debug!(provider = %descriptor.kind, "no marker found");
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{
        BUIDLER_CONFIG_FILE, HARDHAT_TS_CONFIG_FILE, NEW_TRUFFLE_CONFIG_FILE, OLD_TRUFFLE_CONFIG_FILE,
        OPENZEPPELIN_CONFIG_FILE,
    };
    use contrail_types::{ConfigKind, ProviderKind};
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "module.exports = {};").unwrap();
    }

    #[test]
    fn empty_directory_yields_no_candidates() {
        let dir = tempdir().unwrap();
        assert!(detect(dir.path()).is_empty());
    }

    #[test]
    fn candidates_follow_registry_precedence() {
        let dir = tempdir().unwrap();
        touch(dir.path(), NEW_TRUFFLE_CONFIG_FILE);
        touch(dir.path(), OPENZEPPELIN_CONFIG_FILE);
        touch(dir.path(), BUIDLER_CONFIG_FILE);

        let kinds: Vec<ProviderKind> = detect(dir.path()).iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![ProviderKind::OpenZeppelin, ProviderKind::Buidler, ProviderKind::Truffle]
        );
    }

    #[test]
    fn new_truffle_marker_shadows_legacy_one() {
        let dir = tempdir().unwrap();
        touch(dir.path(), NEW_TRUFFLE_CONFIG_FILE);
        touch(dir.path(), OLD_TRUFFLE_CONFIG_FILE);

        let candidates = detect(dir.path());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].config_kind, ConfigKind::NewTruffle);
    }

    #[test]
    fn legacy_truffle_is_detected_on_its_own() {
        let dir = tempdir().unwrap();
        touch(dir.path(), OLD_TRUFFLE_CONFIG_FILE);

        let candidates = detect(dir.path());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].config_kind, ConfigKind::OldTruffle);
    }

    #[test]
    fn typescript_hardhat_config_detects_hardhat() {
        let dir = tempdir().unwrap();
        touch(dir.path(), HARDHAT_TS_CONFIG_FILE);

        let candidates = detect(dir.path());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, ProviderKind::Hardhat);
    }
}
