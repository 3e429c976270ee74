use std::path::PathBuf;

use dirs_next::home_dir;

mod global_config;
mod project_config;

pub use global_config::{GLOBAL_CONFIG_PATH_ENV, GlobalConfig, default_global_config_path};
pub use project_config::{ExportNetwork, PROJECT_CONFIG_FILE_NAME, ProjectConfig, ProjectConfigError};

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Split a comma-separated network ID list into individual IDs.
///
/// Spaces are stripped, an empty input yields an empty list, and a single
/// value without a comma passes through unchanged.
pub fn parse_network_ids(network_ids: &str) -> Vec<String> {
    if network_ids.is_empty() {
        return Vec::new();
    }

    if !network_ids.contains(',') {
        return vec![network_ids.to_string()];
    }

    network_ids
        .replace(' ', "")
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_network_ids_yield_empty_list() {
        assert!(parse_network_ids("").is_empty());
    }

    #[test]
    fn single_network_id_passes_through() {
        assert_eq!(parse_network_ids("42"), vec!["42".to_string()]);
    }

    #[test]
    fn comma_separated_ids_are_split_and_trimmed() {
        assert_eq!(
            parse_network_ids("1, 3,42"),
            vec!["1".to_string(), "3".to_string(), "42".to_string()]
        );
    }
}
