//! Raw configuration extraction.
//!
//! Every supported tool configures itself through a JavaScript (or
//! TypeScript) module, so the file cannot be parsed directly. Like the tools
//! themselves, we let `node` evaluate the module and hand back JSON, then
//! deserialize the relevant sections into the shape the marker file implies.

use std::path::Path;
use std::process::Command;

use contrail_types::{ConfigKind, HardhatCompiler, HardhatSolidity, ProviderConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::adapter::ProviderAdapter;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// `node` is not installed or could not be spawned.
    #[error("failed to run node: {0}")]
    NodeUnavailable(#[source] std::io::Error),
    /// The config module failed to evaluate.
    #[error("evaluating {file} failed: {stderr}")]
    Evaluation { file: String, stderr: String },
    #[error("unreadable config in {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Export the resolved tool's configuration module and deserialize it into
/// the raw [`ProviderConfig`] its marker file implies.
pub fn load_raw_config(adapter: &dyn ProviderAdapter, project_root: &Path) -> Result<ProviderConfig, ConfigLoadError> {
    let file = adapter.config_file();
    let exported = export_js_module(project_root, file)?;
    debug!(%file, "exported tool configuration");
    config_from_json(adapter.config_kind(), &exported).map_err(|source| ConfigLoadError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Evaluate a CommonJS module under `project_root` and return its exports.
fn export_js_module(project_root: &Path, file: &str) -> Result<Value, ConfigLoadError> {
    let script = format!("console.log(JSON.stringify(require('./{file}')))");
    let output = Command::new("node")
        .arg("-e")
        .arg(&script)
        .current_dir(project_root)
        .output()
        .map_err(ConfigLoadError::NodeUnavailable)?;

    if !output.status.success() {
        return Err(ConfigLoadError::Evaluation {
            file: file.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    serde_json::from_slice(&output.stdout).map_err(|source| ConfigLoadError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Pick the configuration sections relevant to `kind` out of an exported
/// module. Missing sections are simply absent, not errors.
fn config_from_json(kind: ConfigKind, exported: &Value) -> Result<ProviderConfig, serde_json::Error> {
    let config = match kind {
        ConfigKind::NewTruffle => ProviderConfig::NewTruffle {
            compilers: section(exported, "compilers")?,
        },
        ConfigKind::OldTruffle => ProviderConfig::OldTruffle {
            solc: section(exported, "solc")?,
            compilers: section(exported, "compilers")?,
        },
        ConfigKind::OpenZeppelin => ProviderConfig::OpenZeppelin {
            compiler: section(exported, "compiler")?,
        },
        ConfigKind::Buidler => ProviderConfig::Buidler {
            solc: section(exported, "solc")?,
        },
        ConfigKind::Hardhat => ProviderConfig::Hardhat {
            solidity: hardhat_solidity(exported.get("solidity"))?,
        },
    };
    Ok(config)
}

fn section<T: DeserializeOwned>(exported: &Value, key: &str) -> Result<Option<T>, serde_json::Error> {
    match exported.get(key) {
        Some(value) if !value.is_null() => serde_json::from_value(value.clone()).map(Some),
        _ => Ok(None),
    }
}

/// Hardhat's `solidity` field comes in three spellings: a bare version
/// string, a single compiler object, or a `{ compilers: [...] }` list. All
/// three collapse into the list form.
fn hardhat_solidity(value: Option<&Value>) -> Result<Option<HardhatSolidity>, serde_json::Error> {
    let Some(value) = value else { return Ok(None) };
    match value {
        Value::Null => Ok(None),
        Value::String(version) => Ok(Some(HardhatSolidity {
            compilers: vec![HardhatCompiler {
                version: Some(version.clone()),
                settings: None,
            }],
        })),
        Value::Object(fields) if fields.contains_key("compilers") => serde_json::from_value(value.clone()).map(Some),
        _ => {
            let compiler: HardhatCompiler = serde_json::from_value(value.clone())?;
            Ok(Some(HardhatSolidity {
                compilers: vec![compiler],
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_truffle_sections_deserialize() {
        let exported = json!({
            "networks": { "development": { "host": "127.0.0.1" } },
            "compilers": { "solc": { "version": "0.8.1" } }
        });
        let config = config_from_json(ConfigKind::NewTruffle, &exported).unwrap();
        let ProviderConfig::NewTruffle { compilers } = config else {
            panic!("wrong variant");
        };
        assert_eq!(compilers.unwrap().solc.unwrap().version.as_deref(), Some("0.8.1"));
    }

    #[test]
    fn old_truffle_keeps_both_sections() {
        let exported = json!({
            "solc": { "version": "0.4.24", "optimizer": { "enabled": true, "runs": 200 } }
        });
        let config = config_from_json(ConfigKind::OldTruffle, &exported).unwrap();
        let ProviderConfig::OldTruffle { solc, compilers } = config else {
            panic!("wrong variant");
        };
        assert_eq!(solc.unwrap().version.as_deref(), Some("0.4.24"));
        assert!(compilers.is_none());
    }

    #[test]
    fn missing_sections_are_absent_not_errors() {
        let exported = json!({ "networks": {} });
        let config = config_from_json(ConfigKind::Buidler, &exported).unwrap();
        assert_eq!(config, ProviderConfig::Buidler { solc: None });
    }

    #[test]
    fn hardhat_version_string_collapses_to_a_single_compiler() {
        let exported = json!({ "solidity": "0.8.20" });
        let config = config_from_json(ConfigKind::Hardhat, &exported).unwrap();
        let ProviderConfig::Hardhat { solidity } = config else {
            panic!("wrong variant");
        };
        let compilers = solidity.unwrap().compilers;
        assert_eq!(compilers.len(), 1);
        assert_eq!(compilers[0].version.as_deref(), Some("0.8.20"));
    }

    #[test]
    fn hardhat_single_compiler_object_is_accepted() {
        let exported = json!({
            "solidity": { "version": "0.7.3", "settings": { "optimizer": { "enabled": true } } }
        });
        let config = config_from_json(ConfigKind::Hardhat, &exported).unwrap();
        let ProviderConfig::Hardhat { solidity } = config else {
            panic!("wrong variant");
        };
        let compilers = solidity.unwrap().compilers;
        assert_eq!(compilers[0].version.as_deref(), Some("0.7.3"));
    }

    #[test]
    fn hardhat_compiler_list_passes_through() {
        let exported = json!({
            "solidity": { "compilers": [ { "version": "0.8.20" }, { "version": "0.6.12" } ] }
        });
        let config = config_from_json(ConfigKind::Hardhat, &exported).unwrap();
        let ProviderConfig::Hardhat { solidity } = config else {
            panic!("wrong variant");
        };
        assert_eq!(solidity.unwrap().compilers.len(), 2);
    }

    #[test]
    fn malformed_section_is_a_parse_error() {
        let exported = json!({ "solc": "0.5.15" });
        assert!(config_from_json(ConfigKind::Buidler, &exported).is_err());
    }
}
