use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod provider_config;

pub use provider_config::{
    BuidlerSolc, HardhatCompiler, HardhatSolidity, LegacySolcSettings, OpenZeppelinCompiler, Optimizer, ProviderConfig,
    SolcSettings, TruffleCompilers, TruffleSolc,
};

/// Identity of a supported deployment tool.
///
/// New-style and legacy Truffle projects share this identity; they differ
/// only in which configuration shape ([`ConfigKind`]) their marker file
/// implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenZeppelin,
    Buidler,
    Hardhat,
    Truffle,
}

impl ProviderKind {
    /// Human-facing label used in prompts and log output.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenZeppelin => "OpenZeppelin",
            ProviderKind::Buidler => "Buidler",
            ProviderKind::Hardhat => "Hardhat",
            ProviderKind::Truffle => "Truffle",
        }
    }

    /// Canonical lowercase identifier, as persisted in project configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenZeppelin => "openzeppelin",
            ProviderKind::Buidler => "buidler",
            ProviderKind::Hardhat => "hardhat",
            ProviderKind::Truffle => "truffle",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a persisted provider identifier is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openzeppelin" => Ok(ProviderKind::OpenZeppelin),
            "buidler" => Ok(ProviderKind::Buidler),
            "hardhat" => Ok(ProviderKind::Hardhat),
            "truffle" => Ok(ProviderKind::Truffle),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Discriminant for the configuration shape a provider's marker file implies.
///
/// This is deliberately finer-grained than [`ProviderKind`]: a Truffle
/// project carries either the new-style `truffle-config.js` shape or the
/// legacy `truffle.js` shape, and the two normalize differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    NewTruffle,
    OldTruffle,
    OpenZeppelin,
    Buidler,
    Hardhat,
}

/// Canonical compiler configuration, provider-agnostic, shaped for the
/// remote service. Absent fields are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solc_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizations_used: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizations_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evm_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_round_trips_through_str() {
        for kind in [
            ProviderKind::OpenZeppelin,
            ProviderKind::Buidler,
            ProviderKind::Hardhat,
            ProviderKind::Truffle,
        ] {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = "brownie".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err, UnknownProvider("brownie".into()));
    }

    #[test]
    fn payload_serialization_skips_absent_fields() {
        let payload = ConfigPayload {
            solc_version: Some("0.8.1".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "solc_version": "0.8.1" }));
    }
}
