//! Raw provider configuration shapes.
//!
//! Each supported tool exposes its compiler settings in a slightly different
//! place and under slightly different field names; the variants below mirror
//! the on-disk shapes closely so that deserializing a tool's exported config
//! is a direct `serde` mapping. Normalization into the canonical
//! [`ConfigPayload`](crate::ConfigPayload) lives in the providers crate.

use serde::{Deserialize, Serialize};

use crate::ConfigKind;

/// Optimizer block shared by the solc-derived configuration shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Optimizer {
    pub enabled: Option<bool>,
    pub runs: Option<u32>,
}

/// The `settings` block of a new-style Truffle or Hardhat solc entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolcSettings {
    pub optimizer: Option<Optimizer>,
    #[serde(rename = "evmVersion")]
    pub evm_version: Option<String>,
}

/// A single solc entry under new-style Truffle `compilers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TruffleSolc {
    pub version: Option<String>,
    pub settings: Option<SolcSettings>,
}

/// The `compilers` block of a new-style Truffle configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TruffleCompilers {
    pub solc: Option<TruffleSolc>,
}

/// The legacy `solc` block of an old-style (`truffle.js`) configuration.
/// Version and optimizer sit directly on the block, no `settings` nesting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacySolcSettings {
    pub version: Option<String>,
    pub optimizer: Option<Optimizer>,
}

/// OpenZeppelin CLI compiler settings: a flat block with its own field
/// naming (`solcVersion`, not a nested `solc.version`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenZeppelinCompiler {
    #[serde(rename = "solcVersion")]
    pub solc_version: Option<String>,
    pub optimizer: Option<Optimizer>,
    #[serde(rename = "evmVersion")]
    pub evm_version: Option<String>,
}

/// The `solc` block of a Buidler configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuidlerSolc {
    pub version: Option<String>,
    pub optimizer: Option<Optimizer>,
    #[serde(rename = "evmVersion")]
    pub evm_version: Option<String>,
}

/// One entry of a Hardhat `solidity.compilers` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardhatCompiler {
    pub version: Option<String>,
    pub settings: Option<SolcSettings>,
}

/// The `solidity` block of a Hardhat configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardhatSolidity {
    #[serde(default)]
    pub compilers: Vec<HardhatCompiler>,
}

/// Raw provider configuration, tagged by the shape its marker file implies.
///
/// Every variant's compiler substructure is optional: tools happily run with
/// defaults and omit the block entirely, and an absent block normalizes to
/// "nothing to submit" rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderConfig {
    NewTruffle {
        compilers: Option<TruffleCompilers>,
    },
    OldTruffle {
        solc: Option<LegacySolcSettings>,
        compilers: Option<TruffleCompilers>,
    },
    OpenZeppelin {
        compiler: Option<OpenZeppelinCompiler>,
    },
    Buidler {
        solc: Option<BuidlerSolc>,
    },
    Hardhat {
        solidity: Option<HardhatSolidity>,
    },
}

impl ProviderConfig {
    /// The discriminant this configuration carries.
    pub fn config_kind(&self) -> ConfigKind {
        match self {
            ProviderConfig::NewTruffle { .. } => ConfigKind::NewTruffle,
            ProviderConfig::OldTruffle { .. } => ConfigKind::OldTruffle,
            ProviderConfig::OpenZeppelin { .. } => ConfigKind::OpenZeppelin,
            ProviderConfig::Buidler { .. } => ConfigKind::Buidler,
            ProviderConfig::Hardhat { .. } => ConfigKind::Hardhat,
        }
    }
}
