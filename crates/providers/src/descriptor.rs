//! The registry of known deployment tools.
//!
//! Priority is data: [`PROVIDER_REGISTRY`] lists one descriptor per
//! detectable configuration shape, ordered by precedence. Detection, the
//! ambiguity prompt, and the final confirmation cascade all walk this table;
//! no per-tool control flow exists anywhere else.

use std::path::{Path, PathBuf};

use contrail_types::{ConfigKind, ProviderKind};

use crate::adapter::{
    BUIDLER_CONFIG_FILE, BuidlerAdapter, HARDHAT_CONFIG_FILE, HARDHAT_TS_CONFIG_FILE, HardhatAdapter,
    NEW_TRUFFLE_CONFIG_FILE, OLD_TRUFFLE_CONFIG_FILE, OPENZEPPELIN_CONFIG_FILE, OpenZeppelinAdapter, ProviderAdapter,
    TruffleAdapter,
};
use crate::error::AdapterError;

type Factory = fn(&Path) -> Result<Box<dyn ProviderAdapter>, AdapterError>;

/// One detectable tool configuration: identity, marker files, config shape,
/// and the constructor for its adapter.
pub struct ProviderDescriptor {
    pub kind: ProviderKind,
    pub config_kind: ConfigKind,
    /// Marker paths relative to the project root. The descriptor is a
    /// detection candidate iff at least one exists.
    pub markers: &'static [&'static str],
    factory: Factory,
}

impl ProviderDescriptor {
    /// Whether any of this descriptor's marker files exists under `root`.
    pub fn is_present(&self, root: &Path) -> bool {
        self.first_existing_marker(root).is_some()
    }

    /// The first marker file of this descriptor that exists under `root`.
    pub fn first_existing_marker(&self, root: &Path) -> Option<PathBuf> {
        self.markers
            .iter()
            .map(|marker| root.join(marker))
            .find(|path| path.exists())
    }

    /// Instantiate the adapter for this tool.
    pub fn build(&self, root: &Path) -> Result<Box<dyn ProviderAdapter>, AdapterError> {
        (self.factory)(root)
    }
}

fn openzeppelin_factory(root: &Path) -> Result<Box<dyn ProviderAdapter>, AdapterError> {
    OpenZeppelinAdapter::new(root).map(|adapter| Box::new(adapter) as Box<dyn ProviderAdapter>)
}

fn buidler_factory(root: &Path) -> Result<Box<dyn ProviderAdapter>, AdapterError> {
    BuidlerAdapter::new(root).map(|adapter| Box::new(adapter) as Box<dyn ProviderAdapter>)
}

fn hardhat_factory(root: &Path) -> Result<Box<dyn ProviderAdapter>, AdapterError> {
    HardhatAdapter::new(root).map(|adapter| Box::new(adapter) as Box<dyn ProviderAdapter>)
}

fn new_truffle_factory(root: &Path) -> Result<Box<dyn ProviderAdapter>, AdapterError> {
    TruffleAdapter::new(root, ConfigKind::NewTruffle).map(|adapter| Box::new(adapter) as Box<dyn ProviderAdapter>)
}

fn old_truffle_factory(root: &Path) -> Result<Box<dyn ProviderAdapter>, AdapterError> {
    TruffleAdapter::new(root, ConfigKind::OldTruffle).map(|adapter| Box::new(adapter) as Box<dyn ProviderAdapter>)
}

/// All known tools, in fixed precedence order: OpenZeppelin, Buidler,
/// Hardhat, new-style Truffle, legacy Truffle. New-style and legacy Truffle
/// share an identity but map to different configuration shapes.
pub static PROVIDER_REGISTRY: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        kind: ProviderKind::OpenZeppelin,
        config_kind: ConfigKind::OpenZeppelin,
        markers: &[OPENZEPPELIN_CONFIG_FILE],
        factory: openzeppelin_factory,
    },
    ProviderDescriptor {
        kind: ProviderKind::Buidler,
        config_kind: ConfigKind::Buidler,
        markers: &[BUIDLER_CONFIG_FILE],
        factory: buidler_factory,
    },
    ProviderDescriptor {
        kind: ProviderKind::Hardhat,
        config_kind: ConfigKind::Hardhat,
        markers: &[HARDHAT_CONFIG_FILE, HARDHAT_TS_CONFIG_FILE],
        factory: hardhat_factory,
    },
    ProviderDescriptor {
        kind: ProviderKind::Truffle,
        config_kind: ConfigKind::NewTruffle,
        markers: &[NEW_TRUFFLE_CONFIG_FILE],
        factory: new_truffle_factory,
    },
    ProviderDescriptor {
        kind: ProviderKind::Truffle,
        config_kind: ConfigKind::OldTruffle,
        markers: &[OLD_TRUFFLE_CONFIG_FILE],
        factory: old_truffle_factory,
    },
];
