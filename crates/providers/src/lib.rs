//! Deployment-tool detection and resolution.
//!
//! Modules:
//! - `adapter`: Per-tool adapters and the trait they share
//! - `descriptor`: The registry of known tools, in fixed priority order
//! - `detect`: Marker-file probing over the registry
//! - `resolve`: The resolution cascade (persisted choice, detection, prompt)
//! - `jsconfig`: Exporting a tool's JS config module into its raw shape
//! - `normalize`: Raw provider config to canonical compiler payload
//! - `error`: Typed failures surfaced to the caller

mod adapter;
mod descriptor;
mod detect;
mod error;
mod jsconfig;
mod normalize;
mod resolve;

pub use adapter::{
    BUIDLER_CONFIG_FILE, BuidlerAdapter, HARDHAT_CONFIG_FILE, HARDHAT_TS_CONFIG_FILE, HardhatAdapter,
    NEW_TRUFFLE_CONFIG_FILE, OLD_TRUFFLE_CONFIG_FILE, OPENZEPPELIN_CONFIG_FILE, OpenZeppelinAdapter, ProviderAdapter,
    TruffleAdapter,
};
pub use descriptor::{PROVIDER_REGISTRY, ProviderDescriptor};
pub use detect::detect;
pub use error::{AdapterError, PromptError, ResolveError};
pub use jsconfig::{ConfigLoadError, load_raw_config};
pub use normalize::normalize;
pub use resolve::{ResolvedProvider, resolve};

use contrail_types::ProviderKind;
use contrail_util::{ProjectConfig, ProjectConfigError};

/// Interactive choice collaborator.
///
/// Implementations render the actual widgets; the resolution cascade only
/// depends on this contract. An error return signals cancellation or
/// interruption and must propagate as a resolution failure, never be
/// swallowed.
pub trait Prompter {
    /// Present `items` and return the index of the user's pick.
    fn select_one(&self, label: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Ask for a line of text, re-prompting until `validate` accepts it.
    fn prompt_text(&self, label: &str, validate: &dyn Fn(&str) -> Result<(), String>) -> Result<String, PromptError>;
}

/// Persisted provider-choice store. Only the get/set contract matters to the
/// resolution cascade; the concrete storage lives elsewhere.
pub trait ChoiceStore {
    /// The previously persisted choice, if any.
    fn provider(&self) -> Option<ProviderKind>;

    /// Persist `kind` for future invocations.
    fn set_provider(&self, kind: ProviderKind) -> Result<(), ProjectConfigError>;
}

impl ChoiceStore for ProjectConfig {
    fn provider(&self) -> Option<ProviderKind> {
        ProjectConfig::provider(self)
    }

    fn set_provider(&self, kind: ProviderKind) -> Result<(), ProjectConfigError> {
        ProjectConfig::set_provider(self, kind)
    }
}
