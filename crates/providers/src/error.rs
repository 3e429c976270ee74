use contrail_types::ProviderKind;
use thiserror::Error;

/// Failure of an interactive prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user cancelled or interrupted the prompt.
    #[error("selection interrupted")]
    Interrupted,
    /// The collaborator returned an index outside the presented items.
    #[error("selection index {0} out of range")]
    OutOfRange(usize),
    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to construct a provider adapter for a detected tool.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid {kind} project layout: {reason}")]
    InvalidLayout { kind: ProviderKind, reason: String },
}

/// Failure of the resolution cascade. Bubbles to the top-level caller; only
/// the entry point decides whether to terminate.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No marker file of any known tool exists under the project root.
    /// Fatal for this run; the filesystem will not change mid-invocation.
    #[error("no deployment tool detected in the project directory")]
    NoProviderDetected,
    /// The user aborted an interactive selection. Recoverable on re-run.
    #[error("provider selection aborted")]
    SelectionAborted(#[source] PromptError),
}
