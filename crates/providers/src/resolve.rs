//! The resolution cascade.
//!
//! Exactly one tool is resolved per invocation, in three steps: honor a
//! persisted choice unless a reset was requested, otherwise detect and (on
//! ambiguity) ask the user, then confirm the pick against the filesystem
//! before instantiating its adapter. The resolved value is returned to the
//! caller and threaded explicitly; there is no process-wide current
//! provider.

use std::path::Path;

use contrail_types::{ConfigKind, ProviderKind};
use tracing::{debug, warn};

use crate::descriptor::{PROVIDER_REGISTRY, ProviderDescriptor};
use crate::detect::detect;
use crate::error::{PromptError, ResolveError};
use crate::{ChoiceStore, ProviderAdapter, Prompter};

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct ResolvedProvider {
    pub kind: ProviderKind,
    pub config_kind: ConfigKind,
    pub adapter: Box<dyn ProviderAdapter>,
}

impl ResolvedProvider {
    fn new(descriptor: &ProviderDescriptor, adapter: Box<dyn ProviderAdapter>) -> Self {
        Self {
            kind: descriptor.kind,
            config_kind: descriptor.config_kind,
            adapter,
        }
    }
}

/// Resolve which deployment tool the project under `project_root` uses.
///
/// A persisted choice short-circuits detection entirely unless `reset` is
/// set. Detection that yields several tools defers to `prompter`, in
/// registry precedence order. The final selection is persisted through
/// `store`; a persistence failure degrades the run (the choice holds
/// in-memory) instead of aborting it.
pub fn resolve(
    project_root: &Path,
    reset: bool,
    store: &dyn ChoiceStore,
    prompter: &dyn Prompter,
) -> Result<ResolvedProvider, ResolveError> {
    let persisted = if reset { None } else { store.provider() };
    if let Some(kind) = persisted {
        debug!(provider = %kind, "using persisted provider choice");
    }

    let selected = match persisted {
        Some(kind) => Some(kind),
        None => select_from_detection(project_root, prompter)?,
    };

    if let Some(kind) = selected
        && let Err(error) = store.set_provider(kind)
    {
        warn!(provider = %kind, %error, "failed to persist provider choice; continuing in-memory");
    }

    instantiate(project_root, selected)
}

/// Detect candidates and pick one: a singleton auto-selects, several ask the
/// user, none leaves the confirmation cascade to decide.
fn select_from_detection(project_root: &Path, prompter: &dyn Prompter) -> Result<Option<ProviderKind>, ResolveError> {
    let candidates = detect(project_root);
    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(only.kind)),
        _ => {
            let items: Vec<String> = candidates.iter().map(|d| d.kind.label().to_string()).collect();
            let index = prompter
                .select_one("Select the tool this project is deployed with", &items)
                .map_err(ResolveError::SelectionAborted)?;
            let descriptor = candidates
                .get(index)
                .ok_or(ResolveError::SelectionAborted(PromptError::OutOfRange(index)))?;
            Ok(Some(descriptor.kind))
        }
    }
}

/// Confirm the selection against the filesystem and build its adapter.
///
/// The selected tool wins if its marker still exists; otherwise the full
/// registry is walked from the top and the first tool whose marker exists
/// is taken. An adapter that fails to initialize is logged and skipped, the
/// cascade moving on to the next entry.
fn instantiate(project_root: &Path, selected: Option<ProviderKind>) -> Result<ResolvedProvider, ResolveError> {
    let preferred = selected.and_then(|kind| {
        PROVIDER_REGISTRY
            .iter()
            .find(|descriptor| descriptor.kind == kind && descriptor.is_present(project_root))
    });

    if let Some(descriptor) = preferred {
        match descriptor.build(project_root) {
            Ok(adapter) => return Ok(ResolvedProvider::new(descriptor, adapter)),
            Err(error) => {
                warn!(provider = %descriptor.kind, %error, "selected provider failed to initialize; falling through");
            }
        }
    } else if let Some(kind) = selected {
        warn!(provider = %kind, "marker file for selected provider no longer exists; re-running cascade");
    }

    for descriptor in PROVIDER_REGISTRY {
        if preferred.is_some_and(|p| std::ptr::eq(p, descriptor)) {
            continue;
        }
        if !descriptor.is_present(project_root) {
            continue;
        }
        match descriptor.build(project_root) {
            Ok(adapter) => return Ok(ResolvedProvider::new(descriptor, adapter)),
            Err(error) => {
                warn!(provider = %descriptor.kind, %error, "provider failed to initialize; falling through");
            }
        }
    }

    Err(ResolveError::NoProviderDetected)
}
