//! Command implementations.
//!
//! Every command loads the project-scoped configuration, resolves the
//! deployment tool where it needs one, and talks to the remote service
//! through [`ContrailClient`]. All failures bubble up as typed errors inside
//! `anyhow`; `main` is the only place that reports and terminates.

use std::path::Path;

use anyhow::{Context, Result, bail};
use contrail_api::ContrailClient;
use contrail_api::payloads::{Project, ProjectRequest, UploadContractsRequest};
use contrail_providers::Prompter;
use contrail_util::{ExportNetwork, GlobalConfig, ProjectConfig, default_global_config_path, parse_network_ids};
use tracing::info;

use crate::prompts::{self, DialoguerPrompter};

/// Store the access key in the global configuration file.
pub fn login(access_key: Option<String>) -> Result<()> {
    let prompter = DialoguerPrompter;
    let access_key = match access_key {
        Some(key) => key,
        None => prompter.prompt_text("Enter your access key", &|input| {
            if input.is_empty() {
                Err("please enter an access key".into())
            } else {
                Ok(())
            }
        })?,
    };

    let mut config = GlobalConfig::load();
    config.access_key = Some(access_key);
    config.save().context("failed to save global config")?;
    println!("Access key saved to {}.", default_global_config_path().display());
    Ok(())
}

pub struct InitOptions {
    pub project: Option<String>,
    pub create_project: bool,
    pub reset_provider: bool,
}

pub struct ExportInitOptions {
    pub network: Option<String>,
    pub rpc: Option<String>,
    pub forked_network: Option<String>,
}

/// Resolve the deployment tool, pick (or create) a remote project, and
/// record both in the project configuration.
pub async fn init(project_dir: &Path, options: InitOptions) -> Result<()> {
    let store = ProjectConfig::load(project_dir)?;
    let prompter = DialoguerPrompter;

    let resolved = contrail_providers::resolve(project_dir, options.reset_provider, &store, &prompter)?;
    info!(provider = %resolved.kind, config = ?resolved.config_kind, "resolved deployment tool");

    let client = ContrailClient::new_from_env()?;
    let projects = client.list_projects().await?;

    let project = match options.project.as_deref() {
        Some(name) => project_from_flag(&client, name, projects, options.create_project).await?,
        None => select_project(&client, &prompter, projects).await?,
    };

    store.set_project_slug(&project.slug)?;
    println!(
        "Project '{}' is now linked to this directory ({} provider).",
        project.name,
        resolved.kind.label()
    );
    Ok(())
}

/// Find the project named on the command line, creating it when allowed.
async fn project_from_flag(
    client: &ContrailClient,
    name: &str,
    projects: Vec<Project>,
    create_project: bool,
) -> Result<Project> {
    if let Some(project) = projects.into_iter().find(|project| project.name == name) {
        return Ok(project);
    }
    if !create_project {
        bail!("project '{name}' not found; pass --create-project to create it");
    }
    client
        .create_project(ProjectRequest { name: name.to_string() })
        .await
        .context("creating the new project failed")
}

/// Build the selection menu: creation entry first, then projects the
/// account can actually add contracts to.
fn project_menu(projects: Vec<Project>) -> (Vec<String>, Vec<Project>) {
    let mut items = vec!["Create new project".to_string()];
    let mut selectable = Vec::new();
    for project in projects {
        if project.is_shared {
            let can_add_contract = project.permissions.as_ref().is_some_and(|permissions| permissions.add_contract);
            if !can_add_contract {
                continue;
            }
            items.push(format!("{} (shared project)", project.name));
        } else {
            items.push(project.name.clone());
        }
        selectable.push(project);
    }
    (items, selectable)
}

async fn select_project(client: &ContrailClient, prompter: &dyn Prompter, projects: Vec<Project>) -> Result<Project> {
    let (items, selectable) = project_menu(projects);
    let index = prompter.select_one("Select project", &items)?;
    if index == 0 {
        let name = prompter.prompt_text("Project name", &|input| {
            if input.is_empty() {
                Err("please enter a project name".into())
            } else {
                Ok(())
            }
        })?;
        return client
            .create_project(ProjectRequest { name })
            .await
            .context("creating the new project failed");
    }
    selectable
        .into_iter()
        .nth(index - 1)
        .context("selected project out of range")
}

/// Configure a named export network for this project.
pub async fn export_init(project_dir: &Path, options: ExportInitOptions) -> Result<()> {
    let store = ProjectConfig::load(project_dir)?;
    let prompter = DialoguerPrompter;

    let name = match options.network {
        Some(name) => name,
        None => prompts::prompt_export_network_name(&prompter)?,
    };

    let forked_network = match options.forked_network {
        Some(name) if !name.is_empty() => Some(name),
        Some(_) => None,
        None => {
            let client = ContrailClient::new_from_env()?;
            let networks = client.public_networks().await?;
            let names: Vec<String> = networks.into_iter().map(|network| network.name).collect();
            prompts::prompt_forked_network(&prompter, &names)?
        }
    };

    let rpc_address = match options.rpc {
        Some(rpc) => rpc,
        None => prompts::prompt_rpc_address(&prompter)?,
    };

    store.set_export_network(&name, ExportNetwork { rpc_address, forked_network })?;
    println!("Exported network '{name}' configured.");
    Ok(())
}

/// Print which deployment tools are detectable under the project directory.
pub fn providers(project_dir: &Path) -> Result<()> {
    let candidates = contrail_providers::detect(project_dir);
    if candidates.is_empty() {
        println!("No deployment tool detected in {}.", project_dir.display());
        return Ok(());
    }
    for descriptor in candidates {
        let Some(marker) = descriptor.first_existing_marker(project_dir) else {
            continue;
        };
        match descriptor.build(project_dir) {
            Ok(adapter) => println!(
                "{:<14} {} (sources: {}, artifacts: {})",
                descriptor.kind.label(),
                marker.display(),
                adapter.contracts_dir().display(),
                adapter.build_dir().display()
            ),
            Err(error) => println!("{:<14} {} ({error})", descriptor.kind.label(), marker.display()),
        }
    }
    Ok(())
}

/// Print the canonical compiler configuration that would be submitted for
/// this project, as a contract-upload request body.
pub fn config(project_dir: &Path, networks: Option<&str>) -> Result<()> {
    let store = ProjectConfig::load(project_dir)?;
    let prompter = DialoguerPrompter;

    let resolved = contrail_providers::resolve(project_dir, false, &store, &prompter)?;
    let raw = contrail_providers::load_raw_config(resolved.adapter.as_ref(), project_dir)?;

    // An absent payload means "nothing to submit", not a failure.
    let Some(payload) = contrail_providers::normalize(&raw) else {
        println!("No compiler configuration to submit for this project.");
        return Ok(());
    };

    let request = UploadContractsRequest {
        config: Some(payload),
        network_ids: networks.map(parse_network_ids).unwrap_or_default(),
    };
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrail_api::payloads::ProjectPermissions;

    fn project(name: &str, is_shared: bool, add_contract: bool) -> Project {
        Project {
            id: name.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            is_shared,
            permissions: Some(ProjectPermissions { add_contract }),
        }
    }

    #[test]
    fn menu_leads_with_the_creation_entry() {
        let (items, selectable) = project_menu(vec![project("alpha", false, false)]);
        assert_eq!(items, vec!["Create new project".to_string(), "alpha".to_string()]);
        assert_eq!(selectable.len(), 1);
    }

    #[test]
    fn shared_projects_without_contract_access_are_hidden() {
        let (items, selectable) = project_menu(vec![
            project("mine", false, false),
            project("theirs", true, false),
            project("ours", true, true),
        ]);
        assert_eq!(
            items,
            vec![
                "Create new project".to_string(),
                "mine".to_string(),
                "ours (shared project)".to_string(),
            ]
        );
        assert_eq!(selectable.len(), 2);
        assert_eq!(selectable[1].name, "ours");
    }
}
