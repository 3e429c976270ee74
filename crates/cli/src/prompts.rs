//! Interactive prompt collaborator backed by `dialoguer`, plus the prompt
//! flows shared by the commands. The resolution core only ever sees the
//! [`Prompter`] trait; everything widget-shaped lives here.

use contrail_providers::{PromptError, Prompter};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

/// Default RPC address offered when the user does not enter one.
pub const DEFAULT_RPC_ADDRESS: &str = "127.0.0.1:8545";

pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select_one(&self, label: &str, items: &[String]) -> Result<usize, PromptError> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(items)
            .default(0)
            .interact()
            .map_err(map_dialoguer_error)
    }

    fn prompt_text(&self, label: &str, validate: &dyn Fn(&str) -> Result<(), String>) -> Result<String, PromptError> {
        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()
                .map_err(map_dialoguer_error)?;
            match validate(&input) {
                Ok(()) => return Ok(input),
                Err(message) => eprintln!("{message}"),
            }
        }
    }
}

fn map_dialoguer_error(error: dialoguer::Error) -> PromptError {
    match error {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => PromptError::Interrupted,
        dialoguer::Error::IO(io) => PromptError::Io(io),
    }
}

/// Ask for the exported network's name.
pub fn prompt_export_network_name(prompter: &dyn Prompter) -> Result<String, PromptError> {
    prompter.prompt_text("Choose the name for the exported network", &|input| {
        if input.is_empty() {
            Err("please enter the exported network name".into())
        } else {
            Ok(())
        }
    })
}

/// Ask for the RPC address, falling back to the local default.
pub fn prompt_rpc_address(prompter: &dyn Prompter) -> Result<String, PromptError> {
    let address = prompter.prompt_text(&format!("Enter rpc address (default: {DEFAULT_RPC_ADDRESS})"), &|_| Ok(()))?;
    if address.is_empty() {
        Ok(DEFAULT_RPC_ADDRESS.to_string())
    } else {
        Ok(address)
    }
}

/// Ask which public network, if any, the exported network forks.
pub fn prompt_forked_network(prompter: &dyn Prompter, network_names: &[String]) -> Result<Option<String>, PromptError> {
    let mut items = vec!["None".to_string()];
    items.extend(network_names.iter().cloned());
    let index = prompter.select_one("If you are forking a public network, please define which one", &items)?;
    if index == 0 { Ok(None) } else { Ok(Some(items[index].clone())) }
}
