use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

mod commands;
mod prompts;

#[derive(Parser)]
#[command(name = "contrail", version, about = "Identify a project's deployment tool and link it to Contrail")]
struct Cli {
    /// Project directory to operate on.
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the access key used against the remote service.
    Login(LoginArgs),
    /// Link this project directory with a remote Contrail project.
    Init(InitArgs),
    /// Manage exported local networks.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Show which deployment tools are detectable in the project directory.
    Providers,
    /// Print the compiler configuration that would be submitted.
    Config(ConfigArgs),
}

#[derive(Args)]
struct LoginArgs {
    /// Access key to store; prompted for when omitted.
    #[arg(long)]
    access_key: Option<String>,
}

#[derive(Args)]
struct InitArgs {
    /// Remote project to link, by name.
    #[arg(long)]
    project: Option<String>,
    /// Create the remote project when `--project` names one that does not exist.
    #[arg(long)]
    create_project: bool,
    /// Discard the persisted provider choice and re-run detection.
    #[arg(long)]
    reset_provider: bool,
}

#[derive(Subcommand)]
enum ExportCommands {
    /// Configure a named export network for this project.
    Init(ExportInitArgs),
}

#[derive(Args)]
struct ExportInitArgs {
    /// Name for the exported network.
    #[arg(long)]
    network: Option<String>,
    /// RPC address the exported network listens on.
    #[arg(long)]
    rpc: Option<String>,
    /// Public network this one forks, if any.
    #[arg(long)]
    forked_network: Option<String>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Comma-separated network IDs to attach to the payload.
    #[arg(long)]
    networks: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Login(args) => commands::login(args.access_key),
        Commands::Init(args) => {
            commands::init(
                &cli.project_dir,
                commands::InitOptions {
                    project: args.project,
                    create_project: args.create_project,
                    reset_provider: args.reset_provider,
                },
            )
            .await
        }
        Commands::Export { command } => match command {
            ExportCommands::Init(args) => {
                commands::export_init(
                    &cli.project_dir,
                    commands::ExportInitOptions {
                        network: args.network,
                        rpc: args.rpc,
                        forked_network: args.forked_network,
                    },
                )
                .await
            }
        },
        Commands::Providers => commands::providers(&cli.project_dir),
        Commands::Config(args) => commands::config(&cli.project_dir, args.networks.as_deref()),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}
