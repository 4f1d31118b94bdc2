mod api;
mod commands;
mod config;
mod context;
mod import;
mod output;
mod traits;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{ImportCommand, ResourceTypesCommand};
use config::Overrides;
use context::Context;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cf-import")]
#[command(about = "Generate `terraform import` commands for existing Cloudflare resources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Account ID to import resources from
    #[arg(short, long, global = true, env = "CLOUDFLARE_ACCOUNT_ID")]
    account: Option<String>,

    /// Zone ID to import resources from
    #[arg(short, long, global = true, env = "CLOUDFLARE_ZONE_ID")]
    zone: Option<String>,

    /// API token
    #[arg(long, global = true, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Account email, used together with --key
    #[arg(short, long, global = true, env = "CLOUDFLARE_EMAIL")]
    email: Option<String>,

    /// Global API key, used together with --email
    #[arg(short, long, global = true, env = "CLOUDFLARE_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Path to the config file (defaults to ~/.cf-import.yaml)
    #[arg(long, global = true, env = "CF_IMPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the Cloudflare API
    #[arg(long, global = true, env = "CLOUDFLARE_API_URL")]
    api_url: Option<String>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            config_path: self.config,
            account: self.account,
            zone: self.zone,
            token: self.token,
            email: self.email,
            key: self.key,
            api_url: self.api_url,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Output `terraform import` commands for existing resources
    Import(ImportCommand),

    /// List supported resource types and their import formats
    ResourceTypes(ResourceTypesCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.global.verbose);

    let ctx = Context::new();

    match cli.command {
        Commands::Import(command) => {
            command.execute(&ctx, cli.global.overrides())?;
        }
        Commands::ResourceTypes(command) => {
            command.execute(&ctx)?;
        }
    }

    Ok(())
}

fn initialize_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
