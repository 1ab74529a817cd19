use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tenantdb_core::TenantDbConfig;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::IdentityArgs;

#[derive(Parser, Debug)]
#[command(name = "tenantdb", version, about = "Tenant-aware database connection resolver")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "tenantdb.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file and report templates that cannot take effect.
    Check,

    /// Print the URL and (redacted) properties an identity resolves to, without connecting.
    Resolve {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Open a Postgres connection for an identity and run `SELECT 1`.
    Connect {
        #[command(flatten)]
        identity: IdentityArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = TenantDbConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!(config = %cli.config.display(), "Loaded configuration");

    match cli.cmd {
        Command::Check => commands::check::run(&cli.config, &config),
        Command::Resolve { identity, json } => commands::resolve::run(&config, &identity, json),
        Command::Connect { identity } => commands::connect::run(&config, &identity).await,
    }
}
