//! gatling-enterprise: deploy and start Gatling simulations on Gatling Enterprise
//!
//! ## Commands
//!
//! - **start**: upload the artifact if it changed, resolve the simulation and start a run
//! - **upload**: upload the artifact into a package, skipping unchanged content
//! - **checksum**: print the content checksum of an artifact
//! - **scan**: list the simulation classes found in an artifact
//!
//! ## Example Usage
//!
//! ```bash
//! export GATLING_ENTERPRISE_API_TOKEN=...
//!
//! # Create a simulation for the only team/pool and start it
//! gatling-enterprise start --file target/my-sims.jar --artifact-id my-sims
//!
//! # Start an existing simulation with extra properties
//! gatling-enterprise start --file target/my-sims.jar \
//!     --simulation-id 92634bbd-a88b-4c45-8968-756055e19e5b --system-properties users=10
//!
//! # Let an operator pick team, package and pool
//! gatling-enterprise start --file target/my-sims.jar --interactive
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use gatling_enterprise::EnterpriseSettings;

mod enterprise_cli;

use enterprise_cli::{
    inspect::{ChecksumCmd, ScanCmd},
    start::StartCmd,
    upload::UploadCmd,
};

#[derive(Parser)]
#[command(
    name = "gatling-enterprise",
    author,
    version,
    about = "Deploy and start Gatling simulations on Gatling Enterprise",
    long_about = "Uploads a packaged simulation artifact, resolves which simulation to run \
                  from the given options, and starts it on Gatling Enterprise.\n\n\
                  Connection settings default to the GATLING_ENTERPRISE_URL, \
                  GATLING_ENTERPRISE_API_TOKEN and GATLING_ENTERPRISE_TIMEOUT_MS \
                  environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gatling Enterprise public API URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// API token with the 'Configure' role
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logs)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the artifact, resolve the simulation and start a run
    Start(StartCmd),

    /// Upload the artifact into a package, skipping unchanged content
    Upload(UploadCmd),

    /// Print the content checksum of an artifact
    Checksum(ChecksumCmd),

    /// List the simulation classes of an artifact
    Scan(ScanCmd),
}

fn main() -> Result<()> {
    let Cli {
        command,
        url,
        api_token,
        json,
        verbose,
    } = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = EnterpriseSettings::from_env().with_overrides(url, api_token);

    match command {
        Commands::Start(cmd) => cmd.execute(&settings, json),
        Commands::Upload(cmd) => cmd.execute(&settings, json),
        Commands::Checksum(cmd) => cmd.execute(json),
        Commands::Scan(cmd) => cmd.execute(json),
    }
    .map_err(enterprise_cli::with_hint)
}
