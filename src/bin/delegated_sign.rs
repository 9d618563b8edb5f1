//! delegated-sign: inspect what a delegated call requires before signing
//!
//! ## Commands
//!
//! - **build**: Build the validation sequence for a call and its expected delegation path
//! - **layers**: Show the multisig/proxy layers a call is wrapped in
//! - **runtimes**: List or add the runtime metadata used for decoding
//!
//! ## Example Usage
//!
//! ```bash
//! # Register runtime metadata for a chain
//! delegated-sign runtimes add ./polkadot.json
//!
//! # Build a validation sequence
//! delegated-sign build --request request.json
//!
//! # Inspect the wrappers of a call
//! delegated-sign layers --call call.json --chain polkadot --json
//! ```

use clap::{Parser, Subcommand};

mod sign_cli;

use sign_cli::{build::BuildCmd, layers::LayersCmd, runtimes::RuntimesCmd};

#[derive(Parser)]
#[command(
    name = "delegated-sign",
    author,
    version,
    about = "Validation sequences for multisig and proxy wrapped calls"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding `<chain>.json` runtime metadata
    #[arg(long, global = true)]
    runtime_dir: Option<std::path::PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the validation sequence for a delegated call
    Build(BuildCmd),

    /// Show the delegation wrappers of a call
    Layers(LayersCmd),

    /// Manage runtime metadata
    Runtimes(RuntimesCmd),
}

#[tokio::main]
async fn main() {
    let Cli {
        command,
        runtime_dir,
        json,
        log_level,
    } = Cli::parse();

    sign_cli::logging::init(&log_level);

    let runtime_dir = runtime_dir.unwrap_or_else(sign_cli::home::runtime_dir);

    let result = match command {
        Commands::Build(cmd) => cmd.execute(&runtime_dir, json).await,
        Commands::Layers(cmd) => cmd.execute(&runtime_dir, json).await,
        Commands::Runtimes(cmd) => cmd.execute(&runtime_dir, json).await,
    };

    if let Err(err) = result {
        eprintln!("{}", sign_cli::output::format_error(&err, json));
        std::process::exit(1);
    }
}
