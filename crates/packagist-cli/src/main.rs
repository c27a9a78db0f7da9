//! # packagist-cli
//!
//! Command line front end for the Packagist registry client.
//!
//! Parses arguments, sets up logging, builds the client and dispatches to
//! the command handlers. Ctrl-C cancels the running request.

use clap::{Parser, Subcommand};
use packagist_core::error::PackagistError;
use std::process::ExitCode;
use tracing::{debug, error};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Query the Packagist package registry
#[derive(Parser)]
#[command(name = "packagist", version, about = "Query the Packagist package registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry base URL
    #[arg(long, global = true, env = "PACKAGIST_URL", default_value = packagist_api::PACKAGIST_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "PACKAGIST_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search packages, following every result page
    Search {
        query: String,
        /// Restrict to a package type (library, composer-plugin, ...)
        #[arg(long = "type")]
        package_type: Option<String>,
        /// Extra search filter, repeatable
        #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = commands::parse_filter)]
        filters: Vec<(String, String)>,
        /// Show at most this many results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show package details
    Get {
        /// Full package name, e.g. clue/graph
        package: String,
    },
    /// List package names
    List {
        /// Only packages of this vendor
        #[arg(long)]
        vendor: Option<String>,
        /// Only packages of this type
        #[arg(long = "type")]
        package_type: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting packagist v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PackagistError::Cancelled) => {
            eprintln!("{}", ErrorFormatter::new().format_warning("cancelled"));
            ExitCode::from(130)
        },
        Err(err) => {
            eprint!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> Result<(), PackagistError> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().map_err(|e| PackagistError::Io {
        message: "Failed to create async runtime".to_string(),
        source: e,
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new(&cli.base_url, cli.timeout, cli.json)?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "packagist_cli={},packagist_api={},packagist_core={}",
            level, level, level
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("packagist encountered an unexpected error: {}", panic_info);
        eprintln!("packagist crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
