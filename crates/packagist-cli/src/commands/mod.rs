//! Command implementations and dispatch logic.
//!
//! Each command is an async function that takes a CommandContext.

use std::time::Duration;

use packagist_api::{Cancellable, ClientConfig, PackagistClient};
use packagist_core::error::{PackagistError, PackagistResult};
use packagist_core::types::FilterSet;
use serde::Serialize;
use tracing::info;

pub mod get;
pub mod list;
pub mod search;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub client: PackagistClient,
    pub output: OutputHandler,
    pub json: bool,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(base_url: &str, timeout_secs: u64, json: bool) -> PackagistResult<Self> {
        let client = PackagistClient::with_config(ClientConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(timeout_secs),
            ..ClientConfig::default()
        })?;

        Ok(Self {
            client,
            output: OutputHandler::new(),
            json,
        })
    }

    /// Await an operation, cancelling it on Ctrl-C
    pub async fn run<T>(&self, mut operation: Cancellable<T>) -> PackagistResult<T> {
        tokio::select! {
            biased;
            result = &mut operation => result,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, cancelling request");
                operation.cancel();
                operation.await
            },
        }
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> PackagistResult<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(|e| PackagistError::Io {
            message: "Failed to render JSON output".to_string(),
            source: e.into(),
        })?;
        println!("{}", rendered);
        Ok(())
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> PackagistResult<()> {
    match command {
        Commands::Search {
            query,
            package_type,
            filters,
            limit,
        } => {
            info!("Searching for: {}", query);
            let mut filter_set: FilterSet = filters.into_iter().collect();
            if let Some(package_type) = package_type {
                filter_set.insert("type", package_type);
            }
            search::execute(&query, &filter_set, limit, ctx).await
        },
        Commands::Get { package } => {
            info!("Fetching package: {}", package);
            get::execute(&package, ctx).await
        },
        Commands::List {
            vendor,
            package_type,
        } => {
            info!("Listing packages (vendor: {:?}, type: {:?})", vendor, package_type);
            let mut filter_set = FilterSet::new();
            if let Some(vendor) = vendor {
                filter_set.insert("vendor", vendor);
            }
            if let Some(package_type) = package_type {
                filter_set.insert("type", package_type);
            }
            list::execute(&filter_set, ctx).await
        },
    }
}

/// Parse a `KEY=VALUE` filter argument
pub fn parse_filter(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        },
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}

/// Human readable download count (`1.2M`, `35.4k`, `812`)
pub fn format_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}k", count as f64 / 1_000.0),
        _ => format!("{:.1}M", count as f64 / 1_000_000.0),
    }
}
