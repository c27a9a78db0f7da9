//! `packagist search` command implementation.
//!
//! Runs a search across every result page and prints the matches.

use packagist_core::error::PackagistResult;
use packagist_core::types::{FilterSet, SearchResult};

use super::{format_count, CommandContext};

/// Execute the `packagist search` command
pub async fn execute(
    query: &str,
    filters: &FilterSet,
    limit: Option<usize>,
    ctx: &CommandContext,
) -> PackagistResult<()> {
    if !ctx.json {
        ctx.output.step("🔍", &format!("Searching for '{}'", query));
    }

    let mut results = ctx.run(ctx.client.search(query, filters)).await?;
    let total = results.len();
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    if ctx.json {
        return ctx.print_json(&results);
    }

    if results.is_empty() {
        ctx.output.warn(&format!("No packages found matching '{}'", query));
        return Ok(());
    }

    for result in &results {
        ctx.output.result(&result.name, &format_result(result));
    }
    ctx.output.success(&format!(
        "Showing {} of {} packages matching '{}'",
        results.len(),
        total,
        query
    ));

    Ok(())
}

/// One line per match: name, download count and description
pub fn format_result(result: &SearchResult) -> String {
    let mut line = format!("{} ({} downloads)", result.name, format_count(result.downloads));
    if let Some(description) = result.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" - ");
        line.push_str(description);
    }
    if result.abandoned.is_some() {
        line.push_str(" [abandoned]");
    }
    line
}
