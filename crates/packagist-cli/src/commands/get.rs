//! `packagist get` command implementation.
//!
//! Shows details of a single package.

use packagist_core::error::PackagistResult;
use packagist_core::types::Package;

use super::{format_count, CommandContext};

/// Number of versions listed in the summary
const SHOWN_VERSIONS: usize = 5;

/// Execute the `packagist get` command
pub async fn execute(package: &str, ctx: &CommandContext) -> PackagistResult<()> {
    let package = ctx.run(ctx.client.get(package)).await?;

    if ctx.json {
        return ctx.print_json(&package);
    }

    let mut lines = format_package(&package).into_iter();
    if let Some(name) = lines.next() {
        ctx.output.header(&name);
    }
    for line in lines {
        println!("{}", line);
    }
    if package.is_abandoned() {
        match package.replacement() {
            Some(replacement) => ctx
                .output
                .warn(&format!("Package is abandoned, use {} instead", replacement)),
            None => ctx.output.warn("Package is abandoned"),
        }
    }

    Ok(())
}

/// Summary lines for a package
pub fn format_package(package: &Package) -> Vec<String> {
    let mut lines = vec![package.name.clone()];

    if let Some(description) = package.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("  description: {}", description));
    }
    if let Some(package_type) = &package.package_type {
        lines.push(format!("  type:        {}", package_type));
    }
    if let Some(repository) = &package.repository {
        lines.push(format!("  repository:  {}", repository));
    }
    if let Some(downloads) = package.downloads {
        lines.push(format!(
            "  downloads:   {} total, {} monthly",
            format_count(downloads.total),
            format_count(downloads.monthly)
        ));
    }
    if let Some(favers) = package.favers {
        lines.push(format!("  favers:      {}", favers));
    }
    if !package.versions.is_empty() {
        let shown: Vec<&str> = package
            .versions
            .keys()
            .take(SHOWN_VERSIONS)
            .map(String::as_str)
            .collect();
        let more = package.versions.len().saturating_sub(SHOWN_VERSIONS);
        let mut versions = shown.join(", ");
        if more > 0 {
            versions.push_str(&format!(" (+{} more)", more));
        }
        lines.push(format!("  versions:    {}", versions));
    }

    lines
}
