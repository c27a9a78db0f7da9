//! `packagist list` command implementation.

use packagist_core::error::PackagistResult;
use packagist_core::types::FilterSet;

use super::CommandContext;

/// Execute the `packagist list` command
pub async fn execute(filters: &FilterSet, ctx: &CommandContext) -> PackagistResult<()> {
    let names = ctx.run(ctx.client.all(filters)).await?;

    if ctx.json {
        return ctx.print_json(&names);
    }

    for name in &names {
        ctx.output.result(name, name);
    }
    ctx.output.success(&format!("{} packages", names.len()));

    Ok(())
}
