//! `flowtree build` -- print the display tree as JSON.

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use crate::commands::build_input;
use crate::context::RuntimeContext;
use crate::output::{output_json, warn_diagnostics};

/// Execute the `flowtree build` command.
pub fn run(ctx: &RuntimeContext, args: &BuildArgs) -> Result<()> {
    let output = build_input(&args.input, ctx.build_options())?;
    warn_diagnostics(ctx, &output.diagnostics);

    if args.compact {
        let json = serde_json::to_string(&output.tree).context("failed to serialize tree")?;
        println!("{json}");
    } else {
        output_json(&output.tree);
    }
    Ok(())
}
