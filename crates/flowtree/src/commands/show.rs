//! `flowtree show` -- print the tree as an indented outline.

use anyhow::Result;
use flowtree_ui::{OutlineOptions, pager, render_outline, terminal};

use crate::cli::ShowArgs;
use crate::commands::build_input;
use crate::context::RuntimeContext;
use crate::output::{output_json, warn_diagnostics};

/// Execute the `flowtree show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let output = build_input(&args.input, ctx.build_options())?;
    warn_diagnostics(ctx, &output.diagnostics);

    if ctx.json {
        output_json(&output.tree);
        return Ok(());
    }

    let options = OutlineOptions {
        width: args.width.unwrap_or_else(terminal::terminal_width),
        descriptions: ctx.config.output.descriptions && !args.no_descriptions,
        search: args.search.clone(),
        styles: ctx.styles(),
    };
    let text = render_outline(&output.tree, &options);

    if ctx.config.output.pager && !args.no_pager {
        pager::page(&text);
    } else {
        print!("{text}");
    }
    Ok(())
}
