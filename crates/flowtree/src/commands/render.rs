//! `flowtree render` -- write the tree as an SVG diagram.

use anyhow::{Context, Result};
use flowtree_ui::{RenderSession, layout_tree, render_svg};
use tracing::info;

use crate::cli::RenderArgs;
use crate::commands::build_input;
use crate::context::RuntimeContext;
use crate::output::{output_json, warn_diagnostics};

/// Execute the `flowtree render` command.
pub fn run(ctx: &RuntimeContext, args: &RenderArgs) -> Result<()> {
    let output = build_input(&args.input, ctx.build_options())?;
    warn_diagnostics(ctx, &output.diagnostics);

    let layout = layout_tree(&output.tree, &ctx.layout_options());
    let mut session = RenderSession::new(ctx.zoom_limits());
    for _ in 0..args.zoom.unsigned_abs() {
        if args.zoom > 0 {
            session.zoom_in();
        } else {
            session.zoom_out();
        }
    }
    let matches = args
        .search
        .as_deref()
        .map(|query| session.set_search(query, &layout));

    let svg = render_svg(&layout, &session, &ctx.svg_options());

    let Some(path) = &args.output else {
        print!("{svg}");
        return Ok(());
    };

    std::fs::write(path, &svg).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), nodes = layout.nodes.len(), "wrote diagram");

    if ctx.json {
        output_json(&serde_json::json!({
            "output": path.display().to_string(),
            "nodes": layout.nodes.len(),
            "matches": matches,
            "scale": session.zoom.scale,
        }));
    } else if !ctx.quiet {
        print!("Wrote {} ({} nodes", path.display(), layout.nodes.len());
        if let Some(count) = matches {
            print!(", {count} matching");
        }
        println!(")");
    }
    Ok(())
}
