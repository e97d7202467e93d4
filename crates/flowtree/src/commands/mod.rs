//! Command handlers, one module per subcommand.

pub mod build;
pub mod check;
pub mod completion;
pub mod config_cmd;
pub mod render;
pub mod show;
pub mod version;

use anyhow::{Context, Result};
use flowtree_core::parser::load_document;
use flowtree_core::{BuildOptions, BuildOutput, TreeBuilder};

use crate::cli::InputArgs;

/// Load the input document and build its tree under `options`.
pub(crate) fn build_input(input: &InputArgs, options: BuildOptions) -> Result<BuildOutput> {
    let document = load_document(&input.file)
        .with_context(|| format!("failed to load {}", input.file.display()))?;
    let output = TreeBuilder::new(options)
        .build(&document)
        .with_context(|| format!("failed to build {}", input.file.display()))?;
    tracing::debug!(
        nodes = output.tree.count(),
        diagnostics = output.diagnostics.len(),
        "built display tree"
    );
    Ok(output)
}
