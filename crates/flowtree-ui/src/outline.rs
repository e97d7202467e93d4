//! Indented terminal outline of a display tree.

use flowtree_core::DisplayNode;

use crate::styles::{Styles, TREE_BRANCH, TREE_INDENT, TREE_LAST, TREE_PIPE};
use crate::terminal::DEFAULT_WIDTH;
use crate::wrap::{display_width, wrap_words};

/// Descriptions never wrap narrower than this, however deep the node.
const MIN_WRAP_WIDTH: usize = 20;

/// Options for [`render_outline`].
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Total line width descriptions wrap to.
    pub width: usize,
    pub descriptions: bool,
    /// Highlight nodes matching this query and dim the rest.
    pub search: Option<String>,
    pub styles: Styles,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            descriptions: true,
            search: None,
            styles: Styles::plain(),
        }
    }
}

/// Render `tree` as one line per node with box-drawing connectors.
///
/// Descriptions follow their node's line, wrapped to the remaining width.
/// The walk uses an explicit stack, so tree depth is not limited by the
/// call stack.
pub fn render_outline(tree: &DisplayNode, options: &OutlineOptions) -> String {
    let styles = options.styles;
    let query = options
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let mut out = String::new();
    // (node, prefix, Some(is_last) for every node but the root)
    let mut stack: Vec<(&DisplayNode, String, Option<bool>)> = vec![(tree, String::new(), None)];

    while let Some((node, prefix, last)) = stack.pop() {
        let (connector, child_prefix) = match last {
            None => ("", prefix.clone()),
            Some(true) => (TREE_LAST, format!("{prefix}{TREE_INDENT}")),
            Some(false) => (TREE_BRANCH, format!("{prefix}{TREE_PIPE}")),
        };

        let label = match query {
            Some(q) if node.matches(q) => styles.highlight(&node.name),
            Some(_) => styles.muted(&node.name),
            None => styles.label(node.kind(), &node.name),
        };
        out.push_str(&prefix);
        out.push_str(connector);
        out.push_str(&label);
        out.push('\n');

        if options.descriptions {
            if let Some(description) = node.description.as_deref() {
                let gutter = if node.children.is_empty() { "  " } else { "\u{2502} " };
                let desc_prefix = format!("{child_prefix}{gutter}");
                let available = options
                    .width
                    .saturating_sub(display_width(&desc_prefix))
                    .max(MIN_WRAP_WIDTH);
                for line in wrap_words(description, available as f64, |s| display_width(s) as f64) {
                    out.push_str(&desc_prefix);
                    out.push_str(&styles.muted(&line));
                    out.push('\n');
                }
            }
        }

        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, child_prefix.clone(), Some(i + 1 == count)));
        }
    }

    out
}
