//! Horizontal tree layout for the diagram renderer.
//!
//! Depth runs left to right; leaves are stacked top to bottom in pre-order.
//! Adjacent leaves sharing a parent are two row units apart, leaves of
//! different parents three. Every parent is centred between its first and
//! last child.

use flowtree_core::{DisplayNode, NodeKind};
use tracing::debug;

/// Index of a node in [`Layout::nodes`], assigned in pre-order.
pub type NodeId = usize;

/// Row units between adjacent leaves with the same parent.
const SIBLING_GAP: f64 = 2.0;
/// Row units between adjacent leaves with different parents.
const COUSIN_GAP: f64 = 3.0;

/// Geometry for [`layout_tree`]. Lengths are SVG user units.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub node_width: f64,
    pub node_height: f64,
    pub level_spacing: f64,
    pub row_unit: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 300.0,
            node_height: 100.0,
            level_spacing: 400.0,
            row_unit: 60.0,
            margin_left: 100.0,
            margin_top: 50.0,
            min_width: 2000.0,
            min_height: 800.0,
        }
    }
}

/// A positioned node. `(x, y)` is the node's anchor dot, relative to the
/// margin-translated origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub description: Option<String>,
    pub kind: NodeKind,
    pub has_children: bool,
}

impl LaidOutNode {
    /// Left edge of the background box: to the left of the dot for parents,
    /// to the right for leaves.
    pub fn box_x(&self, node_width: f64) -> f64 {
        if self.has_children { -node_width } else { 10.0 }
    }

    pub fn matches(&self, query: &str) -> bool {
        flowtree_core::matches_text(&self.name, self.description.as_deref(), query)
    }

    /// Name, then description on the next line if present.
    pub fn tooltip_text(&self) -> String {
        match self.description.as_deref() {
            Some(description) => format!("{}\n{}", self.name, description),
            None => self.name.clone(),
        }
    }
}

/// Parent-to-child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
}

/// Result of [`layout_tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Nodes in pre-order; `nodes[i].id == i` and the root is `0`.
    pub nodes: Vec<LaidOutNode>,
    pub links: Vec<Link>,
    /// Canvas size including margins, at least the configured minimum.
    pub width: f64,
    pub height: f64,
    pub options: LayoutOptions,
}

impl Layout {
    pub fn node(&self, id: NodeId) -> Option<&LaidOutNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &LaidOutNode {
        &self.nodes[0]
    }

    /// Children of `id`, in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &LaidOutNode> + '_ {
        self.links
            .iter()
            .filter(move |link| link.source == id)
            .filter_map(|link| self.nodes.get(link.target))
    }
}

/// Position every node of `tree`.
pub fn layout_tree(tree: &DisplayNode, options: &LayoutOptions) -> Layout {
    let mut nodes: Vec<LaidOutNode> = Vec::new();
    let mut children: Vec<Vec<NodeId>> = Vec::new();
    let mut stack: Vec<(&DisplayNode, Option<NodeId>, usize)> = vec![(tree, None, 0)];

    while let Some((node, parent, depth)) = stack.pop() {
        let id = nodes.len();
        nodes.push(LaidOutNode {
            id,
            parent,
            depth,
            x: depth as f64 * options.level_spacing,
            y: 0.0,
            name: node.name.clone(),
            description: node.description.clone(),
            kind: node.kind(),
            has_children: !node.children.is_empty(),
        });
        children.push(Vec::new());
        if let Some(p) = parent {
            children[p].push(id);
        }
        for child in node.children.iter().rev() {
            stack.push((child, Some(id), depth + 1));
        }
    }

    // Leaves in pre-order get increasing rows.
    let mut previous_leaf: Option<NodeId> = None;
    let mut cursor = 0.0;
    for id in 0..nodes.len() {
        if !children[id].is_empty() {
            continue;
        }
        if let Some(prev) = previous_leaf {
            let gap = if nodes[prev].parent == nodes[id].parent {
                SIBLING_GAP
            } else {
                COUSIN_GAP
            };
            cursor += gap * options.row_unit;
        }
        nodes[id].y = cursor;
        previous_leaf = Some(id);
    }

    // Children always follow their parent in pre-order.
    for id in (0..nodes.len()).rev() {
        if let (Some(&first), Some(&last)) = (children[id].first(), children[id].last()) {
            nodes[id].y = (nodes[first].y + nodes[last].y) / 2.0;
        }
    }

    let links = nodes
        .iter()
        .filter_map(|n| n.parent.map(|p| Link { source: p, target: n.id }))
        .collect();

    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    let width = (options.margin_left * 2.0
        + max_depth as f64 * options.level_spacing
        + options.node_width
        + 10.0)
        .max(options.min_width);
    let height = (options.margin_top * 2.0 + cursor + options.node_height).max(options.min_height);

    debug!(nodes = nodes.len(), max_depth, width, height, "laid out tree");

    Layout {
        nodes,
        links,
        width,
        height,
        options: options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn opts() -> LayoutOptions {
        LayoutOptions {
            row_unit: 10.0,
            level_spacing: 100.0,
            ..LayoutOptions::default()
        }
    }

    fn sample() -> DisplayNode {
        // Root -> A -> {a1, a2}, B -> {b1}
        DisplayNode::root()
            .with_child(
                DisplayNode::new("A")
                    .with_child(DisplayNode::new("a1"))
                    .with_child(DisplayNode::new("a2")),
            )
            .with_child(DisplayNode::new("B").with_child(DisplayNode::new("b1")))
    }

    fn by_name<'a>(layout: &'a Layout, name: &str) -> &'a LaidOutNode {
        layout.nodes.iter().find(|n| n.name == name).unwrap()
    }

    #[test]
    fn ids_are_preorder() {
        let layout = layout_tree(&sample(), &opts());
        let names: Vec<&str> = layout.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "A", "a1", "a2", "B", "b1"]);
        assert!(layout.nodes.iter().enumerate().all(|(i, n)| n.id == i));
        assert_eq!(layout.root().parent, None);
    }

    #[test]
    fn depth_maps_to_x() {
        let layout = layout_tree(&sample(), &opts());
        assert_eq!(by_name(&layout, "Root").x, 0.0);
        assert_eq!(by_name(&layout, "A").x, 100.0);
        assert_eq!(by_name(&layout, "b1").x, 200.0);
    }

    #[test]
    fn siblings_closer_than_cousins() {
        let layout = layout_tree(&sample(), &opts());
        let a1 = by_name(&layout, "a1").y;
        let a2 = by_name(&layout, "a2").y;
        let b1 = by_name(&layout, "b1").y;
        assert_eq!(a2 - a1, 20.0);
        assert_eq!(b1 - a2, 30.0);
    }

    #[test]
    fn parents_are_centred_over_children() {
        let layout = layout_tree(&sample(), &opts());
        assert_eq!(by_name(&layout, "A").y, 10.0);
        assert_eq!(by_name(&layout, "B").y, 50.0);
        assert_eq!(by_name(&layout, "Root").y, 30.0);
    }

    #[test]
    fn links_follow_tree_edges() {
        let layout = layout_tree(&sample(), &opts());
        assert_eq!(layout.links.len(), layout.nodes.len() - 1);
        let kids: Vec<&str> = layout.children(1).map(|n| n.name.as_str()).collect();
        assert_eq!(kids, vec!["a1", "a2"]);
    }

    #[test]
    fn canvas_respects_minimum_and_grows() {
        let small = layout_tree(&sample(), &LayoutOptions::default());
        assert_eq!(small.width, 2000.0);
        assert_eq!(small.height, 800.0);

        let mut wide = DisplayNode::root();
        for i in 0..40 {
            wide = wide.with_child(DisplayNode::new(format!("leaf {i}")));
        }
        let big = layout_tree(&wide, &LayoutOptions::default());
        assert!(big.height > 800.0);
        let last = big.nodes.last().unwrap();
        assert!(last.y + 50.0 + 50.0 <= big.height);
    }

    #[test]
    fn single_root_sits_at_origin() {
        let layout = layout_tree(&DisplayNode::root(), &opts());
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!((layout.root().x, layout.root().y), (0.0, 0.0));
        assert!(!layout.root().has_children);
        assert!(layout.links.is_empty());
    }

    #[test]
    fn box_sits_left_of_parents() {
        let layout = layout_tree(&sample(), &opts());
        assert_eq!(by_name(&layout, "A").box_x(300.0), -300.0);
        assert_eq!(by_name(&layout, "a1").box_x(300.0), 10.0);
    }
}
