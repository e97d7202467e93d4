//! Display tree -- the generic name/description/children structure handed to renderers.
//!
//! Node kinds are not tagged in the data: they are encoded by naming
//! convention (`"if: ..."`, `"action: ..."`, `"END"`, ...) so that downstream
//! consumers only ever see one node shape. [`NodeKind::classify`] recovers the
//! kind from a name when a renderer wants to style by kind.

use serde::{Deserialize, Serialize};

/// Label of the synthetic root node.
pub const ROOT_NAME: &str = "Root";
/// Label of terminal nodes.
pub const END_NAME: &str = "END";
/// Label of else-branch nodes.
pub const ELSE_NAME: &str = "else";
/// Label of nodes standing in for a subtree cut off by a build limit.
pub const TRUNCATED_NAME: &str = "...";

/// Name prefix of condition nodes.
pub const CONDITION_PREFIX: &str = "if: ";
/// Name prefix of action nodes.
pub const ACTION_PREFIX: &str = "action: ";
/// Name prefix of cycle marker nodes.
pub const CYCLE_PREFIX: &str = "cycle: ";

/// A node of the display tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNode {
    /// Visual label.
    pub name: String,

    /// Secondary text, shown under the label and in tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered child nodes.
    #[serde(default)]
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Create a childless node without a description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            children: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: DisplayNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    pub fn end() -> Self {
        Self::new(END_NAME)
    }

    pub fn else_branch() -> Self {
        Self::new(ELSE_NAME)
    }

    pub fn condition(condition: &str) -> Self {
        Self::new(format!("{CONDITION_PREFIX}{condition}"))
    }

    pub fn action(action: &str) -> Self {
        Self::new(format!("{ACTION_PREFIX}{action}"))
    }

    pub fn cycle(step: &str) -> Self {
        Self::new(format!("{CYCLE_PREFIX}{step}"))
    }

    pub fn truncated() -> Self {
        Self::new(TRUNCATED_NAME)
    }

    /// The kind of this node, derived from its name.
    pub fn kind(&self) -> NodeKind {
        NodeKind::classify(&self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        max
    }

    /// Pre-order iterator over this subtree.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Case-insensitive substring match over name and description.
    ///
    /// An empty (or all-whitespace) query matches every node.
    pub fn matches(&self, query: &str) -> bool {
        matches_text(&self.name, self.description.as_deref(), query)
    }
}

/// Case-insensitive substring search over a node's name and description.
/// An empty (or all-whitespace) query matches.
pub fn matches_text(name: &str, description: Option<&str>, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    name.to_lowercase().contains(&needle)
        || description.is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Pre-order traversal with an explicit stack.
pub struct PreOrder<'a> {
    stack: Vec<&'a DisplayNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a DisplayNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Kind of a display node, recovered from the naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    /// A flow or a step. The two are indistinguishable by name alone.
    Named,
    Action,
    Condition,
    Else,
    End,
    Cycle,
    Truncated,
}

impl NodeKind {
    /// Classify a node name.
    pub fn classify(name: &str) -> Self {
        match name {
            ROOT_NAME => NodeKind::Root,
            END_NAME => NodeKind::End,
            ELSE_NAME => NodeKind::Else,
            TRUNCATED_NAME => NodeKind::Truncated,
            _ if name.starts_with(CONDITION_PREFIX) => NodeKind::Condition,
            _ if name.starts_with(ACTION_PREFIX) => NodeKind::Action,
            _ if name.starts_with(CYCLE_PREFIX) => NodeKind::Cycle,
            _ => NodeKind::Named,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Named => "named",
            NodeKind::Action => "action",
            NodeKind::Condition => "condition",
            NodeKind::Else => "else",
            NodeKind::End => "end",
            NodeKind::Cycle => "cycle",
            NodeKind::Truncated => "truncated",
        }
    }
}
