//! Build display trees from flow documents.
//!
//! Expansion runs over an explicit work-list instead of mutual recursion.
//! Pending display nodes live in an arena with parent links; a step reference
//! whose target already appears among the ancestors of the referring node
//! becomes a childless cycle marker. Once the work-list drains, the arena is
//! folded into nested [`DisplayNode`]s from the last slot to the first, which
//! works because children are always allocated after their parent.

use std::collections::HashSet;

use serde_yaml::Value;
use tracing::{debug, trace};

use crate::diagnostic::{BuildMode, Diagnostic, DiagnosticKind};
use crate::error::{FlowError, Result};
use crate::flow::{FlowGraph, NextRef, StepId, Transition, field, scalar_string};
use crate::tree::DisplayNode;

/// Default maximum nesting depth below the root.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default maximum number of nodes in one tree.
pub const DEFAULT_MAX_NODES: usize = 100_000;

/// Knobs for a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub mode: BuildMode,
    /// Deepest level a node may sit at, counting the root as level 0.
    pub max_depth: usize,
    /// Most nodes a single tree may hold, root included.
    ///
    /// Truncation markers count against this. Every flow keeps its own node,
    /// so a limit below one plus the number of flows is exceeded by exactly
    /// those flow nodes.
    pub max_nodes: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mode: BuildMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self {
            mode: BuildMode::Strict,
            ..Self::default()
        }
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub tree: DisplayNode,
    /// Everything skipped or cut short, in the order it was found.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    /// Whether any diagnostic is an authoring error (as opposed to a cycle or limit note).
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_authoring_error)
    }
}

/// Build the display tree of a document with default (lenient) options.
///
/// A missing `flows` key yields a childless root. Malformed entries are
/// skipped silently; use [`TreeBuilder`] to inspect what was skipped.
pub fn build_tree(document: &Value) -> DisplayNode {
    // Lenient builds report problems as diagnostics and never return an error.
    TreeBuilder::default()
        .build(document)
        .map(|output| output.tree)
        .unwrap_or_else(|_| DisplayNode::root())
}

/// Builds display trees under a fixed set of [`BuildOptions`].
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the tree for a parsed document.
    ///
    /// # Errors
    ///
    /// Only in strict mode: [`FlowError::Strict`] for the first authoring
    /// error, or [`FlowError::LimitExceeded`] when the tree would have to be
    /// truncated.
    pub fn build(&self, document: &Value) -> Result<BuildOutput> {
        let mut sink = DiagnosticSink::new(self.options.mode);
        let mut root = DisplayNode::root();
        let mut budget = self.options.max_nodes.saturating_sub(1);

        match field(document, "flows") {
            None => debug!("document has no flows"),
            Some(Value::Mapping(flows)) => {
                for (index, (key, value)) in flows.iter().enumerate() {
                    let key = scalar_string(key).unwrap_or_default();
                    let graph = FlowGraph::from_value(&key, value);
                    for d in graph.diagnostics() {
                        sink.report(d.clone())?;
                    }
                    // Later flows keep one slot each for their Flow node.
                    let later = flows.len() - index - 1;
                    let share = budget.saturating_sub(later);
                    let (flow_node, used) = self.expand_flow(&graph, share, &mut sink)?;
                    budget = budget.saturating_sub(used);
                    root.children.push(flow_node);
                }
            }
            Some(_) => sink.report(Diagnostic::new("", "flows", DiagnosticKind::FlowsNotMapping))?,
        }

        debug!(
            flows = root.children.len(),
            diagnostics = sink.diagnostics.len(),
            "built display tree"
        );
        Ok(BuildOutput {
            tree: root,
            diagnostics: sink.diagnostics,
        })
    }

    /// Expand one flow into its Flow node using at most `budget` nodes.
    /// Returns the node and how many nodes it holds.
    ///
    /// The Flow node itself is kept even when `budget` is zero.
    fn expand_flow(
        &self,
        graph: &FlowGraph,
        budget: usize,
        sink: &mut DiagnosticSink,
    ) -> Result<(DisplayNode, usize)> {
        let mut flow_node = DisplayNode::new(graph.name.clone());
        flow_node.description = graph.description.clone();

        if budget == 0 {
            sink.limit(&self.options, Limit::Nodes, &format!("flows.{}", graph.key), &graph.key)?;
            return Ok((flow_node, 1));
        }

        debug!(flow = %graph.key, steps = graph.len(), "expanding flow");
        let mut expander = Expander::new(graph, &self.options, sink, flow_node, 1, budget);
        if let Some(entry) = graph.entry() {
            expander.push(Work::Enter {
                parent: 0,
                step: entry,
                location: "",
            });
        }
        expander.run()?;
        let used = expander.arena.len();
        Ok((expander.finish(), used))
    }
}

impl FlowGraph {
    /// Display subtree for one step, following its transitions.
    ///
    /// Uses default (lenient) options; cycles end in a cycle marker.
    pub fn step_node(&self, step: StepId) -> Option<DisplayNode> {
        let record = self.step(step)?;
        let options = BuildOptions::default();
        let mut sink = DiagnosticSink::new(options.mode);
        let mut expander = Expander::new(
            self,
            &options,
            &mut sink,
            DisplayNode::new(""),
            0,
            options.max_nodes,
        );
        expander.push(Work::Enter {
            parent: 0,
            step,
            location: &record.location,
        });
        expander.run().ok()?;
        expander.finish().children.into_iter().next()
    }

    /// Resolve a transition target to its display subtree.
    ///
    /// `None` when the target names a step that does not exist.
    pub fn resolve_next(&self, target: &NextRef) -> Option<DisplayNode> {
        let options = BuildOptions::default();
        let mut sink = DiagnosticSink::new(options.mode);
        let mut expander = Expander::new(
            self,
            &options,
            &mut sink,
            DisplayNode::new(""),
            0,
            options.max_nodes,
        );
        expander.push(Work::Next {
            parent: 0,
            target,
            location: "",
        });
        expander.run().ok()?;
        expander.finish().children.into_iter().next()
    }
}

// ---------------------------------------------------------------------------
// Diagnostics policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Limit {
    Depth,
    Nodes,
}

impl Limit {
    fn as_str(&self) -> &'static str {
        match self {
            Limit::Depth => "depth",
            Limit::Nodes => "node count",
        }
    }

    fn max(&self, options: &BuildOptions) -> usize {
        match self {
            Limit::Depth => options.max_depth,
            Limit::Nodes => options.max_nodes,
        }
    }
}

/// Collects diagnostics and applies the build mode.
struct DiagnosticSink {
    mode: BuildMode,
    diagnostics: Vec<Diagnostic>,
    limits_hit: HashSet<Limit>,
}

impl DiagnosticSink {
    fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            diagnostics: Vec::new(),
            limits_hit: HashSet::new(),
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        if self.mode == BuildMode::Strict && diagnostic.is_authoring_error() {
            return Err(FlowError::Strict(diagnostic));
        }
        trace!(%diagnostic, "skipping entry");
        self.diagnostics.push(diagnostic);
        Ok(())
    }

    /// Record a limit hit. Each limit is reported once per build.
    fn limit(&mut self, options: &BuildOptions, limit: Limit, location: &str, flow: &str) -> Result<()> {
        let max = limit.max(options);
        if self.mode == BuildMode::Strict {
            return Err(FlowError::LimitExceeded {
                limit: limit.as_str(),
                max,
                location: location.to_string(),
            });
        }
        if self.limits_hit.insert(limit) {
            debug!(limit = limit.as_str(), max, location, "truncating tree");
            self.diagnostics.push(Diagnostic::new(
                flow,
                location,
                DiagnosticKind::LimitExceeded {
                    limit: limit.as_str().to_string(),
                    max,
                },
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Work-list expansion
// ---------------------------------------------------------------------------

/// A display node waiting for its children.
struct Pending {
    node: DisplayNode,
    parent: Option<usize>,
    /// The step this node stands for, if it is a step node.
    step: Option<StepId>,
    depth: usize,
    children: Vec<usize>,
}

enum Work<'g> {
    /// Attach the node for `target` under `parent`.
    Next {
        parent: usize,
        target: &'g NextRef,
        location: &'g str,
    },
    /// Attach a step node for `step` under `parent`, or a cycle marker.
    Enter {
        parent: usize,
        step: StepId,
        location: &'g str,
    },
    /// Attach one child per transition of `step` under its node.
    Expand { node: usize, step: StepId },
}

struct Expander<'g, 's> {
    graph: &'g FlowGraph,
    options: &'g BuildOptions,
    sink: &'s mut DiagnosticSink,
    arena: Vec<Pending>,
    work: Vec<Work<'g>>,
    budget: usize,
    cycles_seen: HashSet<StepId>,
}

impl<'g, 's> Expander<'g, 's> {
    fn new(
        graph: &'g FlowGraph,
        options: &'g BuildOptions,
        sink: &'s mut DiagnosticSink,
        root: DisplayNode,
        root_depth: usize,
        budget: usize,
    ) -> Self {
        Self {
            graph,
            options,
            sink,
            arena: vec![Pending {
                node: root,
                parent: None,
                step: None,
                depth: root_depth,
                children: Vec::new(),
            }],
            work: Vec::new(),
            budget,
            cycles_seen: HashSet::new(),
        }
    }

    fn push(&mut self, work: Work<'g>) {
        self.work.push(work);
    }

    fn run(&mut self) -> Result<()> {
        while let Some(work) = self.work.pop() {
            match work {
                Work::Next {
                    parent,
                    target,
                    location,
                } => self.attach_next(parent, target, location)?,
                Work::Enter {
                    parent,
                    step,
                    location,
                } => self.enter_step(parent, step, location)?,
                Work::Expand { node, step } => self.expand_step(node, step)?,
            }
        }
        Ok(())
    }

    fn attach_next(&mut self, parent: usize, target: &'g NextRef, location: &'g str) -> Result<()> {
        match target {
            NextRef::End => {
                self.alloc(parent, DisplayNode::end(), None, location)?;
            }
            NextRef::Action { action, next } => {
                let node = self.alloc(parent, DisplayNode::action(action), None, location)?;
                if let (Some(node), Some(next)) = (node, next) {
                    self.push(Work::Next {
                        parent: node,
                        target: next,
                        location,
                    });
                }
            }
            NextRef::Step(name) => match self.graph.lookup(name) {
                Some(step) => self.enter_step(parent, step, location)?,
                // Already reported when the flow was read.
                None => trace!(name = %name, "unresolved step reference"),
            },
        }
        Ok(())
    }

    fn enter_step(&mut self, parent: usize, step: StepId, location: &'g str) -> Result<()> {
        let graph = self.graph;
        let Some(record) = graph.step(step) else {
            return Ok(());
        };

        if self.on_path(parent, step) {
            trace!(step = %record.name, "cycle detected");
            if self.cycles_seen.insert(step) {
                self.sink.report(Diagnostic::new(
                    graph.key.clone(),
                    location,
                    DiagnosticKind::Cycle {
                        name: record.name.clone(),
                    },
                ))?;
            }
            self.alloc(parent, DisplayNode::cycle(&record.name), None, location)?;
            return Ok(());
        }

        let mut node = DisplayNode::new(record.name.clone());
        node.description = record.description.clone();
        if let Some(node) = self.alloc(parent, node, Some(step), &record.location)? {
            self.push(Work::Expand { node, step });
        }
        Ok(())
    }

    fn expand_step(&mut self, node: usize, step: StepId) -> Result<()> {
        let graph = self.graph;
        let Some(record) = graph.step(step) else {
            return Ok(());
        };

        let mut follow_ups = Vec::new();
        for transition in &record.transitions {
            let branch = match transition {
                Transition::If { condition, .. } => DisplayNode::condition(condition),
                Transition::Else { .. } => DisplayNode::else_branch(),
            };
            let branch = self.alloc(node, branch, None, transition.location())?;
            if let (Some(branch), Some(target)) = (branch, transition.target()) {
                follow_ups.push(Work::Next {
                    parent: branch,
                    target,
                    location: transition.location(),
                });
            }
        }
        // Reversed so that earlier branches are expanded first.
        self.work.extend(follow_ups.into_iter().rev());
        Ok(())
    }

    /// Whether `step` is `from` itself or one of its ancestors.
    fn on_path(&self, from: usize, step: StepId) -> bool {
        let mut current = Some(from);
        while let Some(i) = current {
            if self.arena[i].step == Some(step) {
                return true;
            }
            current = self.arena[i].parent;
        }
        false
    }

    /// Add a node under `parent`. Returns `None` when a limit stopped it.
    ///
    /// A real node always leaves one free slot in the budget, so the parent
    /// that hits the node limit can still take a truncation marker.
    fn alloc(
        &mut self,
        parent: usize,
        node: DisplayNode,
        step: Option<StepId>,
        location: &str,
    ) -> Result<Option<usize>> {
        let depth = self.arena[parent].depth + 1;
        let limit = if self.arena.len() + 1 >= self.budget {
            Some(Limit::Nodes)
        } else if depth > self.options.max_depth {
            Some(Limit::Depth)
        } else {
            None
        };

        if let Some(limit) = limit {
            self.sink
                .limit(self.options, limit, location, &self.graph.key)?;
            // Only one marker per parent, and never past the budget.
            let marked = self.arena[parent]
                .children
                .last()
                .is_some_and(|&c| self.arena[c].node.name == crate::tree::TRUNCATED_NAME);
            if !marked && self.arena.len() < self.budget {
                self.insert(parent, DisplayNode::truncated(), None, depth);
            }
            return Ok(None);
        }

        Ok(Some(self.insert(parent, node, step, depth)))
    }

    fn insert(&mut self, parent: usize, node: DisplayNode, step: Option<StepId>, depth: usize) -> usize {
        let id = self.arena.len();
        self.arena.push(Pending {
            node,
            parent: Some(parent),
            step,
            depth,
            children: Vec::new(),
        });
        self.arena[parent].children.push(id);
        id
    }

    /// Fold the arena into a nested tree rooted at slot 0.
    fn finish(self) -> DisplayNode {
        let mut links = Vec::with_capacity(self.arena.len());
        let mut slots = Vec::with_capacity(self.arena.len());
        for pending in self.arena {
            links.push(pending.children);
            slots.push(Some(pending.node));
        }

        for i in (0..slots.len()).rev() {
            let children: Vec<DisplayNode> =
                links[i].iter().filter_map(|&c| slots[c].take()).collect();
            if let Some(node) = slots[i].as_mut() {
                node.children = children;
            }
        }
        slots
            .into_iter()
            .next()
            .flatten()
            .unwrap_or_else(DisplayNode::root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn names(node: &DisplayNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    const SCENARIO: &str = r#"
flows:
  a:
    name: A
    steps:
      - collect: s1
        next:
          - if: x>0
            then: s2
          - else: END
      - collect: s2
        next:
          - then: ["END"]
"#;

    #[test]
    fn builds_scenario_tree() {
        let tree = build_tree(&doc(SCENARIO));
        let expected = DisplayNode::root().with_child(
            DisplayNode::new("A").with_child(
                DisplayNode::new("s1")
                    .with_child(DisplayNode::condition("x>0").with_child(DisplayNode::new("s2")))
                    .with_child(DisplayNode::else_branch().with_child(DisplayNode::end())),
            ),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn missing_flows_gives_bare_root() {
        assert_eq!(build_tree(&doc("other: 1")), DisplayNode::root());
        assert_eq!(build_tree(&Value::Null), DisplayNode::root());
    }

    #[test]
    fn root_children_follow_flow_key_order() {
        let tree = build_tree(&doc(
            r#"
flows:
  zeta: {name: Z}
  alpha: {name: A}
  mid: {}
"#,
        ));
        assert_eq!(names(&tree), vec!["Z", "A", "mid"]);
        assert!(tree.children.iter().all(|f| f.children.is_empty()));
    }

    #[test]
    fn only_first_step_is_entered() {
        let tree = build_tree(&doc(
            r#"
flows:
  f:
    name: F
    description: only the first
    steps:
      - collect: one
      - collect: unreachable
"#,
        ));
        let flow = &tree.children[0];
        assert_eq!(flow.description.as_deref(), Some("only the first"));
        assert_eq!(names(flow), vec!["one"]);
        assert!(flow.children[0].children.is_empty());
    }

    #[test]
    fn action_with_continuation() {
        let tree = build_tree(&doc(
            r#"
flows:
  f:
    name: F
    steps:
      - collect: s
        next:
          - else:
              - action: notify
                next: END
"#,
        ));
        let else_node = &tree.children[0].children[0].children[0];
        assert_eq!(
            else_node,
            &DisplayNode::else_branch()
                .with_child(DisplayNode::action("notify").with_child(DisplayNode::end()))
        );
    }

    #[test]
    fn malformed_transition_skipped_siblings_kept() {
        let out = TreeBuilder::default()
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: s
        next:
          - foo: bar
          - if: ok
            then: END
"#,
            ))
            .unwrap();
        let step = &out.tree.children[0].children[0];
        assert_eq!(names(step), vec!["if: ok"]);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::MalformedTransition);
        assert!(out.has_errors());
    }

    #[test]
    fn unresolved_reference_leaves_branch_empty() {
        let tree = build_tree(&doc(
            r#"
flows:
  f:
    steps:
      - collect: s
        next:
          - if: go
            then: nowhere
"#,
        ));
        let condition = &tree.children[0].children[0].children[0];
        assert_eq!(condition.name, "if: go");
        assert!(condition.children.is_empty());
    }

    #[test]
    fn self_cycle_terminates_with_marker() {
        let out = TreeBuilder::default()
            .build(&doc(
                r#"
flows:
  retry:
    steps:
      - collect: ask
        next:
          - if: invalid
            then: ask
          - else: END
"#,
            ))
            .unwrap();
        let ask = &out.tree.children[0].children[0];
        assert_eq!(
            ask,
            &DisplayNode::new("ask")
                .with_child(DisplayNode::condition("invalid").with_child(DisplayNode::cycle("ask")))
                .with_child(DisplayNode::else_branch().with_child(DisplayNode::end()))
        );
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::Cycle { name: "ask".into() }
        );
        assert!(!out.has_errors());
    }

    #[test]
    fn indirect_cycle_through_action() {
        let tree = build_tree(&doc(
            r#"
flows:
  f:
    steps:
      - collect: a
        next:
          - else: b
      - collect: b
        next:
          - else:
              - action: log
                next: a
"#,
        ));
        let a = &tree.children[0].children[0];
        let action = &a.children[0].children[0].children[0].children[0];
        assert_eq!(action.name, "action: log");
        assert_eq!(action.children, vec![DisplayNode::cycle("a")]);
    }

    #[test]
    fn shared_steps_are_duplicated_not_flagged() {
        let out = TreeBuilder::default()
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: a
        next:
          - if: left
            then: done
          - else: done
      - collect: done
        next:
          - else: END
"#,
            ))
            .unwrap();
        let a = &out.tree.children[0].children[0];
        assert_eq!(a.children[0].children[0].name, "done");
        assert_eq!(a.children[1].children[0].name, "done");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn strict_mode_fails_on_first_authoring_error() {
        let err = TreeBuilder::new(BuildOptions::strict())
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: s
        next:
          - foo: bar
"#,
            ))
            .unwrap_err();
        match err {
            FlowError::Strict(d) => {
                assert_eq!(d.kind, DiagnosticKind::MalformedTransition);
                assert_eq!(d.location, "flows.f.steps[0].next[0]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_accepts_cycles() {
        let out = TreeBuilder::new(BuildOptions::strict())
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: a
        next:
          - else: a
"#,
            ))
            .unwrap();
        assert_eq!(out.diagnostics.len(), 1);
    }

    #[test]
    fn depth_limit_truncates_in_lenient_mode() {
        let options = BuildOptions {
            max_depth: 3,
            ..BuildOptions::default()
        };
        let out = TreeBuilder::new(options)
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: a
        next:
          - else: b
      - collect: b
"#,
            ))
            .unwrap();
        // Root(0) -> Flow(1) -> a(2) -> else(3) -> b would be level 4.
        let else_node = &out.tree.children[0].children[0].children[0];
        assert_eq!(else_node.children, vec![DisplayNode::truncated()]);
        assert!(matches!(
            out.diagnostics[0].kind,
            DiagnosticKind::LimitExceeded { max: 3, .. }
        ));
    }

    #[test]
    fn node_limit_fails_in_strict_mode() {
        let options = BuildOptions {
            max_nodes: 3,
            ..BuildOptions::strict()
        };
        let err = TreeBuilder::new(options)
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: a
        next:
          - else: END
"#,
            ))
            .unwrap_err();
        assert!(matches!(err, FlowError::LimitExceeded { max: 3, .. }));
    }

    #[test]
    fn node_limit_truncates_within_budget() {
        let options = BuildOptions {
            max_nodes: 5,
            ..BuildOptions::default()
        };
        let out = TreeBuilder::new(options)
            .build(&doc(
                r#"
flows:
  f:
    steps:
      - collect: a
        next:
          - if: "1"
            then: b
          - if: "2"
            then: b
          - if: "3"
            then: b
          - if: "4"
            then: b
      - collect: b
  g:
    name: G
    description: second flow
    steps:
      - collect: c
"#,
            ))
            .unwrap();

        assert!(out.tree.count() <= 5, "tree has {} nodes", out.tree.count());
        assert_eq!(names(&out.tree), vec!["f", "G"]);
        let f = &out.tree.children[0];
        assert_eq!(
            f,
            &DisplayNode::new("f").with_child(DisplayNode::new("a").with_child(DisplayNode::truncated()))
        );
        let g = &out.tree.children[1];
        assert_eq!(g.description.as_deref(), Some("second flow"));
        assert!(g.children.is_empty());
        let limits = out
            .diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::LimitExceeded { max: 5, .. }))
            .count();
        assert_eq!(limits, 1);
        assert!(!out.has_errors());
    }

    #[test]
    fn flow_nodes_survive_an_exhausted_budget() {
        let options = BuildOptions {
            max_nodes: 2,
            ..BuildOptions::default()
        };
        let out = TreeBuilder::new(options)
            .build(&doc(
                r#"
flows:
  first:
    steps:
      - collect: a
  second:
    name: Second
    steps:
      - collect: b
"#,
            ))
            .unwrap();
        assert_eq!(names(&out.tree), vec!["first", "Second"]);
        assert!(out.tree.children.iter().all(|f| f.children.is_empty()));
        assert_eq!(out.tree.count(), 3);
    }

    #[test]
    fn flows_not_a_mapping() {
        let out = TreeBuilder::default().build(&doc("flows: [1, 2]")).unwrap();
        assert!(out.tree.children.is_empty());
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::FlowsNotMapping);
    }

    #[test]
    fn building_twice_is_identical() {
        let value = doc(SCENARIO);
        assert_eq!(build_tree(&value), build_tree(&value));
    }

    #[test]
    fn step_node_and_resolve_next() {
        let value = doc(SCENARIO);
        let steps = value["flows"]["a"]["steps"].as_sequence().unwrap();
        let graph = FlowGraph::from_steps("a", steps);

        let s2 = graph.step_node(1).unwrap();
        assert_eq!(s2, DisplayNode::new("s2"));

        assert_eq!(graph.resolve_next(&NextRef::End), Some(DisplayNode::end()));
        assert_eq!(
            FlowGraph::default().resolve_next(&NextRef::End),
            Some(DisplayNode::end())
        );
        assert_eq!(graph.resolve_next(&NextRef::Step("ghost".into())), None);
        assert_eq!(
            graph.resolve_next(&NextRef::Step("s2".into())),
            Some(DisplayNode::new("s2"))
        );
        assert_eq!(graph.step_node(9), None);
    }
}
