//! Flow model -- one pass over a flow's YAML into an indexed step graph.
//!
//! A [`FlowGraph`] owns the steps of a single flow in source order together
//! with a name index, so that step references resolve by lookup instead of
//! by re-scanning the step list. Everything that can be wrong with a flow's
//! shape is detected here and recorded as a [`Diagnostic`]; the builder only
//! adds findings that depend on the traversal (cycles, limits).

use std::collections::HashMap;

use serde_yaml::Value;

use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// The literal marking a terminal transition.
pub const END_MARKER: &str = "END";

/// Index of a step inside its [`FlowGraph`].
pub type StepId = usize;

/// Target of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextRef {
    /// Terminal marker.
    End,
    /// A side-effecting action, optionally followed by another reference.
    Action {
        action: String,
        next: Option<Box<NextRef>>,
    },
    /// Another step of the same flow, by `collect` name.
    Step(String),
}

/// An outgoing edge of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// `{if: condition, then: target}`. `then` is `None` when it was missing or malformed.
    ///
    /// Any non-null `if` counts, including `false` and `""`.
    If {
        condition: String,
        then: Option<NextRef>,
        location: String,
    },
    /// `{else: target}`. `target` is `None` when it was malformed.
    Else {
        target: Option<NextRef>,
        location: String,
    },
}

impl Transition {
    pub fn location(&self) -> &str {
        match self {
            Transition::If { location, .. } | Transition::Else { location, .. } => location,
        }
    }

    pub fn target(&self) -> Option<&NextRef> {
        match self {
            Transition::If { then, .. } => then.as_ref(),
            Transition::Else { target, .. } => target.as_ref(),
        }
    }
}

/// A step of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// The step's `collect` value (empty when missing).
    pub name: String,
    pub description: Option<String>,
    pub transitions: Vec<Transition>,
    /// Document location, e.g. `flows.signup.steps[2]`.
    pub location: String,
}

/// The steps of one flow, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    /// Key of the flow in the `flows` mapping.
    pub key: String,
    /// Display name: the flow's `name`, or its key when `name` is missing.
    pub name: String,
    pub description: Option<String>,
    steps: Vec<StepRecord>,
    index: HashMap<String, StepId>,
    diagnostics: Vec<Diagnostic>,
}

impl FlowGraph {
    /// Read a flow definition.
    ///
    /// Never fails: shape problems become diagnostics and the offending
    /// entries are dropped (or kept as empty placeholders for steps, so that
    /// the first step stays the first step).
    pub fn from_value(key: &str, flow: &Value) -> Self {
        let location = format!("flows.{key}");
        let mut graph = FlowGraph {
            key: key.to_string(),
            name: key.to_string(),
            ..Default::default()
        };

        if !flow.is_mapping() {
            graph.report(&location, DiagnosticKind::FlowNotMapping);
            return graph;
        }

        if let Some(name) = field(flow, "name").and_then(scalar_string) {
            graph.name = name;
        }
        graph.description = field(flow, "description").and_then(scalar_string);

        match field(flow, "steps") {
            None => {}
            Some(Value::Sequence(steps)) => graph.read_steps(&location, steps),
            Some(_) => graph.report(&format!("{location}.steps"), DiagnosticKind::StepsNotSequence),
        }
        graph
    }

    /// Build a graph straight from a `steps` sequence, outside of any document.
    pub fn from_steps(key: &str, steps: &[Value]) -> Self {
        let mut graph = FlowGraph {
            key: key.to_string(),
            name: key.to_string(),
            ..Default::default()
        };
        graph.read_steps(&format!("flows.{key}"), steps);
        graph
    }

    /// The step a flow starts from.
    pub fn entry(&self) -> Option<StepId> {
        if self.steps.is_empty() { None } else { Some(0) }
    }

    /// Find a step by `collect` name. The first definition wins.
    pub fn lookup(&self, name: &str) -> Option<StepId> {
        self.index.get(name).copied()
    }

    pub fn step(&self, id: StepId) -> Option<&StepRecord> {
        self.steps.get(id)
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Findings from reading the flow, in document order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn report(&mut self, location: &str, kind: DiagnosticKind) {
        self.diagnostics
            .push(Diagnostic::new(self.key.clone(), location, kind));
    }

    fn read_steps(&mut self, flow_location: &str, steps: &[Value]) {
        // Step references are checked once every name is indexed, since they
        // may point forward.
        let mut references: Vec<(String, String)> = Vec::new();

        for (i, value) in steps.iter().enumerate() {
            let location = format!("{flow_location}.steps[{i}]");
            let record = self.read_step(&location, value, &mut references);
            if !record.name.is_empty() {
                if self.index.contains_key(&record.name) {
                    self.report(
                        &location,
                        DiagnosticKind::DuplicateStep {
                            name: record.name.clone(),
                        },
                    );
                } else {
                    self.index.insert(record.name.clone(), self.steps.len());
                }
            }
            self.steps.push(record);
        }

        for (name, location) in references {
            if !self.index.contains_key(&name) {
                self.report(&location, DiagnosticKind::UnresolvedStep { name });
            }
        }
    }

    fn read_step(
        &mut self,
        location: &str,
        value: &Value,
        references: &mut Vec<(String, String)>,
    ) -> StepRecord {
        let mut record = StepRecord {
            name: String::new(),
            description: None,
            transitions: Vec::new(),
            location: location.to_string(),
        };

        if !value.is_mapping() {
            self.report(location, DiagnosticKind::StepNotMapping);
            return record;
        }

        match field(value, "collect").and_then(scalar_string) {
            Some(name) if !name.is_empty() => record.name = name,
            _ => self.report(location, DiagnosticKind::MissingCollect),
        }
        record.description = field(value, "description").and_then(scalar_string);

        match field(value, "next") {
            None => {}
            Some(Value::Sequence(entries)) => {
                for (j, entry) in entries.iter().enumerate() {
                    let entry_location = format!("{location}.next[{j}]");
                    if let Some(t) = self.read_transition(&entry_location, entry, references) {
                        record.transitions.push(t);
                    }
                }
            }
            Some(_) => self.report(&format!("{location}.next"), DiagnosticKind::NextNotSequence),
        }
        record
    }

    fn read_transition(
        &mut self,
        location: &str,
        entry: &Value,
        references: &mut Vec<(String, String)>,
    ) -> Option<Transition> {
        if let Some(condition) = field(entry, "if") {
            let condition = scalar_string(condition).unwrap_or_default();
            let then = match field(entry, "then") {
                Some(target) => {
                    self.read_next_ref(&format!("{location}.then"), target, references)
                }
                None => {
                    self.report(location, DiagnosticKind::MissingThen);
                    None
                }
            };
            return Some(Transition::If {
                condition,
                then,
                location: location.to_string(),
            });
        }

        if let Some(target) = field(entry, "else") {
            let target = self.read_next_ref(&format!("{location}.else"), target, references);
            return Some(Transition::Else {
                target,
                location: location.to_string(),
            });
        }

        self.report(location, DiagnosticKind::MalformedTransition);
        None
    }

    fn read_next_ref(
        &mut self,
        location: &str,
        value: &Value,
        references: &mut Vec<(String, String)>,
    ) -> Option<NextRef> {
        match value {
            Value::Sequence(items) => {
                let action = items
                    .first()
                    .and_then(|first| field(first, "action").map(|a| (first, a)));
                let Some((first, action)) = action else {
                    self.report(location, DiagnosticKind::MalformedNextRef);
                    return None;
                };
                if items.len() > 1 {
                    self.report(
                        location,
                        DiagnosticKind::ExtraActionEntries {
                            ignored: items.len() - 1,
                        },
                    );
                }
                let next = field(first, "next").and_then(|next| {
                    self.read_next_ref(&format!("{location}[0].next"), next, references)
                });
                Some(NextRef::Action {
                    action: scalar_string(action).unwrap_or_default(),
                    next: next.map(Box::new),
                })
            }
            other => match scalar_string(other) {
                Some(s) if s == END_MARKER => Some(NextRef::End),
                Some(name) => {
                    references.push((name.clone(), location.to_string()));
                    Some(NextRef::Step(name))
                }
                None => {
                    self.report(location, DiagnosticKind::MalformedNextRef);
                    None
                }
            },
        }
    }
}

/// Look up a mapping key, treating `null` as absent.
pub(crate) fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// Read a scalar as text. Numbers and booleans use their YAML spelling.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flow(yaml: &str) -> FlowGraph {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        FlowGraph::from_value("f", &value)
    }

    #[test]
    fn reads_steps_in_order_and_indexes_names() {
        let g = flow(
            r#"
name: Signup
description: New user signup
steps:
  - collect: email
    description: Ask for email
    next:
      - if: valid
        then: password
      - else: END
  - collect: password
"#,
        );
        assert_eq!(g.name, "Signup");
        assert_eq!(g.description.as_deref(), Some("New user signup"));
        assert_eq!(g.len(), 2);
        assert_eq!(g.entry(), Some(0));
        assert_eq!(g.lookup("password"), Some(1));
        assert_eq!(g.lookup("missing"), None);
        assert!(g.diagnostics().is_empty());

        let email = g.step(0).unwrap();
        assert_eq!(email.description.as_deref(), Some("Ask for email"));
        assert_eq!(
            email.transitions[0],
            Transition::If {
                condition: "valid".into(),
                then: Some(NextRef::Step("password".into())),
                location: "flows.f.steps[0].next[0]".into(),
            }
        );
        assert_eq!(email.transitions[1].target(), Some(&NextRef::End));
    }

    #[test]
    fn flow_name_falls_back_to_key() {
        let g = flow("steps: []");
        assert_eq!(g.name, "f");
        assert!(g.is_empty());
        assert_eq!(g.entry(), None);
    }

    #[test]
    fn parses_nested_actions() {
        let g = flow(
            r#"
steps:
  - collect: a
    next:
      - else:
          - action: notify
            next:
              - action: log
                next: END
"#,
        );
        let target = g.step(0).unwrap().transitions[0].target().cloned();
        assert_eq!(
            target,
            Some(NextRef::Action {
                action: "notify".into(),
                next: Some(Box::new(NextRef::Action {
                    action: "log".into(),
                    next: Some(Box::new(NextRef::End)),
                })),
            })
        );
    }

    #[test]
    fn malformed_entries_become_diagnostics() {
        let g = flow(
            r#"
steps:
  - collect: a
    next:
      - foo: bar
      - if: x
      - else: ["END"]
      - else: ghost
  - description: no name
  - collect: a
"#,
        );
        let kinds: Vec<DiagnosticKind> = g.diagnostics().iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MalformedTransition,
                DiagnosticKind::MissingThen,
                DiagnosticKind::MalformedNextRef,
                DiagnosticKind::MissingCollect,
                DiagnosticKind::DuplicateStep { name: "a".into() },
                DiagnosticKind::UnresolvedStep {
                    name: "ghost".into()
                },
            ]
        );
        // The malformed transition is dropped, the others are kept.
        assert_eq!(g.step(0).unwrap().transitions.len(), 3);
        assert_eq!(g.diagnostics()[0].location, "flows.f.steps[0].next[0]");
        assert_eq!(g.diagnostics()[5].location, "flows.f.steps[0].next[3].else");
        // First definition of a duplicated name wins.
        assert_eq!(g.lookup("a"), Some(0));
    }

    #[test]
    fn forward_references_resolve() {
        let g = flow(
            r#"
steps:
  - collect: first
    next:
      - else: last
  - collect: last
"#,
        );
        assert!(g.diagnostics().is_empty());
    }

    #[test]
    fn non_mapping_flow_and_step() {
        let g = flow("just a string");
        assert_eq!(g.diagnostics()[0].kind, DiagnosticKind::FlowNotMapping);

        let g = flow("steps:\n  - 42\n");
        assert_eq!(g.len(), 1);
        assert_eq!(g.step(0).unwrap().name, "");
        assert_eq!(g.diagnostics()[0].kind, DiagnosticKind::StepNotMapping);
    }

    #[test]
    fn scalar_conditions_keep_yaml_spelling() {
        let g = flow(
            r#"
steps:
  - collect: 7
    next:
      - if: true
        then: END
"#,
        );
        let step = g.step(0).unwrap();
        assert_eq!(step.name, "7");
        assert!(matches!(&step.transitions[0], Transition::If { condition, .. } if condition == "true"));
    }

    #[test]
    fn extra_action_entries_are_reported() {
        let g = flow(
            r#"
steps:
  - collect: a
    next:
      - else:
          - action: one
          - action: two
"#,
        );
        assert_eq!(
            g.diagnostics()[0].kind,
            DiagnosticKind::ExtraActionEntries { ignored: 1 }
        );
    }
}
