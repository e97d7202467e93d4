//! Build policy and the diagnostics collected while reading a flow document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the builder treats malformed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Skip malformed entries and keep going, recording a diagnostic.
    #[default]
    Lenient,
    /// Fail the whole build on the first authoring error.
    Strict,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Lenient => "lenient",
            BuildMode::Strict => "strict",
        }
    }
}

impl std::str::FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(BuildMode::Lenient),
            "strict" => Ok(BuildMode::Strict),
            other => Err(format!("unknown build mode '{other}' (expected lenient or strict)")),
        }
    }
}

/// What was wrong with an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `flows` is present but not a mapping.
    FlowsNotMapping,
    /// A flow entry is not a mapping.
    FlowNotMapping,
    /// `steps` is present but not a sequence.
    StepsNotSequence,
    /// A step entry is not a mapping.
    StepNotMapping,
    /// A step has no usable `collect` name.
    MissingCollect,
    /// A `collect` name is used by an earlier step; references resolve to the first.
    DuplicateStep { name: String },
    /// `next` is present but not a sequence.
    NextNotSequence,
    /// A `next` entry has neither an `if` nor an `else` key.
    MalformedTransition,
    /// An `if` entry without `then`.
    MissingThen,
    /// A next reference is neither `END`, an action list, nor a step name.
    MalformedNextRef,
    /// An action list carries more than one entry; only the first is used.
    ExtraActionEntries { ignored: usize },
    /// A step name that no step in the flow carries.
    UnresolvedStep { name: String },
    /// A reference back to a step already on the current path.
    Cycle { name: String },
    /// Expansion stopped at a build limit.
    LimitExceeded { limit: String, max: usize },
}

impl DiagnosticKind {
    /// Whether strict mode treats this as a failure.
    ///
    /// Cycles are loops in the flow (retries, re-prompts) and are reported
    /// but never rejected. Limits have their own error in strict mode.
    pub fn is_authoring_error(&self) -> bool {
        !matches!(
            self,
            DiagnosticKind::Cycle { .. } | DiagnosticKind::LimitExceeded { .. }
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::FlowsNotMapping => write!(f, "`flows` is not a mapping"),
            DiagnosticKind::FlowNotMapping => write!(f, "flow is not a mapping"),
            DiagnosticKind::StepsNotSequence => write!(f, "`steps` is not a sequence"),
            DiagnosticKind::StepNotMapping => write!(f, "step is not a mapping"),
            DiagnosticKind::MissingCollect => write!(f, "step has no `collect` name"),
            DiagnosticKind::DuplicateStep { name } => {
                write!(f, "step '{name}' is defined more than once")
            }
            DiagnosticKind::NextNotSequence => write!(f, "`next` is not a sequence"),
            DiagnosticKind::MalformedTransition => {
                write!(f, "transition has neither `if` nor `else`")
            }
            DiagnosticKind::MissingThen => write!(f, "`if` transition has no `then`"),
            DiagnosticKind::MalformedNextRef => {
                write!(f, "next reference is not END, an action, or a step name")
            }
            DiagnosticKind::ExtraActionEntries { ignored } => {
                write!(f, "action list has {ignored} extra entries that are ignored")
            }
            DiagnosticKind::UnresolvedStep { name } => {
                write!(f, "no step named '{name}'")
            }
            DiagnosticKind::Cycle { name } => write!(f, "step '{name}' loops back to itself"),
            DiagnosticKind::LimitExceeded { limit, max } => {
                write!(f, "{limit} limit of {max} reached, subtree truncated")
            }
        }
    }
}

/// One finding about the document, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Key of the flow the entry belongs to (empty for document-level findings).
    pub flow: String,

    /// Dotted path to the entry, e.g. `flows.signup.steps[1].next[0]`.
    pub location: String,

    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(flow: impl Into<String>, location: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            flow: flow.into(),
            location: location.into(),
            kind,
        }
    }

    pub fn is_authoring_error(&self) -> bool {
        self.kind.is_authoring_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}
