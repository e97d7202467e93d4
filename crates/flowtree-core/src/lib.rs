//! Core of flowtree: flow documents in, display trees out.
//!
//! A flow document is YAML with a `flows` mapping; each flow is an ordered
//! list of steps named by `collect`, linked by `if`/`then`/`else` transitions
//! that point at other steps, at action chains, or at `END`. The builder turns
//! that step graph into a rooted [`tree::DisplayNode`] tree that renderers
//! consume without knowing anything about flows.

pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod flow;
pub mod parser;
pub mod tree;

pub use builder::{BuildOptions, BuildOutput, TreeBuilder, build_tree};
pub use diagnostic::{BuildMode, Diagnostic, DiagnosticKind};
pub use error::FlowError;
pub use flow::{FlowGraph, NextRef, StepId, StepRecord, Transition};
pub use tree::{DisplayNode, NodeKind, matches_text};
