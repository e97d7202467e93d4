//! Errors raised while loading flow documents and building display trees.

use crate::diagnostic::Diagnostic;

/// Errors that can occur during document loading and tree building.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The input was not valid YAML.
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The input could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Strict mode rejected a malformed entry.
    #[error("malformed flow document: {0}")]
    Strict(Diagnostic),

    /// Strict mode refused to truncate the tree.
    #[error("tree exceeds the {limit} limit of {max} at {location}")]
    LimitExceeded {
        /// Which limit was hit ("depth" or "node count").
        limit: &'static str,
        /// The configured maximum.
        max: usize,
        /// Document location of the entry being expanded.
        location: String,
    },
}

/// A specialized `Result` type for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;
