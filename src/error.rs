use thiserror::Error;

use crate::domain::FlowKind;

/// Unified error type for flowrel operations
#[derive(Error, Debug)]
pub enum FlowrelError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    Version(String),

    #[error("unsupported bump type: {0}")]
    UnsupportedBump(String),

    #[error("unknown scheme: {0} (use 'calver' or 'semver')")]
    UnknownScheme(String),

    #[error("{kind} already in progress: {branch}")]
    AlreadyInProgress { kind: FlowKind, branch: String },

    #[error("no {kind} in progress")]
    NotInProgress { kind: FlowKind },

    #[error("multiple {} in progress: {}", .kind.plural(), .branches.join(", "))]
    MultipleInProgress {
        kind: FlowKind,
        branches: Vec<String>,
    },

    #[error("uncommitted changes in {0}")]
    DirtyWorkingTree(String),

    #[error("no {role} branch found (tried: {})", .tried.join(", "))]
    BranchNotFound {
        role: &'static str,
        tried: Vec<&'static str>,
    },

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("merge conflict merging '{branch}' into '{into}'")]
    MergeConflict { branch: String, into: String },

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in flowrel
pub type Result<T> = std::result::Result<T, FlowrelError>;

impl FlowrelError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FlowrelError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        FlowrelError::Version(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        FlowrelError::Branch(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        FlowrelError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        FlowrelError::Remote(msg.into())
    }
}
