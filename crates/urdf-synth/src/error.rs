//! Error types for URDF synthesis

/// Errors that can occur while turning an assembly snapshot into a URDF document
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthError {
    #[error(
        "Broken connection in joint '{joint}' between '{parent}' and '{child}': \
         check whether parent={parent} and child={child} are correct \
         or whether the two components need to be swapped"
    )]
    StructuralInconsistency {
        joint: String,
        parent: String,
        child: String,
    },

    #[error("Duplicate link name: {0}")]
    DuplicateLink(String),

    #[error("Duplicate joint name: {0}")]
    DuplicateJoint(String),

    #[error("Link '{child}' is the child of both '{first}' and '{second}'")]
    DuplicateChild {
        child: String,
        first: String,
        second: String,
    },

    #[error("Assembly has no 'base_link' body")]
    MissingRootLink,

    #[error("Failed to read assembly snapshot: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for synthesis operations
pub type SynthResult<T> = Result<T, SynthError>;
