//! Error types for the workspace crate.

use merkledb_store::StoreError;

/// Errors that can occur during staging and committing.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// Writing a staged record failed.
    #[error("failed to write object '{name}': {source}")]
    Add { name: String, source: StoreError },

    /// Writing the staging tree failed.
    #[error("failed to write tree: {0}")]
    WriteTree(#[source] StoreError),

    /// Writing the commit object failed.
    #[error("failed to create commit: {0}")]
    Commit(#[source] StoreError),

    /// The named entry is not staged.
    #[error("entry not staged: {0}")]
    NotStaged(String),

    /// Any other store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl WorkspaceError {
    /// The underlying store error, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Add { source, .. } => Some(source),
            Self::WriteTree(e) | Self::Commit(e) | Self::Store(e) => Some(e),
            Self::NotStaged(_) => None,
        }
    }
}

/// Convenience alias for workspace results.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
