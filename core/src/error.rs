use thiserror::Error;

/// Rejected input to a store mutation. Nothing is mutated when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("team name must not be empty")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Format(#[from] serde_json::Error),
}

/// Failure reading or writing persisted state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("storage poisoned")]
    Poisoned,
}
