use thiserror::Error;

/// Opaque unit of persisted state, one per snapshot key.
pub type Blob = serde_json::Value;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot '{0}' not found")]
    Missing(String),

    #[error("Malformed snapshot '{key}': {reason}")]
    Malformed { key: String, reason: String },

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value persistence consumed by the personality store. Implementations
/// report failure through `None` / `false` and never panic.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStorage: Send + Sync {
    fn load(&self, key: &str) -> Option<Blob>;
    fn save(&self, key: &str, blob: &Blob) -> bool;
}
