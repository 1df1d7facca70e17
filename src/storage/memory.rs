use super::port::{Blob, SnapshotStorage};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local storage, mostly useful for tests and ephemeral agents.
#[derive(Debug, Default)]
pub struct MemorySnapshotStorage {
    blobs: Mutex<HashMap<String, Blob>>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().map(|blobs| blobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remove(&self, key: &str) -> Option<Blob> {
        self.blobs.lock().ok()?.remove(key)
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn load(&self, key: &str) -> Option<Blob> {
        self.blobs.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, blob: &Blob) -> bool {
        match self.blobs.lock() {
            Ok(mut blobs) => {
                blobs.insert(key.to_string(), blob.clone());
                true
            }
            Err(_) => {
                log::warn!("Failed to acquire snapshot lock for '{}'", key);
                false
            }
        }
    }
}
