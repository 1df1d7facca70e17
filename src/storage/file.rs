use super::port::{Blob, SnapshotError, SnapshotStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each blob as `<dir>/<key>.json`. The directory is created on the
/// first save.
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    dir: PathBuf,
}

impl FileSnapshotStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }

    fn read_blob(&self, key: &str) -> Result<Blob, SnapshotError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(SnapshotError::Missing(key.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_blob(&self, key: &str, blob: &Blob) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(blob)?;

        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }
}

impl SnapshotStorage for FileSnapshotStorage {
    fn load(&self, key: &str) -> Option<Blob> {
        match self.read_blob(key) {
            Ok(blob) => Some(blob),
            Err(SnapshotError::Missing(_)) => {
                log::debug!("No snapshot stored for '{}' in {}", key, self.dir.display());
                None
            }
            Err(e) => {
                log::warn!("Failed to load snapshot '{}': {}", key, e);
                None
            }
        }
    }

    fn save(&self, key: &str, blob: &Blob) -> bool {
        match self.write_blob(key, blob) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save snapshot '{}': {}", key, e);
                false
            }
        }
    }
}
