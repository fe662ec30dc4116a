//! Upload store - keeps user CSV files on disk.
//!
//! Files are keyed by their sanitized name only. Saving under an existing
//! name replaces the old file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::validation::sanitize_filename;

/// Directory-backed store for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`. Nothing is touched on disk.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it does not exist yet.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Where a file with this name lives.
    ///
    /// The name is sanitized again so a request path can never point
    /// outside the store. `None` when nothing is left of it.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let safe = sanitize_filename(name);
        if safe.is_empty() {
            None
        } else {
            Some(self.dir.join(safe))
        }
    }

    /// Write `bytes` under `name`, replacing any existing file.
    ///
    /// `name` must already be sanitized.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        info!(file = %path.display(), bytes = bytes.len(), "upload stored");
        Ok(path)
    }

    /// Stored file names, sorted.
    pub fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(_) => return Vec::new(),
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}
