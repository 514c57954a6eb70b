//! Artifact storage

use crate::export::{ExportError, ExportResult};
use std::fs;
use std::path::PathBuf;

/// Destination for rendered artifacts
pub trait ArtifactStore: Send + Sync {
    /// Writes `bytes` under `name`, returning where the artifact ended up
    fn store(&self, name: &str, bytes: &[u8]) -> ExportResult<String>;
}

/// Writes artifacts as files in one directory
#[derive(Debug, Clone)]
pub struct FsStore {
    directory: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `directory`; the directory is created on first write
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl ArtifactStore for FsStore {
    fn store(&self, name: &str, bytes: &[u8]) -> ExportResult<String> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ExportError::Write(format!("invalid artifact name '{}'", name)));
        }

        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(name);
        fs::write(&path, bytes)?;

        tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path.display().to_string())
    }
}
