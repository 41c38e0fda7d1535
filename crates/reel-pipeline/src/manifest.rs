//! Per-job artifact manifest.
//!
//! Every path a job creates or takes ownership of is tracked here and
//! released on every exit path: failure sweeps everything, success
//! keeps only the durable artifacts. Deletion is best-effort; the
//! underlying storage offers no atomic multi-file delete, so errors
//! are logged and never escalated.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::job::JobId;

/// Tracks the artifact paths owned by one pipeline run.
#[derive(Debug)]
pub struct ArtifactManifest {
    job_id: JobId,
    paths: Vec<PathBuf>,
}

impl ArtifactManifest {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            paths: Vec::new(),
        }
    }

    /// Record a path before the stage that writes it runs, so partial
    /// output from a failed stage is swept too.
    pub fn track(&mut self, path: impl AsRef<Path>) {
        self.paths.push(path.as_ref().to_path_buf());
    }

    /// Stop tracking a path, keeping the file on disk.
    pub fn keep(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.paths.retain(|p| p != path);
    }

    /// Delete every tracked path, best-effort.
    pub async fn sweep(&mut self) {
        for path in self.paths.drain(..) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(job_id = %self.job_id, "Deleted {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(
                        job_id = %self.job_id,
                        "Failed to delete {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    /// Paths currently tracked (for tests and logging).
    pub fn tracked(&self) -> &[PathBuf] {
        &self.paths
    }
}
