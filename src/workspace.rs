//! Per-task scratch directories.
//!
//! Every invocation gets its own directory under a process-private root so
//! request and response files never collide and stay readable for debugging
//! until the application exits.

use crate::domain::task::TaskId;
use crate::error::PipelineError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const INPUT_FILE: &str = "input.json";
pub const OUTPUT_JSON_FILE: &str = "output.json";
pub const OUTPUT_MEDIA_FILE: &str = "output.mp4";

#[derive(Clone, Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `vidSage` under the platform's per-user data directory, falling back
    /// to the system temp dir when no data directory exists (headless CI).
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("vidSage")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Idempotently create the scratch root.
    pub async fn ensure_root(&self) -> Result<(), PipelineError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Idempotently create `{root}/{taskId}` and return its path. Safe to
    /// call multiple times for the same id.
    pub async fn ensure_task_dir(&self, task_id: &TaskId) -> Result<PathBuf, PipelineError> {
        let dir = self.root.join(task_id.as_str());
        tokio::fs::create_dir_all(&dir).await?;
        debug!(task = %task_id, dir = %dir.display(), "task workspace ready");
        Ok(dir)
    }

    pub fn input_path(&self, task_id: &TaskId) -> PathBuf {
        self.root.join(task_id.as_str()).join(INPUT_FILE)
    }

    pub fn output_json_path(&self, task_id: &TaskId) -> PathBuf {
        self.root.join(task_id.as_str()).join(OUTPUT_JSON_FILE)
    }

    pub fn output_media_path(&self, task_id: &TaskId) -> PathBuf {
        self.root.join(task_id.as_str()).join(OUTPUT_MEDIA_FILE)
    }

    /// Recursively delete the scratch root and everything under it. Called
    /// once at shutdown; a missing or half-gone root must never fail the
    /// exit path, so problems are logged and swallowed.
    pub async fn purge_all(&self) {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => debug!(root = %self.root.display(), "workspace purged"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(root = %self.root.display(), "workspace purge failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_ensure_task_dir_is_idempotent() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("scratch"));
        workspace.ensure_root().await.unwrap();

        let task = TaskId::generate();
        let first = workspace.ensure_task_dir(&task).await.unwrap();
        let second = workspace.ensure_task_dir(&task).await.unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());

        // Exactly one directory under the root
        let entries = std::fs::read_dir(workspace.root()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_task_file_layout() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().to_path_buf());
        let task = TaskId::generate();

        let dir = workspace.root().join(task.as_str());
        assert_eq!(workspace.input_path(&task), dir.join("input.json"));
        assert_eq!(workspace.output_json_path(&task), dir.join("output.json"));
        assert_eq!(workspace.output_media_path(&task), dir.join("output.mp4"));
    }

    #[tokio::test]
    async fn test_purge_all_removes_everything() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("scratch"));
        let task = TaskId::generate();
        workspace.ensure_task_dir(&task).await.unwrap();
        tokio::fs::write(workspace.input_path(&task), "{}")
            .await
            .unwrap();

        workspace.purge_all().await;
        assert!(!workspace.root().exists());
    }

    #[tokio::test]
    async fn test_purge_all_tolerates_missing_root() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().join("never_created"));
        // Must not panic or error
        workspace.purge_all().await;
        workspace.purge_all().await;
    }
}
