//! Real worker invocation over `tokio::process`.

use crate::config::AppConfig;
use crate::ports::worker::{Verb, WorkerPort};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Spawns the external worker binary. The binary path comes from
/// configuration, resolved once; the child's `PATH` is prepended with the
/// binary's own directory so the tools it shells out to (ffmpeg) resolve to
/// the bundled copies.
pub struct SageWorker {
    bin: std::path::PathBuf,
    path_var: Option<OsString>,
}

impl SageWorker {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bin: config.worker_bin.clone(),
            path_var: augmented_path(&config.worker_bin),
        }
    }
}

/// Existing `PATH` with the worker's directory prepended. `None` when the
/// result would be no different from the inherited environment.
fn augmented_path(worker_bin: &std::path::Path) -> Option<OsString> {
    let dir = worker_bin.parent()?.to_path_buf();
    let mut entries = vec![dir];
    if let Some(existing) = std::env::var_os("PATH") {
        entries.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(entries).ok()
}

#[async_trait]
impl WorkerPort for SageWorker {
    async fn run(&self, verb: Verb, args: &[String]) -> io::Result<Output> {
        debug!(%verb, ?args, bin = %self.bin.display(), "invoking worker");

        let mut command = Command::new(&self.bin);
        command
            .arg(verb.as_str())
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // If the caller's timeout drops this future, the child goes too
            .kill_on_drop(true);
        if let Some(path) = &self.path_var {
            command.env("PATH", path);
        }

        let child = command.spawn()?;
        child.wait_with_output().await
    }
}
