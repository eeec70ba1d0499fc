use crate::application::credentials::CredentialStore;
use crate::domain::credentials::Credentials;
use crate::domain::media::{is_video_path, Segment, VideoFile, VideoSummary};
use crate::domain::task::TaskId;
use crate::error::PipelineError;
use crate::exchange::{self, RenderRequest, StorylineRequest, SummariesRequest};
use crate::ports::probe::CredentialProbe;
use crate::ports::worker::{Verb, WorkerPort};
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// How long shutdown waits for the worker's own cleanup before abandoning it.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Stage-scoped shared state. Each field is populated only by its stage and
/// is the sole input to the next one.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub uploaded_files: Vec<VideoFile>,
    pub summaries: Vec<VideoSummary>,
    pub storyline: Vec<Segment>,
    pub preview_path: Option<PathBuf>,
}

/// Sequences the editing pipeline: upload → summarize → storyline → render.
///
/// Each stage action reads its upstream field, records a request in a fresh
/// task workspace, delegates to the worker with the armed credentials, and
/// on success writes the downstream field. On failure downstream state is
/// left untouched and the typed error is surfaced to the caller.
///
/// Reassigning an upstream field clears every field downstream of it, so a
/// re-upload can never be rendered against a stale storyline.
pub struct PipelineService<W, P> {
    worker: W,
    credentials: Arc<CredentialStore<P>>,
    workspace: Workspace,
    invoke_timeout: Option<Duration>,
    state: RwLock<PipelineState>,
    // Single-active-task model: one stage action in flight, the rest blocked
    action: Mutex<()>,
}

impl<W, P> PipelineService<W, P>
where
    W: WorkerPort,
    P: CredentialProbe,
{
    pub fn new(
        worker: W,
        credentials: Arc<CredentialStore<P>>,
        workspace: Workspace,
        invoke_timeout: Option<Duration>,
    ) -> Self {
        Self {
            worker,
            credentials,
            workspace,
            invoke_timeout,
            state: RwLock::new(PipelineState::default()),
            action: Mutex::new(()),
        }
    }

    pub fn credentials(&self) -> &CredentialStore<P> {
        &self.credentials
    }

    /// Owned copy of the current stage state, for display.
    pub async fn snapshot(&self) -> PipelineState {
        self.state.read().await.clone()
    }

    /// Capture the paths picked in the file chooser as the upload set.
    /// Non-video extensions are dropped. Clears everything downstream.
    pub async fn set_uploaded_files(&self, paths: Vec<PathBuf>) -> Vec<VideoFile> {
        let files: Vec<VideoFile> = paths
            .iter()
            .filter(|p| is_video_path(p))
            .map(|p| VideoFile::from_path(p))
            .collect();

        let mut state = self.state.write().await;
        state.uploaded_files = files.clone();
        state.summaries.clear();
        state.storyline.clear();
        state.preview_path = None;
        info!(count = files.len(), "upload set replaced");
        files
    }

    /// Summarize every uploaded clip.
    pub async fn generate_summaries(&self) -> Result<Vec<VideoSummary>, PipelineError> {
        let _busy = self.begin_action()?;
        let credentials = self.armed_credentials().await?;
        let files = {
            let state = self.state.read().await;
            if state.uploaded_files.is_empty() {
                return Err(PipelineError::Blocked("no video files uploaded"));
            }
            state.uploaded_files.clone()
        };

        let task = TaskId::generate();
        self.workspace.ensure_task_dir(&task).await?;
        let input = self.workspace.input_path(&task);
        let output = self.workspace.output_json_path(&task);
        exchange::write_request(&input, &SummariesRequest::new(&task, files)).await?;

        let mut args = vec![path_arg(&input), path_arg(&output)];
        args.extend(credentials.provider_args());
        self.run_worker(Verb::GenerateSummaries, args).await?;

        let summaries: Vec<VideoSummary> = exchange::read_response(&output).await?;
        info!(task = %task, count = summaries.len(), "summaries generated");

        let mut state = self.state.write().await;
        state.summaries = summaries.clone();
        state.storyline.clear();
        state.preview_path = None;
        Ok(summaries)
    }

    /// Plan a cross-clip storyline from the summaries, a natural-language
    /// prompt and a target duration in minutes.
    pub async fn generate_storyline(
        &self,
        prompt: &str,
        duration: u32,
    ) -> Result<Vec<Segment>, PipelineError> {
        let _busy = self.begin_action()?;
        let credentials = self.armed_credentials().await?;
        let summaries = {
            let state = self.state.read().await;
            if state.summaries.is_empty() {
                return Err(PipelineError::Blocked("no summaries generated yet"));
            }
            state.summaries.clone()
        };

        let task = TaskId::generate();
        self.workspace.ensure_task_dir(&task).await?;
        let input = self.workspace.input_path(&task);
        let output = self.workspace.output_json_path(&task);
        exchange::write_request(
            &input,
            &StorylineRequest::new(&task, summaries, prompt, duration),
        )
        .await?;

        let mut args = vec![path_arg(&input), path_arg(&output)];
        args.extend(credentials.provider_args());
        self.run_worker(Verb::GenerateStoryline, args).await?;

        let storyline: Vec<Segment> = exchange::read_response(&output).await?;
        // A storyline segment without a source clip (or with an inverted
        // time range) cannot be rendered; reject the response outright.
        for segment in &storyline {
            if segment.src_file.is_none() {
                return Err(PipelineError::MalformedResponse(
                    "storyline segment missing srcFile".to_string(),
                ));
            }
            if !segment.has_valid_range() {
                return Err(PipelineError::MalformedResponse(format!(
                    "storyline segment has invalid range {}..{}",
                    segment.start_time_sec, segment.end_time_sec
                )));
            }
        }
        info!(task = %task, segments = storyline.len(), "storyline generated");

        let mut state = self.state.write().await;
        state.storyline = storyline.clone();
        state.preview_path = None;
        Ok(storyline)
    }

    /// Render the storyline into a preview video. Returns the media path.
    pub async fn generate_video(&self) -> Result<PathBuf, PipelineError> {
        let _busy = self.begin_action()?;
        let credentials = self.armed_credentials().await?;
        let segments = {
            let state = self.state.read().await;
            if state.storyline.is_empty() {
                return Err(PipelineError::Blocked("no storyline generated yet"));
            }
            state.storyline.clone()
        };

        let task = TaskId::generate();
        self.workspace.ensure_task_dir(&task).await?;
        let input = self.workspace.input_path(&task);
        let output = self.workspace.output_media_path(&task);
        exchange::write_request(&input, &RenderRequest::new(&task, segments)).await?;

        // Render takes the bare key only; no provider tag on this path
        let args = vec![
            path_arg(&input),
            path_arg(&output),
            credentials.render_key().to_string(),
        ];
        self.run_worker(Verb::GenerateVideo, args).await?;

        // The response is the media file itself
        if tokio::fs::metadata(&output).await.is_err() {
            return Err(PipelineError::MalformedResponse(format!(
                "worker reported success but wrote no media at {}",
                output.display()
            )));
        }
        info!(task = %task, path = %output.display(), "preview rendered");

        let mut state = self.state.write().await;
        state.preview_path = Some(output.clone());
        Ok(output)
    }

    /// Plain file copy of the rendered preview to a destination the user
    /// picked in the save dialog.
    pub async fn save_rendered(&self, dest: &Path) -> Result<PathBuf, PipelineError> {
        let preview = {
            let state = self.state.read().await;
            state
                .preview_path
                .clone()
                .ok_or(PipelineError::Blocked("no rendered preview to save"))?
        };
        tokio::fs::copy(&preview, dest).await?;
        info!(from = %preview.display(), to = %dest.display(), "preview saved");
        Ok(dest.to_path_buf())
    }

    /// Free-form description of the worker's runtime environment, for
    /// support dumps.
    pub async fn debug_info(&self) -> Result<String, PipelineError> {
        let output = self.run_worker(Verb::GetDebugInfo, Vec::new()).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Shutdown-time cleanup: purge the scratch tree, then ask the worker to
    /// release its own resources. Both are attempted regardless of the
    /// other's outcome, neither can fail the exit path, and a hung worker is
    /// abandoned after a bounded wait so the process can still exit.
    pub async fn shutdown(&self) {
        self.workspace.purge_all().await;
        let release = self.run_worker(Verb::CleanUp, Vec::new());
        match tokio::time::timeout(SHUTDOWN_GRACE, release).await {
            Ok(Ok(_)) => info!("worker resources released"),
            Ok(Err(e)) => warn!("worker cleanup failed: {}", e),
            Err(_) => warn!("worker cleanup abandoned after {:?}", SHUTDOWN_GRACE),
        }
    }

    fn begin_action(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, PipelineError> {
        self.action
            .try_lock()
            .map_err(|_| PipelineError::Blocked("another pipeline action is already running"))
    }

    async fn armed_credentials(&self) -> Result<Credentials, PipelineError> {
        self.credentials
            .applied()
            .await
            .ok_or(PipelineError::Blocked("no provider credentials applied"))
    }

    async fn run_worker(&self, verb: Verb, args: Vec<String>) -> Result<Output, PipelineError> {
        let invocation = self.worker.run(verb, &args);
        let result = match self.invoke_timeout {
            Some(limit) => tokio::time::timeout(limit, invocation)
                .await
                .map_err(|_| PipelineError::Timeout(limit.as_secs()))?,
            None => invocation.await,
        };
        let output = result.map_err(|e| {
            PipelineError::InvocationFailed(format!("could not launch worker for {}: {}", verb, e))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::InvocationFailed(format!(
                "{} exited with {}: {}",
                verb,
                output.status,
                stderr.trim()
            )));
        }
        Ok(output)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
