//! On-disk exchange protocol with the worker.
//!
//! The entire wire contract: a pretty-printed JSON request file written
//! before invocation, and a response file read after the process exits.
//! No stdin/stdout streaming, no structured exit codes beyond
//! success/failure. For the render verb the "response" is the output media
//! file itself, not JSON.

use crate::domain::media::{Segment, VideoFile, VideoSummary};
use crate::domain::task::TaskId;
use crate::error::PipelineError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input for `generateSummaries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummariesRequest {
    pub task_id: String,
    pub files: Vec<VideoFile>,
}

/// Input for `generateStoryline`. `duration` is the target length of the
/// final video in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorylineRequest {
    pub task_id: String,
    pub summaries: Vec<VideoSummary>,
    pub prompt: String,
    pub duration: u32,
}

/// Input for `generateVideo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub task_id: String,
    pub segments: Vec<Segment>,
}

impl SummariesRequest {
    pub fn new(task_id: &TaskId, files: Vec<VideoFile>) -> Self {
        Self {
            task_id: task_id.to_string(),
            files,
        }
    }
}

impl StorylineRequest {
    pub fn new(task_id: &TaskId, summaries: Vec<VideoSummary>, prompt: &str, duration: u32) -> Self {
        Self {
            task_id: task_id.to_string(),
            summaries,
            prompt: prompt.to_string(),
            duration,
        }
    }
}

impl RenderRequest {
    pub fn new(task_id: &TaskId, segments: Vec<Segment>) -> Self {
        Self {
            task_id: task_id.to_string(),
            segments,
        }
    }
}

/// Serialize a request to human-readable UTF-8 JSON at `path`. An I/O
/// failure here means the request cannot be recorded at all, so it surfaces
/// as a workspace error.
pub async fn write_request<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PipelineError::Workspace(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Deserialize a response file. A missing file or a parse failure is a
/// `MalformedResponse`, never a bare I/O error: the worker already reported
/// success by the time this runs.
pub async fn read_response<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        PipelineError::MalformedResponse(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        PipelineError::MalformedResponse(format!("cannot parse {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip_summaries() {
        // Hand-populated response the way the worker writes it
        let raw = r#"[
  {
    "file": { "absolutePath": "/clips/a.mp4", "name": "a.mp4" },
    "summary": "Summary of a",
    "aestheticRating": 4,
    "segments": [
      { "startTimeSec": 0, "endTimeSec": 20, "description": "intro", "srcFile": null },
      {
        "startTimeSec": 20,
        "endTimeSec": 90,
        "description": "main",
        "srcFile": { "absolutePath": "/clips/a.mp4", "name": "a.mp4" }
      }
    ]
  },
  {
    "file": { "absolutePath": "/clips/b.mp4", "name": "b.mp4" },
    "summary": "Summary of b",
    "aestheticRating": null,
    "segments": []
  }
]"#;
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        tokio::fs::write(&path, raw).await.unwrap();

        let summaries: Vec<VideoSummary> = read_response(&path).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].file.absolute_path, "/clips/a.mp4");
        assert_eq!(summaries[0].aesthetic_rating, Some(4.0));
        assert_eq!(summaries[0].segments[0].src_file, None);
        assert_eq!(
            summaries[0].segments[1].src_file.as_ref().unwrap().name,
            "a.mp4"
        );
        assert_eq!(summaries[1].aesthetic_rating, None);

        // Write it back and re-read: values and order survive
        let again = dir.path().join("again.json");
        write_request(&again, &summaries).await.unwrap();
        let reread: Vec<VideoSummary> = read_response(&again).await.unwrap();
        assert_eq!(reread, summaries);
    }

    #[tokio::test]
    async fn test_request_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.json");
        let request = SummariesRequest {
            task_id: "20240101000000-abc".to_string(),
            files: vec![VideoFile {
                absolute_path: "/clips/a.mp4".to_string(),
                name: "a.mp4".to_string(),
            }],
        };
        write_request(&path, &request).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains("\n  \"taskId\""));
        assert!(text.contains("\"absolutePath\""));
    }

    #[tokio::test]
    async fn test_missing_file_is_malformed_response() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never_written.json");

        let result: Result<Vec<VideoSummary>, _> = read_response(&path).await;
        match result {
            Err(PipelineError::MalformedResponse(detail)) => {
                assert!(detail.contains("never_written.json"));
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_file_is_malformed_response() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let result: Result<Vec<VideoSummary>, _> = read_response(&path).await;
        assert!(matches!(result, Err(PipelineError::MalformedResponse(_))));
    }
}
