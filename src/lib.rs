//! vidsage - Task orchestration for AI highlight-video editing
//!
//! The heavy lifting (video analysis, LLM calls, rendering) happens in an
//! external worker binary; this crate turns UI actions into isolated,
//! recoverable invocations of it and sequences the editing pipeline
//! (upload → summarize → storyline → render → export) as shared state.
//!
//! Hexagonal Architecture:
//! - domain/: Pure data types (clips, segments, summaries, task ids)
//! - ports/: Trait definitions (worker subprocess, credential probe)
//! - adapters/: Concrete implementations (tokio process, reqwest)
//! - application/: Generic services (credential store, pipeline coordinator)
//! - exchange: On-disk request/response protocol with the worker
//! - workspace: Per-task scratch directories
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod ports;
pub mod workspace;


// Re-exports for convenience
pub use application::credentials::CredentialStore;
pub use application::pipeline::{PipelineService, PipelineState};
pub use config::AppConfig;
pub use domain::credentials::{Credentials, ProviderKind};
pub use domain::media::{Segment, VideoFile, VideoSummary};
pub use domain::task::TaskId;
pub use error::PipelineError;
pub use workspace::Workspace;
