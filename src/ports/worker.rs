use async_trait::async_trait;
use std::fmt;
use std::io;
use std::process::Output;

/// The worker's command vocabulary. The verb is always the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    GenerateSummaries,
    GenerateStoryline,
    GenerateVideo,
    CleanUp,
    GetDebugInfo,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::GenerateSummaries => "generateSummaries",
            Verb::GenerateStoryline => "generateStoryline",
            Verb::GenerateVideo => "generateVideo",
            Verb::CleanUp => "cleanUp",
            Verb::GetDebugInfo => "getDebugInfo",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subprocess seam for the worker binary. One async primitive covers every
/// verb; a caller needing synchronous semantics blocks at its own use site.
/// Implementations spawn `<binary> <verb> <args...>`, wait for exit and
/// capture stdout/stderr.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait WorkerPort: Send + Sync {
    async fn run(&self, verb: Verb, args: &[String]) -> io::Result<Output>;
}
