//! Error taxonomy for pipeline stage actions.

use std::fmt;
use std::io;

/// Everything a stage action can fail with. All of these are caught at the
/// action boundary and rendered as a user-visible notification; none of them
/// abort the process.
#[derive(Debug)]
pub enum PipelineError {
    /// Credential check returned false. Recoverable: correct the input and
    /// retry.
    ValidationFailed(String),
    /// Worker process exited non-zero or could not be spawned. Carries the
    /// captured diagnostic output. Not retried automatically.
    InvocationFailed(String),
    /// Worker reported success but its output file is missing or does not
    /// parse. A defect, kept distinct from `InvocationFailed` so it is not
    /// mistaken for a credential or input problem.
    MalformedResponse(String),
    /// Task directory or request file bookkeeping failed. Fatal on the write
    /// path: no request can be recorded.
    Workspace(io::Error),
    /// The hardened invocation timeout expired and the child was killed.
    Timeout(u64),
    /// A precondition is not met: no credentials applied, upstream stage data
    /// missing, or another action already in flight.
    Blocked(&'static str),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ValidationFailed(cause) => {
                write!(f, "Credential validation failed: {}", cause)
            }
            PipelineError::InvocationFailed(diag) => {
                write!(f, "Worker invocation failed: {}", diag)
            }
            PipelineError::MalformedResponse(detail) => {
                write!(f, "Malformed worker response: {}", detail)
            }
            PipelineError::Workspace(e) => write!(f, "Workspace error: {}", e),
            PipelineError::Timeout(secs) => {
                write!(f, "Worker did not finish within {}s", secs)
            }
            PipelineError::Blocked(reason) => write!(f, "Action unavailable: {}", reason),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Workspace(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(err: io::Error) -> Self {
        PipelineError::Workspace(err)
    }
}
