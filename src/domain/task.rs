use chrono::Local;
use std::fmt;
use uuid::Uuid;

/// Identifier for one worker invocation. The leading wall-clock component
/// keeps task directories lexicographically sorted by creation time; the
/// UUID makes ids unique even for calls within the same second.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        let timestamp = Local::now().format("%Y%m%d%H%M%S");
        TaskId(format!("{}-{}", timestamp, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
