//! Environment configuration.

use crate::workspace::Workspace;
use std::env;
use std::path::PathBuf;

/// Runtime configuration, resolved once at startup. The worker binary path
/// is a single explicit value rather than packaged-vs-development sniffing
/// scattered through the invocation code; a deployment sets `VIDSAGE_WORKER`
/// in its launcher (or `.env`) to wherever it unpacked the binary.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Path to the worker executable
    pub worker_bin: PathBuf,
    /// Root of the per-task scratch area
    pub scratch_root: PathBuf,
    /// Kill a worker invocation after this many seconds; `None` waits
    /// indefinitely
    pub invoke_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let invoke_timeout_secs = env::var("VIDSAGE_INVOKE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0);

        Self {
            worker_bin: env::var("VIDSAGE_WORKER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_worker_bin()),
            scratch_root: env::var("VIDSAGE_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Workspace::default_root()),
            invoke_timeout_secs,
        }
    }
}

/// `resources/vidSage` next to the current executable, with the platform
/// suffix.
fn default_worker_bin() -> PathBuf {
    #[cfg(target_os = "windows")]
    let name = "vidSage.exe";
    #[cfg(not(target_os = "windows"))]
    let name = "vidSage";

    let base = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("resources").join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_parsing() {
        env::set_var("VIDSAGE_INVOKE_TIMEOUT_SECS", "120");
        let config = AppConfig::from_env();
        assert_eq!(config.invoke_timeout_secs, Some(120));

        // 0 means "no timeout", same as unset
        env::set_var("VIDSAGE_INVOKE_TIMEOUT_SECS", "0");
        let config = AppConfig::from_env();
        assert_eq!(config.invoke_timeout_secs, None);

        env::remove_var("VIDSAGE_INVOKE_TIMEOUT_SECS");
    }
}
