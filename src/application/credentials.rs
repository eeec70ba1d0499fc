use crate::domain::credentials::{Credentials, ProviderKind};
use crate::error::PipelineError;
use crate::ports::probe::CredentialProbe;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Session-scoped store for the active provider credentials. At most one
/// credential set is armed at a time; applying one provider kind replaces
/// whatever the other kind had applied. Nothing is ever persisted to disk.
pub struct CredentialStore<P> {
    probe: P,
    applied: RwLock<Option<Credentials>>,
    last_rejection: RwLock<Option<String>>,
}

impl<P> CredentialStore<P>
where
    P: CredentialProbe,
{
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            applied: RwLock::new(None),
            last_rejection: RwLock::new(None),
        }
    }

    /// Round-trip the candidate set against its provider without touching
    /// the stored state. Returns `false` on any network, auth or
    /// configuration failure; the cause is kept for display via
    /// [`rejection`](Self::rejection).
    pub async fn validate(&self, credentials: &Credentials) -> bool {
        match self.probe.list_models(credentials).await {
            Ok(()) => {
                *self.last_rejection.write().await = None;
                true
            }
            Err(e) => {
                warn!(kind = %credentials.kind(), "credential validation failed: {}", e);
                *self.last_rejection.write().await = Some(e.to_string());
                false
            }
        }
    }

    /// Validate, then arm the set. A rejected candidate returns
    /// `ValidationFailed` and leaves any previously applied set untouched;
    /// only a successful apply moves the armed provider kind.
    pub async fn apply(&self, credentials: Credentials) -> Result<(), PipelineError> {
        if !self.validate(&credentials).await {
            let cause = self
                .rejection()
                .await
                .unwrap_or_else(|| "provider rejected the credentials".to_string());
            return Err(PipelineError::ValidationFailed(cause));
        }
        info!(kind = %credentials.kind(), "credentials applied");
        *self.applied.write().await = Some(credentials);
        Ok(())
    }

    /// Atomic snapshot of the armed set. Pipeline actions read this exactly
    /// once per invocation so a provider switch mid-action cannot mix fields
    /// from two sets.
    pub async fn applied(&self) -> Option<Credentials> {
        self.applied.read().await.clone()
    }

    pub async fn applied_kind(&self) -> Option<ProviderKind> {
        self.applied.read().await.as_ref().map(|c| c.kind())
    }

    /// Cause of the most recent failed validation, for display.
    pub async fn rejection(&self) -> Option<String> {
        self.last_rejection.read().await.clone()
    }
}
