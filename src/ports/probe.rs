use crate::domain::credentials::Credentials;
use async_trait::async_trait;
use std::error::Error;

/// Live round-trip against a provider, used to vet credentials before they
/// are stored. Listing available models is the minimal call that exercises
/// the endpoint, the key and (for hosted deployments) the deployment config
/// without mutating anything.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProbe: Send + Sync {
    async fn list_models(&self, credentials: &Credentials)
        -> Result<(), Box<dyn Error + Send + Sync>>;
}
