//! Live credential checks against the AI providers.

use crate::domain::credentials::Credentials;
use crate::ports::probe::CredentialProbe;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;

/// Matches the API version the worker pins, so a key that passes the probe
/// also works for the worker's own calls.
const AZURE_API_VERSION: &str = "2024-10-01-preview";

#[derive(Debug)]
struct ProbeFailure(String);

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ProbeFailure {}

/// Lists the provider's available models over HTTPS. The cheapest authorized
/// call both providers offer, and it touches every field of the credential
/// set (endpoint, deployment and key for hosted deployments).
pub struct HttpCredentialProbe {
    client: reqwest::Client,
}

impl HttpCredentialProbe {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpCredentialProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProbe for HttpCredentialProbe {
    async fn list_models(
        &self,
        credentials: &Credentials,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let response = match credentials {
            Credentials::OpenAi { api_key } => {
                self.client
                    .get("https://api.openai.com/v1/models")
                    .bearer_auth(api_key)
                    .send()
                    .await?
            }
            Credentials::Azure { key, endpoint, .. } => {
                let url = format!(
                    "{}/openai/models?api-version={}",
                    endpoint.trim_end_matches('/'),
                    AZURE_API_VERSION
                );
                self.client.get(url).header("api-key", key).send().await?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Box::new(ProbeFailure(format!(
                "{} listing models: {}",
                status,
                body.chars().take(300).collect::<String>()
            ))));
        }
        Ok(())
    }
}
