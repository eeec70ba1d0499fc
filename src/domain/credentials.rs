use std::fmt;

/// Which AI backend is in use. The two kinds are mutually exclusive per
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Azure,
}

impl ProviderKind {
    /// The literal tag the worker expects on its command line.
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Azure => "azure",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One validated credential set. A tagged variant rather than a loose string
/// tag plus positional fields, so a malformed argument list is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    OpenAi {
        api_key: String,
    },
    Azure {
        key: String,
        endpoint: String,
        deployment_name: String,
    },
}

impl Credentials {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Credentials::OpenAi { .. } => ProviderKind::OpenAi,
            Credentials::Azure { .. } => ProviderKind::Azure,
        }
    }

    /// Provider tag plus that kind's credential fields in the order the
    /// worker's argument parser expects them.
    pub fn provider_args(&self) -> Vec<String> {
        match self {
            Credentials::OpenAi { api_key } => {
                vec![self.kind().tag().to_string(), api_key.clone()]
            }
            Credentials::Azure {
                key,
                endpoint,
                deployment_name,
            } => vec![
                self.kind().tag().to_string(),
                key.clone(),
                endpoint.clone(),
                deployment_name.clone(),
            ],
        }
    }

    /// The bare key the render verb takes as its single trailing credential
    /// argument (no provider tag on that path).
    pub fn render_key(&self) -> &str {
        match self {
            Credentials::OpenAi { api_key } => api_key,
            Credentials::Azure { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_provider_args() {
        let creds = Credentials::OpenAi {
            api_key: "sk-test".to_string(),
        };
        assert_eq!(creds.provider_args(), vec!["openai", "sk-test"]);
        assert_eq!(creds.render_key(), "sk-test");
    }

    #[test]
    fn test_azure_provider_args_order() {
        let creds = Credentials::Azure {
            key: "azkey".to_string(),
            endpoint: "https://example.openai.azure.com".to_string(),
            deployment_name: "gpt4o".to_string(),
        };
        assert_eq!(
            creds.provider_args(),
            vec!["azure", "azkey", "https://example.openai.azure.com", "gpt4o"]
        );
        assert_eq!(creds.render_key(), "azkey");
    }
}
