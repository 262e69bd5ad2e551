use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::domain::{
    common::{LLMConfig, LLMProvider, entities::app_errors::CoreError},
    generation::{ports::LLMClient, value_objects::GenerationOptions},
};

pub mod gemini_client;
pub mod groq_client;

pub use gemini_client::GeminiLLMClient;
pub use groq_client::GroqLLMClient;

/// The client selected by [`LLMConfig::provider`].
#[derive(Debug, Clone)]
pub enum ConfiguredLLMClient {
    Groq(GroqLLMClient),
    Gemini(GeminiLLMClient),
}

impl ConfiguredLLMClient {
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        let api_key = config.api_key.clone();
        let base_url = config.base_url.clone();
        match config.provider {
            LLMProvider::Groq => Ok(Self::Groq(GroqLLMClient::new(
                api_key,
                base_url,
                config.request_timeout,
            )?)),
            LLMProvider::Gemini => Ok(Self::Gemini(GeminiLLMClient::new(
                api_key,
                base_url,
                config.request_timeout,
            )?)),
        }
    }
}

impl LLMClient for ConfiguredLLMClient {
    fn is_configured(&self) -> bool {
        match self {
            Self::Groq(client) => client.is_configured(),
            Self::Gemini(client) => client.is_configured(),
        }
    }

    async fn generate_text(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> Result<String, CoreError> {
        match self {
            Self::Groq(client) => client.generate_text(prompt, options).await,
            Self::Gemini(client) => client.generate_text(prompt, options).await,
        }
    }
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, CoreError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CoreError::ConfigurationError(format!("cannot build HTTP client: {e}")))
}

/// Blank keys count as missing.
pub(crate) fn usable_key(api_key: Option<String>) -> Option<String> {
    api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Upstream bodies may echo the prompt, so only the status is kept.
pub(crate) fn status_error(status: StatusCode) -> CoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::ConfigurationError(
            format!("credentials rejected (status {})", status.as_u16()),
        ),
        _ => CoreError::UpstreamError(format!("status {}", status.as_u16())),
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> CoreError {
    if e.is_timeout() {
        CoreError::UpstreamError("request timed out".to_string())
    } else {
        CoreError::UpstreamError(format!("request failed: {}", e.without_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_are_configuration_errors() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED),
            CoreError::ConfigurationError(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN),
            CoreError::ConfigurationError(_)
        ));
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS),
            CoreError::UpstreamError("status 429".to_string())
        );
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let config = LLMConfig {
            provider: LLMProvider::Gemini,
            api_key: Some("   ".to_string()),
            base_url: None,
            request_timeout: Duration::from_secs(5),
        };
        let client = ConfiguredLLMClient::from_config(&config).unwrap();
        assert!(matches!(client, ConfiguredLLMClient::Gemini(_)));
        assert!(!client.is_configured());
    }
}
