use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        generation::{ports::LLMClient, value_objects::GenerationOptions},
    },
    infrastructure::llm::{build_http_client, status_error, transport_error, usable_key},
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            api_key: usable_key(api_key),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: build_http_client(timeout)?,
        })
    }

    async fn call_gemini_api(
        &self,
        api_key: &str,
        model: &str,
        request: GeminiRequest,
    ) -> Result<String, CoreError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Gemini API request failed: {}", e);
                transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Gemini API returned an error");
            return Err(status_error(status));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e.without_url());
            CoreError::UpstreamError("malformed response body".to_string())
        })?;

        // A response without candidates (e.g. blocked by safety filters) is an
        // empty reply, not an error.
        Ok(gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

impl LLMClient for GeminiLLMClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_text(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> Result<String, CoreError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CoreError::ConfigurationError(
                "missing Gemini API key".to_string(),
            ));
        };

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: options.system_instruction.map(|text| Content {
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
            },
        };

        self.call_gemini_api(api_key, &options.model, request).await
    }
}
