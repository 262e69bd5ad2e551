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

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI-compatible chat completions client for Groq.
#[derive(Debug, Clone)]
pub struct GroqLLMClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

impl GroqLLMClient {
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
}

impl LLMClient for GroqLLMClient {
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
                "missing Groq API key".to_string(),
            ));
        };

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = options.system_instruction {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Groq API request failed: {}", e);
                transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Groq API returned an error");
            return Err(status_error(status));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Groq response: {}", e.without_url());
            CoreError::UpstreamError("malformed response body".to_string())
        })?;

        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    fn options() -> GenerationOptions {
        GenerationOptions {
            model: "llama3-8b-8192".to_string(),
            temperature: 0.5,
            max_tokens: 2000,
            system_instruction: Some("Be brief.".to_string()),
        }
    }

    fn client(server: &MockServer) -> GroqLLMClient {
        GroqLLMClient::new(
            Some("gsk-test".to_string()),
            Some(format!("{}/", server.uri())),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_text_posts_chat_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer gsk-test"))
            .and(body_partial_json(json!({
                "model": "llama3-8b-8192",
                "messages": [
                    {"role": "system", "content": "Be brief."},
                    {"role": "user", "content": "Review these recipes"}
                ],
                "temperature": 0.5,
                "max_tokens": 2000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Adobo: NOT SUITABLE"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .generate_text("Review these recipes".to_string(), options())
            .await
            .unwrap();

        assert_eq!(text, "Adobo: NOT SUITABLE");
    }

    #[tokio::test]
    async fn test_null_content_is_an_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let text = client(&server)
            .generate_text("prompt".to_string(), options())
            .await
            .unwrap();

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key gsk-test"))
            .mount(&server)
            .await;

        let error = client(&server)
            .generate_text("prompt".to_string(), options())
            .await
            .unwrap_err();

        assert_eq!(
            error,
            CoreError::ConfigurationError("credentials rejected (status 401)".to_string())
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let error = client(&server)
            .generate_text("prompt".to_string(), options())
            .await
            .unwrap_err();

        assert_eq!(
            error,
            CoreError::UpstreamError("malformed response body".to_string())
        );
    }
}
