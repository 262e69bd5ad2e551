use tracing::{info, instrument, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    generation::{ports::LLMClient, value_objects::GenerationSettings},
    prompt::value_objects::PromptContext,
};

/// Sends a composed prompt to the generation backend.
///
/// Never retries. Prompt and reply contain medical data, so only sizes are
/// logged.
#[instrument(skip_all, fields(mode = %context.mode, model = %settings.model))]
pub async fn generate<L>(
    client: &L,
    context: &PromptContext,
    settings: &GenerationSettings,
) -> Result<String, CoreError>
where
    L: LLMClient,
{
    if !client.is_configured() {
        return Err(CoreError::ConfigurationError(
            "missing API credentials".to_string(),
        ));
    }
    if settings.model.trim().is_empty() {
        return Err(CoreError::ConfigurationError(
            "no model identifier configured".to_string(),
        ));
    }

    info!(prompt_chars = context.text.chars().count(), "calling generation service");

    let call = client.generate_text(context.text.clone(), settings.options());
    let text = match tokio::time::timeout(settings.timeout, call).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(timeout_ms = settings.timeout.as_millis() as u64, "generation timed out");
            return Err(CoreError::UpstreamError(format!(
                "no response within {} ms",
                settings.timeout.as_millis()
            )));
        }
    };

    info!(reply_chars = text.chars().count(), "generation finished");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        generation::value_objects::GenerationOptions, prompt::value_objects::GenerationMode,
    };
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    struct FakeClient {
        configured: bool,
        reply: Result<String, CoreError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FakeClient {
        fn replying(reply: Result<String, CoreError>) -> Self {
            Self {
                configured: true,
                reply,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl LLMClient for FakeClient {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate_text(
            &self,
            _prompt: String,
            _options: GenerationOptions,
        ) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.reply.clone()
        }
    }

    fn settings() -> GenerationSettings {
        GenerationSettings {
            model: "llama3-8b-8192".to_string(),
            temperature: 0.3,
            max_tokens: 3000,
            timeout: Duration::from_millis(200),
            system_instruction: None,
        }
    }

    fn context() -> PromptContext {
        PromptContext {
            mode: GenerationMode::MealPlan,
            text: "prompt".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_calling() {
        let mut client = FakeClient::replying(Ok("plan".to_string()));
        client.configured = false;

        let result = generate(&client, &context(), &settings()).await;

        assert!(matches!(result, Err(CoreError::ConfigurationError(_))));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_model_is_a_configuration_error() {
        let client = FakeClient::replying(Ok("plan".to_string()));
        let mut settings = settings();
        settings.model = " ".to_string();

        let result = generate(&client, &context(), &settings).await;

        assert!(matches!(result, Err(CoreError::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn test_empty_reply_is_success() {
        let client = FakeClient::replying(Ok(String::new()));
        let result = generate(&client, &context(), &settings()).await;
        assert_eq!(result, Ok(String::new()));
    }

    #[tokio::test]
    async fn test_upstream_error_is_passed_through_once() {
        let client = FakeClient::replying(Err(CoreError::UpstreamError("502".to_string())));

        let result = generate(&client, &context(), &settings()).await;

        assert_eq!(result, Err(CoreError::UpstreamError("502".to_string())));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_as_upstream_error() {
        let mut client = FakeClient::replying(Ok("late".to_string()));
        client.delay = Duration::from_secs(5);

        let result = generate(&client, &context(), &settings()).await;

        assert!(matches!(result, Err(CoreError::UpstreamError(_))));
    }
}
