use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, generation::value_objects::GenerationOptions,
};

/// LLM Client trait for calling text-generation models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// False when credentials are missing; checked before any request is made.
    fn is_configured(&self) -> bool;

    /// Returns the generated text. An empty reply is `Ok(String::new())`.
    fn generate_text(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
