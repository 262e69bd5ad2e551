use std::time::Duration;

/// Per-use-case generation parameters, passed explicitly into the invoker.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound for one generation call, transport included.
    pub timeout: Duration,
    pub system_instruction: Option<String>,
}

impl GenerationSettings {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            system_instruction: self.system_instruction.clone(),
        }
    }
}

/// What a text-generation backend needs to know about a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_instruction: Option<String>,
}
