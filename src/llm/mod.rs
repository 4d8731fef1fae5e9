//! Text generation collaborators used for endpoint titles and prose.

pub mod openai;

use async_trait::async_trait;

use crate::config::CompletionSettings;
use crate::error::DocError;
use crate::Result;

pub use openai::OpenAiClient;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        prompt: impl Into<String>,
        system_prompt: impl Into<String>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: system_prompt.into(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text, or a service error when the backend
    /// fails or produces nothing usable.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// A generator that never produces text, so every record falls back to
/// placeholder prose.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Err(DocError::service("offline mode"))
    }
}
