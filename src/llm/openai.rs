use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, TextGenerator};
use crate::config::Config;
use crate::error::DocError;
use crate::http::{HttpClient, HttpClientConfig, HttpRequest};
use crate::Result;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiClient {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(HttpClientConfig::from(&config.http))?,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

/// First choice's message content, trimmed; empty content is an error.
fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DocError::service(format!("Malformed completion response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| DocError::service("Completion response contained no text"))
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DocError::service("No OpenAI API key configured"))?;

        let url = format!("{}/chat/completions", self.base_url);
        let http_request =
            HttpRequest::post_json(url, &self.build_body(request))?.bearer(Some(api_key));

        let response = self.http.send(&http_request).await?;
        debug!("Completion response status: {}", response.status);

        match response.status {
            StatusCode::TOO_MANY_REQUESTS => Err(DocError::service(
                "OpenAI quota exceeded or rate limited (HTTP 429)",
            )),
            status if !status.is_success() => Err(DocError::service(format!(
                "OpenAI request failed with status {}",
                status
            ))),
            _ => extract_content(&response.body),
        }
    }
}
