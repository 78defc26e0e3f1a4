use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{LlmClient, LlmRequest};
use crate::{Error, Result};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Option<Vec<ClaudeContent>>,
    error: Option<ClaudeError>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ClaudeError {
    message: String,
}

/// Claude/Anthropic API provider
pub struct ClaudeApiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeApiProvider {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for ClaudeApiProvider {
    fn name(&self) -> &str {
        "claude_api"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        // The messages API has no JSON mode; ask for it in the prompt instead
        let prompt = if request.json_output {
            format!(
                "{}\n\nRespond with ONLY valid JSON (no markdown, no code blocks).",
                request.prompt
            )
        } else {
            request.prompt.clone()
        };

        let body = ClaudeRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![ClaudeMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::AiProvider(format!("Claude API request failed: {}", e)))?;

        let claude_response: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| Error::AiProvider(format!("Failed to parse Claude response: {}", e)))?;

        if let Some(error) = claude_response.error {
            return Err(Error::AiProvider(format!("Claude API error: {}", error.message)));
        }

        let content = claude_response
            .content
            .and_then(|c| c.into_iter().find_map(|block| block.text))
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(Error::AiProvider("Claude returned an empty reply".to_string()));
        }

        Ok(content)
    }
}
