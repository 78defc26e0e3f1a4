mod claude_api;
mod openai;

pub use claude_api::ClaudeApiProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;

use crate::config::AiConfig;
use crate::{Error, Result};

/// One completion call against an LLM service
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub prompt: String,
    pub max_tokens: u32,
    /// Sampling temperature; `None` leaves the provider default
    pub temperature: Option<f32>,
    /// Ask the provider for a JSON reply
    pub json_output: bool,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature: None,
            json_output: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Trait for LLM completion providers.
///
/// Implementations must be safe to share between concurrent summarize calls.
/// Every failure (network, auth, rate limit, empty reply) is reported as an
/// `Error::AiProvider`; callers do not distinguish between them.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Send the prompt and return the raw reply content
    async fn complete(&self, request: &LlmRequest) -> Result<String>;
}

fn resolve_key(configured: &Option<String>, env_var: &str) -> Option<String> {
    configured
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .cloned()
        .or_else(|| std::env::var(env_var).ok().filter(|k| !k.trim().is_empty()))
}

/// Create the configured LLM client
pub fn build_client(config: &AiConfig) -> Result<Arc<dyn LlmClient>> {
    if !config.enabled {
        return Err(Error::Config("AI summarization is disabled".to_string()));
    }

    let client: Arc<dyn LlmClient> = match config.provider.as_str() {
        "openai" => {
            let api_key = resolve_key(&config.openai_api_key, "OPENAI_API_KEY")
                .ok_or_else(|| Error::Config("OpenAI API key not configured".to_string()))?;
            Arc::new(OpenAiProvider::new(
                &api_key,
                &config.openai_model,
                config.request_timeout_secs,
            ))
        }
        "claude_api" => {
            let api_key = resolve_key(&config.claude_api_key, "ANTHROPIC_API_KEY")
                .ok_or_else(|| Error::Config("Claude API key not configured".to_string()))?;
            Arc::new(ClaudeApiProvider::new(
                &api_key,
                &config.claude_model,
                config.request_timeout_secs,
            )?)
        }
        other => {
            return Err(Error::Config(format!("Unknown AI provider: {}", other)));
        }
    };

    Ok(client)
}

/// Strip a surrounding markdown code fence from a model reply
pub(crate) fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop an optional language tag on the opening fence line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}
