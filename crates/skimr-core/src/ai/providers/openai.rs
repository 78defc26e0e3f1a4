use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use std::time::Duration;

use super::{LlmClient, LlmRequest};
use crate::{Error, Result};

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);

        Self {
            client,
            model: model.to_string(),
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt.as_str())
            .build()
            .map_err(|e| Error::AiProvider(e.to_string()))?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(message)])
            .max_tokens(request.max_tokens);
        if let Some(temperature) = request.temperature {
            args.temperature(temperature);
        }
        if request.json_output {
            args.response_format(ResponseFormat::JsonObject);
        }
        let chat_request = args.build().map_err(|e| Error::AiProvider(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(chat_request))
            .await
            .map_err(|_| {
                Error::AiProvider(format!(
                    "OpenAI request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::AiProvider(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(Error::AiProvider("OpenAI returned an empty reply".to_string()));
        }

        Ok(content)
    }
}
