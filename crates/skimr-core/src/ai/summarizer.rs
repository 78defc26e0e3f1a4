use std::sync::Arc;

use super::models::{SummarizationRequest, SummarizationResult};
use super::providers::{build_client, LlmClient};
use super::summary::SummaryGenerator;
use super::topics::{TopicExtractor, DEFAULT_TOPIC_COUNT};
use crate::config::{AiConfig, AppConfig};
use crate::text::normalize;

/// Used when the text leaves nothing to summarize after cleaning
pub const EMPTY_SUMMARY_PLACEHOLDER: &str = "No summary available.";

/// Tunables for the LLM-backed stages
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerSettings {
    pub topic_count: usize,
    pub summary_max_tokens: u32,
    pub topic_max_tokens: u32,
    pub temperature: f32,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            topic_count: DEFAULT_TOPIC_COUNT,
            summary_max_tokens: 800,
            topic_max_tokens: 200,
            temperature: 0.7,
        }
    }
}

impl From<&AiConfig> for SummarizerSettings {
    fn from(config: &AiConfig) -> Self {
        Self {
            topic_count: config.topic_count.max(1),
            summary_max_tokens: config.summary_max_tokens.max(1),
            topic_max_tokens: config.topic_max_tokens.max(1),
            temperature: config.temperature,
        }
    }
}

/// Turns raw article text into a highlighted summary plus key topics.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
/// `summarize` never fails: every LLM problem degrades to the deterministic
/// fallbacks instead of reaching the caller.
pub struct Summarizer {
    client: Option<Arc<dyn LlmClient>>,
    topics: TopicExtractor,
    summaries: SummaryGenerator,
    topic_count: usize,
}

impl Summarizer {
    /// Create a summarizer around an injected client; `None` means fallbacks only
    pub fn new(client: Option<Arc<dyn LlmClient>>, settings: SummarizerSettings) -> Self {
        Self {
            topics: TopicExtractor::new(client.clone(), settings.topic_max_tokens),
            summaries: SummaryGenerator::new(
                client.clone(),
                settings.summary_max_tokens,
                settings.temperature,
            ),
            topic_count: settings.topic_count.max(1),
            client,
        }
    }

    /// A summarizer that never calls out to an LLM
    pub fn offline() -> Self {
        Self::new(None, SummarizerSettings::default())
    }

    /// Create a summarizer from configuration.
    ///
    /// If the LLM client cannot be built (AI disabled, missing key, unknown
    /// provider) the summarizer runs offline rather than failing.
    pub fn from_config(config: &AppConfig) -> Self {
        let settings = SummarizerSettings::from(&config.ai);
        let client = match build_client(&config.ai) {
            Ok(client) => {
                tracing::info!(provider = client.name(), "LLM client ready");
                Some(client)
            }
            Err(e) => {
                tracing::warn!(error = %e, "LLM client unavailable, summaries will use fallbacks");
                None
            }
        };

        Self::new(client, settings)
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.client.as_deref().map(|c| c.name())
    }

    /// Summarize one request
    pub async fn summarize(&self, request: &SummarizationRequest) -> SummarizationResult {
        let text = normalize(request.raw_text());

        let topics = self.topics.extract(&text, self.topic_count).await;
        let summary = self
            .summaries
            .generate(
                &text,
                request.length(),
                request.reading_level(),
                request.interests(),
            )
            .await;

        let summary_text = if summary.value.trim().is_empty() {
            EMPTY_SUMMARY_PLACEHOLDER.to_string()
        } else {
            summary.value
        };

        tracing::info!(
            summary_source = summary.source.as_str(),
            topics_source = topics.source.as_str(),
            topics = topics.value.len(),
            summary_chars = summary_text.chars().count(),
            "Summary generated"
        );

        SummarizationResult {
            summary_text,
            key_topics: topics.value,
            summary_source: summary.source,
            topics_source: topics.source,
        }
    }
}
