use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::fallback::primary_or_fallback;
use super::models::Generated;
use super::providers::{strip_code_fence, LlmClient, LlmRequest};
use crate::text::truncate_with_ellipsis;
use crate::{Error, Result};

/// Characters of article text sent upstream for topic extraction
pub const TOPIC_INPUT_CHARS: usize = 5000;

pub const DEFAULT_TOPIC_COUNT: usize = 5;

/// Returned when no word in the text qualifies as a topic
pub const PLACEHOLDER_TOPIC: &str = "Topic";

const STOPWORDS: [&str; 15] = [
    "about", "after", "again", "their", "there", "these", "thing", "think", "those", "would",
    "which", "with", "have", "this", "that",
];

const MIN_TOPIC_WORD_CHARS: usize = 5;

pub fn build_topic_prompt(text: &str, n: usize) -> String {
    let text = truncate_with_ellipsis(text, TOPIC_INPUT_CHARS);
    format!(
        "Extract exactly {n} key topics or concepts from the following text.\n\
Return them as a JSON object with a \"topics\" field holding an array of strings.\n\
Each topic should be a single word or short phrase (1-3 words max).\n\n\
TEXT:\n{text}\n\n\
KEY TOPICS (JSON object with a \"topics\" array of strings):"
    )
}

fn value_to_topic(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Locate the topic list in a structured reply.
///
/// Accepts a bare array, or an object's `topics` array, else its first
/// non-empty array of strings, else its first non-empty array of anything
/// (object keys are visited in the order the reply declared them).
pub fn parse_topics(reply: &str, n: usize) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(strip_code_fence(reply)).ok()?;

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("topics")
            .and_then(Value::as_array)
            .or_else(|| {
                map.values()
                    .filter_map(Value::as_array)
                    .find(|a| !a.is_empty() && a.iter().all(Value::is_string))
            })
            .or_else(|| map.values().filter_map(Value::as_array).find(|a| !a.is_empty()))?,
        _ => return None,
    };

    let topics: Vec<String> = items
        .iter()
        .filter_map(value_to_topic)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .take(n)
        .collect();

    if topics.is_empty() {
        None
    } else {
        Some(topics)
    }
}

/// Word-frequency topics: most frequent first, ties in order of first appearance
pub fn extract_topics_basic(text: &str, n: usize) -> Vec<String> {
    let lowered = text.to_lowercase();

    // word -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in lowered
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOPIC_WORD_CHARS && !STOPWORDS.contains(w))
        .enumerate()
    {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let topics: Vec<String> = ranked
        .into_iter()
        .take(n)
        .map(|(word, _, _)| word.to_string())
        .collect();

    if topics.is_empty() {
        vec![PLACEHOLDER_TOPIC.to_string()]
    } else {
        topics
    }
}

/// Key topic extraction: LLM first, word frequency on failure
pub struct TopicExtractor {
    client: Option<Arc<dyn LlmClient>>,
    max_tokens: u32,
}

impl TopicExtractor {
    pub fn new(client: Option<Arc<dyn LlmClient>>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    pub async fn extract(&self, text: &str, n: usize) -> Generated<Vec<String>> {
        let n = n.max(1);
        let primary = self
            .client
            .as_deref()
            .map(|client| self.extract_with_llm(client, text, n));

        primary_or_fallback("topics", primary, || extract_topics_basic(text, n)).await
    }

    async fn extract_with_llm(&self, client: &dyn LlmClient, text: &str, n: usize) -> Result<Vec<String>> {
        let request = LlmRequest::new(build_topic_prompt(text, n), self.max_tokens).json();
        tracing::debug!(provider = client.name(), prompt_chars = request.prompt.chars().count(), "Requesting key topics");

        let reply = client.complete(&request).await?;

        parse_topics(&reply, n).ok_or_else(|| {
            Error::AiProvider("No topic list found in the model reply".to_string())
        })
    }
}
