use std::sync::Arc;

use super::fallback::primary_or_fallback;
use super::models::{Generated, ReadingLevel, SummaryLength};
use super::providers::{LlmClient, LlmRequest};
use crate::text::{highlight, normalize, split_sentences, truncate_chars, ELLIPSIS};
use crate::{Error, Result};

/// Upper bound for the assembled summary prompt, in characters
pub const PROMPT_CHAR_BUDGET: usize = 11000;

/// Article characters kept when the prompt is over budget
pub const TRUNCATED_TEXT_CHARS: usize = 10000;

fn assemble_prompt(
    text: &str,
    length: SummaryLength,
    reading_level: ReadingLevel,
    interests: &[String],
) -> String {
    let interests: Vec<&str> = interests
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let interest_focus = if interests.is_empty() {
        String::new()
    } else {
        format!("Focus on aspects related to: {}.\n", interests.join(", "))
    };

    format!(
        "Please create a concise summary of the following text in {words} words.\n\
Use {style}.\n\
{interest_focus}\
Maintain factual accuracy and include the most important information.\n\n\
TEXT TO SUMMARIZE:\n{text}",
        words = length.word_range(),
        style = reading_level.style_descriptor(),
    )
}

/// Build the summary instruction, keeping it within `PROMPT_CHAR_BUDGET`.
///
/// Over budget, the article text is cut to at most `TRUNCATED_TEXT_CHARS`
/// characters, fewer if the instructions leave less room, and always ends in
/// an ellipsis. Trailing interests are dropped from the focus line only when
/// the instructions alone would not fit.
pub fn build_summary_prompt(
    text: &str,
    length: SummaryLength,
    reading_level: ReadingLevel,
    interests: &[String],
) -> String {
    let prompt = assemble_prompt(text, length, reading_level, interests);
    if prompt.chars().count() <= PROMPT_CHAR_BUDGET {
        return prompt;
    }

    let room = PROMPT_CHAR_BUDGET - ELLIPSIS.len();
    let mut interests = interests;
    let mut scaffold = assemble_prompt("", length, reading_level, interests).chars().count();
    while scaffold > room && !interests.is_empty() {
        interests = &interests[..interests.len() - 1];
        scaffold = assemble_prompt("", length, reading_level, interests).chars().count();
    }

    let keep = TRUNCATED_TEXT_CHARS.min(room.saturating_sub(scaffold));
    let truncated = format!("{}{}", truncate_chars(text, keep), ELLIPSIS);
    assemble_prompt(&truncated, length, reading_level, interests)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Break a sentence at semicolons into period-terminated clauses
fn split_clauses(sentence: &str) -> Vec<String> {
    if !sentence.contains(';') {
        return vec![sentence.to_string()];
    }

    sentence
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| {
            let mut clause = if i == 0 {
                part.to_string()
            } else {
                capitalize_first(part)
            };
            if !clause.ends_with(['.', '!', '?']) {
                clause.push('.');
            }
            clause
        })
        .collect()
}

/// Extractive summary: the leading sentences of the cleaned text.
///
/// Keeps at most 3 / 5 / 8 units for brief / medium / detailed. For the basic
/// reading level sentences are split into clauses at semicolons first, so each
/// clause is one unit and the bound holds on the output.
pub fn generate_basic_summary(text: &str, length: SummaryLength, reading_level: ReadingLevel) -> String {
    let cleaned = normalize(text);
    let sentences = split_sentences(&cleaned);

    let units: Vec<String> = if reading_level == ReadingLevel::Basic {
        sentences.into_iter().flat_map(split_clauses).collect()
    } else {
        sentences.into_iter().map(str::to_string).collect()
    };

    units
        .into_iter()
        .take(length.max_sentences())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summary generation: LLM first, leading sentences on failure; both highlighted
pub struct SummaryGenerator {
    client: Option<Arc<dyn LlmClient>>,
    max_tokens: u32,
    temperature: f32,
}

impl SummaryGenerator {
    pub fn new(client: Option<Arc<dyn LlmClient>>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            max_tokens,
            temperature,
        }
    }

    pub async fn generate(
        &self,
        text: &str,
        length: SummaryLength,
        reading_level: ReadingLevel,
        interests: &[String],
    ) -> Generated<String> {
        let primary = self
            .client
            .as_deref()
            .map(|client| self.generate_with_llm(client, text, length, reading_level, interests));

        let generated = primary_or_fallback("summary", primary, || {
            generate_basic_summary(text, length, reading_level)
        })
        .await;

        Generated {
            value: highlight(&generated.value, interests),
            source: generated.source,
        }
    }

    async fn generate_with_llm(
        &self,
        client: &dyn LlmClient,
        text: &str,
        length: SummaryLength,
        reading_level: ReadingLevel,
        interests: &[String],
    ) -> Result<String> {
        let prompt = build_summary_prompt(text, length, reading_level, interests);
        tracing::debug!(
            provider = client.name(),
            prompt_chars = prompt.chars().count(),
            length = length.as_str(),
            reading_level = reading_level.as_str(),
            "Requesting summary"
        );

        let request = LlmRequest::new(prompt, self.max_tokens).with_temperature(self.temperature);
        let reply = client.complete(&request).await?;

        let summary = reply.trim();
        if summary.is_empty() {
            return Err(Error::AiProvider("Model returned an empty summary".to_string()));
        }

        Ok(summary.to_string())
    }
}
