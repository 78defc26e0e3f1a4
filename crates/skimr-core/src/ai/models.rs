use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Target word-count tier for a summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Brief,
    #[default]
    Medium,
    Detailed,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [Self::Brief, Self::Medium, Self::Detailed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Medium => "medium",
            Self::Detailed => "detailed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Brief => "Brief - Concise overview",
            Self::Medium => "Medium - Balanced summary",
            Self::Detailed => "Detailed - Comprehensive summary",
        }
    }

    /// Word range requested from the LLM
    pub fn word_range(&self) -> &'static str {
        match self {
            Self::Brief => "100-150",
            Self::Medium => "200-250",
            Self::Detailed => "300-400",
        }
    }

    /// Maximum number of sentences kept by the extractive fallback
    pub fn max_sentences(&self) -> usize {
        match self {
            Self::Brief => 3,
            Self::Medium => 5,
            Self::Detailed => 8,
        }
    }

    /// Lenient parse used for form input: anything unknown becomes `Medium`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SummaryLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "brief" => Ok(Self::Brief),
            "medium" => Ok(Self::Medium),
            "detailed" => Ok(Self::Detailed),
            other => Err(Error::Other(format!("Unknown summary length: {}", other))),
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience sophistication for generated prose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Basic,
    #[default]
    Medium,
    Advanced,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 3] = [Self::Basic, Self::Medium, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic - Simpler language and shorter sentences",
            Self::Medium => "Medium - Balanced complexity",
            Self::Advanced => "Advanced - Maintain original complexity",
        }
    }

    /// Style instruction embedded in the summary prompt
    pub fn style_descriptor(&self) -> &'static str {
        match self {
            Self::Basic => {
                "simple language, short sentences, easy to understand by elementary school students"
            }
            Self::Medium => "balanced language complexity, suitable for general adult audience",
            Self::Advanced => {
                "sophisticated language, specialized terminology, suitable for experts in the field"
            }
        }
    }

    /// Lenient parse used for form input: anything unknown becomes `Medium`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for ReadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "medium" => Ok(Self::Medium),
            "advanced" => Ok(Self::Advanced),
            other => Err(Error::Other(format!("Unknown reading level: {}", other))),
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated summarization request. Built once, then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizationRequest {
    raw_text: String,
    length: SummaryLength,
    reading_level: ReadingLevel,
    interests: Vec<String>,
}

impl SummarizationRequest {
    /// Create a request with default preferences; blank text is rejected
    pub fn new(raw_text: impl Into<String>) -> Result<Self> {
        let raw_text = raw_text.into();
        if raw_text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Self {
            raw_text,
            length: SummaryLength::default(),
            reading_level: ReadingLevel::default(),
            interests: Vec::new(),
        })
    }

    pub fn with_length(mut self, length: SummaryLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_reading_level(mut self, reading_level: ReadingLevel) -> Self {
        self.reading_level = reading_level;
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn length(&self) -> SummaryLength {
        self.length
    }

    pub fn reading_level(&self) -> ReadingLevel {
        self.reading_level
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }
}

/// Which path produced a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Llm,
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Fallback => "fallback",
        }
    }
}

/// Output of a two-path stage together with the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Generated<T> {
    pub fn llm(value: T) -> Self {
        Self { value, source: Source::Llm }
    }

    pub fn fallback(value: T) -> Self {
        Self { value, source: Source::Fallback }
    }
}

/// Summary text (may contain highlight markup) and key topics for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizationResult {
    pub summary_text: String,
    pub key_topics: Vec<String>,
    pub summary_source: Source,
    pub topics_source: Source,
}

impl SummarizationResult {
    /// Topics joined the way they are stored alongside a saved summary
    pub fn key_topics_csv(&self) -> String {
        self.key_topics.join(",")
    }

    pub fn used_fallback(&self) -> bool {
        self.summary_source == Source::Fallback || self.topics_source == Source::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_blank_text() {
        assert!(matches!(SummarizationRequest::new("   \n"), Err(Error::EmptyInput)));
        assert!(matches!(SummarizationRequest::new(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_request_defaults_and_builders() {
        let request = SummarizationRequest::new("Some text.").unwrap();
        assert_eq!(request.length(), SummaryLength::Medium);
        assert_eq!(request.reading_level(), ReadingLevel::Medium);
        assert!(request.interests().is_empty());

        let request = request
            .with_length(SummaryLength::Brief)
            .with_reading_level(ReadingLevel::Advanced)
            .with_interests(["Science", "Health"]);
        assert_eq!(request.length(), SummaryLength::Brief);
        assert_eq!(request.reading_level(), ReadingLevel::Advanced);
        assert_eq!(request.interests(), ["Science", "Health"]);
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(SummaryLength::parse_or_default("Detailed"), SummaryLength::Detailed);
        assert_eq!(SummaryLength::parse_or_default("huge"), SummaryLength::Medium);
        assert_eq!(ReadingLevel::parse_or_default(" basic "), ReadingLevel::Basic);
        assert_eq!(ReadingLevel::parse_or_default(""), ReadingLevel::Medium);
    }

    #[test]
    fn test_strict_parse_errors() {
        assert!("huge".parse::<SummaryLength>().is_err());
        assert!("expert".parse::<ReadingLevel>().is_err());
    }

    #[test]
    fn test_sentence_bounds() {
        assert_eq!(SummaryLength::Brief.max_sentences(), 3);
        assert_eq!(SummaryLength::Medium.max_sentences(), 5);
        assert_eq!(SummaryLength::Detailed.max_sentences(), 8);
    }

    #[test]
    fn test_result_serializes_sources() {
        let result = SummarizationResult {
            summary_text: "Short.".to_string(),
            key_topics: vec!["alpha".to_string(), "beta".to_string()],
            summary_source: Source::Llm,
            topics_source: Source::Fallback,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"summary_source\":\"llm\""));
        assert!(json.contains("\"topics_source\":\"fallback\""));
        assert_eq!(result.key_topics_csv(), "alpha,beta");
        assert!(result.used_fallback());
    }
}
