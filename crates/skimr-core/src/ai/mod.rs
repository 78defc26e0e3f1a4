mod fallback;
mod models;
pub mod providers;
mod summarizer;
pub mod summary;
pub mod topics;

pub use fallback::primary_or_fallback;
pub use models::{
    Generated, ReadingLevel, Source, SummarizationRequest, SummarizationResult, SummaryLength,
};
pub use providers::{build_client, LlmClient, LlmRequest};
pub use summarizer::{Summarizer, SummarizerSettings, EMPTY_SUMMARY_PLACEHOLDER};
pub use summary::{generate_basic_summary, SummaryGenerator};
pub use topics::{extract_topics_basic, TopicExtractor};
