pub mod ai;
pub mod article;
pub mod config;
pub mod error;
pub mod profile;
pub mod text;

pub use ai::{
    ReadingLevel, SummarizationRequest, SummarizationResult, Summarizer, SummaryLength,
};
pub use article::{ArticleExtractor, ExtractedArticle, HttpArticleExtractor};
pub use config::AppConfig;
pub use error::{Error, Result};
