use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::json;
use tracing::{info, warn};

use skimr_core::{
    article::is_valid_url,
    profile::UserPreferences,
    AppConfig, ArticleExtractor, HttpArticleExtractor, ReadingLevel, SummarizationResult,
    Summarizer, SummaryLength,
};

const DEFAULT_TEXT_TITLE: &str = "Custom Text";

#[derive(Args)]
pub struct SummarizeArgs {
    /// Text to summarize
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with_all = ["text", "url"])]
    file: Option<PathBuf>,

    /// Fetch and summarize a web article
    #[arg(short, long, conflicts_with = "text")]
    url: Option<String>,

    /// Title for text or file input
    #[arg(short, long)]
    title: Option<String>,

    /// Summary length: brief, medium, detailed
    #[arg(short, long)]
    length: Option<String>,

    /// Reading level: basic, medium, advanced
    #[arg(short = 'r', long = "level")]
    reading_level: Option<String>,

    /// Interest to emphasize and highlight (repeatable)
    #[arg(short, long = "interest")]
    interests: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Skip the LLM and use the built-in fallbacks only
    #[arg(long)]
    offline: bool,
}

/// Text to summarize plus where it came from
struct Input {
    title: String,
    text: String,
    source_url: Option<String>,
}

async fn resolve_input(config: &AppConfig, args: &SummarizeArgs) -> Result<Input> {
    if let Some(url) = &args.url {
        if !is_valid_url(url) {
            bail!("Invalid URL format: {}", url);
        }

        let extractor = HttpArticleExtractor::new(&config.extractor)?;
        let article = extractor
            .extract(url)
            .await
            .context("Error extracting article")?;

        info!("Extracted '{}' from {}", article.title, article.source_url);
        return Ok(Input {
            title: article.title,
            text: article.body_text,
            source_url: Some(article.source_url),
        });
    }

    let text = match (&args.file, &args.text) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(text)) => text.clone(),
        (None, None) => bail!("Provide text, --file or --url"),
    };

    Ok(Input {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT_TITLE.to_string()),
        text,
        source_url: None,
    })
}

fn warn_if_unknown<T: FromStr>(flag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| v.parse::<T>().is_err()) {
        warn!(flag, value, "Unrecognized value, using medium");
    }
}

/// Configured preferences with command-line overrides applied.
///
/// Unrecognized lengths and reading levels fall back to medium.
fn preferences(config: &AppConfig, args: &SummarizeArgs) -> UserPreferences {
    let configured = UserPreferences::from_config(&config.preferences);

    warn_if_unknown::<SummaryLength>("length", args.length.as_deref());
    warn_if_unknown::<ReadingLevel>("level", args.reading_level.as_deref());

    let interests = if args.interests.is_empty() {
        &configured.interests
    } else {
        &args.interests
    };

    UserPreferences::from_form(
        args.reading_level
            .as_deref()
            .unwrap_or(configured.reading_level.as_str()),
        args.length
            .as_deref()
            .unwrap_or(configured.summary_length.as_str()),
        interests,
    )
}

fn print_result(input: &Input, prefs: &UserPreferences, result: &SummarizationResult) {
    println!("{}", input.title);
    if let Some(url) = &input.source_url {
        println!("{}", url);
    }
    println!(
        "[{} / {}]\n",
        prefs.summary_length.as_str(),
        prefs.reading_level.as_str()
    );
    println!("{}\n", result.summary_text);
    println!("Key topics: {}", result.key_topics.join(", "));

    if result.used_fallback() {
        println!(
            "(summary: {}, topics: {})",
            result.summary_source.as_str(),
            result.topics_source.as_str()
        );
    }
}

pub async fn run(config: &AppConfig, args: SummarizeArgs) -> Result<()> {
    let prefs = preferences(config, &args);
    let input = resolve_input(config, &args).await?;

    if input.text.trim().is_empty() {
        bail!("Text content is required");
    }

    let request = prefs.request_for(input.text.as_str())?;
    info!(
        title = %input.title,
        chars = input.text.chars().count(),
        length = prefs.summary_length.as_str(),
        reading_level = prefs.reading_level.as_str(),
        "Summarizing"
    );

    let summarizer = if args.offline {
        Summarizer::offline()
    } else {
        Summarizer::from_config(config)
    };

    let result = summarizer.summarize(&request).await;

    if args.json {
        let output = json!({
            "title": input.title,
            "source_url": input.source_url,
            "summary_length": prefs.summary_length,
            "reading_level": prefs.reading_level,
            "summary": result.summary_text,
            "key_topics": result.key_topics,
            "summary_source": result.summary_source,
            "topics_source": result.topics_source,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_result(&input, &prefs, &result);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SummarizeArgs,
    }

    fn parse(argv: &[&str]) -> SummarizeArgs {
        TestCli::parse_from(std::iter::once("skimr").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_flags_override_configured_preferences() {
        let mut config = AppConfig::default();
        config.preferences.interests = vec!["Politics".to_string()];

        let args = parse(&["some text", "-l", "brief", "--level", "advanced", "-i", "Science", "-i", "Health"]);
        let prefs = preferences(&config, &args);

        assert_eq!(prefs.summary_length, SummaryLength::Brief);
        assert_eq!(prefs.reading_level, ReadingLevel::Advanced);
        assert_eq!(prefs.interests, vec!["Science", "Health"]);
    }

    #[test]
    fn test_configured_preferences_used_by_default() {
        let mut config = AppConfig::default();
        config.preferences.reading_level = ReadingLevel::Basic;
        config.preferences.interests = vec!["Politics".to_string()];

        let prefs = preferences(&config, &parse(&["some text"]));
        assert_eq!(prefs.reading_level, ReadingLevel::Basic);
        assert_eq!(prefs.summary_length, SummaryLength::Medium);
        assert_eq!(prefs.interests, vec!["Politics"]);
    }

    #[test]
    fn test_unknown_values_fall_back_to_medium() {
        let mut config = AppConfig::default();
        config.preferences.summary_length = SummaryLength::Brief;

        let args = parse(&["some text", "--length", "epic", "--level", "Expert", "-i", " "]);
        let prefs = preferences(&config, &args);

        assert_eq!(prefs.summary_length, SummaryLength::Medium);
        assert_eq!(prefs.reading_level, ReadingLevel::Medium);
        assert_eq!(prefs.interests, vec!["general"]);
    }

    #[test]
    fn test_override_values_are_case_insensitive() {
        let args = parse(&["some text", "--length", "Detailed", "--level", "BASIC"]);
        let prefs = preferences(&AppConfig::default(), &args);
        assert_eq!(prefs.summary_length, SummaryLength::Detailed);
        assert_eq!(prefs.reading_level, ReadingLevel::Basic);
    }

    #[tokio::test]
    async fn test_text_input_gets_default_title() {
        let input = resolve_input(&AppConfig::default(), &parse(&["Body."])).await.unwrap();
        assert_eq!(input.title, DEFAULT_TEXT_TITLE);
        assert_eq!(input.text, "Body.");
        assert!(input.source_url.is_none());
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let args = parse(&["--url", "example.com/story"]);
        assert!(resolve_input(&AppConfig::default(), &args).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_input_is_rejected() {
        assert!(resolve_input(&AppConfig::default(), &parse(&[])).await.is_err());
    }
}
