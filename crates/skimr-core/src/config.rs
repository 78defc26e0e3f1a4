use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::{ReadingLevel, SummaryLength};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Enable LLM-backed summaries; when false every request uses the fallbacks
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// AI provider: "openai", "claude_api"
    #[serde(default = "default_ai_provider")]
    pub provider: String,
    /// OpenAI API key (falls back to OPENAI_API_KEY)
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Claude/Anthropic API key (falls back to ANTHROPIC_API_KEY)
    #[serde(default)]
    pub claude_api_key: Option<String>,
    /// Claude model name
    #[serde(default = "default_claude_model")]
    pub claude_model: String,
    /// Upper bound for a single LLM call
    #[serde(default = "default_ai_timeout")]
    pub request_timeout_secs: u64,
    /// Max output tokens for summary generation
    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,
    /// Max output tokens for topic extraction
    #[serde(default = "default_topic_max_tokens")]
    pub topic_max_tokens: u32,
    /// Sampling temperature for summary generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Number of key topics to extract
    #[serde(default = "default_topic_count")]
    pub topic_count: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            provider: default_ai_provider(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            claude_api_key: None,
            claude_model: default_claude_model(),
            request_timeout_secs: default_ai_timeout(),
            summary_max_tokens: default_summary_max_tokens(),
            topic_max_tokens: default_topic_max_tokens(),
            temperature: default_temperature(),
            topic_count: default_topic_count(),
        }
    }
}

/// Default summarization preferences, overridable per request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub reading_level: ReadingLevel,
    #[serde(default)]
    pub summary_length: SummaryLength,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Request timeout in seconds
    #[serde(default = "default_extractor_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL for article fetching (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Pages larger than this are rejected
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_extractor_timeout(),
            proxy_url: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_claude_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_ai_timeout() -> u64 {
    60
}

fn default_summary_max_tokens() -> u32 {
    800
}

fn default_topic_max_tokens() -> u32 {
    200
}

fn default_temperature() -> f32 {
    0.7
}

fn default_topic_count() -> usize {
    5
}

fn default_extractor_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    5 * 1024 * 1024
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/skimr/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("skimr")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.ai.enabled);
        assert_eq!(config.ai.provider, "openai");
        assert_eq!(config.ai.openai_model, "gpt-4o");
        assert_eq!(config.ai.summary_max_tokens, 800);
        assert_eq!(config.ai.topic_max_tokens, 200);
        assert_eq!(config.ai.topic_count, 5);
        assert_eq!(config.preferences.reading_level, ReadingLevel::Medium);
        assert_eq!(config.preferences.summary_length, SummaryLength::Medium);
        assert!(config.preferences.interests.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [ai]
            provider = "claude_api"
            temperature = 0.2

            [preferences]
            reading_level = "advanced"
            summary_length = "brief"
            interests = ["Technology", "Science"]
            "#,
        )
        .unwrap();

        assert_eq!(config.ai.provider, "claude_api");
        assert!((config.ai.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.ai.summary_max_tokens, 800);
        assert_eq!(config.preferences.reading_level, ReadingLevel::Advanced);
        assert_eq!(config.preferences.summary_length, SummaryLength::Brief);
        assert_eq!(config.preferences.interests, vec!["Technology", "Science"]);
        assert_eq!(config.extractor.request_timeout_secs, 30);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[ai\nprovider = 1").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = std::env::temp_dir().join(format!("skimr-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.preferences.interests = vec!["Health".to_string()];
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.preferences.interests, vec!["Health"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("skimr-definitely-missing").join("config.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ai.provider, "openai");
    }
}
