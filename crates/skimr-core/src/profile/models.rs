use serde::{Deserialize, Serialize};

use crate::ai::{ReadingLevel, SummarizationRequest, SummaryLength};
use crate::config::PreferencesConfig;
use crate::Result;

/// Interest stored when a user picks none
pub const DEFAULT_INTEREST: &str = "general";

/// Parse a stored comma-separated interest list
pub fn interests_from_csv(stored: &str) -> Vec<String> {
    let interests: Vec<String> = stored
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if interests.is_empty() {
        vec![DEFAULT_INTEREST.to_string()]
    } else {
        interests
    }
}

/// Serialize interests for storage; an empty selection is stored as the default interest
pub fn interests_to_csv(interests: &[String]) -> String {
    let joined = interests
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    if joined.is_empty() {
        DEFAULT_INTEREST.to_string()
    } else {
        joined
    }
}

/// A user's summarization preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub reading_level: ReadingLevel,
    pub summary_length: SummaryLength,
    pub interests: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            reading_level: ReadingLevel::default(),
            summary_length: SummaryLength::default(),
            interests: vec![DEFAULT_INTEREST.to_string()],
        }
    }
}

impl UserPreferences {
    /// Build preferences from submitted form values; unknown levels and lengths become medium
    pub fn from_form(reading_level: &str, summary_length: &str, interests: &[String]) -> Self {
        Self {
            reading_level: ReadingLevel::parse_or_default(reading_level),
            summary_length: SummaryLength::parse_or_default(summary_length),
            interests: interests_from_csv(&interests_to_csv(interests)),
        }
    }

    pub fn from_config(config: &PreferencesConfig) -> Self {
        Self {
            reading_level: config.reading_level,
            summary_length: config.summary_length,
            interests: config.interests.clone(),
        }
    }

    /// Request for `text` carrying these preferences
    pub fn request_for(&self, text: impl Into<String>) -> Result<SummarizationRequest> {
        Ok(SummarizationRequest::new(text)?
            .with_length(self.summary_length)
            .with_reading_level(self.reading_level)
            .with_interests(self.interests.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interests_csv() {
        assert_eq!(interests_from_csv("Technology, Science ,,"), vec!["Technology", "Science"]);
        assert_eq!(interests_from_csv(""), vec!["general"]);
        assert_eq!(interests_to_csv(&[]), "general");
        assert_eq!(
            interests_to_csv(&["Health".to_string(), " Food ".to_string()]),
            "Health,Food"
        );
    }

    #[test]
    fn test_from_form_validates_values() {
        let prefs = UserPreferences::from_form("expert", "brief", &[]);
        assert_eq!(prefs.reading_level, ReadingLevel::Medium);
        assert_eq!(prefs.summary_length, SummaryLength::Brief);
        assert_eq!(prefs.interests, vec!["general"]);
    }

    #[test]
    fn test_request_for_carries_preferences() {
        let prefs = UserPreferences {
            reading_level: ReadingLevel::Basic,
            summary_length: SummaryLength::Detailed,
            interests: vec!["Sports".to_string()],
        };
        let request = prefs.request_for("Match report.").unwrap();
        assert_eq!(request.reading_level(), ReadingLevel::Basic);
        assert_eq!(request.length(), SummaryLength::Detailed);
        assert_eq!(request.interests(), ["Sports"]);

        assert!(prefs.request_for("  ").is_err());
    }
}
