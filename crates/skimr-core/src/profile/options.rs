use serde::Serialize;

use crate::ai::{ReadingLevel, SummaryLength};

/// A selectable value and its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

/// Common interest categories offered to users
pub const INTEREST_CATEGORIES: [&str; 15] = [
    "Politics",
    "Business",
    "Technology",
    "Science",
    "Health",
    "Sports",
    "Entertainment",
    "World News",
    "Environment",
    "Education",
    "Arts",
    "Travel",
    "Food",
    "Fashion",
    "Lifestyle",
];

pub fn reading_level_options() -> Vec<OptionEntry> {
    ReadingLevel::ALL
        .iter()
        .map(|level| OptionEntry {
            value: level.as_str(),
            label: level.label(),
        })
        .collect()
}

pub fn summary_length_options() -> Vec<OptionEntry> {
    SummaryLength::ALL
        .iter()
        .map(|length| OptionEntry {
            value: length.as_str(),
            label: length.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_cover_all_values_in_order() {
        let values: Vec<_> = reading_level_options().iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["basic", "medium", "advanced"]);

        let values: Vec<_> = summary_length_options().iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["brief", "medium", "detailed"]);
    }

    #[test]
    fn test_option_values_parse_back() {
        for option in reading_level_options() {
            assert_eq!(option.value.parse::<ReadingLevel>().unwrap().as_str(), option.value);
        }
        for option in summary_length_options() {
            assert_eq!(option.value.parse::<SummaryLength>().unwrap().as_str(), option.value);
        }
    }
}
