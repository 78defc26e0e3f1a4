use regex::{Captures, Regex};
use std::collections::HashSet;

/// Class carried by every inserted highlight span
pub const HIGHLIGHT_CLASS: &str = "interest-highlight";

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Escaped pattern for one interest, anchored on word boundaries where the term has word edges
fn term_pattern(term: &str) -> String {
    let mut pattern = String::new();
    if term.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if term.chars().last().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Trimmed, case-insensitively deduplicated terms, longest first (stable for equal lengths)
fn prepare_terms(interests: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut terms: Vec<&str> = interests
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect();
    terms.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    terms
}

fn build_regex(terms: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = terms
        .iter()
        .map(|t| term_pattern(t))
        .collect::<Vec<_>>()
        .join("|");

    // Existing tags are matched as their own alternative and emitted untouched,
    // so terms are never found inside them. A bare `<` or `>` in prose is not a tag.
    Regex::new(&format!(r"(?i)(?P<tag></?[a-z][^<>]*>)|(?P<term>{})", alternation))
}

/// Wrap whole-word, case-insensitive occurrences of each interest in a highlight span.
///
/// All interests are matched in a single pass over the input, so text that was
/// just wrapped is never scanned again and nothing is wrapped twice. When two
/// interests match at the same position the longer one wins.
pub fn highlight(text: &str, interests: &[String]) -> String {
    let terms = prepare_terms(interests);
    if terms.is_empty() {
        return text.to_string();
    }

    let re = match build_regex(&terms) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(error = %e, "Could not build highlight pattern, leaving text unmarked");
            return text.to_string();
        }
    };

    re.replace_all(text, |caps: &Captures| {
        if let Some(tag) = caps.name("tag") {
            return tag.as_str().to_string();
        }
        format!(r#"<span class="{}">{}</span>"#, HIGHLIGHT_CLASS, &caps[0])
    })
    .into_owned()
}
