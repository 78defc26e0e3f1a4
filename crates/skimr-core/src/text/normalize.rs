use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+").expect("url pattern is valid"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn sentence_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence pattern is valid"))
}

/// Clean raw input before it reaches a summarization stage.
///
/// Tag-like `<...>` runs and URLs are dropped first, then whitespace runs are
/// collapsed to single spaces and the ends trimmed. Whitespace goes last so
/// gaps left behind by removals are folded too, which keeps the function
/// idempotent.
pub fn normalize(text: &str) -> String {
    let without_tags = tag_regex().replace_all(text, "");
    let without_urls = url_regex().replace_all(&without_tags, "");
    whitespace_regex()
        .replace_all(&without_urls, " ")
        .trim()
        .to_string()
}

/// Split text into sentences after `.`, `!` or `?` followed by whitespace.
///
/// The terminating punctuation stays with its sentence; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in sentence_end_regex().find_iter(text) {
        // the punctuation mark is a single ASCII byte
        let sentence = text[start..m.start() + 1].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_trims() {
        assert_eq!(normalize("  Hello \n\t world  "), "Hello world");
    }

    #[test]
    fn test_removes_urls() {
        assert_eq!(
            normalize("Read https://example.com/a?b=1 and www.example.org now"),
            "Read and now"
        );
    }

    #[test]
    fn test_removes_tags_across_lines() {
        assert_eq!(normalize("<p class=\"x\">Hello</p>\n<a\nhref='y'>there</a>"), "Hello there");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "plain text",
            "a  <b>bold</b>  http://x.y/z  www.q.r   end",
            "<<b>a>",
            "wwwww.x. y",
            "htthttp://x tail",
            "line one\n\nline two <br/> https://t.co/abc\r\n",
            "un < closed and > stray",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second! Third? Fourth");
        assert_eq!(sentences, vec!["First one.", "Second!", "Third?", "Fourth"]);
    }

    #[test]
    fn test_split_keeps_abbreviation_like_dots_without_space() {
        assert_eq!(split_sentences("Version 1.2 shipped. Done."), vec!["Version 1.2 shipped.", "Done."]);
    }

    #[test]
    fn test_count_sentences_empty() {
        assert_eq!(count_sentences(""), 0);
        assert_eq!(count_sentences("A. A. A."), 3);
    }
}
