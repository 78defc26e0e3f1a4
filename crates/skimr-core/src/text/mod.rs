mod highlight;
mod normalize;

pub use highlight::{highlight, HIGHLIGHT_CLASS};
pub use normalize::{count_sentences, normalize, split_sentences};

use std::borrow::Cow;

/// Marker appended to text cut short before it is sent upstream
pub const ELLIPSIS: &str = "...";

/// Prefix of `input` holding at most `max_chars` characters
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Truncate to `max_chars` characters and append an ellipsis, or borrow the input if it fits
pub fn truncate_with_ellipsis(input: &str, max_chars: usize) -> Cow<'_, str> {
    let truncated = truncate_chars(input, max_chars);
    if truncated.len() == input.len() {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("{}{}", truncated, ELLIPSIS))
    }
}
