//! Message preparation before synthesis.

/// Appended to truncated messages.
pub const ELLIPSIS: &str = "...";

/// Text ready to be synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    pub text: String,
    pub truncated: bool,
}

/// Prepare a message for speaking.
///
/// Returns `None` for empty or whitespace-only text. Messages longer than
/// `max_length` characters are cut to their first `truncate_to` characters
/// followed by [`ELLIPSIS`]. Lengths count `char`s, so a multi-byte
/// character is never split.
pub fn prepare_text(text: &str, max_length: usize, truncate_to: usize) -> Option<PreparedText> {
    if text.trim().is_empty() {
        return None;
    }

    if text.chars().count() <= max_length {
        return Some(PreparedText {
            text: text.to_string(),
            truncated: false,
        });
    }

    let mut short: String = text.chars().take(truncate_to).collect();
    short.push_str(ELLIPSIS);

    Some(PreparedText {
        text: short,
        truncated: true,
    })
}
