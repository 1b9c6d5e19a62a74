//! Post text sanitation.

/// Longest post the X API accepts, in characters.
pub const MAX_POST_CHARS: usize = 280;

/// Make text safe to post.
///
/// Collapses every whitespace run (newlines included) into one space, trims
/// both ends, and keeps at most [`MAX_POST_CHARS`] characters.
///
/// # Examples
///
/// ```
/// use kahovitz_social::sanitize_post_text;
///
/// assert_eq!(sanitize_post_text("  Hello\n\n  world  "), "Hello world");
/// assert_eq!(sanitize_post_text(&"x".repeat(300)).chars().count(), 280);
/// ```
pub fn sanitize_post_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_POST_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_tabs_and_newlines() {
        assert_eq!(sanitize_post_text("a\t\tb\r\nc   d"), "a b c d");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "✨".repeat(300);
        let clean = sanitize_post_text(&text);
        assert_eq!(clean.chars().count(), MAX_POST_CHARS);
        assert!(clean.chars().all(|c| c == '✨'));
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(sanitize_post_text(" \n\t "), "");
    }

    #[test]
    fn idempotent() {
        let once = sanitize_post_text("  Dream   big\nwith #Moscownpur  ");
        assert_eq!(sanitize_post_text(&once), once);
    }
}
