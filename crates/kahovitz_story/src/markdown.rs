//! Markdown rendering of a finished story.

use kahovitz_core::StoryState;
use std::fmt::Write;

/// Render a story as Markdown.
///
/// Sections appear in a fixed order: initial context, opening scene,
/// conversations, segment summaries, narrations, master summary, footer.
/// Items are numbered from 1 in sequence order.
///
/// # Examples
///
/// ```
/// use kahovitz_core::StoryState;
/// use kahovitz_story::render_markdown;
///
/// let markdown = render_markdown(&StoryState::new("An idea", "A scene"));
/// assert!(markdown.starts_with("# Story Generated by Kahovitz\n\n## Initial Context\nAn idea\n"));
/// assert!(markdown.ends_with("*Generated by Kahovitz Story Pipeline v2*"));
/// ```
pub fn render_markdown(story: &StoryState) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "# Story Generated by Kahovitz\n\n## Initial Context\n{}\n\n## Opening Scene\n{}\n\n## Conversations\n",
        story.initial_context, story.opening_scene
    );
    for (index, turn) in story.conversations.iter().enumerate() {
        let _ = write!(out, "### Turn {}: {}\n{}\n\n", index + 1, turn.speaker, turn.text);
    }

    out.push_str("\n\n## Segment Summaries\n");
    for (index, summary) in story.summaries.iter().enumerate() {
        let _ = write!(out, "### Summary {}\n{}\n\n", index + 1, summary.summary);
    }

    out.push_str("\n\n## Narrations\n");
    for (index, narration) in story.narrations.iter().enumerate() {
        let _ = write!(out, "### Narration {}\n{}\n\n", index + 1, narration.narration);
    }

    let _ = write!(
        out,
        "\n\n## Master Summary\n{}\n\n---\n*Generated by Kahovitz Story Pipeline v2*",
        story.master_summary
    );

    out
}
