//! Narration classifier.

use crate::prompts::{CLASSIFIER_SYSTEM_PROMPT, classifier_user_prompt};
use crate::{ContentGenerator, PersonaRole};
use async_trait::async_trait;
use kahovitz_interface::NarrationClassifier;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const TRUE_MARKERS: [&str; 3] = ["true", "yes", "1"];

/// Map a free-text classifier reply to a boolean.
///
/// The reply is lowercased and trimmed. Any of `true`, `yes`, `1` as a
/// substring means true; every other reply means false.
///
/// # Examples
///
/// ```
/// use kahovitz_story::sanitize_classifier_response;
///
/// assert!(sanitize_classifier_response("  True. "));
/// assert!(sanitize_classifier_response("YES"));
/// assert!(!sanitize_classifier_response("False"));
/// assert!(!sanitize_classifier_response("maybe"));
/// assert!(sanitize_classifier_response("I know it is true"));
/// ```
pub fn sanitize_classifier_response(response: &str) -> bool {
    let normalized = response.trim().to_lowercase();
    TRUE_MARKERS.iter().any(|m| normalized.contains(m))
}

/// Classifier backed by the classifier persona.
///
/// Transport or provider failures are logged and answered with `false`.
#[derive(Debug, Clone)]
pub struct GroqClassifier {
    generator: Arc<ContentGenerator>,
}

impl GroqClassifier {
    /// Classifier over a content generator.
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl NarrationClassifier for GroqClassifier {
    #[instrument(skip(self, summary), fields(summary_len = summary.len()))]
    async fn classify(&self, summary: &str) -> bool {
        match self
            .generator
            .generate(
                PersonaRole::Classifier,
                CLASSIFIER_SYSTEM_PROMPT,
                &classifier_user_prompt(summary),
            )
            .await
        {
            Ok(response) => {
                let decision = sanitize_classifier_response(&response);
                debug!(response = %response.trim(), decision, "Classified summary");
                decision
            }
            Err(e) => {
                warn!(error = %e, "Classifier call failed, skipping narration");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_markers_win_over_false_markers() {
        // "true" is checked before "no"
        assert!(sanitize_classifier_response("no, true"));
        assert!(sanitize_classifier_response("10"));
    }

    #[test]
    fn false_and_unknown_are_false() {
        assert!(!sanitize_classifier_response("False"));
        assert!(!sanitize_classifier_response("NO"));
        assert!(!sanitize_classifier_response("0"));
        assert!(!sanitize_classifier_response(""));
        assert!(!sanitize_classifier_response("uncertain"));
    }

    #[test]
    fn whitespace_and_case_are_ignored() {
        assert!(sanitize_classifier_response("\n  TRUE\n"));
        assert!(sanitize_classifier_response("Yes."));
    }
}
