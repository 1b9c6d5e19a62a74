//! Canned prompts for automatic posts.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Theme of an automatically generated post.
///
/// # Examples
///
/// ```
/// use kahovitz_social::ContentCategory;
///
/// assert_eq!(ContentCategory::lenient("Writing"), ContentCategory::Writing);
/// assert_eq!(ContentCategory::lenient("poetry"), ContentCategory::Random);
/// assert_eq!(ContentCategory::Moscownpur.prompts().len(), 5);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentCategory {
    /// Storytelling, worldbuilding, creativity
    Creative,
    /// Writing prompts and craft
    Writing,
    /// The Moscownpur realm itself
    Moscownpur,
    /// Open questions
    Random,
}

impl ContentCategory {
    /// Parse a category name, falling back to [`ContentCategory::Random`].
    pub fn lenient(name: &str) -> Self {
        name.trim().parse().unwrap_or(Self::Random)
    }

    /// The category's prompts.
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            Self::Creative => &[
                "Create a viral tweet about the magic of storytelling",
                "Write an engaging tweet about worldbuilding and imagination",
                "Generate a tweet about character creation that will go viral",
                "Create a tweet about the power of creativity in our lives",
                "Write an inspiring tweet about following your dreams",
            ],
            Self::Writing => &[
                "Give me a writing prompt that will inspire creators",
                "Create a tweet about overcoming writer's block",
                "Write about the joy of creating new worlds",
                "Generate a tweet about the magic of words",
                "Create a tweet about finding inspiration in everyday life",
            ],
            Self::Moscownpur => &[
                "Tell me about the wonders of Moscownpur in a tweet",
                "Create a tweet about the magical realm of Moscownpur",
                "Write about the creative tools available in Moscownpur",
                "Generate a tweet about the community of dreamers in Moscownpur",
                "Create a tweet about the endless possibilities in Moscownpur",
            ],
            Self::Random => &[
                "What's your favorite magical creature?",
                "How do you help creators find their voice?",
                "What makes a story truly epic?",
                "Share a secret about the realm of imagination",
                "Give me inspiration for a hero's journey",
            ],
        }
    }

    /// One of the category's prompts, chosen uniformly.
    pub fn random_prompt(self) -> &'static str {
        let prompts = self.prompts();
        prompts
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(prompts[0])
    }

    /// Every category name.
    pub fn names() -> Vec<String> {
        Self::iter().map(|c| c.to_string()).collect()
    }
}

/// A random prompt from the named category, or from `random` if unknown.
pub fn random_prompt(category: &str) -> &'static str {
    ContentCategory::lenient(category).random_prompt()
}

/// A category chosen uniformly.
pub fn random_category() -> ContentCategory {
    let all: Vec<ContentCategory> = ContentCategory::iter().collect();
    all.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ContentCategory::Random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_five_prompts() {
        for category in ContentCategory::iter() {
            assert_eq!(category.prompts().len(), 5, "{}", category);
        }
    }

    #[test]
    fn prompt_belongs_to_category() {
        for _ in 0..20 {
            let prompt = random_prompt("creative");
            assert!(ContentCategory::Creative.prompts().contains(&prompt));
        }
    }

    #[test]
    fn unknown_category_uses_random_prompts() {
        let prompt = random_prompt("no-such-category");
        assert!(ContentCategory::Random.prompts().contains(&prompt));
    }

    #[test]
    fn names_in_declaration_order() {
        assert_eq!(
            ContentCategory::names(),
            vec!["creative", "writing", "moscownpur", "random"]
        );
    }

    #[test]
    fn random_category_is_known() {
        let category = random_category();
        assert!(ContentCategory::iter().any(|c| c == category));
    }
}
