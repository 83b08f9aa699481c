//! Story configuration and generation.
//!
//! The option catalog (genres, moods, lengths) is fixed client-side;
//! the backend validates again on its end. Generation itself is remote;
//! this module owns the form state, validation, and the fallback
//! behavior when the backend misbehaves.

use serde::{Deserialize, Serialize};
use tracing::warn;

use plotbuddy_api::{AgentGateway, StoryParameters};

use crate::error::{CoreError, CoreResult};

/// Shown by the creator view when the request itself fails.
pub const STORY_CREATE_ERROR_TEXT: &str = "An error occurred while creating your story.";

/// Shown by the creator view when the backend reports failure without a
/// reason.
pub const STORY_REJECTED_TEXT: &str = "Failed to generate story";

/// Stand-in story when random generation fails outright.
pub const RANDOM_STORY_FALLBACK: &str = "Sorry, I couldn't generate your story right now. \
Our AI storyteller needs a short break. Please try again in a moment!";

/// A selectable option: wire value plus "Name - description" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Available genres.
pub const GENRES: &[Choice] = &[
    Choice { value: "mystery", label: "Mystery - Detective stories and puzzles" },
    Choice { value: "scifi", label: "Sci-Fi - Future and technology" },
    Choice { value: "fantasy", label: "Fantasy - Magic and wonder" },
    Choice { value: "romance", label: "Romance - Love and relationships" },
    Choice { value: "adventure", label: "Adventure - Journeys and quests" },
    Choice { value: "horror", label: "Horror - Suspense and fear" },
    Choice { value: "comedy", label: "Comedy - Humor and lightheartedness" },
    Choice { value: "thriller", label: "Thriller - Intense suspense and plot twists" },
    Choice { value: "historical", label: "Historical - Past events and periods" },
    Choice { value: "western", label: "Western - Frontier and cowboys" },
    Choice { value: "cyberpunk", label: "Cyberpunk - Dystopian tech future" },
];

/// Available moods.
pub const MOODS: &[Choice] = &[
    Choice { value: "mysterious", label: "Mysterious - Intriguing and suspenseful" },
    Choice { value: "whimsical", label: "Whimsical - Light and playful" },
    Choice { value: "dark", label: "Dark - Serious and moody" },
    Choice { value: "romantic", label: "Romantic - Warm and emotional" },
    Choice { value: "epic", label: "Epic - Grand and inspiring" },
    Choice { value: "funny", label: "Funny - Humorous and amusing" },
    Choice { value: "melancholic", label: "Melancholic - Sad and thoughtful" },
    Choice { value: "suspenseful", label: "Suspenseful - Tense and exciting" },
    Choice { value: "nostalgic", label: "Nostalgic - Longing for the past" },
    Choice { value: "dreamy", label: "Dreamy - Visionary and ethereal" },
    Choice { value: "tense", label: "Tense - Stressful and strained" },
    Choice { value: "peaceful", label: "Peaceful - Calm and tranquil" },
    Choice { value: "chaotic", label: "Chaotic - Disordered and turbulent" },
];

/// Available lengths.
pub const LENGTHS: &[Choice] = &[
    Choice { value: "micro", label: "Micro - ~100 words (2-3 min)" },
    Choice { value: "short", label: "Short - ~500 words (5-7 min)" },
    Choice { value: "medium", label: "Medium - ~1000 words (10-12 min)" },
    Choice { value: "long", label: "Long - ~2000 words (15-20 min)" },
];

/// Display name for an option value: the label up to " - ", or "N/A"
/// for values outside the catalog.
pub fn display_name(value: &str, options: &'static [Choice]) -> &'static str {
    options
        .iter()
        .find(|choice| choice.value == value)
        .map(|choice| choice.label.split(" - ").next().unwrap_or(choice.label))
        .unwrap_or("N/A")
}

fn contains(options: &[Choice], value: &str) -> bool {
    options.iter().any(|choice| choice.value == value)
}

/// Form state for the story creator. All fields stay optional until a
/// generation request is submitted; the state is owned by the creator
/// view and discarded when it unmounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryConfig {
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub length: Option<String>,
}

impl StoryConfig {
    pub fn new(
        genre: impl Into<String>,
        mood: impl Into<String>,
        length: impl Into<String>,
    ) -> Self {
        Self {
            genre: Some(genre.into()),
            mood: Some(mood.into()),
            length: Some(length.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.genre.is_some() && self.mood.is_some() && self.length.is_some()
    }

    /// Check completeness and catalog membership, yielding the wire
    /// values.
    pub fn validate(&self) -> CoreResult<(&str, &str, &str)> {
        let genre = self
            .genre
            .as_deref()
            .ok_or(CoreError::IncompleteConfig("genre"))?;
        let mood = self
            .mood
            .as_deref()
            .ok_or(CoreError::IncompleteConfig("mood"))?;
        let length = self
            .length
            .as_deref()
            .ok_or(CoreError::IncompleteConfig("length"))?;

        if !contains(GENRES, genre) {
            return Err(CoreError::UnknownOption {
                kind: "genre",
                value: genre.to_string(),
            });
        }
        if !contains(MOODS, mood) {
            return Err(CoreError::UnknownOption {
                kind: "mood",
                value: mood.to_string(),
            });
        }
        if !contains(LENGTHS, length) {
            return Err(CoreError::UnknownOption {
                kind: "length",
                value: length.to_string(),
            });
        }
        Ok((genre, mood, length))
    }
}

/// Whether generated text is an actual story rather than an error the
/// backend smuggled into the story field. Gates success rendering and
/// save-to-file.
pub fn is_success_story(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with("Error:")
        && !text.starts_with("Sorry,")
        && !text.starts_with('\u{26a0}')
}

/// Generate a story from an explicit configuration.
pub async fn generate_story(gateway: &dyn AgentGateway, config: &StoryConfig) -> CoreResult<String> {
    let (genre, mood, length) = config.validate()?;
    let reply = gateway.create_story(genre, mood, length).await?;

    if !reply.success {
        return Err(CoreError::StoryRejected(
            reply
                .message
                .clone()
                .unwrap_or_else(|| STORY_REJECTED_TEXT.to_string()),
        ));
    }

    reply
        .story_text()
        .map(str::to_string)
        .ok_or_else(|| CoreError::StoryRejected(STORY_REJECTED_TEXT.to_string()))
}

/// Parameters assumed when the backend forgets to echo them back.
pub fn fallback_parameters() -> StoryParameters {
    StoryParameters {
        genre: Some("mystery".to_string()),
        mood: Some("suspenseful".to_string()),
        length: Some("short".to_string()),
    }
}

/// Outcome of a random story request after fallback handling. The view
/// renders whatever is present: a story, an error banner, or both (a
/// failed request still shows the stand-in story).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStoryOutcome {
    pub story: Option<String>,
    pub parameters: Option<StoryParameters>,
    pub error: Option<String>,
}

/// Generate a story with backend-chosen parameters. Never fails: every
/// error path degrades to user-safe text.
pub async fn generate_random_story(gateway: &dyn AgentGateway) -> RandomStoryOutcome {
    match gateway.random_story().await {
        Ok(reply) if reply.success => RandomStoryOutcome {
            story: reply.story_text().map(str::to_string),
            parameters: Some(reply.parameters.clone().unwrap_or_else(fallback_parameters)),
            error: None,
        },
        Ok(reply) => RandomStoryOutcome {
            story: None,
            parameters: None,
            error: Some(
                reply
                    .message
                    .unwrap_or_else(|| "Failed to generate random story".to_string()),
            ),
        },
        Err(e) => {
            warn!("random story request failed: {}", e);
            RandomStoryOutcome {
                story: Some(RANDOM_STORY_FALLBACK.to_string()),
                parameters: None,
                error: Some(format!(
                    "Sorry, I couldn't create your story: {}. Please try again in a few moments.",
                    e
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotbuddy_api::mock::{CapturedCall, MockGateway};
    use plotbuddy_api::{ApiError, StoryReply};

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(GENRES.len(), 11);
        assert_eq!(MOODS.len(), 13);
        assert_eq!(LENGTHS.len(), 4);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("scifi", GENRES), "Sci-Fi");
        assert_eq!(display_name("suspenseful", MOODS), "Suspenseful");
        assert_eq!(display_name("micro", LENGTHS), "Micro");
        assert_eq!(display_name("polka", GENRES), "N/A");
    }

    #[test]
    fn test_config_validation() {
        let config = StoryConfig::new("mystery", "dark", "short");
        assert!(config.is_complete());
        assert_eq!(config.validate().unwrap(), ("mystery", "dark", "short"));

        let partial = StoryConfig {
            genre: Some("mystery".to_string()),
            ..StoryConfig::default()
        };
        assert!(!partial.is_complete());
        assert!(matches!(
            partial.validate(),
            Err(CoreError::IncompleteConfig("mood"))
        ));

        let unknown = StoryConfig::new("mystery", "grumpy", "short");
        assert!(matches!(
            unknown.validate(),
            Err(CoreError::UnknownOption { kind: "mood", .. })
        ));
    }

    #[test]
    fn test_is_success_story() {
        assert!(is_success_story("Once upon a midnight dreary..."));
        assert!(!is_success_story(""));
        assert!(!is_success_story("Error: no quota left"));
        assert!(!is_success_story("Sorry, something went wrong"));
        assert!(!is_success_story("\u{26a0}\u{fe0f} backend unavailable"));
    }

    #[tokio::test]
    async fn test_generate_story_success() {
        let mock = MockGateway::new();
        mock.push_story_text("A story.");

        let config = StoryConfig::new("fantasy", "epic", "medium");
        let story = generate_story(&mock, &config).await.unwrap();
        assert_eq!(story, "A story.");
        assert_eq!(
            mock.calls(),
            vec![CapturedCall::CreateStory {
                genre: "fantasy".to_string(),
                mood: "epic".to_string(),
                length: "medium".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_generate_story_rejected() {
        let mock = MockGateway::new();
        mock.push_story_reply(StoryReply {
            success: false,
            message: Some("quota exhausted".to_string()),
            ..StoryReply::default()
        });

        let config = StoryConfig::new("fantasy", "epic", "medium");
        let err = generate_story(&mock, &config).await.unwrap_err();
        assert!(matches!(err, CoreError::StoryRejected(ref msg) if msg == "quota exhausted"));
    }

    #[tokio::test]
    async fn test_generate_story_incomplete_config_makes_no_call() {
        let mock = MockGateway::new();
        let config = StoryConfig::default();
        assert!(generate_story(&mock, &config).await.is_err());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_random_story_success_with_parameters() {
        let mock = MockGateway::new();
        mock.push_story_reply(StoryReply {
            success: true,
            story: Some("Random tale.".to_string()),
            parameters: Some(StoryParameters {
                genre: Some("western".to_string()),
                mood: Some("peaceful".to_string()),
                length: Some("long".to_string()),
            }),
            ..StoryReply::default()
        });

        let outcome = generate_random_story(&mock).await;
        assert_eq!(outcome.story.as_deref(), Some("Random tale."));
        assert_eq!(
            outcome.parameters.unwrap().genre.as_deref(),
            Some("western")
        );
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_random_story_missing_parameters_fall_back() {
        let mock = MockGateway::new();
        mock.push_story_text("Random tale.");

        let outcome = generate_random_story(&mock).await;
        let parameters = outcome.parameters.unwrap();
        assert_eq!(parameters.genre.as_deref(), Some("mystery"));
        assert_eq!(parameters.mood.as_deref(), Some("suspenseful"));
        assert_eq!(parameters.length.as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn test_random_story_transport_failure_degrades() {
        let mock = MockGateway::new();
        mock.fail_next_story(ApiError::Transport("timed out".to_string()));

        let outcome = generate_random_story(&mock).await;
        assert_eq!(outcome.story.as_deref(), Some(RANDOM_STORY_FALLBACK));
        assert!(outcome.parameters.is_none());
        assert!(outcome.error.unwrap().contains("try again in a few moments"));
    }
}
