//! Wire models for the agent backend.
//!
//! All endpoints are JSON-over-POST and the backend speaks snake_case,
//! so field names map 1:1. Optional request fields are omitted from the
//! body rather than sent as null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `/api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's utterance
    pub input: String,
    /// Anonymous user identifier
    pub user_id: String,
    /// Local hour of day, used by the backend for greeting flavor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
}

impl ChatRequest {
    pub fn new(input: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            user_id: user_id.into(),
            hour: None,
        }
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }
}

/// Reply body from `/api/chat`.
///
/// `output` is the human-readable text. `message`, when present, may be
/// a control sentinel (see the redirect interpreter) or plain fallback
/// text; it is never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub output: Option<String>,
    pub message: Option<String>,
}

impl ChatReply {
    /// Best user-facing text: `output`, falling back to `message`.
    pub fn text(&self) -> Option<&str> {
        self.output.as_deref().or(self.message.as_deref())
    }

    /// The raw control channel, for sentinel inspection.
    pub fn control(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Request body for `/api/story/create`.
///
/// Two forms share the endpoint: explicit parameters, or `random: true`
/// with client metadata the backend logs for debugging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryRequest {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl StoryRequest {
    /// Build a request for explicit story parameters.
    pub fn with_params(
        user_id: impl Into<String>,
        genre: impl Into<String>,
        mood: impl Into<String>,
        length: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            genre: Some(genre.into()),
            mood: Some(mood.into()),
            length: Some(length.into()),
            random: None,
            client_version: None,
            timestamp: None,
        }
    }

    /// Build a surprise-me request; the backend picks the parameters.
    pub fn random(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            genre: None,
            mood: None,
            length: None,
            random: Some(true),
            client_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            timestamp: Some(Utc::now()),
        }
    }
}

/// Parameters the backend chose for a random story.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryParameters {
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub length: Option<String>,
}

/// Reply body from `/api/story/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryReply {
    #[serde(default)]
    pub success: bool,
    pub story: Option<String>,
    pub output: Option<String>,
    pub message: Option<String>,
    pub parameters: Option<StoryParameters>,
}

impl StoryReply {
    /// The generated text. Older backend versions put it in `output` or
    /// `message` instead of `story`.
    pub fn story_text(&self) -> Option<&str> {
        self.story
            .as_deref()
            .or(self.output.as_deref())
            .or(self.message.as_deref())
    }
}

/// Request body for `/api/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileRequest {
    pub user_id: String,
}

/// A story listed on the profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentStory {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub created: String,
}

/// User profile as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub subscription: String,
    pub stories_remaining: u32,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    pub created_stories: u32,
    pub member_since: String,
    #[serde(default)]
    pub recent_stories: Vec<RecentStory>,
}

/// Reply body from `/api/profile`.
///
/// The backend has served two shapes over time: a bare profile object,
/// and a `{ success, profile }` envelope. Both are accepted and
/// normalized through [`ProfileReply::into_profile`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileReply {
    Envelope {
        success: bool,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        profile: Option<Profile>,
    },
    Bare(Profile),
}

impl ProfileReply {
    /// Unwrap to the profile, or the backend's failure message.
    pub fn into_profile(self) -> Result<Profile, String> {
        match self {
            Self::Bare(profile) => Ok(profile),
            Self::Envelope {
                success: true,
                profile: Some(profile),
                ..
            } => Ok(profile),
            Self::Envelope { message, .. } => {
                Err(message.unwrap_or_else(|| "Failed to fetch profile".to_string()))
            }
        }
    }
}

/// Request body for `/api/ai/recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub favorite_genres: Vec<String>,
    pub created_stories: Vec<RecentStory>,
}

/// A single AI story recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub genre: String,
    pub concept: String,
}

/// AI writing-style insights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WritingInsights {
    pub writing_style: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_growth: Vec<String>,
}

/// Reply body from `/api/ai/recommendations`. Both fields are optional;
/// the caller supplies defaults for whatever is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationReply {
    pub recommendations: Option<Vec<Recommendation>>,
    pub insights: Option<WritingInsights>,
}
