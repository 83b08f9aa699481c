//! Agent gateway trait.
//!
//! The seam between view-state logic and the network. The conversation
//! controller and the profile loaders are written against this trait so
//! tests can script replies without a running backend.

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{ChatReply, Profile, RecentStory, RecommendationReply, StoryReply};

/// Gateway to the remote agent backend.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Post a user utterance to `/api/chat` and return the reply.
    ///
    /// Callers must not invoke this for empty or whitespace-only input;
    /// the no-op check belongs to the conversation layer, before any
    /// network activity.
    async fn chat(&self, input: &str) -> ApiResult<ChatReply>;

    /// Generate a story from explicit parameters.
    async fn create_story(&self, genre: &str, mood: &str, length: &str) -> ApiResult<StoryReply>;

    /// Generate a story with backend-chosen parameters.
    async fn random_story(&self) -> ApiResult<StoryReply>;

    /// Fetch the user profile.
    async fn fetch_profile(&self) -> ApiResult<Profile>;

    /// Fetch AI story recommendations and writing insights based on the
    /// user's genre history.
    async fn recommendations(
        &self,
        favorite_genres: &[String],
        created_stories: &[RecentStory],
    ) -> ApiResult<RecommendationReply>;
}
