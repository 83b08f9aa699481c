//! HTTP gateway implementation.
//!
//! One `reqwest::Client` shared across calls, plain JSON-over-POST, no
//! automatic retries: a failed request surfaces once and the user
//! decides whether to re-submit.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Timelike;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::{ApiConfig, REQUEST_TIMEOUT};
use crate::error::{ApiError, ApiResult};
use crate::gateway::AgentGateway;
use crate::models::{
    ChatReply, ChatRequest, Profile, ProfileReply, ProfileRequest, RecentStory,
    RecommendationReply, RecommendationRequest, StoryReply, StoryRequest,
};

/// Chat endpoint path.
pub const CHAT_ENDPOINT: &str = "/api/chat";
/// Story creation endpoint path (explicit and random).
pub const STORY_ENDPOINT: &str = "/api/story/create";
/// Profile endpoint path.
pub const PROFILE_ENDPOINT: &str = "/api/profile";
/// Recommendations endpoint path.
pub const RECOMMENDATIONS_ENDPOINT: &str = "/api/ai/recommendations";

/// Random story generation can take a while; cap it instead of hanging
/// the session.
pub const RANDOM_STORY_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the agent backend.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client with the given configuration.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // Shared POST-JSON plumbing. Non-2xx statuses and undecodable
    // bodies are distinct error classes; both carry enough context to
    // log but are never shown raw to the user.
    async fn post_json<B, R>(&self, path: &str, body: &B, timeout: Option<Duration>) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        let mut request = self.http.post(&url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl AgentGateway for ApiClient {
    async fn chat(&self, input: &str) -> ApiResult<ChatReply> {
        let request = ChatRequest::new(input, &self.config.user_id)
            .with_hour(chrono::Local::now().hour());
        self.post_json(CHAT_ENDPOINT, &request, None).await
    }

    async fn create_story(&self, genre: &str, mood: &str, length: &str) -> ApiResult<StoryReply> {
        let request = StoryRequest::with_params(&self.config.user_id, genre, mood, length);
        self.post_json(STORY_ENDPOINT, &request, None).await
    }

    async fn random_story(&self) -> ApiResult<StoryReply> {
        let request = StoryRequest::random(&self.config.user_id);
        self.post_json(STORY_ENDPOINT, &request, Some(RANDOM_STORY_TIMEOUT))
            .await
    }

    async fn fetch_profile(&self) -> ApiResult<Profile> {
        let request = ProfileRequest {
            user_id: self.config.user_id.clone(),
        };
        let reply: ProfileReply = self.post_json(PROFILE_ENDPOINT, &request, None).await?;
        reply.into_profile().map_err(ApiError::Malformed)
    }

    async fn recommendations(
        &self,
        favorite_genres: &[String],
        created_stories: &[RecentStory],
    ) -> ApiResult<RecommendationReply> {
        let request = RecommendationRequest {
            user_id: self.config.user_id.clone(),
            favorite_genres: favorite_genres.to_vec(),
            created_stories: created_stories.to_vec(),
        };
        self.post_json(RECOMMENDATIONS_ENDPOINT, &request, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = ApiClient::new(ApiConfig::default()).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:8000");
    }

    #[test]
    fn test_endpoint_paths() {
        // The backend matches these literally; they are part of the
        // wire contract.
        assert_eq!(CHAT_ENDPOINT, "/api/chat");
        assert_eq!(STORY_ENDPOINT, "/api/story/create");
        assert_eq!(PROFILE_ENDPOINT, "/api/profile");
        assert_eq!(RECOMMENDATIONS_ENDPOINT, "/api/ai/recommendations");
    }
}
