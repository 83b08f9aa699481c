//! Scripted mock gateway for testing.
//!
//! Provides a configurable implementation of the AgentGateway trait for
//! use in tests without a running backend. Replies are queued per
//! method and every call is captured for verification.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::gateway::AgentGateway;
use crate::models::{ChatReply, Profile, RecentStory, RecommendationReply, StoryReply};

/// A call observed by the mock, for assertion in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedCall {
    Chat { input: String },
    CreateStory { genre: String, mood: String, length: String },
    RandomStory,
    FetchProfile,
    Recommendations { favorite_genres: Vec<String> },
}

/// Scripted gateway: queued replies, captured calls.
#[derive(Default)]
pub struct MockGateway {
    chat_replies: Mutex<VecDeque<ApiResult<ChatReply>>>,
    story_replies: Mutex<VecDeque<ApiResult<StoryReply>>>,
    profile_replies: Mutex<VecDeque<ApiResult<Profile>>>,
    recommendation_replies: Mutex<VecDeque<ApiResult<RecommendationReply>>>,
    calls: Mutex<Vec<CapturedCall>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full chat reply.
    pub fn push_chat_reply(&self, reply: ChatReply) {
        self.chat_replies.lock().unwrap().push_back(Ok(reply));
    }

    /// Queue a plain-text chat reply.
    pub fn push_chat_text(&self, text: impl Into<String>) {
        self.push_chat_reply(ChatReply {
            output: Some(text.into()),
            message: None,
        });
    }

    /// Queue a chat reply carrying a control message.
    pub fn push_chat_control(&self, output: Option<&str>, message: impl Into<String>) {
        self.push_chat_reply(ChatReply {
            output: output.map(|s| s.to_string()),
            message: Some(message.into()),
        });
    }

    /// Queue a failure for the next chat call.
    pub fn fail_next_chat(&self, error: ApiError) {
        self.chat_replies.lock().unwrap().push_back(Err(error));
    }

    /// Queue a successful story reply.
    pub fn push_story_text(&self, text: impl Into<String>) {
        self.story_replies.lock().unwrap().push_back(Ok(StoryReply {
            success: true,
            story: Some(text.into()),
            ..StoryReply::default()
        }));
    }

    /// Queue a full story reply.
    pub fn push_story_reply(&self, reply: StoryReply) {
        self.story_replies.lock().unwrap().push_back(Ok(reply));
    }

    /// Queue a failure for the next story call.
    pub fn fail_next_story(&self, error: ApiError) {
        self.story_replies.lock().unwrap().push_back(Err(error));
    }

    /// Queue a profile reply.
    pub fn push_profile(&self, profile: Profile) {
        self.profile_replies.lock().unwrap().push_back(Ok(profile));
    }

    /// Queue a failure for the next profile call.
    pub fn fail_next_profile(&self, error: ApiError) {
        self.profile_replies.lock().unwrap().push_back(Err(error));
    }

    /// Queue a recommendations reply.
    pub fn push_recommendations(&self, reply: RecommendationReply) {
        self.recommendation_replies.lock().unwrap().push_back(Ok(reply));
    }

    /// Queue a failure for the next recommendations call.
    pub fn fail_next_recommendations(&self, error: ApiError) {
        self.recommendation_replies.lock().unwrap().push_back(Err(error));
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: CapturedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn pop<T>(queue: &Mutex<VecDeque<ApiResult<T>>>, method: &str) -> ApiResult<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Malformed(format!("mock: no scripted {} reply", method))))
    }

    /// A transport-class failure, as a plain connection refusal.
    pub fn connection_refused() -> ApiError {
        ApiError::Transport("connection refused".to_string())
    }
}

#[async_trait]
impl AgentGateway for MockGateway {
    async fn chat(&self, input: &str) -> ApiResult<ChatReply> {
        self.record(CapturedCall::Chat {
            input: input.to_string(),
        });
        Self::pop(&self.chat_replies, "chat")
    }

    async fn create_story(&self, genre: &str, mood: &str, length: &str) -> ApiResult<StoryReply> {
        self.record(CapturedCall::CreateStory {
            genre: genre.to_string(),
            mood: mood.to_string(),
            length: length.to_string(),
        });
        Self::pop(&self.story_replies, "story")
    }

    async fn random_story(&self) -> ApiResult<StoryReply> {
        self.record(CapturedCall::RandomStory);
        Self::pop(&self.story_replies, "story")
    }

    async fn fetch_profile(&self) -> ApiResult<Profile> {
        self.record(CapturedCall::FetchProfile);
        Self::pop(&self.profile_replies, "profile")
    }

    async fn recommendations(
        &self,
        favorite_genres: &[String],
        _created_stories: &[RecentStory],
    ) -> ApiResult<RecommendationReply> {
        self.record(CapturedCall::Recommendations {
            favorite_genres: favorite_genres.to_vec(),
        });
        Self::pop(&self.recommendation_replies, "recommendations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mock = MockGateway::new();
        mock.push_chat_text("first");
        mock.push_chat_text("second");

        let first = mock.chat("a").await.unwrap();
        let second = mock.chat("b").await.unwrap();
        assert_eq!(first.text(), Some("first"));
        assert_eq!(second.text(), Some("second"));

        assert_eq!(
            mock.calls(),
            vec![
                CapturedCall::Chat { input: "a".to_string() },
                CapturedCall::Chat { input: "b".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_unscripted_call_fails() {
        let mock = MockGateway::new();
        assert!(mock.chat("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mock = MockGateway::new();
        mock.fail_next_chat(MockGateway::connection_refused());
        let err = mock.chat("hello").await.unwrap_err();
        assert!(err.is_transport());
    }
}
