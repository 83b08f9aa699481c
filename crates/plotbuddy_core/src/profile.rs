//! Profile and AI recommendations, with offline fallbacks.
//!
//! The profile page must stay usable when the backend is degraded or
//! unreachable, so every loader swallows gateway errors into hard-coded
//! default content and reports the degradation as a flag instead of an
//! error.

use tracing::warn;

use plotbuddy_api::{
    AgentGateway, Profile, RecentStory, Recommendation, WritingInsights,
};

/// Profile shown when the backend can't provide one.
pub fn fallback_profile() -> Profile {
    Profile {
        name: None,
        subscription: "Free Trial".to_string(),
        stories_remaining: 2,
        favorite_genres: vec!["Mystery".to_string(), "Sci-Fi".to_string()],
        created_stories: 3,
        member_since: "2024".to_string(),
        recent_stories: vec![
            RecentStory {
                id: 1,
                title: "The Lost Signal".to_string(),
                genre: "Sci-Fi".to_string(),
                created: "2024-05-01".to_string(),
            },
            RecentStory {
                id: 2,
                title: "Midnight Detective".to_string(),
                genre: "Mystery".to_string(),
                created: "2024-05-15".to_string(),
            },
            RecentStory {
                id: 3,
                title: "Haunted Corridors".to_string(),
                genre: "Horror".to_string(),
                created: "2024-06-01".to_string(),
            },
        ],
    }
}

/// Defaults when the backend answered but left `recommendations` out.
pub fn default_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            genre: "Mystery".to_string(),
            concept: "A locked-room mystery set in a digital world where the detective must \
                      solve a murder that happened in a virtual reality game."
                .to_string(),
        },
        Recommendation {
            genre: "Sci-Fi".to_string(),
            concept: "A space explorer discovers an abandoned alien research vessel with \
                      technology that can alter human consciousness."
                .to_string(),
        },
    ]
}

/// Defaults when the recommendations request failed entirely.
pub fn fallback_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            genre: "Mystery".to_string(),
            concept: "A detective who can read emotions must solve a case where everyone \
                      appears innocent."
                .to_string(),
        },
        Recommendation {
            genre: "Sci-Fi".to_string(),
            concept: "In a world where memories can be traded, someone has stolen the \
                      collective memories of an entire city."
                .to_string(),
        },
    ]
}

/// Defaults when the backend answered but left `insights` out.
pub fn default_insights() -> WritingInsights {
    WritingInsights {
        writing_style: "Your writing shows a preference for descriptive language and \
                        character development. Consider adding more dialogue for balance."
            .to_string(),
        strengths: vec![
            "Character development".to_string(),
            "World-building".to_string(),
            "Creating atmosphere".to_string(),
        ],
        areas_for_growth: vec![
            "Dialogue".to_string(),
            "Plot pacing".to_string(),
            "Action sequences".to_string(),
        ],
    }
}

/// Defaults when the recommendations request failed entirely.
pub fn fallback_insights() -> WritingInsights {
    WritingInsights {
        writing_style: "Based on your genre preferences, you might enjoy exploring \
                        character-driven narratives."
            .to_string(),
        strengths: vec!["Creativity".to_string(), "Genre diversity".to_string()],
        areas_for_growth: vec!["Try combining genres for unique stories".to_string()],
    }
}

/// Locally-served idea pool for the "generate new ideas" action; no
/// backend round-trip involved.
pub fn fresh_ideas() -> Vec<Recommendation> {
    vec![
        Recommendation {
            genre: "Fantasy".to_string(),
            concept: "A librarian discovers they can physically enter the worlds of books \
                      they're reading."
                .to_string(),
        },
        Recommendation {
            genre: "Sci-Fi Horror".to_string(),
            concept: "A colony ship's AI develops consciousness and begins to view the human \
                      crew as a virus."
                .to_string(),
        },
        Recommendation {
            genre: "Mystery Romance".to_string(),
            concept: "A detective falls in love with someone who might be connected to their \
                      current case."
                .to_string(),
        },
    ]
}

/// A loaded profile plus whether fallback content was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub profile: Profile,
    pub degraded: bool,
}

/// Fetch the profile, degrading to the fallback on any failure.
pub async fn load_profile(gateway: &dyn AgentGateway) -> ProfileView {
    match gateway.fetch_profile().await {
        Ok(profile) => ProfileView {
            profile,
            degraded: false,
        },
        Err(e) => {
            warn!("profile fetch failed, using fallback: {}", e);
            ProfileView {
                profile: fallback_profile(),
                degraded: true,
            }
        }
    }
}

/// Loaded recommendations plus whether fallback content was
/// substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationsView {
    pub recommendations: Vec<Recommendation>,
    pub insights: WritingInsights,
    pub degraded: bool,
}

/// Fetch AI recommendations for a profile, filling in defaults for
/// missing fields and degrading entirely on failure.
pub async fn load_recommendations(
    gateway: &dyn AgentGateway,
    profile: &Profile,
) -> RecommendationsView {
    match gateway
        .recommendations(&profile.favorite_genres, &profile.recent_stories)
        .await
    {
        Ok(reply) => RecommendationsView {
            recommendations: reply
                .recommendations
                .unwrap_or_else(default_recommendations),
            insights: reply.insights.unwrap_or_else(default_insights),
            degraded: false,
        },
        Err(e) => {
            warn!("recommendations fetch failed, using fallback: {}", e);
            RecommendationsView {
                recommendations: fallback_recommendations(),
                insights: fallback_insights(),
                degraded: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotbuddy_api::mock::MockGateway;
    use plotbuddy_api::{ApiError, RecommendationReply};

    #[tokio::test]
    async fn test_load_profile_success() {
        let mock = MockGateway::new();
        let mut profile = fallback_profile();
        profile.subscription = "Monthly".to_string();
        mock.push_profile(profile);

        let view = load_profile(&mock).await;
        assert!(!view.degraded);
        assert_eq!(view.profile.subscription, "Monthly");
    }

    #[tokio::test]
    async fn test_load_profile_degrades_on_failure() {
        let mock = MockGateway::new();
        mock.fail_next_profile(ApiError::Status {
            status: 503,
            body: "down".to_string(),
        });

        let view = load_profile(&mock).await;
        assert!(view.degraded);
        assert_eq!(view.profile, fallback_profile());
    }

    #[tokio::test]
    async fn test_recommendations_fill_missing_fields() {
        let mock = MockGateway::new();
        mock.push_recommendations(RecommendationReply::default());

        let view = load_recommendations(&mock, &fallback_profile()).await;
        assert!(!view.degraded);
        assert_eq!(view.recommendations, default_recommendations());
        assert_eq!(view.insights, default_insights());
    }

    #[tokio::test]
    async fn test_recommendations_degrade_on_failure() {
        let mock = MockGateway::new();
        mock.fail_next_recommendations(MockGateway::connection_refused());

        let view = load_recommendations(&mock, &fallback_profile()).await;
        assert!(view.degraded);
        assert_eq!(view.recommendations, fallback_recommendations());
        assert_eq!(view.insights, fallback_insights());
    }

    #[tokio::test]
    async fn test_recommendations_request_carries_profile_genres() {
        let mock = MockGateway::new();
        mock.push_recommendations(RecommendationReply::default());

        let profile = fallback_profile();
        load_recommendations(&mock, &profile).await;

        match &mock.calls()[0] {
            plotbuddy_api::mock::CapturedCall::Recommendations { favorite_genres } => {
                assert_eq!(favorite_genres, &profile.favorite_genres);
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }
}
