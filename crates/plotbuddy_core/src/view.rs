//! Top-level view states.
//!
//! Exactly one view is active at a time. Switching is either an
//! explicit user action or the redirect interpreter firing; the route
//! table mirrors the web client's paths so navigation input stays
//! uniform across front ends.

use serde::{Deserialize, Serialize};

/// The mutually exclusive top-level modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Chat,
    StoryCreator,
    RandomStory,
    Profile,
    NotFound,
}

impl View {
    /// Parse a route path. Unknown routes land on the catch-all.
    pub fn from_route(route: &str) -> Self {
        match route.trim_end_matches('/') {
            "" => Self::Chat,
            "/create" => Self::StoryCreator,
            "/random-story" => Self::RandomStory,
            "/profile" => Self::Profile,
            _ => Self::NotFound,
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Self::Chat => "/",
            Self::StoryCreator => "/create",
            Self::RandomStory => "/random-story",
            Self::Profile => "/profile",
            Self::NotFound => "*",
        }
    }

    /// Heading shown when the view becomes active.
    pub fn title(self) -> &'static str {
        match self {
            Self::Chat => "PlotBuddy - AI Writing Assistant",
            Self::StoryCreator => "Story Creator",
            Self::RandomStory => "Random Story Generator",
            Self::Profile => "My Profile",
            Self::NotFound => "Page Not Found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        assert_eq!(View::from_route("/"), View::Chat);
        assert_eq!(View::from_route("/create"), View::StoryCreator);
        assert_eq!(View::from_route("/random-story"), View::RandomStory);
        assert_eq!(View::from_route("/profile"), View::Profile);
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        assert_eq!(View::from_route("/create/"), View::StoryCreator);
    }

    #[test]
    fn test_unknown_routes_hit_catch_all() {
        assert_eq!(View::from_route("/nope"), View::NotFound);
        assert_eq!(View::from_route("/create/extra"), View::NotFound);
    }
}
