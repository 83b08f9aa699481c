//! CLI command definitions.
//!
//! This module defines the command structure for the PlotBuddy CLI.
//! Each subcommand maps to one of the client's top-level views; `chat`
//! is the interactive session that can reach all of them.

use clap::{Parser, Subcommand};

use plotbuddy_api::ApiConfig;

pub mod chat;
pub mod profile;
pub mod random_story;
pub mod story;

/// PlotBuddy - AI story-writing assistant
#[derive(Parser)]
#[command(name = "plotbuddy")]
#[command(version, about = "PlotBuddy - AI story-writing assistant client")]
#[command(long_about = r#"
PlotBuddy is a terminal client for the PlotBuddy story service: chat with
the writing assistant, create configured stories, roll random ones, and
review your profile with AI recommendations.

COMMANDS:
  chat          → Interactive chat session (story creator reachable in-session)
  story         → Create a story from explicit genre/mood/length
  random-story  → Generate a story with random parameters
  profile       → Show profile, AI recommendations and writing insights

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Backend/API error

The backend defaults to http://localhost:8000; override with --api-url
or PLOTBUDDY_API_URL, or a .plotbuddy/settings.json file.
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL (overrides settings and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// User identifier sent with every request
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Create a story from explicit parameters
    Story(story::StoryArgs),

    /// Generate a completely random story
    #[command(name = "random-story")]
    RandomStory(random_story::RandomStoryArgs),

    /// Show profile, AI recommendations and writing insights
    Profile(profile::ProfileArgs),
}

/// Effective gateway configuration: settings file, environment, then
/// command-line flags, in increasing precedence.
pub fn resolve_config(cli: &Cli) -> ApiConfig {
    let mut config = ApiConfig::resolve(".");
    if let Some(url) = &cli.api_url {
        config = config.base_url(url);
    }
    if let Some(user) = &cli.user {
        config = config.user_id(user);
    }
    config
}
