//! Random story command - "Surprise Me!" generation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use plotbuddy_api::{AgentGateway, ApiClient, ApiConfig};
use plotbuddy_core::{
    display_name, generate_random_story, is_success_story, GENRES, LENGTHS, MOODS,
};

use super::story::save_story;

#[derive(Args)]
pub struct RandomStoryArgs {
    /// Also write the story to this file
    #[arg(long)]
    save: Option<PathBuf>,
}

pub async fn execute(args: RandomStoryArgs, config: ApiConfig) -> Result<()> {
    let gateway = ApiClient::new(config).context("failed to build API client")?;

    println!("🎲 Generating a random story...");
    println!();

    let story = run_random_story(&gateway).await;

    if let (Some(story), Some(path)) = (story, args.save.as_ref()) {
        save_story(&story, path)?;
    }
    Ok(())
}

/// Request, print, and return the random story if one was produced.
/// Shared with the interactive session's random-story view.
pub(crate) async fn run_random_story(gateway: &dyn AgentGateway) -> Option<String> {
    let outcome = generate_random_story(gateway).await;

    if let Some(error) = &outcome.error {
        println!("⚠️  Error: {}", error);
        println!();
    }

    let story = outcome.story?;

    if is_success_story(&story) {
        println!("✨ Your Random Story");
        if let Some(parameters) = &outcome.parameters {
            println!(
                "   Genre: {} | Mood: {} | Length: {}",
                display_name(parameters.genre.as_deref().unwrap_or(""), GENRES),
                display_name(parameters.mood.as_deref().unwrap_or(""), MOODS),
                display_name(parameters.length.as_deref().unwrap_or(""), LENGTHS),
            );
        }
        println!();
    }
    println!("{}", story);
    println!();

    Some(story)
}
