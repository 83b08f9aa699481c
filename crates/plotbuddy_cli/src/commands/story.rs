//! Story command - Create a story from explicit parameters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use plotbuddy_api::{ApiClient, ApiConfig};
use plotbuddy_core::{
    display_name, generate_story, is_success_story, Choice, CoreError, StoryConfig, GENRES,
    LENGTHS, MOODS, STORY_CREATE_ERROR_TEXT,
};

#[derive(Args)]
pub struct StoryArgs {
    /// Story genre (e.g. mystery, scifi, fantasy)
    #[arg(short, long)]
    genre: String,

    /// Story mood (e.g. dark, whimsical, suspenseful)
    #[arg(short, long)]
    mood: String,

    /// Story length (micro, short, medium, long)
    #[arg(short, long)]
    length: String,

    /// Also write the story to this file
    #[arg(long)]
    save: Option<PathBuf>,
}

pub async fn execute(args: StoryArgs, config: ApiConfig) -> Result<()> {
    let gateway = ApiClient::new(config).context("failed to build API client")?;
    let story_config = StoryConfig::new(&args.genre, &args.mood, &args.length);

    info!(
        "Creating {} {} story ({})",
        args.mood, args.genre, args.length
    );

    match generate_story(&gateway, &story_config).await {
        Ok(story) => {
            println!("📖 Story Preview");
            println!("   Genre:  {}", display_name(&args.genre, GENRES));
            println!("   Mood:   {}", display_name(&args.mood, MOODS));
            println!("   Length: {}", display_name(&args.length, LENGTHS));
            println!();
            println!("✨ Here's your generated story:");
            println!();
            println!("{}", story);

            if let Some(path) = args.save {
                save_story(&story, &path)?;
            }
            Ok(())
        }
        Err(CoreError::UnknownOption { kind, value }) => {
            print_catalog(kind);
            anyhow::bail!("Unknown {}: {}", kind, value);
        }
        Err(CoreError::StoryRejected(message)) => {
            println!("❌ Story Generation Failed");
            anyhow::bail!("{}", message);
        }
        Err(e) => {
            println!("❌ {}", STORY_CREATE_ERROR_TEXT);
            Err(e.into())
        }
    }
}

fn print_catalog(kind: &str) {
    let options: &[Choice] = match kind {
        "genre" => GENRES,
        "mood" => MOODS,
        _ => LENGTHS,
    };
    println!("Available {} options:", kind);
    for choice in options {
        println!("   - {}", choice.label);
    }
}

/// Write a story to disk, refusing error text masquerading as a story.
pub(crate) fn save_story(story: &str, path: &Path) -> Result<()> {
    if !is_success_story(story) {
        anyhow::bail!("No valid story to save");
    }
    std::fs::write(path, story)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("💾 Story saved to {}", path.display());
    Ok(())
}

/// Filename for a saved story, in the same shape the web client used
/// for downloads: sanitized genre_mood_length.txt.
pub(crate) fn story_filename(config: &StoryConfig) -> String {
    format!(
        "{}_{}_{}.txt",
        sanitize_filename(config.genre.as_deref().unwrap_or("")),
        sanitize_filename(config.mood.as_deref().unwrap_or("")),
        sanitize_filename(config.length.as_deref().unwrap_or("")),
    )
}

fn sanitize_filename(value: &str) -> String {
    if value.is_empty() {
        return "untitled".to_string();
    }
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Sci-Fi"), "sci-fi");
        assert_eq!(sanitize_filename("wild west!"), "wild_west_");
        assert_eq!(sanitize_filename(""), "untitled");
    }

    #[test]
    fn test_story_filename() {
        let config = StoryConfig::new("mystery", "dark", "short");
        assert_eq!(story_filename(&config), "mystery_dark_short.txt");

        let empty = StoryConfig::default();
        assert_eq!(story_filename(&empty), "untitled_untitled_untitled.txt");
    }

    #[test]
    fn test_save_story_rejects_error_text() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("story.txt");
        assert!(save_story("Sorry, something broke", &path).is_err());
        assert!(!path.exists());

        save_story("A real story.", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A real story.");
    }
}
