//! Chat command - the interactive session.
//!
//! Runs the conversation loop against the session controller. The
//! prompt waits on two things at once: the next input line and, when a
//! redirect is armed, its deadline. Whichever wins drives the next
//! state; a fired redirect drops the session into the story-creator
//! flow exactly like the backend asked.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::Instant;
use tracing::warn;

use plotbuddy_api::{AgentGateway, ApiClient, ApiConfig};
use plotbuddy_core::{
    display_name, generate_story, is_success_story, AppController, Choice, CoreError, Sender,
    StoryConfig, View, GENRES, LENGTHS, MOODS, STORY_CREATE_ERROR_TEXT,
};

use super::profile::show_profile_page;
use super::random_story::run_random_story;
use super::story::{save_story, story_filename};

type InputLines = Lines<BufReader<Stdin>>;

pub async fn execute(config: ApiConfig) -> Result<()> {
    let gateway: Arc<dyn AgentGateway> =
        Arc::new(ApiClient::new(config).context("failed to build API client")?);
    let mut controller = AppController::new(Arc::clone(&gateway));

    print_banner();
    controller.greet().await;
    let mut printed = print_new_bot_turns(&controller, 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match controller.view() {
            View::Chat => {
                if !chat_turn(&mut controller, &mut lines, &mut printed).await? {
                    break;
                }
            }
            View::StoryCreator => {
                let story = run_story_creator(gateway.as_ref(), &mut lines).await?;
                controller.back_to_chat(story.as_deref());
                printed = print_new_bot_turns(&controller, printed);
            }
            View::RandomStory => {
                let _ = run_random_story(gateway.as_ref()).await;
                controller.navigate(View::Chat);
            }
            View::Profile => {
                show_profile_page(gateway.as_ref()).await;
                controller.navigate(View::Chat);
            }
            View::NotFound => {
                println!("Page Not Found - the page you requested does not exist.");
                controller.navigate(View::Chat);
            }
        }
    }

    println!("Goodbye! 👋");
    Ok(())
}

/// One iteration of the chat view. Returns false when the session
/// should end (quit command or closed stdin).
async fn chat_turn(
    controller: &mut AppController,
    lines: &mut InputLines,
    printed: &mut usize,
) -> Result<bool> {
    prompt("you> ")?;
    let deadline = controller.redirect_deadline();

    tokio::select! {
        maybe_line = lines.next_line() => {
            let line = match maybe_line? {
                Some(line) => line,
                None => return Ok(false),
            };
            let input = line.trim();
            if input.is_empty() {
                return Ok(true);
            }
            if input.starts_with('/') {
                return Ok(handle_route(controller, input));
            }

            controller.send_message(input).await;
            *printed = print_new_bot_turns(controller, *printed);
            Ok(true)
        }
        _ = sleep_or_pending(deadline) => {
            // Deadline reached while the user was idle at the prompt.
            println!();
            if controller.complete_redirect() {
                println!("➡️  Taking you to the Story Creator...");
                println!();
            }
            Ok(true)
        }
    }
}

/// Explicit navigation through the route table; the same paths the web
/// client used. Returns false on quit.
fn handle_route(controller: &mut AppController, input: &str) -> bool {
    match input {
        "/quit" | "/exit" | "/q" => false,
        "/help" | "/?" => {
            print_help();
            true
        }
        route => {
            controller.navigate(View::from_route(route));
            true
        }
    }
}

async fn sleep_or_pending(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Print bot turns appended since the last call; the user's own turns
/// are already on screen as typed input.
fn print_new_bot_turns(controller: &AppController, from: usize) -> usize {
    let turns = controller.transcript().turns();
    for turn in &turns[from..] {
        if turn.sender == Sender::Bot {
            println!("PlotBuddy> {}", turn.text);
        }
    }
    turns.len()
}

fn prompt(text: &str) -> Result<()> {
    use std::io::Write;
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}

fn print_banner() {
    println!("🚀 Welcome to PlotBuddy - AI Writing Assistant!");
    println!();
    println!("Here's how I can help you today:");
    println!("  Type `help` to see what I can do for you.");
    println!("  Ask `what genres` are available to get inspired.");
    println!("  To start a story, tell me `create story` or `write a story`.");
    println!("  Ask `what are your prices` or `subscription plans`.");
    println!();
    println!("Navigation: /create, /random-story, /profile, /help, /quit");
    println!();
}

fn print_help() {
    println!("Navigation:");
    println!("  /create        Story creator");
    println!("  /random-story  Random story generator");
    println!("  /profile       Profile and AI recommendations");
    println!("  /              Back to chat");
    println!("  /quit          Leave the session");
    println!("Anything else you type is sent to PlotBuddy.");
}

/// The story-creator view: pick genre/mood/length, generate, optionally
/// save. Returns the story for forwarding into the chat, or None when
/// the user backed out or generation failed.
async fn run_story_creator(
    gateway: &dyn AgentGateway,
    lines: &mut InputLines,
) -> Result<Option<String>> {
    println!();
    println!("📝 Story Creator");
    println!("Choose your story settings below and let the magic happen!");
    println!("(Empty input goes back to chat.)");
    println!();

    let genre = match prompt_choice(lines, "Genre", GENRES).await? {
        Some(genre) => genre,
        None => return Ok(None),
    };
    let mood = match prompt_choice(lines, "Mood", MOODS).await? {
        Some(mood) => mood,
        None => return Ok(None),
    };
    let length = match prompt_choice(lines, "Length", LENGTHS).await? {
        Some(length) => length,
        None => return Ok(None),
    };

    let config = StoryConfig::new(&genre, &mood, &length);
    println!();
    println!("📖 Story Preview");
    println!("   Genre:  {}", display_name(&genre, GENRES));
    println!("   Mood:   {}", display_name(&mood, MOODS));
    println!("   Length: {}", display_name(&length, LENGTHS));
    println!();
    println!("⏳ Creating story...");

    match generate_story(gateway, &config).await {
        Ok(story) => {
            println!();
            println!("✅ Generated Story");
            println!();
            println!("{}", story);
            println!();

            if is_success_story(&story) && prompt_yes_no(lines, "Save story to a file?").await? {
                let filename = story_filename(&config);
                if let Err(e) = save_story(&story, Path::new(&filename)) {
                    println!("⚠️  {}", e);
                }
            }
            Ok(Some(story))
        }
        Err(CoreError::StoryRejected(message)) => {
            println!();
            println!("❌ Story Generation Failed");
            println!("{}", message);
            Ok(None)
        }
        Err(e) => {
            warn!("story creation failed: {}", e);
            println!();
            println!("❌ {}", STORY_CREATE_ERROR_TEXT);
            Ok(None)
        }
    }
}

async fn prompt_choice(
    lines: &mut InputLines,
    name: &str,
    options: &'static [Choice],
) -> Result<Option<String>> {
    println!("{}:", name);
    for (index, choice) in options.iter().enumerate() {
        println!("  {:2}. {}", index + 1, choice.label);
    }

    loop {
        prompt(&format!("Select a {} (number or name): ", name.to_lowercase()))?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => return Ok(None),
        };
        let input = line.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if let Ok(index) = input.parse::<usize>() {
            if (1..=options.len()).contains(&index) {
                return Ok(Some(options[index - 1].value.to_string()));
            }
        }
        let lower = input.to_lowercase();
        if let Some(choice) = options.iter().find(|c| c.value == lower) {
            return Ok(Some(choice.value.to_string()));
        }

        println!("  '{}' is not a valid {}.", input, name.to_lowercase());
    }
}

async fn prompt_yes_no(lines: &mut InputLines, question: &str) -> Result<bool> {
    prompt(&format!("{} [y/N]: ", question))?;
    let line = lines.next_line().await?;
    Ok(matches!(
        line.as_deref().map(str::trim),
        Some("y") | Some("Y") | Some("yes")
    ))
}
