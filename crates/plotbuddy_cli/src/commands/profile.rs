//! Profile command - profile, AI recommendations and writing insights.

use anyhow::{Context, Result};
use clap::Args;

use plotbuddy_api::{AgentGateway, ApiClient, ApiConfig, Profile, Recommendation, WritingInsights};
use plotbuddy_core::{fresh_ideas, load_profile, load_recommendations};

#[derive(Args)]
pub struct ProfileArgs {
    /// Also show a fresh set of locally generated story ideas
    #[arg(long)]
    ideas: bool,
}

pub async fn execute(args: ProfileArgs, config: ApiConfig) -> Result<()> {
    let gateway = ApiClient::new(config).context("failed to build API client")?;

    show_profile_page(&gateway).await;

    if args.ideas {
        println!("💡 Fresh Story Ideas");
        print_recommendations(&fresh_ideas());
    }
    Ok(())
}

/// Load and print the full profile page. Shared with the interactive
/// session's profile view; degrades to default content on failure.
pub(crate) async fn show_profile_page(gateway: &dyn AgentGateway) {
    println!("👤 My Profile");
    println!();

    let view = load_profile(gateway).await;
    if view.degraded {
        println!("⚠️  Could not reach the profile service.");
        println!("   Using default profile data instead.");
        println!();
    }
    print_profile(&view.profile);

    println!("🤖 AI Story Recommendations");
    let recs = load_recommendations(gateway, &view.profile).await;
    if recs.degraded {
        println!("   (AI service offline; showing defaults)");
    }
    print_recommendations(&recs.recommendations);

    println!("📊 AI Writing Insights");
    print_insights(&recs.insights);
}

fn print_profile(profile: &Profile) {
    println!("   Name:              {}", profile.name.as_deref().unwrap_or("Writer123"));
    println!("   Subscription:      {}", profile.subscription);
    println!("   Stories Remaining: {}", profile.stories_remaining);
    println!("   Stories Created:   {}", profile.created_stories);
    println!("   Member Since:      {}", profile.member_since);
    if !profile.favorite_genres.is_empty() {
        println!("   Favorite Genres:   {}", profile.favorite_genres.join(", "));
    }
    if !profile.recent_stories.is_empty() {
        println!("   Recent Stories:");
        for story in &profile.recent_stories {
            println!("      - {} ({}, {})", story.title, story.genre, story.created);
        }
    }
    println!();
}

fn print_recommendations(recommendations: &[Recommendation]) {
    for rec in recommendations {
        println!("   [{}]", rec.genre);
        println!("   {}", rec.concept);
        println!();
    }
}

fn print_insights(insights: &WritingInsights) {
    println!("   Your Writing Style");
    println!("   {}", insights.writing_style);
    if !insights.strengths.is_empty() {
        println!("   Strengths:");
        for strength in &insights.strengths {
            println!("      - {}", strength);
        }
    }
    if !insights.areas_for_growth.is_empty() {
        println!("   Areas for Growth:");
        for area in &insights.areas_for_growth {
            println!("      - {}", area);
        }
    }
    println!();
}
