//! Integration tests for the session controller: turn pairing, the
//! redirect protocol, and history survival across view switches.

use std::sync::Arc;

use tokio::time::{advance, Duration};

use plotbuddy_api::mock::{CapturedCall, MockGateway};
use plotbuddy_api::ChatReply;
use plotbuddy_core::{
    AppController, Sender, View, CHAT_ERROR_TEXT, CHAT_FALLBACK_TEXT, REDIRECT_CONFIRMATION,
    REDIRECT_TO_STORY_CREATOR, REDIRECT_TO_STORY_CREATOR_FORCE, STORY_FORWARD_PREFIX,
};

fn controller_with_mock() -> (Arc<MockGateway>, AppController) {
    let mock = Arc::new(MockGateway::new());
    let controller = AppController::new(mock.clone());
    (mock, controller)
}

#[tokio::test]
async fn test_send_appends_user_then_bot_with_increasing_ids() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_text("Hello! How can I help?");

    let outcome = controller.send_message("hi there").await;
    assert!(outcome.sent);
    assert!(outcome.redirect.is_none());

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].sender, Sender::User);
    assert_eq!(turns[0].text, "hi there");
    assert_eq!(turns[1].sender, Sender::Bot);
    assert_eq!(turns[1].text, "Hello! How can I help?");
    assert!(turns[0].id < turns[1].id);
}

#[tokio::test]
async fn test_empty_input_is_a_complete_noop() {
    let (mock, mut controller) = controller_with_mock();

    for input in ["", "   ", "\t\n"] {
        let outcome = controller.send_message(input).await;
        assert!(!outcome.sent);
    }

    assert!(controller.transcript().is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_input_is_trimmed_before_sending() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_text("ok");

    controller.send_message("  tell me a story  ").await;

    assert_eq!(
        mock.calls(),
        vec![CapturedCall::Chat {
            input: "tell me a story".to_string()
        }]
    );
    assert_eq!(controller.transcript().turns()[0].text, "tell me a story");
}

#[tokio::test]
async fn test_reply_text_fallback_chain() {
    let (mock, mut controller) = controller_with_mock();
    // Non-sentinel message value doubles as display text.
    mock.push_chat_control(None, "plain fallback text");
    mock.push_chat_reply(ChatReply::default());

    controller.send_message("one").await;
    controller.send_message("two").await;

    let turns = controller.transcript().turns();
    assert_eq!(turns[1].text, "plain fallback text");
    assert_eq!(turns[3].text, CHAT_FALLBACK_TEXT);
}

#[tokio::test]
async fn test_failure_appends_one_error_turn_and_reenables_input() {
    let (mock, mut controller) = controller_with_mock();
    mock.fail_next_chat(MockGateway::connection_refused());
    mock.push_chat_text("recovered");

    let outcome = controller.send_message("hello?").await;
    assert!(outcome.sent);

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].sender, Sender::Bot);
    assert_eq!(turns[1].text, CHAT_ERROR_TEXT);

    // Input is usable again: the next send goes through normally.
    controller.send_message("retry").await;
    assert_eq!(controller.transcript().len(), 4);
    assert_eq!(controller.transcript().last().unwrap().text, "recovered");
}

#[tokio::test(start_paused = true)]
async fn test_forced_redirect_fires_at_500ms_not_before() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_control(Some("Let's go!"), REDIRECT_TO_STORY_CREATOR_FORCE);

    let outcome = controller.send_message("create story").await;
    assert_eq!(
        outcome.redirect,
        Some(plotbuddy_core::RedirectKind::Forced)
    );

    // Bot text is already visible, view hasn't moved yet.
    assert_eq!(controller.transcript().last().unwrap().text, "Let's go!");
    assert_eq!(controller.view(), View::Chat);

    advance(Duration::from_millis(499)).await;
    assert!(!controller.redirect_due());
    assert_eq!(controller.view(), View::Chat);

    advance(Duration::from_millis(1)).await;
    assert!(controller.redirect_due());
    assert!(controller.complete_redirect());
    assert_eq!(controller.view(), View::StoryCreator);
}

#[tokio::test(start_paused = true)]
async fn test_soft_redirect_fires_within_window() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_control(None, REDIRECT_TO_STORY_CREATOR);

    controller.send_message("story").await;

    // Without reply text the confirmation line stands in.
    assert_eq!(
        controller.transcript().last().unwrap().text,
        REDIRECT_CONFIRMATION
    );

    advance(Duration::from_millis(999)).await;
    assert!(!controller.redirect_due(), "fired before the 1s window");

    advance(Duration::from_millis(1001)).await;
    assert!(controller.redirect_due(), "not due by the 2s window");
    controller.complete_redirect();
    assert_eq!(controller.view(), View::StoryCreator);
}

#[tokio::test(start_paused = true)]
async fn test_non_sentinel_message_never_redirects() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_control(Some("Here's an idea"), "SOME_OTHER_FLAG");

    let outcome = controller.send_message("hm").await;
    assert!(outcome.redirect.is_none());
    assert!(controller.pending_redirect().is_none());

    advance(Duration::from_secs(60)).await;
    assert!(!controller.redirect_due());
    assert!(!controller.complete_redirect());
    assert_eq!(controller.view(), View::Chat);
}

#[tokio::test(start_paused = true)]
async fn test_navigation_cancels_pending_redirect() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_control(None, REDIRECT_TO_STORY_CREATOR);

    controller.send_message("story").await;
    assert!(controller.pending_redirect().is_some());

    // User walks away before the timer elapses.
    controller.navigate(View::Profile);
    assert!(controller.pending_redirect().is_none());

    // The old deadline passing must not move the view.
    advance(Duration::from_secs(5)).await;
    assert!(!controller.redirect_due());
    assert!(!controller.complete_redirect());
    assert_eq!(controller.view(), View::Profile);
}

#[tokio::test]
async fn test_back_to_chat_forwards_story_once() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_text("hello");
    controller.send_message("hi").await;
    let before: Vec<_> = controller.transcript().turns().to_vec();

    controller.navigate(View::StoryCreator);
    controller.back_to_chat(Some("Once upon a time..."));

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), before.len() + 1);
    assert_eq!(&turns[..before.len()], &before[..]);

    let forwarded = turns.last().unwrap();
    assert_eq!(forwarded.sender, Sender::Bot);
    assert_eq!(
        forwarded.text,
        format!("{}Once upon a time...", STORY_FORWARD_PREFIX)
    );
    assert_eq!(controller.view(), View::Chat);
}

#[tokio::test]
async fn test_back_to_chat_without_story_only_switches() {
    let (_mock, mut controller) = controller_with_mock();
    controller.navigate(View::StoryCreator);
    controller.back_to_chat(None);

    assert!(controller.transcript().is_empty());
    assert_eq!(controller.view(), View::Chat);
}

#[tokio::test]
async fn test_history_survives_view_round_trip() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_text("first reply");
    controller.send_message("first").await;

    controller.navigate(View::StoryCreator);
    controller.navigate(View::RandomStory);
    controller.navigate(View::Chat);

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].text, "first");
    assert_eq!(turns[1].text, "first reply");
}

#[tokio::test]
async fn test_greeting_appends_single_bot_turn() {
    let (mock, mut controller) = controller_with_mock();
    mock.push_chat_text("Hi, I'm PlotBuddy!");

    controller.greet().await;

    let turns = controller.transcript().turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].sender, Sender::Bot);

    // A second greet on a non-empty transcript is a no-op.
    controller.greet().await;
    assert_eq!(controller.transcript().len(), 1);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_greeting_failure_is_silent() {
    let (mock, mut controller) = controller_with_mock();
    mock.fail_next_chat(MockGateway::connection_refused());

    controller.greet().await;
    assert!(controller.transcript().is_empty());
}
