//! Conversation and view controller.
//!
//! This module provides the main entry point for a client session,
//! coordinating the transcript, the agent gateway, and the redirect
//! interpreter. It owns the message history so a round-trip through the
//! story creator and back leaves the chat intact.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use plotbuddy_api::AgentGateway;

use crate::redirect::{PendingRedirect, RedirectKind, REDIRECT_CONFIRMATION};
use crate::transcript::Transcript;
use crate::view::View;

/// Bot turn appended when a chat request fails for any reason.
pub const CHAT_ERROR_TEXT: &str = "Sorry, there was an error processing your message.";

/// Bot turn appended when a reply carries no usable text.
pub const CHAT_FALLBACK_TEXT: &str = "Sorry, I couldn't process that.";

/// Prefix for a story forwarded into the chat on the way back from the
/// creator.
pub const STORY_FORWARD_PREFIX: &str = "Here's your generated story:\n\n";

/// Utterance used to fetch the opening greeting.
const GREETING_PROBE: &str = "hi";

/// What a send accomplished, for the driving view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutcome {
    /// False only for empty input, which is a complete no-op.
    pub sent: bool,
    /// Set when the reply armed a redirect.
    pub redirect: Option<RedirectKind>,
}

impl SendOutcome {
    fn noop() -> Self {
        Self {
            sent: false,
            redirect: None,
        }
    }
}

/// Session controller: one per client run.
///
/// All operations take `&mut self`, so at most one chat request is ever
/// in flight and replies land in send order; the input surface stays
/// borrowed (disabled) until the outstanding request resolves.
pub struct AppController {
    gateway: Arc<dyn AgentGateway>,
    session_id: String,
    transcript: Transcript,
    view: View,
    pending: Option<PendingRedirect>,
}

impl AppController {
    /// Create a controller starting on the chat view.
    pub fn new(gateway: Arc<dyn AgentGateway>) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        info!("starting session {}", session_id);
        Self {
            gateway,
            session_id,
            transcript: Transcript::new(),
            view: View::Chat,
            pending: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Fetch the opening greeting and append it as the first bot turn.
    /// Failures are silent; the session just starts without a greeting.
    pub async fn greet(&mut self) {
        if !self.transcript.is_empty() {
            return;
        }
        match self.gateway.chat(GREETING_PROBE).await {
            Ok(reply) => {
                if let Some(text) = reply.text() {
                    self.transcript.push_bot(text);
                }
            }
            Err(e) => debug!("greeting fetch failed: {}", e),
        }
    }

    /// Send a user utterance and reconcile the reply into the
    /// transcript.
    ///
    /// Guarantees:
    /// - empty/whitespace input: no turn appended, no network call;
    /// - otherwise the user turn is echoed before the request, and the
    ///   request produces exactly one bot turn whether it succeeds,
    ///   fails, or arms a redirect. Failures never propagate.
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::noop();
        }

        self.transcript.push_user(trimmed);

        match self.gateway.chat(trimmed).await {
            Ok(reply) => {
                if let Some(kind) = RedirectKind::detect(reply.control()) {
                    let text = reply.output.as_deref().unwrap_or(REDIRECT_CONFIRMATION);
                    self.transcript.push_bot(text);
                    self.arm_redirect(kind);
                    SendOutcome {
                        sent: true,
                        redirect: Some(kind),
                    }
                } else {
                    let text = reply.text().unwrap_or(CHAT_FALLBACK_TEXT);
                    self.transcript.push_bot(text);
                    SendOutcome {
                        sent: true,
                        redirect: None,
                    }
                }
            }
            Err(e) => {
                warn!("chat request failed: {}", e);
                self.transcript.push_bot(CHAT_ERROR_TEXT);
                SendOutcome {
                    sent: true,
                    redirect: None,
                }
            }
        }
    }

    fn arm_redirect(&mut self, kind: RedirectKind) {
        debug!("redirect armed: {:?} in {:?}", kind, kind.delay());
        self.pending = Some(PendingRedirect::arm(kind));
    }

    /// The armed redirect, if any.
    pub fn pending_redirect(&self) -> Option<&PendingRedirect> {
        self.pending.as_ref()
    }

    /// Deadline the driver should sleep until, if a redirect is armed.
    pub fn redirect_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline())
    }

    /// Whether an armed redirect has reached its deadline.
    pub fn redirect_due(&self) -> bool {
        self.pending.as_ref().map(|p| p.is_due()).unwrap_or(false)
    }

    /// Fire the armed redirect: switch to the story creator and return
    /// to the normal state. Returns false when nothing is armed (the
    /// timer was canceled by navigation or teardown), in which case the
    /// view is untouched.
    pub fn complete_redirect(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                info!("redirect firing ({:?})", pending.kind());
                self.view = View::StoryCreator;
                true
            }
            None => false,
        }
    }

    /// Disarm any pending redirect. Safe to call at any time, including
    /// on view teardown.
    pub fn cancel_redirect(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending redirect canceled");
        }
    }

    /// Explicit navigation. Always cancels a pending redirect first so a
    /// stale timer can never fire against the new view.
    pub fn navigate(&mut self, view: View) {
        self.cancel_redirect();
        self.view = view;
    }

    /// Return from the story creator. A generated story is forwarded as
    /// exactly one new bot turn before the switch; without one, only
    /// the view changes.
    pub fn back_to_chat(&mut self, story: Option<&str>) {
        if let Some(story) = story {
            self.transcript
                .push_bot(format!("{}{}", STORY_FORWARD_PREFIX, story));
        }
        self.navigate(View::Chat);
    }
}
