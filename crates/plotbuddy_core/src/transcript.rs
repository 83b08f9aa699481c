//! The append-only chat transcript.
//!
//! Turns are immutable once created and the store only ever grows.
//! Everything lives in memory for the duration of the session; there is
//! no persistence layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Turn identifier: a millisecond timestamp, strictly increasing within
/// a transcript even when turns land in the same millisecond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TurnId(i64);

impl TurnId {
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat turn. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: TurnId,
    pub sender: Sender,
    pub text: String,
}

/// Ordered log of chat turns.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
    last_id: i64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatTurn {
        self.push(Sender::User, text.into())
    }

    /// Append a bot turn.
    pub fn push_bot(&mut self, text: impl Into<String>) -> &ChatTurn {
        self.push(Sender::Bot, text.into())
    }

    fn push(&mut self, sender: Sender, text: String) -> &ChatTurn {
        // Wall-clock id, bumped past the previous turn so ids stay
        // strictly increasing for same-millisecond appends.
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        self.turns.push(ChatTurn {
            id: TurnId(id),
            sender,
            text,
        });
        self.turns.last().expect("just pushed")
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
