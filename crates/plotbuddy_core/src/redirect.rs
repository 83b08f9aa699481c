//! Redirect interpreter.
//!
//! The chat backend steers the user into the story creator by putting a
//! sentinel value in the reply's `message` field. The interpreter
//! recognizes exactly two sentinels and schedules a delayed view switch
//! so the accompanying text stays readable before the transition. Any
//! other `message` value is ordinary text and never triggers a switch.

use tokio::time::{Duration, Instant};

/// Sentinel: the backend suggests moving to the story creator.
pub const REDIRECT_TO_STORY_CREATOR: &str = "REDIRECT_TO_STORY_CREATOR";

/// Sentinel: the backend insists on the story creator.
pub const REDIRECT_TO_STORY_CREATOR_FORCE: &str = "REDIRECT_TO_STORY_CREATOR_FORCE";

/// Confirmation shown when a redirect reply carries no text of its own.
pub const REDIRECT_CONFIRMATION: &str = "Great! Let's create your story.";

/// Delay before a forced redirect fires.
pub const FORCED_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Delay before a soft redirect fires, long enough to read the bot's
/// text first.
pub const SOFT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// The two recognized redirect flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Soft,
    Forced,
}

impl RedirectKind {
    /// Match a reply's control message against the sentinels.
    /// Comparison is exact and case-sensitive; the sentinel strings are
    /// wire protocol and must not drift.
    pub fn detect(control: Option<&str>) -> Option<Self> {
        match control? {
            REDIRECT_TO_STORY_CREATOR => Some(Self::Soft),
            REDIRECT_TO_STORY_CREATOR_FORCE => Some(Self::Forced),
            _ => None,
        }
    }

    pub fn delay(self) -> Duration {
        match self {
            Self::Soft => SOFT_REDIRECT_DELAY,
            Self::Forced => FORCED_REDIRECT_DELAY,
        }
    }
}

/// An armed, not-yet-fired redirect.
///
/// Owning the deadline (rather than a detached timer task) keeps the
/// transition cancelable: dropping the pending state on navigation or
/// teardown means the switch can never fire against a torn-down view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRedirect {
    kind: RedirectKind,
    armed_at: Instant,
    deadline: Instant,
}

impl PendingRedirect {
    pub fn arm(kind: RedirectKind) -> Self {
        let armed_at = Instant::now();
        Self {
            kind,
            armed_at,
            deadline: armed_at + kind.delay(),
        }
    }

    pub fn kind(&self) -> RedirectKind {
        self.kind
    }

    pub fn armed_at(&self) -> Instant {
        self.armed_at
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_both_sentinels() {
        assert_eq!(
            RedirectKind::detect(Some("REDIRECT_TO_STORY_CREATOR")),
            Some(RedirectKind::Soft)
        );
        assert_eq!(
            RedirectKind::detect(Some("REDIRECT_TO_STORY_CREATOR_FORCE")),
            Some(RedirectKind::Forced)
        );
    }

    #[test]
    fn test_other_values_are_ordinary_text() {
        assert_eq!(RedirectKind::detect(None), None);
        assert_eq!(RedirectKind::detect(Some("")), None);
        assert_eq!(RedirectKind::detect(Some("hello")), None);
        // Case-sensitive, exact match only.
        assert_eq!(RedirectKind::detect(Some("redirect_to_story_creator")), None);
        assert_eq!(
            RedirectKind::detect(Some("REDIRECT_TO_STORY_CREATOR_NOW")),
            None
        );
        assert_eq!(
            RedirectKind::detect(Some(" REDIRECT_TO_STORY_CREATOR")),
            None
        );
    }

    #[test]
    fn test_delays() {
        assert_eq!(RedirectKind::Forced.delay(), Duration::from_millis(500));
        let soft = RedirectKind::Soft.delay();
        assert!(soft >= Duration::from_millis(1000) && soft <= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_redirect_becomes_due_at_deadline() {
        let pending = PendingRedirect::arm(RedirectKind::Forced);
        assert!(!pending.is_due());

        tokio::time::advance(Duration::from_millis(499)).await;
        assert!(!pending.is_due());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(pending.is_due());
    }
}
