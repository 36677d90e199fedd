//! Sentinel-marker classification of genie replies.
//!
//! The backend signals outcomes in free text, so detection is inherently
//! fragile. It is isolated behind [`ReplyClassifier`] so the marker rules can
//! be swapped or tested without touching transport or session code.

/// How a single genie reply is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyJudgment {
    /// The reply rejected the wish; it does not consume a wish.
    Invalid,
    /// The reply ends the game in victory.
    Win,
    /// An ordinary granted wish.
    Granted,
}

/// Classifies a trimmed reply into a [`ReplyJudgment`].
pub trait ReplyClassifier: Send + Sync {
    fn classify(&self, reply: &str) -> ReplyJudgment;
}

/// Default classifier: two literal sentinel markers.
///
/// The invalid check runs first. A reply carrying both markers is judged
/// `Invalid`, never `Win`. Winning requires the marker at the very end of
/// the trimmed reply, case-sensitive.
pub struct SentinelClassifier {
    invalid_marker: String,
    win_marker: String,
}

impl SentinelClassifier {
    pub fn new(invalid_marker: &str, win_marker: &str) -> Self {
        Self {
            // Matched case-insensitively against the uppercased reply.
            invalid_marker: invalid_marker.to_uppercase(),
            win_marker: win_marker.to_string(),
        }
    }
}

impl Default for SentinelClassifier {
    fn default() -> Self {
        Self::new("INVALID WISH", "[YOU WIN]")
    }
}

impl ReplyClassifier for SentinelClassifier {
    fn classify(&self, reply: &str) -> ReplyJudgment {
        if reply.to_uppercase().contains(&self.invalid_marker) {
            return ReplyJudgment::Invalid;
        }
        if reply.trim_end().ends_with(&self.win_marker) {
            return ReplyJudgment::Win;
        }
        ReplyJudgment::Granted
    }
}
