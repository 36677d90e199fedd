//! The per-session wish game state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::ReplyJudgment;

/// Hard server-side cap on granted wishes per session.
pub const MAX_WISHES: u8 = 3;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Wishes remain and the game has not been won.
    Active,
    /// All three wishes are used up.
    Spent,
    /// A winning wish ended the game.
    Won,
}

/// Outcome of a single wish turn, as reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WishOutcome {
    /// Wish granted; wishes remain.
    Ok,
    /// The genie rejected the wish; no wish was consumed.
    Invalid,
    /// The wish resolved the scenario's problem.
    Win,
    /// The wish was granted and it was the last one.
    Spent,
}

/// One user's game: the chosen scenario, the growing transcript, and the
/// bounded wish counter.
///
/// The transcript is the full authoritative conversation state. It is seeded
/// with the rendered persona prompt and only ever appended to; the LLM
/// backend is stateless between calls and receives the whole transcript on
/// every turn.
#[derive(Debug, Clone)]
pub struct WishSession {
    scenario: String,
    transcript: String,
    wish_count: u8,
    status: SessionStatus,
    created_at: DateTime<Utc>,
}

impl WishSession {
    /// Start a fresh session around a scenario and its rendered persona
    /// prompt.
    pub fn new(
        scenario: impl Into<String>,
        persona_prompt: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut transcript = String::from(persona_prompt);
        transcript.push_str("\n\n");
        Self {
            scenario: scenario.into(),
            transcript,
            wish_count: 0,
            status: SessionStatus::Active,
            created_at: now,
        }
    }

    /// Append the user's turn to the transcript, leaving the cursor at the
    /// genie's turn.
    ///
    /// This commits before the backend is called and is not rolled back if
    /// that call fails: the user's turn stays recorded even when no reply
    /// was produced.
    pub fn record_wish(&mut self, wish: &str) {
        self.transcript.push_str("User: ");
        self.transcript.push_str(wish);
        self.transcript.push_str("\nJini: ");
    }

    /// Append the genie's reply and advance the state machine.
    ///
    /// The reply is appended regardless of judgment. An `Invalid` judgment
    /// leaves the counter untouched; `Win` ends the game without consuming
    /// a wish; a granted wish increments the counter and spends the session
    /// once it reaches [`MAX_WISHES`].
    pub fn apply_reply(&mut self, reply: &str, judgment: ReplyJudgment) -> WishOutcome {
        self.transcript.push_str(reply);
        self.transcript.push_str("\n\n");

        match judgment {
            ReplyJudgment::Invalid => WishOutcome::Invalid,
            ReplyJudgment::Win => {
                self.status = SessionStatus::Won;
                WishOutcome::Win
            }
            ReplyJudgment::Granted => {
                self.wish_count += 1;
                if self.wish_count >= MAX_WISHES {
                    self.status = SessionStatus::Spent;
                    WishOutcome::Spent
                } else {
                    WishOutcome::Ok
                }
            }
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn wish_count(&self) -> u8 {
        self.wish_count
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_spent(&self) -> bool {
        self.status == SessionStatus::Spent
    }

    pub fn is_won(&self) -> bool {
        self.status == SessionStatus::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_session() -> WishSession {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        WishSession::new("A sealed library is on fire.", "You are Jini.", now)
    }

    #[test]
    fn new_session_seeds_transcript_with_prompt() {
        let session = test_session();
        assert_eq!(session.transcript(), "You are Jini.\n\n");
        assert_eq!(session.wish_count(), 0);
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn record_wish_appends_user_turn() {
        let mut session = test_session();
        session.record_wish("I wish for gold");
        assert_eq!(
            session.transcript(),
            "You are Jini.\n\nUser: I wish for gold\nJini: "
        );
    }

    #[test]
    fn granted_wish_increments_count() {
        let mut session = test_session();
        session.record_wish("I wish for gold");
        let outcome = session.apply_reply("You get gold, cursed!", ReplyJudgment::Granted);
        assert_eq!(outcome, WishOutcome::Ok);
        assert_eq!(session.wish_count(), 1);
        assert!(session.transcript().ends_with("You get gold, cursed!\n\n"));
    }

    #[test]
    fn invalid_wish_does_not_increment_count() {
        let mut session = test_session();
        session.record_wish("I wish for infinite wishes");
        let outcome = session.apply_reply("INVALID WISH! Too greedy!", ReplyJudgment::Invalid);
        assert_eq!(outcome, WishOutcome::Invalid);
        assert_eq!(session.wish_count(), 0);
        assert_eq!(session.status(), SessionStatus::Active);
        // The reply is still recorded for future context.
        assert!(session.transcript().contains("INVALID WISH! Too greedy!"));
    }

    #[test]
    fn win_is_terminal_without_consuming_a_wish() {
        let mut session = test_session();
        session.record_wish("I wish the fire became light");
        let outcome = session.apply_reply("Warm glow. [YOU WIN]", ReplyJudgment::Win);
        assert_eq!(outcome, WishOutcome::Win);
        assert_eq!(session.wish_count(), 0);
        assert!(session.is_won());
    }

    #[test]
    fn third_granted_wish_spends_the_session() {
        let mut session = test_session();
        let mut outcomes = Vec::new();
        for wish in ["one", "two", "three"] {
            session.record_wish(wish);
            outcomes.push(session.apply_reply("Granted.", ReplyJudgment::Granted));
        }
        assert_eq!(
            outcomes,
            vec![WishOutcome::Ok, WishOutcome::Ok, WishOutcome::Spent]
        );
        assert_eq!(session.wish_count(), MAX_WISHES);
        assert!(session.is_spent());
    }

    #[test]
    fn wish_count_never_exceeds_cap() {
        let mut session = test_session();
        for _ in 0..3 {
            session.record_wish("again");
            session.apply_reply("Granted.", ReplyJudgment::Granted);
        }
        assert_eq!(session.wish_count(), MAX_WISHES);
        // Invalid replies after spending change nothing.
        session.record_wish("again");
        session.apply_reply("INVALID WISH", ReplyJudgment::Invalid);
        assert_eq!(session.wish_count(), MAX_WISHES);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&WishOutcome::Win).unwrap();
        assert_eq!(json, "\"win\"");
        let json = serde_json::to_string(&WishOutcome::Invalid).unwrap();
        assert_eq!(json, "\"invalid\"");
    }
}
