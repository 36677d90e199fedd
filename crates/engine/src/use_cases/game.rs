//! Game use cases: start a session, submit a wish, restart.

use std::sync::Arc;

use jinni_domain::{GameError, ReplyClassifier, WishOutcome, WishSession};

use crate::infrastructure::ports::{ClockPort, LlmError, LlmPort, LlmRequest, RandomPort};
use crate::scenarios::{render_persona_prompt, ScenarioBank};
use crate::stores::WishSessionStore;

/// Fixed reply for the spent short-circuit path.
pub const WISHES_SPENT_REPLY: &str = "🧞‍♂️ Jini: Your wishes are spent. Start a new game.";

/// Submitting a wish can fail on input, session state, or the backend.
#[derive(Debug, thiserror::Error)]
pub enum WishError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Generation(#[from] LlmError),
}

/// What a resolved wish turn reports back to the client.
#[derive(Debug, Clone)]
pub struct WishReply {
    pub reply: String,
    pub status: WishOutcome,
    /// Absent on the spent short-circuit, present otherwise.
    pub wish_count: Option<u8>,
}

/// Starts (or silently restarts) a game session.
pub struct StartGame {
    store: Arc<WishSessionStore>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl StartGame {
    pub fn new(
        store: Arc<WishSessionStore>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            random,
            clock,
        }
    }

    /// Pick a scenario, seed the transcript with the persona prompt, and
    /// store a fresh session under this id.
    ///
    /// An already-active session is reinitialized, discarding its
    /// transcript. That mirrors a client pressing "new game" mid-run.
    pub fn execute(&self, session_id: &str) -> String {
        let scenario = ScenarioBank::pick(self.random.as_ref());
        let prompt = render_persona_prompt(scenario);

        if self.store.contains(session_id) {
            tracing::debug!(session_id, "reinitializing already-active session");
        }
        self.store
            .insert(session_id, WishSession::new(scenario, &prompt, self.clock.now()));

        tracing::info!(session_id, "session started");
        scenario.to_string()
    }
}

/// Relays one wish turn through the LLM backend and advances the session.
pub struct MakeWish {
    store: Arc<WishSessionStore>,
    llm: Arc<dyn LlmPort>,
    classifier: Arc<dyn ReplyClassifier>,
}

enum Turn {
    /// All wishes used; reply with the fixed message, skip the backend.
    Spent,
    /// Relay this transcript to the backend.
    Relay(String),
}

impl MakeWish {
    pub fn new(
        store: Arc<WishSessionStore>,
        llm: Arc<dyn LlmPort>,
        classifier: Arc<dyn ReplyClassifier>,
    ) -> Self {
        Self {
            store,
            llm,
            classifier,
        }
    }

    pub async fn execute(&self, session_id: &str, wish: &str) -> Result<WishReply, WishError> {
        let wish = wish.trim();
        if wish.is_empty() {
            return Err(GameError::EmptyWish.into());
        }

        // Record the user's turn before calling the backend. The append is
        // deliberately not rolled back on generation failure; the turn
        // stays in the transcript even when no reply was produced.
        let turn = self
            .store
            .with_mut(session_id, |session| {
                if session.is_spent() {
                    Turn::Spent
                } else {
                    session.record_wish(wish);
                    Turn::Relay(session.transcript().to_string())
                }
            })
            .ok_or(GameError::SessionExpired)?;

        let transcript = match turn {
            Turn::Spent => {
                tracing::debug!(session_id, "wish rejected: session already spent");
                return Ok(WishReply {
                    reply: WISHES_SPENT_REPLY.to_string(),
                    status: WishOutcome::Spent,
                    wish_count: None,
                });
            }
            Turn::Relay(transcript) => transcript,
        };

        let response = self.llm.generate(LlmRequest::new(transcript)).await?;
        let reply = response.content.trim().to_string();
        let judgment = self.classifier.classify(&reply);

        // The session can vanish between the two accesses if a restart
        // races this call; treat that the same as a missing session.
        let (status, wish_count) = self
            .store
            .with_mut(session_id, |session| {
                let outcome = session.apply_reply(&reply, judgment);
                (outcome, session.wish_count())
            })
            .ok_or(GameError::SessionExpired)?;

        tracing::info!(session_id, wish_count, ?status, "wish resolved");
        Ok(WishReply {
            reply,
            status,
            wish_count: Some(wish_count),
        })
    }
}

/// Clears a session unconditionally.
pub struct RestartGame {
    store: Arc<WishSessionStore>,
}

impl RestartGame {
    pub fn new(store: Arc<WishSessionStore>) -> Self {
        Self { store }
    }

    /// Idempotent; always succeeds.
    pub fn execute(&self, session_id: &str) {
        self.store.remove(session_id);
        tracing::info!(session_id, "session cleared");
    }
}
