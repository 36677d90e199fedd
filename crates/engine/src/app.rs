//! Application state and composition.

use std::sync::Arc;

use jinni_domain::{ReplyClassifier, SentinelClassifier};

use crate::infrastructure::clock::{SystemClock, SystemRandom};
use crate::infrastructure::ports::{ClockPort, LlmPort, RandomPort};
use crate::stores::WishSessionStore;
use crate::use_cases::{MakeWish, RestartGame, StartGame};

/// Main application state.
///
/// Holds the game use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub start_game: StartGame,
    pub make_wish: MakeWish,
    pub restart_game: RestartGame,
}

impl App {
    /// Create a new App with system clock, system randomness, and the
    /// default sentinel classifier.
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self::with_ports(llm, Arc::new(SystemClock::new()), Arc::new(SystemRandom::new()))
    }

    /// Create an App with injected clock/random, for tests.
    pub fn with_ports(
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let store = Arc::new(WishSessionStore::new());
        let classifier: Arc<dyn ReplyClassifier> = Arc::new(SentinelClassifier::default());

        let use_cases = UseCases {
            start_game: StartGame::new(store.clone(), random, clock),
            make_wish: MakeWish::new(store.clone(), llm, classifier),
            restart_game: RestartGame::new(store),
        };

        Self { use_cases }
    }
}
