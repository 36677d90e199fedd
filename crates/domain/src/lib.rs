//! Core domain types for the Jinni wish game.
//!
//! This crate holds the session state machine and reply classification rules.
//! It is pure: no I/O, no async, no randomness. Transport, storage, and the
//! LLM backend live in `jinni-engine` behind port traits.

pub mod classifier;
pub mod error;
pub mod session;

pub use classifier::{ReplyClassifier, ReplyJudgment, SentinelClassifier};
pub use error::GameError;
pub use session::{SessionStatus, WishOutcome, WishSession, MAX_WISHES};
