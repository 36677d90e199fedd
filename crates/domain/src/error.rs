//! Unified error types for the domain layer.

use thiserror::Error;

/// Errors raised by game rules, independent of transport or backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The submitted wish was empty after trimming.
    #[error("wish text is empty")]
    EmptyWish,

    /// No active session exists for this caller.
    #[error("no active session")]
    SessionExpired,
}
