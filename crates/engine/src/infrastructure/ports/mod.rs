//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - LLM calls (could swap Ollama -> Claude/OpenAI)
//! - Clock/Random (for testing)

mod error;
mod external;
mod testing;

pub use error::LlmError;
pub use external::{FinishReason, LlmPort, LlmRequest, LlmResponse, TokenUsage};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use external::MockLlmPort;
