//! Infrastructure adapters: LLM client, clock/random, and the port traits
//! they implement.

pub mod clock;
pub mod ollama;
pub mod ports;
