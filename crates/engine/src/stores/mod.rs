//! In-memory state storage modules.
//!
//! Stores manage runtime state that lives only as long as the process:
//! - `WishSessionStore` - per-session game state keyed by session id

pub mod wish_sessions;

pub use wish_sessions::WishSessionStore;
