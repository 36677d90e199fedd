//! Use cases - the game's application logic.

pub mod game;

pub use game::{MakeWish, RestartGame, StartGame, WishError, WishReply};
