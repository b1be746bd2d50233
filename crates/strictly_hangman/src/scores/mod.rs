//! Durable per-player win counts.

mod board;
mod error;
mod store;

pub use board::{Score, ScoreBoard};
pub use error::{StoreError, StoreErrorKind};
pub use store::ScoreStore;
