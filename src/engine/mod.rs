//! Engine module - word detection and the session transaction layer
//!
//! Ties the pure core to the async dictionary: `finder` scans a read-only
//! grid for words, `session` serializes placement against detection and
//! applies each pass as one removal transaction.

pub mod finder;
pub mod session;

pub use finder::detect_words;
pub use session::{GameSession, PlaceRejected, TurnOutcome};
