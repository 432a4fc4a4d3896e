//! Korean word-block puzzle core.
//!
//! Players place small blocks of Hangul syllables onto a 10x10 grid; every
//! placement is followed by a detection pass that finds all dictionary words
//! formed along rows and columns, clears their cells and feeds the score,
//! level and bomb state machine. Word existence is answered by a tiered
//! dictionary: an LRU result cache, a Bloom-style pre-filter and a
//! leading-consonant shard index that streams in on background tasks.
//!
//! Presentation, input handling and corpus preprocessing live outside this
//! crate; it exposes the engine only.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hangul_blocks::dict::{DictConfig, DictionaryService};
//! use hangul_blocks::engine::GameSession;
//!
//! # async fn demo() {
//! let dict = Arc::new(DictionaryService::open(&DictConfig::new("corpus")));
//! Arc::clone(&dict).spawn_background_load();
//!
//! let mut session = GameSession::new(Arc::clone(&dict), 12345);
//! let block = session.next_block();
//! if session.grid().can_place(&block, 4, 4) {
//!     let outcome = session.place_and_resolve(&block, 4, 4).await.unwrap();
//!     println!("cleared {} words", outcome.words.len());
//! }
//! # }
//! ```

pub mod core;
pub mod dict;
pub mod engine;
pub mod hangul;
pub mod types;

// Re-export the main entry points
pub use crate::core::{Block, BlockGenerator, GameState, Grid, PlacementError, ShapeKind};
pub use crate::dict::{DictConfig, DictionaryService};
pub use crate::engine::{detect_words, GameSession, TurnOutcome};
pub use crate::types::{BlockColor, Coord, GamePhase, Rotation, Word};
