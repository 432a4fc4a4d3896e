//! Session module - the placement/detection/removal transaction
//!
//! One session owns its grid, game state and generator behind `&mut self`,
//! so external commands serialize against any in-flight detection pass: no
//! placement can begin while an earlier pass is unresolved, and a pass
//! always observes the grid exactly as left by every previously applied
//! pass. The dictionary is the shared, process-wide collaborator.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::core::{Block, BlockGenerator, GameState, Grid, PlacementError, SyllableTable};
use crate::dict::DictionaryService;
use crate::engine::finder::detect_words;
use crate::types::{Coord, GamePhase, Word};

/// Why a placement command was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceRejected {
    /// Session is paused or over
    NotPlayable,
    /// The grid refused the placement
    Invalid(PlacementError),
}

impl PlaceRejected {
    pub fn message(self) -> &'static str {
        match self {
            PlaceRejected::NotPlayable => "session is not accepting placements",
            PlaceRejected::Invalid(err) => err.message(),
        }
    }
}

impl std::fmt::Display for PlaceRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceRejected {}

impl From<PlacementError> for PlaceRejected {
    fn from(err: PlacementError) -> Self {
        PlaceRejected::Invalid(err)
    }
}

/// Result of one resolved placement
#[derive(Debug, Clone, Default)]
pub struct TurnOutcome {
    /// Words validated by this pass, each scored individually
    pub words: Vec<Word>,
    /// Every cell actually cleared, explosions included
    pub removed: Vec<Coord>,
    /// Score awarded by this pass
    pub score_gained: u32,
    /// Whether a bomb detonated during removal
    pub bomb_exploded: bool,
}

/// One play session: grid, score state and block source over a shared
/// dictionary
#[derive(Debug)]
pub struct GameSession {
    grid: Grid,
    state: GameState,
    generator: BlockGenerator,
    dict: Arc<DictionaryService>,
}

impl GameSession {
    /// Create a session with default tuning
    pub fn new(dict: Arc<DictionaryService>, seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            state: GameState::new(),
            generator: BlockGenerator::new(seed),
            dict,
        }
    }

    /// Override the bomb cadence
    pub fn with_bomb_interval(mut self, interval: u32) -> Self {
        self.state = GameState::with_bomb_interval(interval);
        self
    }

    /// Bias block syllables with a loaded frequency table
    pub fn with_syllable_table(mut self, seed: u32, table: SyllableTable) -> Self {
        self.generator = BlockGenerator::with_table(seed, table);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dict(&self) -> &Arc<DictionaryService> {
        &self.dict
    }

    /// Draw the next block, injecting a bomb when the cadence calls for one
    pub fn next_block(&mut self) -> Block {
        let as_bomb = self.state.take_bomb_request();
        self.generator.next_block(as_bomb)
    }

    /// True iff the block fits somewhere on the grid in some rotation
    pub fn can_place_anywhere(&self, block: &Block) -> bool {
        let mut candidate = block.clone();
        for _ in 0..4 {
            for row in 0..self.grid.rows() as i8 {
                for col in 0..self.grid.cols() as i8 {
                    if self.grid.can_place(&candidate, row, col) {
                        return true;
                    }
                }
            }
            candidate = candidate.rotated();
        }
        false
    }

    /// Mark the session over once none of the offered blocks has a legal
    /// anchor. Returns the updated phase.
    pub fn check_game_over(&mut self, tray: &[Block]) -> GamePhase {
        if self.state.phase() == GamePhase::Playing
            && !tray.is_empty()
            && !tray.iter().any(|b| self.can_place_anywhere(b))
        {
            self.state.set_over();
        }
        self.state.phase()
    }

    pub fn pause(&mut self) {
        self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    /// Reset grid and state for a fresh episode.
    ///
    /// The episode id advances, so a detection pass started before the
    /// restart can no longer apply its results to the new grid.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.state.restart();
    }

    /// Detect words on the current grid without mutating anything
    pub async fn detect_words(&self) -> Vec<Word> {
        detect_words(&self.grid, &self.dict).await
    }

    /// Apply a detected word set: union-clear the covered cells and feed the
    /// scores to the state machine. Returns the updated game state.
    pub fn apply_words(&mut self, words: &[Word]) -> GameState {
        self.apply_words_outcome(words);
        self.state.clone()
    }

    fn apply_words_outcome(&mut self, words: &[Word]) -> TurnOutcome {
        let mut union: Vec<Coord> = Vec::new();
        let mut seen: FxHashSet<Coord> = FxHashSet::default();
        for word in words {
            for &coord in &word.cells {
                if seen.insert(coord) {
                    union.push(coord);
                }
            }
        }

        let bomb_exploded = self.grid.remove_cells(&union);
        self.state.apply_words(words);

        TurnOutcome {
            words: words.to_vec(),
            removed: self.grid.last_removed().to_vec(),
            score_gained: words.iter().map(|w| w.score).sum(),
            bomb_exploded,
        }
    }

    /// Place a block, run one detection pass against the resulting grid, and
    /// apply the full word set in a single removal transaction.
    pub async fn place_and_resolve(
        &mut self,
        block: &Block,
        anchor_row: i8,
        anchor_col: i8,
    ) -> Result<TurnOutcome, PlaceRejected> {
        if self.state.phase() != GamePhase::Playing {
            return Err(PlaceRejected::NotPlayable);
        }

        self.grid.place(block, anchor_row, anchor_col)?;
        if block.is_bomb() {
            self.state.bomb_placed();
        }

        let episode = self.state.episode_id();
        let words = detect_words(&self.grid, &self.dict).await;

        // A restart during the pass invalidates its results
        if self.state.episode_id() != episode {
            return Ok(TurnOutcome::default());
        }
        if words.is_empty() {
            return Ok(TurnOutcome::default());
        }

        Ok(self.apply_words_outcome(&words))
    }
}
