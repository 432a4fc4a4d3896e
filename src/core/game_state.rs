//! Game state module - score, level, clear count and the bomb cadence
//!
//! Pure state machine driven by detection output. The grid and dictionary
//! live elsewhere; this module only reacts to the words a pass produced and
//! to the pause/restart commands of the session.

use crate::core::scoring::level_for_score;
use crate::types::{GamePhase, Word, DEFAULT_BOMB_INTERVAL};

/// Score, level and bomb state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    score: u32,
    level: u32,
    /// Total cleared words, one increment per Word
    word_clear_count: u32,
    /// Cleared words since the last bomb was placed
    clears_since_bomb: u32,
    /// Clears needed before the next bomb is offered
    bomb_interval: u32,
    /// Set while a bomb has been handed to the generator but not yet placed
    bomb_generated: bool,
    phase: GamePhase,
    /// Monotonic episode id (increments on restart).
    ///
    /// Detection passes capture this before scanning; a mismatch at apply
    /// time means a restart happened and the pass must be discarded.
    episode_id: u32,
}

impl GameState {
    /// Create a fresh state with the default bomb interval
    pub fn new() -> Self {
        Self::with_bomb_interval(DEFAULT_BOMB_INTERVAL)
    }

    /// Create a fresh state with a custom bomb cadence.
    /// Intervals of 0 are clamped to 1 so the counter stays meaningful.
    pub fn with_bomb_interval(bomb_interval: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            word_clear_count: 0,
            clears_since_bomb: 0,
            bomb_interval: bomb_interval.max(1),
            bomb_generated: false,
            phase: GamePhase::Playing,
            episode_id: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn word_clear_count(&self) -> u32 {
        self.word_clear_count
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn bomb_interval(&self) -> u32 {
        self.bomb_interval
    }

    pub fn bomb_generated(&self) -> bool {
        self.bomb_generated
    }

    /// Apply one detection pass worth of cleared words.
    ///
    /// Every word scores individually; cells shared between words were
    /// already union-cleared by the grid and do not reduce the award.
    /// Level is recomputed after the score change and never decreases.
    pub fn apply_words(&mut self, words: &[Word]) {
        if words.is_empty() {
            return;
        }
        for word in words {
            self.score = self.score.saturating_add(word.score);
        }
        let cleared = words.len() as u32;
        self.word_clear_count += cleared;
        self.clears_since_bomb += cleared;
        self.level = self.level.max(level_for_score(self.score));
    }

    /// True once enough clears have accumulated for the next bomb.
    /// Stays false while a generated bomb is still waiting to be placed.
    pub fn bomb_ready(&self) -> bool {
        !self.bomb_generated && self.clears_since_bomb >= self.bomb_interval
    }

    /// Consume bomb readiness; the generator calls this when it emits a bomb.
    /// Returns whether a bomb should be injected into the next block.
    pub fn take_bomb_request(&mut self) -> bool {
        if !self.bomb_ready() {
            return false;
        }
        self.bomb_generated = true;
        true
    }

    /// The generated bomb landed on the grid; only now does the cadence
    /// counter reset.
    pub fn bomb_placed(&mut self) {
        self.bomb_generated = false;
        self.clears_since_bomb = 0;
    }

    /// Playing -> Paused
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    /// Paused -> Playing
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Playing -> Over, once no offered block has a legal anchor
    pub fn set_over(&mut self) {
        self.phase = GamePhase::Over;
    }

    /// Reset for a new episode. The episode id keeps counting so results
    /// from passes started before the restart can be told apart.
    pub fn restart(&mut self) {
        let interval = self.bomb_interval;
        let episode = self.episode_id;
        *self = Self::with_bomb_interval(interval);
        self.episode_id = episode.wrapping_add(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::word_score;

    fn word(text: &str) -> Word {
        Word {
            text: text.to_string(),
            cells: Vec::new(),
            score: word_score(text.chars().count()),
        }
    }

    #[test]
    fn test_apply_words_accumulates_score_and_count() {
        let mut gs = GameState::new();
        gs.apply_words(&[word("가나"), word("나다")]);
        assert_eq!(gs.score(), 200);
        assert_eq!(gs.word_clear_count(), 2);
    }

    #[test]
    fn test_level_never_decreases() {
        let mut gs = GameState::new();
        assert_eq!(gs.level(), 1);
        gs.apply_words(&[word("가나다라마")]);
        let reached = gs.level();
        assert!(reached >= 3);
        gs.apply_words(&[word("가나")]);
        assert!(gs.level() >= reached);
    }

    #[test]
    fn test_bomb_cadence_counts_clears() {
        let mut gs = GameState::with_bomb_interval(3);
        assert!(!gs.bomb_ready());
        gs.apply_words(&[word("가나"), word("나다")]);
        assert!(!gs.bomb_ready());
        gs.apply_words(&[word("다라")]);
        assert!(gs.bomb_ready());
    }

    #[test]
    fn test_bomb_counter_resets_on_placement_not_generation() {
        let mut gs = GameState::with_bomb_interval(2);
        gs.apply_words(&[word("가나"), word("나다")]);

        assert!(gs.take_bomb_request());
        // Generated but not placed: no second bomb, counter untouched
        assert!(!gs.take_bomb_request());
        assert!(gs.bomb_generated());

        gs.bomb_placed();
        assert!(!gs.bomb_generated());
        assert!(!gs.bomb_ready());

        gs.apply_words(&[word("가나"), word("나다")]);
        assert!(gs.take_bomb_request());
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut gs = GameState::new();
        gs.pause();
        assert!(gs.is_paused());
        gs.resume();
        assert_eq!(gs.phase(), GamePhase::Playing);
        gs.set_over();
        assert!(gs.is_over());
        // Pause has no effect once over
        gs.pause();
        assert!(gs.is_over());
    }

    #[test]
    fn test_restart_bumps_episode_and_resets_progress() {
        let mut gs = GameState::with_bomb_interval(3);
        gs.apply_words(&[word("가나")]);
        let episode = gs.episode_id();
        gs.restart();
        assert_eq!(gs.episode_id(), episode + 1);
        assert_eq!(gs.score(), 0);
        assert_eq!(gs.word_clear_count(), 0);
        assert_eq!(gs.bomb_interval(), 3);
    }
}
