//! Generator module - deterministic block production
//!
//! Draws shapes and syllables from a seeded RNG so a session can be replayed
//! from its seed. Syllable distribution follows the optional frequency table
//! exported by the corpus tooling; without one, a built-in list of common
//! syllables is used with uniform weight. Bomb injection is driven by the
//! game state's cadence counter, not decided here.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::block::Block;
use crate::core::rng::SimpleRng;
use crate::core::shapes::random_shape;
use crate::types::BlockColor;

/// Relative draw weight per block size 1..=4
const SIZE_WEIGHTS: [u64; 4] = [2, 4, 3, 1];

/// Fallback syllables when no frequency table is supplied
const DEFAULT_SYLLABLES: [char; 30] = [
    '가', '나', '다', '라', '마', '바', '사', '아', '자', '하', '기', '니', '리', '미', '비',
    '시', '이', '지', '수', '주', '구', '두', '부', '우', '고', '도', '로', '보', '소', '오',
];

/// Ranked single-syllable frequency table
#[derive(Debug, Clone)]
pub struct SyllableTable {
    chars: Vec<char>,
    weights: Vec<u64>,
}

impl SyllableTable {
    /// Built-in fallback distribution
    pub fn default_table() -> Self {
        Self {
            chars: DEFAULT_SYLLABLES.to_vec(),
            weights: vec![1; DEFAULT_SYLLABLES.len()],
        }
    }

    /// Load a `syllable count` per line table.
    ///
    /// Lines that do not parse are skipped; an empty result falls back to
    /// the built-in table so the generator always has something to draw.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading frequency table {}", path.display()))?;

        let mut chars = Vec::new();
        let mut weights = Vec::new();
        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let (Some(sym), Some(count)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Some(ch) = sym.chars().next() else {
                continue;
            };
            let Ok(weight) = count.parse::<u64>() else {
                continue;
            };
            if sym.chars().count() == 1 && crate::hangul::is_syllable(ch) {
                chars.push(ch);
                weights.push(weight);
            }
        }

        if chars.is_empty() {
            log::warn!("frequency table {} had no usable rows", path.display());
            return Ok(Self::default_table());
        }
        Ok(Self { chars, weights })
    }

    fn sample(&self, rng: &mut SimpleRng) -> char {
        self.chars[rng.pick_weighted(&self.weights)]
    }
}

/// Seeded block source for one session
#[derive(Debug, Clone)]
pub struct BlockGenerator {
    rng: SimpleRng,
    table: SyllableTable,
    next_id: u32,
}

impl BlockGenerator {
    /// Create a generator with the built-in syllable distribution
    pub fn new(seed: u32) -> Self {
        Self::with_table(seed, SyllableTable::default_table())
    }

    /// Create a generator biased by a loaded frequency table
    pub fn with_table(seed: u32, table: SyllableTable) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            table,
            next_id: 0,
        }
    }

    /// Produce the next block.
    ///
    /// When `as_bomb` is set the block is a single-cell bomb carrying a
    /// normal syllable, so it can join words and detonate when cleared.
    pub fn next_block(&mut self, as_bomb: bool) -> Block {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;

        let color = BlockColor::ALL[self.rng.pick_index(BlockColor::ALL.len())];

        if as_bomb {
            let ch = self.table.sample(&mut self.rng);
            let shape = random_shape(1, &mut self.rng);
            return Block::new(id, shape, &[ch], color).into_bomb();
        }

        let size = self.rng.pick_weighted(&SIZE_WEIGHTS) + 1;
        let shape = random_shape(size, &mut self.rng);
        let chars: Vec<char> = (0..size).map(|_| self.table.sample(&mut self.rng)).collect();
        Block::new(id, shape, &chars, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_deterministic() {
        let mut a = BlockGenerator::new(1234);
        let mut b = BlockGenerator::new(1234);
        for _ in 0..10 {
            assert_eq!(a.next_block(false), b.next_block(false));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut gen = BlockGenerator::new(9);
        let a = gen.next_block(false);
        let b = gen.next_block(false);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_blocks_carry_syllables() {
        let mut gen = BlockGenerator::new(77);
        for _ in 0..20 {
            let block = gen.next_block(false);
            assert_eq!(block.chars().len(), block.size());
            for &ch in block.chars() {
                assert!(crate::hangul::is_syllable(ch));
            }
        }
    }

    #[test]
    fn test_bomb_block_is_single_cell_and_flagged() {
        let mut gen = BlockGenerator::new(5);
        let bomb = gen.next_block(true);
        assert!(bomb.is_bomb());
        assert_eq!(bomb.size(), 1);
        assert!(crate::hangul::is_syllable(bomb.chars()[0]));
    }

    #[test]
    fn test_frequency_table_parsing() {
        let path = std::env::temp_dir().join(format!("hangul_blocks_freq_{}", std::process::id()));
        std::fs::write(&path, "가 1000\n나 500\nbad line\nx 3\n다 notanumber\n").unwrap();

        let table = SyllableTable::load(&path).unwrap();
        // Only the two well-formed syllable rows survive
        assert_eq!(table.chars, vec!['가', '나']);
        assert_eq!(table.weights, vec![1000, 500]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_frequency_table_falls_back() {
        let path = std::env::temp_dir().join(format!("hangul_blocks_freq_empty_{}", std::process::id()));
        std::fs::write(&path, "only junk here\n").unwrap();

        let table = SyllableTable::load(&path).unwrap();
        assert!(!table.chars.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
