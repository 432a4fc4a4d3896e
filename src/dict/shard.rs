//! Authoritative shard index - tier 3 of the dictionary
//!
//! The corpus is partitioned by the leading consonant of each word into 14
//! basic-consonant shards plus a catch-all, one file per shard. Each shard is
//! a tagged state so callers can tell "not loaded yet" from "loaded and the
//! word is absent" - the two answers carry different authority.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::hangul::{self, SHARD_CLASS_COUNT};

/// Load state of one corpus shard
#[derive(Debug, Default)]
pub enum ShardState {
    /// Never loaded, or released under memory pressure
    #[default]
    NotLoaded,
    /// A loader is building the set off to the side
    Loading,
    /// Fully resident and authoritative
    Ready(FxHashSet<String>),
}

impl ShardState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ShardState::Ready(_))
    }
}

/// Authoritative lookup over all shards
#[derive(Debug, Default)]
pub struct ShardIndex {
    shards: [ShardState; SHARD_CLASS_COUNT],
}

/// Outcome of a tier-3 lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardAnswer {
    /// Shard is ready and contains the word
    Present,
    /// Shard is ready and does not contain the word
    Absent,
    /// Shard not resident; absence is tentative
    Unavailable,
}

impl ShardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, class: usize) -> &ShardState {
        &self.shards[class]
    }

    pub fn set_state(&mut self, class: usize, state: ShardState) {
        self.shards[class] = state;
    }

    pub fn ready_count(&self) -> usize {
        self.shards.iter().filter(|s| s.is_ready()).count()
    }

    /// Exact lookup, scoped to the shard matching the word's first character
    pub fn lookup(&self, word: &str) -> ShardAnswer {
        let class = hangul::shard_class_of_word(word);
        match &self.shards[class] {
            ShardState::Ready(set) => {
                if set.contains(word) {
                    ShardAnswer::Present
                } else {
                    ShardAnswer::Absent
                }
            }
            ShardState::NotLoaded | ShardState::Loading => ShardAnswer::Unavailable,
        }
    }

    /// Collect words matching a pattern from every ready shard.
    ///
    /// Prefix matches rank before substring matches; output is capped at
    /// `limit` entries.
    pub fn suggest(&self, pattern: &str, limit: usize) -> Vec<String> {
        if pattern.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut prefixed: Vec<&String> = Vec::new();
        let mut contained: Vec<&String> = Vec::new();
        for shard in &self.shards {
            let ShardState::Ready(set) = shard else {
                continue;
            };
            for word in set {
                if word.starts_with(pattern) {
                    prefixed.push(word);
                } else if word.contains(pattern) {
                    contained.push(word);
                }
            }
        }

        prefixed.sort();
        contained.sort();
        prefixed
            .into_iter()
            .chain(contained)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Path of a shard's word-list file inside the corpus directory
pub fn shard_file_path(dir: &Path, class: usize) -> PathBuf {
    dir.join(format!("{}.txt", hangul::class_label(class)))
}

/// Path of the seed word-list file inside the corpus directory
pub fn seed_file_path(dir: &Path) -> PathBuf {
    dir.join("seed.txt")
}

/// Read one word-list file into a set.
///
/// One UTF-8 word per line; blank lines and words shorter than two
/// characters are skipped, matching the corpus tooling's output contract.
pub fn load_word_file(path: &Path) -> Result<FxHashSet<String>> {
    let file =
        File::open(path).with_context(|| format!("opening word list {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut words = FxHashSet::default();
    for line in reader.lines() {
        let line = line.with_context(|| format!("reading word list {}", path.display()))?;
        let word = line.trim();
        if word.chars().count() >= 2 {
            words.insert(word.to_string());
        }
    }
    Ok(words)
}

/// Stream one word-list file line by line without retaining it.
///
/// Used to feed the membership filter at startup; set construction is left
/// to the background loaders.
pub fn for_each_word(path: &Path, mut f: impl FnMut(&str)) -> Result<usize> {
    let file =
        File::open(path).with_context(|| format!("opening word list {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut count = 0usize;
    for line in reader.lines() {
        let line = line.with_context(|| format!("reading word list {}", path.display()))?;
        let word = line.trim();
        if word.chars().count() >= 2 {
            f(word);
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(words: &[&str]) -> ShardState {
        ShardState::Ready(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_lookup_branches_on_state() {
        let mut index = ShardIndex::new();
        let class = hangul::shard_class('가');

        assert_eq!(index.lookup("가나"), ShardAnswer::Unavailable);

        index.set_state(class, ShardState::Loading);
        assert_eq!(index.lookup("가나"), ShardAnswer::Unavailable);

        index.set_state(class, ready(&["가나"]));
        assert_eq!(index.lookup("가나"), ShardAnswer::Present);
        assert_eq!(index.lookup("가다"), ShardAnswer::Absent);
    }

    #[test]
    fn test_lookup_scopes_to_leading_consonant() {
        let mut index = ShardIndex::new();
        index.set_state(hangul::shard_class('가'), ready(&["가나"]));
        // 나다 belongs to the ㄴ shard, which is not loaded
        assert_eq!(index.lookup("나다"), ShardAnswer::Unavailable);
    }

    #[test]
    fn test_suggest_prefers_prefix_matches() {
        let mut index = ShardIndex::new();
        index.set_state(hangul::shard_class('가'), ready(&["가나", "가나다", "그가나"]));
        let out = index.suggest("가나", 10);
        assert_eq!(out, vec!["가나", "가나다", "그가나"]);
    }

    #[test]
    fn test_suggest_honors_limit() {
        let mut index = ShardIndex::new();
        index.set_state(hangul::shard_class('가'), ready(&["가나", "가다", "가라", "가마"]));
        assert_eq!(index.suggest("가", 2).len(), 2);
    }
}
