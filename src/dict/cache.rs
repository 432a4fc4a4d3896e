//! Exact-result cache - tier 1 of the dictionary
//!
//! Bounded map from query string to its committed boolean outcome. Recency is
//! tracked with generation stamps in a queue: a hit re-stamps the entry, and
//! eviction pops queue entries whose stamp is stale until a live
//! least-recently-used entry falls out. O(1) amortized on both paths.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

/// LRU cache of query outcomes
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    map: FxHashMap<String, Entry>,
    queue: VecDeque<(String, u64)>,
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: bool,
    stamp: u64,
}

impl LruCache {
    /// Create a cache holding at most `capacity` outcomes
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            map: FxHashMap::default(),
            queue: VecDeque::with_capacity(capacity + 1),
            generation: 0,
        }
    }

    /// Look up a committed outcome, refreshing its recency
    pub fn get(&mut self, word: &str) -> Option<bool> {
        self.generation += 1;
        let generation = self.generation;
        let entry = self.map.get_mut(word)?;
        entry.stamp = generation;
        let value = entry.value;
        self.queue.push_back((word.to_string(), generation));
        Some(value)
    }

    /// Commit an outcome, evicting the least recently used entry at capacity
    pub fn insert(&mut self, word: &str, value: bool) {
        self.generation += 1;
        let stamp = self.generation;
        self.map.insert(word.to_string(), Entry { value, stamp });
        self.queue.push_back((word.to_string(), stamp));

        while self.map.len() > self.capacity {
            let Some((candidate, queued_stamp)) = self.queue.pop_front() else {
                break;
            };
            // Stale queue entries point at re-stamped or replaced entries
            if self
                .map
                .get(&candidate)
                .is_some_and(|entry| entry.stamp == queued_stamp)
            {
                self.map.remove(&candidate);
            }
        }

        // Hits re-stamp without removing their old queue entry; drop the
        // stale ones once they dominate the queue
        if self.queue.len() > self.capacity * 4 {
            let map = &self.map;
            self.queue
                .retain(|(word, stamp)| map.get(word).is_some_and(|e| e.stamp == *stamp));
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.queue.clear();
    }
}
