//! Probabilistic pre-filter - tier 2 of the dictionary
//!
//! A Bloom filter over the full corpus, sized from the expected word count
//! and a target false-positive rate. A negative answer is authoritative and
//! short-circuits the shard lookup; a positive answer is only a hint. Two
//! FxHasher passes with different seeds drive double hashing, so membership
//! is deterministic across sessions.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Space-efficient set membership with one-sided error
#[derive(Debug)]
pub struct MembershipFilter {
    bits: Vec<u64>,
    bit_count: u64,
    hash_count: u32,
}

fn seeded_hash(word: &str, seed: u64) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    hasher.write(word.as_bytes());
    hasher.finish()
}

impl MembershipFilter {
    /// Size the filter for `expected_items` entries at `fp_rate`
    /// false positives (e.g. 0.01 for 1%)
    pub fn with_rate(expected_items: usize, fp_rate: f64) -> Self {
        let n = expected_items.max(1) as f64;
        let p = fp_rate.clamp(1e-6, 0.5);
        let ln2 = std::f64::consts::LN_2;

        let m = (n * p.ln().abs() / (ln2 * ln2)).ceil() as u64;
        let bit_count = m.max(64);
        let k = ((bit_count as f64 / n) * ln2).round().clamp(1.0, 24.0) as u32;

        Self {
            bits: vec![0u64; bit_count.div_ceil(64) as usize],
            bit_count,
            hash_count: k,
        }
    }

    #[inline]
    fn bit_positions(&self, word: &str) -> impl Iterator<Item = u64> + '_ {
        // Double hashing: g_i = h1 + i * h2
        let h1 = seeded_hash(word, 0x9E37_79B9);
        let h2 = seeded_hash(word, 0x85EB_CA6B) | 1;
        let bit_count = self.bit_count;
        (0..self.hash_count as u64).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % bit_count)
    }

    /// Record a corpus word
    pub fn insert(&mut self, word: &str) {
        let positions: Vec<u64> = self.bit_positions(word).collect();
        for pos in positions {
            self.bits[(pos / 64) as usize] |= 1u64 << (pos % 64);
        }
    }

    /// False means definitely absent; true means possibly present
    pub fn might_contain(&self, word: &str) -> bool {
        self.bit_positions(word)
            .all(|pos| self.bits[(pos / 64) as usize] & (1u64 << (pos % 64)) != 0)
    }

    /// Size of the bit array in bytes
    pub fn byte_size(&self) -> usize {
        self.bits.len() * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_false_negatives() {
        let words = ["가나", "나다", "가나다", "한국", "사과"];
        let mut filter = MembershipFilter::with_rate(words.len(), 0.01);
        for w in &words {
            filter.insert(w);
        }
        for w in &words {
            assert!(filter.might_contain(w), "inserted word {w} reported absent");
        }
    }

    #[test]
    fn test_rejects_most_absent_words() {
        let mut filter = MembershipFilter::with_rate(1000, 0.01);
        for i in 0..1000 {
            filter.insert(&format!("word{i}"));
        }
        let false_positives = (0..1000)
            .filter(|i| filter.might_contain(&format!("absent{i}")))
            .count();
        // 1% target; allow generous slack for hash variance
        assert!(false_positives < 50, "{false_positives} false positives");
    }

    #[test]
    fn test_deterministic_across_instances() {
        let mut a = MembershipFilter::with_rate(100, 0.01);
        let mut b = MembershipFilter::with_rate(100, 0.01);
        a.insert("가나");
        b.insert("가나");
        assert_eq!(a.might_contain("가나"), b.might_contain("가나"));
        assert_eq!(a.might_contain("나다"), b.might_contain("나다"));
    }

    #[test]
    fn test_sizing_scales_with_rate() {
        let loose = MembershipFilter::with_rate(10_000, 0.1);
        let tight = MembershipFilter::with_rate(10_000, 0.001);
        assert!(tight.byte_size() > loose.byte_size());
    }
}
