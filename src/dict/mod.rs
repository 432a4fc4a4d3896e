//! Dictionary module - tiered word-existence oracle
//!
//! Three tiers answer "is this string a word": an exact-result LRU cache, a
//! Bloom-style pre-filter whose negatives are authoritative, and a shard
//! index partitioned by leading consonant that loads in the background.

pub mod cache;
pub mod filter;
pub mod shard;
pub mod service;

pub use cache::LruCache;
pub use filter::MembershipFilter;
pub use service::{DictConfig, DictionaryService};
pub use shard::{ShardAnswer, ShardIndex, ShardState};
