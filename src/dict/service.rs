//! Dictionary service - the tiered word-existence oracle
//!
//! Query path: exact-result LRU cache, then the probabilistic pre-filter
//! (negative answers are authoritative), then the seed set and the shard
//! index. Shards stream in on background tasks after the synchronous seed
//! load, so play can begin immediately; until a word's shard is ready its
//! class degrades to tier-2-only confidence.
//!
//! One instance serves the whole process. Construct it explicitly and share
//! it with an `Arc`; it is never reset mid-session.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use rustc_hash::FxHashSet;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::dict::cache::LruCache;
use crate::dict::filter::MembershipFilter;
use crate::dict::shard::{
    self, seed_file_path, shard_file_path, ShardAnswer, ShardIndex, ShardState,
};
use crate::hangul::{self, SHARD_CLASS_COUNT};

/// Dictionary construction parameters
#[derive(Debug, Clone)]
pub struct DictConfig {
    /// Directory holding one `<jamo>.txt` per shard plus `seed.txt`
    pub corpus_dir: PathBuf,
    /// Tier-1 capacity in cached outcomes
    pub cache_capacity: usize,
    /// Tier-2 target false-positive rate
    pub filter_fp_rate: f64,
}

impl DictConfig {
    pub fn new(corpus_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            cache_capacity: 4096,
            filter_fp_rate: 0.01,
        }
    }
}

/// Tiered word-existence oracle over a sharded corpus
pub struct DictionaryService {
    corpus_dir: PathBuf,
    cache: Mutex<LruCache>,
    filter: MembershipFilter,
    /// Always-resident high-frequency words, loaded synchronously at startup
    seed: FxHashSet<String>,
    shards: RwLock<ShardIndex>,
}

impl DictionaryService {
    /// Open a dictionary over a corpus directory.
    ///
    /// Reads the seed list synchronously and streams every shard file once
    /// to size and fill the pre-filter. Missing or unreadable files are
    /// logged and skipped; their classes simply stay unavailable until a
    /// later load succeeds. Call [`spawn_background_load`] afterwards to
    /// bring the shard sets in.
    ///
    /// [`spawn_background_load`]: DictionaryService::spawn_background_load
    pub fn open(config: &DictConfig) -> Self {
        let seed = match shard::load_word_file(&seed_file_path(&config.corpus_dir)) {
            Ok(words) => {
                log::info!("seed set loaded: {} words", words.len());
                words
            }
            Err(err) => {
                log::warn!("seed set unavailable: {err:#}");
                FxHashSet::default()
            }
        };

        // First pass counts words so the filter is sized for the corpus;
        // second pass fills it. Both are line scans, nothing is retained.
        let mut total = seed.len();
        for class in 0..SHARD_CLASS_COUNT {
            let path = shard_file_path(&config.corpus_dir, class);
            match shard::for_each_word(&path, |_| {}) {
                Ok(count) => total += count,
                Err(err) => log::warn!("shard {class} not counted: {err:#}"),
            }
        }

        let mut filter = MembershipFilter::with_rate(total, config.filter_fp_rate);
        for word in &seed {
            filter.insert(word);
        }
        for class in 0..SHARD_CLASS_COUNT {
            let path = shard_file_path(&config.corpus_dir, class);
            if let Err(err) = shard::for_each_word(&path, |word| filter.insert(word)) {
                log::debug!("shard {class} skipped while filling filter: {err:#}");
            }
        }

        Self {
            corpus_dir: config.corpus_dir.clone(),
            cache: Mutex::new(LruCache::new(config.cache_capacity)),
            filter,
            seed,
            shards: RwLock::new(ShardIndex::new()),
        }
    }

    /// Build a fully-resident dictionary from an in-memory word list.
    ///
    /// Every shard is Ready from the start; all answers are authoritative.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let all: Vec<String> = words.into_iter().map(Into::into).collect();
        let mut filter = MembershipFilter::with_rate(all.len(), 0.01);
        let mut sets: Vec<FxHashSet<String>> =
            (0..SHARD_CLASS_COUNT).map(|_| FxHashSet::default()).collect();
        for word in all {
            filter.insert(&word);
            sets[hangul::shard_class_of_word(&word)].insert(word);
        }

        let mut index = ShardIndex::new();
        for (class, set) in sets.into_iter().enumerate() {
            index.set_state(class, ShardState::Ready(set));
        }

        Self {
            corpus_dir: PathBuf::new(),
            cache: Mutex::new(LruCache::new(4096)),
            filter,
            seed: FxHashSet::default(),
            shards: RwLock::new(index),
        }
    }

    /// Stream the remaining shards in on the current tokio runtime.
    ///
    /// Returns a handle that resolves once every shard has been attempted.
    /// Failures are absorbed: the shard is logged and left NotLoaded.
    pub fn spawn_background_load(self: std::sync::Arc<Self>) -> JoinHandle<()> {
        let service = self;
        tokio::spawn(async move {
            for class in 0..SHARD_CLASS_COUNT {
                if service.shards.read().await.state(class).is_ready() {
                    continue;
                }
                if let Err(err) = service.load_shard(class).await {
                    log::warn!("background load of shard {class} failed: {err:#}");
                }
            }
            let ready = service.shards.read().await.ready_count();
            log::info!("shard loading finished: {ready}/{SHARD_CLASS_COUNT} ready");
        })
    }

    /// Load one shard's word set and publish it.
    ///
    /// The set is built off to the side and swapped in with a single write,
    /// so concurrent queries observe either the old state or the finished
    /// shard, never a half-built one.
    pub async fn load_shard(&self, class: usize) -> Result<()> {
        self.shards
            .write()
            .await
            .set_state(class, ShardState::Loading);

        let path = shard_file_path(&self.corpus_dir, class);
        let loaded = tokio::task::spawn_blocking(move || shard::load_word_file(&path)).await;

        match loaded {
            Ok(Ok(set)) => {
                log::debug!("shard {class} ready: {} words", set.len());
                self.shards
                    .write()
                    .await
                    .set_state(class, ShardState::Ready(set));
                Ok(())
            }
            Ok(Err(err)) => {
                self.shards
                    .write()
                    .await
                    .set_state(class, ShardState::NotLoaded);
                Err(err)
            }
            Err(join_err) => {
                self.shards
                    .write()
                    .await
                    .set_state(class, ShardState::NotLoaded);
                Err(anyhow::anyhow!("shard loader task failed: {join_err}"))
            }
        }
    }

    /// Drop a shard's set under memory pressure.
    ///
    /// Lookups for its class degrade to tier-2 confidence until
    /// [`load_shard`] brings it back; committed cache entries are untouched,
    /// so earlier authoritative answers keep being served.
    ///
    /// [`load_shard`]: DictionaryService::load_shard
    pub async fn release_shard(&self, class: usize) {
        let mut shards = self.shards.write().await;
        if shards.state(class).is_ready() {
            shards.set_state(class, ShardState::NotLoaded);
            log::debug!("shard {class} released");
        }
    }

    /// Number of shards currently resident
    pub async fn ready_shard_count(&self) -> usize {
        self.shards.read().await.ready_count()
    }

    /// Is the given string a dictionary word?
    ///
    /// Malformed queries (shorter than two syllables, or containing anything
    /// outside the syllable range) are invalid without touching any tier.
    /// Authoritative answers are committed to the cache before returning; a
    /// tentative answer for a not-yet-loaded shard is returned uncached so
    /// the class becomes authoritative once its shard arrives.
    pub async fn is_valid(&self, word: &str) -> bool {
        if word.chars().count() < 2 || !hangul::is_well_formed(word) {
            return false;
        }

        if let Some(hit) = self.cache_get(word) {
            return hit;
        }

        if !self.filter.might_contain(word) {
            self.cache_put(word, false);
            return false;
        }

        if self.seed.contains(word) {
            self.cache_put(word, true);
            return true;
        }

        match self.shards.read().await.lookup(word) {
            ShardAnswer::Present => {
                self.cache_put(word, true);
                true
            }
            ShardAnswer::Absent => {
                self.cache_put(word, false);
                false
            }
            // Tier-2-only confidence: the filter said "maybe" and nothing
            // authoritative is resident yet
            ShardAnswer::Unavailable => true,
        }
    }

    /// Prefix/substring suggestions over the resident corpus. Auxiliary.
    pub async fn suggest_words(&self, pattern: &str, limit: usize) -> Vec<String> {
        let mut out = self.shards.read().await.suggest(pattern, limit);
        if out.len() < limit && !pattern.is_empty() {
            let mut extra: Vec<&String> = self
                .seed
                .iter()
                .filter(|w| w.contains(pattern) && !out.contains(*w))
                .collect();
            extra.sort();
            out.extend(
                extra
                    .into_iter()
                    .take(limit - out.len())
                    .cloned(),
            );
        }
        out
    }

    /// Committed outcomes currently cached
    pub fn cached_count(&self) -> usize {
        self.cache.lock().expect("cache lock poisoned").len()
    }

    fn cache_get(&self, word: &str) -> Option<bool> {
        self.cache.lock().expect("cache lock poisoned").get(word)
    }

    fn cache_put(&self, word: &str, value: bool) {
        self.cache
            .lock()
            .expect("cache lock poisoned")
            .insert(word, value);
    }
}

impl std::fmt::Debug for DictionaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryService")
            .field("corpus_dir", &self.corpus_dir)
            .field("seed_words", &self.seed.len())
            .field("filter_bytes", &self.filter.byte_size())
            .finish()
    }
}
