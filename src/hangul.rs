//! Hangul syllable helpers
//!
//! The dictionary only deals in complete syllable blocks (U+AC00..=U+D7A3).
//! A syllable's leading consonant (choseong) is recovered arithmetically from
//! its code point and folded into one of 14 basic consonant classes, which
//! key the corpus shards. Tense doubles (ㄲ ㄸ ㅃ ㅆ ㅉ) share the shard of
//! their base consonant; anything that is not a syllable block falls into the
//! catch-all class.

/// First code point of the Hangul syllable block range
const SYLLABLE_BASE: u32 = 0xAC00;
/// Last code point of the Hangul syllable block range
const SYLLABLE_LAST: u32 = 0xD7A3;
/// Syllables per choseong (21 jungseong x 28 jongseong)
const SYLLABLES_PER_CHOSEONG: u32 = 588;

/// Number of shard classes: 14 basic leading consonants plus a catch-all
pub const SHARD_CLASS_COUNT: usize = 15;

/// Index of the catch-all shard class
pub const SHARD_CLASS_MISC: usize = 14;

/// Compatibility jamo labels for the 14 basic classes, in class order
const CLASS_JAMO: [&str; 14] = [
    "ㄱ", "ㄴ", "ㄷ", "ㄹ", "ㅁ", "ㅂ", "ㅅ", "ㅇ", "ㅈ", "ㅊ", "ㅋ", "ㅌ", "ㅍ", "ㅎ",
];

/// Basic-class index per choseong index (0..19), folding tense doubles
const CHOSEONG_CLASS: [usize; 19] = [
    0, 0, // ㄱ ㄲ
    1, // ㄴ
    2, 2, // ㄷ ㄸ
    3, // ㄹ
    4, // ㅁ
    5, 5, // ㅂ ㅃ
    6, 6, // ㅅ ㅆ
    7, // ㅇ
    8, 8, // ㅈ ㅉ
    9, // ㅊ
    10, // ㅋ
    11, // ㅌ
    12, // ㅍ
    13, // ㅎ
];

/// Check whether a character is a complete Hangul syllable block
pub fn is_syllable(ch: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(ch as u32))
}

/// Check whether every character of a word is a syllable block.
/// Empty strings are not well-formed.
pub fn is_well_formed(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_syllable)
}

/// Choseong index (0..19) of a syllable block, or None for anything else
pub fn choseong_index(ch: char) -> Option<usize> {
    if !is_syllable(ch) {
        return None;
    }
    Some(((ch as u32 - SYLLABLE_BASE) / SYLLABLES_PER_CHOSEONG) as usize)
}

/// Shard class (0..SHARD_CLASS_COUNT) for a syllable, catch-all otherwise
pub fn shard_class(ch: char) -> usize {
    match choseong_index(ch) {
        Some(idx) => CHOSEONG_CLASS[idx],
        None => SHARD_CLASS_MISC,
    }
}

/// Shard class of a word, keyed by its first character
pub fn shard_class_of_word(word: &str) -> usize {
    match word.chars().next() {
        Some(ch) => shard_class(ch),
        None => SHARD_CLASS_MISC,
    }
}

/// Label for a shard class, used in shard file names
pub fn class_label(class: usize) -> &'static str {
    if class < CLASS_JAMO.len() {
        CLASS_JAMO[class]
    } else {
        "etc"
    }
}
