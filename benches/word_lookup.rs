use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hangul_blocks::core::{Block, Grid, ShapeKind};
use hangul_blocks::dict::DictionaryService;
use hangul_blocks::engine::detect_words;
use hangul_blocks::types::BlockColor;

/// Synthetic corpus of two-syllable words spanning several shard classes
fn corpus() -> Vec<String> {
    let firsts = ['가', '나', '다', '라', '마', '바', '사', '자', '하'];
    let seconds = ['가', '나', '다', '리', '무', '보', '수', '지', '호'];
    let mut words = Vec::new();
    for a in firsts {
        for b in seconds {
            words.push(format!("{a}{b}"));
        }
    }
    words
}

fn bench_is_valid_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dict = DictionaryService::from_words(corpus());

    c.bench_function("is_valid_cached_hit", |b| {
        b.iter(|| rt.block_on(dict.is_valid(black_box("가나"))))
    });
}

fn bench_is_valid_filter_reject(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dict = DictionaryService::from_words(corpus());

    c.bench_function("is_valid_filter_reject", |b| {
        b.iter(|| rt.block_on(dict.is_valid(black_box("끝말잇"))))
    });
}

fn bench_detect_words_full_row(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dict = DictionaryService::from_words(corpus());

    let mut grid = Grid::new();
    let chars = ['가', '나', '다', '리', '무', '보', '수', '지', '호', '가'];
    for (i, ch) in chars.into_iter().enumerate() {
        let block = Block::new(i as u32 + 1, ShapeKind::One, &[ch], BlockColor::Red);
        grid.place(&block, 0, i as i8).unwrap();
    }

    c.bench_function("detect_words_full_row", |b| {
        b.iter(|| rt.block_on(detect_words(black_box(&grid), &dict)))
    });
}

criterion_group!(
    benches,
    bench_is_valid_hit,
    bench_is_valid_filter_reject,
    bench_detect_words_full_row
);
criterion_main!(benches);
