//! Word finder - scans the grid for dictionary words
//!
//! Walks every row and then every column of a read-only grid snapshot. From
//! each non-empty cell a run extends while cells stay contiguous and
//! non-empty, and every accumulated substring of two or more syllables is
//! queried against the dictionary. All validated candidates are reported:
//! one run can yield several overlapping words, and a cell covered by two
//! words is awarded twice when the pass is applied.

use crate::core::scoring::word_score;
use crate::core::Grid;
use crate::dict::DictionaryService;
use crate::types::{Coord, Word};

/// Detect every dictionary word currently formed on the grid.
///
/// The grid is only read; mutation is the caller's removal transaction,
/// applied once after both axis scans finish against the same snapshot.
pub async fn detect_words(grid: &Grid, dict: &DictionaryService) -> Vec<Word> {
    let mut words = Vec::new();

    for row in 0..grid.rows() as i8 {
        let line: Vec<Coord> = (0..grid.cols() as i8).map(|col| (row, col)).collect();
        scan_line(grid, dict, &line, &mut words).await;
    }

    for col in 0..grid.cols() as i8 {
        let line: Vec<Coord> = (0..grid.rows() as i8).map(|row| (row, col)).collect();
        scan_line(grid, dict, &line, &mut words).await;
    }

    words
}

/// Scan one line of coordinates for validated substrings
async fn scan_line(grid: &Grid, dict: &DictionaryService, line: &[Coord], out: &mut Vec<Word>) {
    for start in 0..line.len() {
        let (row, col) = line[start];
        let Some(first) = grid.get(row, col).and_then(|cell| cell.ch) else {
            continue;
        };

        let mut text = String::new();
        text.push(first);
        let mut cells = vec![line[start]];

        for &(row, col) in &line[start + 1..] {
            // An empty cell ends every run through this start
            let Some(ch) = grid.get(row, col).and_then(|cell| cell.ch) else {
                break;
            };
            text.push(ch);
            cells.push((row, col));

            if dict.is_valid(&text).await {
                out.push(Word {
                    text: text.clone(),
                    cells: cells.clone(),
                    score: word_score(cells.len()),
                });
            }
        }
    }
}
