use serde::{Deserialize, Serialize};

use crate::engine::Board;

/// Weights combining score gain, empty cells, monotonicity and smoothness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub score_gain: f64,
    pub empty: f64,
    pub monotonicity: f64,
    pub smoothness: f64,
}

impl Weights {
    /// Advising a human player.
    pub const HINT: Weights = Weights { score_gain: 1.0, empty: 10.0, monotonicity: 5.0, smoothness: 3.0 };
    /// Opponent lookahead at normal difficulty.
    pub const LOOKAHEAD: Weights = Weights { score_gain: 1.0, empty: 150.0, monotonicity: 10.0, smoothness: 8.0 };
    /// Opponent lookahead at hard difficulty.
    pub const HARD: Weights = Weights { score_gain: 1.0, empty: 200.0, monotonicity: 25.0, smoothness: 10.0 };
    /// Easy/medium opponent, no smoothness term.
    pub const SHALLOW: Weights = Weights { score_gain: 1.0, empty: 10.0, monotonicity: 5.0, smoothness: 0.0 };
}

/// Composite heuristic for a board reached with `score_gain`. Higher is better.
#[inline]
pub fn evaluate(board: &Board, score_gain: u64, w: &Weights) -> f64 {
    let mut score = score_gain as f64 * w.score_gain
        + empty_cells(board) as f64 * w.empty
        + monotonicity(board) as f64 * w.monotonicity;
    // shallow profiles carry no smoothness term
    if w.smoothness != 0.0 {
        score += smoothness(board) * w.smoothness;
    }
    score
}

#[inline]
pub fn empty_cells(board: &Board) -> usize { board.count_empty() }

/// Sum over rows and columns of `max(#increasing pairs, #decreasing pairs)`.
///
/// Empty cells take part as zeros.
pub fn monotonicity(board: &Board) -> u32 {
    let n = board.size();
    let cells = board.exponents();
    let mut total = 0;
    for line in 0..n {
        total += line_monotonicity((0..n).map(|i| cells[line * n + i]));
        total += line_monotonicity((0..n).map(|i| cells[i * n + line]));
    }
    total
}

fn line_monotonicity<I: Iterator<Item = u8>>(mut line: I) -> u32 {
    let Some(mut prev) = line.next() else { return 0 };
    let (mut inc, mut dec) = (0, 0);
    for cur in line {
        if cur > prev {
            inc += 1;
        } else if cur < prev {
            dec += 1;
        }
        prev = cur;
    }
    inc.max(dec)
}

/// Negated sum of `|log2 a - log2 b|` over orthogonal pairs of non-empty cells.
///
/// Always `<= 0`.
pub fn smoothness(board: &Board) -> f64 {
    let n = board.size();
    let cells = board.exponents();
    let mut penalty = 0u32;
    for y in 0..n {
        for x in 0..n {
            let e = cells[y * n + x];
            if e == 0 {
                continue;
            }
            if x + 1 < n && cells[y * n + x + 1] != 0 {
                penalty += e.abs_diff(cells[y * n + x + 1]) as u32;
            }
            if y + 1 < n && cells[(y + 1) * n + x] != 0 {
                penalty += e.abs_diff(cells[(y + 1) * n + x]) as u32;
            }
        }
    }
    -(penalty as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u64; 4]; 4]) -> Board {
        let rows: Vec<Vec<u64>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn empty_board_terms() {
        let b = Board::new(4).unwrap();
        assert_eq!(empty_cells(&b), 16);
        assert_eq!(monotonicity(&b), 0);
        assert_eq!(smoothness(&b), 0.0);
    }

    #[test]
    fn it_monotonicity() {
        let b = board(&[[2, 4, 8, 16], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        // row 0: 3 increasing; columns 0..4: one decreasing pair each
        assert_eq!(monotonicity(&b), 3 + 4);
        let zigzag = board(&[[2, 8, 2, 8], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(monotonicity(&zigzag), 2 + 4);
    }

    #[test]
    fn it_smoothness_skips_empty() {
        let b = board(&[[2, 8, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(smoothness(&b), -2.0);
        let b = board(&[[2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(smoothness(&b), -1.0);
    }

    #[test]
    fn profiles_score_differently() {
        let b = board(&[[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mono = monotonicity(&b) as f64;
        assert_eq!(evaluate(&b, 4, &Weights::HINT), 4.0 + 14.0 * 10.0 + mono * 5.0 - 3.0);
        assert_eq!(evaluate(&b, 4, &Weights::LOOKAHEAD), 4.0 + 14.0 * 150.0 + mono * 10.0 - 8.0);
        assert_eq!(evaluate(&b, 4, &Weights::SHALLOW), 4.0 + 14.0 * 10.0 + mono * 5.0);
        assert_eq!(evaluate(&b, 0, &Weights::HARD), 14.0 * 200.0 + mono * 25.0 - 10.0);
    }
}
