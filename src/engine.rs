use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions in search order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Position of this direction in [`Move::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }

    /// Unit vector `(dx, dy)` with `y` growing downwards.
    #[inline]
    pub fn vector(self) -> (isize, isize) {
        match self {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Move {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            other => Err(BoardError::Parse(other.to_string())),
        }
    }
}

/// Smallest supported edge length.
pub const MIN_SIZE: usize = 2;
/// Largest supported edge length.
pub const MAX_SIZE: usize = 16;
/// Edge length used when nothing else is configured.
pub const DEFAULT_SIZE: usize = 4;

/// Largest exponent a cell can hold (tile `2^63`). Two such tiles never merge.
pub const MAX_EXPONENT: u8 = 63;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROB: f64 = 0.9;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {size} outside 2..=16")]
    InvalidSize { size: usize },
    #[error("row has {found} cells, expected {expected}")]
    RaggedRows { expected: usize, found: usize },
    #[error("cell value {value} is not empty or a power of two >= 2")]
    NotPowerOfTwo { value: u64 },
    #[error("cell exponent {exponent} is above 63")]
    InvalidExponent { exponent: u8 },
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("cannot parse {0:?}")]
    Parse(String),
}

/// Square 2048 grid with a running score.
///
/// Cells hold exponents: `0` is empty, `k` is the tile `2^k`. Coordinates are
/// `(x, y)` with `x` the column and `y` the row, `(0, 0)` top-left.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
    score: u64,
}

/// Outcome of sliding a board in one direction.
///
/// `moved` is the legality test: when false, `board` equals the input and
/// `score_gain` is zero, and the caller must not spawn or record history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub moved: bool,
    pub score_gain: u64,
    /// Tiles the caller must spawn before the next move (1 when moved).
    pub spawns_needed: u8,
}

/// A tile placed by [`Board::spawn_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub x: usize,
    pub y: usize,
    pub value: u64,
}

/// Per-cell effect of a move, in board indices. Emitted in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellEvent {
    Slide { from: usize, to: usize },
    Merge { from: usize, into: usize, exponent: u8 },
}

impl Board {
    /// An empty board of the given edge length.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        Ok(Board { size, cells: vec![0; size * size], score: 0 })
    }

    /// Build a board from rows of tile values (0 = empty).
    ///
    /// ```
    /// use duel_2048::engine::Board;
    /// let b = Board::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(b.get(1, 1), 4);
    /// assert_eq!(b.count_empty(), 2);
    /// ```
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut board = Board::new(size)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(BoardError::RaggedRows { expected: size, found: row.len() });
            }
            for (x, &value) in row.iter().enumerate() {
                board.cells[y * size + x] = value_to_exponent(value)?;
            }
        }
        Ok(board)
    }

    /// Build a board from raw exponent cells in row-major order.
    pub fn from_exponents(size: usize, cells: &[u8], score: u64) -> Result<Self, BoardError> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(BoardError::RaggedRows { expected: size * size, found: cells.len() });
        }
        if let Some(&bad) = cells.iter().find(|&&e| e > MAX_EXPONENT) {
            return Err(BoardError::InvalidExponent { exponent: bad });
        }
        Ok(Board { size, cells: cells.to_vec(), score })
    }

    /// Same cells, different running score.
    #[inline]
    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    /// Sum of every merge result since the game started.
    #[inline]
    pub fn score(&self) -> u64 { self.score }

    /// Raw exponent cells, row-major.
    #[inline]
    pub fn exponents(&self) -> &[u8] { &self.cells }

    /// Tile value at `(x, y)`, 0 if empty or out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u64 {
        if x >= self.size || y >= self.size {
            return 0;
        }
        exponent_to_value(self.cells[y * self.size + x])
    }

    /// Tile value at a row-major index.
    #[inline]
    pub fn tile_value(&self, idx: usize) -> u64 { exponent_to_value(self.cells[idx]) }

    /// Put a tile value (0 clears) at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: u64) -> Result<(), BoardError> {
        if x >= self.size || y >= self.size {
            return Err(BoardError::OutOfBounds { x, y });
        }
        self.cells[y * self.size + x] = value_to_exponent(value)?;
        Ok(())
    }

    /// Board values as rows, handy for printing and assertions.
    pub fn rows(&self) -> Vec<Vec<u64>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&e| exponent_to_value(e)).collect())
            .collect()
    }

    #[inline]
    pub fn count_empty(&self) -> usize { self.cells.iter().filter(|&&e| e == 0).count() }

    /// Empty cells as `(x, y)`, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &e)| e == 0)
            .map(|(i, _)| (i % self.size, i / self.size))
            .collect()
    }

    /// Highest tile value on the board (0 for an empty board).
    pub fn highest_tile(&self) -> u64 {
        self.cells.iter().copied().max().map(exponent_to_value).unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 { self.cells.iter().map(|&e| exponent_to_value(e)).sum() }

    /// Slide/merge tiles in `dir`. Pure: `self` is untouched.
    ///
    /// ```
    /// use duel_2048::engine::{Board, Move};
    /// let b = Board::from_rows(&[
    ///     vec![2, 2, 4, 0],
    ///     vec![0, 0, 0, 0],
    ///     vec![0, 0, 0, 0],
    ///     vec![0, 0, 0, 0],
    /// ]).unwrap();
    /// let r = b.shift(Move::Left);
    /// assert!(r.moved);
    /// assert_eq!(r.score_gain, 4);
    /// assert_eq!(r.board.rows()[0], vec![4, 4, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(&self, dir: Move) -> MoveResult { self.shift_with(dir, |_| {}) }

    /// Slide/merge while reporting every cell change to `sink`.
    pub(crate) fn shift_with<F: FnMut(CellEvent)>(&self, dir: Move, mut sink: F) -> MoveResult {
        let mut next = self.clone();
        let mut gain = 0u64;
        let mut moved = false;
        let mut indices = [0usize; MAX_SIZE];
        let mut line = [0u8; MAX_SIZE];
        for line_idx in 0..self.size {
            for (pos, slot) in indices.iter_mut().take(self.size).enumerate() {
                *slot = line_index(self.size, dir, line_idx, pos);
            }
            for pos in 0..self.size {
                line[pos] = next.cells[indices[pos]];
            }
            let (line_gain, line_moved) = slide_line(&mut line[..self.size], |ev| {
                sink(match ev {
                    LineEvent::Slide { from, to } => CellEvent::Slide { from: indices[from], to: indices[to] },
                    LineEvent::Merge { from, into, exponent } => {
                        CellEvent::Merge { from: indices[from], into: indices[into], exponent }
                    }
                })
            });
            for pos in 0..self.size {
                next.cells[indices[pos]] = line[pos];
            }
            gain = gain.saturating_add(line_gain);
            moved |= line_moved;
        }
        if !moved {
            return MoveResult { board: self.clone(), moved: false, score_gain: 0, spawns_needed: 0 };
        }
        next.score = next.score.saturating_add(gain);
        MoveResult { board: next, moved, score_gain: gain, spawns_needed: 1 }
    }

    /// Place a random 2 (90%) or 4 (10%) on a random empty cell, using the provided RNG.
    ///
    /// Returns `None` and leaves the board unchanged when it is full.
    pub fn spawn_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Spawn> {
        let empty = self.count_empty();
        if empty == 0 {
            return None;
        }
        let mut nth = rng.gen_range(0..empty);
        let exponent = generate_random_exponent(rng);
        let idx = self
            .cells
            .iter()
            .position(|&e| {
                if e != 0 {
                    return false;
                }
                if nth == 0 {
                    return true;
                }
                nth -= 1;
                false
            })?;
        self.cells[idx] = exponent;
        Some(Spawn { x: idx % self.size, y: idx / self.size, value: exponent_to_value(exponent) })
    }

    /// Like [`Board::spawn_one`] but by value, for chaining.
    ///
    /// ```
    /// use duel_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::new(4).unwrap().with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.spawn_one(rng);
        self
    }

    /// Place a tile by exponent at a known-empty index. Search-only helper.
    #[inline]
    pub(crate) fn with_exponent_at(&self, idx: usize, exponent: u8) -> Self {
        let mut b = self.clone();
        b.cells[idx] = exponent;
        b
    }

    /// True iff the board is full and no two orthogonal neighbours are equal.
    #[inline]
    pub fn is_game_over(&self) -> bool { is_game_over(self) }
}

/// A fresh board of `size` with two random tiles.
///
/// ```
/// use duel_2048::engine::new_board;
/// use rand::{SeedableRng, rngs::StdRng};
/// let b = new_board(5, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(b.count_empty(), 23);
/// assert_eq!(b.score(), 0);
/// ```
pub fn new_board<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Board, BoardError> {
    Ok(Board::new(size)?.with_random_tile(rng).with_random_tile(rng))
}

/// Slide/merge tiles in the given direction. No randomness.
#[inline]
pub fn shift(board: &Board, direction: Move) -> MoveResult { board.shift(direction) }

/// True iff the board has no empty cell and no mergeable orthogonal neighbours.
pub fn is_game_over(board: &Board) -> bool {
    if board.cells.contains(&0) {
        return false;
    }
    let n = board.size;
    for y in 0..n {
        for x in 0..n {
            let e = board.cells[y * n + x];
            if e == MAX_EXPONENT {
                continue;
            }
            if x + 1 < n && board.cells[y * n + x + 1] == e {
                return false;
            }
            if y + 1 < n && board.cells[(y + 1) * n + x] == e {
                return false;
            }
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEvent {
    Slide { from: usize, to: usize },
    Merge { from: usize, into: usize, exponent: u8 },
}

/// Row-major index of the `pos`-th cell of a line, counted from the wall `dir` points at.
#[inline]
fn line_index(size: usize, dir: Move, line: usize, pos: usize) -> usize {
    match dir {
        Move::Left => line * size + pos,
        Move::Right => line * size + (size - 1 - pos),
        Move::Up => pos * size + line,
        Move::Down => (size - 1 - pos) * size + line,
    }
}

/// Compress one line towards index 0, merging each tile at most once.
///
/// Cells nearest the wall are visited first so a merged tile is already in
/// place (and flagged) before anything behind it arrives.
fn slide_line<F: FnMut(LineEvent)>(line: &mut [u8], mut sink: F) -> (u64, bool) {
    let mut merged = [false; MAX_SIZE];
    let mut gain = 0u64;
    let mut moved = false;
    for i in 0..line.len() {
        let e = line[i];
        if e == 0 {
            continue;
        }
        let mut target = i;
        while target > 0 && line[target - 1] == 0 {
            target -= 1;
        }
        if target > 0 && line[target - 1] == e && !merged[target - 1] && e < MAX_EXPONENT {
            let into = target - 1;
            line[into] = e + 1;
            line[i] = 0;
            merged[into] = true;
            gain = gain.saturating_add(exponent_to_value(e + 1));
            moved = true;
            sink(LineEvent::Merge { from: i, into, exponent: e + 1 });
        } else if target != i {
            line[target] = e;
            line[i] = 0;
            moved = true;
            sink(LineEvent::Slide { from: i, to: target });
        }
    }
    (gain, moved)
}

fn generate_random_exponent<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    if rng.gen_bool(SPAWN_TWO_PROB) { 1 } else { 2 }
}

#[inline]
pub(crate) fn exponent_to_value(e: u8) -> u64 {
    if e == 0 { 0 } else { 1u64 << e }
}

fn value_to_exponent(value: u64) -> Result<u8, BoardError> {
    match value {
        0 => Ok(0),
        v if v >= 2 && v.is_power_of_two() => Ok(v.trailing_zeros() as u8),
        v => Err(BoardError::NotPowerOfTwo { value: v }),
    }
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::InvalidSize { size })
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Rows separated by `;` or newlines, cells by `,` or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(|c| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| {
                r.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|t| !t.is_empty())
                    .map(|t| t.parse::<u64>().map_err(|_| BoardError::Parse(t.to_string())))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_rows(&rows)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{}, score={}, {:?})", self.size, self.size, self.score, self.rows())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8 - 1);
        for (y, row) in self.cells.chunks(self.size).enumerate() {
            if y > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|&e| format_val(e)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(e: u8) -> String {
    match e {
        0 => " ".repeat(7),
        e => format!("{:^7}", exponent_to_value(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn row_board(row: [u64; 4]) -> Board {
        Board::from_rows(&[row.to_vec(), vec![0; 4], vec![0; 4], vec![0; 4]]).unwrap()
    }

    fn line(v: &[u8]) -> (Vec<u8>, u64, bool) {
        let mut v = v.to_vec();
        let (gain, moved) = slide_line(&mut v, |_| {});
        (v, gain, moved)
    }

    #[test]
    fn it_slide_line() {
        assert_eq!(line(&[0, 0, 0, 0]), (vec![0, 0, 0, 0], 0, false));
        assert_eq!(line(&[1, 2, 1, 2]), (vec![1, 2, 1, 2], 0, false));
        assert_eq!(line(&[1, 1, 2, 2]), (vec![2, 3, 0, 0], 12, true));
        assert_eq!(line(&[1, 0, 0, 1]), (vec![2, 0, 0, 0], 4, true));
        assert_eq!(line(&[0, 0, 0, 3]), (vec![3, 0, 0, 0], 0, true));
    }

    #[test]
    fn merged_tile_does_not_merge_again() {
        // 2 2 4 -> 4 4, not 8
        assert_eq!(line(&[1, 1, 2, 0]), (vec![2, 2, 0, 0], 4, true));
        assert_eq!(line(&[1, 1, 1, 1]), (vec![2, 2, 0, 0], 8, true));
    }

    #[test]
    fn top_tiles_stay_put() {
        let top = 1u64 << MAX_EXPONENT;
        let b = Board::from_rows(&[vec![top, top], vec![0, 0]]).unwrap();
        let r = b.shift(Move::Left);
        assert!(!r.moved);
        assert_eq!(r.board, b);
        // below the cap they still merge
        assert_eq!(line(&[62, 62]), (vec![63, 0], top, true));
        assert!(b.shift(Move::Down).moved);
        let stuck = Board::from_rows(&[vec![top, top], vec![2, 4]]).unwrap();
        assert!(stuck.is_game_over());
    }

    #[test]
    fn score_saturates() {
        let b = row_board([2, 2, 0, 0]).with_score(u64::MAX - 1);
        let r = b.shift(Move::Left);
        assert!(r.moved);
        assert_eq!(r.score_gain, 4);
        assert_eq!(r.board.score(), u64::MAX);
    }

    #[test]
    fn scenario_rows_left() {
        let r = row_board([2, 2, 4, 0]).shift(Move::Left);
        assert_eq!(r.board.rows()[0], vec![4, 4, 0, 0]);
        assert_eq!((r.score_gain, r.moved), (4, true));

        let r = row_board([2, 0, 2, 2]).shift(Move::Left);
        assert_eq!(r.board.rows()[0], vec![4, 2, 0, 0]);
        assert_eq!(r.score_gain, 4);

        let r = row_board([2, 2, 2, 2]).shift(Move::Left);
        assert_eq!(r.board.rows()[0], vec![4, 4, 0, 0]);
        assert_eq!(r.score_gain, 8);
        assert_eq!(r.board.score(), 8);
    }

    #[test]
    fn shift_right_mirrors_left() {
        let r = row_board([2, 2, 2, 0]).shift(Move::Right);
        assert_eq!(r.board.rows()[0], vec![0, 0, 2, 4]);
        let r = row_board([4, 0, 0, 4]).shift(Move::Right);
        assert_eq!(r.board.rows()[0], vec![0, 0, 0, 8]);
    }

    #[test]
    fn test_move_up_and_down() {
        let b = Board::from_rows(&[
            vec![2, 0, 0, 4],
            vec![2, 0, 8, 0],
            vec![4, 0, 0, 4],
            vec![0, 2, 8, 4],
        ])
        .unwrap();
        let up = b.shift(Move::Up);
        assert_eq!(
            up.board.rows(),
            vec![vec![4, 2, 16, 8], vec![4, 0, 0, 4], vec![0, 0, 0, 0], vec![0, 0, 0, 0]]
        );
        assert_eq!(up.score_gain, 4 + 16 + 8);
        let down = b.shift(Move::Down);
        assert_eq!(
            down.board.rows(),
            vec![vec![0, 0, 0, 0], vec![0, 0, 0, 0], vec![4, 0, 0, 4], vec![4, 2, 16, 8]]
        );
    }

    #[test]
    fn no_op_move_returns_input() {
        let b = Board::from_rows(&[vec![2, 4], vec![8, 16]]).unwrap().with_score(12);
        for dir in [Move::Left, Move::Up] {
            let r = b.shift(dir);
            assert!(!r.moved);
            assert_eq!(r.board, b);
            assert_eq!(r.score_gain, 0);
            assert_eq!(r.spawns_needed, 0);
        }
    }

    #[test]
    fn events_track_cells() {
        let b = row_board([2, 0, 2, 4]);
        let mut events = Vec::new();
        b.shift_with(Move::Left, |e| events.push(e));
        assert_eq!(
            events,
            vec![
                CellEvent::Merge { from: 2, into: 0, exponent: 2 },
                CellEvent::Slide { from: 3, to: 1 },
            ]
        );
    }

    #[test]
    fn game_over_detection() {
        let open = Board::from_rows(&[
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 0],
        ])
        .unwrap();
        assert!(!open.is_game_over());
        let mut closed = open.clone();
        closed.set(3, 3, 8).unwrap();
        assert!(closed.is_game_over());
        closed.set(3, 3, 4).unwrap();
        assert!(!closed.is_game_over());
    }

    #[test]
    fn it_spawns_until_full() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut b = Board::new(4).unwrap();
        for _ in 0..16 {
            let s = b.spawn_one(&mut rng).unwrap();
            assert!(s.value == 2 || s.value == 4);
            assert_eq!(b.get(s.x, s.y), s.value);
        }
        assert_eq!(b.count_empty(), 0);
        assert!(b.spawn_one(&mut rng).is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Board::new(1).unwrap_err(), BoardError::InvalidSize { size: 1 });
        assert_eq!(
            Board::from_rows(&[vec![3, 0], vec![0, 0]]).unwrap_err(),
            BoardError::NotPowerOfTwo { value: 3 }
        );
        assert_eq!(
            Board::from_rows(&[vec![1, 0], vec![0, 0]]).unwrap_err(),
            BoardError::NotPowerOfTwo { value: 1 }
        );
        assert!(matches!(
            Board::from_rows(&[vec![2, 0, 0], vec![0, 0]]),
            Err(BoardError::RaggedRows { .. })
        ));
        let mut b = Board::new(2).unwrap();
        assert_eq!(b.set(2, 0, 2).unwrap_err(), BoardError::OutOfBounds { x: 2, y: 0 });
        assert_eq!(
            Board::from_exponents(2, &[64, 0, 0, 0], 0).unwrap_err(),
            BoardError::InvalidExponent { exponent: 64 }
        );
        assert!(Board::from_exponents(2, &[MAX_EXPONENT, 0, 0, 0], 0).is_ok());
    }

    #[test]
    fn parses_rows() {
        let b: Board = "2,2,4,0; 0 0 0 0;0,0,0,0\n0,0,0,8".parse().unwrap();
        assert_eq!(b.get(3, 3), 8);
        assert_eq!(b.get(2, 0), 4);
        assert!("2,x;0,0".parse::<Board>().is_err());
        assert_eq!("Left".parse::<Move>().unwrap(), Move::Left);
    }
}
