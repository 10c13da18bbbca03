use std::collections::VecDeque;

use crate::engine::{Board, BoardError};
use crate::tiles::{Tile, TileId, TileLayer};

/// Number of snapshots kept when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("nothing to undo")]
    Empty,
}

/// Immutable copy of a game position taken before a committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    size: usize,
    tiles: Vec<Tile>,
    score: u64,
    next_tile_id: TileId,
}

impl Snapshot {
    pub fn capture(board: &Board, layer: &TileLayer) -> Self {
        Snapshot {
            size: board.size(),
            tiles: layer.tiles(board),
            score: board.score(),
            next_tile_id: layer.next_id(),
        }
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] { &self.tiles }

    #[inline]
    pub fn score(&self) -> u64 { self.score }

    #[inline]
    pub fn next_tile_id(&self) -> TileId { self.next_tile_id }

    /// The board this snapshot describes.
    pub fn board(&self) -> Result<Board, BoardError> {
        let mut board = Board::new(self.size)?.with_score(self.score);
        for t in &self.tiles {
            board.set(t.x, t.y, t.value)?;
        }
        Ok(board)
    }
}

/// Bounded undo stack. The oldest snapshot is dropped silently on overflow.
///
/// ```
/// use duel_2048::engine::Board;
/// use duel_2048::history::{History, HistoryError, Snapshot};
/// use duel_2048::tiles::TileLayer;
/// let b = Board::from_rows(&[vec![2, 0], vec![0, 0]]).unwrap();
/// let mut h = History::new(2);
/// for _ in 0..5 {
///     h.snapshot(Snapshot::capture(&b, &TileLayer::adopt(&b, 0)));
/// }
/// assert_eq!(h.len(), 2);
/// assert!(h.undo().is_ok());
/// assert!(h.undo().is_ok());
/// assert_eq!(h.undo(), Err(HistoryError::Empty));
/// ```
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self { Self { entries: VecDeque::with_capacity(capacity), capacity } }

    /// Push a snapshot, evicting the oldest beyond capacity.
    pub fn snapshot(&mut self, snap: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(snap);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Pop the most recent snapshot.
    pub fn undo(&mut self) -> Result<Snapshot, HistoryError> { self.entries.pop_back().ok_or(HistoryError::Empty) }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline]
    pub fn capacity(&self) -> usize { self.capacity }

    pub fn clear(&mut self) { self.entries.clear(); }
}

impl Default for History {
    fn default() -> Self { Self::new(DEFAULT_CAPACITY) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(value: u64) -> Board { Board::from_rows(&[vec![value, 0], vec![0, 0]]).unwrap() }

    #[test]
    fn lifo_with_fifo_eviction() {
        let mut h = History::default();
        for i in 1..=12u32 {
            let b = board_with(1 << i).with_score(i as u64);
            h.snapshot(Snapshot::capture(&b, &TileLayer::adopt(&b, 0)));
            assert!(h.len() <= DEFAULT_CAPACITY);
        }
        assert_eq!(h.undo().unwrap().score(), 12);
        assert_eq!(h.undo().unwrap().score(), 11);
        let mut last = 0;
        while let Ok(s) = h.undo() {
            last = s.score();
        }
        // 1 and 2 were evicted
        assert_eq!(last, 3);
    }

    #[test]
    fn snapshot_round_trips_board() {
        let b = Board::from_rows(&[vec![2, 0, 8], vec![0, 4, 0], vec![16, 0, 0]]).unwrap().with_score(40);
        let layer = TileLayer::adopt(&b, 5);
        let snap = Snapshot::capture(&b, &layer);
        assert_eq!(snap.board().unwrap(), b);
        assert_eq!(snap.next_tile_id(), 9);
        assert_eq!(snap.tiles().len(), 4);
    }

    #[test]
    fn empty_history_reports_nothing_to_undo() {
        let mut h = History::new(3);
        assert!(h.is_empty());
        assert_eq!(h.undo().unwrap_err().to_string(), "nothing to undo");
    }
}
