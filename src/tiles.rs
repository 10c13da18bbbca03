//! Tile identity for renderers.
//!
//! The engine works on bare values; [`TileLayer`] rides alongside a board and
//! names each occupant so a presentation layer can follow tiles across moves.
//! Only the commit path touches it. Search never does.

use crate::engine::{exponent_to_value, Board, CellEvent, Move, MoveResult, Spawn};

pub type TileId = u64;

/// An identity-bearing occupant of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub value: u64,
    pub x: usize,
    pub y: usize,
}

/// What happened to a tile during a committed move or spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    Slid { id: TileId, from: (usize, usize), to: (usize, usize) },
    /// Two tiles replaced by a fresh one. `from` holds the moving tile first.
    Merged { id: TileId, from: [TileId; 2], at: (usize, usize), value: u64 },
    Spawned { id: TileId, at: (usize, usize), value: u64 },
}

/// Per-cell ids parallel to a board, plus the id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    size: usize,
    ids: Vec<Option<TileId>>,
    next_id: TileId,
}

impl TileLayer {
    pub fn new(size: usize) -> Self { Self { size, ids: vec![None; size * size], next_id: 0 } }

    /// Give every occupied cell of `board` a fresh id.
    pub fn adopt(board: &Board, first_id: TileId) -> Self {
        let mut layer = Self { size: board.size(), ids: vec![None; board.size() * board.size()], next_id: first_id };
        for (idx, &e) in board.exponents().iter().enumerate() {
            if e != 0 {
                layer.ids[idx] = Some(layer.fresh_id());
            }
        }
        layer
    }

    /// Rebuild from explicit `(id, x, y)` placements, keeping `next_id`
    /// ahead of every id handed out so far.
    pub fn restore<I: IntoIterator<Item = (TileId, usize, usize)>>(size: usize, tiles: I, next_id: TileId) -> Self {
        let mut layer = Self::new(size);
        layer.next_id = next_id;
        for (id, x, y) in tiles {
            if x < size && y < size {
                layer.ids[y * size + x] = Some(id);
                layer.next_id = layer.next_id.max(id + 1);
            }
        }
        layer
    }

    #[inline]
    pub fn next_id(&self) -> TileId { self.next_id }

    #[inline]
    pub fn id_at(&self, x: usize, y: usize) -> Option<TileId> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.ids[y * self.size + x]
    }

    /// All tiles of `board` with their ids, row-major.
    pub fn tiles(&self, board: &Board) -> Vec<Tile> {
        board
            .exponents()
            .iter()
            .enumerate()
            .filter_map(|(idx, &e)| {
                let id = self.ids.get(idx).copied().flatten()?;
                (e != 0).then(|| Tile { id, value: exponent_to_value(e), x: idx % self.size, y: idx / self.size })
            })
            .collect()
    }

    /// Apply `dir` to `board` and carry identities along.
    ///
    /// The returned [`MoveResult`] is exactly `board.shift(dir)`; events are
    /// empty when nothing moved.
    pub fn commit(&mut self, board: &Board, dir: Move) -> (MoveResult, Vec<TileEvent>) {
        let size = self.size;
        let pos = |idx: usize| (idx % size, idx / size);
        let mut events = Vec::new();
        let result = board.shift_with(dir, |ev| match ev {
            CellEvent::Slide { from, to } => {
                if let Some(id) = self.ids[from].take() {
                    self.ids[to] = Some(id);
                    events.push(TileEvent::Slid { id, from: pos(from), to: pos(to) });
                }
            }
            CellEvent::Merge { from, into, exponent } => {
                let moving = self.ids[from].take();
                let resting = self.ids[into].take();
                let id = self.next_id;
                self.next_id += 1;
                self.ids[into] = Some(id);
                if let (Some(a), Some(b)) = (moving, resting) {
                    events.push(TileEvent::Merged { id, from: [a, b], at: pos(into), value: exponent_to_value(exponent) });
                }
            }
        });
        (result, events)
    }

    /// Name a tile just placed on the board.
    pub fn spawn(&mut self, spawn: Spawn) -> TileEvent {
        let id = self.fresh_id();
        self.ids[spawn.y * self.size + spawn.x] = Some(id);
        TileEvent::Spawned { id, at: (spawn.x, spawn.y), value: spawn.value }
    }

    fn fresh_id(&mut self) -> TileId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
