//! One player's game: the commit path around the pure engine.
//!
//! A [`Game`] owns its board, tile identities, undo history and spawn RNG.
//! Two games (human and opponent) share nothing and can be advanced from
//! different threads. Within one game, moves are serialized by the
//! "move in progress" flag: [`Game::play`] sets it, the caller clears it with
//! [`Game::settle`] once its own presentation has caught up.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::EngineConfig;
use crate::engine::{Board, BoardError, Move};
use crate::history::{History, HistoryError, Snapshot};
use crate::tiles::{Tile, TileEvent, TileLayer};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a move is still in progress")]
    MoveInFlight,
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Result of a committed (or rejected) move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub direction: Move,
    /// False for an illegal move: nothing was spawned or recorded.
    pub moved: bool,
    pub score_gain: u64,
    pub events: Vec<TileEvent>,
    /// Checked after the spawn.
    pub game_over: bool,
}

pub struct Game<R = StdRng> {
    board: Board,
    tiles: TileLayer,
    history: History,
    rng: R,
    move_in_progress: bool,
    over: bool,
}

impl Game<StdRng> {
    /// Game sized and seeded from `cfg`; `stream` separates boards sharing a seed.
    pub fn from_config(cfg: &EngineConfig, stream: u64) -> Result<Self, GameError> {
        cfg.validate()?;
        Ok(Game::new(cfg.grid_size, cfg.history_capacity, cfg.rng(stream))?)
    }
}

impl<R: Rng> Game<R> {
    /// New game with two random tiles.
    ///
    /// ```
    /// use duel_2048::game::Game;
    /// use duel_2048::engine::Move;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut g = Game::new(4, 10, StdRng::seed_from_u64(3)).unwrap();
    /// assert_eq!(g.tiles().len(), 2);
    /// for dir in Move::ALL {
    ///     if g.play_settled(dir).unwrap().moved {
    ///         break;
    ///     }
    /// }
    /// assert_eq!(g.history_len(), 1);
    /// assert!(g.undo().is_ok());
    /// ```
    pub fn new(size: usize, history_capacity: usize, rng: R) -> Result<Self, BoardError> {
        let mut game = Game {
            board: Board::new(size)?,
            tiles: TileLayer::new(size),
            history: History::new(history_capacity),
            rng,
            move_in_progress: false,
            over: false,
        };
        game.spawn_initial();
        Ok(game)
    }

    fn spawn_initial(&mut self) {
        for _ in 0..2 {
            if let Some(spawn) = self.board.spawn_one(&mut self.rng) {
                self.tiles.spawn(spawn);
            }
        }
        info!("new {0}x{0} game", self.board.size());
    }

    /// Slide in `dir`; on a legal move, snapshot the old position and spawn a tile.
    ///
    /// Fails only while a previous move is still in flight.
    pub fn play(&mut self, dir: Move) -> Result<Turn, GameError> {
        if self.move_in_progress {
            return Err(GameError::MoveInFlight);
        }
        let snapshot = Snapshot::capture(&self.board, &self.tiles);
        let (result, mut events) = self.tiles.commit(&self.board, dir);
        if !result.moved {
            debug!("{dir} is illegal here");
            return Ok(Turn { direction: dir, moved: false, score_gain: 0, events, game_over: self.over });
        }
        self.history.snapshot(snapshot);
        self.board = result.board;
        if let Some(spawn) = self.board.spawn_one(&mut self.rng) {
            events.push(self.tiles.spawn(spawn));
        }
        self.move_in_progress = true;
        self.over = self.board.is_game_over();
        debug!("{dir}: +{} (score {})", result.score_gain, self.board.score());
        if self.over {
            info!("game over at score {}", self.board.score());
        }
        Ok(Turn { direction: dir, moved: true, score_gain: result.score_gain, events, game_over: self.over })
    }

    /// Clear the in-flight flag set by a legal [`Self::play`].
    #[inline]
    pub fn settle(&mut self) { self.move_in_progress = false; }

    /// [`Self::play`] followed by [`Self::settle`], for headless drivers.
    pub fn play_settled(&mut self, dir: Move) -> Result<Turn, GameError> {
        let turn = self.play(dir)?;
        self.settle();
        Ok(turn)
    }

    /// Restore the position before the last committed move.
    ///
    /// Tile values, positions and score come back exactly; tile ids are the
    /// snapshot's, and ids handed out since are never reissued.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.move_in_progress {
            return Err(GameError::MoveInFlight);
        }
        let snapshot = self.history.undo()?;
        self.board = snapshot.board()?;
        let next_id = self.tiles.next_id().max(snapshot.next_tile_id());
        self.tiles = TileLayer::restore(
            self.board.size(),
            snapshot.tiles().iter().map(|t| (t.id, t.x, t.y)),
            next_id,
        );
        self.over = self.board.is_game_over();
        info!("undo to score {} ({} left)", self.board.score(), self.history.len());
        Ok(())
    }

    /// Throw the current game away and start over at the same size.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let size = self.board.size();
        self.board = Board::new(size)?;
        self.tiles = TileLayer::new(size);
        self.history.clear();
        self.move_in_progress = false;
        self.over = false;
        self.spawn_initial();
        Ok(())
    }

    #[inline]
    pub fn board(&self) -> &Board { &self.board }

    #[inline]
    pub fn score(&self) -> u64 { self.board.score() }

    /// Value of the highest tile on the board.
    #[inline]
    pub fn best_tile(&self) -> u64 { self.board.highest_tile() }

    pub fn tiles(&self) -> Vec<Tile> { self.tiles.tiles(&self.board) }

    #[inline]
    pub fn is_over(&self) -> bool { self.over }

    #[inline]
    pub fn is_move_in_progress(&self) -> bool { self.move_in_progress }

    #[inline]
    pub fn history_len(&self) -> usize { self.history.len() }
}

/// Result of a timed or bounded match between two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    HumanWins,
    OpponentWins,
    Draw,
}

impl DuelOutcome {
    /// Higher score wins.
    pub fn from_scores(human: u64, opponent: u64) -> Self {
        match human.cmp(&opponent) {
            std::cmp::Ordering::Greater => DuelOutcome::HumanWins,
            std::cmp::Ordering::Less => DuelOutcome::OpponentWins,
            std::cmp::Ordering::Equal => DuelOutcome::Draw,
        }
    }
}
