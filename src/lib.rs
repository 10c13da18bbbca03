//! duel-2048: a sliding-tile merge engine and an expectimax opponent
//!
//! This crate provides:
//! - A square `Board` of any edge length 2..=16 with a pure slide/merge `shift`
//!   (`engine` module)
//! - Board heuristics and a one-ply expectimax `Searcher` driven by named
//!   difficulty and hint policies (`expectimax` module)
//! - A `Game` session with spawn, bounded undo history, tile identities for
//!   renderers and move-in-progress gating (`game`, `history`, `tiles`)
//! - Postcard game traces and engine settings (`trace`, `config`)
//!
//! Quick start:
//! ```
//! use duel_2048::engine::{new_board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = new_board(4, &mut rng).unwrap();
//! let r = b0.shift(Move::Left);
//! if r.moved {
//!     let b1 = r.board.with_random_tile(&mut rng);
//!     assert_eq!(b1.score(), r.score_gain);
//! }
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use duel_2048::expectimax::{Difficulty, Searcher};
//! use duel_2048::game::Game;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // 1) One game and one searcher per board
//! let mut game = Game::new(4, 10, StdRng::seed_from_u64(123)).unwrap();
//! let mut ai = Searcher::with_rng(StdRng::seed_from_u64(7));
//! let mut moves = 0u32;
//!
//! // 2) Loop a few moves (keep doctests fast)
//! while !game.is_over() && moves < 4 {
//!     match ai.choose_direction(game.board(), Difficulty::Hard) {
//!         Some(dir) => {
//!             assert!(game.play_settled(dir).unwrap().moved);
//!             moves += 1;
//!         }
//!         None => break,
//!     }
//! }
//!
//! // 3) Inspect final state
//! assert_eq!(game.history_len(), 4);
//! ```
//!
pub mod config;
pub mod engine;
pub mod expectimax;
pub mod game;
pub mod history;
pub mod tiles;
pub mod trace;
