//! Move selection for the automated opponent and for player hints.
//!
//! - [`Searcher`]: runs a [`SearchPolicy`] against a board and keeps a bounded
//!   FIFO memo of lookahead results.
//! - [`heuristic`]: board scoring (empty cells, monotonicity, smoothness).
//!
//! Two families of policies never share scores: the hint
//! policy advises a human, the difficulty policies play as the opponent.
//!
//! Notes
//! - Search is randomized (spawn-cell sampling, shallow jitter, tie-break
//!   epsilon). Seed the searcher's RNG with [`Searcher::with_rng`] for
//!   reproducible runs.
//! - Searching never mutates the board it is given.
//!
//! Quick start
//! ```
//! use duel_2048::engine::new_board;
//! use duel_2048::expectimax::{Difficulty, Searcher, SearchPolicy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let board = new_board(4, &mut StdRng::seed_from_u64(123)).unwrap();
//! let mut ai = Searcher::with_rng(StdRng::seed_from_u64(7));
//! let dir = ai.choose_direction(&board, Difficulty::Hard);
//! assert!(dir.is_some());
//! let hint = ai.choose_direction(&board, SearchPolicy::hint());
//! assert!(hint.is_some());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::Move;

mod cache;
pub mod heuristic;
mod search;

pub use heuristic::Weights;
pub use search::Searcher;

/// Default number of memoized lookahead results.
pub const DEFAULT_CACHE_CAPACITY: usize = 2000;

/// Probability weights of the two spawn outcomes, as `(exponent, p)`.
pub(crate) const SPAWN_OUTCOMES: [(u8, f64); 2] = [(1, 0.9), (2, 0.1)];

/// Blend of the immediate and lookahead scores.
pub(crate) const IMMEDIATE_WEIGHT: f64 = 0.6;
pub(crate) const EXPECTED_WEIGHT: f64 = 0.4;

/// Upper bound of the random tie-break added to each legal branch.
pub(crate) const TIE_EPSILON: f64 = 1e-4;

/// Opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Normal, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty {0:?} (expected easy, medium, normal or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

/// Which named policy produced a score. Part of the memo key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Hint,
    Opponent(Difficulty),
}

/// How a legal branch is scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Heuristic of the post-move board plus uniform jitter in `[0, jitter)`.
    Shallow { jitter: f64 },
    /// One-ply expectimax over spawns, sampling at most `sample_cap` empty cells.
    Lookahead { sample_cap: usize },
}

/// A named combination of weights and evaluation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchPolicy {
    pub kind: PolicyKind,
    pub weights: Weights,
    pub evaluation: Evaluation,
}

impl SearchPolicy {
    /// Player-facing hint: lookahead with the gentle hint weights.
    pub const fn hint() -> Self {
        SearchPolicy {
            kind: PolicyKind::Hint,
            weights: Weights::HINT,
            evaluation: Evaluation::Lookahead { sample_cap: 8 },
        }
    }

    /// Opponent policy for a difficulty.
    pub const fn opponent(difficulty: Difficulty) -> Self {
        let (weights, evaluation) = match difficulty {
            Difficulty::Easy => (Weights::SHALLOW, Evaluation::Shallow { jitter: 100.0 }),
            Difficulty::Medium => (Weights::SHALLOW, Evaluation::Shallow { jitter: 50.0 }),
            Difficulty::Normal => (Weights::LOOKAHEAD, Evaluation::Lookahead { sample_cap: 8 }),
            Difficulty::Hard => (Weights::HARD, Evaluation::Lookahead { sample_cap: 12 }),
        };
        SearchPolicy { kind: PolicyKind::Opponent(difficulty), weights, evaluation }
    }

    pub fn name(&self) -> String {
        match self.kind {
            PolicyKind::Hint => "hint".to_string(),
            PolicyKind::Opponent(d) => d.to_string(),
        }
    }
}

impl From<Difficulty> for SearchPolicy {
    fn from(d: Difficulty) -> Self { SearchPolicy::opponent(d) }
}

/// Per-branch score at the root, before the tie-break epsilon.
///
/// - `score` is `f64::NEG_INFINITY` when `legal` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchEval {
    pub dir: Move,
    pub score: f64,
    pub legal: bool,
}

/// Basic search stats for a single decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards passed to the heuristic.
    pub nodes: u64,
    pub cache_hits: u64,
    pub cache_evictions: u64,
}
