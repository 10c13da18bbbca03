//! Postcard-encoded records of played games.
//!
//! A [`Run`] stores every decision point (board before the move, chosen
//! direction, raw branch scores) plus the final board.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::engine::{Board, BoardError, Move};
use crate::expectimax::BranchEval;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub steps: u32,
    pub start_unix_s: u64,
    pub elapsed_s: f32,
    pub grid_size: u32,
    pub final_score: u64,
    pub highest_tile: u64,
    /// Name of the policy that played, e.g. `"hard"` or `"hint"`.
    pub policy: String,
}

/// One decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Exponent cells before the move, row-major.
    pub pre_cells: Vec<u8>,
    pub pre_score: u64,
    pub chosen: Move,
    /// Raw scores for `[Up, Down, Left, Right]`; `None` marks an illegal move.
    pub branches: [Option<f64>; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub meta: Meta,
    pub steps: Vec<Step>,
    pub final_cells: Vec<u8>,
}

impl Run {
    pub fn final_board(&self) -> Result<Board, BoardError> {
        Board::from_exponents(self.meta.grid_size as usize, &self.final_cells, self.meta.final_score)
    }

    pub fn step_board(&self, i: usize) -> Option<Result<Board, BoardError>> {
        let step = self.steps.get(i)?;
        Some(Board::from_exponents(self.meta.grid_size as usize, &step.pre_cells, step.pre_score))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("postcard error: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Accumulates steps while a game is played.
#[derive(Debug)]
pub struct Recorder {
    policy: String,
    grid_size: u32,
    start_unix_s: u64,
    started: Instant,
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new(grid_size: usize, policy: impl Into<String>) -> Self {
        Self {
            policy: policy.into(),
            grid_size: grid_size as u32,
            start_unix_s: now_unix_seconds(),
            started: Instant::now(),
            steps: Vec::with_capacity(1024),
        }
    }

    pub fn record(&mut self, pre: &Board, chosen: Move, branches: &[BranchEval; 4]) {
        self.steps.push(Step {
            pre_cells: pre.exponents().to_vec(),
            pre_score: pre.score(),
            chosen,
            branches: branches.map(|b| b.legal.then_some(b.score)),
        });
    }

    #[inline]
    pub fn len(&self) -> usize { self.steps.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    pub fn finish(self, last: &Board) -> Run {
        let meta = Meta {
            steps: self.steps.len() as u32,
            start_unix_s: self.start_unix_s,
            elapsed_s: self.started.elapsed().as_secs_f32(),
            grid_size: self.grid_size,
            final_score: last.score(),
            highest_tile: last.highest_tile(),
            policy: self.policy,
        };
        Run { meta, steps: self.steps, final_cells: last.exponents().to_vec() }
    }
}

/// Encode a run to postcard bytes.
pub fn to_postcard_bytes(run: &Run) -> Result<Vec<u8>, TraceError> { Ok(postcard::to_allocvec(run)?) }

/// Decode a run from postcard bytes.
pub fn from_postcard_bytes(bytes: &[u8]) -> Result<Run, TraceError> { Ok(postcard::from_bytes(bytes)?) }

pub fn write_run_to_path<P: AsRef<Path>>(path: P, run: &Run) -> Result<(), TraceError> {
    fs::write(path, to_postcard_bytes(run)?)?;
    Ok(())
}

pub fn read_run_from_path<P: AsRef<Path>>(path: P) -> Result<Run, TraceError> {
    from_postcard_bytes(&fs::read(path)?)
}

pub fn now_unix_seconds() -> u64 { SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectimax::{Difficulty, Searcher};
    use rand::{rngs::StdRng, SeedableRng};
    use tempfile::NamedTempFile;

    fn short_run() -> Run {
        let mut rng = StdRng::seed_from_u64(21);
        let mut searcher = Searcher::with_rng(StdRng::seed_from_u64(22));
        let mut board = crate::engine::new_board(4, &mut rng).unwrap();
        let mut rec = Recorder::new(4, Difficulty::Normal.to_string());
        for _ in 0..5 {
            let (dir, branches) = searcher.choose_with_branches(&board, Difficulty::Normal);
            let Some(dir) = dir else { break };
            rec.record(&board, dir, &branches);
            board = board.shift(dir).board.with_random_tile(&mut rng);
        }
        rec.finish(&board)
    }

    #[test]
    fn round_trip_file() {
        let run = short_run();
        assert_eq!(run.meta.steps, 5);
        assert_eq!(run.meta.policy, "normal");
        let tmp = NamedTempFile::new().unwrap();
        write_run_to_path(tmp.path(), &run).unwrap();
        let back = read_run_from_path(tmp.path()).unwrap();
        assert_eq!(back, run);
        assert_eq!(back.final_board().unwrap().score(), run.meta.final_score);
    }

    #[test]
    fn steps_rebuild_boards() {
        let run = short_run();
        let first = run.step_board(0).unwrap().unwrap();
        assert_eq!(first.count_empty(), 14);
        let chosen = run.steps[0].chosen;
        assert!(run.steps[0].branches[chosen.index()].is_some());
        assert!(run.step_board(99).is_none());
    }

    #[test]
    fn truncated_bytes_fail() {
        let bytes = to_postcard_bytes(&short_run()).unwrap();
        let err = from_postcard_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, TraceError::Postcard(_)));
    }
}
