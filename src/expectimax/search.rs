use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::{Board, Move};

use super::cache::FifoCache;
use super::heuristic::evaluate;
use super::{
    BranchEval, Evaluation, PolicyKind, SearchPolicy, SearchStats, Weights, DEFAULT_CACHE_CAPACITY,
    EXPECTED_WEIGHT, IMMEDIATE_WEIGHT, SPAWN_OUTCOMES, TIE_EPSILON,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    cells: Box<[u8]>,
    dir: Move,
    kind: PolicyKind,
}

/// Direction chooser for one board.
///
/// Owns its RNG and memo table, so give each board its own searcher to keep
/// their caches apart. Reads boards, never mutates them.
pub struct Searcher<R = StdRng> {
    rng: R,
    cache: FifoCache<CacheKey, f64>,
    stats: SearchStats,
}

impl Searcher<StdRng> {
    /// Searcher seeded from OS entropy.
    pub fn new() -> Self { Self::with_rng(StdRng::from_entropy()) }
}

impl Default for Searcher<StdRng> {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> Searcher<R> {
    /// Searcher driven by a caller-provided random source.
    pub fn with_rng(rng: R) -> Self { Self::with_rng_and_capacity(rng, DEFAULT_CACHE_CAPACITY) }

    /// As [`Self::with_rng`], with a custom memo capacity (0 disables memoization).
    pub fn with_rng_and_capacity(rng: R, cache_capacity: usize) -> Self {
        Self { rng, cache: FifoCache::new(cache_capacity), stats: SearchStats::default() }
    }

    /// Pick the best direction, or `None` when no direction changes the board.
    ///
    /// ```
    /// use duel_2048::engine::Board;
    /// use duel_2048::expectimax::{Difficulty, Searcher};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let stuck = Board::from_rows(&[vec![2, 4], vec![4, 2]]).unwrap();
    /// let mut s = Searcher::with_rng(StdRng::seed_from_u64(1));
    /// assert_eq!(s.choose_direction(&stuck, Difficulty::Hard), None);
    /// ```
    pub fn choose_direction<P: Into<SearchPolicy>>(&mut self, board: &Board, policy: P) -> Option<Move> {
        self.choose_with_branches(board, policy).0
    }

    /// Best direction together with the raw branch scores it was picked from.
    pub fn choose_with_branches<P: Into<SearchPolicy>>(
        &mut self,
        board: &Board,
        policy: P,
    ) -> (Option<Move>, [BranchEval; 4]) {
        let policy = policy.into();
        let branches = self.branch_evals(board, policy);
        let mut best: Option<(Move, f64)> = None;
        for branch in branches.iter().filter(|b| b.legal) {
            let score = branch.score + self.rng.gen::<f64>() * TIE_EPSILON;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((branch.dir, score));
            }
        }
        debug!(
            "{} chose {:?} from [{}]",
            policy.name(),
            best.map(|(d, _)| d),
            branches.iter().map(|b| format!("{}={:.2}", b.dir, b.score)).collect::<Vec<_>>().join(", ")
        );
        (best.map(|(d, _)| d), branches)
    }

    /// Score each direction in order `[Up, Down, Left, Right]`.
    ///
    /// Illegal moves are marked `legal=false` with a score of negative infinity.
    pub fn branch_evals(&mut self, board: &Board, policy: SearchPolicy) -> [BranchEval; 4] {
        self.stats = SearchStats::default();
        Move::ALL.map(|dir| match self.score_direction(board, dir, &policy) {
            Some(score) => BranchEval { dir, score, legal: true },
            None => BranchEval { dir, score: f64::NEG_INFINITY, legal: false },
        })
    }

    /// Statistics from the last call to [`Self::branch_evals`] or a `choose_*` method.
    #[inline]
    pub fn last_stats(&self) -> SearchStats { self.stats }

    #[inline]
    pub fn cache_len(&self) -> usize { self.cache.len() }

    #[inline]
    pub fn cache_capacity(&self) -> usize { self.cache.capacity() }

    pub fn clear_cache(&mut self) { self.cache.clear(); }

    fn score_direction(&mut self, board: &Board, dir: Move, policy: &SearchPolicy) -> Option<f64> {
        match policy.evaluation {
            Evaluation::Shallow { jitter } => {
                let result = board.shift(dir);
                if !result.moved {
                    return None;
                }
                self.stats.nodes += 1;
                let mut score = evaluate(&result.board, result.score_gain, &policy.weights);
                if jitter > 0.0 {
                    score += self.rng.gen_range(0.0..jitter);
                }
                Some(score)
            }
            Evaluation::Lookahead { sample_cap } => {
                let key = CacheKey { cells: board.exponents().into(), dir, kind: policy.kind };
                if let Some(score) = self.cache.get(&key) {
                    self.stats.cache_hits += 1;
                    return Some(score);
                }
                let result = board.shift(dir);
                if !result.moved {
                    return None;
                }
                let score = self.lookahead(&result.board, result.score_gain, &policy.weights, sample_cap);
                let evicted = self.cache.insert(key, score);
                if evicted > 0 {
                    trace!("search cache evicted {evicted} entries");
                    self.stats.cache_evictions += evicted as u64;
                }
                Some(score)
            }
        }
    }

    /// `0.6 * immediate + 0.4 * E[best reply after a random spawn]`.
    fn lookahead(&mut self, after: &Board, score_gain: u64, w: &Weights, sample_cap: usize) -> f64 {
        self.stats.nodes += 1;
        let immediate = evaluate(after, score_gain, w);
        let mut empties: Vec<usize> = after
            .exponents()
            .iter()
            .enumerate()
            .filter(|(_, &e)| e == 0)
            .map(|(i, _)| i)
            .collect();
        if empties.is_empty() {
            return immediate;
        }
        if empties.len() > sample_cap {
            empties.shuffle(&mut self.rng);
            empties.truncate(sample_cap);
        }
        let mut expected = 0.0;
        for &idx in &empties {
            let mut cell_expected = 0.0;
            for (exponent, p) in SPAWN_OUTCOMES {
                let spawned = after.with_exponent_at(idx, exponent);
                cell_expected += p * self.best_reply(&spawned, w);
            }
            expected += cell_expected;
        }
        expected /= empties.len() as f64;
        immediate * IMMEDIATE_WEIGHT + expected * EXPECTED_WEIGHT
    }

    /// Max heuristic over legal replies, or the board itself when stuck.
    fn best_reply(&mut self, board: &Board, w: &Weights) -> f64 {
        let mut best = f64::NEG_INFINITY;
        for dir in Move::ALL {
            let result = board.shift(dir);
            if result.moved {
                self.stats.nodes += 1;
                best = best.max(evaluate(&result.board, result.score_gain, w));
            }
        }
        if best == f64::NEG_INFINITY {
            self.stats.nodes += 1;
            best = evaluate(board, 0, w);
        }
        best
    }
}
