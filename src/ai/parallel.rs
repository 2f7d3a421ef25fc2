//! Root-move fan-out over a rayon pool.
//!
//! Every root move becomes an independent task holding its own board copy,
//! its own [`AlphaBeta`] and a by-value [`Deadline`]. Tasks share nothing
//! mutable; results come back in root-move order and are reduced by the
//! first strict maximum, so the pick does not depend on completion order.

use std::num::NonZeroUsize;

use log::{debug, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::ai::eval::Evaluator;
use crate::ai::search::{AlphaBeta, Deadline, MAX_SCORE, MIN_SCORE, RootResult};
use crate::board::Board;
use crate::error::SearchError;
use crate::rules;
use crate::types::{Color, Move};

/// Lazily built worker pool for one search call.
pub(crate) enum Dispatch {
    Disabled,
    Untried,
    Ready(ThreadPool),
    Unavailable,
}

impl Dispatch {
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::Untried } else { Self::Disabled }
    }

    /// Returns the pool, building it on first use. A failed build is
    /// logged once and the caller searches sequentially from then on.
    /// `NoParallelism` is the normal case on single-core and wasm32 hosts
    /// and is logged at debug level.
    pub fn pool(&mut self, root_moves: usize) -> Option<&ThreadPool> {
        if let Self::Untried = self {
            *self = match build_pool(root_moves) {
                Ok(pool) => Self::Ready(pool),
                Err(err @ SearchError::NoParallelism(_)) => {
                    debug!("searching sequentially: {err}");
                    Self::Unavailable
                }
                Err(err) => {
                    warn!("parallel root search unavailable, searching sequentially: {err}");
                    Self::Unavailable
                }
            };
        }

        match &*self {
            Self::Ready(pool) => Some(pool),
            _ => None,
        }
    }
}

/// Pool of `min(available parallelism, root_moves)` threads.
pub(crate) fn build_pool(root_moves: usize) -> Result<ThreadPool, SearchError> {
    let available = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let threads = available.min(root_moves);
    if threads <= 1 {
        return Err(SearchError::NoParallelism(threads));
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("othello-root-{i}"))
        .build()?;
    Ok(pool)
}

/// Searches every root move to `depth` on `pool` and blocks until all
/// tasks return. Late results from tasks that overran the deadline are kept.
pub(crate) fn root_search(
    pool: &ThreadPool,
    board: &Board,
    moves: &[Move],
    depth: u8,
    color: Color,
    evaluator: Evaluator,
    deadline: Deadline,
) -> Option<RootResult> {
    let board = *board;
    let results: Vec<RootResult> = pool.install(|| {
        moves
            .par_iter()
            .filter_map(|&mv| search_root_move(board, mv, depth, color, evaluator, deadline))
            .collect()
    });

    reduce(results)
}

/// One task: play `mv`, then a full-window search from the opponent's turn.
fn search_root_move(
    board: Board,
    mv: Move,
    depth: u8,
    color: Color,
    evaluator: Evaluator,
    deadline: Deadline,
) -> Option<RootResult> {
    let child = rules::apply_move(&board, mv, color).ok()?;
    let mut search = AlphaBeta::new(evaluator, color, deadline);
    let score = search.search(&child, depth.saturating_sub(1), MIN_SCORE, MAX_SCORE, false);
    Some(RootResult {
        mv,
        score,
        nodes: search.nodes(),
    })
}

/// First strict maximum in input order; node counts are summed.
fn reduce(results: Vec<RootResult>) -> Option<RootResult> {
    let nodes = results.iter().map(|r| r.nodes).sum();
    results
        .into_iter()
        .reduce(|best, next| if next.score > best.score { next } else { best })
        .map(|best| RootResult { nodes, ..best })
}
