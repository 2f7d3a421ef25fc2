use std::time::Duration;

use log::debug;
use web_time::Instant;

use crate::ai::eval::Evaluator;
use crate::ai::parallel::{self, Dispatch};
use crate::board::{Board, positions};
use crate::config::{DEFAULT_TIME_LIMIT_MS, SearchConfig};
use crate::rules;
use crate::types::{Color, Move};

pub(crate) const MIN_SCORE: i32 = i32::MIN;
pub(crate) const MAX_SCORE: i32 = i32::MAX;

/// Absolute wall-clock cutoff, copied by value into every worker.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn starting_now(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn exceeded(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Best move of one root search and the work it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RootResult {
    pub mv: Move,
    pub score: i32,
    pub nodes: u64,
}

/// Outcome of [`Searcher::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score of the last completed depth, from the searching color's view.
    /// `None` when no depth completed or the move was forced.
    pub score: Option<i32>,
    pub depth_reached: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub timed_out: bool,
}

/// Minimax with alpha-beta pruning. Leaves are always scored for `root`,
/// maximizing layers are `root` to move, minimizing layers its opponent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AlphaBeta {
    evaluator: Evaluator,
    root: Color,
    deadline: Deadline,
    /// Deadline checks allowed before the search behaves as timed out.
    checks_left: Option<u32>,
    nodes: u64,
}

impl AlphaBeta {
    pub fn new(evaluator: Evaluator, root: Color, deadline: Deadline) -> Self {
        Self {
            evaluator,
            root,
            deadline,
            checks_left: None,
            nodes: 0,
        }
    }

    /// Times out after `checks` deadline checks, independent of the clock.
    #[cfg(test)]
    fn with_check_budget(mut self, checks: u32) -> Self {
        self.checks_left = Some(checks);
        self
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        let to_move = if maximizing {
            self.root
        } else {
            self.root.opponent()
        };
        let legal = board.legal_moves(to_move);

        if depth == 0 || legal == 0 || self.out_of_time() {
            return self.evaluator.evaluate(board, self.root);
        }

        let mut value = if maximizing { MIN_SCORE } else { MAX_SCORE };
        for (i, pos) in positions(legal).enumerate() {
            // Keep at least one child so a cut-off node still reports a real score.
            if i > 0 && self.out_of_time() {
                break;
            }

            let mut child = *board;
            child.place(pos, to_move);
            let score = self.search(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(score);
            } else {
                value = value.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        value
    }

    fn out_of_time(&mut self) -> bool {
        if let Some(left) = self.checks_left.as_mut() {
            if *left == 0 {
                return true;
            }
            *left -= 1;
        }
        self.deadline.exceeded()
    }
}

pub struct Searcher {
    evaluator: Evaluator,
    timeout: Duration,
    max_depth: u8,
    parallel: bool,
    timed_out: bool,
}

impl Searcher {
    pub fn new(evaluator: Evaluator, max_depth: u8) -> Self {
        Self::with_timeout(
            evaluator,
            max_depth,
            Duration::from_millis(DEFAULT_TIME_LIMIT_MS),
        )
    }

    pub fn with_timeout(evaluator: Evaluator, max_depth: u8, timeout: Duration) -> Self {
        Self {
            evaluator,
            timeout,
            max_depth,
            parallel: true,
            timed_out: false,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        let mut searcher = Self::with_timeout(
            Evaluator::new(config.weights),
            config.max_depth,
            config.time_limit(),
        );
        searcher.parallel = config.parallel;
        searcher
    }

    /// Disables the parallel root search.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Iterative deepening from depth 1 to `max_depth`.
    ///
    /// The first legal move is the fallback until a depth completes before
    /// the deadline; results of a depth that overran the deadline are
    /// discarded. Returns `Move::Pass` only when `color` has no legal move.
    pub fn search(&mut self, board: &Board, color: Color) -> SearchReport {
        let deadline = Deadline::starting_now(self.timeout);
        self.timed_out = false;

        let moves = rules::legal_moves(board, color);
        let mut report = SearchReport {
            best_move: moves.first().copied().unwrap_or(Move::Pass),
            score: None,
            depth_reached: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            timed_out: false,
        };

        if moves.len() <= 1 {
            report.elapsed = deadline.elapsed();
            return report;
        }

        let mut dispatch = Dispatch::new(self.parallel);

        for depth in 1..=self.max_depth {
            if deadline.exceeded() {
                self.timed_out = true;
                break;
            }

            let pool = if depth >= 2 {
                dispatch.pool(moves.len())
            } else {
                None
            };
            let result = match pool {
                Some(pool) => parallel::root_search(
                    pool,
                    board,
                    &moves,
                    depth,
                    color,
                    self.evaluator,
                    deadline,
                ),
                None => self.root_search_sequential(board, &moves, depth, color, deadline),
            };
            let Some(result) = result else {
                continue;
            };
            report.nodes += result.nodes;

            if deadline.exceeded() {
                self.timed_out = true;
                break;
            }

            report.best_move = result.mv;
            report.score = Some(result.score);
            report.depth_reached = depth;
            debug!(
                "depth {depth}: best {:?} score {} nodes {} ({:?})",
                result.mv,
                result.score,
                report.nodes,
                deadline.elapsed()
            );
        }

        report.elapsed = deadline.elapsed();
        report.timed_out = self.timed_out;
        report
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Root alpha-beta over `moves` in order. Only a strictly greater score
    /// replaces the current best.
    fn root_search_sequential(
        &self,
        board: &Board,
        moves: &[Move],
        depth: u8,
        color: Color,
        deadline: Deadline,
    ) -> Option<RootResult> {
        let mut search = AlphaBeta::new(self.evaluator, color, deadline);
        let mut best: Option<(Move, i32)> = None;
        let mut alpha = MIN_SCORE;

        for &mv in moves {
            if best.is_some() && deadline.exceeded() {
                break;
            }
            let Ok(child) = rules::apply_move(board, mv, color) else {
                continue;
            };

            let score = search.search(&child, depth - 1, alpha, MAX_SCORE, false);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        best.map(|(mv, score)| RootResult {
            mv,
            score,
            nodes: search.nodes(),
        })
    }
}

/// Picks a move for `color` within `time_budget`, searching at most
/// `max_depth` plies with the default weights.
pub fn choose_move(board: &Board, color: Color, time_budget: Duration, max_depth: u8) -> Move {
    Searcher::with_timeout(Evaluator::default(), max_depth, time_budget)
        .search(board, color)
        .best_move
}

pub fn choose_move_with(board: &Board, color: Color, config: &SearchConfig) -> Move {
    Searcher::from_config(config).search(board, color).best_move
}
