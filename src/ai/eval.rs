use once_cell::sync::Lazy;

use crate::ai::search::{MAX_SCORE, MIN_SCORE};
use crate::board::{Board, DIRECTIONS, in_bounds};
use crate::config::Weights;
use crate::types::{BOARD_SIZE, Color, Position};

const CORNERS: [(i32, i32); 4] = [(0, 0), (0, 7), (7, 0), (7, 7)];
const CORNER_MASK: u64 = 0x8100_0000_0000_0081;
/// Full bottom and top rows plus both side columns: 28 squares.
const EDGE_MASK: u64 = 0xFF81_8181_8181_81FF;

/// `(corner bit, mask of its in-board neighbours)` for each corner.
static CORNER_REGIONS: Lazy<[(u64, u64); 4]> = Lazy::new(|| {
    CORNERS.map(|(row, col)| {
        let neighbours = DIRECTIONS
            .iter()
            .map(|(dr, dc)| (row + dr, col + dc))
            .filter(|&(r, c)| in_bounds(r, c))
            .fold(0u64, |acc, (r, c)| {
                acc | 1u64 << (r as usize * BOARD_SIZE + c as usize)
            });
        (square(row, col), neighbours)
    })
});

/// The five heuristic terms, each from one color's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalTerms {
    pub material: i32,
    pub mobility: i32,
    pub corner: i32,
    pub edge: i32,
    pub stability: i32,
}

impl EvalTerms {
    pub fn compute(board: &Board, color: Color) -> Self {
        let me = board.bitboard(color);
        let opp = board.bitboard(color.opponent());

        let my_moves = board.legal_moves(color).count_ones() as i32;
        let opp_moves = board.legal_moves(color.opponent()).count_ones() as i32;
        let mobility = if my_moves + opp_moves == 0 {
            0
        } else {
            my_moves - opp_moves
        };

        Self {
            material: diff(me, opp, u64::MAX),
            mobility,
            corner: diff(me, opp, CORNER_MASK),
            edge: diff(me, opp, EDGE_MASK),
            stability: stability(me),
        }
    }

    /// Weighted sum, saturated and kept strictly inside the search's
    /// infinity sentinels whatever weights the host supplies.
    pub fn score(&self, weights: &Weights) -> i32 {
        [
            (weights.material, self.material),
            (weights.mobility, self.mobility),
            (weights.corner, self.corner),
            (weights.edge, self.edge),
            (weights.stability, self.stability),
        ]
        .into_iter()
        .fold(0i32, |acc, (weight, term)| {
            acc.saturating_add(weight.saturating_mul(term))
        })
        .clamp(MIN_SCORE + 1, MAX_SCORE - 1)
    }
}

/// Weighted linear evaluation. Knows nothing about the side to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    weights: Weights,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Positive scores favour `color`.
    pub fn evaluate(&self, board: &Board, color: Color) -> i32 {
        if !color.is_player() {
            return 0;
        }
        EvalTerms::compute(board, color).score(&self.weights)
    }
}

pub fn evaluate(board: &Board, color: Color, weights: &Weights) -> i32 {
    Evaluator::new(*weights).evaluate(board, color)
}

fn diff(me: u64, opp: u64, mask: u64) -> i32 {
    (me & mask).count_ones() as i32 - (opp & mask).count_ones() as i32
}

/// One point per owned corner plus one per owned neighbour of it.
fn stability(me: u64) -> i32 {
    CORNER_REGIONS
        .iter()
        .filter(|(corner, _)| me & corner != 0)
        .map(|(_, neighbours)| 1 + (me & neighbours).count_ones() as i32)
        .sum()
}

fn square(row: i32, col: i32) -> u64 {
    Position::from_index(row as usize * BOARD_SIZE + col as usize).bit()
}
