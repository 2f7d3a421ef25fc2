//! Rule operations on top of [`Board`]: legal move lists, pure and
//! recorded move application, undo and terminal detection.

use crate::board::{Board, positions};
use crate::error::GameError;
use crate::types::{Color, Move, Position};

/// One accepted move, enough to reverse it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub color: Color,
    pub flipped: Vec<Position>,
}

/// Stack of accepted moves, passes included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter()
    }

    fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }
}

pub fn new_board() -> Board {
    Board::new()
}

/// Legal placements for `color` in row-major order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    positions(board.legal_moves(color))
        .map(Move::Place)
        .collect()
}

/// `Pass` when `color` has nothing to play, otherwise the first legal move.
pub fn move_for(board: &Board, color: Color) -> Move {
    legal_moves(board, color)
        .first()
        .copied()
        .unwrap_or(Move::Pass)
}

/// Returns the successor board, leaving `board` untouched.
pub fn apply_move(board: &Board, mv: Move, color: Color) -> Result<Board, GameError> {
    let mut next = *board;
    play(&mut next, mv, color)?;
    Ok(next)
}

/// Plays `mv` on `board` and records it for [`undo_last_move`].
/// On error neither the board nor the history changes.
pub fn make_move(
    board: &mut Board,
    history: &mut History,
    mv: Move,
    color: Color,
) -> Result<Vec<Position>, GameError> {
    let flipped: Vec<Position> = positions(play(board, mv, color)?).collect();
    history.push(MoveRecord {
        mv,
        color,
        flipped: flipped.clone(),
    });
    Ok(flipped)
}

/// Reverts the most recent entry. Returns `false` on an empty history.
pub fn undo_last_move(history: &mut History, board: &mut Board) -> bool {
    let Some(record) = history.pop() else {
        return false;
    };

    if let Move::Place(pos) = record.mv {
        board.set(pos, Color::Empty);
        let opponent = record.color.opponent();
        for flipped in record.flipped {
            board.set(flipped, opponent);
        }
    }

    true
}

/// A single side without moves only passes; the game ends when both are stuck.
pub fn is_game_over(board: &Board) -> bool {
    board.legal_moves(Color::Black) == 0 && board.legal_moves(Color::White) == 0
}

/// The color with strictly more discs, `Color::Empty` on a tie.
pub fn winner(board: &Board) -> Color {
    let (black, white) = board.count();
    if black > white {
        Color::Black
    } else if white > black {
        Color::White
    } else {
        Color::Empty
    }
}

fn play(board: &mut Board, mv: Move, color: Color) -> Result<u64, GameError> {
    let Move::Place(pos) = mv else {
        return Ok(0);
    };

    let flips = board.place(pos, color);
    if flips == 0 {
        return Err(GameError::IllegalMove {
            row: pos.row,
            col: pos.col,
        });
    }
    Ok(flips)
}
