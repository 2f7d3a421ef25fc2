use std::fmt;

use crate::types::{BOARD_SIZE, Color, NUM_SQUARES, Position};

/// The eight unit vectors `(dr, dc)`, shared by legality, flipping and the
/// evaluator's corner-neighbour scan.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col`; row 0 is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=black, (3,4)=white, (4,3)=white, (4,4)=black.
    pub fn new() -> Self {
        Self {
            black: bit(27) | bit(36),
            white: bit(28) | bit(35),
        }
    }

    /// Overlapping squares are treated as black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn bitboard(&self, color: Color) -> u64 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
            Color::Empty => !(self.black | self.white),
        }
    }

    pub fn get(&self, pos: Position) -> Color {
        let square = pos.bit();
        if (self.black & square) != 0 {
            Color::Black
        } else if (self.white & square) != 0 {
            Color::White
        } else {
            Color::Empty
        }
    }

    /// Overwrites a single square without any rule checks.
    pub fn set(&mut self, pos: Position, color: Color) {
        let square = pos.bit();
        self.black &= !square;
        self.white &= !square;
        match color {
            Color::Black => self.black |= square,
            Color::White => self.white |= square,
            Color::Empty => {}
        }
    }

    /// Returns the legal move mask for the given side.
    pub fn legal_moves(&self, color: Color) -> u64 {
        let Some((me, opp)) = self.sides(color) else {
            return 0;
        };

        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Returns the mask of discs a placement would flip. Zero means illegal.
    pub fn flips(&self, pos: Position, color: Color) -> u64 {
        match self.sides(color) {
            Some((me, opp)) => Self::collect_flips(pos.index(), me, opp),
            None => 0,
        }
    }

    /// Places one disc and flips captured discs.
    /// Returns the flipped bit mask. Returns 0 and leaves the board
    /// untouched when the move is illegal.
    pub fn place(&mut self, pos: Position, color: Color) -> u64 {
        let flips = self.flips(pos, color);
        if flips == 0 {
            return 0;
        }

        let move_bit = pos.bit();
        match color {
            Color::Black => {
                self.black |= move_bit | flips;
                self.white &= !flips;
            }
            Color::White => {
                self.white |= move_bit | flips;
                self.black &= !flips;
            }
            Color::Empty => unreachable!("flips() is zero for Empty"),
        }

        flips
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count_of(&self, color: Color) -> u8 {
        match color {
            Color::Black => self.black.count_ones() as u8,
            Color::White => self.white.count_ones() as u8,
            Color::Empty => self.empty_count(),
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[i8; 64]` where 0=empty, 1=black, -1=white.
    pub fn to_array(&self) -> [i8; NUM_SQUARES] {
        let mut board = [0i8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.get(Position::from_index(pos)).value();
        }
        board
    }

    fn sides(&self, color: Color) -> Option<(u64, u64)> {
        match color {
            Color::Black => Some((self.black, self.white)),
            Color::White => Some((self.white, self.black)),
            Color::Empty => None,
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    // A run only counts when it ends on one of our discs.
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Row 7 is printed first so the bottom edge ends up at the bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "\n{row}")?;
            for col in 0..BOARD_SIZE {
                let pos = Position::from_index(row * BOARD_SIZE + col);
                write!(f, " {}", self.get(pos).symbol())?;
            }
        }
        Ok(())
    }
}

/// Iterates the set bits of `mask` in ascending (row-major) order.
pub fn positions(mask: u64) -> impl Iterator<Item = Position> {
    let mut bits = mask;
    std::iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let idx = bits.trailing_zeros() as usize;
        bits &= bits - 1;
        Some(Position::from_index(idx))
    })
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    fn at(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    #[test]
    fn initial_board_has_two_discs_per_color_on_diagonals() {
        let board = Board::new();

        assert_eq!(board.get(at(3, 3)), Color::Black);
        assert_eq!(board.get(at(4, 4)), Color::Black);
        assert_eq!(board.get(at(3, 4)), Color::White);
        assert_eq!(board.get(at(4, 3)), Color::White);
        assert_eq!(board.count(), (2, 2));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(idx(2, 4)) | bit(idx(3, 5)) | bit(idx(4, 2)) | bit(idx(5, 3));

        assert_eq!(board.legal_moves(Color::Black), expected);
    }

    #[test]
    fn place_flips_opponent_discs_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(at(2, 4), Color::Black);

        assert_eq!(flips, bit(idx(3, 4)));
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.empty_count(), 59);

        let cells = board.to_array();
        assert_eq!(cells[idx(2, 4)], 1);
        assert_eq!(cells[idx(3, 4)], 1);
        assert_eq!(cells[idx(3, 3)], 1);
        assert_eq!(cells[idx(4, 4)], 1);
        assert_eq!(cells[idx(4, 3)], -1);
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(board.place(at(0, 0), Color::Black), 0);
        assert_eq!(board.place(at(3, 3), Color::White), 0);
        assert_eq!(board.place(at(2, 4), Color::Empty), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn run_ending_on_empty_or_edge_flips_nothing_in_that_direction() {
        // Black at (0,0) and (0,3); white run (0,1),(0,2) closed.
        // White run (1,1),(2,2) open towards an empty (3,3).
        let black = bit(idx(0, 3));
        let white = bit(idx(0, 1)) | bit(idx(0, 2)) | bit(idx(1, 1)) | bit(idx(2, 2));
        let board = Board::from_bitboards(black, white);

        let flips = board.flips(at(0, 0), Color::Black);

        assert_eq!(flips, bit(idx(0, 1)) | bit(idx(0, 2)));
    }

    #[test]
    fn display_prints_top_row_first() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "  0 1 2 3 4 5 6 7");
        assert_eq!(lines[1], "7 . . . . . . . .");
        assert_eq!(lines[4], "4 . . . W B . . .");
        assert_eq!(lines[5], "3 . . . B W . . .");
    }

    #[test]
    fn positions_iterates_in_row_major_order() {
        let mask = bit(idx(5, 0)) | bit(idx(0, 7)) | bit(idx(2, 2));

        let collected: Vec<Position> = positions(mask).collect();

        assert_eq!(collected, vec![at(0, 7), at(2, 2), at(5, 0)]);
    }
}
