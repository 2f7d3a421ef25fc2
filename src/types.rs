use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Cell occupancy and player color.
///
/// The numeric values are part of the contract: `opponent()` is negation,
/// and `Empty` doubles as the "tie" winner. Serialized as that number so
/// snapshots use one encoding for cells and players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum Color {
    Empty = 0,
    Black = 1,
    White = -1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
            Self::Empty => Self::Empty,
        }
    }

    pub fn value(self) -> i8 {
        self as i8
    }

    pub fn from_value(value: i8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    pub fn is_player(self) -> bool {
        self != Self::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Black => 'B',
            Self::White => 'W',
        }
    }
}

impl From<Color> for i8 {
    fn from(color: Color) -> Self {
        color.value()
    }
}

impl TryFrom<i8> for Color {
    type Error = GameError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Black),
            -1 => Ok(Self::White),
            _ => Err(GameError::InvalidColor(value)),
        }
    }
}

/// A board coordinate. Row 0 is the bottom edge, column 0 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// Caller contract: `index < 64`.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES, "square index out of range");
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

/// A move for one side: a placement, or a pass when no placement is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Pass,
    Place(Position),
}

impl Move {
    pub fn at(row: u8, col: u8) -> Result<Self, GameError> {
        Position::new(row, col).map(Self::Place)
    }

    pub fn position(self) -> Option<Position> {
        match self {
            Self::Pass => None,
            Self::Place(pos) => Some(pos),
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Public game state returned from the session and WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, `0` empty, `1` black, `-1` white.
    pub board: Vec<i8>,
    pub current_player: Color,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a placement.
    pub is_pass: bool,
    /// Contract:
    /// - Placement: the flipped positions.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
    pub move_count: usize,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `Empty` on a tie.
    pub winner: Color,
    pub black_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_negation_of_color_value() {
        for color in [Color::Black, Color::White, Color::Empty] {
            assert_eq!(color.opponent().value(), -color.value());
            assert_eq!(color.opponent().opponent(), color);
        }
    }

    #[test]
    fn color_deserializes_from_its_numeric_value() {
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error, I8Deserializer};

        let white: I8Deserializer<Error> = (-1i8).into_deserializer();
        assert_eq!(Color::deserialize(white), Ok(Color::White));

        let invalid: I8Deserializer<Error> = 2i8.into_deserializer();
        let err = Color::deserialize(invalid).unwrap_err();
        assert!(err.to_string().contains("invalid color value 2"));
    }

    #[test]
    fn color_converts_to_and_from_i8() {
        for color in [Color::Black, Color::White, Color::Empty] {
            assert_eq!(Color::try_from(i8::from(color)), Ok(color));
        }
        assert_eq!(Color::try_from(3), Err(GameError::InvalidColor(3)));
        assert_eq!(Color::from_value(-2), None);
    }

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert_eq!(
            Position::new(8, 0),
            Err(GameError::OutOfBounds { row: 8, col: 0 })
        );
        assert!(Position::new(0, 8).is_err());
        assert_eq!(Position::new(7, 7).map(Position::index), Ok(63));
    }

    #[test]
    fn position_index_round_trips_row_major() {
        let pos = Position::from_index(19);

        assert_eq!(pos, Position { row: 2, col: 3 });
        assert_eq!(pos.bit(), 1u64 << 19);
    }
}
