/// Errors raised by board and session operations.
///
/// A failed operation never leaves a board partially updated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    /// Target square occupied, or the placement outflanks nothing.
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    #[error("position out of bounds: ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("pass is only allowed without a legal move")]
    PassNotAllowed,

    #[error("invalid color value {0}, expected 0, 1 or -1")]
    InvalidColor(i8),
}

/// Recoverable failures inside the search engine. Never surfaced by
/// `choose_move`: the caller falls back to the sequential root search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to build worker pool: {0}")]
    ParallelDispatch(#[from] rayon::ThreadPoolBuildError),

    #[error("parallel root search needs at least two workers, got {0}")]
    NoParallelism(usize),
}
