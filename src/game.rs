use log::{info, warn};

use crate::ai::search::choose_move_with;
use crate::board::Board;
use crate::config::SearchConfig;
use crate::error::GameError;
use crate::rules::{self, History};
use crate::types::{Color, GameResult, GameState, Move, Position};

pub trait MoveSelector: Send + Sync {
    /// Caller contract: `color` is the side to move. May return an illegal
    /// move; the session then passes instead.
    fn select_move(&self, board: &Board, color: Color) -> Move;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, color: Color) -> Move {
        rules::move_for(board, color)
    }
}

/// Iterative-deepening alpha-beta search.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphaBetaSelector {
    config: SearchConfig,
}

impl AlphaBetaSelector {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select_move(&self, board: &Board, color: Color) -> Move {
        choose_move_with(board, color, &self.config)
    }
}

/// One game: board, undo history and turn bookkeeping.
///
/// `human` is the color played through [`GameInstance::place`]; `None`
/// means both sides are driven by the selector.
pub struct GameInstance {
    board: Board,
    history: History,
    pub current_player: Color,
    pub human: Option<Color>,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<Position>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(human: Option<Color>, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            history: History::new(),
            current_player: Color::Black,
            human: human.filter(|color| color.is_player()),
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            selector,
        }
    }

    pub fn new_with_default_selector(human: Option<Color>) -> Self {
        Self::new(human, Box::new(FirstLegalMoveSelector))
    }

    pub fn with_search(human: Option<Color>, config: SearchConfig) -> Self {
        Self::new(human, Box::new(AlphaBetaSelector::new(config)))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_human_turn(&self) -> bool {
        self.human == Some(self.current_player)
    }

    /// Human placement.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        self.ensure_playing()?;
        if !self.is_human_turn() {
            return Err(GameError::NotYourTurn);
        }

        let mv = Move::at(row, col)?;
        self.apply_move(mv)
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.legal_moves(self.current_player) != 0
    }

    /// Forced pass for the side to move.
    pub fn pass(&mut self) -> Result<(), GameError> {
        self.ensure_playing()?;
        if self.has_legal_moves_for_current() {
            return Err(GameError::PassNotAllowed);
        }
        self.apply_move(Move::Pass)
    }

    /// Lets the selector play for the side to move. Returns the move
    /// actually played.
    pub fn do_ai_move(&mut self) -> Result<Move, GameError> {
        self.ensure_playing()?;
        if self.is_human_turn() {
            return Err(GameError::NotYourTurn);
        }

        let color = self.current_player;
        let mut mv = if self.has_legal_moves_for_current() {
            self.selector.select_move(&self.board, color)
        } else {
            Move::Pass
        };

        if mv.is_pass() && self.has_legal_moves_for_current() {
            warn!("{color:?} selector passed with legal moves available");
            mv = rules::move_for(&self.board, color);
        }
        if let Err(err) = rules::apply_move(&self.board, mv, color) {
            warn!("{color:?} selector proposed {mv:?} ({err}), passing instead");
            mv = Move::Pass;
        }

        self.apply_move(mv)?;
        Ok(mv)
    }

    /// Reverts the last recorded move, pass or placement.
    pub fn undo(&mut self) -> bool {
        let Some(color) = self.history.last().map(|record| record.color) else {
            return false;
        };
        if !rules::undo_last_move(&mut self.history, &mut self.board) {
            return false;
        }

        self.current_player = color;
        self.is_game_over = false;
        match self.history.last() {
            Some(record) => {
                self.is_pass = record.mv.is_pass();
                self.flipped = record.flipped.clone();
            }
            None => {
                self.is_pass = false;
                self.flipped.clear();
            }
        }
        true
    }

    pub fn get_legal_moves(&self) -> Vec<Position> {
        rules::legal_moves(&self.board, self.current_player)
            .into_iter()
            .filter_map(Move::position)
            .collect()
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            move_count: self.history.len(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult {
            winner: rules::winner(&self.board),
            black_count,
            white_count,
        }
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        let color = self.current_player;
        let flipped = rules::make_move(&mut self.board, &mut self.history, mv, color)?;
        info!("{color:?} played {mv:?}, flipping {}", flipped.len());

        self.is_pass = mv.is_pass();
        self.flipped = flipped;
        self.current_player = color.opponent();

        if rules::is_game_over(&self.board) {
            self.is_game_over = true;
            let (black, white) = self.board.count();
            info!(
                "game over: {:?} wins, black {black} white {white}",
                rules::winner(&self.board)
            );
        }

        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Color) {
        self.board = board;
        self.history = History::new();
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
    }
}
