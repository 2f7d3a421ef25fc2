use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use ai::choose_move;
pub use board::Board;
pub use error::GameError;
pub use rules::{
    History, MoveRecord, apply_move, is_game_over, legal_moves, make_move, new_board,
    undo_last_move, winner,
};
pub use types::{Color, Move, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
