#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use othello::wasm::OthelloGame;
use wasm_bindgen::{JsError, JsValue};
use wasm_bindgen_test::*;

fn ok<T>(result: Result<T, JsError>) -> T {
    result.unwrap_or_else(|_| panic!("binding call failed"))
}

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

fn shallow_config() -> JsValue {
    let config = Object::new();
    Reflect::set(&config, &"maxDepth".into(), &JsValue::from(2)).unwrap();
    Reflect::set(&config, &"timeLimitMs".into(), &JsValue::from(1000)).unwrap();
    config.into()
}

#[wasm_bindgen_test]
fn wasm_ready_reports_true() {
    assert!(othello::wasm_ready());
}

#[wasm_bindgen_test]
fn new_game_lists_four_opening_moves() {
    let game = ok(OthelloGame::new(1, JsValue::UNDEFINED));

    let moves = ok(game.legal_moves());

    assert!(Array::is_array(&moves));
    assert_eq!(Array::from(&moves).length(), 4);
}

#[wasm_bindgen_test]
fn human_move_then_ai_reply_updates_state() {
    let mut game = ok(OthelloGame::new(1, shallow_config()));

    let state = ok(game.place(2, 4));
    assert_eq!(field(&state, "black_count").as_f64(), Some(4.0));
    assert_eq!(field(&state, "current_player").as_f64(), Some(-1.0));
    assert_eq!(Array::from(&field(&state, "flipped")).length(), 1);

    let state = ok(game.ai_move());
    assert_eq!(field(&state, "move_count").as_f64(), Some(2.0));
    assert!(game.undo());
}

#[wasm_bindgen_test]
fn illegal_move_surfaces_as_error() {
    let mut game = ok(OthelloGame::new(1, JsValue::NULL));

    assert!(game.place(0, 0).is_err());
    assert!(!game.undo());
}

#[wasm_bindgen_test]
fn board_text_matches_start_position() {
    let game = ok(OthelloGame::new(0, JsValue::UNDEFINED));

    let text = game.board_text();

    assert!(text.contains("3 . . . B W . . ."));
}
