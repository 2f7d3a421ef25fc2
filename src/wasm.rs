use wasm_bindgen::prelude::*;

use crate::config::SearchConfig;
use crate::game::GameInstance;
use crate::types::Color;

/// Browser-facing game session. Structured values are plain JS objects.
#[wasm_bindgen]
pub struct OthelloGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl OthelloGame {
    /// `human_color`: `1` black, `-1` white, anything else for AI vs AI.
    /// `config` is an optional partial `SearchConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(human_color: i8, config: JsValue) -> Result<OthelloGame, JsError> {
        let config: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let human = Color::from_value(human_color).filter(|color| color.is_player());

        Ok(Self {
            inner: GameInstance::with_search(human, config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.get_legal_moves())?)
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        self.inner.place(row, col)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        self.inner.do_ai_move()?;
        self.state()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsError> {
        self.inner.pass()?;
        self.state()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_result())?)
    }

    #[wasm_bindgen(js_name = boardText)]
    pub fn board_text(&self) -> String {
        self.inner.board().to_string()
    }
}
