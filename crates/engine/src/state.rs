//! The shape of a game as seen by a persistence layer.
//!
//! Only the shape lives here; how it is written to disk is up to the caller.

use crate::board::Board;
use crate::constants::Side;
use crate::piece::Piece;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub pieces: Vec<Piece>,
    pub red_to_move: bool,
    #[serde(default)]
    pub winner: Option<Side>,
}

impl Board {
    /// Everything a saved game needs: pieces, turn, and winner.
    pub fn game_state(&self) -> GameState {
        GameState {
            pieces: self.pieces().cloned().collect(),
            red_to_move: self.is_red_turn(),
            winner: self.winner(),
        }
    }

    /// Loads a saved game, trusting its contents. History starts empty.
    pub fn load_game_state(&mut self, state: GameState) {
        self.replace_state(state.pieces, state.red_to_move, state.winner);
    }

    pub fn from_game_state(state: GameState) -> Self {
        let mut board = Board::new();
        board.load_game_state(state);
        board
    }
}
