//! Moves and the history records that make them reversible.

use crate::constants::Side;
use crate::piece::{Piece, PieceId};
use crate::square::Square;
use std::fmt;

/// A candidate move produced by enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Everything needed to undo one successful move exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    /// The captured piece, held here until the move is undone.
    pub captured: Option<Piece>,
    /// Mover's capture count before this move.
    pub prior_capture_count: u32,
    /// Winner before this move.
    pub prior_winner: Option<Side>,
}

impl MoveRecord {
    pub fn as_move(&self) -> Move {
        Move {
            piece: self.piece,
            from: self.from,
            to: self.to,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
