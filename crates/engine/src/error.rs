//! Error types surfaced by the engine.
//!
//! Illegal moves are an expected outcome of play, so they are reported as
//! values rather than panics.

use crate::constants::Side;
use crate::square::Square;
use thiserror::Error;

/// Why a move attempt was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A general has been captured; the game is over.
    #[error("game is over, {0} has won")]
    GameOver(Side),

    #[error("{0} is off the board")]
    OutOfBounds(Square),

    /// The piece belongs to the side that is not on move.
    #[error("it is not {0}'s turn")]
    NotYourTurn(Side),

    /// The target is not reachable under the piece's movement rule.
    #[error("piece cannot reach {0}")]
    IllegalShape(Square),

    #[error("{0} is occupied by a friendly piece")]
    FriendlyCapture(Square),

    /// The piece is not on this board (captured or never placed).
    #[error("no such piece on the board")]
    UnknownPiece,

    #[error("no piece at {0}")]
    EmptySquare(Square),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("expected a file letter a-i and a rank digit 0-9, got {0:?}")]
    Malformed(String),
}
