//! Change notifications for observers of a board.
//!
//! These are transient: they describe the most recent mutation only and are
//! cleared on every clone.

use crate::constants::{PieceKind, Side};
use crate::piece::PieceId;
use crate::record::Move;
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    Moved(Move),
    Undone(Move),
    Restarted,
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureEvent {
    pub attacker: PieceId,
    pub victim: PieceKind,
    pub victim_side: Side,
    pub from: Square,
    /// Where the victim stood, which is also where the attacker landed.
    pub to: Square,
}

/// Raised when a piece's capture count reaches the streak threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub piece: PieceId,
    pub side: Side,
    pub captures: u32,
}
