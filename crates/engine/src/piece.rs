//! Pieces and their movement rules.
//!
//! Every rule is a pure predicate over the board: it reads occupancy and
//! never mutates either the piece or the board.

use crate::board::Board;
use crate::constants::{PALACE_COLS, PieceKind, Side};
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// Identity of a piece within one board and all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(skip)]
    id: PieceId,
    kind: PieceKind,
    side: Side,
    name: String,
    #[serde(flatten)]
    position: Square,
    #[serde(default)]
    capture_count: u32,
}

impl Piece {
    /// Creates a piece with its traditional name and no captures.
    pub fn new(kind: PieceKind, side: Side, position: Square) -> Self {
        Self::with_name(kind, side, kind.default_name(side), position)
    }

    pub fn with_name(kind: PieceKind, side: Side, name: impl Into<String>, position: Square) -> Self {
        Self {
            id: PieceId::default(),
            kind,
            side,
            name: name.into(),
            position,
            capture_count: 0,
        }
    }

    /// Sets the capture count, as when restoring a saved game.
    pub fn with_capture_count(mut self, capture_count: u32) -> Self {
        self.capture_count = capture_count;
        self
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_red(&self) -> bool {
        self.side.is_red()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Square {
        self.position
    }

    pub fn row(&self) -> i8 {
        self.position.row
    }

    pub fn col(&self) -> i8 {
        self.position.col
    }

    pub fn capture_count(&self) -> u32 {
        self.capture_count
    }

    pub(crate) fn set_id(&mut self, id: PieceId) {
        self.id = id;
    }

    pub(crate) fn move_to(&mut self, target: Square) {
        self.position = target;
    }

    pub(crate) fn set_capture_count(&mut self, capture_count: u32) {
        self.capture_count = capture_count;
    }

    /// Whether this piece may move to `target` on `board` under its own rule.
    ///
    /// Turn order and the terminal state are the board's concern; this only
    /// answers the geometric question plus the shared prechecks (no self-move,
    /// no capturing a friendly piece).
    pub fn can_move_to(&self, target: Square, board: &Board) -> bool {
        if !target.is_valid() || target == self.position {
            return false;
        }
        if board.piece_at(target).is_some_and(|p| p.side == self.side) {
            return false;
        }

        match self.kind {
            PieceKind::Chariot => chariot_can_reach(self, target, board),
            PieceKind::Cannon => cannon_can_reach(self, target, board),
            PieceKind::Horse => horse_can_reach(self, target, board),
            PieceKind::Elephant => elephant_can_reach(self, target, board),
            PieceKind::Advisor => advisor_can_reach(self, target),
            PieceKind::General => general_can_reach(self, target, board),
            PieceKind::Soldier => soldier_can_reach(self, target),
        }
    }
}

fn in_palace(side: Side, sq: Square) -> bool {
    let (min_row, max_row) = side.palace_rows();
    (min_row..=max_row).contains(&sq.row) && (PALACE_COLS.0..=PALACE_COLS.1).contains(&sq.col)
}

fn is_straight(from: Square, to: Square) -> bool {
    from.row == to.row || from.col == to.col
}

fn occupied_between(from: Square, to: Square, board: &Board) -> usize {
    from.between(to)
        .filter(|&sq| board.piece_at(sq).is_some())
        .count()
}

fn chariot_can_reach(piece: &Piece, target: Square, board: &Board) -> bool {
    is_straight(piece.position, target) && occupied_between(piece.position, target, board) == 0
}

fn cannon_can_reach(piece: &Piece, target: Square, board: &Board) -> bool {
    if !is_straight(piece.position, target) {
        return false;
    }
    let screens = occupied_between(piece.position, target, board);
    match board.piece_at(target) {
        None => screens == 0,
        // The screen may belong to either side.
        Some(_) => screens == 1,
    }
}

fn horse_can_reach(piece: &Piece, target: Square, board: &Board) -> bool {
    let dr = target.row - piece.row();
    let dc = target.col - piece.col();
    let leg = match (dr.abs(), dc.abs()) {
        (2, 1) => piece.position.offset(dr.signum(), 0),
        (1, 2) => piece.position.offset(0, dc.signum()),
        _ => return false,
    };
    board.piece_at(leg).is_none()
}

fn elephant_can_reach(piece: &Piece, target: Square, board: &Board) -> bool {
    let dr = target.row - piece.row();
    let dc = target.col - piece.col();
    if dr.abs() != 2 || dc.abs() != 2 {
        return false;
    }
    let eye = piece.position.offset(dr.signum(), dc.signum());
    board.piece_at(eye).is_none() && piece.side.owns_row(target.row)
}

fn advisor_can_reach(piece: &Piece, target: Square) -> bool {
    let dr = (target.row - piece.row()).abs();
    let dc = (target.col - piece.col()).abs();
    dr == 1 && dc == 1 && in_palace(piece.side, target)
}

fn general_can_reach(piece: &Piece, target: Square, board: &Board) -> bool {
    let dr = (target.row - piece.row()).abs();
    let dc = (target.col - piece.col()).abs();
    if dr + dc != 1 || !in_palace(piece.side, target) {
        return false;
    }

    // Flying general: landing on the enemy general's file needs a blocker
    // strictly between the two.
    match board.opposing_general(piece) {
        Some(enemy) if enemy.col() == target.col => occupied_between(target, enemy.position, board) > 0,
        _ => true,
    }
}

fn soldier_can_reach(piece: &Piece, target: Square) -> bool {
    let dr = target.row - piece.row();
    let dc = (target.col - piece.col()).abs();
    if dr == piece.side.forward() && dc == 0 {
        return true;
    }
    let crossed = !piece.side.owns_row(piece.row());
    crossed && dr == 0 && dc == 1
}
