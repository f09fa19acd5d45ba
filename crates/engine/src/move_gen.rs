//! Candidate destination generation, using pre-computed tables.
//!
//! Each piece kind tries a fixed shape of destinations; legality is decided
//! afterwards by the board, so the tables only need to be on-board.

use crate::constants::{COLS, PieceKind, ROWS};
use crate::piece::Piece;
use crate::square::Square;
use once_cell::sync::Lazy;

const SQUARES: usize = (ROWS as usize) * (COLS as usize);

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ELEPHANT: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];
const HORSE: [(i8, i8); 8] = [(2, 1), (2, -1), (-2, 1), (-2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2)];

pub const fn sq_to_idx(sq: Square) -> usize {
    sq.row as usize * COLS as usize + sq.col as usize
}

/// Pre-computed candidate destinations per square.
pub struct CandidateTables {
    pub orthogonal: Vec<Vec<Square>>,
    pub diagonal: Vec<Vec<Square>>,
    pub elephant: Vec<Vec<Square>>,
    pub horse: Vec<Vec<Square>>,
    /// Whole file (rows 0..9) then whole rank (cols 0..8), own square excluded.
    pub lines: Vec<Vec<Square>>,
}

impl CandidateTables {
    fn new() -> Self {
        let mut tables = CandidateTables {
            orthogonal: vec![Vec::new(); SQUARES],
            diagonal: vec![Vec::new(); SQUARES],
            elephant: vec![Vec::new(); SQUARES],
            horse: vec![Vec::new(); SQUARES],
            lines: vec![Vec::new(); SQUARES],
        };

        for from in Square::all() {
            let idx = sq_to_idx(from);
            let steps = |offsets: &[(i8, i8)]| -> Vec<Square> {
                offsets
                    .iter()
                    .map(|&(dr, dc)| from.offset(dr, dc))
                    .filter(|sq| sq.is_valid())
                    .collect()
            };
            tables.orthogonal[idx] = steps(&ORTHOGONAL);
            tables.diagonal[idx] = steps(&DIAGONAL);
            tables.elephant[idx] = steps(&ELEPHANT);
            tables.horse[idx] = steps(&HORSE);

            let file = (0..ROWS).filter(|&r| r != from.row).map(|r| Square::new(r, from.col));
            let rank = (0..COLS).filter(|&c| c != from.col).map(|c| Square::new(from.row, c));
            tables.lines[idx] = file.chain(rank).collect();
        }

        tables
    }
}

// The global static instance of the candidate tables, initialized lazily and only once.
pub static CANDIDATE_TABLES: Lazy<CandidateTables> = Lazy::new(CandidateTables::new);

/// The destinations `piece` tries during enumeration, in a fixed order.
///
/// Generals and soldiers try their four orthogonal neighbours (soldiers
/// included backwards, which their rule then rejects), advisors the four
/// diagonal neighbours, elephants the four two-step diagonals, horses all
/// eight L offsets, and chariots and cannons their entire file and rank.
pub fn candidate_targets(piece: &Piece) -> &'static [Square] {
    let pos = piece.position();
    if !pos.is_valid() {
        return &[];
    }
    let idx = sq_to_idx(pos);
    let tables = &*CANDIDATE_TABLES;
    match piece.kind() {
        PieceKind::General | PieceKind::Soldier => tables.orthogonal[idx].as_slice(),
        PieceKind::Advisor => tables.diagonal[idx].as_slice(),
        PieceKind::Elephant => tables.elephant[idx].as_slice(),
        PieceKind::Horse => tables.horse[idx].as_slice(),
        PieceKind::Chariot | PieceKind::Cannon => tables.lines[idx].as_slice(),
    }
}
