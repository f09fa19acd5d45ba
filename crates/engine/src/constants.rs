//! Constants used in the Xiangqi engine.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROWS: i8 = 10;
pub const COLS: i8 = 9;

// --- Palace and River ---
pub const PALACE_COLS: (i8, i8) = (3, 5);
pub const RED_PALACE_ROWS: (i8, i8) = (7, 9);
pub const BLACK_PALACE_ROWS: (i8, i8) = (0, 2);
/// Last row on black's half of the board; red's half starts one row below.
pub const RIVER_BLACK_EDGE: i8 = 4;
pub const RIVER_RED_EDGE: i8 = 5;

/// Capture count at which a piece announces a killing streak.
pub const STREAK_THRESHOLD: u32 = 3;

// --- Search Constants ---
pub const DEFAULT_SEARCH_DEPTH: i32 = 4;
pub const DEFAULT_SCORE_CEILING: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// Get the opponent of the current side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    pub fn is_red(self) -> bool {
        self == Side::Red
    }

    pub fn from_red(red: bool) -> Side {
        if red { Side::Red } else { Side::Black }
    }

    /// The label shown when this side wins.
    pub fn label(self) -> &'static str {
        match self {
            Side::Red => "红方",
            Side::Black => "黑方",
        }
    }

    /// Row range `(min, max)` of this side's palace.
    pub fn palace_rows(self) -> (i8, i8) {
        match self {
            Side::Red => RED_PALACE_ROWS,
            Side::Black => BLACK_PALACE_ROWS,
        }
    }

    /// Whether `row` lies on this side's own half of the board.
    pub fn owns_row(self, row: i8) -> bool {
        match self {
            Side::Red => row >= RIVER_RED_EDGE,
            Side::Black => row <= RIVER_BLACK_EDGE,
        }
    }

    /// Row delta of one step forward.
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

// --- Piece Base Values ---
// Indexed by `PieceKind as usize`. The general is priced above everything else
// combined so that losing it dominates any material count.
pub const PIECE_VALUES: [i32; 7] = [
    10000, // GENERAL
    200,   // ADVISOR
    200,   // ELEPHANT
    450,   // HORSE
    900,   // CHARIOT
    500,   // CANNON
    100,   // SOLDIER
];

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// Get the value of a piece.
    pub fn value(self) -> i32 {
        PIECE_VALUES[self as usize]
    }

    /// The traditional glyph for this kind on the given side.
    pub fn default_name(self, side: Side) -> &'static str {
        match (self, side) {
            (PieceKind::General, Side::Red) => "帅",
            (PieceKind::General, Side::Black) => "將",
            (PieceKind::Advisor, _) => "仕",
            (PieceKind::Elephant, Side::Red) => "相",
            (PieceKind::Elephant, Side::Black) => "象",
            (PieceKind::Horse, Side::Red) => "傌",
            (PieceKind::Horse, Side::Black) => "馬",
            (PieceKind::Chariot, Side::Red) => "俥",
            (PieceKind::Chariot, Side::Black) => "車",
            (PieceKind::Cannon, Side::Red) => "炮",
            (PieceKind::Cannon, Side::Black) => "砲",
            (PieceKind::Soldier, Side::Red) => "兵",
            (PieceKind::Soldier, Side::Black) => "卒",
        }
    }

    /// FEN-style letter, upper case for red.
    pub fn to_fen_char(self, side: Side) -> char {
        let c = match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        if side.is_red() { c.to_ascii_uppercase() } else { c }
    }
}
