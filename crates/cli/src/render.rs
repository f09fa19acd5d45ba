//! Text rendering of the board for the terminal.

use crossterm::style::Stylize;
use std::fmt::Write;
use xiangqi_engine::constants::{COLS, ROWS};
use xiangqi_engine::{Board, Side, Square};

const EMPTY: &str = "＋";
const FILES: &str = "  ａ ｂ ｃ ｄ ｅ ｆ ｇ ｈ ｉ";

/// Draws the board with ranks on the left and files underneath, black at the
/// top. With `color` set, red glyphs are red, black glyphs blue, and the last
/// move's destination is underlined.
pub fn board(board: &Board, color: bool) -> String {
    let landed = board.last_move().map(|record| record.to);
    let mut out = String::new();
    for row in 0..ROWS {
        if row == ROWS / 2 {
            out.push_str("  ～～～～～～～～～～～～～～～～～\n");
        }
        let _ = write!(out, "{} ", 9 - row);
        for col in 0..COLS {
            let sq = Square::new(row, col);
            if col > 0 {
                out.push(' ');
            }
            let Some(piece) = board.piece_at(sq) else {
                out.push_str(EMPTY);
                continue;
            };
            if !color {
                out.push_str(piece.name());
                continue;
            }
            let glyph = match piece.side() {
                Side::Red => piece.name().red().bold(),
                Side::Black => piece.name().blue().bold(),
            };
            let glyph = if landed == Some(sq) { glyph.underlined() } else { glyph };
            let _ = write!(out, "{glyph}");
        }
        out.push('\n');
    }
    out.push_str(FILES);
    out.push('\n');
    out
}
