//! The board: live pieces, turn, winner, and the undo history.

use crate::constants::{COLS, PieceKind, ROWS, STREAK_THRESHOLD, Side};
use crate::error::MoveError;
use crate::events::{BoardEvent, CaptureEvent, Streak};
use crate::move_gen;
use crate::piece::{Piece, PieceId};
use crate::record::{Move, MoveRecord};
use crate::square::Square;
use std::fmt;

const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// The standard 32-piece opening position, black first.
pub fn opening_layout() -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(32);
    for side in [Side::Black, Side::Red] {
        let (back, cannons, soldiers) = match side {
            Side::Black => (0, 2, 3),
            Side::Red => (9, 7, 6),
        };
        let back_rank = BACK_RANK
            .iter()
            .enumerate()
            .map(|(col, &kind)| Piece::new(kind, side, Square::new(back, col as i8)));
        let cannon_pair = [1, 7].map(|col| Piece::new(PieceKind::Cannon, side, Square::new(cannons, col)));
        let soldier_line = [0, 2, 4, 6, 8].map(|col| Piece::new(PieceKind::Soldier, side, Square::new(soldiers, col)));

        // Black is listed back rank first, red front line first.
        if side == Side::Black {
            pieces.extend(back_rank);
            pieces.extend(cannon_pair);
            pieces.extend(soldier_line);
        } else {
            pieces.extend(soldier_line);
            pieces.extend(cannon_pair);
            pieces.extend(back_rank);
        }
    }
    pieces
}

/// The state of a game at any point in time.
///
/// Pieces own their positions. `grid` is an index of those positions kept in
/// step by every mutation so that occupancy lookups stay cheap during search.
#[derive(Debug)]
pub struct Board {
    slots: Vec<Option<Piece>>,
    grid: [[Option<PieceId>; COLS as usize]; ROWS as usize],
    red_to_move: bool,
    winner: Option<Side>,
    history: Vec<MoveRecord>,

    // Transient, observer-facing state. Not carried over by `clone`.
    revision: u64,
    last_event: Option<BoardEvent>,
    last_capture: Option<CaptureEvent>,
    streak: Option<Streak>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the standard opening position, red to move.
    pub fn new() -> Self {
        Self::from_pieces(opening_layout(), true)
    }

    /// A board holding exactly `pieces`, with no history and no winner.
    ///
    /// The input is trusted: no rule validation is done. Pieces placed off
    /// the board are dropped.
    pub fn from_pieces(pieces: Vec<Piece>, red_to_move: bool) -> Self {
        let mut board = Self {
            slots: Vec::new(),
            grid: [[None; COLS as usize]; ROWS as usize],
            red_to_move,
            winner: None,
            history: Vec::new(),
            revision: 0,
            last_event: None,
            last_capture: None,
            streak: None,
        };
        board.load(pieces);
        board
    }

    fn load(&mut self, pieces: Vec<Piece>) {
        self.slots.clear();
        self.grid = [[None; COLS as usize]; ROWS as usize];
        for mut piece in pieces {
            let pos = piece.position();
            if !pos.is_valid() {
                tracing::warn!(?pos, name = piece.name(), "dropping piece placed off the board");
                continue;
            }
            if self.grid_at(pos).is_some() {
                tracing::warn!(?pos, name = piece.name(), "dropping piece on an occupied square");
                continue;
            }
            let id = PieceId(self.slots.len() as u8);
            piece.set_id(id);
            *self.grid_at_mut(pos) = Some(id);
            self.slots.push(Some(piece));
        }
    }

    fn grid_at(&self, sq: Square) -> Option<PieceId> {
        self.grid[sq.row as usize][sq.col as usize]
    }

    fn grid_at_mut(&mut self, sq: Square) -> &mut Option<PieceId> {
        &mut self.grid[sq.row as usize][sq.col as usize]
    }

    fn clear_transient(&mut self) {
        self.last_event = None;
        self.last_capture = None;
        self.streak = None;
    }

    // --- Queries ---

    pub fn is_valid_position(&self, row: i8, col: i8) -> bool {
        Square::new(row, col).is_valid()
    }

    /// The piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        if !sq.is_valid() {
            return None;
        }
        self.grid_at(sq).and_then(|id| self.piece(id))
    }

    /// A live piece by id. Captured pieces are not live.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// All live pieces, in placement order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.slots.iter().flatten()
    }

    pub fn general(&self, side: Side) -> Option<&Piece> {
        self.pieces()
            .find(|p| p.kind() == PieceKind::General && p.side() == side)
    }

    /// The live general of the side opposing `piece`.
    pub fn opposing_general(&self, piece: &Piece) -> Option<&Piece> {
        self.general(piece.side().opponent())
    }

    pub fn is_red_turn(&self) -> bool {
        self.red_to_move
    }

    pub fn side_to_move(&self) -> Side {
        Side::from_red(self.red_to_move)
    }

    /// The side that captured the opposing general, once the game is over.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_event(&self) -> Option<&BoardEvent> {
        self.last_event.as_ref()
    }

    pub fn last_capture(&self) -> Option<&CaptureEvent> {
        self.last_capture.as_ref()
    }

    /// Set when the last move brought its piece's captures to the streak threshold or beyond.
    pub fn streak(&self) -> Option<&Streak> {
        self.streak.as_ref()
    }

    // --- Move validation ---

    /// Checks a move without applying it. `try_move_piece` runs exactly these checks.
    pub fn check_move(&self, piece: &Piece, target: Square) -> Result<(), MoveError> {
        if let Some(winner) = self.winner {
            return Err(MoveError::GameOver(winner));
        }
        if !target.is_valid() {
            return Err(MoveError::OutOfBounds(target));
        }
        if piece.is_red() != self.red_to_move {
            return Err(MoveError::NotYourTurn(piece.side()));
        }
        if self.piece_at(target).is_some_and(|p| p.side() == piece.side()) {
            return Err(MoveError::FriendlyCapture(target));
        }
        if !piece.can_move_to(target, self) {
            return Err(MoveError::IllegalShape(target));
        }
        Ok(())
    }

    /// Every move the pieces of `side` can make right now.
    ///
    /// Each piece tries its fixed candidate shape (see
    /// [`move_gen::candidate_targets`]) and keeps the targets that pass
    /// [`Board::check_move`]. Nothing is mutated, but the turn check still
    /// applies: asking for the side not on move yields no moves.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces().filter(|p| p.side() == side) {
            for &to in move_gen::candidate_targets(piece) {
                if self.check_move(piece, to).is_ok() {
                    moves.push(Move {
                        piece: piece.id(),
                        from: piece.position(),
                        to,
                    });
                }
            }
        }
        moves
    }

    // --- Mutation ---

    /// Moves a piece, returning whether the move was accepted.
    pub fn move_piece(&mut self, id: PieceId, target: Square) -> bool {
        self.try_move_piece(id, target).is_ok()
    }

    /// Moves whatever stands on `from` to `to`.
    pub fn move_from(&mut self, from: Square, to: Square) -> Result<&MoveRecord, MoveError> {
        let id = self.piece_at(from).map(Piece::id).ok_or(MoveError::EmptySquare(from))?;
        self.try_move_piece(id, to)
    }

    /// Moves a piece, reporting why the move was rejected if it was.
    ///
    /// On success the move is recorded for undo, an enemy on the target is
    /// removed and credited to the mover, capturing a general ends the game,
    /// and the turn passes.
    pub fn try_move_piece(&mut self, id: PieceId, target: Square) -> Result<&MoveRecord, MoveError> {
        let piece = self.piece(id).ok_or(MoveError::UnknownPiece)?;
        if let Err(err) = self.check_move(piece, target) {
            tracing::trace!(name = piece.name(), from = %piece.position(), to = %target, %err, "move rejected");
            return Err(err);
        }

        let from = piece.position();
        let side = piece.side();
        let prior_capture_count = piece.capture_count();
        let prior_winner = self.winner;

        let captured = self
            .grid_at(target)
            .and_then(|victim| self.slots[victim.index()].take());

        let mut capture_count = prior_capture_count;
        if let Some(victim) = &captured {
            capture_count += 1;
            if victim.kind() == PieceKind::General {
                self.winner = Some(side);
            }
        }

        if let Some(mover) = self.slots[id.index()].as_mut() {
            mover.move_to(target);
            mover.set_capture_count(capture_count);
        }
        *self.grid_at_mut(from) = None;
        *self.grid_at_mut(target) = Some(id);
        self.red_to_move = !self.red_to_move;

        let record = MoveRecord {
            piece: id,
            from,
            to: target,
            captured,
            prior_capture_count,
            prior_winner,
        };

        self.revision += 1;
        self.last_event = Some(BoardEvent::Moved(record.as_move()));
        self.last_capture = record.captured.as_ref().map(|victim| CaptureEvent {
            attacker: id,
            victim: victim.kind(),
            victim_side: victim.side(),
            from,
            to: target,
        });
        self.streak = (record.is_capture() && capture_count >= STREAK_THRESHOLD).then_some(Streak {
            piece: id,
            side,
            captures: capture_count,
        });

        let index = self.history.len();
        self.history.push(record);
        Ok(&self.history[index])
    }

    /// Reverts the most recent move exactly. Does nothing when there is no history.
    pub fn undo_move(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };

        if let Some(mover) = self.slots[record.piece.index()].as_mut() {
            mover.move_to(record.from);
            mover.set_capture_count(record.prior_capture_count);
        }
        *self.grid_at_mut(record.to) = None;
        *self.grid_at_mut(record.from) = Some(record.piece);

        let undone = record.as_move();
        if let Some(victim) = record.captured {
            let victim_id = victim.id();
            *self.grid_at_mut(record.to) = Some(victim_id);
            self.slots[victim_id.index()] = Some(victim);
        }

        self.red_to_move = !self.red_to_move;
        self.winner = record.prior_winner;

        self.revision += 1;
        self.clear_transient();
        self.last_event = Some(BoardEvent::Undone(undone));
    }

    /// Clears the history and lays out the opening position again, red to move.
    pub fn restart(&mut self) {
        self.history.clear();
        self.load(opening_layout());
        self.red_to_move = true;
        self.winner = None;

        self.revision += 1;
        self.clear_transient();
        self.last_event = Some(BoardEvent::Restarted);
    }

    /// Replaces the whole position, as when loading a saved game.
    ///
    /// This is a trusted bulk load, not a move: no rule is checked. An empty
    /// piece list falls back to the opening position.
    pub fn replace_state(&mut self, pieces: Vec<Piece>, red_to_move: bool, winner: Option<Side>) {
        if pieces.is_empty() {
            self.restart();
            return;
        }
        self.history.clear();
        self.load(pieces);
        self.red_to_move = red_to_move;
        self.winner = winner;

        self.revision += 1;
        self.clear_transient();
        self.last_event = Some(BoardEvent::Replaced);
    }
}

/// An independent deep copy. Pieces and history are copied; observer state
/// starts cleared.
impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            grid: self.grid,
            red_to_move: self.red_to_move,
            winner: self.winner,
            history: self.history.clone(),
            revision: 0,
            last_event: None,
            last_capture: None,
            streak: None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "(To move: {}, Winner: {:?})", self.side_to_move(), self.winner)?;
        writeln!(f, "  +-------------------+")?;
        for r in 0..ROWS {
            write!(f, "{} | ", 9 - r)?;
            for c in 0..COLS {
                match self.piece_at(Square::new(r, c)) {
                    Some(piece) => write!(f, "{} ", piece.kind().to_fen_char(piece.side()))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-------------------+")?;
        writeln!(f, "    a b c d e f g h i")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PieceKind::*;
    use crate::constants::Side::{Black, Red};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col)
    }

    fn id_at(board: &Board, row: i8, col: i8) -> PieceId {
        board.piece_at(sq(row, col)).unwrap().id()
    }

    /// Snapshot of everything undo must restore.
    fn fingerprint(board: &Board) -> (Vec<Piece>, bool, Option<Side>, usize) {
        let mut pieces: Vec<Piece> = board.pieces().cloned().collect();
        pieces.sort_by_key(Piece::id);
        (pieces, board.is_red_turn(), board.winner(), board.history().len())
    }

    #[test]
    fn opening_layout_is_complete() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert!(board.is_red_turn());
        assert_eq!(board.winner(), None);

        let expect = [
            (sq(0, 0), Chariot, Black),
            (sq(0, 4), General, Black),
            (sq(2, 7), Cannon, Black),
            (sq(3, 8), Soldier, Black),
            (sq(6, 0), Soldier, Red),
            (sq(7, 1), Cannon, Red),
            (sq(9, 1), Horse, Red),
            (sq(9, 4), General, Red),
            (sq(9, 6), Elephant, Red),
        ];
        for (at, kind, side) in expect {
            let piece = board.piece_at(at).unwrap();
            assert_eq!((piece.kind(), piece.side()), (kind, side), "at {at}");
        }
        assert!(board.piece_at(sq(4, 4)).is_none());
    }

    #[test]
    fn rejects_wrong_turn_out_of_bounds_and_illegal_shapes() {
        let mut board = Board::new();
        let black_soldier = id_at(&board, 3, 0);
        assert_eq!(
            board.try_move_piece(black_soldier, sq(4, 0)).unwrap_err(),
            MoveError::NotYourTurn(Black)
        );

        let chariot = id_at(&board, 9, 0);
        assert_eq!(board.try_move_piece(chariot, sq(10, 0)).unwrap_err(), MoveError::OutOfBounds(sq(10, 0)));
        assert_eq!(board.try_move_piece(chariot, sq(6, 0)).unwrap_err(), MoveError::FriendlyCapture(sq(6, 0)));
        assert_eq!(board.try_move_piece(chariot, sq(5, 0)).unwrap_err(), MoveError::IllegalShape(sq(5, 0)));
        assert!(board.history().is_empty());
        assert_eq!(board.revision(), 0);
        assert!(board.is_red_turn());
    }

    #[test]
    fn move_then_undo_restores_everything() {
        let mut board = Board::new();
        let before = fingerprint(&board);
        for mv in board.legal_moves(Red) {
            assert!(board.move_piece(mv.piece, mv.to), "{mv}");
            assert!(!board.is_red_turn());
            board.undo_move();
            assert_eq!(fingerprint(&board), before, "{mv}");
        }
    }

    #[test]
    fn capture_and_undo_restore_victim_and_count() {
        let mut board = Board::from_pieces(
            vec![
                Piece::new(General, Red, sq(9, 3)),
                Piece::new(General, Black, sq(0, 5)),
                Piece::new(Chariot, Red, sq(5, 0)).with_capture_count(2),
                Piece::new(Horse, Black, sq(2, 0)),
            ],
            true,
        );
        let before = fingerprint(&board);
        let chariot = id_at(&board, 5, 0);

        let record = board.try_move_piece(chariot, sq(2, 0)).unwrap();
        assert_eq!(record.prior_capture_count, 2);
        assert_eq!(record.captured.as_ref().map(Piece::kind), Some(Horse));

        assert_eq!(board.pieces().count(), 3);
        assert_eq!(board.piece(chariot).unwrap().capture_count(), 3);
        let capture = board.last_capture().unwrap();
        assert_eq!((capture.victim, capture.victim_side), (Horse, Black));
        let streak = board.streak().unwrap();
        assert_eq!((streak.piece, streak.captures), (chariot, 3));

        board.undo_move();
        assert_eq!(fingerprint(&board), before);
        assert!(board.streak().is_none());
        assert_eq!(board.piece_at(sq(2, 0)).map(Piece::kind), Some(Horse));
    }

    #[test]
    fn capturing_the_general_ends_the_game() {
        let mut board = Board::from_pieces(
            vec![
                Piece::new(General, Red, sq(9, 3)),
                Piece::new(General, Black, sq(0, 5)),
                Piece::new(Chariot, Red, sq(5, 5)),
                Piece::new(Soldier, Black, sq(3, 0)),
            ],
            true,
        );
        let chariot = id_at(&board, 5, 5);
        assert!(board.move_piece(chariot, sq(0, 5)));
        assert_eq!(board.winner(), Some(Red));
        assert!(board.is_terminal());

        let soldier = id_at(&board, 3, 0);
        assert_eq!(board.try_move_piece(soldier, sq(4, 0)).unwrap_err(), MoveError::GameOver(Red));
        assert!(board.legal_moves(Black).is_empty());

        board.undo_move();
        assert_eq!(board.winner(), None);
        assert!(board.general(Black).is_some());

        assert!(board.move_piece(chariot, sq(0, 5)));
        board.restart();
        assert_eq!(board.winner(), None);
        assert_eq!(board.pieces().count(), 32);
        assert!(board.history().is_empty());
        assert_eq!(board.last_event(), Some(&BoardEvent::Restarted));
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut board = Board::new();
        board.undo_move();
        assert_eq!(board.revision(), 0);
        assert!(board.is_red_turn());
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn clones_are_independent_and_keep_history() {
        let mut board = Board::new();
        assert!(board.move_from(sq(7, 1), sq(7, 4)).is_ok());
        assert_eq!(board.revision(), 1);

        let mut copy = board.clone();
        assert_eq!(copy.history(), board.history());
        assert_eq!(copy.revision(), 0);
        assert!(copy.last_event().is_none());

        assert!(copy.move_from(sq(3, 0), sq(4, 0)).is_ok());
        assert!(board.piece_at(sq(4, 0)).is_none());
        assert!(board.piece_at(sq(3, 0)).is_some());
        assert!(!board.is_red_turn());

        copy.undo_move();
        copy.undo_move();
        assert_eq!(board.piece_at(sq(7, 4)).map(Piece::kind), Some(Cannon));
        assert_eq!(copy.piece_at(sq(7, 1)).map(Piece::kind), Some(Cannon));
    }

    #[test]
    fn replace_state_bypasses_rules_and_clears_history() {
        let mut board = Board::new();
        assert!(board.move_from(sq(6, 4), sq(5, 4)).is_ok());

        board.replace_state(
            vec![
                Piece::new(General, Red, sq(8, 4)),
                Piece::new(General, Black, sq(1, 3)),
            ],
            false,
            Some(Black),
        );
        assert!(board.history().is_empty());
        assert_eq!(board.pieces().count(), 2);
        assert!(!board.is_red_turn());
        assert_eq!(board.winner(), Some(Black));
        assert_eq!(board.last_event(), Some(&BoardEvent::Replaced));

        board.replace_state(Vec::new(), false, Some(Black));
        assert_eq!(board.pieces().count(), 32);
        assert!(board.is_red_turn());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn legal_moves_only_for_the_side_on_move() {
        let board = Board::new();
        // Two chariot steps, four per cannon file plus their ranks, and so on:
        // the exact count is the standard opening's 44.
        assert_eq!(board.legal_moves(Red).len(), 44);
        assert!(board.legal_moves(Black).is_empty());
        for mv in board.legal_moves(Red) {
            let piece = board.piece(mv.piece).unwrap();
            assert!(piece.can_move_to(mv.to, &board));
        }
    }
}
