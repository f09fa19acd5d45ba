//! Minimax search with alpha-beta pruning for the automated opponent.

use crate::board::Board;
use crate::config::Config;
use crate::constants::Side;
use crate::evaluate::{Evaluator, RandomEvaluator};
use crate::record::MoveRecord;
use std::time::Instant;

/// The search engine, bound to the side it plays for.
pub struct Search<E = RandomEvaluator> {
    side: Side,
    config: Config,
    evaluator: E,
    nodes_searched: u64,
}

impl Search<RandomEvaluator> {
    /// Creates a search using the random placeholder evaluator.
    pub fn new(side: Side, config: Config) -> Self {
        let evaluator = RandomEvaluator::new(&config);
        Self::with_evaluator(side, config, evaluator)
    }
}

impl<E: Evaluator> Search<E> {
    pub fn with_evaluator(side: Side, config: Config, evaluator: E) -> Self {
        Self {
            side,
            config,
            evaluator,
            nodes_searched: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Nodes visited by the most recent `find_best_move`.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Picks a move for the searching side and returns the resulting position.
    ///
    /// Every legal root move is scored with [`Search::minimax`] from depth 1
    /// with the opponent to reply; the highest score wins and the first move
    /// seen wins ties. The returned board is an independent snapshot whose
    /// last history entry is the chosen move. `None` means the searching side
    /// has no legal move on this board, which includes the case where it is
    /// not this side's turn.
    pub fn find_best_move(&mut self, board: &Board) -> Option<Board> {
        self.nodes_searched = 0;
        let start_time = Instant::now();

        let mut work = board.clone();
        let moves = work.legal_moves(self.side);
        let mut best: Option<(i32, Board)> = None;

        for mv in &moves {
            if !work.move_piece(mv.piece, mv.to) {
                continue;
            }
            let score = self.minimax(&mut work, 1, false, i32::MIN, i32::MAX);
            if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
                best = Some((score, work.clone()));
            }
            work.undo_move();
        }

        let pv = best
            .as_ref()
            .and_then(|(_, child)| child.last_move())
            .map(|record| record.as_move().to_string())
            .unwrap_or_default();
        tracing::debug!(
            side = %self.side,
            moves = moves.len(),
            score = ?best.as_ref().map(|(score, _)| *score),
            pv = pv.as_str(),
            nodes = self.nodes_searched,
            time_ms = start_time.elapsed().as_millis() as u64,
            "search finished"
        );

        best.map(|(_, board)| board)
    }

    /// Like [`Search::find_best_move`], but returns only the chosen move.
    pub fn best_move(&mut self, board: &Board) -> Option<MoveRecord> {
        self.find_best_move(board)
            .and_then(|child| child.last_move().cloned())
    }

    /// Alpha-beta minimax over `board`, which is restored before returning.
    ///
    /// `depth` counts plies already played from the root; at
    /// `config.max_depth` the position is scored by the evaluator. The
    /// maximizing player is the searching side. A node with no legal moves
    /// returns the identity of its fold: `i32::MIN` when maximizing,
    /// `i32::MAX` when minimizing.
    pub fn minimax(&mut self, board: &mut Board, depth: i32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes_searched += 1;

        if depth >= self.config.max_depth {
            return self.evaluator.evaluate(board, self.side);
        }

        let mover = if maximizing { self.side } else { self.side.opponent() };
        let moves = board.legal_moves(mover);

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in moves {
                if !board.move_piece(mv.piece, mv.to) {
                    continue;
                }
                let eval = self.minimax(board, depth + 1, false, alpha, beta);
                board.undo_move();

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                if !board.move_piece(mv.piece, mv.to) {
                    continue;
                }
                let eval = self.minimax(board, depth + 1, true, alpha, beta);
                board.undo_move();

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            min_eval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PieceKind::*;
    use crate::constants::Side::{Black, Red};
    use crate::evaluate::MaterialEvaluator;
    use crate::piece::Piece;
    use crate::record::Move;
    use crate::square::Square;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col)
    }

    fn config(max_depth: i32) -> Config {
        Config { max_depth, seed: Some(11), ..Config::default() }
    }

    /// Reference minimax without pruning.
    fn plain_minimax(board: &mut Board, side: Side, depth: i32, max_depth: i32, maximizing: bool) -> i32 {
        if depth >= max_depth {
            return MaterialEvaluator.evaluate(board, side);
        }
        let mover = if maximizing { side } else { side.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in board.legal_moves(mover) {
            assert!(board.move_piece(mv.piece, mv.to));
            let eval = plain_minimax(board, side, depth + 1, max_depth, !maximizing);
            board.undo_move();
            best = if maximizing { best.max(eval) } else { best.min(eval) };
        }
        best
    }

    fn plain_best_move(board: &Board, max_depth: i32) -> Option<Move> {
        let side = board.side_to_move();
        let mut work = board.clone();
        let mut best: Option<(i32, Move)> = None;
        for mv in work.legal_moves(side) {
            assert!(work.move_piece(mv.piece, mv.to));
            let score = plain_minimax(&mut work, side, 1, max_depth, false);
            work.undo_move();
            if best.is_none_or(|(b, _)| score > b) {
                best = Some((score, mv));
            }
        }
        best.map(|(_, mv)| mv)
    }

    fn skirmish() -> Board {
        Board::from_pieces(
            vec![
                Piece::new(General, Red, sq(9, 4)),
                Piece::new(General, Black, sq(0, 3)),
                Piece::new(Chariot, Red, sq(6, 1)),
                Piece::new(Cannon, Red, sq(7, 7)),
                Piece::new(Horse, Black, sq(2, 2)),
                Piece::new(Soldier, Black, sq(5, 6)),
                Piece::new(Chariot, Black, sq(1, 8)),
            ],
            true,
        )
    }

    #[test]
    fn pruning_preserves_the_chosen_move() {
        for max_depth in 1..=3 {
            let board = skirmish();
            let mut search = Search::with_evaluator(Red, config(max_depth), MaterialEvaluator);
            let pruned = search.best_move(&board).map(|r| r.as_move());
            assert_eq!(pruned, plain_best_move(&board, max_depth), "depth {max_depth}");
        }

        let mut board = skirmish();
        assert!(board.move_from(sq(9, 4), sq(8, 4)).is_ok());
        let mut search = Search::with_evaluator(Black, config(3), MaterialEvaluator);
        let pruned = search.best_move(&board).map(|r| r.as_move());
        assert_eq!(pruned, plain_best_move(&board, 3));
    }

    #[test]
    fn pruning_preserves_the_root_value() {
        let board = skirmish();
        let mut search = Search::with_evaluator(Red, config(3), MaterialEvaluator);
        let mut work = board.clone();
        let pruned = search.minimax(&mut work, 0, true, i32::MIN, i32::MAX);
        let plain = plain_minimax(&mut board.clone(), Red, 0, 3, true);
        assert_eq!(pruned, plain);
        // The working board is restored.
        assert!(work.history().is_empty());
        assert!(work.is_red_turn());
    }

    #[test]
    fn takes_a_free_general() {
        let board = Board::from_pieces(
            vec![
                Piece::new(General, Red, sq(9, 3)),
                Piece::new(General, Black, sq(0, 4)),
                Piece::new(Chariot, Red, sq(5, 4)),
                Piece::new(Soldier, Black, sq(3, 0)),
            ],
            true,
        );
        let mut search = Search::with_evaluator(Red, config(4), MaterialEvaluator);
        let child = search.find_best_move(&board).unwrap();
        assert_eq!(child.winner(), Some(Red));
        let record = child.last_move().unwrap();
        assert_eq!((record.from, record.to), (sq(5, 4), sq(0, 4)));
        // The live board is untouched.
        assert!(board.history().is_empty());
        assert!(board.general(Black).is_some());
    }

    #[test]
    fn chosen_move_is_legal_on_the_live_board() {
        let mut board = Board::new();
        let mut search = Search::new(Red, config(2));
        let record = search.best_move(&board).unwrap();
        let piece = board.piece(record.piece).unwrap();
        assert_eq!(piece.position(), record.from);
        assert!(piece.can_move_to(record.to, &board));
        assert!(board.move_from(record.from, record.to).is_ok());
        assert!(search.nodes_searched() > 0);
    }

    #[test]
    fn no_moves_means_no_result() {
        // Game already over.
        let mut board = skirmish();
        let pieces: Vec<Piece> = board.pieces().cloned().collect();
        board.replace_state(pieces, true, Some(Black));
        assert!(Search::new(Red, config(4)).find_best_move(&board).is_none());

        // Searching for the side that is not on move.
        assert!(Search::new(Black, config(4)).find_best_move(&skirmish()).is_none());

        // A red soldier wall on black's back rank: nothing can step anywhere.
        let mut pieces: Vec<Piece> = (0..9).map(|col| Piece::new(Soldier, Red, sq(0, col))).collect();
        pieces.push(Piece::new(General, Black, sq(1, 4)));
        let walled = Board::from_pieces(pieces, true);
        assert!(walled.legal_moves(Red).is_empty());
        assert!(Search::new(Red, config(4)).find_best_move(&walled).is_none());
        assert_eq!(walled.winner(), None);
    }

    #[test]
    fn ties_go_to_the_first_move() {
        // At depth 1 every child is scored directly, and without captures
        // they all score the same.
        let board = Board::from_pieces(
            vec![
                Piece::new(General, Red, sq(9, 3)),
                Piece::new(General, Black, sq(0, 5)),
            ],
            true,
        );
        let mut search = Search::with_evaluator(Red, config(1), MaterialEvaluator);
        let first = board.legal_moves(Red)[0];
        let chosen = search.best_move(&board).unwrap();
        assert_eq!(chosen.as_move(), first);
    }
}
