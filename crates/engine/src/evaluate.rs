//! Evaluates a board position and returns a score.

use crate::board::Board;
use crate::config::Config;
use crate::constants::Side;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scores a leaf position from `perspective`'s point of view; higher is better.
pub trait Evaluator {
    fn evaluate(&mut self, board: &Board, perspective: Side) -> i32;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, board: &Board, perspective: Side) -> i32 {
        (**self).evaluate(board, perspective)
    }
}

/// The default placeholder: ignores the position and returns a uniform
/// random score in `0..ceiling`.
#[derive(Debug, Clone)]
pub struct RandomEvaluator {
    rng: StdRng,
    ceiling: i32,
}

impl RandomEvaluator {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            ceiling: config.score_ceiling.max(1),
        }
    }
}

impl Default for RandomEvaluator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Evaluator for RandomEvaluator {
    fn evaluate(&mut self, _board: &Board, _perspective: Side) -> i32 {
        self.rng.gen_range(0..self.ceiling)
    }
}

/// Deterministic material balance: own piece values minus the opponent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&mut self, board: &Board, perspective: Side) -> i32 {
        board
            .pieces()
            .map(|p| {
                let value = p.kind().value();
                if p.side() == perspective { value } else { -value }
            })
            .sum()
    }
}
