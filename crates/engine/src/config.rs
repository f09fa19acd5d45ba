//! Configuration for the Xiangqi engine.

use crate::constants::{DEFAULT_SCORE_CEILING, DEFAULT_SEARCH_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Search constants
    /// Plies searched from the root; leaves are evaluated at this depth.
    pub max_depth: i32,

    // Evaluation constants
    /// Random leaf scores are drawn from `0..score_ceiling`.
    pub score_ceiling: i32,
    /// Seed for the random evaluator. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_SEARCH_DEPTH,
            score_ceiling: DEFAULT_SCORE_CEILING,
            seed: None,
        }
    }
}
