//! The automated opponent, run off the async loop.

use clap::ValueEnum;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex as TokioMutex;
use xiangqi_engine::evaluate::{Evaluator, MaterialEvaluator, RandomEvaluator};
use xiangqi_engine::{Board, Config, Search, Side};

pub type DynEvaluator = Box<dyn Evaluator + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EvaluatorKind {
    /// Random leaf scores.
    Random,
    /// Material balance.
    Material,
}

impl EvaluatorKind {
    pub fn build(self, config: &Config) -> DynEvaluator {
        match self {
            EvaluatorKind::Random => Box::new(RandomEvaluator::new(config)),
            EvaluatorKind::Material => Box::new(MaterialEvaluator),
        }
    }
}

#[derive(Debug, Error)]
pub enum OpponentError {
    #[error("search task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub struct Opponent {
    side: Side,
    search: Arc<TokioMutex<Search<DynEvaluator>>>,
}

impl Opponent {
    pub fn new(side: Side, config: Config, kind: EvaluatorKind) -> Self {
        let evaluator = kind.build(&config);
        Self {
            side,
            search: Arc::new(TokioMutex::new(Search::with_evaluator(side, config, evaluator))),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Searches a snapshot of `board` on the blocking pool and hands back the
    /// resulting position. The live board is never touched.
    pub async fn think(&self, board: &Board) -> Result<Option<Board>, OpponentError> {
        let snapshot = board.clone();
        let mut search = Arc::clone(&self.search).lock_owned().await;
        let child = tokio::task::spawn_blocking(move || search.find_best_move(&snapshot)).await?;
        Ok(child)
    }
}
