use crate::experiment::GameKind;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal moves from root")]
    NoLegalMoves,

    #[error("iteration budget must be at least 1")]
    ZeroIterations,

    #[error("blend weight {0} is outside [0, 1]")]
    InvalidBlendWeight(f64),
}

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{game} does not accept parameter {param:?}")]
    InvalidGameParam { game: GameKind, param: Option<u32> },

    #[error("invalid experiment config: {0}")]
    InvalidConfig(String),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}
