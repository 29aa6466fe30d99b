//! Error types for parsing entry points.
//!
//! Game-state transitions never fail loudly; only textual inputs (squares,
//! FEN strings, opening-book payloads) produce these errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChessError {
    #[error("invalid square '{0}' (expected file a-h followed by rank 1-8)")]
    InvalidSquare(String),

    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),

    #[error("unknown colour letter '{0}'")]
    UnknownColor(char),

    #[error("invalid opening book payload: {0}")]
    InvalidBookPayload(#[from] serde_json::Error),
}

pub type ChessResult<T> = Result<T, ChessError>;
