use std::path::PathBuf;

use thiserror::Error;

use crate::types::{PieceKind, Square};

/// Malformed partial-game text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty game text")]
    Empty,
    #[error("unknown side to move '{0}'")]
    Side(String),
    #[error("malformed piece token '{0}'")]
    Token(String),
    #[error("square {square} is off a {size}x{size} board")]
    OffBoard { square: Square, size: u8 },
    #[error("two pieces on {0}")]
    Occupied(Square),
    #[error("board size {0} is not supported")]
    BoardSize(u8),
}

/// A rejected rules command other than a move (moves answer with
/// [`crate::MoveResult::Invalid`] instead).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("no promotable pawn on {0}")]
    NotPromotable(Square),
    #[error("cannot promote to {0}")]
    PromotionTarget(PieceKind),
}

/// Failure to save or load a full game snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),
    #[error("snapshot holds an inconsistent board: {0}")]
    Invalid(#[from] NotationError),
}

/// Failure to read the TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("board size {0} is not supported")]
    BoardSize(u8),
}
