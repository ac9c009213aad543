//! Rules engine for standard chess.
//!
//! - [`Piece`] generates pseudo-legal destinations per variant.
//! - [`Board`] holds placed pieces and answers occupancy and attack queries.
//! - [`Game`] enforces turn order, filters out moves that leave the king in
//!   check, applies castling, en passant and promotion, and reports
//!   check, checkmate and stalemate.
//! - [`GameManager`] wraps a game with snapshot undo/redo, the
//!   partial-game text format, file snapshots and a [`LogSink`].
//!
//! There is no search or evaluation here, and no tournament rules beyond
//! stalemate.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod log;
pub mod manager;
pub mod notation;
pub mod piece;
pub mod snapshot;
pub mod types;

pub use board::*;
pub use config::GameConfig;
pub use error::*;
pub use game::Game;
pub use history::History;
pub use log::*;
pub use manager::*;
pub use notation::{format_game, parse_game, parse_token};
pub use piece::*;
pub use types::*;
