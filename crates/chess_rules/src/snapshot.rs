//! Full-state persistence of a [`Game`].
//!
//! The blob is JSON produced by serde_json. Callers should treat it as
//! opaque; the only promise is that loading what was saved yields an equal
//! game.

use std::fs;
use std::path::Path;

use crate::error::SnapshotError;
use crate::game::Game;

pub fn to_bytes(game: &Game) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec(game)?)
}

/// Decode and validate a snapshot. Boards that break the one-piece-per-
/// square rule or the size bounds are rejected.
pub fn from_bytes(bytes: &[u8]) -> Result<Game, SnapshotError> {
    let game: Game = serde_json::from_slice(bytes)?;
    game.board().validate()?;
    Ok(game)
}

pub fn save(path: &Path, game: &Game) -> Result<(), SnapshotError> {
    let bytes = to_bytes(game)?;
    fs::write(path, bytes).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<Game, SnapshotError> {
    let bytes = fs::read(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_bytes(&bytes)
}
