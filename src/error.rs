//! Errors surfaced by the engine.
//!
//! Moving, querying and snapshotting cannot fail. Restoring a saved game is
//! the one operation that validates outside input, and every way that input
//! can be malformed has a variant here.

use thiserror::Error;

use crate::core::TileId;
use crate::grid::Position;

pub type Result<T> = std::result::Result<T, RestoreError>;

/// Saved game data that cannot be restored.
///
/// A rejected restore leaves the engine exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("grid size {found} does not match engine grid size {expected}")]
    GridSize { expected: usize, found: usize },

    #[error("tile {id} is outside the grid at {position}")]
    OutOfBounds { id: TileId, position: Position },

    #[error("more than one tile at {position}")]
    DuplicatePosition { position: Position },

    #[error("{id} appears more than once")]
    DuplicateId { id: TileId },

    #[error("tile value {value} at {position} is not a power of two >= 2")]
    InvalidValue { position: Position, value: u32 },

    #[error("{id} is not below the saved id counter {next_id}")]
    IdCounterBehind { id: TileId, next_id: u64 },

    #[error("saved id counter {next_id} leaves too few ids to hand out")]
    IdCounterOverflow { next_id: u64 },

    #[error("saved game holds no tiles")]
    NoTiles,

    #[error("saved game could not be decoded: {0}")]
    Decode(String),
}

impl From<bincode::Error> for RestoreError {
    fn from(error: bincode::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
