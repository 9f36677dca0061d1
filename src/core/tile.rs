//! Tile identification and values.
//!
//! Every tile placed on the grid gets a unique `TileId` for its lifetime.
//! Identity is what the presentation layer animates: when a tile slides, its
//! id moves with it; when two tiles merge, one id survives and the other is
//! retired.
//!
//! ## ID Allocation
//!
//! Ids are handed out by the engine from a monotonically increasing counter.
//! They are never reused within a session, and a restored session resumes the
//! counter from the saved value.
//!
//! ```
//! use slide_engine::core::{Tile, TileId};
//!
//! let tile = Tile::new(TileId(7), 4);
//! assert_eq!(tile.id, TileId(7));
//! assert_eq!(tile.value, 4);
//! assert_eq!(tile.doubled(), Some(Tile::new(TileId(7), 8)));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for TileId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Check that a value can live on a tile: a power of two, at least 2.
#[must_use]
pub const fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// A numbered game piece.
///
/// `value` is always a power of two ≥ 2 for tiles created by the engine or
/// accepted by a restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identity, used for animation correlation.
    pub id: TileId,
    /// Face value.
    pub value: u32,
}

impl Tile {
    /// Create a tile.
    #[must_use]
    pub const fn new(id: TileId, value: u32) -> Self {
        Self { id, value }
    }

    /// The same tile with its value replaced.
    #[must_use]
    pub const fn with_value(self, value: u32) -> Self {
        Self { id: self.id, value }
    }

    /// The same tile after absorbing an equal partner.
    ///
    /// `None` if the doubled value does not fit in a `u32`.
    #[must_use]
    pub const fn doubled(self) -> Option<Self> {
        match self.value.checked_mul(2) {
            Some(value) => Some(self.with_value(value)),
            None => None,
        }
    }
}
