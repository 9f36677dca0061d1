//! The save/restore shape.
//!
//! A saved game is exactly what a host needs to resume play: the occupied
//! cells, the score, the tile id counter and, when the engine's tile source
//! supports it, an RNG checkpoint. Restoring goes through
//! [`SavedGame::to_grid`], which checks everything before anything is
//! applied.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{is_tile_value, GameRngState, Tile, TileId};
use crate::error::{RestoreError, Result};
use crate::grid::{Grid, Position, GRID_SIZE};

/// Highest id counter a restore accepts.
///
/// Leaves half the id space for the restored session to hand out.
pub const MAX_NEXT_ID: u64 = u64::MAX / 2;

/// One occupied cell of a saved game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTile {
    pub position: Position,
    pub tile: Tile,
}

/// A serializable game: snapshot, score, id counter and RNG checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Cells per side of the grid the game was saved from.
    pub grid_size: usize,
    /// Occupied cells, row-major when produced by the engine.
    pub tiles: Vec<SavedTile>,
    pub score: u64,
    /// Next tile id the engine will hand out.
    pub next_id: u64,
    /// Spawn RNG position, so a restored game replays the same spawns.
    ///
    /// `None` for tile sources without checkpoints; restoring then keeps
    /// drawing from the engine's current source.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

impl SavedGame {
    /// Build a saved game from a snapshot.
    #[must_use]
    pub fn new(
        snapshot: Vec<(Position, Tile)>,
        score: u64,
        next_id: u64,
        rng: Option<GameRngState>,
    ) -> Self {
        Self {
            grid_size: GRID_SIZE,
            tiles: snapshot
                .into_iter()
                .map(|(position, tile)| SavedTile { position, tile })
                .collect(),
            score,
            next_id,
            rng,
        }
    }

    /// Validate the saved tiles and lay them out on a fresh grid.
    ///
    /// Rejects a grid size other than 4, an id counter above
    /// [`MAX_NEXT_ID`], an empty tile list, positions off the grid, two tiles
    /// in one cell, repeated ids, values that are not a power of two ≥ 2, and
    /// ids at or above `next_id`.
    pub fn to_grid(&self) -> Result<Grid> {
        if self.grid_size != GRID_SIZE {
            return Err(RestoreError::GridSize {
                expected: GRID_SIZE,
                found: self.grid_size,
            });
        }
        if self.next_id > MAX_NEXT_ID {
            return Err(RestoreError::IdCounterOverflow {
                next_id: self.next_id,
            });
        }
        // No tiles means no move can ever change the grid again.
        if self.tiles.is_empty() {
            return Err(RestoreError::NoTiles);
        }

        let mut grid = Grid::new();
        let mut ids = FxHashSet::default();

        for &SavedTile { position, tile } in &self.tiles {
            if !position.is_valid() {
                return Err(RestoreError::OutOfBounds { id: tile.id, position });
            }
            if !is_tile_value(tile.value) {
                return Err(RestoreError::InvalidValue {
                    position,
                    value: tile.value,
                });
            }
            if grid.get(position).is_some() {
                return Err(RestoreError::DuplicatePosition { position });
            }
            if !ids.insert(tile.id) {
                return Err(RestoreError::DuplicateId { id: tile.id });
            }
            if tile.id.raw() >= self.next_id {
                return Err(RestoreError::IdCounterBehind {
                    id: tile.id,
                    next_id: self.next_id,
                });
            }
            grid.place(Some(tile), position);
        }

        Ok(grid)
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode bytes produced by [`SavedGame::to_bytes`].
    ///
    /// Only decodes; validation happens on restore.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(tiles: &[((i32, i32), u64, u32)], next_id: u64) -> SavedGame {
        SavedGame {
            grid_size: GRID_SIZE,
            tiles: tiles
                .iter()
                .map(|&(at, id, value)| SavedTile {
                    position: Position::from(at),
                    tile: Tile::new(TileId(id), value),
                })
                .collect(),
            score: 0,
            next_id,
            rng: None,
        }
    }

    #[test]
    fn test_valid_layout() {
        let game = saved(&[((0, 0), 0, 2), ((3, 3), 5, 1024)], 6);
        let grid = game.to_grid().unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.get(Position::new(3, 3)), Some(Tile::new(TileId(5), 1024)));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(saved(&[], 0).to_grid(), Err(RestoreError::NoTiles));
    }

    #[test]
    fn test_rejects_id_counter_near_max() {
        for next_id in [MAX_NEXT_ID + 1, u64::MAX - 1, u64::MAX] {
            let game = saved(&[((3, 0), 0, 2)], next_id);
            assert_eq!(
                game.to_grid(),
                Err(RestoreError::IdCounterOverflow { next_id })
            );
        }

        assert!(saved(&[((3, 0), 0, 2)], MAX_NEXT_ID).to_grid().is_ok());
    }

    #[test]
    fn test_rejects_grid_size() {
        let mut game = saved(&[((0, 0), 0, 2)], 1);
        game.grid_size = 5;

        assert_eq!(
            game.to_grid(),
            Err(RestoreError::GridSize { expected: 4, found: 5 })
        );
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let game = saved(&[((4, 0), 0, 2)], 1);
        assert!(matches!(game.to_grid(), Err(RestoreError::OutOfBounds { .. })));
    }

    #[test]
    fn test_rejects_duplicate_position() {
        let game = saved(&[((1, 1), 0, 2), ((1, 1), 1, 4)], 2);
        assert_eq!(
            game.to_grid(),
            Err(RestoreError::DuplicatePosition {
                position: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        for value in [0, 1, 3, 6, 100] {
            let game = saved(&[((0, 0), 0, value)], 1);
            assert!(
                matches!(game.to_grid(), Err(RestoreError::InvalidValue { .. })),
                "value {value} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let game = saved(&[((0, 0), 3, 2), ((1, 0), 3, 4)], 4);
        assert_eq!(game.to_grid(), Err(RestoreError::DuplicateId { id: TileId(3) }));
    }

    #[test]
    fn test_rejects_id_counter_behind() {
        let game = saved(&[((0, 0), 7, 2)], 7);
        assert_eq!(
            game.to_grid(),
            Err(RestoreError::IdCounterBehind {
                id: TileId(7),
                next_id: 7
            })
        );
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut game = saved(&[((2, 1), 0, 8)], 1);
        game.rng = Some(GameRngState {
            seed: 9,
            word_pos: 640,
        });
        let bytes = game.to_bytes().unwrap();

        assert_eq!(SavedGame::from_bytes(&bytes).unwrap(), game);
    }

    #[test]
    fn test_missing_rng_field_defaults() {
        let json = r#"{"grid_size":4,"tiles":[],"score":0,"next_id":0}"#;
        let game: SavedGame = serde_json::from_str(json).unwrap();

        assert_eq!(game.rng, None);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = SavedGame::from_bytes(&[1, 2, 3]);
        assert!(matches!(result, Err(RestoreError::Decode(_))));
    }
}
