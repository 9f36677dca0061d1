//! # slide-engine
//!
//! A sliding-tile (2048-style) grid engine for game clients.
//!
//! ## Design Principles
//!
//! 1. **Pure Logic**: No I/O, no rendering, no global state. A host
//!    constructs an `Engine`, feeds it directions and reads back snapshots.
//!
//! 2. **Inert Grid**: Grid storage ignores out-of-range positions instead of
//!    failing. Enable the `strict-grid` feature to turn those into panics
//!    while developing.
//!
//! 3. **Identity-Bearing Tiles**: Every tile keeps a `TileId` for its
//!    lifetime; merges report which tile survived and which was absorbed,
//!    so the presentation layer can animate both.
//!
//! 4. **Injected Randomness**: Spawns draw through `TileSource`. `GameRng`
//!    is the seeded default; tests can script every spawn.
//!
//! ## Modules
//!
//! - `core`: Tiles, directions, RNG, configuration
//! - `grid`: 4×4 positional storage
//! - `rules`: Line collapse, the `Engine`, move outcomes
//! - `persist`: Save/restore shape with validation
//! - `error`: Restore errors

pub mod core;
pub mod error;
pub mod grid;
pub mod persist;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{Direction, EngineConfig, GameRng, GameRngState, Tile, TileId, TileSource};

pub use crate::error::{RestoreError, Result};

pub use crate::grid::{Grid, Position, CELL_COUNT, GRID_SIZE};

pub use crate::persist::{SavedGame, SavedTile, MAX_NEXT_ID};

pub use crate::rules::{Engine, GameStatus, MergeEvent, MoveOutcome, TileMotion};
