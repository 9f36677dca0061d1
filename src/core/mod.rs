//! Core engine types: tiles, directions, RNG, configuration.
//!
//! These are the building blocks shared by the grid and the rules. They
//! carry no game logic of their own.

pub mod config;
pub mod direction;
pub mod rng;
pub mod tile;

pub use config::EngineConfig;
pub use direction::Direction;
pub use rng::{GameRng, GameRngState, TileSource};
pub use tile::{is_tile_value, Tile, TileId};
