//! Engine configuration.
//!
//! The classic rules are the default: the game is won at 2048, a spawned
//! tile is a 4 one time in ten, and a game opens with two tiles. Hosts can
//! tune each of these, or load a whole `EngineConfig` from their own config
//! files through serde.

use serde::{Deserialize, Serialize};

use super::tile::is_tile_value;
use crate::grid::CELL_COUNT;

/// Default tile value that wins the game.
pub const DEFAULT_WIN_VALUE: u32 = 2048;

/// Default probability that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Default number of tiles placed by `new()`/`reset()`.
pub const DEFAULT_INITIAL_TILES: usize = 2;

/// Rules the engine plays by.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A tile with at least this value wins the game.
    pub win_value: u32,

    /// Probability that a spawned tile has value 4 (otherwise 2).
    pub four_probability: f64,

    /// Tiles placed on an empty grid when a game starts.
    pub initial_tiles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_value: DEFAULT_WIN_VALUE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            initial_tiles: DEFAULT_INITIAL_TILES,
        }
    }
}

impl EngineConfig {
    /// Create the classic configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the winning tile value.
    ///
    /// Panics unless `value` is a power of two of at least 4.
    #[must_use]
    pub fn with_win_value(mut self, value: u32) -> Self {
        assert!(
            value >= 4 && is_tile_value(value),
            "Win value must be a power of two >= 4"
        );
        self.win_value = value;
        self
    }

    /// Set the probability of spawning a 4.
    ///
    /// Panics unless `probability` is within `[0, 1]`.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Four probability must be within [0, 1]"
        );
        self.four_probability = probability;
        self
    }

    /// Set how many tiles a new game opens with.
    ///
    /// Panics if `count` is zero or exceeds the number of cells.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        assert!(
            (1..=CELL_COUNT).contains(&count),
            "Initial tiles must be between 1 and 16"
        );
        self.initial_tiles = count;
        self
    }

    /// Check every field, as the builder methods would.
    ///
    /// Used on configs that bypassed the builders, e.g. deserialized ones.
    pub(crate) fn assert_valid(&self) {
        assert!(
            self.win_value >= 4 && is_tile_value(self.win_value),
            "Win value must be a power of two >= 4"
        );
        assert!(
            (0.0..=1.0).contains(&self.four_probability),
            "Four probability must be within [0, 1]"
        );
        assert!(
            (1..=CELL_COUNT).contains(&self.initial_tiles),
            "Initial tiles must be between 1 and 16"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.win_value, 2048);
        assert_eq!(config.four_probability, 0.1);
        assert_eq!(config.initial_tiles, 2);
        assert_eq!(config, EngineConfig::new());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_win_value(64)
            .with_four_probability(0.0)
            .with_initial_tiles(4);

        assert_eq!(config.win_value, 64);
        assert_eq!(config.four_probability, 0.0);
        assert_eq!(config.initial_tiles, 4);
    }

    #[test]
    #[should_panic(expected = "Win value must be a power of two")]
    fn test_win_value_not_power_of_two() {
        let _ = EngineConfig::new().with_win_value(1000);
    }

    #[test]
    #[should_panic(expected = "Win value must be a power of two")]
    fn test_win_value_too_small() {
        let _ = EngineConfig::new().with_win_value(2);
    }

    #[test]
    #[should_panic(expected = "Four probability must be within")]
    fn test_probability_out_of_range() {
        let _ = EngineConfig::new().with_four_probability(1.5);
    }

    #[test]
    #[should_panic(expected = "Initial tiles must be between")]
    fn test_too_many_initial_tiles() {
        let _ = EngineConfig::new().with_initial_tiles(17);
    }

    #[test]
    #[should_panic(expected = "Initial tiles must be between")]
    fn test_zero_initial_tiles() {
        let _ = EngineConfig::new().with_initial_tiles(0);
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{"win_value": 512}"#).unwrap();

        assert_eq!(config.win_value, 512);
        assert_eq!(config.four_probability, DEFAULT_FOUR_PROBABILITY);
        assert_eq!(config.initial_tiles, DEFAULT_INITIAL_TILES);
    }

    #[test]
    #[should_panic(expected = "Four probability must be within")]
    fn test_assert_valid_rejects_deserialized() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"four_probability": -0.5}"#).unwrap();
        config.assert_valid();
    }
}
