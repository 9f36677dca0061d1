//! The game engine: moves, spawns, score and terminal detection.
//!
//! `Engine` owns its grid outright. Hosts drive it with
//! [`Engine::apply_move`] and read everything else through queries. It has
//! no internal locking; a host sharing an engine between threads wraps it
//! in its own mutex.

use log::{debug, info, warn};

use super::collapse::collapse;
use super::outcome::{GameStatus, MoveOutcome};
use crate::core::{Direction, EngineConfig, GameRng, Tile, TileId, TileSource};
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::persist::SavedGame;

/// A single game session.
///
/// Generic over its randomness so tests can script spawns.
///
/// ```
/// use slide_engine::{Direction, Engine, GameStatus};
///
/// let mut engine = Engine::with_seed(42);
/// assert_eq!(engine.snapshot().len(), 2);
///
/// let outcome = engine.apply_move(Direction::Left);
/// if outcome.changed {
///     assert!(outcome.spawned.is_some());
/// }
/// assert_eq!(engine.state(), GameStatus::Active);
/// ```
#[derive(Clone, Debug)]
pub struct Engine<R: TileSource = GameRng> {
    config: EngineConfig,
    grid: Grid,
    score: u64,
    status: GameStatus,
    next_id: TileId,
    rng: R,
    last_direction: Option<Direction>,
    moves: u64,
}

impl Engine<GameRng> {
    /// Start a classic game seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(EngineConfig::default(), GameRng::from_entropy())
    }

    /// Start a classic game with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(EngineConfig::default(), GameRng::new(seed))
    }
}

impl Default for Engine<GameRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TileSource> Engine<R> {
    /// Start a game with the given rules and randomness.
    ///
    /// Panics if `config` is invalid (see [`EngineConfig`]'s builders).
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        config.assert_valid();

        let mut engine = Self {
            config,
            grid: Grid::new(),
            score: 0,
            status: GameStatus::Active,
            next_id: TileId(0),
            rng,
            last_direction: None,
            moves: 0,
        };
        engine.start();
        engine
    }

    /// Throw the current game away and open a new one.
    ///
    /// Keeps the config and continues drawing from the same RNG. Tile ids
    /// keep counting up so no id is reused within the session.
    pub fn reset(&mut self) {
        info!("resetting game at score {} after {} moves", self.score, self.moves);
        self.start();
    }

    fn start(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.moves = 0;
        self.last_direction = None;
        for _ in 0..self.config.initial_tiles {
            self.spawn();
        }
        self.status = self.evaluate();
    }

    // === Moves ===

    /// Collapse the grid towards `direction`.
    ///
    /// If nothing moves, or the game is already over, the outcome reports
    /// `changed: false` and the engine is untouched. Otherwise the score
    /// grows by the merge gains, one tile spawns, and the status is
    /// recomputed.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_terminal() {
            return MoveOutcome::unchanged(direction, self.status);
        }

        let collapsed = collapse(&mut self.grid, direction);
        if !collapsed.changed() {
            return MoveOutcome::unchanged(direction, self.status);
        }

        for merge in &collapsed.merges {
            debug!(
                "{} absorbed {} at {} -> {}",
                merge.survivor, merge.absorbed, merge.position, merge.value
            );
        }

        self.score += collapsed.gained;
        self.moves += 1;
        self.last_direction = Some(direction);

        let spawned = self.spawn();

        let previous = self.status;
        self.status = self.evaluate();
        if self.status != previous {
            info!(
                "game {} after {} moves with score {}",
                self.status, self.moves, self.score
            );
        }

        MoveOutcome {
            direction,
            changed: true,
            motions: collapsed.motions,
            merges: collapsed.merges,
            score_gained: collapsed.gained,
            spawned,
            status: self.status,
        }
    }

    /// Would a move towards `direction` change the grid?
    ///
    /// Ignores whether the game has ended.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let mut scratch = self.grid.clone();
        collapse(&mut scratch, direction).changed()
    }

    /// Directions that would change the grid, in `Direction::ALL` order.
    #[must_use]
    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_move(direction))
            .collect()
    }

    fn spawn(&mut self) -> Option<(Position, Tile)> {
        let empty = self.grid.empty_positions();
        if empty.is_empty() {
            return None;
        }

        // Modulo keeps a misbehaving custom source inside the grid.
        let at = empty[self.rng.pick_index(empty.len()) % empty.len()];
        let value = if self.rng.chance(self.config.four_probability) {
            4
        } else {
            2
        };
        let tile = Tile::new(self.alloc_id(), value);

        self.grid.place(Some(tile), at);
        debug!("spawned {} with value {} at {}", tile.id, value, at);

        Some((at, tile))
    }

    fn alloc_id(&mut self) -> TileId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn evaluate(&self) -> GameStatus {
        if self.grid.max_value() >= self.config.win_value {
            GameStatus::Won
        } else if self.grid.is_full() && self.legal_directions().is_empty() {
            GameStatus::Lost
        } else {
            GameStatus::Active
        }
    }

    // === Queries ===

    /// Occupied cells in row-major order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Position, Tile)> {
        self.grid.snapshot()
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current status.
    #[must_use]
    pub fn state(&self) -> GameStatus {
        self.status
    }

    /// Read-only view of the grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rules this engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Direction of the last move that changed the grid.
    ///
    /// The presentation layer uses it to pick the edge spawned tiles enter
    /// from. `None` until the first such move.
    #[must_use]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Grid-changing moves since the game started or was restored.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Highest tile value on the grid.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.grid.max_value()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.grid.empty_positions().len()
    }

    /// The id the next spawned tile will get.
    #[must_use]
    pub fn next_id(&self) -> TileId {
        self.next_id
    }

    /// Mutable access to the tile source, e.g. to re-script a test source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // === Persistence ===

    /// Capture snapshot, score, id counter and the tile source checkpoint.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        SavedGame::new(
            self.snapshot(),
            self.score,
            self.next_id.raw(),
            self.rng.checkpoint(),
        )
    }

    /// Replace the current game with a saved one.
    ///
    /// The saved data is fully validated first; on error nothing changes.
    /// The status is recomputed from the restored grid and the move counter
    /// starts over. A saved RNG checkpoint is handed to the tile source, so
    /// a `GameRng` engine replays the spawns the saved game would have made.
    pub fn restore(&mut self, saved: &SavedGame) -> Result<()> {
        let grid = saved.to_grid().map_err(|error| {
            warn!("rejected saved game: {error}");
            error
        })?;

        self.grid = grid;
        self.score = saved.score;
        self.next_id = TileId(saved.next_id);
        if let Some(state) = &saved.rng {
            self.rng.resume(state);
        }
        self.moves = 0;
        self.last_direction = None;
        self.status = self.evaluate();

        info!(
            "restored game with {} tiles, score {}, status {}",
            self.grid.len(),
            self.score,
            self.status
        );
        Ok(())
    }
}
