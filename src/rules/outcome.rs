//! What a move did, for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Tile, TileId};
use crate::grid::Position;

/// Game status, derived from the grid after each move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues.
    #[default]
    Active,
    /// A tile reached the win value.
    Won,
    /// The grid is full and no direction changes it.
    Lost,
}

impl GameStatus {
    /// Check if the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// A tile that ended the move somewhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMotion {
    pub id: TileId,
    pub from: Position,
    pub to: Position,
}

/// Two equal tiles combined into one.
///
/// The survivor keeps its identity and takes the doubled value; the absorbed
/// tile leaves the grid. Both travel to `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEvent {
    pub survivor: TileId,
    pub absorbed: TileId,
    /// Where the absorbed tile started.
    pub absorbed_from: Position,
    /// Where the merged tile now sits.
    pub position: Position,
    /// Value of the merged tile.
    pub value: u32,
}

/// Result of one `apply_move` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub direction: Direction,

    /// Did any tile change position or value?
    ///
    /// `false` means nothing else happened either: no spawn, no score.
    pub changed: bool,

    /// Every surviving tile whose position changed, merge survivors included.
    pub motions: Vec<TileMotion>,

    /// Merges, in line order.
    pub merges: Vec<MergeEvent>,

    /// Score earned by this move.
    pub score_gained: u64,

    /// Tile spawned after the move, if any.
    pub spawned: Option<(Position, Tile)>,

    /// Status after the move.
    pub status: GameStatus,
}

impl MoveOutcome {
    /// An outcome for a move that did nothing.
    #[must_use]
    pub fn unchanged(direction: Direction, status: GameStatus) -> Self {
        Self {
            direction,
            changed: false,
            motions: Vec::new(),
            merges: Vec::new(),
            score_gained: 0,
            spawned: None,
            status,
        }
    }
}
