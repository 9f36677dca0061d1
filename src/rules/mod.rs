//! Game rules.
//!
//! - `collapse`: the per-line slide and merge step, shared by all directions
//! - `engine`: the session that applies moves, spawns tiles and keeps score
//! - `outcome`: what a move reports back to the presentation layer

pub mod collapse;
pub mod engine;
pub mod outcome;

pub use collapse::{collapse, collapse_line, line_positions, Collapse};
pub use engine::Engine;
pub use outcome::{GameStatus, MergeEvent, MoveOutcome, TileMotion};
