//! Saving and restoring games.
//!
//! The engine does not mandate a storage format. `SavedGame` derives serde
//! traits so hosts can use any format they like, and carries a bincode
//! encoding for hosts that just want bytes.

pub mod saved;

pub use saved::{SavedGame, SavedTile, MAX_NEXT_ID};
