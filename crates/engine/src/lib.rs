//! Automated control on top of the public core API.
//!
//! Nothing here reaches into core internals: placements are carried out with
//! the same [`GameAction`](pairfall_types::GameAction)s and ticks a player
//! would produce, so every rule of the core still applies.

pub mod alloc;
pub mod autoplay;
pub mod place;

pub use pairfall_core as core;
pub use pairfall_types as types;

pub use alloc::{auto_allocate, plan_allocation, AllocError};
pub use autoplay::{play_match, step, AutoplayError, Step};
pub use place::{apply_place, best_placement, board_quality, PlaceError, Placement};
