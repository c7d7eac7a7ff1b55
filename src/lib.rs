//! Pairfall (workspace facade crate).
//!
//! Re-exports the member crates as `pairfall::{core,engine,types}` and holds
//! the pieces only the headless runner needs: environment settings and the
//! JSONL event journal.

pub use pairfall_core as core;
pub use pairfall_engine as engine;
pub use pairfall_types as types;

pub mod journal;
pub mod settings;
