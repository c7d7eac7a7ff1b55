//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: The same seed deals and plays out identically
//! - **Testable**: Unit tests for every rule, plus tile conservation checks
//! - **Portable**: Runs headless, in a terminal or behind any front end
//!
//! # Module Structure
//!
//! - [`tile`]: Tile faces, kinds, melds and the 136-tile set
//! - [`rng`]: Seeded LCG exposed as a [`rand::RngCore`]
//! - [`planner`]: Suit-bias planner deciding the suit of each dealt pair
//! - [`deck`]: Shuffled per-suit deck and the dealer on top of it
//! - [`board`]: Grid storage, gravity and same-suit cluster clearing
//! - [`piece`]: The falling two-tile pair, movement and rotation
//! - [`solver`]: Exact 4-meld + 1-pair decomposition of hands and pools
//! - [`win_search`]: The opponent's search over board and discard tiles
//! - [`hand`]: Win results, realized melds and no-win reasons
//! - [`preview`]: Greedy "how close is the opponent" hint
//! - [`scoring`]: Chain points, win points and the final verdict
//! - [`events`]: Observable events drained by runners
//! - [`game_state`]: The phase machine tying it all together
//! - [`snapshot`]: Per-frame view of the state for renderers
//!
//! # Game Rules
//!
//! - **Dealing**: Pairs are drawn from a shuffled 136-tile deck; a planner
//!   steers how often both tiles share a suit towards a target rate
//! - **Chains**: After a pair locks, gravity and same-suit clusters of four
//!   or more resolve step by step, each step worth `tiles * 100 * level`
//! - **Allocation**: Cleared tiles join the hand; up to 14 may be kept, the
//!   rest go to a shared discard pool
//! - **Hold**: The hand is checked for 4 melds + 1 pair, and the opponent
//!   searches board + discard for the same shape
//! - **End**: When the deck runs dry (or a pair cannot spawn) both sides get
//!   a final evaluation and the larger total wins
//!
//! # Example
//!
//! ```
//! use pairfall_core::GameState;
//! use pairfall_types::{GameAction, GameConfig, Phase};
//!
//! let mut game = GameState::new(12345, GameConfig::default());
//! game.apply_action(GameAction::Confirm);
//! assert_eq!(game.phase(), Phase::Play);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.tick(1000, false);
//! assert_eq!(game.inventory_ids().len(), 136);
//! ```
//!
//! # Timing
//!
//! - **Fall**: one row every 1000ms, a quarter of that with soft drop
//! - **Chain step**: one gravity + clear pass every 500ms
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod board;
pub mod deck;
pub mod events;
pub mod game_state;
pub mod hand;
pub mod piece;
pub mod planner;
pub mod preview;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod solver;
pub mod tile;
pub mod win_search;

pub use pairfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use deck::{Deck, Dealer};
pub use events::GameEvent;
pub use game_state::GameState;
pub use hand::{NoWinReason, Outcome, WinHand};
pub use piece::FallingPair;
pub use planner::{BiasPlanner, PairPlan};
pub use preview::{greedy_preview, Preview};
pub use rng::SimpleRng;
pub use scoring::{chain_score, win_score, FinalResult};
pub use snapshot::{FallingSnapshot, GameSnapshot};
pub use solver::{solve_hand, solve_pool};
pub use tile::{full_tile_set, Kind, Meld, Tile, TileFace};
