//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, automated control, headless simulation).
//!
//! # Board Dimensions
//!
//! Default playfield:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 at the top)
//! - **Spawn position**: column 2, row 0
//!
//! Both are only defaults; the grid size comes from [`GameConfig`].
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by runners (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 1000 | One row of descent for the falling pair |
//! | `CHAIN_TICK_MS` | 500 | One gravity + clear pass during a chain |
//! | `SOFT_DROP_DIVISOR` | 4 | Soft drop divides the fall interval |
//!
//! # Examples
//!
//! ```
//! use pairfall_types::{GameAction, Rotation, Suit, GameConfig, BOARD_COLS, BOARD_ROWS};
//!
//! // Rotate the falling pair
//! let rotation = Rotation::North;
//! assert_eq!(rotation.rotate_cw(), Rotation::East);
//!
//! // Parse a game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Suits
//! assert!(Suit::Pin.is_numeric());
//! assert!(!Suit::Honor.is_numeric());
//!
//! // Default configuration
//! let config = GameConfig::default();
//! assert_eq!(config.cols, BOARD_COLS);
//! assert_eq!(config.rows, BOARD_ROWS);
//! assert!(config.validate().is_ok());
//! ```

mod config;

pub use config::{BiasConfig, ClearPolicy, ConfigError, GameConfig, OpponentConfig, MAX_GRID_SIDE};

/// Unique physical tile identity (0..136 for dealt tiles)
pub type TileId = i32;

/// Identity carried by tiles synthesized from a canonical kind
pub const SYNTHETIC_TILE_ID: TileId = -1;

/// Default board width in cells (6 columns)
pub const BOARD_COLS: u8 = 6;

/// Default board height in cells (12 rows)
pub const BOARD_ROWS: u8 = 12;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time for the falling pair to descend one row
pub const FALL_INTERVAL_MS: u32 = 1000;

/// Time between two gravity + cluster passes while a chain resolves
pub const CHAIN_TICK_MS: u32 = 500;

/// Soft drop divides the fall interval by this factor
pub const SOFT_DROP_DIVISOR: u32 = 4;

/// Size of the full tile universe
pub const DECK_TOTAL: usize = 136;

/// Number of canonical tile kinds (9 ranks x 3 suits + 7 honors)
pub const KIND_COUNT: usize = 34;

/// Physical copies of each kind
pub const COPIES_PER_KIND: usize = 4;

/// Tiles in a complete hand (4 melds + 1 pair)
pub const HAND_SIZE: usize = 14;

/// Melds in a complete hand
pub const MELDS_PER_HAND: usize = 4;

/// Tiles previewed in the next queue
pub const NEXT_QUEUE_LEN: usize = 4;

/// Smallest same-suit group removed by cluster clearing
pub const CLUSTER_MIN: usize = 4;

/// Points per tile removed in a chain step (multiplied by chain level)
pub const CHAIN_UNIT_SCORE: u32 = 100;

/// Flat score for any winning hand
pub const WIN_BASE_SCORE: u32 = 2000;

/// Bonus per premium tile in a winning hand
pub const PREMIUM_BONUS: u32 = 1000;

/// Rank whose first physical copy is marked premium in each numeric suit
pub const PREMIUM_RANK: u8 = 5;

/// Tile suits
///
/// The three numeric suits carry ranks 1-9; honors carry one of seven
/// [`Honor`] symbols. The dealer and the cluster engine treat all honors as
/// a single fourth suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    /// All suits in dealing order
    pub const ALL: [Suit; 4] = [Suit::Man, Suit::Pin, Suit::Sou, Suit::Honor];

    /// The three numeric suits
    pub const NUMERIC: [Suit; 3] = [Suit::Man, Suit::Pin, Suit::Sou];

    /// Index into per-suit arrays (0-3)
    pub fn index(&self) -> usize {
        match self {
            Suit::Man => 0,
            Suit::Pin => 1,
            Suit::Sou => 2,
            Suit::Honor => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Suit::ALL.get(index).copied()
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Suit::Honor)
    }

    /// Parse suit from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "man" | "m" => Some(Suit::Man),
            "pin" | "p" => Some(Suit::Pin),
            "sou" | "s" => Some(Suit::Sou),
            "honor" | "h" | "z" => Some(Suit::Honor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Man => "man",
            Suit::Pin => "pin",
            Suit::Sou => "sou",
            Suit::Honor => "honor",
        }
    }
}

/// Honor tile symbols (winds then dragons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl Honor {
    pub const ALL: [Honor; 7] = [
        Honor::East,
        Honor::South,
        Honor::West,
        Honor::North,
        Honor::White,
        Honor::Green,
        Honor::Red,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Honor::ALL.get(index).copied()
    }

    /// Single-letter symbol (E, S, W, N, P, F, C)
    pub fn symbol(&self) -> char {
        match self {
            Honor::East => 'E',
            Honor::South => 'S',
            Honor::West => 'W',
            Honor::North => 'N',
            Honor::White => 'P',
            Honor::Green => 'F',
            Honor::Red => 'C',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'E' => Some(Honor::East),
            'S' => Some(Honor::South),
            'W' => Some(Honor::West),
            'N' => Some(Honor::North),
            'P' => Some(Honor::White),
            'F' => Some(Honor::Green),
            'C' => Some(Honor::Red),
            _ => None,
        }
    }
}

/// Rotation states of the falling pair
///
/// Named after where the rotator sits relative to the anchor:
/// - **North**: rotator directly above the anchor (spawn orientation)
/// - **East**: rotator to the right
/// - **South**: rotator directly below
/// - **West**: rotator to the left
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use pairfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use pairfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotator offset from the pair origin; the anchor sits at `(0, 1)`
    pub fn rotator_offset(&self) -> (i8, i8) {
        match self {
            Rotation::North => (0, 0),
            Rotation::East => (1, 1),
            Rotation::South => (0, 2),
            Rotation::West => (-1, 1),
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Where a tile goes when the alloc phase is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocTarget {
    Hand,
    Discard,
}

impl AllocTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocTarget::Hand => "hand",
            AllocTarget::Discard => "discard",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Discrete events produced by an external input collaborator or by the
/// automated engine. Soft drop is a held state and is passed to `tick`
/// instead. In the title and hold phases every action acts as the generic
/// confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the falling pair one column left
    MoveLeft,
    /// Move the falling pair one column right
    MoveRight,
    /// Rotate the rotator clockwise around the anchor
    RotateCw,
    /// Rotate the rotator counter-clockwise around the anchor
    RotateCcw,
    /// Generic "any key" confirm (title, hold)
    Confirm,
    /// Choose where subsequently assigned tiles go
    SetAllocMode(AllocTarget),
    /// Assign one tile (by id) to the current alloc mode
    AllocAssign(TileId),
    /// Commit the allocation (rejected while the hand would exceed 14)
    AllocConfirm,
    /// Put every alloc tile back into the hand
    AllocReset,
}

impl GameAction {
    /// Parse a payload-free action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use pairfall_types::{AllocTarget, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("allocDiscard"), Some(GameAction::SetAllocMode(AllocTarget::Discard)));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "confirm" => Some(GameAction::Confirm),
            "allochand" => Some(GameAction::SetAllocMode(AllocTarget::Hand)),
            "allocdiscard" => Some(GameAction::SetAllocMode(AllocTarget::Discard)),
            "allocconfirm" => Some(GameAction::AllocConfirm),
            "allocreset" => Some(GameAction::AllocReset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Confirm => "confirm",
            GameAction::SetAllocMode(AllocTarget::Hand) => "allocHand",
            GameAction::SetAllocMode(AllocTarget::Discard) => "allocDiscard",
            GameAction::AllocAssign(_) => "allocAssign",
            GameAction::AllocConfirm => "allocConfirm",
            GameAction::AllocReset => "allocReset",
        }
    }
}

/// Phases of a match
///
/// `Title → Play ⇄ (chain processing) → Alloc → Hold → Play → … → GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Title,
    Play,
    Alloc,
    Hold,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Title => "title",
            Phase::Play => "play",
            Phase::Alloc => "alloc",
            Phase::Hold => "hold",
            Phase::GameOver => "gameover",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

/// Match winner by total-score comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Player,
    Opponent,
    Draw,
}

impl Winner {
    pub fn from_totals(player: u32, opponent: u32) -> Self {
        match player.cmp(&opponent) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Opponent,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Opponent => "opponent",
            Winner::Draw => "draw",
        }
    }
}
