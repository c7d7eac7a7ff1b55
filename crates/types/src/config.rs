//! Match configuration record.
//!
//! The core accepts exactly one [`GameConfig`]; loading it from files or the
//! environment is the caller's business.

use std::fmt;

use crate::{BOARD_COLS, BOARD_ROWS, CHAIN_TICK_MS, DECK_TOTAL, FALL_INTERVAL_MS};

/// Largest supported grid side
pub const MAX_GRID_SIDE: u8 = 64;

/// What the opponent's win removes from the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearPolicy {
    /// Remove only the tiles the winning hand consumed (board and discard)
    UsedTilesOnly,
    /// Clear the whole board (legacy behavior; discards are untouched)
    ClearAll,
}

impl ClearPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "used-only" | "used_only" | "usedonly" => Some(ClearPolicy::UsedTilesOnly),
            "clear-all" | "clear_all" | "clearall" => Some(ClearPolicy::ClearAll),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearPolicy::UsedTilesOnly => "used-only",
            ClearPolicy::ClearAll => "clear-all",
        }
    }
}

/// Feedback-controlled same-suit pair bias
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasConfig {
    pub enabled: bool,
    /// Long-run same-suit pair rate the controller steers toward
    pub target_rate: f64,
    /// Number of recent pairs in the sliding window
    pub window: usize,
    pub min_rate: f64,
    pub max_rate: f64,
    pub feedback_gain: f64,
    /// Consecutive pairs a suit may dominate before its weight is penalized
    pub max_streak: u32,
    /// Weight multiplier for the streak leader once `max_streak` is reached
    pub streak_penalty: f64,
    /// Exponent applied to each suit's remaining-stock fraction (clamped to >= 1)
    pub remaining_exponent: f64,
    /// Scale of the uniform jitter added to every nonzero weight
    pub noise_epsilon: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_rate: 0.24,
            window: 16,
            min_rate: 0.12,
            max_rate: 0.36,
            feedback_gain: 0.6,
            max_streak: 2,
            streak_penalty: 0.2,
            remaining_exponent: 1.2,
            noise_epsilon: 1e-3,
        }
    }
}

/// Opponent win-seeking policy and guards
///
/// The defaults neutralize every guard: no cooldown, no board minimum and an
/// unlimited number of wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentConfig {
    pub clear_policy: ClearPolicy,
    /// Piece locks the opponent must sit out after a win
    pub cooldown_lands: u32,
    /// Minimum tiles on the board before the opponent may search
    pub board_min: usize,
    /// Cap on opponent wins per match (`None` = unlimited)
    pub max_wins: Option<u32>,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            clear_policy: ClearPolicy::UsedTilesOnly,
            cooldown_lands: 0,
            board_min: 0,
            max_wins: None,
        }
    }
}

/// Complete match configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub cols: u8,
    pub rows: u8,
    pub fall_interval_ms: u32,
    pub chain_tick_ms: u32,
    pub deck_total: usize,
    pub bias: BiasConfig,
    pub opponent: OpponentConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: BOARD_COLS,
            rows: BOARD_ROWS,
            fall_interval_ms: FALL_INTERVAL_MS,
            chain_tick_ms: CHAIN_TICK_MS,
            deck_total: DECK_TOTAL,
            bias: BiasConfig::default(),
            opponent: OpponentConfig::default(),
        }
    }
}

impl GameConfig {
    /// Check the record for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_total != DECK_TOTAL {
            return Err(ConfigError::UnsupportedDeckSize);
        }
        // The pair spans three rows when vertical; coordinates are i8.
        if self.cols < 3 || self.rows < 3 || self.cols > MAX_GRID_SIDE || self.rows > MAX_GRID_SIDE {
            return Err(ConfigError::InvalidGridSize);
        }
        if self.fall_interval_ms == 0 || self.chain_tick_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let b = &self.bias;
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(b.min_rate) || !in_unit(b.max_rate) || b.min_rate > b.max_rate {
            return Err(ConfigError::InvalidRateBand);
        }
        if !in_unit(b.target_rate) {
            return Err(ConfigError::InvalidRateBand);
        }
        if b.window == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if b.feedback_gain < 0.0
            || b.streak_penalty < 0.0
            || b.noise_epsilon < 0.0
            || !b.remaining_exponent.is_finite()
        {
            return Err(ConfigError::NegativeWeighting);
        }
        Ok(())
    }
}

/// Configuration rejected by [`GameConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedDeckSize,
    InvalidGridSize,
    ZeroInterval,
    InvalidRateBand,
    EmptyWindow,
    NegativeWeighting,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::UnsupportedDeckSize => "unsupported_deck_size",
            ConfigError::InvalidGridSize => "invalid_grid_size",
            ConfigError::ZeroInterval => "zero_interval",
            ConfigError::InvalidRateBand
            | ConfigError::EmptyWindow
            | ConfigError::NegativeWeighting => "invalid_bias",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::UnsupportedDeckSize => "only the 136-tile set is supported",
            ConfigError::InvalidGridSize => "grid sides must lie between 3 and 64 cells",
            ConfigError::ZeroInterval => "fall and chain intervals must be positive",
            ConfigError::InvalidRateBand => "bias rates must lie in [0, 1] with min <= max",
            ConfigError::EmptyWindow => "bias window must hold at least one pair",
            ConfigError::NegativeWeighting => "bias gain, penalty and noise must be non-negative",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}
