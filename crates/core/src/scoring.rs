//! Scoring module - chain points, win points and the final verdict
//!
//! Scoring is deliberately simple:
//! - A chain step removing `n` tiles at chain level `L` scores `n * 100 * L`.
//! - Any winning hand scores a flat 2000 plus 1000 per premium tile in it.
//! - The match goes to the larger total; equal totals are a draw.

use crate::tile::Tile;
use crate::types::{Winner, CHAIN_UNIT_SCORE, PREMIUM_BONUS, WIN_BASE_SCORE};

/// Points for one chain step
pub fn chain_score(removed: usize, chain_level: u32) -> u32 {
    (removed as u32)
        .saturating_mul(CHAIN_UNIT_SCORE)
        .saturating_mul(chain_level)
}

/// Points for a winning hand
pub fn win_score<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> u32 {
    let premium = tiles.into_iter().filter(|t| t.premium).count() as u32;
    WIN_BASE_SCORE.saturating_add(PREMIUM_BONUS.saturating_mul(premium))
}

/// Final totals recorded when the match ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinalResult {
    pub player_total: u32,
    pub opponent_total: u32,
    pub winner: Winner,
}

impl FinalResult {
    pub fn new(player_total: u32, opponent_total: u32) -> Self {
        Self {
            player_total,
            opponent_total,
            winner: Winner::from_totals(player_total, opponent_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::test_support::tiles_from;

    #[test]
    fn test_chain_score_scales_with_level() {
        assert_eq!(chain_score(4, 1), 400);
        assert_eq!(chain_score(5, 2), 1000);
        assert_eq!(chain_score(0, 3), 0);
    }

    #[test]
    fn test_win_score_counts_premium() {
        let plain = tiles_from("1m 2m 3m", 0);
        assert_eq!(win_score(&plain), 2000);

        let with_premium = tiles_from("4p 5p* 6p 5m*", 0);
        assert_eq!(win_score(&with_premium), 4000);
    }

    #[test]
    fn test_final_result_winner() {
        assert_eq!(FinalResult::new(2000, 0).winner, Winner::Player);
        assert_eq!(FinalResult::new(0, 3000).winner, Winner::Opponent);
        assert_eq!(FinalResult::new(100, 100).winner, Winner::Draw);
    }
}
