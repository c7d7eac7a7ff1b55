//! Biased pair planner - decides which suits the next dealt pair comes from
//!
//! A feedback controller steers the long-run rate of same-suit pairs toward
//! `BiasConfig::target_rate`: the further the recent window drifts below the
//! target, the more likely the next pair shares a suit (and vice versa),
//! clamped to `[min_rate, max_rate]`.
//!
//! Suits are chosen by weight `(stock / total) ^ max(1, exponent)` so suits
//! with more remaining tiles are favored. A suit that has dominated the last
//! `max_streak` pairs has its weight multiplied by `streak_penalty`; once it
//! has dominated `max_streak + 1` pairs it is skipped outright whenever
//! another suit can serve the pair.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::types::{BiasConfig, Suit};

/// Per-suit remaining tile counts (man, pin, sou, honor)
pub type SuitStock = [usize; 4];

/// Suits chosen for the next draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairPlan {
    /// Both tiles from one suit
    SameSuit(Suit),
    /// First tile from `.0`, second from `.1`; `.0 == .1` when no other suit had stock
    Mixed(Suit, Suit),
    /// The last tile of the deck
    Single(Suit),
}

impl PairPlan {
    /// Suit credited for streak bookkeeping
    pub fn dominant(&self) -> Suit {
        match *self {
            PairPlan::SameSuit(s) | PairPlan::Mixed(s, _) | PairPlan::Single(s) => s,
        }
    }

    pub fn is_same_suit(&self) -> bool {
        match *self {
            PairPlan::SameSuit(_) => true,
            PairPlan::Mixed(a, b) => a == b,
            PairPlan::Single(_) => false,
        }
    }
}

/// Feedback-controlled suit planner
#[derive(Debug, Clone)]
pub struct BiasPlanner {
    config: BiasConfig,
    window: VecDeque<bool>,
    leader: Option<Suit>,
    streak: u32,
    pairs_planned: u64,
    same_suit_planned: u64,
}

impl BiasPlanner {
    pub fn new(config: BiasConfig) -> Self {
        Self {
            config,
            window: VecDeque::with_capacity(config.window.max(1)),
            leader: None,
            streak: 0,
            pairs_planned: 0,
            same_suit_planned: 0,
        }
    }

    pub fn config(&self) -> &BiasConfig {
        &self.config
    }

    /// Same-suit rate over the sliding window (the target while it is empty)
    pub fn window_rate(&self) -> f64 {
        if self.window.is_empty() {
            return self.config.target_rate;
        }
        let hits = self.window.iter().filter(|&&same| same).count();
        hits as f64 / self.window.len() as f64
    }

    /// Same-suit rate over every pair planned so far
    pub fn lifetime_rate(&self) -> Option<f64> {
        if self.pairs_planned == 0 {
            return None;
        }
        Some(self.same_suit_planned as f64 / self.pairs_planned as f64)
    }

    /// Probability that the next pair is planned as same-suit
    pub fn same_suit_probability(&self) -> f64 {
        let c = &self.config;
        let p = c.target_rate + c.feedback_gain * (c.target_rate - self.window_rate());
        p.clamp(c.min_rate, c.max_rate)
    }

    /// Current streak leader and its length
    pub fn streak(&self) -> (Option<Suit>, u32) {
        (self.leader, self.streak)
    }

    /// Plan the next draw given the remaining stock
    ///
    /// Returns `None` only when the stock is empty.
    pub fn plan<R: RngCore + ?Sized>(&mut self, stock: &SuitStock, rng: &mut R) -> Option<PairPlan> {
        let total: usize = stock.iter().sum();
        if total == 0 {
            return None;
        }
        if total == 1 {
            let suit = self.pick(stock, rng, |s| stock[s.index()] > 0)?;
            return Some(PairPlan::Single(suit));
        }

        let capped = self.capped_leader(stock);
        let allowed = |s: Suit| Some(s) != capped;

        let want_same = self.config.enabled && rng.gen::<f64>() < self.same_suit_probability();
        let same_suit = if want_same {
            self.pick(stock, rng, |s| stock[s.index()] >= 2 && allowed(s))
        } else {
            None
        };

        let plan = match same_suit {
            Some(suit) => PairPlan::SameSuit(suit),
            None => {
                let first = self
                    .pick(stock, rng, |s| stock[s.index()] > 0 && allowed(s))
                    .or_else(|| self.pick(stock, rng, |s| stock[s.index()] > 0))?;
                let second = self
                    .pick(stock, rng, |s| s != first && stock[s.index()] > 0)
                    .unwrap_or(first);
                PairPlan::Mixed(first, second)
            }
        };

        self.record(plan);
        Some(plan)
    }

    /// The leader to exclude once it has reached the hard cap, if another suit has stock
    fn capped_leader(&self, stock: &SuitStock) -> Option<Suit> {
        let leader = self.leader?;
        if self.streak < self.config.max_streak.saturating_add(1) {
            return None;
        }
        let others = Suit::ALL
            .iter()
            .any(|&s| s != leader && stock[s.index()] > 0);
        if others {
            Some(leader)
        } else {
            None
        }
    }

    fn weight<R: RngCore + ?Sized>(&self, suit: Suit, stock: &SuitStock, total: usize, rng: &mut R) -> f64 {
        let remaining = stock[suit.index()];
        if remaining == 0 || total == 0 {
            return 0.0;
        }
        let exponent = self.config.remaining_exponent.max(1.0);
        let mut w = (remaining as f64 / total as f64).powf(exponent);
        if Some(suit) == self.leader && self.streak >= self.config.max_streak {
            w *= self.config.streak_penalty;
        }
        if w > 0.0 {
            w += self.config.noise_epsilon * rng.gen::<f64>();
        }
        w
    }

    /// Weighted pick among suits accepted by `eligible`
    ///
    /// Weights are subtracted in suit order from `u * sum`; the first suit that
    /// drives the remainder to zero or below wins, and the last candidate
    /// absorbs float round-off.
    fn pick<R, F>(&self, stock: &SuitStock, rng: &mut R, eligible: F) -> Option<Suit>
    where
        R: RngCore + ?Sized,
        F: Fn(Suit) -> bool,
    {
        let total: usize = stock.iter().sum();
        let mut candidates: [(Suit, f64); 4] = [(Suit::Man, 0.0); 4];
        let mut len = 0;
        for suit in Suit::ALL {
            if !eligible(suit) {
                continue;
            }
            candidates[len] = (suit, self.weight(suit, stock, total, rng));
            len += 1;
        }
        let candidates = &candidates[..len];
        let (last, _) = *candidates.last()?;

        let sum: f64 = candidates.iter().map(|&(_, w)| w).sum();
        if sum <= 0.0 {
            return candidates.first().map(|&(s, _)| s);
        }
        let mut r = rng.gen::<f64>() * sum;
        for &(suit, w) in candidates {
            r -= w;
            if r <= 0.0 {
                return Some(suit);
            }
        }
        Some(last)
    }

    fn record(&mut self, plan: PairPlan) {
        let same = plan.is_same_suit();
        self.window.push_back(same);
        while self.window.len() > self.config.window.max(1) {
            self.window.pop_front();
        }
        self.pairs_planned += 1;
        if same {
            self.same_suit_planned += 1;
        }

        let dominant = plan.dominant();
        if self.leader == Some(dominant) {
            self.streak += 1;
        } else {
            self.leader = Some(dominant);
            self.streak = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use rand::rngs::mock::StepRng;

    fn full_stock() -> SuitStock {
        [36, 36, 36, 28]
    }

    #[test]
    fn test_probability_starts_at_target() {
        let planner = BiasPlanner::new(BiasConfig::default());
        assert!((planner.same_suit_probability() - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_probability_clamped_to_band() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        // A window full of same-suit pairs pushes p down to the floor.
        for _ in 0..16 {
            planner.record(PairPlan::SameSuit(Suit::Man));
        }
        assert!((planner.same_suit_probability() - 0.12).abs() < 1e-12);

        // A window with none pushes p up: 0.24 + 0.6 * 0.24 = 0.384 -> 0.36
        for _ in 0..16 {
            planner.record(PairPlan::Mixed(Suit::Pin, Suit::Sou));
        }
        assert!((planner.same_suit_probability() - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        for _ in 0..40 {
            planner.record(PairPlan::Mixed(Suit::Pin, Suit::Sou));
        }
        assert_eq!(planner.window.len(), 16);
    }

    #[test]
    fn test_zero_randomness_plans_same_suit_when_enabled() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        let mut rng = StepRng::new(0, 0);
        let plan = planner.plan(&full_stock(), &mut rng);
        assert_eq!(plan, Some(PairPlan::SameSuit(Suit::Man)));
    }

    #[test]
    fn test_disabled_bias_always_mixes() {
        let config = BiasConfig {
            enabled: false,
            ..BiasConfig::default()
        };
        let mut planner = BiasPlanner::new(config);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            planner.plan(&full_stock(), &mut rng),
            Some(PairPlan::Mixed(Suit::Man, Suit::Pin))
        );
    }

    #[test]
    fn test_same_suit_needs_two_in_stock() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        let mut rng = StepRng::new(0, 0);
        // Every suit holds one tile: same-suit is impossible.
        let plan = planner.plan(&[1, 1, 1, 1], &mut rng);
        assert!(matches!(plan, Some(PairPlan::Mixed(a, b)) if a != b));
    }

    #[test]
    fn test_mixed_degrades_to_one_suit_without_alternatives() {
        let config = BiasConfig {
            enabled: false,
            ..BiasConfig::default()
        };
        let mut planner = BiasPlanner::new(config);
        let mut rng = SimpleRng::new(5);
        let plan = planner.plan(&[0, 0, 6, 0], &mut rng);
        assert_eq!(plan, Some(PairPlan::Mixed(Suit::Sou, Suit::Sou)));
    }

    #[test]
    fn test_last_tile_is_single() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        let mut rng = SimpleRng::new(5);
        assert_eq!(planner.plan(&[0, 0, 0, 1], &mut rng), Some(PairPlan::Single(Suit::Honor)));
        assert_eq!(planner.plan(&[0, 0, 0, 0], &mut rng), None);
    }

    #[test]
    fn test_hard_cap_breaks_streak() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        // StepRng(0, 0) always favors man; the cap must still rotate it out.
        let mut rng = StepRng::new(0, 0);
        let mut longest = 0;
        let mut run = 0;
        let mut last = None;
        for _ in 0..30 {
            let plan = planner.plan(&full_stock(), &mut rng).unwrap();
            let d = plan.dominant();
            if Some(d) == last {
                run += 1;
            } else {
                run = 1;
                last = Some(d);
            }
            longest = longest.max(run);
        }
        assert!(longest <= 3, "streak of {longest}");
    }

    #[test]
    fn test_streak_bookkeeping() {
        let mut planner = BiasPlanner::new(BiasConfig::default());
        planner.record(PairPlan::SameSuit(Suit::Pin));
        planner.record(PairPlan::Mixed(Suit::Pin, Suit::Man));
        assert_eq!(planner.streak(), (Some(Suit::Pin), 2));
        planner.record(PairPlan::Mixed(Suit::Man, Suit::Pin));
        assert_eq!(planner.streak(), (Some(Suit::Man), 1));
    }
}
