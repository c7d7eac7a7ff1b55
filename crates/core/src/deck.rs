//! Deck and dealer - the remaining tile inventory and how it is handed out
//!
//! [`Deck`] holds the undealt tiles in four shuffled suit buckets. Consumers
//! never draw from it directly; [`Dealer`] asks the [`BiasPlanner`] which
//! suits to use and takes tiles accordingly.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::planner::{BiasPlanner, PairPlan, SuitStock};
use crate::rng::SimpleRng;
use crate::tile::{full_tile_set, Tile};
use crate::types::{BiasConfig, Suit, TileId};

/// Undealt tiles, one shuffled bucket per suit
#[derive(Debug, Clone)]
pub struct Deck {
    buckets: [Vec<Tile>; 4],
}

impl Deck {
    /// Build the full set and shuffle each suit bucket
    pub fn shuffled<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut buckets: [Vec<Tile>; 4] = Default::default();
        for tile in full_tile_set() {
            buckets[tile.suit().index()].push(tile);
        }
        for bucket in buckets.iter_mut() {
            bucket.shuffle(rng);
        }
        Self { buckets }
    }

    pub fn remaining(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn stock(&self) -> SuitStock {
        [
            self.buckets[0].len(),
            self.buckets[1].len(),
            self.buckets[2].len(),
            self.buckets[3].len(),
        ]
    }

    pub(crate) fn take(&mut self, suit: Suit) -> Option<Tile> {
        self.buckets[suit.index()].pop()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.buckets.iter().flatten().map(|t| t.id)
    }
}

/// Hands out tiles pair by pair under the bias policy
#[derive(Debug, Clone)]
pub struct Dealer<R: RngCore = SimpleRng> {
    deck: Deck,
    planner: BiasPlanner,
    rng: R,
    /// Rest of the current pair for single-tile draws, stored in reverse
    pending: ArrayVec<Tile, 2>,
    last_plan: Option<PairPlan>,
}

impl Dealer<SimpleRng> {
    pub fn new(seed: u32, config: BiasConfig) -> Self {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RngCore> Dealer<R> {
    pub fn with_rng(config: BiasConfig, mut rng: R) -> Self {
        let deck = Deck::shuffled(&mut rng);
        Self {
            deck,
            planner: BiasPlanner::new(config),
            rng,
            pending: ArrayVec::new(),
            last_plan: None,
        }
    }

    /// Deal the next pair
    ///
    /// Returns two tiles, one when only the final tile is left, none when the
    /// deck is exhausted. Tiles buffered by [`Dealer::draw`] are not included.
    pub fn next_pair(&mut self) -> ArrayVec<Tile, 2> {
        let mut out = ArrayVec::new();
        let Some(plan) = self.planner.plan(&self.deck.stock(), &mut self.rng) else {
            return out;
        };
        self.last_plan = Some(plan);

        let suits: ArrayVec<Suit, 2> = match plan {
            PairPlan::SameSuit(s) => [s, s].into_iter().collect(),
            PairPlan::Mixed(a, b) => [a, b].into_iter().collect(),
            PairPlan::Single(s) => std::iter::once(s).collect(),
        };
        for suit in suits {
            if let Some(tile) = self.deck.take(suit) {
                out.push(tile);
            }
        }
        out
    }

    /// Draw a single tile, planning a new pair whenever the buffer runs dry
    pub fn draw(&mut self) -> Option<Tile> {
        if self.pending.is_empty() {
            let mut pair = self.next_pair();
            pair.reverse();
            self.pending = pair;
        }
        self.pending.pop()
    }

    /// Tiles not yet handed out (deck plus buffered pair remainder)
    pub fn remaining(&self) -> usize {
        self.deck.remaining() + self.pending.len()
    }

    /// Per-suit stock of the deck (excludes the buffer)
    pub fn suit_stock(&self) -> SuitStock {
        self.deck.stock()
    }

    pub fn planner(&self) -> &BiasPlanner {
        &self.planner
    }

    pub fn last_plan(&self) -> Option<PairPlan> {
        self.last_plan
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.deck.ids().chain(self.pending.iter().map(|t| t.id))
    }
}
