//! Evaluation results shared by the solver and the win search
//!
//! Searches work on [`Kind`]s; a successful [`Decomposition`] is then
//! realized into concrete tiles drawn from one or more [`Source`]s in
//! priority order, premium copies first within each source.

use std::fmt;

use arrayvec::ArrayVec;

use crate::scoring::win_score;
use crate::tile::{Kind, Meld, Tile};
use crate::types::{TileId, KIND_COUNT, MELDS_PER_HAND};

/// Kind-level result of a successful search
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decomposition {
    pub melds: ArrayVec<Meld, MELDS_PER_HAND>,
    pub pair: Kind,
}

/// Container a realized tile was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Hand,
    Board,
    Discard,
}

/// Tile ids a winning hand takes from each container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consumed {
    pub hand: Vec<TileId>,
    pub board: Vec<TileId>,
    pub discard: Vec<TileId>,
}

impl Consumed {
    pub fn total(&self) -> usize {
        self.hand.len() + self.board.len() + self.discard.len()
    }

    fn record(&mut self, tile: &Tile, source: Source) {
        match source {
            Source::Hand => self.hand.push(tile.id),
            Source::Board => self.board.push(tile.id),
            Source::Discard => self.discard.push(tile.id),
        }
    }
}

/// A meld with the tiles that realize it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RealizedMeld {
    pub meld: Meld,
    pub tiles: [Tile; 3],
}

/// A complete 4-meld + 1-pair hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinHand {
    pub melds: ArrayVec<RealizedMeld, MELDS_PER_HAND>,
    pub pair: [Tile; 2],
    pub score: u32,
    pub consumed: Consumed,
}

impl WinHand {
    /// All 14 tiles, melds first then the pair
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.melds
            .iter()
            .flat_map(|m| m.tiles.iter())
            .chain(self.pair.iter())
    }

    pub fn premium_count(&self) -> usize {
        self.tiles().filter(|t| t.premium).count()
    }
}

/// Why an evaluation did not produce a win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoWinReason {
    /// A hand evaluation needs exactly 14 tiles
    WrongTileCount,
    /// The pool holds fewer than 14 tiles; nothing was searched
    PoolTooSmall,
    /// No 4-meld + 1-pair partition exists
    NoCombination,
    /// The opponent is sitting out after a recent win
    Cooldown,
    /// Fewer tiles on the board than the opponent needs to try
    BoardBelowMinimum,
    /// The opponent reached its win cap for this match
    WinLimitReached,
}

impl NoWinReason {
    pub fn code(self) -> &'static str {
        match self {
            NoWinReason::WrongTileCount => "wrong_tile_count",
            NoWinReason::PoolTooSmall => "pool_too_small",
            NoWinReason::NoCombination => "no_combination",
            NoWinReason::Cooldown => "cooldown",
            NoWinReason::BoardBelowMinimum => "board_below_minimum",
            NoWinReason::WinLimitReached => "win_limit_reached",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            NoWinReason::WrongTileCount => "hand must hold exactly 14 tiles",
            NoWinReason::PoolTooSmall => "pool holds fewer than 14 tiles",
            NoWinReason::NoCombination => "no 4 melds + 1 pair combination",
            NoWinReason::Cooldown => "opponent is cooling down",
            NoWinReason::BoardBelowMinimum => "board holds too few tiles",
            NoWinReason::WinLimitReached => "opponent reached its win limit",
        }
    }

    /// Whether the evaluation was skipped rather than searched
    pub fn is_skipped(self) -> bool {
        !matches!(self, NoWinReason::NoCombination)
    }
}

impl fmt::Display for NoWinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for NoWinReason {}

/// Result of evaluating a hand or a pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Win(WinHand),
    NoWin(NoWinReason),
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win(_))
    }

    pub fn win(&self) -> Option<&WinHand> {
        match self {
            Outcome::Win(hand) => Some(hand),
            Outcome::NoWin(_) => None,
        }
    }

    pub fn reason(&self) -> Option<NoWinReason> {
        match self {
            Outcome::Win(_) => None,
            Outcome::NoWin(reason) => Some(*reason),
        }
    }

    /// Score of the win, 0 otherwise
    pub fn score(&self) -> u32 {
        self.win().map_or(0, |hand| hand.score)
    }
}

/// Per-kind queues of concrete tiles in hand-out order
struct TileBank {
    /// Reversed so `pop` yields the preferred tile
    buckets: Vec<Vec<(Tile, Source)>>,
}

impl TileBank {
    fn new(sources: &[(&[Tile], Source)]) -> Self {
        let mut buckets: Vec<Vec<(Tile, Source)>> = vec![Vec::new(); KIND_COUNT];
        for &(tiles, source) in sources {
            let mut ordered: Vec<Tile> = tiles.to_vec();
            // premium first, then by id for a stable order
            ordered.sort_by_key(|t| (!t.premium, t.id));
            for tile in ordered {
                buckets[tile.kind().index()].push((tile, source));
            }
        }
        for bucket in buckets.iter_mut() {
            bucket.reverse();
        }
        Self { buckets }
    }

    /// Hand out the preferred tile of `kind`, or a placeholder if none is left
    fn take(&mut self, kind: Kind, consumed: &mut Consumed) -> Tile {
        match self.buckets[kind.index()].pop() {
            Some((tile, source)) => {
                consumed.record(&tile, source);
                tile
            }
            None => kind.placeholder(),
        }
    }
}

/// Turn a kind-level decomposition into concrete tiles
///
/// Sources are consulted in the given order; within a source premium copies
/// are handed out first.
pub fn realize(decomposition: &Decomposition, sources: &[(&[Tile], Source)]) -> WinHand {
    let mut bank = TileBank::new(sources);
    let mut consumed = Consumed::default();

    let mut melds = ArrayVec::new();
    for &meld in &decomposition.melds {
        let [a, b, c] = meld.kinds();
        let tiles = [
            bank.take(a, &mut consumed),
            bank.take(b, &mut consumed),
            bank.take(c, &mut consumed),
        ];
        melds.push(RealizedMeld { meld, tiles });
    }
    let pair = [
        bank.take(decomposition.pair, &mut consumed),
        bank.take(decomposition.pair, &mut consumed),
    ];

    let score = win_score(melds.iter().flat_map(|m: &RealizedMeld| m.tiles.iter()).chain(pair.iter()));
    WinHand {
        melds,
        pair,
        score,
        consumed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::test_support::tiles_from;
    use crate::tile::TileFace;

    fn kind(label: &str) -> Kind {
        Kind::from_face(TileFace::parse(label).unwrap())
    }

    #[test]
    fn test_realize_prefers_premium_then_earlier_source() {
        let board = tiles_from("5p 5p* 4p 6p", 0);
        let discard = tiles_from("5p", 10);
        let mut melds = ArrayVec::new();
        melds.push(Meld::Run(kind("4p")));
        let decomposition = Decomposition {
            melds,
            pair: kind("5p"),
        };
        let hand = realize(
            &decomposition,
            &[(&discard, Source::Discard), (&board, Source::Board)],
        );

        // The run's 5p comes from discard, the pair takes the premium board copy first.
        assert_eq!(hand.melds[0].tiles[1].id, 10);
        assert!(hand.pair[0].premium);
        assert_eq!(hand.consumed.discard, vec![10]);
        assert_eq!(hand.consumed.board.len(), 4);
        assert_eq!(hand.score, 3000);
    }

    #[test]
    fn test_missing_tiles_become_placeholders() {
        let mut melds = ArrayVec::new();
        melds.push(Meld::Triplet(kind("E")));
        let decomposition = Decomposition {
            melds,
            pair: kind("C"),
        };
        let hand = realize(&decomposition, &[]);
        assert!(hand.tiles().all(|t| t.is_synthetic()));
        assert_eq!(hand.consumed.total(), 0);
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(NoWinReason::PoolTooSmall.code(), "pool_too_small");
        assert!(NoWinReason::PoolTooSmall.is_skipped());
        assert!(!NoWinReason::NoCombination.is_skipped());
        assert_eq!(Outcome::NoWin(NoWinReason::Cooldown).score(), 0);
    }
}
