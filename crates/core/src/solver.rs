//! Decomposition solver - exact 4 melds + 1 pair partitions
//!
//! Two entry points:
//! - [`solve_hand`]: exactly 14 tiles must partition with no remainder.
//! - [`solve_pool`]: a pool of 14 or more tiles must contain *some* 14-tile
//!   subset that partitions.
//!
//! Both search over a [`KindCounts`] vector that is copied on every branch
//! (it is a plain `[u8; 34]`), and remember failed states so no state is
//! explored twice.

use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::hand::{realize, Decomposition, NoWinReason, Outcome, Source};
use crate::tile::{kind_counts, Kind, KindCounts, Meld, Tile};
use crate::types::{HAND_SIZE, KIND_COUNT, MELDS_PER_HAND};

type Melds = ArrayVec<Meld, MELDS_PER_HAND>;

/// Evaluate a hand that must hold exactly 14 tiles
pub fn solve_hand(tiles: &[Tile]) -> Outcome {
    if tiles.len() != HAND_SIZE {
        return Outcome::NoWin(NoWinReason::WrongTileCount);
    }
    match decompose_exact(&kind_counts(tiles)) {
        Some(d) => Outcome::Win(realize(&d, &[(tiles, Source::Hand)])),
        None => Outcome::NoWin(NoWinReason::NoCombination),
    }
}

/// Evaluate a pool of at least 14 tiles for any winning 14-tile subset
pub fn solve_pool(tiles: &[Tile]) -> Outcome {
    if tiles.len() < HAND_SIZE {
        return Outcome::NoWin(NoWinReason::PoolTooSmall);
    }
    match decompose_pool(&kind_counts(tiles)) {
        Some(d) => Outcome::Win(realize(&d, &[(tiles, Source::Hand)])),
        None => Outcome::NoWin(NoWinReason::NoCombination),
    }
}

/// Partition `counts` into exactly 4 melds and 1 pair with nothing left over
///
/// At each step the lowest kind still present must be used: first as a
/// triplet, then as the start of a run, then as the pair.
pub fn decompose_exact(counts: &KindCounts) -> Option<Decomposition> {
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    if total != HAND_SIZE {
        return None;
    }
    let mut failed = HashSet::new();
    exact(*counts, None, Melds::new(), &mut failed)
}

type ExactKey = (KindCounts, bool, u8);

fn exact(
    counts: KindCounts,
    pair: Option<Kind>,
    melds: Melds,
    failed: &mut HashSet<ExactKey>,
) -> Option<Decomposition> {
    let Some(first) = counts.iter().position(|&c| c > 0) else {
        return match pair {
            Some(pair) if melds.is_full() => Some(Decomposition { melds, pair }),
            _ => None,
        };
    };

    let key = (counts, pair.is_some(), melds.len() as u8);
    if failed.contains(&key) {
        return None;
    }

    let kind = Kind::new(first)?;
    if !melds.is_full() {
        for meld in [Meld::Triplet(kind), Meld::Run(kind)] {
            if !meld.fits(&counts) {
                continue;
            }
            let mut next = counts;
            meld.take(&mut next);
            let mut next_melds = melds.clone();
            next_melds.push(meld);
            if let Some(found) = exact(next, pair, next_melds, failed) {
                return Some(found);
            }
        }
    }
    if pair.is_none() && counts[first] >= 2 {
        let mut next = counts;
        next[first] -= 2;
        if let Some(found) = exact(next, Some(kind), melds.clone(), failed) {
            return Some(found);
        }
    }

    failed.insert(key);
    None
}

/// Every meld in canonical order: all runs (by start kind), then all triplets
pub(crate) fn canonical_melds() -> Vec<Meld> {
    let runs = Kind::all().filter(Kind::starts_run).map(Meld::Run);
    let triplets = Kind::all().map(Meld::Triplet);
    runs.chain(triplets).collect()
}

/// Find 4 melds and 1 pair anywhere inside `counts`
///
/// Melds are chosen in nondecreasing canonical order so each combination is
/// visited once; the pair is taken last from whatever remains. Branches are
/// cut when the tiles left in the pool cannot fill the missing slots.
pub fn decompose_pool(counts: &KindCounts) -> Option<Decomposition> {
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    if total < HAND_SIZE {
        return None;
    }
    let order = canonical_melds();
    let mut failed = HashSet::new();
    let melds = pool_melds(*counts, total, &order, 0, Melds::new(), &mut failed)?;
    let mut rest = *counts;
    for meld in &melds {
        meld.take(&mut rest);
    }
    let pair = lowest_pair(&rest)?;
    Some(Decomposition { melds, pair })
}

type PoolKey = (KindCounts, u8, u8);

fn pool_melds(
    counts: KindCounts,
    remaining: usize,
    order: &[Meld],
    start: usize,
    melds: Melds,
    failed: &mut HashSet<PoolKey>,
) -> Option<Melds> {
    if melds.is_full() {
        return lowest_pair(&counts).map(|_| melds);
    }
    let missing = (MELDS_PER_HAND - melds.len()) * 3 + 2;
    if remaining < missing {
        return None;
    }
    let key = (counts, melds.len() as u8, start as u8);
    if failed.contains(&key) {
        return None;
    }

    for (offset, meld) in order[start..].iter().enumerate() {
        if !meld.fits(&counts) {
            continue;
        }
        let mut next = counts;
        meld.take(&mut next);
        let mut next_melds = melds.clone();
        next_melds.push(*meld);
        if let Some(found) = pool_melds(next, remaining - 3, order, start + offset, next_melds, failed) {
            return Some(found);
        }
    }

    failed.insert(key);
    None
}

/// Lowest kind with at least two copies
pub(crate) fn lowest_pair(counts: &KindCounts) -> Option<Kind> {
    (0..KIND_COUNT)
        .find(|&i| counts[i] >= 2)
        .and_then(Kind::new)
}
