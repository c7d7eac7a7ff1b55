//! Win search - the opponent's look for a winning hand in board + discard
//!
//! The pool is unordered and keyed by kind. The fast path fixes a pair
//! (lowest kind first) and then looks for four melds among the rest,
//! triplets before runs. When that finds nothing the exact pool search in
//! [`crate::solver`] gets a try. Either way the result is realized from the
//! discard pool first and the board second, so the caller knows exactly
//! which tiles to remove from where.

use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::hand::{realize, Decomposition, NoWinReason, Outcome, Source};
use crate::solver::decompose_pool;
use crate::tile::{kind_counts, Kind, KindCounts, Meld, Tile};
use crate::types::{HAND_SIZE, MELDS_PER_HAND};

type Melds = ArrayVec<Meld, MELDS_PER_HAND>;

/// Search board and discard tiles for a 4-meld + 1-pair hand
pub fn search(board: &[Tile], discard: &[Tile]) -> Outcome {
    if board.len() + discard.len() < HAND_SIZE {
        return Outcome::NoWin(NoWinReason::PoolTooSmall);
    }
    let counts = kind_counts(board.iter().chain(discard.iter()));
    let found = fast_path(&counts).or_else(|| decompose_pool(&counts));
    match found {
        Some(d) => Outcome::Win(realize(
            &d,
            &[(discard, Source::Discard), (board, Source::Board)],
        )),
        None => Outcome::NoWin(NoWinReason::NoCombination),
    }
}

/// Melds tried by the fast path: triplets first, then runs
fn fast_order() -> Vec<Meld> {
    let triplets = Kind::all().map(Meld::Triplet);
    let runs = Kind::all().filter(Kind::starts_run).map(Meld::Run);
    triplets.chain(runs).collect()
}

fn fast_path(counts: &KindCounts) -> Option<Decomposition> {
    let order = fast_order();
    for pair in Kind::all().filter(|k| counts[k.index()] >= 2) {
        let mut rest = *counts;
        rest[pair.index()] -= 2;
        let mut failed = HashSet::new();
        if let Some(melds) = four_melds(rest, &order, 0, Melds::new(), &mut failed) {
            return Some(Decomposition { melds, pair });
        }
    }
    None
}

fn four_melds(
    counts: KindCounts,
    order: &[Meld],
    start: usize,
    melds: Melds,
    failed: &mut HashSet<(KindCounts, u8, u8)>,
) -> Option<Melds> {
    if melds.is_full() {
        return Some(melds);
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
        if let Some(found) = four_melds(next, order, start + offset, next_melds, failed) {
            return Some(found);
        }
    }
    failed.insert(key);
    None
}
