//! Automatic allocation - decide which tiles stay in hand
//!
//! The keep set starts from the greedy preview of the alloc buffer (its
//! melds and pair), preferring premium copies. Free slots up to 14 go to the
//! tiles with the most same-kind and nearby-rank company. Everything else is
//! discarded.

use pairfall_core::tile::{kind_counts, KindCounts};
use pairfall_core::{greedy_preview, GameState, Kind, Tile, TileFace};
use pairfall_types::{AllocTarget, GameAction, Phase, TileId, HAND_SIZE};
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    NotAllocating,
    Rejected,
}

impl AllocError {
    pub fn code(self) -> &'static str {
        match self {
            AllocError::NotAllocating => "not_allocating",
            AllocError::Rejected => "alloc_rejected",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AllocError::NotAllocating => "game is not in the alloc phase",
            AllocError::Rejected => "allocation was rejected by the game",
        }
    }
}

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AllocError {}

/// Ids of the tiles to keep in hand, at most 14
pub fn plan_allocation(tiles: &[Tile]) -> Vec<TileId> {
    if tiles.len() <= HAND_SIZE {
        return tiles.iter().map(|t| t.id).collect();
    }

    let preview = greedy_preview(tiles);
    let mut wanted: KindCounts = [0; Kind::COUNT];
    for meld in &preview.melds {
        for kind in meld.kinds() {
            wanted[kind.index()] += 1;
        }
    }
    if let Some(pair) = preview.pair {
        wanted[pair.index()] += 2;
    }

    let mut ordered: Vec<Tile> = tiles.to_vec();
    ordered.sort_by_key(|t| (!t.premium, t.id));

    let mut keep = Vec::with_capacity(HAND_SIZE);
    let mut rest = Vec::new();
    for tile in ordered {
        let slot = &mut wanted[tile.kind().index()];
        if *slot > 0 && keep.len() < HAND_SIZE {
            *slot -= 1;
            keep.push(tile.id);
        } else {
            rest.push(tile);
        }
    }

    let counts = kind_counts(tiles);
    rest.sort_by_key(|t| {
        (
            std::cmp::Reverse(affinity(t.kind(), &counts)),
            !t.premium,
            t.kind().index(),
            t.id,
        )
    });
    let free = HAND_SIZE - keep.len();
    keep.extend(rest.iter().take(free).map(|t| t.id));
    keep
}

/// Same-kind copies count double; numeric neighbours within two ranks count once
fn affinity(kind: Kind, counts: &KindCounts) -> u32 {
    let same = counts[kind.index()].saturating_sub(1) as u32 * 2;
    let Some(rank) = kind.rank() else {
        return same;
    };
    let near: u32 = [-2i8, -1, 1, 2]
        .iter()
        .filter_map(|d| {
            let r = u8::try_from(rank as i8 + d).ok()?;
            TileFace::numeric(kind.suit(), r)
        })
        .map(|face| counts[Kind::from_face(face).index()] as u32)
        .sum();
    same + near
}

/// Allocate the current alloc buffer with [`plan_allocation`] and confirm
///
/// Returns how many tiles were discarded.
pub fn auto_allocate<R: RngCore>(state: &mut GameState<R>) -> Result<usize, AllocError> {
    if state.phase() != Phase::Alloc {
        return Err(AllocError::NotAllocating);
    }
    let tiles = state.alloc_tiles();
    let keep = plan_allocation(&tiles);

    state.apply_action(GameAction::AllocReset);
    state.apply_action(GameAction::SetAllocMode(AllocTarget::Discard));
    let mut discarded = 0;
    for tile in tiles.iter().filter(|t| !keep.contains(&t.id)) {
        state.apply_action(GameAction::AllocAssign(tile.id));
        discarded += 1;
    }
    if !state.apply_action(GameAction::AllocConfirm) {
        return Err(AllocError::Rejected);
    }
    Ok(discarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairfall_types::GameConfig;

    fn tiles(labels: &str, first_id: TileId) -> Vec<Tile> {
        labels
            .split_whitespace()
            .enumerate()
            .map(|(i, label)| {
                let (label, premium) = match label.strip_suffix('*') {
                    Some(base) => (base, true),
                    None => (label, false),
                };
                Tile::new(first_id + i as TileId, TileFace::parse(label).unwrap(), premium)
            })
            .collect()
    }

    #[test]
    fn keeps_everything_when_it_fits() {
        let t = tiles("1m 5p E", 0);
        assert_eq!(plan_allocation(&t), vec![0, 1, 2]);
    }

    #[test]
    fn keeps_the_winning_shape() {
        let t = tiles("1m 2m 3m 4p 5p 6p 7s 8s 9s 4m 4m 4m E E N W 9p", 0);
        let mut keep = plan_allocation(&t);
        keep.sort_unstable();
        assert_eq!(keep, (0..14).collect::<Vec<_>>());
    }

    #[test]
    fn prefers_premium_and_company() {
        let t = tiles("5p 5p 5p 5p* 1m 2m 3m 7s 8s 9s E E E N W", 0);
        let keep = plan_allocation(&t);
        assert_eq!(keep.len(), HAND_SIZE);
        assert!(keep.contains(&3));
        // Fourth 5p has company; N and W tie on affinity, W sorts first.
        assert!(!keep.contains(&13));
    }

    #[test]
    fn auto_allocate_requires_alloc_phase() {
        let mut gs = GameState::new(1, GameConfig::default());
        assert_eq!(auto_allocate(&mut gs), Err(AllocError::NotAllocating));
    }
}
