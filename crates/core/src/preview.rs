//! Greedy partial decomposition for display
//!
//! Shows how close a pool is to a win without running an exact search:
//! triplets are taken first, then runs, up to four melds, then the lowest
//! remaining pair. The result is only a hint and never decides a win.

use arrayvec::ArrayVec;

use crate::tile::{kind_counts, Kind, Meld, Tile};
use crate::types::{HAND_SIZE, MELDS_PER_HAND};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preview {
    pub melds: ArrayVec<Meld, MELDS_PER_HAND>,
    pub pair: Option<Kind>,
}

impl Preview {
    /// Tiles accounted for by the preview (14 means a complete shape)
    pub fn tiles_used(&self) -> usize {
        self.melds.len() * 3 + if self.pair.is_some() { 2 } else { 0 }
    }

    /// Tiles still missing from a complete hand
    pub fn missing(&self) -> usize {
        HAND_SIZE - self.tiles_used()
    }
}

pub fn greedy_preview(tiles: &[Tile]) -> Preview {
    let mut counts = kind_counts(tiles);
    let mut preview = Preview::default();

    for kind in Kind::all() {
        let meld = Meld::Triplet(kind);
        if !preview.melds.is_full() && meld.fits(&counts) {
            meld.take(&mut counts);
            preview.melds.push(meld);
        }
    }
    for kind in Kind::all().filter(Kind::starts_run) {
        let meld = Meld::Run(kind);
        while !preview.melds.is_full() && meld.fits(&counts) {
            meld.take(&mut counts);
            preview.melds.push(meld);
        }
    }
    preview.pair = Kind::all().find(|k| counts[k.index()] >= 2);
    preview
}
