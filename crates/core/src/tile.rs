//! Tile model - physical tiles and their 34 canonical kinds
//!
//! A [`Tile`] is one physical piece of the 136-tile set: it has a unique id
//! and never duplicates. A [`Kind`] is the canonical category used for
//! counting and search. Kind indices are laid out as:
//!
//! | Range | Tiles |
//! |-------|-------|
//! | 0..9 | man 1-9 |
//! | 9..18 | pin 1-9 |
//! | 18..27 | sou 1-9 |
//! | 27..34 | East, South, West, North, White, Green, Red |

use crate::types::{
    Honor, Suit, TileId, COPIES_PER_KIND, KIND_COUNT, PREMIUM_RANK, SYNTHETIC_TILE_ID,
};

/// Count vector indexed by [`Kind::index`]
pub type KindCounts = [u8; KIND_COUNT];

/// What is printed on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFace {
    Man(u8),
    Pin(u8),
    Sou(u8),
    Honor(Honor),
}

impl TileFace {
    pub fn numeric(suit: Suit, rank: u8) -> Option<Self> {
        if !(1..=9).contains(&rank) {
            return None;
        }
        match suit {
            Suit::Man => Some(TileFace::Man(rank)),
            Suit::Pin => Some(TileFace::Pin(rank)),
            Suit::Sou => Some(TileFace::Sou(rank)),
            Suit::Honor => None,
        }
    }

    pub fn suit(&self) -> Suit {
        match self {
            TileFace::Man(_) => Suit::Man,
            TileFace::Pin(_) => Suit::Pin,
            TileFace::Sou(_) => Suit::Sou,
            TileFace::Honor(_) => Suit::Honor,
        }
    }

    /// Rank 1-9 for numeric tiles, `None` for honors
    pub fn rank(&self) -> Option<u8> {
        match *self {
            TileFace::Man(r) | TileFace::Pin(r) | TileFace::Sou(r) => Some(r),
            TileFace::Honor(_) => None,
        }
    }

    /// Short label such as `5p` or `E`
    pub fn label(&self) -> String {
        match *self {
            TileFace::Man(r) => format!("{}m", r),
            TileFace::Pin(r) => format!("{}p", r),
            TileFace::Sou(r) => format!("{}s", r),
            TileFace::Honor(h) => h.symbol().to_string(),
        }
    }

    /// Parse a label produced by [`TileFace::label`]
    pub fn parse(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let first = chars.next()?;
        match chars.next() {
            None => Honor::from_symbol(first).map(TileFace::Honor),
            Some(suit) if chars.next().is_none() => {
                let rank = first.to_digit(10)? as u8;
                let suit = match suit {
                    'm' => Suit::Man,
                    'p' => Suit::Pin,
                    's' => Suit::Sou,
                    _ => return None,
                };
                TileFace::numeric(suit, rank)
            }
            Some(_) => None,
        }
    }
}

/// Where a tile value was produced (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Deck,
    Board,
    Synthesized,
}

/// One physical tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub face: TileFace,
    pub premium: bool,
    pub origin: Origin,
}

impl Tile {
    pub fn new(id: TileId, face: TileFace, premium: bool) -> Self {
        Self {
            id,
            face,
            premium,
            origin: Origin::Deck,
        }
    }

    pub fn suit(&self) -> Suit {
        self.face.suit()
    }

    pub fn kind(&self) -> Kind {
        Kind::of(self)
    }

    /// True for placeholder tiles that are not part of the physical set
    pub fn is_synthetic(&self) -> bool {
        self.id == SYNTHETIC_TILE_ID
    }
}

/// Canonical tile kind (0..34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kind(u8);

impl Kind {
    pub const COUNT: usize = KIND_COUNT;

    pub fn new(index: usize) -> Option<Self> {
        if index < KIND_COUNT {
            Some(Kind(index as u8))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn of(tile: &Tile) -> Self {
        Self::from_face(tile.face)
    }

    pub fn from_face(face: TileFace) -> Self {
        match face {
            TileFace::Man(r) => Kind(r.clamp(1, 9) - 1),
            TileFace::Pin(r) => Kind(9 + r.clamp(1, 9) - 1),
            TileFace::Sou(r) => Kind(18 + r.clamp(1, 9) - 1),
            TileFace::Honor(h) => Kind(27 + h.index() as u8),
        }
    }

    pub fn suit(&self) -> Suit {
        match self.0 {
            0..=8 => Suit::Man,
            9..=17 => Suit::Pin,
            18..=26 => Suit::Sou,
            _ => Suit::Honor,
        }
    }

    pub fn rank(&self) -> Option<u8> {
        if self.is_honor() {
            None
        } else {
            Some(self.0 % 9 + 1)
        }
    }

    pub fn is_honor(&self) -> bool {
        self.0 >= 27
    }

    /// Whether a run of three can start at this kind (numeric, rank <= 7)
    pub fn starts_run(&self) -> bool {
        matches!(self.rank(), Some(r) if r <= 7)
    }

    pub fn face(&self) -> TileFace {
        match self.suit() {
            Suit::Honor => TileFace::Honor(
                Honor::from_index(self.0 as usize - 27).unwrap_or(Honor::East),
            ),
            suit => {
                let rank = self.0 % 9 + 1;
                match suit {
                    Suit::Man => TileFace::Man(rank),
                    Suit::Pin => TileFace::Pin(rank),
                    _ => TileFace::Sou(rank),
                }
            }
        }
    }

    /// Tile synthesized from this kind; carries the synthetic id and is never premium
    pub fn placeholder(&self) -> Tile {
        Tile {
            id: SYNTHETIC_TILE_ID,
            face: self.face(),
            premium: false,
            origin: Origin::Synthesized,
        }
    }

    /// Kind `offset` ranks above this one in the same numeric suit
    pub(crate) fn step(&self, offset: u8) -> Kind {
        Kind(self.0 + offset)
    }

    pub fn all() -> impl Iterator<Item = Kind> {
        (0..KIND_COUNT as u8).map(Kind)
    }
}

/// A meld identified by kinds only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meld {
    /// Three of one kind
    Triplet(Kind),
    /// Three consecutive ranks of one numeric suit, starting at this kind
    Run(Kind),
}

impl Meld {
    pub fn kinds(&self) -> [Kind; 3] {
        match *self {
            Meld::Triplet(k) => [k, k, k],
            Meld::Run(k) => [k, k.step(1), k.step(2)],
        }
    }

    /// Whether `counts` still holds every tile of this meld
    pub fn fits(&self, counts: &KindCounts) -> bool {
        match *self {
            Meld::Triplet(k) => counts[k.index()] >= 3,
            Meld::Run(k) => {
                k.starts_run()
                    && counts[k.index()] > 0
                    && counts[k.index() + 1] > 0
                    && counts[k.index() + 2] > 0
            }
        }
    }

    pub(crate) fn take(&self, counts: &mut KindCounts) {
        for k in self.kinds() {
            counts[k.index()] -= 1;
        }
    }
}

/// Build a count vector from any tile collection
pub fn kind_counts<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> KindCounts {
    let mut counts = [0u8; KIND_COUNT];
    for tile in tiles {
        let slot = &mut counts[tile.kind().index()];
        *slot = slot.saturating_add(1);
    }
    counts
}

/// The full 136-tile set in id order
///
/// Numeric suits first (man, pin, sou; ranks 1-9; 4 copies each, copy 0 of
/// rank 5 premium), then the seven honors with 4 copies each.
pub fn full_tile_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(KIND_COUNT * COPIES_PER_KIND);
    let mut next_id: TileId = 0;
    for suit in Suit::NUMERIC {
        for rank in 1..=9u8 {
            for copy in 0..COPIES_PER_KIND {
                if let Some(face) = TileFace::numeric(suit, rank) {
                    tiles.push(Tile::new(next_id, face, rank == PREMIUM_RANK && copy == 0));
                    next_id += 1;
                }
            }
        }
    }
    for honor in Honor::ALL {
        for _ in 0..COPIES_PER_KIND {
            tiles.push(Tile::new(next_id, TileFace::Honor(honor), false));
            next_id += 1;
        }
    }
    tiles
}
