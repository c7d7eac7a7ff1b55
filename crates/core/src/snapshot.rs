use arrayvec::ArrayVec;

use crate::hand::Outcome;
use crate::piece::FallingPair;
use crate::scoring::FinalResult;
use crate::tile::Tile;
use crate::types::{AllocTarget, Phase, Rotation, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingSnapshot {
    pub anchor: Tile,
    pub anchor_pos: (i8, i8),
    pub rotator: Tile,
    pub rotator_pos: (i8, i8),
    pub rotation: Rotation,
}

impl From<FallingPair> for FallingSnapshot {
    fn from(value: FallingPair) -> Self {
        Self {
            anchor: value.anchor,
            anchor_pos: value.anchor_pos(),
            rotator: value.rotator,
            rotator_pos: value.rotator_pos(),
            rotation: value.rotation,
        }
    }
}

/// Everything a renderer reads in one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub cols: u8,
    pub rows: u8,
    /// Row-major cells, `cols * rows` long
    pub board: Vec<Option<Tile>>,
    pub falling: Option<FallingSnapshot>,
    pub next_queue: ArrayVec<Tile, NEXT_QUEUE_LEN>,
    pub score: u32,
    pub opponent_score: u32,
    pub opponent_wins: u32,
    pub chain_level: u32,
    pub hand: Vec<Tile>,
    pub discard_count: usize,
    pub alloc: Vec<(Tile, AllocTarget)>,
    pub alloc_mode: AllocTarget,
    pub player_result: Option<Outcome>,
    pub opponent_result: Option<Outcome>,
    pub final_result: Option<FinalResult>,
    pub deck_remaining: usize,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = Phase::Title;
        self.board.clear();
        self.falling = None;
        self.next_queue.clear();
        self.score = 0;
        self.opponent_score = 0;
        self.opponent_wins = 0;
        self.chain_level = 0;
        self.hand.clear();
        self.discard_count = 0;
        self.alloc.clear();
        self.alloc_mode = AllocTarget::Hand;
        self.player_result = None;
        self.opponent_result = None;
        self.final_result = None;
        self.deck_remaining = 0;
    }

    /// Board cell at (x, y), empty when out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<Tile> {
        if x < 0 || y < 0 || x as i16 >= self.cols as i16 || y as i16 >= self.rows as i16 {
            return None;
        }
        self.board
            .get(y as usize * self.cols as usize + x as usize)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        !self.phase.is_terminal()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Title,
            cols: 0,
            rows: 0,
            board: Vec::new(),
            falling: None,
            next_queue: ArrayVec::new(),
            score: 0,
            opponent_score: 0,
            opponent_wins: 0,
            chain_level: 0,
            hand: Vec::new(),
            discard_count: 0,
            alloc: Vec::new(),
            alloc_mode: AllocTarget::Hand,
            player_result: None,
            opponent_result: None,
            final_result: None,
            deck_remaining: 0,
        }
    }
}
