//! Game state module - manages a whole match
//!
//! This module ties together all core components: dealer, board, falling
//! pair, solver and win search. It owns every tile container, sequences the
//! phases and keeps the scores.
//!
//! Phase flow:
//!
//! ```text
//! Title -> Play <-> (chain processing) -> Alloc -> Hold -> Play -> ... -> GameOver
//! ```
//!
//! Every tile lives in exactly one container at a time: the dealer, the next
//! queue, the falling pair, the board, the hand, the discard pool, the alloc
//! buffer, the chain-collected buffer or the retired pile (tiles used up by a
//! win or locked above the grid).

use arrayvec::ArrayVec;
use rand::RngCore;

use crate::board::Board;
use crate::deck::Dealer;
use crate::events::{EventLog, GameEvent};
use crate::hand::{Consumed, NoWinReason, Outcome};
use crate::piece::{can_move, spawn_x, FallingPair};
use crate::preview::{greedy_preview, Preview};
use crate::rng::SimpleRng;
use crate::scoring::{chain_score, FinalResult};
use crate::snapshot::{FallingSnapshot, GameSnapshot};
use crate::solver::solve_hand;
use crate::tile::Tile;
use crate::types::*;
use crate::win_search;

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState<R: RngCore = SimpleRng> {
    config: GameConfig,
    phase: Phase,
    board: Board,
    dealer: Dealer<R>,
    falling: Option<FallingPair>,
    next_queue: ArrayVec<Tile, NEXT_QUEUE_LEN>,
    hand: Vec<Tile>,
    discards: Vec<Tile>,
    /// Tiles under allocation with their current target
    alloc: Vec<(Tile, AllocTarget)>,
    alloc_mode: AllocTarget,
    /// Tiles removed by the chain currently resolving
    collected: Vec<Tile>,
    retired: Vec<Tile>,
    score: u32,
    opponent_score: u32,
    opponent_wins: u32,
    /// Locks left before the opponent may try again
    opponent_cooldown: u32,
    chain_level: u32,
    /// Set after a lock or a hold commit; cleared when a chain step removes nothing
    processing: bool,
    fall_timer_ms: u32,
    chain_timer_ms: u32,
    pieces_spawned: u32,
    player_result: Option<Outcome>,
    opponent_result: Option<Outcome>,
    final_result: Option<FinalResult>,
    events: EventLog,
}

impl GameState<SimpleRng> {
    /// Create a new match with the given RNG seed
    pub fn new(seed: u32, config: GameConfig) -> Self {
        Self::with_rng(config, SimpleRng::new(seed))
    }

    /// Like [`GameState::new`], rejecting configurations the engine cannot run
    pub fn try_new(seed: u32, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(seed, config))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1, GameConfig::default())
    }
}

impl<R: RngCore> GameState<R> {
    /// Create a new match dealing from any random source
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut state = Self {
            config,
            phase: Phase::Title,
            board: Board::new(config.cols, config.rows),
            dealer: Dealer::with_rng(config.bias, rng),
            falling: None,
            next_queue: ArrayVec::new(),
            hand: Vec::new(),
            discards: Vec::new(),
            alloc: Vec::new(),
            alloc_mode: AllocTarget::Hand,
            collected: Vec::new(),
            retired: Vec::new(),
            score: 0,
            opponent_score: 0,
            opponent_wins: 0,
            opponent_cooldown: 0,
            chain_level: 0,
            processing: false,
            fall_timer_ms: 0,
            chain_timer_ms: 0,
            pieces_spawned: 0,
            player_result: None,
            opponent_result: None,
            final_result: None,
            events: EventLog::default(),
        };
        state.refill_queue();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<FallingPair> {
        self.falling
    }

    /// Cells of the falling pair, anchor first
    pub fn falling_cells(&self) -> Option<[(Tile, i8, i8); 2]> {
        self.falling.map(|p| p.cells())
    }

    pub fn next_queue(&self) -> &[Tile] {
        &self.next_queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    pub fn opponent_wins(&self) -> u32 {
        self.opponent_wins
    }

    pub fn opponent_cooldown(&self) -> u32 {
        self.opponent_cooldown
    }

    pub fn chain_level(&self) -> u32 {
        self.chain_level
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn discards(&self) -> &[Tile] {
        &self.discards
    }

    /// Tiles under allocation with their targets
    pub fn alloc(&self) -> &[(Tile, AllocTarget)] {
        &self.alloc
    }

    pub fn alloc_tiles(&self) -> Vec<Tile> {
        self.alloc.iter().map(|&(t, _)| t).collect()
    }

    pub fn alloc_assignment(&self, id: TileId) -> Option<AllocTarget> {
        self.alloc
            .iter()
            .find(|(t, _)| t.id == id)
            .map(|&(_, target)| target)
    }

    /// (hand, discard) counts of the tentative allocation
    pub fn alloc_counts(&self) -> (usize, usize) {
        let hand = self
            .alloc
            .iter()
            .filter(|(_, target)| *target == AllocTarget::Hand)
            .count();
        (hand, self.alloc.len() - hand)
    }

    pub fn alloc_mode(&self) -> AllocTarget {
        self.alloc_mode
    }

    /// Last player evaluation (hold or final)
    pub fn player_result(&self) -> Option<&Outcome> {
        self.player_result.as_ref()
    }

    /// Last opponent evaluation (hold or final)
    pub fn opponent_result(&self) -> Option<&Outcome> {
        self.opponent_result.as_ref()
    }

    pub fn final_result(&self) -> Option<FinalResult> {
        self.final_result
    }

    /// Greedy hint of how close board + discard are to an opponent win
    pub fn opponent_preview(&self) -> Preview {
        let mut pool = self.board.tiles();
        pool.extend_from_slice(&self.discards);
        greedy_preview(&pool)
    }

    pub fn deck_remaining(&self) -> usize {
        self.dealer.remaining()
    }

    pub fn dealer(&self) -> &Dealer<R> {
        &self.dealer
    }

    /// Ids of every tile in every container
    ///
    /// Always a permutation of the 136 dealt ids.
    pub fn inventory_ids(&self) -> Vec<TileId> {
        let mut ids: Vec<TileId> = self.dealer.ids().collect();
        ids.extend(self.next_queue.iter().map(|t| t.id));
        if let Some(pair) = self.falling {
            ids.push(pair.anchor.id);
            ids.push(pair.rotator.id);
        }
        ids.extend(self.board.cells().iter().flatten().map(|t| t.id));
        ids.extend(self.hand.iter().map(|t| t.id));
        ids.extend(self.discards.iter().map(|t| t.id));
        ids.extend(self.alloc.iter().map(|(t, _)| t.id));
        ids.extend(self.collected.iter().map(|t| t.id));
        ids.extend(self.retired.iter().map(|t| t.id));
        ids
    }

    /// Take every event recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.cols = self.board.width();
        out.rows = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.falling = self.falling.map(FallingSnapshot::from);
        out.next_queue.clear();
        out.next_queue.extend(self.next_queue.iter().copied());
        out.score = self.score;
        out.opponent_score = self.opponent_score;
        out.opponent_wins = self.opponent_wins;
        out.chain_level = self.chain_level;
        out.hand.clear();
        out.hand.extend_from_slice(&self.hand);
        out.discard_count = self.discards.len();
        out.alloc.clear();
        out.alloc.extend_from_slice(&self.alloc);
        out.alloc_mode = self.alloc_mode;
        out.player_result = self.player_result.clone();
        out.opponent_result = self.opponent_result.clone();
        out.final_result = self.final_result;
        out.deck_remaining = self.dealer.remaining();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Current fall interval; soft drop divides it
    pub fn fall_interval_ms(&self, soft_drop: bool) -> u32 {
        let base = self.config.fall_interval_ms.max(1);
        if soft_drop {
            (base / SOFT_DROP_DIVISOR).max(1)
        } else {
            base
        }
    }

    /// Main game tick - advance chain resolution or the falling pair
    ///
    /// Returns true if the state changed.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if self.phase != Phase::Play {
            return false;
        }

        if self.processing {
            self.chain_timer_ms = self.chain_timer_ms.saturating_add(elapsed_ms);
            if self.chain_timer_ms < self.config.chain_tick_ms {
                return false;
            }
            self.chain_timer_ms = 0;
            self.chain_step();
            return true;
        }

        let Some(mut pair) = self.falling else {
            // Nothing falling and nothing resolving: deal the next pair or end the match.
            self.spawn_next();
            return true;
        };

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms(soft_drop) {
            return false;
        }
        self.fall_timer_ms = 0;

        if pair.try_shift(&self.board, 0, 1) {
            self.falling = Some(pair);
        } else {
            self.lock_falling();
        }
        true
    }

    /// Apply a game action
    ///
    /// Returns true if anything changed. Rejected requests leave the state untouched.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.phase {
            Phase::Title => {
                self.set_phase(Phase::Play);
                self.spawn_next();
                true
            }
            Phase::Play => self.apply_play_action(action),
            Phase::Alloc => self.apply_alloc_action(action),
            Phase::Hold => self.commit_hold(),
            Phase::GameOver => false,
        }
    }

    fn apply_play_action(&mut self, action: GameAction) -> bool {
        if self.processing {
            return false;
        }
        let Some(mut pair) = self.falling else {
            return false;
        };
        let moved = match action {
            GameAction::MoveLeft => pair.try_shift(&self.board, -1, 0),
            GameAction::MoveRight => pair.try_shift(&self.board, 1, 0),
            GameAction::RotateCw => pair.try_rotate(&self.board, true),
            GameAction::RotateCcw => pair.try_rotate(&self.board, false),
            _ => false,
        };
        if moved {
            self.falling = Some(pair);
        }
        moved
    }

    fn apply_alloc_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::SetAllocMode(mode) => {
                let changed = self.alloc_mode != mode;
                self.alloc_mode = mode;
                changed
            }
            GameAction::AllocAssign(id) => {
                let mode = self.alloc_mode;
                let Some(entry) = self.alloc.iter_mut().find(|(t, _)| t.id == id) else {
                    return false;
                };
                let changed = entry.1 != mode;
                entry.1 = mode;
                changed
            }
            GameAction::AllocReset => {
                let changed = self
                    .alloc
                    .iter()
                    .any(|(_, target)| *target != AllocTarget::Hand);
                for entry in self.alloc.iter_mut() {
                    entry.1 = AllocTarget::Hand;
                }
                changed
            }
            GameAction::AllocConfirm | GameAction::Confirm => self.confirm_alloc(),
            _ => false,
        }
    }

    fn set_phase(&mut self, to: Phase) {
        if self.phase != to {
            self.events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to,
            });
            self.phase = to;
        }
    }

    fn refill_queue(&mut self) {
        while !self.next_queue.is_full() {
            match self.dealer.draw() {
                Some(tile) => self.next_queue.push(tile),
                None => break,
            }
        }
    }

    /// Spawn the next pair from the queue; ends the match if impossible
    fn spawn_next(&mut self) {
        self.refill_queue();
        if self.next_queue.len() < 2 {
            self.finish_match();
            return;
        }
        let x = spawn_x(self.config.cols);
        if !can_move(&self.board, x, 0, Rotation::North) {
            self.finish_match();
            return;
        }
        let (Some(anchor), Some(rotator)) = (self.next_queue.pop_at(0), self.next_queue.pop_at(0))
        else {
            self.finish_match();
            return;
        };
        self.refill_queue();

        self.falling = Some(FallingPair::spawn(anchor, rotator, self.config.cols));
        self.fall_timer_ms = 0;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.events.push(GameEvent::Spawned {
            anchor: anchor.id,
            rotator: rotator.id,
        });
    }

    fn lock_falling(&mut self) {
        let Some(pair) = self.falling.take() else {
            return;
        };
        let outside = pair.lock(&mut self.board);
        self.events.push(GameEvent::Locked {
            x: pair.x,
            y: pair.y,
            rotation: pair.rotation,
            outside: outside.len(),
        });
        self.retired.extend(outside);
        self.opponent_cooldown = self.opponent_cooldown.saturating_sub(1);
        self.processing = true;
        self.chain_timer_ms = 0;
    }

    /// One gravity + cluster pass of the chain being resolved
    fn chain_step(&mut self) {
        self.board.apply_gravity_once();
        let removed = self.board.clear_connected_clusters(CLUSTER_MIN);

        if !removed.is_empty() {
            self.chain_level += 1;
            let points = chain_score(removed.len(), self.chain_level);
            self.score = self.score.saturating_add(points);
            self.events.push(GameEvent::ChainStep {
                level: self.chain_level,
                removed: removed.len(),
                points,
            });
            self.collected.extend(removed);
            return;
        }

        self.processing = false;
        self.board.settle();
        if self.collected.is_empty() {
            self.chain_level = 0;
            self.spawn_next();
        } else {
            self.open_alloc();
        }
    }

    /// Move hand + collected tiles into the alloc buffer, all aimed at the hand
    fn open_alloc(&mut self) {
        let mut tiles = std::mem::take(&mut self.hand);
        tiles.append(&mut self.collected);
        self.alloc = tiles.into_iter().map(|t| (t, AllocTarget::Hand)).collect();
        self.alloc_mode = AllocTarget::Hand;
        self.events.push(GameEvent::AllocOpened {
            tiles: self.alloc.len(),
        });
        self.set_phase(Phase::Alloc);
    }

    fn confirm_alloc(&mut self) -> bool {
        let (hand_count, _) = self.alloc_counts();
        if hand_count > HAND_SIZE {
            return false;
        }

        let mut hand = Vec::with_capacity(hand_count);
        let mut discarded = 0;
        for (tile, target) in self.alloc.drain(..) {
            match target {
                AllocTarget::Hand => hand.push(tile),
                AllocTarget::Discard => {
                    self.discards.push(tile);
                    discarded += 1;
                }
            }
        }
        if hand.len() > HAND_SIZE {
            let overflow = hand.split_off(HAND_SIZE);
            discarded += overflow.len();
            self.discards.extend(overflow);
        }
        self.hand = hand;
        self.board.settle();
        self.events.push(GameEvent::AllocCommitted {
            hand: self.hand.len(),
            discarded,
        });

        self.set_phase(Phase::Hold);
        self.evaluate_hold();
        true
    }

    /// Evaluate both sides once on entering hold
    fn evaluate_hold(&mut self) {
        let player = solve_hand(&self.hand);
        let opponent = self.opponent_attempt();
        self.events.push(GameEvent::HoldEvaluated {
            player_win: player.is_win(),
            opponent_win: opponent.is_win(),
        });
        self.player_result = Some(player);
        self.opponent_result = Some(opponent);
    }

    /// Opponent search over board + discard, subject to the configured guards
    fn opponent_attempt(&self) -> Outcome {
        let guards = &self.config.opponent;
        if self.opponent_cooldown > 0 {
            return Outcome::NoWin(NoWinReason::Cooldown);
        }
        if matches!(guards.max_wins, Some(max) if self.opponent_wins >= max) {
            return Outcome::NoWin(NoWinReason::WinLimitReached);
        }
        let board_tiles = self.board.tiles();
        if board_tiles.len() < guards.board_min {
            return Outcome::NoWin(NoWinReason::BoardBelowMinimum);
        }
        win_search::search(&board_tiles, &self.discards)
    }

    /// Apply the cached hold results and resume play
    fn commit_hold(&mut self) -> bool {
        let player_win = self
            .player_result
            .as_ref()
            .and_then(Outcome::win)
            .map(|h| (h.score, h.premium_count()));
        if let Some((score, premium)) = player_win {
            self.score = self.score.saturating_add(score);
            self.retired.append(&mut self.hand);
            self.events.push(GameEvent::PlayerWin { score, premium });
        }

        let opponent_win = self
            .opponent_result
            .as_ref()
            .and_then(Outcome::win)
            .map(|h| (h.score, h.consumed.clone()));
        if let Some((score, consumed)) = opponent_win {
            self.opponent_score = self.opponent_score.saturating_add(score);
            self.opponent_wins += 1;
            self.opponent_cooldown = self.config.opponent.cooldown_lands;
            let (board_tiles, discard_tiles) = self.apply_clear_policy(&consumed);
            self.events.push(GameEvent::OpponentWin {
                score,
                board_tiles,
                discard_tiles,
            });
        }

        self.board.settle();
        self.processing = true;
        self.chain_level = 0;
        self.chain_timer_ms = 0;
        self.set_phase(Phase::Play);
        true
    }

    /// Remove what the opponent's win takes; returns (board, discard) tiles removed
    fn apply_clear_policy(&mut self, consumed: &Consumed) -> (usize, usize) {
        match self.config.opponent.clear_policy {
            ClearPolicy::UsedTilesOnly => {
                let from_board = self.board.remove_tiles(&consumed.board);
                let (used, kept): (Vec<Tile>, Vec<Tile>) = std::mem::take(&mut self.discards)
                    .into_iter()
                    .partition(|t| consumed.discard.contains(&t.id));
                self.discards = kept;
                let counts = (from_board.len(), used.len());
                self.retired.extend(from_board);
                self.retired.extend(used);
                counts
            }
            ClearPolicy::ClearAll => {
                let from_board = self.board.clear_all();
                let count = from_board.len();
                self.retired.extend(from_board);
                (count, 0)
            }
        }
    }

    /// Forced final evaluation, then game over
    ///
    /// The player is evaluated only with exactly 14 tiles in hand; the
    /// opponent goes through the same guards as in hold. Scores are added
    /// but no tiles move.
    fn finish_match(&mut self) {
        let player = if self.hand.len() == HAND_SIZE {
            solve_hand(&self.hand)
        } else {
            Outcome::NoWin(NoWinReason::WrongTileCount)
        };
        let opponent = self.opponent_attempt();

        if let Some(hand) = player.win() {
            self.score = self.score.saturating_add(hand.score);
            self.events.push(GameEvent::PlayerWin {
                score: hand.score,
                premium: hand.premium_count(),
            });
        }
        if let Some(hand) = opponent.win() {
            self.opponent_score = self.opponent_score.saturating_add(hand.score);
            self.opponent_wins += 1;
            self.events.push(GameEvent::OpponentWin {
                score: hand.score,
                board_tiles: 0,
                discard_tiles: 0,
            });
        }
        self.player_result = Some(player);
        self.opponent_result = Some(opponent);

        let result = FinalResult::new(self.score, self.opponent_score);
        self.final_result = Some(result);
        self.falling = None;
        self.processing = false;
        self.events.push(GameEvent::GameOver {
            player_total: result.player_total,
            opponent_total: result.opponent_total,
            winner: result.winner,
        });
        self.set_phase(Phase::GameOver);
    }
}
