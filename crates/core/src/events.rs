//! Game events - what happened inside the core, for observers
//!
//! The state machine records events into a bounded queue; runners drain it
//! with [`GameState::take_events`](crate::GameState::take_events) to print
//! or journal them. Once the queue is full the oldest event is dropped.

use std::collections::VecDeque;

use crate::types::{Phase, Rotation, TileId, Winner};

/// Events kept before the oldest is dropped
pub const EVENT_QUEUE_CAP: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    Spawned {
        anchor: TileId,
        rotator: TileId,
    },
    Locked {
        x: i8,
        y: i8,
        rotation: Rotation,
        /// Tiles that locked above the grid
        outside: usize,
    },
    ChainStep {
        level: u32,
        removed: usize,
        points: u32,
    },
    AllocOpened {
        tiles: usize,
    },
    AllocCommitted {
        hand: usize,
        discarded: usize,
    },
    HoldEvaluated {
        player_win: bool,
        opponent_win: bool,
    },
    PlayerWin {
        score: u32,
        premium: usize,
    },
    OpponentWin {
        score: u32,
        board_tiles: usize,
        discard_tiles: usize,
    },
    GameOver {
        player_total: u32,
        opponent_total: u32,
        winner: Winner,
    },
}

impl GameEvent {
    /// Stable event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::Locked { .. } => "locked",
            GameEvent::ChainStep { .. } => "chain_step",
            GameEvent::AllocOpened { .. } => "alloc_opened",
            GameEvent::AllocCommitted { .. } => "alloc_committed",
            GameEvent::HoldEvaluated { .. } => "hold_evaluated",
            GameEvent::PlayerWin { .. } => "player_win",
            GameEvent::OpponentWin { .. } => "opponent_win",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    queue: VecDeque<GameEvent>,
}

impl EventLog {
    pub(crate) fn push(&mut self, event: GameEvent) {
        if self.queue.len() >= EVENT_QUEUE_CAP {
            self.queue.pop_front();
        }
        self.queue.push_back(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = EventLog::default();
        for level in 0..(EVENT_QUEUE_CAP as u32 + 10) {
            log.push(GameEvent::ChainStep {
                level,
                removed: 4,
                points: 400,
            });
        }
        assert_eq!(log.len(), EVENT_QUEUE_CAP);
        let events = log.drain();
        // Oldest ten were dropped.
        assert_eq!(
            events[0],
            GameEvent::ChainStep {
                level: 10,
                removed: 4,
                points: 400
            }
        );
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::AllocOpened { tiles: 4 }.name(), "alloc_opened");
    }
}
