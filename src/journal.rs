//! Event journal - one JSON object per line
//!
//! Every [`GameEvent`] drained from a match becomes an [`EventRecord`]
//! tagged by event name, wrapped with the match index and a running
//! sequence number. The runner also prints the same events as `[Sim]` lines
//! via [`describe`].

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::GameEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    PhaseChanged {
        from: String,
        to: String,
    },
    Spawned {
        anchor: i32,
        rotator: i32,
    },
    Locked {
        x: i8,
        y: i8,
        rotation: String,
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
        winner: String,
    },
}

impl From<&GameEvent> for EventRecord {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::PhaseChanged { from, to } => EventRecord::PhaseChanged {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            },
            GameEvent::Spawned { anchor, rotator } => EventRecord::Spawned { anchor, rotator },
            GameEvent::Locked {
                x,
                y,
                rotation,
                outside,
            } => EventRecord::Locked {
                x,
                y,
                rotation: rotation.as_str().to_string(),
                outside,
            },
            GameEvent::ChainStep {
                level,
                removed,
                points,
            } => EventRecord::ChainStep {
                level,
                removed,
                points,
            },
            GameEvent::AllocOpened { tiles } => EventRecord::AllocOpened { tiles },
            GameEvent::AllocCommitted { hand, discarded } => {
                EventRecord::AllocCommitted { hand, discarded }
            }
            GameEvent::HoldEvaluated {
                player_win,
                opponent_win,
            } => EventRecord::HoldEvaluated {
                player_win,
                opponent_win,
            },
            GameEvent::PlayerWin { score, premium } => EventRecord::PlayerWin { score, premium },
            GameEvent::OpponentWin {
                score,
                board_tiles,
                discard_tiles,
            } => EventRecord::OpponentWin {
                score,
                board_tiles,
                discard_tiles,
            },
            GameEvent::GameOver {
                player_total,
                opponent_total,
                winner,
            } => EventRecord::GameOver {
                player_total,
                opponent_total,
                winner: winner.as_str().to_string(),
            },
        }
    }
}

/// One journal line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    #[serde(rename = "match")]
    pub match_index: u32,
    pub seq: u64,
    #[serde(flatten)]
    pub record: EventRecord,
}

pub struct Journal<W: Write> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
}

impl Journal<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn record(&mut self, match_index: u32, event: &GameEvent) -> Result<()> {
        let line = JournalLine {
            match_index,
            seq: self.seq,
            record: EventRecord::from(event),
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &line)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.seq += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Human-readable one-liner for console output
pub fn describe(event: &GameEvent) -> String {
    match *event {
        GameEvent::PhaseChanged { from, to } => {
            format!("phase {} -> {}", from.as_str(), to.as_str())
        }
        GameEvent::Spawned { anchor, rotator } => format!("spawn {} + {}", anchor, rotator),
        GameEvent::Locked {
            x,
            y,
            rotation,
            outside,
        } => {
            if outside > 0 {
                format!("lock x={} y={} {} ({} above grid)", x, y, rotation.as_str(), outside)
            } else {
                format!("lock x={} y={} {}", x, y, rotation.as_str())
            }
        }
        GameEvent::ChainStep {
            level,
            removed,
            points,
        } => format!("chain x{}: {} tiles, +{}", level, removed, points),
        GameEvent::AllocOpened { tiles } => format!("alloc {} tiles", tiles),
        GameEvent::AllocCommitted { hand, discarded } => {
            format!("alloc committed: hand={} discarded={}", hand, discarded)
        }
        GameEvent::HoldEvaluated {
            player_win,
            opponent_win,
        } => format!("hold: player_win={} opponent_win={}", player_win, opponent_win),
        GameEvent::PlayerWin { score, premium } => {
            format!("player wins +{} ({} premium)", score, premium)
        }
        GameEvent::OpponentWin {
            score,
            board_tiles,
            discard_tiles,
        } => format!(
            "opponent wins +{} (board {}, discard {})",
            score, board_tiles, discard_tiles
        ),
        GameEvent::GameOver {
            player_total,
            opponent_total,
            winner,
        } => format!(
            "game over {} : {} winner={}",
            player_total,
            opponent_total,
            winner.as_str()
        ),
    }
}
