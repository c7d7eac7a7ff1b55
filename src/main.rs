//! Headless match runner (default binary).
//!
//! Plays whole matches with the placement and auto-allocation engine and
//! reports each one. Settings come from `PAIRFALL_*` environment variables,
//! overridden by command-line flags (see [`pairfall::settings`]).

use anyhow::{anyhow, Result};

use pairfall::core::GameState;
use pairfall::engine::play_match;
use pairfall::journal::{describe, Journal};
use pairfall::settings::SimSettings;
use pairfall::types::Winner;

const MAX_STEPS: usize = 100_000;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = SimSettings::load(&args)?;

    let mut journal = match settings.log_path.as_deref() {
        Some(path) => Some(Journal::open(path)?),
        None => None,
    };

    println!(
        "[Sim] seed={} matches={} clear_policy={} bias={}",
        settings.seed,
        settings.matches,
        settings.config.opponent.clear_policy.as_str(),
        if settings.config.bias.enabled { "on" } else { "off" },
    );

    let (mut player, mut opponent, mut draws) = (0u32, 0u32, 0u32);
    for index in 0..settings.matches {
        let seed = settings.seed.wrapping_add(index);
        let mut state = GameState::try_new(seed, settings.config)
            .map_err(|e| anyhow!("match {}: {}", index, e))?;

        let mut journal_error = None;
        let result = play_match(&mut state, MAX_STEPS, |gs, _| {
            for event in gs.take_events() {
                if !settings.quiet {
                    println!("[Sim] #{} {}", index, describe(&event));
                }
                if let Some(journal) = journal.as_mut() {
                    if let Err(e) = journal.record(index, &event) {
                        journal_error.get_or_insert(e);
                    }
                }
            }
        })
        .map_err(|e| anyhow!("match {} (seed {}): {}", index, seed, e))?;
        if let Some(e) = journal_error {
            return Err(e);
        }

        match result.winner {
            Winner::Player => player += 1,
            Winner::Opponent => opponent += 1,
            Winner::Draw => draws += 1,
        }
        println!(
            "[Sim] match {} seed={} player={} opponent={} winner={} pieces={} opponent_wins={}",
            index,
            seed,
            result.player_total,
            result.opponent_total,
            result.winner.as_str(),
            state.pieces_spawned(),
            state.opponent_wins(),
        );
    }

    if let Some(journal) = journal.as_mut() {
        journal.flush()?;
    }
    println!(
        "[Sim] done: player={} opponent={} draw={}",
        player, opponent, draws
    );
    Ok(())
}
