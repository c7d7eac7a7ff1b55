//! Whole-match driver: one decision per [`step`].

use pairfall_core::{FinalResult, GameState};
use pairfall_types::{GameAction, Phase};
use rand::RngCore;

use crate::alloc::{auto_allocate, AllocError};
use crate::place::{apply_place, best_placement, PlaceError, Placement};

/// What a single [`step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Started,
    Placed(Placement),
    Ticked,
    Allocated { discarded: usize },
    Committed,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayError {
    Place(PlaceError),
    Alloc(AllocError),
    StepLimit,
}

impl AutoplayError {
    pub fn code(self) -> &'static str {
        match self {
            AutoplayError::Place(e) => e.code(),
            AutoplayError::Alloc(e) => e.code(),
            AutoplayError::StepLimit => "step_limit",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AutoplayError::Place(e) => e.message(),
            AutoplayError::Alloc(e) => e.message(),
            AutoplayError::StepLimit => "match did not finish within the step limit",
        }
    }
}

impl std::fmt::Display for AutoplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AutoplayError {}

impl From<PlaceError> for AutoplayError {
    fn from(value: PlaceError) -> Self {
        AutoplayError::Place(value)
    }
}

impl From<AllocError> for AutoplayError {
    fn from(value: AllocError) -> Self {
        AutoplayError::Alloc(value)
    }
}

/// Advance the match by one decision
pub fn step<R: RngCore + Clone>(state: &mut GameState<R>) -> Result<Step, AutoplayError> {
    match state.phase() {
        Phase::Title => {
            state.apply_action(GameAction::Confirm);
            Ok(Step::Started)
        }
        Phase::Play => {
            if !state.is_processing() && state.falling().is_some() {
                if let Some(placement) = best_placement(state) {
                    apply_place(state, placement.x, placement.rotation)?;
                    return Ok(Step::Placed(placement));
                }
            }
            let elapsed = if state.is_processing() {
                state.config().chain_tick_ms
            } else {
                state.fall_interval_ms(true)
            };
            state.tick(elapsed, true);
            Ok(Step::Ticked)
        }
        Phase::Alloc => {
            let discarded = auto_allocate(state)?;
            Ok(Step::Allocated { discarded })
        }
        Phase::Hold => {
            state.apply_action(GameAction::Confirm);
            Ok(Step::Committed)
        }
        Phase::GameOver => Ok(Step::Finished),
    }
}

/// Step until the match ends, calling `on_step` after every step
pub fn play_match<R, F>(
    state: &mut GameState<R>,
    max_steps: usize,
    mut on_step: F,
) -> Result<FinalResult, AutoplayError>
where
    R: RngCore + Clone,
    F: FnMut(&mut GameState<R>, Step),
{
    for _ in 0..max_steps {
        if let Some(result) = state.final_result() {
            return Ok(result);
        }
        let done = step(state)?;
        on_step(state, done);
    }
    state.final_result().ok_or(AutoplayError::StepLimit)
}
