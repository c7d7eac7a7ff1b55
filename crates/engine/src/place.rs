use pairfall_core::{Board, GameState};
use pairfall_types::{GameAction, Phase, Rotation, CLUSTER_MIN};
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    NoActive,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    LockTimeout,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::LockTimeout => "lock_timeout",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NotPlayable
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "game is not in play",
            PlaceError::NoActive => "no falling pair",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place the pair out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::LockTimeout => "pair did not lock within the board height",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// A candidate placement and its heuristic value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i8,
    pub rotation: Rotation,
    pub score: i32,
}

/// Rotate, shift and soft-drop the falling pair until it locks at `target_x`
///
/// On a rotation failure the state is restored; a failed shift leaves the
/// pair where it stopped.
pub fn apply_place<R: RngCore + Clone>(
    state: &mut GameState<R>,
    target_x: i8,
    target_rot: Rotation,
) -> Result<(), PlaceError> {
    if state.phase() != Phase::Play {
        return Err(PlaceError::NotPlayable);
    }
    let Some(pair0) = state.falling() else {
        return Err(PlaceError::NoActive);
    };

    let (dx, _) = target_rot.rotator_offset();
    let cols = state.board().width() as i8;
    if target_x + dx.min(0) < 0 || target_x + dx.max(0) >= cols {
        return Err(PlaceError::XOutOfBounds);
    }

    // Try CW/CCW plans; keep the shorter first.
    let rot_to_i = |r: Rotation| match r {
        Rotation::North => 0i8,
        Rotation::East => 1i8,
        Rotation::South => 2i8,
        Rotation::West => 3i8,
    };
    let cur = rot_to_i(pair0.rotation);
    let tgt = rot_to_i(target_rot);
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;
    let mut plans = [(GameAction::RotateCw, cw), (GameAction::RotateCcw, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let snapshot = state.clone();
    let mut rotated = false;
    for (action, steps) in plans {
        *state = snapshot.clone();
        if (0..steps).all(|_| state.apply_action(action)) {
            rotated = true;
            break;
        }
    }
    if !rotated || state.falling().map(|p| p.rotation) != Some(target_rot) {
        *state = snapshot;
        return Err(PlaceError::RotationBlocked);
    }

    let Some(pair) = state.falling() else {
        return Err(PlaceError::NoActive);
    };
    let shift = target_x - pair.x;
    let action = if shift > 0 {
        GameAction::MoveRight
    } else {
        GameAction::MoveLeft
    };
    for _ in 0..shift.unsigned_abs() {
        if !state.apply_action(action) {
            return Err(PlaceError::XBlocked);
        }
    }

    let interval = state.fall_interval_ms(true);
    for _ in 0..=(state.board().height() as usize + 2) {
        if state.falling().is_none() {
            return Ok(());
        }
        state.tick(interval, true);
    }
    if state.falling().is_none() {
        Ok(())
    } else {
        Err(PlaceError::LockTimeout)
    }
}

/// Try every column and rotation on a copy of the state and keep the best board
pub fn best_placement<R: RngCore + Clone>(state: &GameState<R>) -> Option<Placement> {
    if state.phase() != Phase::Play || state.falling().is_none() {
        return None;
    }
    let cols = state.board().width() as i8;
    let mut best: Option<Placement> = None;
    for rotation in [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ] {
        for x in 0..cols {
            let mut trial = state.clone();
            if apply_place(&mut trial, x, rotation).is_err() {
                continue;
            }
            let score = board_quality(trial.board());
            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement { x, rotation, score });
            }
        }
    }
    best
}

/// Heuristic board value: clearable tiles and same-suit contacts up, stack height down
pub fn board_quality(board: &Board) -> i32 {
    let (w, h) = (board.width() as i8, board.height() as i8);
    let mut links = 0i32;
    let mut top = h;
    for y in 0..h {
        for x in 0..w {
            let Some(tile) = board.get(x, y) else {
                continue;
            };
            top = top.min(y);
            for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                if board.get(nx, ny).is_some_and(|n| n.suit() == tile.suit()) {
                    links += 1;
                }
            }
        }
    }
    let clearable = board.clone().clear_connected_clusters(CLUSTER_MIN).len() as i32;
    let height = (h - top) as i32;
    clearable * 8 + links * 2 - height * 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairfall_core::{Tile, TileFace};
    use pairfall_types::GameConfig;

    fn started() -> GameState {
        let mut gs = GameState::new(1, GameConfig::default());
        assert!(gs.apply_action(GameAction::Confirm));
        gs
    }

    fn tile(id: i32, label: &str) -> Tile {
        Tile::new(id, TileFace::parse(label).unwrap(), false)
    }

    #[test]
    fn place_rejected_when_not_playing() {
        let mut gs = GameState::new(1, GameConfig::default());
        let err = apply_place(&mut gs, 0, Rotation::North).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
    }

    #[test]
    fn place_rejected_when_x_out_of_bounds() {
        let mut gs = started();
        assert_eq!(
            apply_place(&mut gs, -50, Rotation::North).unwrap_err(),
            PlaceError::XOutOfBounds
        );
        // East puts the rotator one column to the right of the anchor.
        assert_eq!(
            apply_place(&mut gs, 5, Rotation::East).unwrap_err(),
            PlaceError::XOutOfBounds
        );
        assert!(gs.falling().is_some());
    }

    #[test]
    fn place_locks_at_target_column() {
        let mut gs = started();
        let pair = gs.falling().expect("falling pair");
        apply_place(&mut gs, 0, Rotation::North).unwrap();

        assert!(gs.falling().is_none());
        assert!(gs.is_processing());
        assert_eq!(gs.board().get(0, 11).map(|t| t.id), Some(pair.anchor.id));
        assert_eq!(gs.board().get(0, 10).map(|t| t.id), Some(pair.rotator.id));
    }

    #[test]
    fn place_half_turn_puts_rotator_below() {
        let mut gs = started();
        let pair = gs.falling().expect("falling pair");
        apply_place(&mut gs, 3, Rotation::South).unwrap();

        assert_eq!(gs.board().get(3, 11).map(|t| t.id), Some(pair.rotator.id));
        assert_eq!(gs.board().get(3, 10).map(|t| t.id), Some(pair.anchor.id));
    }

    #[test]
    fn place_horizontal() {
        let mut gs = started();
        let pair = gs.falling().expect("falling pair");
        apply_place(&mut gs, 4, Rotation::East).unwrap();

        assert_eq!(gs.board().get(4, 11).map(|t| t.id), Some(pair.anchor.id));
        assert_eq!(gs.board().get(5, 11).map(|t| t.id), Some(pair.rotator.id));
    }

    #[test]
    fn best_placement_only_in_play() {
        let gs = GameState::new(1, GameConfig::default());
        assert!(best_placement(&gs).is_none());

        let gs = started();
        let p = best_placement(&gs).expect("empty board has placements");
        assert!((0..6).contains(&p.x));
    }

    #[test]
    fn board_quality_prefers_clusters_and_low_stacks() {
        let mut flat = Board::new(6, 12);
        flat.set(0, 11, Some(tile(0, "1m")));
        flat.set(1, 11, Some(tile(1, "2m")));

        let mut split = Board::new(6, 12);
        split.set(0, 11, Some(tile(0, "1m")));
        split.set(5, 11, Some(tile(1, "2m")));

        let mut tall = Board::new(6, 12);
        tall.set(0, 11, Some(tile(0, "1m")));
        tall.set(0, 10, Some(tile(1, "2p")));

        assert!(board_quality(&flat) > board_quality(&split));
        assert!(board_quality(&split) > board_quality(&tall));
    }
}
