//! Falling pair - the two-tile unit controlled by the player
//!
//! The pair has an origin `(x, y)`. The anchor always sits one row below the
//! origin at `(x, y + 1)`; the rotator sits at the origin plus
//! [`Rotation::rotator_offset`], so it orbits the anchor:
//!
//! ```text
//!   North      East       South      West
//!    R .        . .        . .        . .
//!    A .        A R        A .      R A
//!                          R
//! ```
//!
//! There are no wall kicks: a rotation that does not fit is rejected.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::tile::Tile;
use crate::types::Rotation;

/// The active two-tile unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPair {
    pub anchor: Tile,
    pub rotator: Tile,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl FallingPair {
    /// Create a pair at the spawn position for a board `cols` wide
    pub fn spawn(anchor: Tile, rotator: Tile, cols: u8) -> Self {
        Self {
            anchor,
            rotator,
            x: spawn_x(cols),
            y: 0,
            rotation: Rotation::North,
        }
    }

    pub fn anchor_pos(&self) -> (i8, i8) {
        (self.x, self.y + 1)
    }

    pub fn rotator_pos(&self) -> (i8, i8) {
        let (dx, dy) = self.rotation.rotator_offset();
        (self.x + dx, self.y + dy)
    }

    /// Both tiles with their cells, anchor first
    pub fn cells(&self) -> [(Tile, i8, i8); 2] {
        let (ax, ay) = self.anchor_pos();
        let (rx, ry) = self.rotator_pos();
        [(self.anchor, ax, ay), (self.rotator, rx, ry)]
    }

    /// Try to move by (dx, dy); returns false and leaves the pair unchanged if blocked
    pub fn try_shift(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if !can_move(board, nx, ny, self.rotation) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Try to rotate in place; returns false if the new orientation is blocked
    pub fn try_rotate(&mut self, board: &Board, clockwise: bool) -> bool {
        let next = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
        if !can_move(board, self.x, self.y, next) {
            return false;
        }
        self.rotation = next;
        true
    }

    /// Commit both tiles to the board at their current cells
    ///
    /// Tiles whose row is above the grid are not written and are returned.
    pub fn lock(self, board: &mut Board) -> ArrayVec<Tile, 2> {
        let mut outside = ArrayVec::new();
        for (tile, x, y) in self.cells() {
            if y < 0 || !board.set(x, y, Some(tile)) {
                outside.push(tile);
            }
        }
        outside
    }
}

/// Spawn column for a board `cols` wide
pub fn spawn_x(cols: u8) -> i8 {
    (cols.saturating_sub(1) / 2) as i8
}

/// Check whether a pair at origin (x, y) with `rotation` fits on the board
///
/// Cells above the grid (negative rows) always fit; any other cell must be
/// inside the grid and empty.
pub fn can_move(board: &Board, x: i8, y: i8, rotation: Rotation) -> bool {
    let (dx, dy) = rotation.rotator_offset();
    [(x, y + 1), (x + dx, y + dy)]
        .iter()
        .all(|&(cx, cy)| cy < 0 || board.is_valid(cx, cy))
}
