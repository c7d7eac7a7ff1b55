//! Board module - manages the tile grid
//!
//! The board is a `cols x rows` grid where each cell is empty or holds one tile.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x ranges 0..cols (left to right), y ranges 0..rows
//! (top to bottom), so gravity moves tiles toward larger `y`.

use crate::tile::Tile;
use crate::types::{TileId, BOARD_COLS, BOARD_ROWS};

/// The tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cols: u8,
    rows: u8,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.cols
    }

    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Tile at (x, y); out-of-bounds reads as empty
    pub fn get(&self, x: i8, y: i8) -> Option<Tile> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false (and writes nothing) if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Option<Tile>) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.index(x, y), Some(idx) if self.cells[idx].is_none())
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some()
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x as i16 >= self.cols as i16 || y < 0 || y as i16 >= self.rows as i16
    }

    /// Remove every tile whose id is listed, leaving holes
    ///
    /// Returns the removed tiles in row-major order.
    pub fn remove_tiles(&mut self, ids: &[TileId]) -> Vec<Tile> {
        let mut removed = Vec::new();
        for cell in self.cells.iter_mut() {
            if let Some(tile) = *cell {
                if ids.contains(&tile.id) {
                    removed.push(tile);
                    *cell = None;
                }
            }
        }
        removed
    }

    /// Compact every column toward the bottom, preserving relative order
    ///
    /// Returns true if any tile moved.
    pub fn apply_gravity_once(&mut self) -> bool {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        let mut moved = false;

        for x in 0..cols {
            // Two-pointer compaction from the bottom row upward
            let mut write_y = rows;
            for read_y in (0..rows).rev() {
                let Some(tile) = self.cells[read_y * cols + x] else {
                    continue;
                };
                write_y -= 1;
                if write_y != read_y {
                    self.cells[write_y * cols + x] = Some(tile);
                    self.cells[read_y * cols + x] = None;
                    moved = true;
                }
            }
        }
        moved
    }

    /// Repeat gravity until nothing moves, at most `rows` passes
    ///
    /// Returns the number of passes that moved something.
    pub fn settle(&mut self) -> usize {
        let mut passes = 0;
        for _ in 0..self.rows.max(1) {
            if !self.apply_gravity_once() {
                break;
            }
            passes += 1;
        }
        passes
    }

    /// True when no tile has an empty cell beneath it
    pub fn is_settled(&self) -> bool {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        (0..cols).all(|x| {
            let mut seen_empty = false;
            (0..rows).rev().all(|y| match self.cells[y * cols + x] {
                None => {
                    seen_empty = true;
                    true
                }
                Some(_) => !seen_empty,
            })
        })
    }

    /// Remove every 4-connected same-suit group of at least `min_size` tiles
    ///
    /// Rank is ignored: adjacency only requires equal suits. Smaller groups
    /// stay in place. Returns the removed tiles.
    pub fn clear_connected_clusters(&mut self, min_size: usize) -> Vec<Tile> {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        let mut visited = vec![false; self.cells.len()];
        let mut removed = Vec::new();
        let mut group: Vec<usize> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for start in 0..self.cells.len() {
            if visited[start] {
                continue;
            }
            let Some(seed) = self.cells[start] else {
                continue;
            };
            let suit = seed.suit();

            group.clear();
            stack.clear();
            stack.push(start);
            visited[start] = true;

            while let Some(idx) = stack.pop() {
                group.push(idx);
                let (x, y) = (idx % cols, idx / cols);
                let neighbors = [
                    (x > 0).then(|| idx - 1),
                    (x + 1 < cols).then(|| idx + 1),
                    (y > 0).then(|| idx - cols),
                    (y + 1 < rows).then(|| idx + cols),
                ];
                for n in neighbors.into_iter().flatten() {
                    if visited[n] {
                        continue;
                    }
                    if matches!(self.cells[n], Some(t) if t.suit() == suit) {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }

            if group.len() >= min_size {
                for &idx in &group {
                    if let Some(tile) = self.cells[idx].take() {
                        removed.push(tile);
                    }
                }
            }
        }
        removed
    }

    /// Clear the entire board, returning every tile that was on it
    pub fn clear_all(&mut self) -> Vec<Tile> {
        self.cells.iter_mut().filter_map(Option::take).collect()
    }

    /// Tiles on the board in row-major order
    pub fn tiles(&self) -> Vec<Tile> {
        self.cells.iter().flatten().copied().collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Lowest empty row of a column, if any
    pub fn landing_row(&self, x: i8) -> Option<i8> {
        if x < 0 || x as i16 >= self.cols as i16 {
            return None;
        }
        (0..self.rows as i8).rev().find(|&y| self.is_valid(x, y))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_COLS, BOARD_ROWS)
    }
}
