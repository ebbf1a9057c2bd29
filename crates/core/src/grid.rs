//! Grid module - the board and its construction
//!
//! The board is a `rows x cols` grid (stock 8x8) where each cell is empty or
//! holds a [`Tile`]. Storage is a flat row-major `Vec` for cache locality.
//! Coordinates are [`Pos`] values: `row` 0 at the top, `col` 0 at the left.
//!
//! Grids are values: engine operations take a grid by reference and hand back
//! a new one, so callers can keep any intermediate state alive for animation
//! without aliasing concerns. `set` and `swap_cells` exist for builders,
//! tests, and tooling; the engine itself only mutates grids it owns.

use arrayvec::ArrayVec;
use tile_match_types::{Cell, Pos, Tile, TileId, TileKind, DEFAULT_COLS, DEFAULT_ROWS};

use crate::config::{ConfigError, EngineConfig};
use crate::rng::TileSpawner;

/// The board - a flat row-major array of cells with its shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u8,
    cols: u8,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid of the given shape
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row as usize * self.cols as usize + pos.col as usize)
    }

    /// Number of rows
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get cell at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Get the tile at a position, flattening emptiness and out-of-bounds
    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        self.get(pos).flatten()
    }

    /// Set cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the cells at two positions
    /// Returns false (and leaves the grid untouched) if either is out of bounds
    pub fn swap_cells(&mut self, a: Pos, b: Pos) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Copy of this grid with one cell replaced
    /// Returns None if out of bounds
    pub fn with(&self, pos: Pos, cell: Cell) -> Option<Grid> {
        self.index(pos).map(|idx| {
            let mut next = self.clone();
            next.cells[idx] = cell;
            next
        })
    }

    /// Copy of this grid with two cells exchanged
    /// Returns None if either position is out of bounds
    pub fn with_swapped(&self, a: Pos, b: Pos) -> Option<Grid> {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                let mut next = self.clone();
                next.cells.swap(ia, ib);
                Some(next)
            }
            _ => None,
        }
    }

    /// Check whether a position is on the board
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// True when no cell is empty
    pub fn is_fully_occupied(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Per-kind tile counts over a palette of `palette` kinds
    ///
    /// Empty cells and kinds outside the palette are not counted.
    pub fn kind_counts(&self, palette: u8) -> Vec<u32> {
        let mut counts = vec![0u32; palette as usize];
        for tile in self.cells.iter().flatten() {
            if let Some(slot) = counts.get_mut(tile.kind.index()) {
                *slot += 1;
            }
        }
        counts
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from raw kind indices, row-major
    ///
    /// Tiles receive sequential identities starting at 1, so layouts built
    /// this way are deterministic. Returns None when the slice length does
    /// not match the shape. Intended for tests, tooling, and restores.
    pub fn from_kinds(rows: u8, cols: u8, kinds: &[u8]) -> Option<Grid> {
        if kinds.len() != rows as usize * cols as usize {
            return None;
        }
        let cells = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| Some(Tile::new(TileId(i as u64 + 1), TileKind(k))))
            .collect();
        Some(Grid { rows, cols, cells })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

/// Create the session's starting grid: fully occupied and match-free
///
/// Fills left to right, top to bottom. Each draw is uniform over the palette
/// minus the kinds that would complete a run of 3 against the two cells to
/// the left or the two cells above, which is sufficient to guarantee the
/// finished grid contains no run anywhere.
pub fn create_initial(
    config: &EngineConfig,
    spawner: &mut TileSpawner,
) -> Result<Grid, ConfigError> {
    config.validate()?;

    let mut grid = Grid::new(config.rows, config.cols);
    for row in 0..config.rows {
        for col in 0..config.cols {
            // At most two kinds can be banned per cell, one per direction
            let mut banned: ArrayVec<TileKind, 2> = ArrayVec::new();

            if col >= 2 {
                let left = grid.tile(Pos::new(row, col - 1));
                let left2 = grid.tile(Pos::new(row, col - 2));
                if let (Some(a), Some(b)) = (left, left2) {
                    if a.kind == b.kind {
                        banned.push(a.kind);
                    }
                }
            }
            if row >= 2 {
                let above = grid.tile(Pos::new(row - 1, col));
                let above2 = grid.tile(Pos::new(row - 2, col));
                if let (Some(a), Some(b)) = (above, above2) {
                    if a.kind == b.kind && !banned.contains(&a.kind) {
                        banned.push(a.kind);
                    }
                }
            }

            let tile = spawner.spawn_avoiding(config.tile_kinds, &banned);
            grid.set(Pos::new(row, col), Some(tile));
        }
    }
    Ok(grid)
}
