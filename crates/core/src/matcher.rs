//! Match detector - finds every run of 3+ equal kinds
//!
//! Scans each row left to right and each column top to bottom for maximal
//! runs of equal kinds. A tile sitting in both a horizontal and a vertical
//! qualifying run is reported once, with the longer of the two lengths.
//! Results are ordered by position (row-major), so the outcome depends on
//! geometry alone, never on tile kinds or identities.
//!
//! Empty cells break runs, which makes the detector total over mid-cascade
//! grids as well as stable ones.

use tile_match_types::{Pos, TileId, MIN_RUN_LEN};

use crate::error::EngineError;
use crate::grid::Grid;

/// One matched tile: identity, position, and the longest qualifying run through it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedTile {
    pub id: TileId,
    pub pos: Pos,
    /// Length of the longest single-direction run containing this tile
    /// (max of horizontal and vertical, never the sum)
    pub run_len: u8,
}

/// Every tile matched on a grid at one instant, in row-major position order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    tiles: Vec<MatchedTile>,
}

impl MatchSet {
    /// True when nothing matched
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of matched tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Matched tiles in row-major position order
    pub fn tiles(&self) -> &[MatchedTile] {
        &self.tiles
    }

    /// Iterate the matched tiles
    pub fn iter(&self) -> impl Iterator<Item = &MatchedTile> {
        self.tiles.iter()
    }

    /// Iterate the matched identities
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().map(|t| t.id)
    }

    /// Whether the tile at `pos` matched
    pub fn contains_pos(&self, pos: Pos) -> bool {
        self.tiles.iter().any(|t| t.pos == pos)
    }

    /// Run length recorded for the tile at `pos`, if it matched
    pub fn run_len_at(&self, pos: Pos) -> Option<u8> {
        self.tiles.iter().find(|t| t.pos == pos).map(|t| t.run_len)
    }
}

/// Find every run of length >= 3 on the grid
///
/// The grid may be mid-cascade; empty cells simply terminate runs.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let rows = grid.rows() as usize;
    let cols = grid.cols() as usize;
    // Longest qualifying run length seen per cell, 0 = unmatched
    let mut best = vec![0u8; rows * cols];

    for row in 0..rows {
        let mut col = 0;
        while col < cols {
            let here = grid.tile(Pos::new(row as u8, col as u8));
            let Some(tile) = here else {
                col += 1;
                continue;
            };
            let mut len = 1;
            while col + len < cols {
                let next = grid.tile(Pos::new(row as u8, (col + len) as u8));
                if next.map(|t| t.kind) != Some(tile.kind) {
                    break;
                }
                len += 1;
            }
            if len >= MIN_RUN_LEN as usize {
                for i in 0..len {
                    let idx = row * cols + col + i;
                    best[idx] = best[idx].max(len as u8);
                }
            }
            col += len;
        }
    }

    for col in 0..cols {
        let mut row = 0;
        while row < rows {
            let here = grid.tile(Pos::new(row as u8, col as u8));
            let Some(tile) = here else {
                row += 1;
                continue;
            };
            let mut len = 1;
            while row + len < rows {
                let next = grid.tile(Pos::new((row + len) as u8, col as u8));
                if next.map(|t| t.kind) != Some(tile.kind) {
                    break;
                }
                len += 1;
            }
            if len >= MIN_RUN_LEN as usize {
                for i in 0..len {
                    let idx = (row + i) * cols + col;
                    best[idx] = best[idx].max(len as u8);
                }
            }
            row += len;
        }
    }

    let mut tiles = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let run_len = best[row * cols + col];
            if run_len == 0 {
                continue;
            }
            let pos = Pos::new(row as u8, col as u8);
            if let Some(tile) = grid.tile(pos) {
                tiles.push(MatchedTile {
                    id: tile.id,
                    pos,
                    run_len,
                });
            }
        }
    }
    MatchSet { tiles }
}

/// Entry guard for operations that require a stable grid
///
/// Swap, hint, and shuffle are only defined between cascades; finding empty
/// cells or a live run here means the caller broke the lifecycle.
pub fn require_stable(grid: &Grid) -> Result<(), EngineError> {
    if !grid.is_fully_occupied() {
        return Err(EngineError::GridNotFull);
    }
    if !find_matches(grid).is_empty() {
        return Err(EngineError::GridUnstable);
    }
    Ok(())
}
