//! Hint module - search for a productive swap
//!
//! Scans the grid in row-major order, trying each cell against its right
//! neighbor and then its neighbor below (no wrap-around), and returns the
//! first swap the detector approves. The scan order is part of the contract:
//! the same board always yields the same hint. `Ok(None)` means the board
//! has no valid move at all and only a shuffle can unstick it.
//!
//! When to *show* a hint is the caller's policy;
//! `types::HINT_IDLE_DELAY_MS` carries the stock idle delay for callers that
//! want it. The engine itself never consults a clock.

use tile_match_types::Pos;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::matcher::{find_matches, require_stable};

/// A swap the detector confirmed would create a run
///
/// `a` precedes `b` in scan order: `b` is always the cell to the right of or
/// below `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintMove {
    pub a: Pos,
    pub b: Pos,
}

/// Find the first swap that would create a run, if any exists
///
/// Errors only when the grid was not stable to begin with.
pub fn find_hint(grid: &Grid) -> Result<Option<HintMove>, EngineError> {
    require_stable(grid)?;

    let mut scratch = grid.clone();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let a = Pos::new(row, col);
            for b in [Pos::new(row, col + 1), Pos::new(row + 1, col)] {
                if !grid.contains(b) {
                    continue;
                }
                scratch.swap_cells(a, b);
                let productive = !find_matches(&scratch).is_empty();
                scratch.swap_cells(a, b);
                if productive {
                    return Ok(Some(HintMove { a, b }));
                }
            }
        }
    }
    Ok(None)
}
