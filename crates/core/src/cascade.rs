//! Cascade module - swap validation and match resolution
//!
//! The whole Idle -> Resolving -> Idle machine runs synchronously inside
//! [`attempt_swap`]: validate the swap, detect, then clear / drop / refill
//! until the grid is stable again. The returned [`CascadeOutcome`] carries
//! every intermediate step so a renderer can replay the chain as animation;
//! by the time the call returns the grid is already final.
//!
//! Rejected swaps are ordinary values ([`SwapOutcome::Rejected`]), never
//! errors, and leave the grid and the spawner untouched.
//!
//! Determinism contract for refills: columns settle left to right, and each
//! column spawns into its lowest empty slot first. Identical seeds and call
//! sequences replay identical cascades.

use tile_match_types::{Pos, Tile, TileId};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::matcher::{find_matches, require_stable, MatchedTile};
use crate::rng::TileSpawner;
use crate::scoring;

/// Why a swap was refused; the grid is untouched in every case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    /// At least one coordinate is off the board
    OutOfBounds,
    /// Manhattan distance is not exactly 1 (diagonals and identical cells included)
    NotAdjacent,
    /// The swap would not create any run
    NoMatch,
}

impl SwapRejection {
    /// Stable lower-snake identifier, used by the snapshot mirrors
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "out_of_bounds",
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::NoMatch => "no_match",
        }
    }
}

/// Result of a swap attempt on a stable grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap was refused; nothing changed
    Rejected(SwapRejection),
    /// The swap committed and the cascade ran to stability
    Resolved(CascadeOutcome),
}

/// A surviving tile displaced by gravity within its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub id: TileId,
    pub col: u8,
    pub from_row: u8,
    pub to_row: u8,
}

/// A fresh tile dropped into the spawn zone at the top of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    pub tile: Tile,
    pub pos: Pos,
}

/// One clear / drop / refill round of a cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Combo level the step was scored at
    pub combo_level: u32,
    /// Matched tiles removed this step, in row-major order
    pub cleared: Vec<MatchedTile>,
    /// Gravity displacements of surviving tiles
    pub moves: Vec<TileMove>,
    /// Tiles spawned to refill the columns, in draw order
    pub spawned: Vec<SpawnedTile>,
    /// Points awarded for this step
    pub score_delta: u32,
    /// Grid after the step settled, for stepwise rendering
    pub grid_after: Grid,
}

/// Final result of a committed swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// The stable grid after the whole chain
    pub grid: Grid,
    /// Every resolution step, in order
    pub steps: Vec<CascadeStep>,
    /// Sum of the step scores
    pub score_delta: u32,
    /// Session combo level this chain ran at
    pub combo_level_after: u32,
}

/// Attempt to swap two tiles on a stable grid
///
/// Rejections come back as [`SwapOutcome::Rejected`] with the original grid
/// and the spawner untouched. A committed swap resolves the full cascade and
/// returns it as [`SwapOutcome::Resolved`]. `combo_start` is the session
/// combo level the chain begins at (step `i` scores at `combo_start + i`).
///
/// Errors mean the inputs were already broken: an invalid configuration, a
/// grid whose shape does not match it, or a grid that was not stable.
pub fn attempt_swap(
    grid: &Grid,
    a: Pos,
    b: Pos,
    combo_start: u32,
    spawner: &mut TileSpawner,
    config: &EngineConfig,
) -> Result<SwapOutcome, EngineError> {
    check_shape(grid, config)?;
    require_stable(grid)?;

    if !grid.contains(a) || !grid.contains(b) {
        return Ok(SwapOutcome::Rejected(SwapRejection::OutOfBounds));
    }
    if !a.is_adjacent(b) {
        return Ok(SwapOutcome::Rejected(SwapRejection::NotAdjacent));
    }

    let Some(swapped) = grid.with_swapped(a, b) else {
        return Ok(SwapOutcome::Rejected(SwapRejection::OutOfBounds));
    };
    if find_matches(&swapped).is_empty() {
        return Ok(SwapOutcome::Rejected(SwapRejection::NoMatch));
    }

    let outcome = resolve_cascade(swapped, combo_start, spawner, config)?;
    Ok(SwapOutcome::Resolved(outcome))
}

/// Run the clear / drop / refill loop until no runs remain
///
/// The input is a fully occupied grid, typically one just perturbed by a
/// swap. A grid with no runs resolves to an outcome with zero steps. Step
/// count is capped by `max_cascade_steps`; running past the cap is
/// [`EngineError::CascadeOverrun`], never silent truncation.
pub fn resolve_cascade(
    mut grid: Grid,
    combo_start: u32,
    spawner: &mut TileSpawner,
    config: &EngineConfig,
) -> Result<CascadeOutcome, EngineError> {
    check_shape(&grid, config)?;

    let mut steps: Vec<CascadeStep> = Vec::new();
    let mut total: u32 = 0;

    let mut matches = find_matches(&grid);
    while !matches.is_empty() {
        if steps.len() as u32 >= config.max_cascade_steps {
            return Err(EngineError::CascadeOverrun {
                max: config.max_cascade_steps,
            });
        }

        let combo_level = combo_start + steps.len() as u32;
        let score_delta = scoring::step_score(&matches, combo_level, config);
        total = total.saturating_add(score_delta);

        let cleared = matches.tiles().to_vec();
        for tile in &cleared {
            grid.set(tile.pos, None);
        }
        let (moves, spawned) = settle_columns(&mut grid, spawner, config);

        steps.push(CascadeStep {
            combo_level,
            cleared,
            moves,
            spawned,
            score_delta,
            grid_after: grid.clone(),
        });

        matches = find_matches(&grid);
    }

    Ok(CascadeOutcome {
        grid,
        steps,
        score_delta: total,
        combo_level_after: combo_start,
    })
}

fn check_shape(grid: &Grid, config: &EngineConfig) -> Result<(), EngineError> {
    config.validate()?;
    config.check_shape(grid.rows(), grid.cols())?;
    Ok(())
}

/// Drop survivors column by column, then refill the empty slots from the top
///
/// Surviving tiles keep their identity and their relative vertical order.
/// Spawns draw unconstrained random kinds, lowest empty slot first.
fn settle_columns(
    grid: &mut Grid,
    spawner: &mut TileSpawner,
    config: &EngineConfig,
) -> (Vec<TileMove>, Vec<SpawnedTile>) {
    let mut moves = Vec::new();
    let mut spawned = Vec::new();
    let rows = grid.rows() as i32;

    for col in 0..grid.cols() {
        // Compact survivors toward the bottom with a write pointer
        let mut write = rows - 1;
        for row in (0..rows).rev() {
            let from = Pos::new(row as u8, col);
            if let Some(tile) = grid.tile(from) {
                if write != row {
                    grid.set(from, None);
                    grid.set(Pos::new(write as u8, col), Some(tile));
                    moves.push(TileMove {
                        id: tile.id,
                        col,
                        from_row: row as u8,
                        to_row: write as u8,
                    });
                }
                write -= 1;
            }
        }
        // Everything above the write pointer is empty now
        for row in (0..=write).rev() {
            let pos = Pos::new(row as u8, col);
            let tile = spawner.spawn(config.tile_kinds);
            grid.set(pos, Some(tile));
            spawned.push(SpawnedTile { tile, pos });
        }
    }

    (moves, spawned)
}
