//! Shuffle module - rearrange a stuck board without changing its tiles
//!
//! Shuffling permutes the kinds already on the board (Fisher-Yates over the
//! collected multiset) and rebuilds the grid with fresh identities. Because a
//! random permutation can land on runs, a bounded repair loop follows: swap
//! the kind of a random in-run cell with a random out-of-run cell until the
//! detector is quiet. The output multiset of kinds always equals the input
//! multiset.
//!
//! The repair bound (`shuffle_retry_cap`) exists for pathological
//! palette/shape pairings; hitting it is [`EngineError::ShuffleRetriesExhausted`],
//! never a silently matching board. The per-session shuffle allowance
//! (`shuffle_quota`) is the caller's to enforce.

use tile_match_types::{Pos, Tile, TileKind};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::matcher::{find_matches, require_stable};
use crate::rng::TileSpawner;

/// Produce a run-free rearrangement of the grid's kinds with fresh ids
///
/// Draw order is fixed: one Fisher-Yates pass, then per repair one in-run
/// pick and one partner pick. Identical seeds rearrange identically.
pub fn shuffle_grid(
    grid: &Grid,
    spawner: &mut TileSpawner,
    config: &EngineConfig,
) -> Result<Grid, EngineError> {
    config.validate()?;
    config.check_shape(grid.rows(), grid.cols())?;
    require_stable(grid)?;

    let mut kinds: Vec<TileKind> = grid.cells().iter().flatten().map(|t| t.kind).collect();
    spawner.shuffle(&mut kinds);

    let cols = grid.cols() as usize;
    let mut shuffled = Grid::new(grid.rows(), grid.cols());
    for (i, kind) in kinds.iter().enumerate() {
        let pos = Pos::new((i / cols) as u8, (i % cols) as u8);
        shuffled.set(pos, Some(Tile::new(spawner.mint_id(), *kind)));
    }

    let mut attempts = 0u32;
    loop {
        let matches = find_matches(&shuffled);
        if matches.is_empty() {
            return Ok(shuffled);
        }
        if attempts >= config.shuffle_retry_cap {
            return Err(EngineError::ShuffleRetriesExhausted { attempts });
        }
        attempts += 1;

        let in_run: Vec<Pos> = matches.iter().map(|t| t.pos).collect();
        let mut out_run: Vec<Pos> = Vec::with_capacity(config.cell_count());
        for row in 0..shuffled.rows() {
            for col in 0..shuffled.cols() {
                let pos = Pos::new(row, col);
                if !matches.contains_pos(pos) {
                    out_run.push(pos);
                }
            }
        }

        let a = in_run[spawner.pick_index(in_run.len())];
        let b = if out_run.is_empty() {
            // Every cell sits in a run; fall back to any other cell
            let total = config.cell_count();
            let a_flat = a.row as usize * cols + a.col as usize;
            let flat = (a_flat + 1 + spawner.pick_index(total - 1)) % total;
            Pos::new((flat / cols) as u8, (flat % cols) as u8)
        } else {
            out_run[spawner.pick_index(out_run.len())]
        };
        swap_kinds(&mut shuffled, a, b);
    }
}

/// Exchange the kinds of two cells, leaving their identities in place
fn swap_kinds(grid: &mut Grid, a: Pos, b: Pos) {
    if let (Some(ta), Some(tb)) = (grid.tile(a), grid.tile(b)) {
        grid.set(a, Some(Tile::new(ta.id, tb.kind)));
        grid.set(b, Some(Tile::new(tb.id, ta.kind)));
    }
}
