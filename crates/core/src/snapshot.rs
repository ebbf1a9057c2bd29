//! Snapshot module - plain serializable views of engine state
//!
//! Engine types carry no serde derives; callers that ship state across a
//! process boundary convert into these mirrors instead. Everything is flat
//! integers and strings, one-way `From` conversions out of the engine, so
//! the wire shape stays stable however the engine types evolve.

use serde::{Deserialize, Serialize};
use tile_match_types::Tile;

use crate::cascade::{CascadeStep, SpawnedTile, SwapOutcome, TileMove};
use crate::grid::Grid;
use crate::matcher::MatchedTile;
use crate::session::GameSession;

/// One tile: identity and palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: u64,
    pub kind: u8,
}

/// A whole board, row-major, `null` for empty cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: u8,
    pub cols: u8,
    pub cells: Vec<Option<TileSnapshot>>,
}

/// A matched tile removed during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedTileSnapshot {
    pub id: u64,
    pub row: u8,
    pub col: u8,
    pub run_len: u8,
}

/// A surviving tile displaced by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMoveSnapshot {
    pub id: u64,
    pub col: u8,
    pub from_row: u8,
    pub to_row: u8,
}

/// A tile spawned into the refill zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTileSnapshot {
    pub id: u64,
    pub kind: u8,
    pub row: u8,
    pub col: u8,
}

/// One cascade step, ready for animation hand-off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub combo_level: u32,
    pub cleared: Vec<ClearedTileSnapshot>,
    pub moves: Vec<TileMoveSnapshot>,
    pub spawned: Vec<SpawnedTileSnapshot>,
    pub score_delta: u32,
    pub grid_after: GridSnapshot,
}

/// Summary of a swap attempt
///
/// `rejection` holds a stable lower-snake identifier (`out_of_bounds`,
/// `not_adjacent`, `no_match`) when the swap was refused; committed swaps
/// carry the step list and the final grid instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSnapshot {
    pub committed: bool,
    pub rejection: Option<String>,
    pub steps: Vec<StepSnapshot>,
    pub score_delta: u32,
    pub combo_level: u32,
    pub grid: Option<GridSnapshot>,
}

/// A whole session, sufficient to reproduce or display it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: GridSnapshot,
    pub score: u32,
    pub combo_level: u32,
    pub shuffles_used: u32,
    pub last_chain_start_ms: Option<u64>,
    pub rng_state: u32,
    pub next_tile_id: u64,
}

impl From<Tile> for TileSnapshot {
    fn from(tile: Tile) -> Self {
        Self {
            id: tile.id.0,
            kind: tile.kind.0,
        }
    }
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: grid
                .cells()
                .iter()
                .map(|cell| cell.map(TileSnapshot::from))
                .collect(),
        }
    }
}

impl From<&MatchedTile> for ClearedTileSnapshot {
    fn from(tile: &MatchedTile) -> Self {
        Self {
            id: tile.id.0,
            row: tile.pos.row,
            col: tile.pos.col,
            run_len: tile.run_len,
        }
    }
}

impl From<&TileMove> for TileMoveSnapshot {
    fn from(mv: &TileMove) -> Self {
        Self {
            id: mv.id.0,
            col: mv.col,
            from_row: mv.from_row,
            to_row: mv.to_row,
        }
    }
}

impl From<&SpawnedTile> for SpawnedTileSnapshot {
    fn from(spawn: &SpawnedTile) -> Self {
        Self {
            id: spawn.tile.id.0,
            kind: spawn.tile.kind.0,
            row: spawn.pos.row,
            col: spawn.pos.col,
        }
    }
}

impl From<&CascadeStep> for StepSnapshot {
    fn from(step: &CascadeStep) -> Self {
        Self {
            combo_level: step.combo_level,
            cleared: step.cleared.iter().map(ClearedTileSnapshot::from).collect(),
            moves: step.moves.iter().map(TileMoveSnapshot::from).collect(),
            spawned: step.spawned.iter().map(SpawnedTileSnapshot::from).collect(),
            score_delta: step.score_delta,
            grid_after: GridSnapshot::from(&step.grid_after),
        }
    }
}

impl From<&SwapOutcome> for SwapSnapshot {
    fn from(outcome: &SwapOutcome) -> Self {
        match outcome {
            SwapOutcome::Rejected(rejection) => Self {
                committed: false,
                rejection: Some(rejection.as_str().to_owned()),
                steps: Vec::new(),
                score_delta: 0,
                combo_level: 0,
                grid: None,
            },
            SwapOutcome::Resolved(chain) => Self {
                committed: true,
                rejection: None,
                steps: chain.steps.iter().map(StepSnapshot::from).collect(),
                score_delta: chain.score_delta,
                combo_level: chain.combo_level_after,
                grid: Some(GridSnapshot::from(&chain.grid)),
            },
        }
    }
}

impl From<&GameSession> for SessionSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            grid: GridSnapshot::from(session.grid()),
            score: session.score(),
            combo_level: session.combo_level(),
            shuffles_used: session.shuffles_used(),
            last_chain_start_ms: session.last_chain_start_ms(),
            rng_state: session.rng_state(),
            next_tile_id: session.next_tile_id(),
        }
    }
}
