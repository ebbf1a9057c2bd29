//! Shared types module - plain data structures and canonical constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, rendering layers, test harnesses).
//!
//! # Board Dimensions
//!
//! Stock board dimensions for the event build:
//!
//! - **Rows**: 8 (indexed 0-7, top to bottom)
//! - **Cols**: 8 (indexed 0-7, left to right)
//! - **Palette**: 8 tile kinds (indexed 0-7)
//!
//! Dimensions and palette size are configuration; the constants here are the
//! stock values and the validated bounds.
//!
//! # Scoring Constants
//!
//! Per removed tile, before the combo multiplier:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TILE_SCORE` | 10 | Base value of every matched tile |
//! | `RUN4_BONUS` | 5 | Added when the tile's longest run is exactly 4 |
//! | `RUN5_BONUS` | 10 | Added when the tile's longest run is 5+, replaces `RUN4_BONUS` |
//!
//! The combo multiplier is `1 + combo_level × M` with `M` carried as the
//! integer rational `COMBO_STEP_NUMERATOR / COMBO_STEP_DENOMINATOR` (stock
//! 1/2, i.e. +50% per combo level). Per-tile values are scaled and floored
//! individually, then summed.
//!
//! # Timing Constants
//!
//! The engine never reads a clock; callers pass timestamps in. These are the
//! stock values for callers that want the event build's feel:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COMBO_WINDOW_MS` | 3000 | Max gap between chain starts that keeps a combo alive |
//! | `HINT_IDLE_DELAY_MS` | 10000 | Idle time before the stock UI shows a hint |
//!
//! # Safety Caps
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_CASCADE_STEPS` | 32 | Defensive bound on cascade depth per chain |
//! | `SHUFFLE_RETRY_CAP` | 100 | Repair attempts before a shuffle fails loudly |
//! | `SHUFFLE_QUOTA` | 3 | Stock per-session shuffle allowance (caller-enforced) |
//!
//! # Examples
//!
//! ```
//! use tile_match_types::{Pos, Tile, TileId, TileKind, DEFAULT_ROWS, DEFAULT_COLS};
//!
//! // Positions are (row, col) with row 0 at the top
//! let a = Pos::new(2, 3);
//! let b = Pos::new(2, 4);
//! assert!(a.is_adjacent(b));
//! assert_eq!(a.manhattan(Pos::new(4, 1)), 4);
//!
//! // Tiles pair a stable identity with a matchable kind
//! let tile = Tile::new(TileId(7), TileKind(2));
//! assert_eq!(tile.kind.index(), 2);
//!
//! // Board dimensions
//! assert_eq!(DEFAULT_ROWS, 8);
//! assert_eq!(DEFAULT_COLS, 8);
//! ```

/// Stock board height in rows (8)
pub const DEFAULT_ROWS: u8 = 8;

/// Stock board width in columns (8)
pub const DEFAULT_COLS: u8 = 8;

/// Stock palette size (8 tile kinds)
pub const DEFAULT_TILE_KINDS: u8 = 8;

/// Smallest supported board dimension (runs need room on both axes)
pub const MIN_GRID_DIM: u8 = 3;

/// Largest supported board dimension
pub const MAX_GRID_DIM: u8 = 64;

/// Smallest supported palette (below 3 kinds a match-free fill can be unsatisfiable)
pub const MIN_TILE_KINDS: u8 = 3;

/// Largest supported palette
pub const MAX_TILE_KINDS: u8 = 32;

/// Minimum run length that qualifies as a match (3)
pub const MIN_RUN_LEN: u8 = 3;

/// Base score of every matched tile (10)
pub const BASE_TILE_SCORE: u32 = 10;

/// Bonus for a tile whose longest run is exactly 4 (5)
pub const RUN4_BONUS: u32 = 5;

/// Bonus for a tile whose longest run is 5 or more (10, replaces `RUN4_BONUS`)
pub const RUN5_BONUS: u32 = 10;

/// Combo multiplier step numerator (1/2 = +0.5x per combo level)
pub const COMBO_STEP_NUMERATOR: u32 = 1;

/// Combo multiplier step denominator
pub const COMBO_STEP_DENOMINATOR: u32 = 2;

/// Combo window in milliseconds: a chain started within this much of the
/// previous chain's start raises the combo level, otherwise it resets
pub const COMBO_WINDOW_MS: u64 = 3000;

/// Idle delay before the stock UI surfaces a hint (caller policy, 10s)
pub const HINT_IDLE_DELAY_MS: u64 = 10_000;

/// Stock per-session shuffle allowance (enforced by the caller, not the engine)
pub const SHUFFLE_QUOTA: u32 = 3;

/// Repair attempts a shuffle may spend before reporting failure (100)
pub const SHUFFLE_RETRY_CAP: u32 = 100;

/// Defensive bound on cascade steps per chain (32)
pub const MAX_CASCADE_STEPS: u32 = 32;

/// Stock display glyphs for the 8 stock tile kinds
///
/// The engine matches on [`TileKind`] indices only; this palette exists so
/// demo and test callers can render something without inventing art.
pub const DEFAULT_TILE_SYMBOLS: [&str; 8] = ["🍬", "🍭", "🧁", "🍮", "🍩", "🍫", "🥯", "🥞"];


/// A board coordinate: `row` counts down from the top, `col` right from the left
///
/// Both components are `u8`; boards are capped at [`MAX_GRID_DIM`] so every
/// reachable coordinate fits comfortably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Build a position from (row, col)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_match_types::Pos;
    ///
    /// let p = Pos::new(1, 6);
    /// assert_eq!(p.row, 1);
    /// assert_eq!(p.col, 6);
    /// ```
    pub const fn new(row: u8, col: u8) -> Self {
        Pos { row, col }
    }

    /// Manhattan distance to another position
    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) as u32 + self.col.abs_diff(other.col) as u32
    }

    /// True when the two positions share an edge (Manhattan distance exactly 1)
    ///
    /// Diagonal neighbors and the position itself do not qualify.
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }
}

/// A tile kind: an index into the session's palette
///
/// Kind is the only thing matching looks at. Two tiles of the same kind are
/// interchangeable for run detection even though their identities differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKind(pub u8);

impl TileKind {
    /// Palette index as a usize
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Display glyph from the stock palette
    ///
    /// Returns `None` for kinds outside the stock 8; callers with their own
    /// art ignore this entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_match_types::TileKind;
    ///
    /// assert_eq!(TileKind(0).symbol(), Some("🍬"));
    /// assert_eq!(TileKind(40).symbol(), None);
    /// ```
    pub fn symbol(self) -> Option<&'static str> {
        DEFAULT_TILE_SYMBOLS.get(self.index()).copied()
    }
}

/// A tile identity: unique within a grid, stable across gravity
///
/// Minted from a monotonically increasing per-session counter. A fresh id is
/// assigned whenever a tile spawns, including every cell of a shuffled grid.
/// Identities let callers animate "this exact tile fell from row 2 to row 5"
/// instead of treating cells as interchangeable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// A tile on the board: stable identity plus matchable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
}

impl Tile {
    /// Build a tile from its identity and kind
    pub const fn new(id: TileId, kind: TileKind) -> Self {
        Tile { id, kind }
    }
}

/// A cell on the board
///
/// - `None`: empty (only ever observable mid-cascade)
/// - `Some(Tile)`: occupied
///
/// Used by the grid as a flat row-major array of cells.
pub type Cell = Option<Tile>;
