//! Core match-3 engine - pure, deterministic, and testable
//!
//! This crate contains every game rule of the tile-matching engine: match
//! detection, swap validation, cascade resolution, scoring, hints, shuffles,
//! and the session layer that strings them together. It has **zero
//! dependencies** on rendering, networking, or I/O, making it:
//!
//! - **Deterministic**: identical seeds and call sequences replay identical
//!   games, down to every spawned tile
//! - **Testable**: every rule is a pure function over value-semantic grids
//! - **Portable**: runs the same headless, in a terminal, or behind a web UI
//! - **Clock-free**: timing-sensitive rules (the combo window) take explicit
//!   `now_ms` arguments instead of reading a clock
//!
//! # Module Structure
//!
//! - [`grid`]: rectangular board of identified tiles, plus the match-free
//!   initial fill
//! - [`matcher`]: maximal-run detection and the stable-grid entry guard
//! - [`cascade`]: swap validation and the clear / drop / refill loop
//! - [`scoring`]: per-tile values, run bonuses, and combo scaling
//! - [`hint`]: row-major scan for the first productive swap
//! - [`shuffle`]: multiset-preserving rearrangement with a repair loop
//! - [`session`]: one player's grid, score, spawner, and combo window
//! - [`config`]: every balance constant, validated once per session
//! - [`rng`]: seeded LCG and the tile spawner built on it
//! - [`snapshot`]: flat serde mirrors for process-boundary callers
//! - [`error`]: the failure taxonomy (rejections are values, not errors)
//!
//! # Game Rules
//!
//! - **Runs**: three or more equal-kind tiles in a straight horizontal or
//!   vertical line; a tile's run length is the longest single direction,
//!   never the sum across directions
//! - **Swaps**: edge-adjacent cells only; a swap that creates no run is
//!   rejected and the board does not change
//! - **Cascades**: cleared cells pull the tiles above them down, columns
//!   refill from the top, and new runs resolve automatically with a combo
//!   bonus per extra step
//! - **Scoring**: 10 per tile, +5 for a run of exactly 4, +10 for 5 or more,
//!   all scaled by `1 + 0.5 x combo` and floored per tile
//! - **Combos**: chains started within 3 seconds of each other stack the
//!   session combo level; the window is measured start to start
//! - **Hints & shuffles**: the engine finds the first available move, and can
//!   rearrange a moveless board without changing its tile multiset
//!
//! # Example
//!
//! ```
//! use tile_match_core::config::EngineConfig;
//! use tile_match_core::session::GameSession;
//!
//! // Start a session on the stock 8x8 board
//! let mut session = GameSession::new(EngineConfig::default(), 12345).unwrap();
//!
//! // Play the first move the hint finder sees
//! let hint = session.find_hint().unwrap().expect("fresh boards have moves");
//! session.attempt_swap(hint.a, hint.b, 0).unwrap();
//!
//! // A committed swap always scores at least one full run
//! assert!(session.score() >= 30);
//! ```

pub mod cascade;
pub mod config;
pub mod error;
pub mod grid;
pub mod hint;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod snapshot;

pub use tile_match_types as types;

// Re-export commonly used types for convenience
pub use cascade::{attempt_swap, CascadeOutcome, CascadeStep, SwapOutcome, SwapRejection};
pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use grid::{create_initial, Grid};
pub use hint::{find_hint, HintMove};
pub use matcher::{find_matches, MatchSet, MatchedTile};
pub use rng::{SimpleRng, TileSpawner};
pub use session::{GameSession, ShuffleOutcome};
pub use shuffle::shuffle_grid;
pub use snapshot::{GridSnapshot, SessionSnapshot, StepSnapshot, SwapSnapshot};
