//! Tile-match engine (workspace facade crate).
//!
//! This package keeps the public `tile_match::{core,types}` API in one import
//! root while the implementation lives in dedicated crates under `crates/`.

pub use tile_match_core as core;
pub use tile_match_types as types;
