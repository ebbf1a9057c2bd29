//! Engine configuration - every balance constant in one place
//!
//! All tuning values of the engine live in [`EngineConfig`]: board shape,
//! palette size, scoring constants, the combo window, and the defensive caps.
//! `EngineConfig::default()` is the stock event configuration; sessions
//! validate a config once at start and treat it as immutable afterwards.
//!
//! The struct deserializes from JSON with any subset of fields present,
//! missing ones fall back to the stock values:
//!
//! ```
//! use tile_match_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.rows, 8);
//! assert_eq!(config.base_tile_score, 10);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tile_match_types::{
    BASE_TILE_SCORE, COMBO_STEP_DENOMINATOR, COMBO_STEP_NUMERATOR, COMBO_WINDOW_MS, DEFAULT_COLS,
    DEFAULT_ROWS, DEFAULT_TILE_KINDS, MAX_CASCADE_STEPS, MAX_GRID_DIM, MAX_TILE_KINDS,
    MIN_GRID_DIM, MIN_TILE_KINDS, RUN4_BONUS, RUN5_BONUS, SHUFFLE_QUOTA, SHUFFLE_RETRY_CAP,
};

/// Invalid configuration, reported at session setup
///
/// These are programming or deployment defects, not user input; they are
/// never downgraded to a no-op result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{axis} must be between {min} and {max}, got {got}")]
    DimensionOutOfRange {
        axis: &'static str,
        got: u8,
        min: u8,
        max: u8,
    },

    #[error("palette must hold between {min} and {max} kinds, got {got}")]
    PaletteOutOfRange { got: u8, min: u8, max: u8 },

    #[error("combo step denominator must be non-zero")]
    ZeroComboDenominator,

    #[error("shuffle retry cap must be non-zero")]
    ZeroShuffleRetryCap,

    #[error("cascade step cap must be non-zero")]
    ZeroCascadeStepCap,

    #[error("grid shape {got_rows}x{got_cols} does not match configured {want_rows}x{want_cols}")]
    GridShapeMismatch {
        got_rows: u8,
        got_cols: u8,
        want_rows: u8,
        want_cols: u8,
    },
}

/// Session configuration, immutable after validation
///
/// | field | stock | meaning |
/// |-------|-------|---------|
/// | `rows`, `cols` | 8, 8 | board shape |
/// | `tile_kinds` | 8 | palette size |
/// | `base_tile_score` | 10 | value of every matched tile |
/// | `run4_bonus` | 5 | added for a longest run of exactly 4 |
/// | `run5_bonus` | 10 | added for a longest run of 5+, replaces `run4_bonus` |
/// | `combo_step_num`/`_den` | 1/2 | combo multiplier step as a rational (+0.5x per level) |
/// | `combo_window_ms` | 3000 | max gap between chain starts keeping a combo alive |
/// | `shuffle_quota` | 3 | advisory per-session shuffle allowance (caller-enforced) |
/// | `shuffle_retry_cap` | 100 | repair attempts before a shuffle fails |
/// | `max_cascade_steps` | 32 | defensive bound on cascade depth |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: u8,
    pub cols: u8,
    pub tile_kinds: u8,
    pub base_tile_score: u32,
    pub run4_bonus: u32,
    pub run5_bonus: u32,
    pub combo_step_num: u32,
    pub combo_step_den: u32,
    pub combo_window_ms: u64,
    pub shuffle_quota: u32,
    pub shuffle_retry_cap: u32,
    pub max_cascade_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tile_kinds: DEFAULT_TILE_KINDS,
            base_tile_score: BASE_TILE_SCORE,
            run4_bonus: RUN4_BONUS,
            run5_bonus: RUN5_BONUS,
            combo_step_num: COMBO_STEP_NUMERATOR,
            combo_step_den: COMBO_STEP_DENOMINATOR,
            combo_window_ms: COMBO_WINDOW_MS,
            shuffle_quota: SHUFFLE_QUOTA,
            shuffle_retry_cap: SHUFFLE_RETRY_CAP,
            max_cascade_steps: MAX_CASCADE_STEPS,
        }
    }
}

impl EngineConfig {
    /// Check every invariant the algorithms rely on
    ///
    /// Dimensions and palette must stay inside the supported bounds; a
    /// palette under 3 kinds can make the match-free initial fill
    /// unsatisfiable, and the caps must leave the loops room to run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < MIN_GRID_DIM || self.rows > MAX_GRID_DIM {
            return Err(ConfigError::DimensionOutOfRange {
                axis: "rows",
                got: self.rows,
                min: MIN_GRID_DIM,
                max: MAX_GRID_DIM,
            });
        }
        if self.cols < MIN_GRID_DIM || self.cols > MAX_GRID_DIM {
            return Err(ConfigError::DimensionOutOfRange {
                axis: "cols",
                got: self.cols,
                min: MIN_GRID_DIM,
                max: MAX_GRID_DIM,
            });
        }
        if self.tile_kinds < MIN_TILE_KINDS || self.tile_kinds > MAX_TILE_KINDS {
            return Err(ConfigError::PaletteOutOfRange {
                got: self.tile_kinds,
                min: MIN_TILE_KINDS,
                max: MAX_TILE_KINDS,
            });
        }
        if self.combo_step_den == 0 {
            return Err(ConfigError::ZeroComboDenominator);
        }
        if self.shuffle_retry_cap == 0 {
            return Err(ConfigError::ZeroShuffleRetryCap);
        }
        if self.max_cascade_steps == 0 {
            return Err(ConfigError::ZeroCascadeStepCap);
        }
        Ok(())
    }

    /// Check a grid shape against the configured dimensions
    ///
    /// Operations that pair a grid with a configuration (cascade resolution,
    /// shuffling, adopting a grid into a session) refuse mismatched shapes up
    /// front instead of refilling columns that do not exist.
    pub fn check_shape(&self, got_rows: u8, got_cols: u8) -> Result<(), ConfigError> {
        if got_rows != self.rows || got_cols != self.cols {
            return Err(ConfigError::GridShapeMismatch {
                got_rows,
                got_cols,
                want_rows: self.rows,
                want_cols: self.cols,
            });
        }
        Ok(())
    }

    /// Number of cells on a board of this shape
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_tiny_board() {
        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DimensionOutOfRange {
                axis: "rows",
                got: 2,
                min: MIN_GRID_DIM,
                max: MAX_GRID_DIM,
            })
        );
    }

    #[test]
    fn rejects_oversized_board() {
        let config = EngineConfig {
            cols: 65,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DimensionOutOfRange { axis: "cols", .. })
        ));
    }

    #[test]
    fn rejects_degenerate_palette() {
        // With 2 kinds a cell can be banned by both its left pair and its
        // above pair, leaving nothing to draw
        let config = EngineConfig {
            tile_kinds: 2,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaletteOutOfRange { got: 2, .. })
        ));
    }

    #[test]
    fn rejects_zero_caps() {
        let config = EngineConfig {
            combo_step_den: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroComboDenominator));

        let config = EngineConfig {
            shuffle_retry_cap: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroShuffleRetryCap));

        let config = EngineConfig {
            max_cascade_steps: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCascadeStepCap));
    }

    #[test]
    fn cell_count_matches_shape() {
        let config = EngineConfig {
            rows: 5,
            cols: 9,
            ..EngineConfig::default()
        };
        assert_eq!(config.cell_count(), 45);
    }
}
