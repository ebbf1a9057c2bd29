//! Engine failure taxonomy
//!
//! Only defects surface as errors. Expected user-driven outcomes (a swap that
//! does not match, coordinates off the board) are values in
//! [`SwapOutcome`](crate::cascade::SwapOutcome), never `Err`. Everything in
//! [`EngineError`] indicates a logic or configuration bug: deterministic,
//! not retryable, and worth failing loudly over.

use thiserror::Error;

use crate::config::ConfigError;

/// Internal invariant violations and configuration defects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The configuration handed to a pure operation fails validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A cascade chain ran past the configured step cap without stabilizing
    #[error("cascade did not stabilize within {max} steps")]
    CascadeOverrun { max: u32 },

    /// The shuffle repair loop exhausted its attempts with runs remaining
    ///
    /// Implies a pathological palette/shape pairing, e.g. too few kinds for
    /// the cell count.
    #[error("shuffle could not reach a run-free grid after {attempts} attempts")]
    ShuffleRetriesExhausted { attempts: u32 },

    /// An operation that requires a stable grid found empty cells
    #[error("grid has empty cells where a stable grid was required")]
    GridNotFull,

    /// An operation that requires a stable grid found a pre-existing run
    #[error("grid already contains a run where a stable grid was required")]
    GridUnstable,
}
