//! Session module - one player's live game
//!
//! [`GameSession`] owns everything that outlives a single grid operation:
//! the board, the tile spawner, the accumulated score, the shuffle counter,
//! and the combo bookkeeping. The combo counter counts *chains*: a swap
//! committed within `combo_window_ms` of the previous chain's start runs its
//! whole cascade one combo level higher, otherwise the level drops back to
//! zero. Time never comes from a clock; every call that needs it takes an
//! explicit `now_ms`, which keeps sessions replayable and trivially testable.
//!
//! Rejected swaps change nothing, not even the combo window. Shuffles do not
//! reset the combo; the quota (`shuffle_quota`) is advisory and enforcement
//! belongs to the caller.

use tile_match_types::Pos;

use crate::cascade::{self, SwapOutcome};
use crate::config::{ConfigError, EngineConfig};
use crate::error::EngineError;
use crate::grid::{create_initial, Grid};
use crate::hint::{self, HintMove};
use crate::matcher::require_stable;
use crate::rng::{SimpleRng, TileSpawner};
use crate::shuffle;
use crate::snapshot::SessionSnapshot;

/// Result of a session shuffle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome {
    /// The rearranged grid now live in the session
    pub grid: Grid,
    /// Shuffles used so far, including this one
    pub shuffles_used: u32,
}

/// A single player's session: grid, spawner, score, and combo state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    grid: Grid,
    spawner: TileSpawner,
    score: u32,
    combo_level: u32,
    last_chain_start_ms: Option<u64>,
    shuffles_used: u32,
}

impl GameSession {
    /// Start a session with a freshly generated match-free grid
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        let mut spawner = TileSpawner::new(seed);
        let grid = create_initial(&config, &mut spawner)?;
        Ok(Self {
            config,
            grid,
            spawner,
            score: 0,
            combo_level: 0,
            last_chain_start_ms: None,
            shuffles_used: 0,
        })
    }

    /// Adopt a caller-provided grid (restores, fixtures)
    ///
    /// The grid must match the configured shape and be stable. The spawner's
    /// identity counter starts past the highest id on the board so adopted
    /// and spawned tiles never collide.
    pub fn with_grid(config: EngineConfig, grid: Grid, seed: u32) -> Result<Self, EngineError> {
        config.validate()?;
        config.check_shape(grid.rows(), grid.cols())?;
        require_stable(&grid)?;

        let highest = grid
            .cells()
            .iter()
            .flatten()
            .map(|t| t.id.0)
            .max()
            .unwrap_or(0);
        let spawner = TileSpawner::from_state(
            SimpleRng::new(seed).state(),
            highest.saturating_add(1),
        );
        Ok(Self {
            config,
            grid,
            spawner,
            score: 0,
            combo_level: 0,
            last_chain_start_ms: None,
            shuffles_used: 0,
        })
    }

    /// Attempt a swap at time `now_ms` (milliseconds, caller's monotonic clock)
    ///
    /// A committed swap adopts the cascade's final grid, adds its score, and
    /// records the chain start for the combo window. A rejected swap returns
    /// the rejection and touches nothing.
    pub fn attempt_swap(
        &mut self,
        a: Pos,
        b: Pos,
        now_ms: u64,
    ) -> Result<SwapOutcome, EngineError> {
        let combo_start = self.chain_combo(now_ms);
        let outcome =
            cascade::attempt_swap(&self.grid, a, b, combo_start, &mut self.spawner, &self.config)?;

        if let SwapOutcome::Resolved(chain) = &outcome {
            self.grid = chain.grid.clone();
            self.score = self.score.saturating_add(chain.score_delta);
            self.combo_level = combo_start;
            self.last_chain_start_ms = Some(now_ms);
        }
        Ok(outcome)
    }

    /// Combo level a chain starting at `now_ms` would run at
    fn chain_combo(&self, now_ms: u64) -> u32 {
        match self.last_chain_start_ms {
            Some(start) if now_ms.saturating_sub(start) <= self.config.combo_window_ms => {
                self.combo_level.saturating_add(1)
            }
            _ => 0,
        }
    }

    /// Rearrange the current grid and count the use
    ///
    /// Never consults the quota; callers decide when the player is out of
    /// shuffles. Score and combo state are untouched.
    pub fn shuffle(&mut self) -> Result<ShuffleOutcome, EngineError> {
        let shuffled = shuffle::shuffle_grid(&self.grid, &mut self.spawner, &self.config)?;
        self.grid = shuffled;
        self.shuffles_used = self.shuffles_used.saturating_add(1);
        Ok(ShuffleOutcome {
            grid: self.grid.clone(),
            shuffles_used: self.shuffles_used,
        })
    }

    /// First productive swap on the current grid, if any
    pub fn find_hint(&self) -> Result<Option<HintMove>, EngineError> {
        hint::find_hint(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Session combo level in effect for the most recent chain
    pub fn combo_level(&self) -> u32 {
        self.combo_level
    }

    pub fn shuffles_used(&self) -> u32 {
        self.shuffles_used
    }

    /// Start time of the most recent chain, if any
    pub fn last_chain_start_ms(&self) -> Option<u64> {
        self.last_chain_start_ms
    }

    /// Current RNG state, for reproducibility tooling
    pub fn rng_state(&self) -> u32 {
        self.spawner.rng_state()
    }

    /// Next identity the spawner will mint
    pub fn next_tile_id(&self) -> u64 {
        self.spawner.next_id()
    }

    /// Plain serializable view of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::SwapRejection;
    use crate::matcher::find_matches;

    fn fixture() -> Grid {
        // Swapping (0,1) and (1,1) clears the top row for 30 points
        Grid::from_kinds(3, 3, &[1, 2, 1, 2, 1, 0, 0, 2, 0]).unwrap()
    }

    fn config_3x3() -> EngineConfig {
        EngineConfig {
            rows: 3,
            cols: 3,
            ..EngineConfig::default()
        }
    }

    fn stuck_board() -> Grid {
        Grid::from_kinds(
            4,
            4,
            &[
                1, 1, 3, 2, //
                2, 4, 4, 3, //
                2, 5, 4, 1, //
                1, 5, 5, 3,
            ],
        )
        .unwrap()
    }

    fn resolved(outcome: SwapOutcome) -> crate::cascade::CascadeOutcome {
        match outcome {
            SwapOutcome::Resolved(chain) => chain,
            SwapOutcome::Rejected(r) => panic!("swap unexpectedly rejected: {:?}", r),
        }
    }

    #[test]
    fn test_new_session_starts_clean() {
        let session = GameSession::new(EngineConfig::default(), 42).unwrap();

        assert_eq!(session.score(), 0);
        assert_eq!(session.combo_level(), 0);
        assert_eq!(session.shuffles_used(), 0);
        assert_eq!(session.last_chain_start_ms(), None);
        assert!(session.grid().is_fully_occupied());
        assert!(find_matches(session.grid()).is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameSession::new(config, 1),
            Err(ConfigError::DimensionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_seeded_session_plays_a_hinted_move() {
        let mut session = GameSession::new(EngineConfig::default(), 42).unwrap();

        // Pinned by the seed: the first productive swap on this board
        let hint = session.find_hint().unwrap().unwrap();
        assert_eq!(hint.a, Pos::new(1, 0));
        assert_eq!(hint.b, Pos::new(2, 0));

        let chain = resolved(session.attempt_swap(hint.a, hint.b, 0).unwrap());
        assert_eq!(chain.steps.len(), 1);
        assert_eq!(session.score(), 30);
        assert_eq!(session.combo_level(), 0);
        assert_eq!(session.last_chain_start_ms(), Some(0));
        assert!(session.grid().is_fully_occupied());
        assert!(find_matches(session.grid()).is_empty());
    }

    #[test]
    fn test_with_grid_validates_shape_and_stability() {
        let result = GameSession::with_grid(EngineConfig::default(), fixture(), 1);
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::GridShapeMismatch { .. }))
        ));

        let running = Grid::from_kinds(3, 3, &[1, 1, 1, 2, 0, 2, 0, 2, 0]).unwrap();
        let result = GameSession::with_grid(config_3x3(), running, 1);
        assert_eq!(result.err(), Some(EngineError::GridUnstable));

        let mut holed = fixture();
        holed.set(Pos::new(2, 2), None);
        let result = GameSession::with_grid(config_3x3(), holed, 1);
        assert_eq!(result.err(), Some(EngineError::GridNotFull));
    }

    #[test]
    fn test_adopted_ids_are_never_reissued() {
        let session = GameSession::with_grid(config_3x3(), fixture(), 1).unwrap();
        // Fixture ids run 1..=9
        assert_eq!(session.next_tile_id(), 10);
    }

    #[test]
    fn test_combo_window_stacks_and_resets() {
        let mut session = GameSession::with_grid(config_3x3(), fixture(), 1).unwrap();

        // Chain 1 at t=0: combo 0, 3 tiles x 10
        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 0).unwrap());
        assert_eq!(session.score(), 30);
        assert_eq!(session.combo_level(), 0);

        // Chain 2 at t=2000, inside the 3000 ms window: combo 1, 3 x 15
        session.grid = fixture();
        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 2000).unwrap());
        assert_eq!(session.score(), 75);
        assert_eq!(session.combo_level(), 1);

        // Chain 3 at t=6000, 4000 ms after the last chain start: back to combo 0
        session.grid = fixture();
        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 6000).unwrap());
        assert_eq!(session.score(), 105);
        assert_eq!(session.combo_level(), 0);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let mut session = GameSession::with_grid(config_3x3(), fixture(), 1).unwrap();

        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 0).unwrap());

        // Exactly at the window edge still stacks
        session.grid = fixture();
        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 3000).unwrap());
        assert_eq!(session.score(), 75);
        assert_eq!(session.combo_level(), 1);

        // One past the edge resets
        session.grid = fixture();
        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 6001).unwrap());
        assert_eq!(session.score(), 105);
        assert_eq!(session.combo_level(), 0);
    }

    #[test]
    fn test_rejected_swaps_leave_the_window_alone() {
        let mut session = GameSession::with_grid(config_3x3(), fixture(), 1).unwrap();

        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 0).unwrap());
        assert_eq!(session.score(), 30);
        session.grid = fixture();

        let outcome = session
            .attempt_swap(Pos::new(0, 0), Pos::new(0, 2), 1000)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::NotAdjacent));

        let outcome = session
            .attempt_swap(Pos::new(0, 0), Pos::new(0, 1), 1500)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::NoMatch));

        assert_eq!(session.score(), 30);
        assert_eq!(session.combo_level(), 0);
        assert_eq!(session.last_chain_start_ms(), Some(0));
        assert_eq!(session.grid(), &fixture());

        // The window still measures from t=0, so t=2500 stacks
        resolved(session.attempt_swap(Pos::new(0, 1), Pos::new(1, 1), 2500).unwrap());
        assert_eq!(session.score(), 75);
        assert_eq!(session.combo_level(), 1);
    }

    #[test]
    fn test_shuffle_replaces_grid_and_counts_uses() {
        let cfg = EngineConfig {
            rows: 4,
            cols: 4,
            ..EngineConfig::default()
        };
        let mut session = GameSession::with_grid(cfg, stuck_board(), 9).unwrap();
        assert_eq!(session.find_hint().unwrap(), None);

        let before_kinds: Vec<u8> = stuck_board()
            .cells()
            .iter()
            .flatten()
            .map(|t| t.kind.0)
            .collect();

        let outcome = session.shuffle().unwrap();
        assert_eq!(outcome.shuffles_used, 1);
        assert_eq!(session.shuffles_used(), 1);
        assert_eq!(outcome.grid, *session.grid());

        let after_kinds: Vec<u8> = session
            .grid()
            .cells()
            .iter()
            .flatten()
            .map(|t| t.kind.0)
            .collect();
        assert_ne!(after_kinds, before_kinds);
        assert!(find_matches(session.grid()).is_empty());
        assert_eq!(session.grid().kind_counts(8), stuck_board().kind_counts(8));

        // Score and combo state are untouched by shuffles
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo_level(), 0);
        assert_eq!(session.last_chain_start_ms(), None);

        // The quota is advisory; the session keeps counting past it
        for _ in 0..3 {
            session.shuffle().unwrap();
        }
        assert_eq!(session.shuffles_used(), 4);
        assert!(session.shuffles_used() > session.config().shuffle_quota);
    }

    #[test]
    fn test_sessions_replay_identically() {
        let mut one = GameSession::new(EngineConfig::default(), 42).unwrap();
        let mut two = GameSession::new(EngineConfig::default(), 42).unwrap();

        assert_eq!(one.grid(), two.grid());

        let hint = one.find_hint().unwrap().unwrap();
        assert_eq!(two.find_hint().unwrap(), Some(hint));

        let out1 = one.attempt_swap(hint.a, hint.b, 100).unwrap();
        let out2 = two.attempt_swap(hint.a, hint.b, 100).unwrap();
        assert_eq!(out1, out2);

        assert_eq!(one.grid(), two.grid());
        assert_eq!(one.score(), two.score());
        assert_eq!(one.rng_state(), two.rng_state());
        assert_eq!(one.next_tile_id(), two.next_tile_id());
    }
}
