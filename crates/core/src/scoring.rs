//! Scoring module - per-tile values and combo scaling
//!
//! Scoring rules:
//! - Every matched tile is worth the base value plus a run bonus: the 4-run
//!   bonus for a longest run of exactly 4, the 5-run bonus for 5 or more.
//!   The bonuses replace each other, they never stack.
//! - The combo multiplier `1 + combo_level x M` applies per tile with the
//!   result floored, then per-tile values are summed. Flooring per tile (not
//!   on the sum) is part of the scoring contract.
//! - M is the integer rational `combo_step_num / combo_step_den`, so the
//!   whole pipeline stays in integer arithmetic:
//!   `scaled = value x (den + combo_level x num) / den` in `u64`.

use crate::config::EngineConfig;
use crate::matcher::MatchSet;

/// Value of one matched tile before combo scaling, from its longest run
pub fn tile_value(run_len: u8, config: &EngineConfig) -> u32 {
    let bonus = if run_len >= 5 {
        config.run5_bonus
    } else if run_len == 4 {
        config.run4_bonus
    } else {
        0
    };
    config.base_tile_score.saturating_add(bonus)
}

/// Apply the combo multiplier to a point value, flooring to an integer
///
/// `combo_step_den` must be non-zero; validated configurations guarantee it.
pub fn apply_combo_multiplier(points: u32, combo_level: u32, config: &EngineConfig) -> u32 {
    let num = config.combo_step_num as u64;
    let den = config.combo_step_den as u64;
    let scaled = points as u64 * (den + combo_level as u64 * num) / den;
    scaled.min(u32::MAX as u64) as u32
}

/// Score one cascade step: per-tile values scaled and floored individually, summed
pub fn step_score(matches: &MatchSet, combo_level: u32, config: &EngineConfig) -> u32 {
    matches.iter().fold(0u32, |acc, tile| {
        let value = tile_value(tile.run_len, config);
        acc.saturating_add(apply_combo_multiplier(value, combo_level, config))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::matcher::find_matches;

    #[test]
    fn test_tile_values_by_run_length() {
        let config = EngineConfig::default();
        assert_eq!(tile_value(3, &config), 10);
        assert_eq!(tile_value(4, &config), 15);
        assert_eq!(tile_value(5, &config), 20);
        // Longer runs keep the 5-run bonus
        assert_eq!(tile_value(8, &config), 20);
    }

    #[test]
    fn test_combo_multiplier_floors() {
        let config = EngineConfig::default();
        assert_eq!(apply_combo_multiplier(10, 0, &config), 10);
        assert_eq!(apply_combo_multiplier(10, 1, &config), 15);
        assert_eq!(apply_combo_multiplier(10, 2, &config), 20);
        // 15 x 1.5 = 22.5 floors to 22
        assert_eq!(apply_combo_multiplier(15, 1, &config), 22);
        // 15 x 2.5 = 37.5 floors to 37
        assert_eq!(apply_combo_multiplier(15, 3, &config), 37);
        assert_eq!(apply_combo_multiplier(20, 3, &config), 50);
    }

    #[test]
    fn test_step_score_three_run_at_combo_zero() {
        let grid = Grid::from_kinds(3, 3, &[1, 1, 1, 2, 0, 2, 0, 2, 0]).unwrap();
        let matches = find_matches(&grid);
        let config = EngineConfig::default();
        assert_eq!(step_score(&matches, 0, &config), 30);
    }

    #[test]
    fn test_step_score_five_run_at_combo_zero() {
        let grid = Grid::from_kinds(
            3,
            5,
            &[
                4, 4, 4, 4, 4, //
                0, 1, 2, 0, 1, //
                1, 2, 0, 1, 2,
            ],
        )
        .unwrap();
        let matches = find_matches(&grid);
        let config = EngineConfig::default();
        assert_eq!(step_score(&matches, 0, &config), 100);
    }

    #[test]
    fn test_step_score_floors_per_tile_not_on_sum() {
        // Four tiles worth 15 each at combo 1: per-tile flooring gives
        // 4 x 22 = 88, flooring the scaled sum would give 90
        let grid = Grid::from_kinds(
            3,
            4,
            &[
                1, 1, 1, 1, //
                0, 2, 0, 2, //
                2, 0, 2, 0,
            ],
        )
        .unwrap();
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 4);
        let config = EngineConfig::default();
        assert_eq!(step_score(&matches, 1, &config), 88);
    }

    #[test]
    fn test_step_score_strictly_increases_with_combo() {
        let grid = Grid::from_kinds(3, 3, &[1, 1, 1, 2, 0, 2, 0, 2, 0]).unwrap();
        let matches = find_matches(&grid);
        let config = EngineConfig::default();

        let mut prev = step_score(&matches, 0, &config);
        for level in 1..8 {
            let next = step_score(&matches, level, &config);
            assert!(next > prev, "level {} did not raise the score", level);
            prev = next;
        }
    }

    #[test]
    fn test_custom_balance_constants() {
        let config = EngineConfig {
            base_tile_score: 7,
            run4_bonus: 2,
            run5_bonus: 9,
            combo_step_num: 1,
            combo_step_den: 1,
            ..EngineConfig::default()
        };
        // Longest run 4 at combo 2: (7 + 2) x (1 + 2) = 27 per tile
        assert_eq!(tile_value(4, &config), 9);
        assert_eq!(apply_combo_multiplier(tile_value(4, &config), 2, &config), 27);
    }
}
