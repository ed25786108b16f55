//! Progressive difficulty
//!
//! Score is bucketed into levels; each level tightens the generator's gap,
//! vertical-change and clearance constraints down to fixed floors.

use serde::{Deserialize, Serialize};

use crate::config::{GenerationConfig, WorldConfig};

/// `floor(score / interval)`, capped at the configured max level
pub fn difficulty_level(score: u32, params: &GenerationConfig) -> u32 {
    (score / params.difficulty_interval.max(1)).min(params.max_difficulty_level)
}

/// Generator limits for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Opening height between top and bottom segments
    pub gap: f32,
    /// Max movement of the gap center between successive pairs
    pub max_vertical_change: f32,
    /// Slack above `2 * radius` required in the shared opening of two pairs
    pub min_clearance: f32,
}

impl Constraints {
    /// Constraints for `level`; every value is monotonically non-increasing in level
    pub fn for_level(level: u32, config: &WorldConfig) -> Self {
        let params = &config.generation;
        let level = level.min(params.max_difficulty_level) as f32;

        let gap_floor = params.min_gap.min(config.base_gap);
        let gap = (config.base_gap - level * params.gap_shrink_per_level).max(gap_floor);
        let max_vertical_change = (params.max_vertical_change
            - level * params.vertical_change_shrink_per_level)
            .max(params.min_vertical_change.min(params.max_vertical_change));
        let min_clearance = (params.min_clearance - level * params.clearance_shrink_per_level)
            .max(params.min_clearance_floor.min(params.min_clearance));

        Self {
            gap,
            max_vertical_change,
            min_clearance,
        }
    }

    /// Minimum shared opening two successive pairs must leave for `radius`
    #[inline]
    pub fn required_overlap(&self, radius: f32) -> f32 {
        2.0 * radius + self.min_clearance
    }
}

/// Difficulty tier reported to the host when a session ends
pub fn difficulty_tier(score: u32) -> u8 {
    match score {
        100.. => 5,
        50..=99 => 4,
        20..=49 => 3,
        10..=19 => 2,
        _ => 1,
    }
}
