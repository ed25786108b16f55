//! World tuning and generation constraints
//!
//! Loaded from JSON; every field falls back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How points are awarded while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// +1 the moment a pair's right edge clears the player's left edge
    #[default]
    PassThrough,
    /// +1 for every flap while alive (obstacles are never scored)
    PerFlap,
}

impl ScoringPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::PassThrough => "pass_through",
            ScoringPolicy::PerFlap => "per_flap",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pass_through" | "pass-through" | "pass" => Some(ScoringPolicy::PassThrough),
            "per_flap" | "per-flap" | "flap" => Some(ScoringPolicy::PerFlap),
            _ => None,
        }
    }
}

/// Constraints used by the obstacle generator and the difficulty table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// First pair's gap center lands within ± this of mid-screen
    pub first_gap_jitter: f32,
    /// Level-0 bound on how far successive gap centers may move
    pub max_vertical_change: f32,
    /// Floor for `max_vertical_change` at high levels
    pub min_vertical_change: f32,
    /// Level-0 slack required above `2 * radius` in the shared opening
    pub min_clearance: f32,
    /// Floor for `min_clearance` at high levels
    pub min_clearance_floor: f32,
    /// The gap never shrinks below this
    pub min_gap: f32,
    pub gap_shrink_per_level: f32,
    pub vertical_change_shrink_per_level: f32,
    pub clearance_shrink_per_level: f32,
    /// Previous gap further than this from mid-screen triggers the pull
    pub center_buffer: f32,
    /// Fraction of the distance to mid-screen removed by the pull (0..=1)
    pub center_pull: f32,
    pub safe_margin: f32,
    pub extra_buffer: f32,
    /// Points per difficulty level
    pub difficulty_interval: u32,
    pub max_difficulty_level: u32,
    /// Candidates tried before falling back to the centered pair
    pub max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            first_gap_jitter: FIRST_GAP_JITTER,
            max_vertical_change: MAX_VERTICAL_CHANGE,
            min_vertical_change: MIN_VERTICAL_CHANGE,
            min_clearance: MIN_CLEARANCE,
            min_clearance_floor: MIN_CLEARANCE_FLOOR,
            min_gap: MIN_GAP,
            gap_shrink_per_level: GAP_SHRINK_PER_LEVEL,
            vertical_change_shrink_per_level: VERTICAL_CHANGE_SHRINK_PER_LEVEL,
            clearance_shrink_per_level: CLEARANCE_SHRINK_PER_LEVEL,
            center_buffer: CENTER_BUFFER,
            center_pull: CENTER_PULL,
            safe_margin: SAFE_MARGIN,
            extra_buffer: EXTRA_BUFFER,
            difficulty_interval: DIFFICULTY_INTERVAL,
            max_difficulty_level: MAX_DIFFICULTY_LEVEL,
            max_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Distance kept clear at the top and bottom of the playfield
    #[inline]
    pub fn edge_margin(&self) -> f32 {
        self.safe_margin + self.extra_buffer
    }
}

/// Per-session world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub ground_height: f32,

    // === Player ===
    pub player_x: f32,
    pub player_radius: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub max_fall_speed: f32,

    // === Scrolling ===
    pub speed_base: f32,
    pub speed_max: f32,
    pub speed_accel: f32,

    // === Obstacles ===
    pub base_gap: f32,
    pub obstacle_width: f32,
    pub obstacle_spacing: f32,
    pub spawn_offset: f32,
    pub evict_margin: f32,
    pub generation: GenerationConfig,

    // === Scoring ===
    pub scoring: ScoringPolicy,
    pub success_threshold: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_x: PLAYER_X,
            player_radius: PLAYER_RADIUS,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,

            speed_base: SPEED_BASE,
            speed_max: SPEED_MAX,
            speed_accel: SPEED_ACCEL,

            base_gap: OBSTACLE_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_spacing: OBSTACLE_SPACING,
            spawn_offset: SPAWN_OFFSET,
            evict_margin: EVICT_MARGIN,
            generation: GenerationConfig::default(),

            scoring: ScoringPolicy::PassThrough,
            success_threshold: SUCCESS_THRESHOLD,
        }
    }
}

impl WorldConfig {
    /// Height of the area above the ground where the player can fly
    #[inline]
    pub fn playable_height(&self) -> f32 {
        (self.viewport_height - self.ground_height).max(0.0)
    }

    /// Vertical middle of the playable area
    #[inline]
    pub fn mid_height(&self) -> f32 {
        self.playable_height() / 2.0
    }

    /// x coordinate where freshly generated pairs appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.viewport_width + self.spawn_offset
    }

    /// Upper bound on simultaneously live pairs for this viewport
    pub fn track_capacity(&self) -> usize {
        let span = self.viewport_width + self.spawn_offset + self.evict_margin + self.obstacle_width;
        (span / self.obstacle_spacing.max(1.0)).ceil() as usize + 2
    }

    /// Apply a new viewport size; sizes that would fail [`Self::validate`]
    /// (non-positive, at or under the ground, too short for the gap floor)
    /// leave the config untouched
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let mut resized = self.clone();
        resized.viewport_width = width;
        resized.viewport_height = height;
        if let Err(err) = resized.validate() {
            log::debug!("Rejected viewport {}x{}: {}", width, height, err);
            return false;
        }
        *self = resized;
        true
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_radius", self.player_radius),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_spacing", self.obstacle_spacing),
            ("base_gap", self.base_gap),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        if self.ground_height < 0.0 || self.ground_height >= self.viewport_height {
            return Err(ConfigError::Invalid {
                field: "ground_height",
                reason: format!(
                    "must be in [0, viewport_height), got {}",
                    self.ground_height
                ),
            });
        }
        if self.speed_base > self.speed_max {
            return Err(ConfigError::Invalid {
                field: "speed_base",
                reason: format!(
                    "base speed {} exceeds max speed {}",
                    self.speed_base, self.speed_max
                ),
            });
        }
        if self.generation.min_gap > self.playable_height() {
            return Err(ConfigError::Invalid {
                field: "generation.min_gap",
                reason: format!(
                    "gap floor {} exceeds playable height {}",
                    self.generation.min_gap,
                    self.playable_height()
                ),
            });
        }
        if self.generation.difficulty_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "generation.difficulty_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.generation.center_pull) {
            return Err(ConfigError::Invalid {
                field: "generation.center_pull",
                reason: format!("must be in [0, 1], got {}", self.generation.center_pull),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("World config saved to {}", path.display());
        Ok(())
    }
}
