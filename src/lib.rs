//! Flap Arcade - a side-scrolling "flap to survive" reflex game
//!
//! Core modules:
//! - `sim`: Simulation core (physics, obstacle generation, collisions, scrolling)
//! - `game`: Session state machine with injected storage/host collaborators
//! - `driver`: Per-frame entry point (clamped delta, input mapping, resize)
//! - `host`: Lifecycle events exchanged with the hosting platform
//! - `persistence`: Best-score storage backends
//! - `config`: Data-driven world tuning
//! - `autopilot`: Demo controller used by the headless runner
//! - `platform`: Browser binding (wasm32 only)

pub mod autopilot;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod host;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::{GenerationConfig, ScoringPolicy, WorldConfig};
pub use driver::{Driver, InputEvent};
pub use error::{ConfigError, HostError, StoreError};
pub use game::Game;
pub use host::{HostBridge, HostRequest, LifecycleEvent};
pub use persistence::{BestScoreStore, MemoryStore};
pub use sim::{GameMode, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame delta (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "flappy.best";

    /// Default viewport (CSS pixels)
    pub const VIEWPORT_WIDTH: f32 = 360.0;
    pub const VIEWPORT_HEIGHT: f32 = 640.0;
    pub const GROUND_HEIGHT: f32 = 56.0;

    /// Player physics (pixels, pixels/s, pixels/s²)
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const GRAVITY: f32 = 1200.0;
    pub const FLAP_IMPULSE: f32 = 320.0;
    pub const MAX_FALL_SPEED: f32 = 520.0;

    /// Tilt is vy / TILT_DIVISOR, clamped to [TILT_MIN, TILT_MAX] radians
    pub const TILT_DIVISOR: f32 = 420.0;
    pub const TILT_MIN: f32 = -0.6;
    pub const TILT_MAX: f32 = 0.9;

    /// Horizontal scroll speed ramp
    pub const SPEED_BASE: f32 = 140.0;
    pub const SPEED_MAX: f32 = 300.0;
    pub const SPEED_ACCEL: f32 = 12.0;

    /// Obstacle geometry
    pub const OBSTACLE_GAP: f32 = 150.0;
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const OBSTACLE_SPACING: f32 = 180.0;
    /// New pairs appear this far beyond the right edge
    pub const SPAWN_OFFSET: f32 = 80.0;
    /// Pairs are evicted once their right edge is left of -EVICT_MARGIN
    pub const EVICT_MARGIN: f32 = 40.0;

    /// Generation constraints
    pub const FIRST_GAP_JITTER: f32 = 100.0;
    pub const MAX_VERTICAL_CHANGE: f32 = 160.0;
    pub const MIN_VERTICAL_CHANGE: f32 = 80.0;
    pub const MIN_CLEARANCE: f32 = 32.0;
    pub const MIN_CLEARANCE_FLOOR: f32 = 20.0;
    pub const MIN_GAP: f32 = 110.0;
    pub const GAP_SHRINK_PER_LEVEL: f32 = 8.0;
    pub const VERTICAL_CHANGE_SHRINK_PER_LEVEL: f32 = 12.0;
    pub const CLEARANCE_SHRINK_PER_LEVEL: f32 = 2.0;
    pub const CENTER_BUFFER: f32 = 100.0;
    pub const CENTER_PULL: f32 = 0.5;
    pub const SAFE_MARGIN: f32 = 60.0;
    pub const EXTRA_BUFFER: f32 = 40.0;
    pub const DIFFICULTY_INTERVAL: u32 = 8;
    pub const MAX_DIFFICULTY_LEVEL: u32 = 6;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10;

    /// Sessions scoring at least this many points end as a success
    pub const SUCCESS_THRESHOLD: u32 = 10;
}

/// Clamp a raw frame delta (seconds) into `[0, MAX_FRAME_DT]`.
///
/// Non-finite deltas (a host clock glitch) collapse to zero.
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, consts::MAX_FRAME_DT)
    } else {
        0.0
    }
}
