//! Session state and the world aggregate
//!
//! Everything a renderer needs to draw a frame lives in [`World`]; the
//! [`Snapshot`] is the read-only view handed out after each tick.

use serde::{Deserialize, Serialize};

use super::difficulty::difficulty_level;
use super::generator::SpawnContext;
use super::obstacle::{ObstaclePair, ObstacleTrack};
use super::player::Player;
use super::scroller::Scroller;
use crate::config::WorldConfig;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Waiting for the first input
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Frozen mid-session
    Paused,
    /// Run ended by a collision
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Idle => "idle",
            GameMode::Playing => "playing",
            GameMode::Paused => "paused",
            GameMode::GameOver => "game_over",
        }
    }
}

/// Per-session counters plus the durable best score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Session {
    pub mode: GameMode,
    /// Seconds of active play this session
    pub elapsed: f32,
    pub score: u32,
    /// Highest score seen across sessions; never decreases
    pub best: u32,
}

/// Player, obstacles and scroll speed for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub config: WorldConfig,
    pub session: Session,
    pub player: Player,
    pub track: ObstacleTrack,
    pub scroller: Scroller,
}

impl World {
    /// Fresh world in `Idle` with the given best score
    pub fn new(config: WorldConfig, best: u32) -> Self {
        let player = spawn_player(&config);
        let track = ObstacleTrack::with_capacity(config.track_capacity());
        let scroller = Scroller::new(&config);
        Self {
            session: Session {
                best,
                ..Default::default()
            },
            config,
            player,
            track,
            scroller,
        }
    }

    /// Reinitialize session and player; keeps `best` and the config
    pub fn reset(&mut self) {
        self.session = Session {
            best: self.session.best,
            ..Default::default()
        };
        self.player = spawn_player(&self.config);
        self.track.clear();
        self.scroller.reset(&self.config);
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.session.mode
    }

    /// Current difficulty level derived from the score
    pub fn difficulty_level(&self) -> u32 {
        difficulty_level(self.session.score, &self.config.generation)
    }

    /// Inputs for the next generated pair
    pub fn spawn_context(&self) -> SpawnContext {
        SpawnContext {
            x: self.config.spawn_x(),
            player_radius: self.player.radius,
            difficulty_level: self.difficulty_level(),
            viewport_height: self.config.viewport_height,
            ground_height: self.config.ground_height,
        }
    }

    /// Read-only view for renderers and hosts
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.session.mode,
            score: self.session.score,
            best: self.session.best,
            elapsed: self.session.elapsed,
            speed: self.scroller.speed,
            viewport: (self.config.viewport_width, self.config.viewport_height),
            ground_height: self.config.ground_height,
            player: PlayerView {
                x: self.player.pos.x,
                y: self.player.pos.y,
                radius: self.player.radius,
                angle: self.player.tilt,
            },
            obstacles: self.track.iter().map(ObstacleView::from).collect(),
        }
    }
}

fn spawn_player(config: &WorldConfig) -> Player {
    Player::new(config.player_x, config.viewport_height / 2.0, config.player_radius)
}

/// Player fields a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
}

/// Obstacle fields a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap: f32,
    pub top_height: f32,
    pub bottom_y: f32,
    pub bottom_height: f32,
    pub passed: bool,
}

impl From<&ObstaclePair> for ObstacleView {
    fn from(pair: &ObstaclePair) -> Self {
        Self {
            x: pair.x,
            width: pair.w,
            gap: pair.gap,
            top_height: pair.top.h,
            bottom_y: pair.bottom.y,
            bottom_height: pair.bottom.h,
            passed: pair.top.passed,
        }
    }
}

/// Renderable state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub score: u32,
    pub best: u32,
    pub elapsed: f32,
    pub speed: f32,
    pub viewport: (f32, f32),
    pub ground_height: f32,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}
