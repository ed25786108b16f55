//! Simulation core
//!
//! All gameplay logic lives here. This module must stay display-agnostic:
//! - Time advances only through the delta passed to `tick`
//! - Seeded RNG only
//! - Obstacles kept in spawn order (left to right)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod generator;
pub mod obstacle;
pub mod player;
pub mod rng;
pub mod scroller;
pub mod state;
pub mod tick;

pub use collision::{Collision, circle_rect_overlap, collides, find_collision};
pub use difficulty::{Constraints, difficulty_level, difficulty_tier};
pub use generator::{Generated, ObstacleGenerator, Placement, SpawnContext, is_traversable};
pub use obstacle::{BottomSegment, ObstaclePair, ObstacleTrack, Rect, TopSegment};
pub use player::Player;
pub use rng::SimRng;
pub use scroller::{ScrollReport, Scroller};
pub use state::{GameMode, ObstacleView, PlayerView, Session, Snapshot, World};
pub use tick::{TickOutcome, award_pass_through, tick};
