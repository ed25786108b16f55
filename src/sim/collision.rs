//! Collision detection between the player circle and the world
//!
//! Two checks: the circle against the ceiling/ground band, and the circle
//! against every obstacle segment using the nearest-point test.

use glam::Vec2;

use super::obstacle::{ObstacleTrack, Rect};
use super::player::Player;

/// What the player hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ceiling,
    Ground,
    /// Top segment of a pair
    TopSegment,
    /// Bottom segment of a pair
    BottomSegment,
}

impl Collision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collision::Ceiling => "ceiling",
            Collision::Ground => "ground",
            Collision::TopSegment => "top segment",
            Collision::BottomSegment => "bottom segment",
        }
    }
}

/// Circle vs axis-aligned rectangle: clamp the center into the rectangle and
/// compare the squared distance to the squared radius (touching counts).
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.clamp_point(center);
    center.distance_squared(nearest) <= radius * radius
}

/// Check the player against the ceiling (y = 0) and the ground line
pub fn boundary_collision(player: &Player, viewport_height: f32, ground_height: f32) -> Option<Collision> {
    if player.bottom() >= viewport_height - ground_height {
        Some(Collision::Ground)
    } else if player.top() <= 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// First collision found, boundaries before obstacles
pub fn find_collision(
    player: &Player,
    track: &ObstacleTrack,
    viewport_height: f32,
    ground_height: f32,
) -> Option<Collision> {
    if let Some(hit) = boundary_collision(player, viewport_height, ground_height) {
        return Some(hit);
    }
    for pair in track.iter() {
        if circle_rect_overlap(player.pos, player.radius, &pair.top_rect()) {
            return Some(Collision::TopSegment);
        }
        if circle_rect_overlap(player.pos, player.radius, &pair.bottom_rect()) {
            return Some(Collision::BottomSegment);
        }
    }
    None
}

/// Does the player touch a boundary or any live segment?
#[inline]
pub fn collides(player: &Player, track: &ObstacleTrack, viewport_height: f32, ground_height: f32) -> bool {
    find_collision(player, track, viewport_height, ground_height).is_some()
}
