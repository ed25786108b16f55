//! One simulation step
//!
//! Advances the world only while `Playing`: speed ramp, player physics,
//! scrolling/spawning, pass-through scoring, then the collision query.
//! Mode transitions are left to the caller.

use super::collision::{Collision, find_collision};
use super::generator::ObstacleGenerator;
use super::scroller::ScrollReport;
use super::state::{GameMode, World};
use crate::config::ScoringPolicy;

/// What one tick produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the world moved at all
    pub advanced: bool,
    /// Points awarded by pass-through scoring this tick
    pub scored: u32,
    pub scroll: ScrollReport,
    /// Set when the player touched something; the session should end
    pub collision: Option<Collision>,
}

/// Advance the world by `dt` seconds (already clamped by the caller)
pub fn tick(world: &mut World, generator: &mut ObstacleGenerator, dt: f32) -> TickOutcome {
    if world.session.mode != GameMode::Playing {
        return TickOutcome::default();
    }

    world.scroller.ramp(dt, &world.config);
    world.session.elapsed += dt;

    let config = &world.config;
    world
        .player
        .integrate(dt, config.gravity, config.max_fall_speed);

    let ctx = world.spawn_context();
    let scroll = world
        .scroller
        .advance(dt, &mut world.track, generator, &ctx, &world.config);

    let scored = match world.config.scoring {
        ScoringPolicy::PassThrough => award_pass_through(world),
        ScoringPolicy::PerFlap => 0,
    };

    let collision = find_collision(
        &world.player,
        &world.track,
        world.config.viewport_height,
        world.config.ground_height,
    );

    TickOutcome {
        advanced: true,
        scored,
        scroll,
        collision,
    }
}

/// Score every pair whose right edge is now behind the player's left edge.
///
/// The top segment's `passed` flag ensures each pair scores at most once.
pub fn award_pass_through(world: &mut World) -> u32 {
    let player_left = world.player.left();
    let mut scored = 0;
    for pair in world.track.iter_mut() {
        if !pair.top.passed && pair.right_edge() < player_left {
            pair.top.passed = true;
            scored += 1;
        }
    }
    world.session.score = world.session.score.saturating_add(scored);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::sim::obstacle::ObstaclePair;

    fn playing_world() -> World {
        let mut world = World::new(WorldConfig::default(), 0);
        world.session.mode = GameMode::Playing;
        world
    }

    #[test]
    fn test_tick_only_advances_while_playing() {
        let mut generator = ObstacleGenerator::new(1);
        for mode in [GameMode::Idle, GameMode::Paused, GameMode::GameOver] {
            let mut world = World::new(WorldConfig::default(), 0);
            world.session.mode = mode;
            let before = world.clone();
            let outcome = tick(&mut world, &mut generator, 1.0 / 60.0);
            assert!(!outcome.advanced);
            assert_eq!(world, before);
        }
    }

    #[test]
    fn test_tick_moves_player_and_spawns() {
        let mut world = playing_world();
        let mut generator = ObstacleGenerator::new(1);
        let outcome = tick(&mut world, &mut generator, 1.0 / 60.0);
        assert!(outcome.advanced);
        assert!(outcome.scroll.spawned);
        assert_eq!(world.track.len(), 1);
        assert!(world.player.vy > 0.0);
        assert!(world.player.pos.y > 320.0);
        assert!(world.scroller.speed > 140.0);
        assert!(world.session.elapsed > 0.0);
        assert_eq!(outcome.collision, None);
    }

    #[test]
    fn test_pass_through_scores_once() {
        let mut world = playing_world();
        // Pair at x = -10, w = 64: right edge 54 is behind 80 - 14 = 66
        world.track.push(ObstaclePair::centered(-10.0, 64.0, 320.0, 150.0, 584.0));
        assert_eq!(award_pass_through(&mut world), 1);
        assert_eq!(world.session.score, 1);
        assert!(world.track.oldest().is_some_and(|p| p.top.passed));
        assert_eq!(award_pass_through(&mut world), 0);
        assert_eq!(world.session.score, 1);
    }

    #[test]
    fn test_pass_through_needs_edge_fully_behind() {
        let mut world = playing_world();
        // Right edge 66 is not strictly behind the player's left edge (66)
        world.track.push(ObstaclePair::centered(2.0, 64.0, 320.0, 150.0, 584.0));
        assert_eq!(award_pass_through(&mut world), 0);
        assert!(world.track.oldest().is_some_and(|p| !p.top.passed));
    }

    #[test]
    fn test_per_flap_policy_ignores_geometry() {
        let mut world = playing_world();
        world.config.scoring = ScoringPolicy::PerFlap;
        world.track.push(ObstaclePair::centered(-10.0, 64.0, 320.0, 150.0, 584.0));
        world.track.push(ObstaclePair::centered(400.0, 64.0, 320.0, 150.0, 584.0));
        let mut generator = ObstacleGenerator::new(1);
        let outcome = tick(&mut world, &mut generator, 1.0 / 60.0);
        assert_eq!(outcome.scored, 0);
        assert_eq!(world.session.score, 0);
    }

    #[test]
    fn test_falling_player_hits_ground() {
        let mut world = playing_world();
        let mut generator = ObstacleGenerator::new(1);
        let mut hit = None;
        for _ in 0..600 {
            let outcome = tick(&mut world, &mut generator, 1.0 / 60.0);
            if outcome.collision.is_some() {
                hit = outcome.collision;
                break;
            }
        }
        // Falls from 320 straight through the first opening or into a segment
        assert!(matches!(
            hit,
            Some(Collision::Ground) | Some(Collision::BottomSegment)
        ));
    }
}
