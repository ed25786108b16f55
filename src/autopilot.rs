//! Autopilot (demo/idle mode)
//!
//! Plays the game by keeping the player's flap arc centered on the next
//! unpassed gap. A flap lifts the player by `impulse² / 2g`, so flapping on
//! the way down once the player is half that height below the gap center
//! makes the arc straddle the center. Used by the headless runner and soak
//! tests.

use crate::driver::InputEvent;
use crate::sim::{GameMode, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Extra distance below the gap center before flapping (pixels)
    pub bias: f32,
    /// Start a new session automatically when idle or after game over
    pub auto_start: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            bias: 0.0,
            auto_start: true,
        }
    }
}

impl Autopilot {
    /// Height the player should be at right now
    pub fn target_height(world: &World) -> f32 {
        let player_left = world.player.left();
        world
            .track
            .iter()
            .find(|pair| pair.right_edge() >= player_left)
            .map(|pair| pair.gap_center())
            .unwrap_or_else(|| world.config.mid_height())
    }

    /// Height gained by one flap from a standstill
    pub fn flap_rise(world: &World) -> f32 {
        let config = &world.config;
        config.flap_impulse * config.flap_impulse / (2.0 * config.gravity.max(f32::EPSILON))
    }

    /// Input to apply before the next frame, if any
    pub fn decide(&self, world: &World) -> Option<InputEvent> {
        match world.mode() {
            GameMode::Idle | GameMode::GameOver => self.auto_start.then_some(InputEvent::Start),
            GameMode::Paused => None,
            GameMode::Playing => {
                let player = &world.player;
                let rise = Self::flap_rise(world);
                let below = player.pos.y - Self::target_height(world);
                let falling = player.vy >= 0.0;
                // Far below the gap: keep climbing instead of waiting for the apex
                let catching_up =
                    below > 2.0 * rise && player.vy > -world.config.flap_impulse * 0.5;
                let flap = (falling && below > rise / 2.0 + self.bias) || catching_up;
                flap.then_some(InputEvent::Flap)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::sim::ObstaclePair;

    fn playing_world() -> World {
        let mut world = World::new(WorldConfig::default(), 0);
        world.session.mode = GameMode::Playing;
        world
    }

    #[test]
    fn test_starts_when_idle_or_over() {
        let mut world = World::new(WorldConfig::default(), 0);
        let pilot = Autopilot::default();
        assert_eq!(pilot.decide(&world), Some(InputEvent::Start));
        world.session.mode = GameMode::GameOver;
        assert_eq!(pilot.decide(&world), Some(InputEvent::Start));
        world.session.mode = GameMode::Paused;
        assert_eq!(pilot.decide(&world), None);

        let manual = Autopilot {
            auto_start: false,
            ..Default::default()
        };
        world.session.mode = GameMode::Idle;
        assert_eq!(manual.decide(&world), None);
    }

    #[test]
    fn test_targets_next_unpassed_gap() {
        let mut world = playing_world();
        assert_eq!(Autopilot::target_height(&world), 292.0);
        // Already behind the player
        world
            .track
            .push(ObstaclePair::centered(-10.0, 64.0, 400.0, 150.0, 584.0));
        world
            .track
            .push(ObstaclePair::centered(200.0, 64.0, 200.0, 150.0, 584.0));
        assert_eq!(Autopilot::target_height(&world), 200.0);
    }

    #[test]
    fn test_flaps_on_the_way_down_below_half_a_rise() {
        let mut world = playing_world();
        let pilot = Autopilot::default();
        world
            .track
            .push(ObstaclePair::centered(200.0, 64.0, 200.0, 150.0, 584.0));
        // 320² / 2400
        let rise = Autopilot::flap_rise(&world);
        assert!((rise - 42.666_67).abs() < 1e-3);

        // Falling, 30 px below the center: past half a rise
        world.player.pos.y = 230.0;
        world.player.vy = 50.0;
        assert_eq!(pilot.decide(&world), Some(InputEvent::Flap));

        // Falling, only 15 px below: the arc would overshoot the center
        world.player.pos.y = 215.0;
        assert_eq!(pilot.decide(&world), None);

        // Still rising: wait for the apex
        world.player.pos.y = 230.0;
        world.player.vy = -100.0;
        assert_eq!(pilot.decide(&world), None);

        // Above the target
        world.player.pos.y = 150.0;
        world.player.vy = 200.0;
        assert_eq!(pilot.decide(&world), None);
    }

    #[test]
    fn test_climbs_hard_when_far_below() {
        let mut world = playing_world();
        let pilot = Autopilot::default();
        world
            .track
            .push(ObstaclePair::centered(200.0, 64.0, 200.0, 150.0, 584.0));
        world.player.pos.y = 400.0;
        world.player.vy = -100.0;
        assert_eq!(pilot.decide(&world), Some(InputEvent::Flap));
        world.player.vy = -300.0;
        assert_eq!(pilot.decide(&world), None);
    }

    #[test]
    fn test_arc_stays_inside_the_opening() {
        // Fly level 0 physics against a fixed target and track the extremes
        let mut world = playing_world();
        let pilot = Autopilot::default();
        world
            .track
            .push(ObstaclePair::centered(300.0, 64.0, 250.0, 150.0, 584.0));
        let dt = 1.0 / 60.0;
        let (mut lowest, mut highest) = (f32::MIN, f32::MAX);
        for frame in 0..600 {
            if pilot.decide(&world) == Some(InputEvent::Flap) {
                world.player.flap(world.config.flap_impulse);
            }
            world.player.integrate(dt, world.config.gravity, world.config.max_fall_speed);
            if frame > 120 {
                lowest = lowest.max(world.player.pos.y);
                highest = highest.min(world.player.pos.y);
            }
        }
        // Opening 175..325, player radius 14
        assert!(highest > 175.0 + 14.0, "highest {highest}");
        assert!(lowest < 325.0 - 14.0, "lowest {lowest}");
    }
}
