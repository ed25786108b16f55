//! World scrolling
//!
//! Owns the current horizontal speed. Each active tick it ramps the speed,
//! spawns a pair when the newest one has moved far enough left, shifts every
//! pair left, and evicts pairs that have left the screen.

use serde::{Deserialize, Serialize};

use super::generator::{Generated, ObstacleGenerator, Placement, SpawnContext};
use super::obstacle::ObstacleTrack;
use crate::config::WorldConfig;

/// What happened to the track during one advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollReport {
    pub spawned: bool,
    pub fell_back: bool,
    pub evicted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scroller {
    /// Current speed in pixels/s
    pub speed: f32,
}

impl Scroller {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            speed: config.speed_base,
        }
    }

    /// Back to the base speed (session reset)
    pub fn reset(&mut self, config: &WorldConfig) {
        self.speed = config.speed_base;
    }

    /// `speed = min(speed_max, speed + speed_accel * dt)`
    pub fn ramp(&mut self, dt: f32, config: &WorldConfig) {
        self.speed = (self.speed + config.speed_accel * dt).min(config.speed_max);
    }

    /// Does the track need a new pair on the right?
    pub fn needs_spawn(track: &ObstacleTrack, config: &WorldConfig) -> bool {
        match track.newest() {
            None => true,
            Some(newest) => newest.x < config.viewport_width - config.obstacle_spacing,
        }
    }

    /// Spawn if due, then shift by `speed * dt`, then evict
    pub fn advance(
        &self,
        dt: f32,
        track: &mut ObstacleTrack,
        generator: &mut ObstacleGenerator,
        ctx: &SpawnContext,
        config: &WorldConfig,
    ) -> ScrollReport {
        let mut report = ScrollReport::default();

        if Self::needs_spawn(track, config) {
            let Generated { pair, placement } = generator.generate(track.newest(), ctx, config);
            log::debug!(
                "Spawned pair at x={:.0} gap center {:.1} ({:?})",
                pair.x,
                pair.gap_center(),
                placement
            );
            track.push(pair);
            report.spawned = true;
            report.fell_back = placement == Placement::Fallback;
        }

        track.shift(self.speed * dt);
        report.evicted = track.evict_offscreen(config.evict_margin);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstaclePair;

    fn ctx(config: &WorldConfig) -> SpawnContext {
        SpawnContext {
            x: config.spawn_x(),
            player_radius: config.player_radius,
            difficulty_level: 0,
            viewport_height: config.viewport_height,
            ground_height: config.ground_height,
        }
    }

    #[test]
    fn test_speed_ramp_reaches_expected_value() {
        let config = WorldConfig {
            speed_base: 140.0,
            speed_max: 300.0,
            speed_accel: 12.0,
            ..Default::default()
        };
        let mut scroller = Scroller::new(&config);
        for _ in 0..100 {
            scroller.ramp(1.0 / 60.0, &config);
        }
        assert!((scroller.speed - 160.0).abs() < 2e-3, "speed {}", scroller.speed);
    }

    #[test]
    fn test_speed_ramp_capped() {
        let config = WorldConfig::default();
        let mut scroller = Scroller::new(&config);
        for _ in 0..10_000 {
            scroller.ramp(0.033, &config);
        }
        assert_eq!(scroller.speed, config.speed_max);
        scroller.reset(&config);
        assert_eq!(scroller.speed, config.speed_base);
    }

    #[test]
    fn test_empty_track_spawns_beyond_right_edge() {
        let config = WorldConfig::default();
        let scroller = Scroller::new(&config);
        let mut track = ObstacleTrack::default();
        let mut generator = ObstacleGenerator::new(5);
        let report = scroller.advance(0.0, &mut track, &mut generator, &ctx(&config), &config);
        assert!(report.spawned);
        assert_eq!(track.len(), 1);
        assert_eq!(track.newest().map(|p| p.x), Some(config.viewport_width + 80.0));
    }

    #[test]
    fn test_spawn_waits_for_spacing() {
        let config = WorldConfig::default();
        let scroller = Scroller::new(&config);
        let mut track = ObstacleTrack::default();
        let mut generator = ObstacleGenerator::new(5);
        // Newest at 181: not yet left of 360 - 180
        track.push(ObstaclePair::centered(181.0, 64.0, 292.0, 150.0, 584.0));
        let report = scroller.advance(0.0, &mut track, &mut generator, &ctx(&config), &config);
        assert!(!report.spawned);
        // Newest at 179: spawn
        track.shift(2.0);
        let report = scroller.advance(0.0, &mut track, &mut generator, &ctx(&config), &config);
        assert!(report.spawned);
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn test_shift_and_evict() {
        let config = WorldConfig::default();
        let scroller = Scroller { speed: 100.0 };
        let mut track = ObstacleTrack::default();
        let mut generator = ObstacleGenerator::new(5);
        track.push(ObstaclePair::centered(-100.0, 64.0, 292.0, 150.0, 584.0)); // right edge -36
        track.push(ObstaclePair::centered(300.0, 64.0, 292.0, 150.0, 584.0));
        let report = scroller.advance(0.1, &mut track, &mut generator, &ctx(&config), &config);
        // Both moved 10px left; the first now ends at -46 and is gone
        assert_eq!(report.evicted, 1);
        assert!(!report.spawned);
        assert_eq!(track.len(), 1);
        assert_eq!(track.oldest().map(|p| p.x), Some(290.0));
    }

    #[test]
    fn test_long_run_keeps_track_bounded() {
        let config = WorldConfig::default();
        let mut scroller = Scroller::new(&config);
        let mut track = ObstacleTrack::with_capacity(config.track_capacity());
        let mut generator = ObstacleGenerator::new(77);
        for _ in 0..20_000 {
            scroller.ramp(1.0 / 60.0, &config);
            scroller.advance(1.0 / 60.0, &mut track, &mut generator, &ctx(&config), &config);
            assert!(track.len() <= config.track_capacity());
            let xs: Vec<f32> = track.iter().map(|p| p.x).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
