//! Obstacle generation
//!
//! Each new pair's gap center is drawn near the previous one, pulled back
//! toward mid-screen when the course has drifted, and kept away from the
//! ceiling and ground. A candidate is accepted only if a straight horizontal
//! path wide enough for the player threads both its opening and the previous
//! pair's. After `max_attempts` rejected candidates the generator falls back to
//! a centered pair, so generation always terminates.

use super::difficulty::Constraints;
use super::obstacle::ObstaclePair;
use super::rng::SimRng;
use crate::config::WorldConfig;

/// Inputs that vary from spawn to spawn
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    /// x of the new pair's left edge
    pub x: f32,
    pub player_radius: f32,
    pub difficulty_level: u32,
    pub viewport_height: f32,
    pub ground_height: f32,
}

impl SpawnContext {
    #[inline]
    fn playable_height(&self) -> f32 {
        (self.viewport_height - self.ground_height).max(0.0)
    }
}

/// How a generated pair was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A random candidate that passed the traversability check
    Candidate { attempts: u32 },
    /// Every candidate was rejected; the pair is centered on mid-screen
    Fallback,
}

/// A new pair plus how it was found
#[derive(Debug, Clone, Copy)]
pub struct Generated {
    pub pair: ObstaclePair,
    pub placement: Placement,
}

/// Does a straight horizontal path of height `2r + clearance` fit through both openings?
#[inline]
pub fn is_traversable(prev: &ObstaclePair, next: &ObstaclePair, required: f32) -> bool {
    prev.shared_opening(next) >= required
}

/// Produces obstacle pairs; owns the seeded RNG so runs are reproducible
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    rng: SimRng,
}

impl ObstacleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Generate the pair that follows `previous` (or the first pair if `None`).
    ///
    /// Never fails: returns the centered fallback if no candidate qualifies.
    pub fn generate(
        &mut self,
        previous: Option<&ObstaclePair>,
        ctx: &SpawnContext,
        config: &WorldConfig,
    ) -> Generated {
        let constraints = Constraints::for_level(ctx.difficulty_level, config);
        let playable = ctx.playable_height();
        let width = config.obstacle_width;

        let Some(prev) = previous else {
            let center = self.first_center(constraints.gap, playable, config);
            let pair = ObstaclePair::centered(ctx.x, width, center, constraints.gap, playable);
            return Generated {
                pair,
                placement: Placement::Candidate { attempts: 1 },
            };
        };

        let required = constraints.required_overlap(ctx.player_radius);
        let attempts = config.generation.max_attempts.max(1);
        for attempt in 1..=attempts {
            let center = self.next_center(prev.gap_center(), &constraints, playable, config);
            let candidate =
                ObstaclePair::centered(ctx.x, width, center, constraints.gap, playable);
            if is_traversable(prev, &candidate, required) {
                return Generated {
                    pair: candidate,
                    placement: Placement::Candidate { attempts: attempt },
                };
            }
        }

        log::debug!(
            "No traversable candidate after {} attempts (prev center {:.1}, level {}), using centered pair",
            attempts,
            prev.gap_center(),
            ctx.difficulty_level
        );
        Generated {
            pair: ObstaclePair::centered(ctx.x, width, playable / 2.0, constraints.gap, playable),
            placement: Placement::Fallback,
        }
    }

    /// First pair: within ± jitter of mid-screen
    fn first_center(&mut self, gap: f32, playable: f32, config: &WorldConfig) -> f32 {
        let mid = playable / 2.0;
        let center = self.rng.around(mid, config.generation.first_gap_jitter);
        clamp_center(center, gap, playable, config)
    }

    /// Later pairs: near the previous center, pulled home if it drifted
    fn next_center(
        &mut self,
        last_center: f32,
        constraints: &Constraints,
        playable: f32,
        config: &WorldConfig,
    ) -> f32 {
        let params = &config.generation;
        let mid = playable / 2.0;
        let mut center = self.rng.around(last_center, constraints.max_vertical_change);
        if (last_center - mid).abs() > params.center_buffer {
            center += (mid - center) * params.center_pull;
        }
        clamp_center(center, constraints.gap, playable, config)
    }
}

/// Keep the opening at least `safe_margin + extra_buffer` from ceiling and ground
fn clamp_center(center: f32, gap: f32, playable: f32, config: &WorldConfig) -> f32 {
    let margin = config.generation.edge_margin();
    let lo = margin + gap / 2.0;
    let hi = playable - margin - gap / 2.0;
    if lo <= hi {
        center.clamp(lo, hi)
    } else {
        // Viewport too short for the margins: the middle is the only safe spot
        playable / 2.0
    }
}
