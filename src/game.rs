//! Session state machine
//!
//! `Idle -> Playing <-> Paused`, `Playing -> GameOver -> (reset) -> Idle`.
//!
//! The machine owns the [`World`] and the obstacle generator, and talks to
//! the outside only through the two collaborators handed to [`Game::new`]:
//! a [`BestScoreStore`] and a [`HostBridge`]. Collaborator failures are
//! logged and reported to the host; they never change the simulation.
//! Transitions that make no sense in the current mode are silent no-ops.

use crate::config::{ScoringPolicy, WorldConfig};
use crate::host::{EndReason, HostBridge, LifecycleEvent, SessionResult};
use crate::persistence::{BestScoreStore, load_best, save_best};
use crate::sim::{
    GameMode, ObstacleGenerator, Snapshot, TickOutcome, World, difficulty_tier, tick,
};

/// How a finished session was judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub best: u32,
    /// Whether this session raised the best score
    pub new_best: bool,
    pub result: SessionResult,
    pub reason: EndReason,
    pub difficulty_tier: u8,
}

pub struct Game {
    world: World,
    generator: ObstacleGenerator,
    store: Box<dyn BestScoreStore>,
    host: Box<dyn HostBridge>,
    last_summary: Option<SessionSummary>,
}

impl Game {
    /// Build an idle game; the best score is read from `store` (absent or
    /// malformed values count as zero)
    pub fn new(
        config: WorldConfig,
        seed: u64,
        store: Box<dyn BestScoreStore>,
        host: Box<dyn HostBridge>,
    ) -> Self {
        let best = load_best(store.as_ref());
        Self {
            world: World::new(config, best),
            generator: ObstacleGenerator::new(seed),
            store,
            host,
            last_summary: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &WorldConfig {
        &self.world.config
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.world.mode()
    }

    pub fn score(&self) -> u32 {
        self.world.session.score
    }

    pub fn best(&self) -> u32 {
        self.world.session.best
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Result of the most recent finished session
    pub fn last_summary(&self) -> Option<SessionSummary> {
        self.last_summary
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    /// Begin a session.
    ///
    /// From `GameOver` the session is reset first. The activating flap is
    /// never scored. Returns whether a session started.
    pub fn start(&mut self) -> bool {
        match self.world.mode() {
            GameMode::Idle => {}
            GameMode::GameOver => self.world.reset(),
            GameMode::Playing | GameMode::Paused => return false,
        }

        self.world.session.mode = GameMode::Playing;
        let impulse = self.world.config.flap_impulse;
        self.world.player.flap(impulse);
        log::info!("Session started (best {})", self.world.session.best);
        self.notify(LifecycleEvent::SessionStarted);
        true
    }

    /// Flap while playing; under [`ScoringPolicy::PerFlap`] this also scores
    pub fn flap(&mut self) -> bool {
        if self.world.mode() != GameMode::Playing {
            return false;
        }
        let impulse = self.world.config.flap_impulse;
        self.world.player.flap(impulse);
        if self.world.config.scoring == ScoringPolicy::PerFlap {
            self.world.session.score = self.world.session.score.saturating_add(1);
        }
        true
    }

    /// Flip between `Playing` and `Paused`; reported to the host as a
    /// visibility change
    pub fn toggle_pause(&mut self) -> bool {
        let (next, visible) = match self.world.mode() {
            GameMode::Playing => (GameMode::Paused, false),
            GameMode::Paused => (GameMode::Playing, true),
            GameMode::Idle | GameMode::GameOver => return false,
        };
        self.world.session.mode = next;
        log::info!("{}", if visible { "Resumed" } else { "Paused" });
        self.notify(LifecycleEvent::VisibilityChanged { visible });
        true
    }

    /// Back to `Idle` from any mode; `best` is kept
    pub fn restart(&mut self) {
        self.world.reset();
        log::info!("Session reset");
    }

    /// Page visibility changed. Hiding the page while playing pauses.
    pub fn set_visibility(&mut self, visible: bool) {
        if !visible && self.world.mode() == GameMode::Playing {
            self.world.session.mode = GameMode::Paused;
            log::info!("Auto-paused (hidden)");
        }
        self.notify(LifecycleEvent::VisibilityChanged { visible });
    }

    /// Apply a viewport resize; the running session is kept
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let applied = self.world.config.resize(width, height);
        if applied {
            log::debug!("Viewport resized to {}x{}", width, height);
        } else {
            log::warn!("Ignoring viewport resize to {}x{}", width, height);
        }
        applied
    }

    /// Advance one clamped frame; a collision ends the session
    pub fn advance(&mut self, dt: f32) -> TickOutcome {
        let outcome = tick(&mut self.world, &mut self.generator, dt);
        if let Some(hit) = outcome.collision {
            log::debug!("Collision with {}", hit.as_str());
            self.game_over();
        }
        outcome
    }

    /// End the running session: freeze, update and persist `best`, report
    fn game_over(&mut self) {
        if self.world.mode() != GameMode::Playing {
            return;
        }
        self.world.session.mode = GameMode::GameOver;

        let score = self.world.session.score;
        let new_best = score > self.world.session.best;
        if new_best {
            self.world.session.best = score;
            if let Err(e) = save_best(self.store.as_mut(), score) {
                log::warn!("Failed to save best score: {}", e);
                self.notify(LifecycleEvent::ErrorReported {
                    code: e.code().to_string(),
                    message: e.to_string(),
                });
            }
        }

        let (result, reason) = if score >= self.world.config.success_threshold {
            (SessionResult::Success, EndReason::Completed)
        } else {
            (SessionResult::Fail, EndReason::Collision)
        };
        let summary = SessionSummary {
            score,
            best: self.world.session.best,
            new_best,
            result,
            reason,
            difficulty_tier: difficulty_tier(score),
        };
        log::info!(
            "Game over: score {} (best {}), {:?}, tier {}",
            score,
            summary.best,
            result,
            summary.difficulty_tier
        );
        self.last_summary = Some(summary);
        self.notify(LifecycleEvent::SessionEnded {
            result,
            reason,
            difficulty_tier: summary.difficulty_tier,
        });
    }

    /// Best-effort delivery to the host.
    ///
    /// A failed send is reported once as `ErrorReported`; a failed report is
    /// only logged.
    pub fn notify(&mut self, event: LifecycleEvent) {
        let Err(e) = self.host.send(&event) else {
            return;
        };
        log::warn!("Host did not accept {}: {}", event.name(), e);
        if matches!(event, LifecycleEvent::ErrorReported { .. }) {
            return;
        }
        let report = LifecycleEvent::ErrorReported {
            code: e.code().to_string(),
            message: e.to_string(),
        };
        if let Err(e) = self.host.send(&report) {
            log::warn!("Host error report dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EventLog, RecordingHost};
    use crate::persistence::MemoryStore;
    use crate::sim::ObstaclePair;

    fn game_with(config: WorldConfig, store: MemoryStore) -> (Game, EventLog) {
        let (host, log) = RecordingHost::new();
        (Game::new(config, 7, Box::new(store), Box::new(host)), log)
    }

    fn game() -> (Game, EventLog) {
        game_with(WorldConfig::default(), MemoryStore::new())
    }

    /// Run until the session ends (the player falls without input)
    fn run_to_game_over(game: &mut Game) {
        for _ in 0..2000 {
            game.advance(1.0 / 60.0);
            if game.mode() == GameMode::GameOver {
                return;
            }
        }
        panic!("session never ended");
    }

    #[test]
    fn test_start_from_idle_excludes_initial_flap() {
        for scoring in [ScoringPolicy::PassThrough, ScoringPolicy::PerFlap] {
            let config = WorldConfig {
                scoring,
                ..Default::default()
            };
            let (mut game, log) = game_with(config, MemoryStore::new());
            assert!(game.start());
            assert_eq!(game.mode(), GameMode::Playing);
            assert_eq!(game.score(), 0);
            assert_eq!(game.world().player.vy, -320.0);
            assert_eq!(*log.borrow(), vec![LifecycleEvent::SessionStarted]);
        }
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let (mut game, log) = game();
        assert!(!game.flap());
        assert!(!game.toggle_pause());
        assert_eq!(game.mode(), GameMode::Idle);

        game.start();
        assert!(!game.start());
        run_to_game_over(&mut game);
        assert!(!game.flap());
        assert!(!game.toggle_pause());
        assert_eq!(game.mode(), GameMode::GameOver);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_per_flap_scoring() {
        let config = WorldConfig {
            scoring: ScoringPolicy::PerFlap,
            ..Default::default()
        };
        let (mut game, _) = game_with(config, MemoryStore::new());
        game.start();
        assert!(game.flap());
        assert!(game.flap());
        assert_eq!(game.score(), 2);
        game.toggle_pause();
        assert!(!game.flap());
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_pass_through_ignores_flaps() {
        let (mut game, _) = game();
        game.start();
        game.flap();
        game.flap();
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_pause_freezes_world() {
        let (mut game, log) = game();
        game.start();
        game.advance(1.0 / 60.0);
        assert!(game.toggle_pause());
        let frozen = game.world().clone();
        for _ in 0..30 {
            let outcome = game.advance(1.0 / 60.0);
            assert!(!outcome.advanced);
        }
        assert_eq!(*game.world(), frozen);
        assert!(game.toggle_pause());
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(
            log.borrow()[1..],
            [
                LifecycleEvent::VisibilityChanged { visible: false },
                LifecycleEvent::VisibilityChanged { visible: true },
            ]
        );
    }

    #[test]
    fn test_hidden_page_pauses_only_while_playing() {
        let (mut game, log) = game();
        game.set_visibility(false);
        assert_eq!(game.mode(), GameMode::Idle);
        game.start();
        game.set_visibility(false);
        assert_eq!(game.mode(), GameMode::Paused);
        game.set_visibility(true);
        assert_eq!(game.mode(), GameMode::Paused);
        assert_eq!(
            *log.borrow(),
            vec![
                LifecycleEvent::VisibilityChanged { visible: false },
                LifecycleEvent::SessionStarted,
                LifecycleEvent::VisibilityChanged { visible: false },
                LifecycleEvent::VisibilityChanged { visible: true },
            ]
        );
    }

    #[test]
    fn test_game_over_persists_new_best() {
        let store = MemoryStore::with_raw("2");
        let (mut game, log) = game_with(WorldConfig::default(), store.clone());
        assert_eq!(game.best(), 2);
        game.start();
        game.world.session.score = 12;
        game.game_over();

        assert_eq!(game.mode(), GameMode::GameOver);
        assert_eq!(game.best(), 12);
        assert_eq!(store.raw().as_deref(), Some("12"));
        let summary = game.last_summary().unwrap();
        assert!(summary.new_best);
        assert_eq!(summary.result, SessionResult::Success);
        assert_eq!(
            log.borrow().last(),
            Some(&LifecycleEvent::SessionEnded {
                result: SessionResult::Success,
                reason: EndReason::Completed,
                difficulty_tier: 2,
            })
        );
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let store = MemoryStore::with_raw("40");
        let (mut game, log) = game_with(WorldConfig::default(), store.clone());
        game.start();
        game.world.session.score = 3;
        game.game_over();
        assert_eq!(game.best(), 40);
        assert_eq!(store.raw().as_deref(), Some("40"));
        assert!(matches!(
            log.borrow().last(),
            Some(LifecycleEvent::SessionEnded {
                result: SessionResult::Fail,
                reason: EndReason::Collision,
                difficulty_tier: 1,
            })
        ));
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let store = MemoryStore::new();
        store.fail_writes();
        let (mut game, log) = game_with(WorldConfig::default(), store);
        game.start();
        game.world.session.score = 5;
        game.game_over();
        assert_eq!(game.best(), 5);
        assert_eq!(game.mode(), GameMode::GameOver);
        assert!(log.borrow().iter().any(|e| matches!(
            e,
            LifecycleEvent::ErrorReported { code, .. } if code == "storage_write"
        )));
    }

    #[test]
    fn test_host_failure_never_blocks_simulation() {
        let (host, log) = RecordingHost::new();
        let host = host.rejecting("session_started");
        let mut game = Game::new(
            WorldConfig::default(),
            7,
            Box::new(MemoryStore::new()),
            Box::new(host),
        );
        assert!(game.start());
        assert_eq!(game.mode(), GameMode::Playing);
        assert!(matches!(
            log.borrow().as_slice(),
            [LifecycleEvent::ErrorReported { code, .. }] if code == "host_rejected"
        ));

        let (host, _) = RecordingHost::new();
        let mut game = Game::new(
            WorldConfig::default(),
            7,
            Box::new(MemoryStore::new()),
            Box::new(host.disconnected()),
        );
        game.start();
        run_to_game_over(&mut game);
        assert_eq!(game.mode(), GameMode::GameOver);
    }

    #[test]
    fn test_collision_ends_session() {
        let (mut game, _) = game();
        game.start();
        // Wall directly on the player
        game.world
            .track
            .push(ObstaclePair::centered(70.0, 64.0, 500.0, 150.0, 584.0));
        let outcome = game.advance(1.0 / 60.0);
        assert!(outcome.collision.is_some());
        assert_eq!(game.mode(), GameMode::GameOver);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let (mut game, _) = game();
        game.start();
        run_to_game_over(&mut game);
        assert!(game.start());
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.world().session.elapsed, 0.0);
        assert!(game.world().track.is_empty());
    }

    #[test]
    fn test_restart_returns_to_idle() {
        let (mut game, _) = game();
        game.start();
        game.advance(0.033);
        game.restart();
        assert_eq!(game.mode(), GameMode::Idle);
        assert_eq!(game.world().player.pos.y, 320.0);
    }
}
