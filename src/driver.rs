//! Per-frame entry point
//!
//! The host calls [`Driver::frame`] once per display refresh with the raw
//! elapsed time; the driver clamps it, advances the game and hands back the
//! snapshot to draw. Discrete inputs, resizes, visibility changes and host
//! requests are routed to the state machine in between frames.

use crate::clamp_frame_dt;
use crate::config::WorldConfig;
use crate::game::Game;
use crate::host::{HostBridge, HostRequest, LifecycleEvent};
use crate::persistence::BestScoreStore;
use crate::sim::{GameMode, Snapshot, TickOutcome};

/// Discrete player/host inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Flap,
    TogglePause,
    Start,
    Restart,
    /// Tap/click/space: start, resume or flap depending on the mode
    Primary,
}

impl InputEvent {
    /// Parse the names a browser host sends (`flap`, `start`, ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "flap" => Some(InputEvent::Flap),
            "toggle_pause" | "pause" => Some(InputEvent::TogglePause),
            "start" => Some(InputEvent::Start),
            "restart" => Some(InputEvent::Restart),
            "primary" => Some(InputEvent::Primary),
            _ => None,
        }
    }
}

pub struct Driver {
    game: Game,
    frames: u64,
    last_outcome: TickOutcome,
}

impl Driver {
    /// Build the game and announce it to the host
    pub fn new(
        config: WorldConfig,
        seed: u64,
        store: Box<dyn BestScoreStore>,
        host: Box<dyn HostBridge>,
    ) -> Self {
        let mut game = Game::new(config, seed, store, host);
        log::info!("Loaded (seed {}, best {})", seed, game.best());
        game.notify(LifecycleEvent::SessionLoaded);
        Self {
            game,
            frames: 0,
            last_outcome: TickOutcome::default(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn mode(&self) -> GameMode {
        self.game.mode()
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// What the most recent frame did
    pub fn last_outcome(&self) -> TickOutcome {
        self.last_outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Advance by `raw_dt` seconds, clamped to `[0, MAX_FRAME_DT]`
    pub fn frame(&mut self, raw_dt: f32) -> Snapshot {
        let dt = clamp_frame_dt(raw_dt);
        self.last_outcome = self.game.advance(dt);
        self.frames += 1;
        self.game.snapshot()
    }

    /// Apply one input; returns whether it changed anything
    pub fn handle(&mut self, input: InputEvent) -> bool {
        match input {
            InputEvent::Flap => self.game.flap(),
            InputEvent::TogglePause => self.game.toggle_pause(),
            InputEvent::Start => self.game.start(),
            InputEvent::Restart => {
                self.game.restart();
                true
            }
            InputEvent::Primary => match self.game.mode() {
                GameMode::Idle | GameMode::GameOver => self.game.start(),
                GameMode::Paused => self.game.toggle_pause(),
                GameMode::Playing => self.game.flap(),
            },
        }
    }

    /// New viewport size; sizes with no room to play are ignored
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.game.resize(width, height)
    }

    pub fn visibility_changed(&mut self, visible: bool) {
        self.game.set_visibility(visible);
    }

    /// Act on a request from the host platform
    pub fn host_request(&mut self, request: &HostRequest) {
        log::info!("Host request: {:?}", request);
        match request {
            HostRequest::Pause => {
                if self.game.mode() == GameMode::Playing {
                    self.game.toggle_pause();
                }
            }
            HostRequest::Resume => {
                if self.game.mode() == GameMode::Paused {
                    self.game.toggle_pause();
                }
            }
            HostRequest::RewardGranted { amount, currency } => {
                log::info!("Reward granted: {} {}", amount, currency);
                self.game.restart();
            }
        }
    }
}
