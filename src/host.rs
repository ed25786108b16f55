//! Lifecycle signalling with the hosting platform
//!
//! The host (an embedding page, an ad/telemetry SDK, a test harness) receives
//! fire-and-forget [`LifecycleEvent`]s and may send back [`HostRequest`]s.
//! Delivery failures are reported by the caller and never reach the simulation.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Verdict attached to a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionResult {
    Success,
    Fail,
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Completed,
    Collision,
}

/// Events sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The game is loaded and ready
    SessionLoaded,
    SessionStarted,
    SessionEnded {
        result: SessionResult,
        reason: EndReason,
        difficulty_tier: u8,
    },
    VisibilityChanged {
        visible: bool,
    },
    ErrorReported {
        code: String,
        message: String,
    },
}

impl LifecycleEvent {
    /// Short name for logs and error reports
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::SessionLoaded => "session_loaded",
            LifecycleEvent::SessionStarted => "session_started",
            LifecycleEvent::SessionEnded { .. } => "session_ended",
            LifecycleEvent::VisibilityChanged { .. } => "visibility_changed",
            LifecycleEvent::ErrorReported { .. } => "error_reported",
        }
    }
}

/// Requests the host may make of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    Pause,
    Resume,
    /// A reward was granted (e.g. after an ad); restarts the session
    RewardGranted { amount: u32, currency: String },
}

/// Outbound channel to the host
pub trait HostBridge {
    /// Deliver one event; must not block
    fn send(&mut self, event: &LifecycleEvent) -> Result<(), HostError>;
}

/// Host that accepts and discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl HostBridge for NullHost {
    fn send(&mut self, _event: &LifecycleEvent) -> Result<(), HostError> {
        Ok(())
    }
}

/// Host that writes every event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHost;

impl HostBridge for LogHost {
    fn send(&mut self, event: &LifecycleEvent) -> Result<(), HostError> {
        log::info!("host <- {:?}", event);
        Ok(())
    }
}

/// Shared view of the events a [`RecordingHost`] received
pub type EventLog = Rc<RefCell<Vec<LifecycleEvent>>>;

/// Host that records events, optionally failing on some of them
#[derive(Debug, Clone)]
pub struct RecordingHost {
    log: EventLog,
    /// Event names (see [`LifecycleEvent::name`]) this host refuses
    reject: Vec<&'static str>,
    connected: bool,
}

impl RecordingHost {
    /// A connected recorder and a handle to read what it records
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        let host = Self {
            log: Rc::clone(&log),
            reject: Vec::new(),
            connected: true,
        };
        (host, log)
    }

    /// Refuse events with the given name
    pub fn rejecting(mut self, name: &'static str) -> Self {
        self.reject.push(name);
        self
    }

    /// Fail every send as if the bridge never connected
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }
}

impl HostBridge for RecordingHost {
    fn send(&mut self, event: &LifecycleEvent) -> Result<(), HostError> {
        if !self.connected {
            return Err(HostError::NotConnected);
        }
        if self.reject.contains(&event.name()) {
            return Err(HostError::Rejected {
                event: event.name(),
                reason: "refused by host".to_string(),
            });
        }
        self.log.borrow_mut().push(event.clone());
        Ok(())
    }
}
