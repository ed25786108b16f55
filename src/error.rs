//! Error types for the collaborators around the simulation
//!
//! The simulation itself never fails; these cover configuration loading,
//! best-score storage and the host platform bridge.

use thiserror::Error;

/// Failure to load or validate a [`crate::WorldConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure of a best-score storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored value {value:?}")]
    Malformed { value: String },
    #[error("storage rejected write: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Stable code for host error reports
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable => "storage_unavailable",
            StoreError::Io(_) => "storage_io",
            StoreError::Malformed { .. } => "storage_malformed",
            StoreError::Rejected(_) => "storage_write",
        }
    }
}

/// Failure to deliver a lifecycle event to the host platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("host bridge not connected")]
    NotConnected,
    #[error("host rejected {event}: {reason}")]
    Rejected { event: &'static str, reason: String },
}

impl HostError {
    /// Stable code for host error reports
    pub fn code(&self) -> &'static str {
        match self {
            HostError::NotConnected => "host_not_connected",
            HostError::Rejected { .. } => "host_rejected",
        }
    }
}
