//! Error types for tomatodo-core.
//!
//! The failure surface is deliberately small: alarm playback may fail
//! (non-fatal, the session always advances past it) and the CLI config file
//! may be unreadable. Blank todo text and spurious ticks are silent no-ops by
//! design, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Alarm playback failure. Never blocks a phase transition.
#[derive(Error, Debug)]
pub enum AlarmError {
    #[error("sound device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("alarm playback failed: {0}")]
    Playback(#[from] std::io::Error),
}

/// Configuration load/parse failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),
}
