use std::io;

use thiserror::Error;

/// Everything that can go wrong during a single A2S_INFO exchange.
#[derive(Error, Debug)]
pub enum SourceQueryError {
    /// No reply arrived before the deadline.
    #[error("query timed out after {0}ms")]
    Timeout(u128),

    /// Resolving, binding, sending or receiving failed.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),

    /// A reply arrived but is not a well-formed A2S_INFO response.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SourceQueryError {
    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        SourceQueryError::Protocol(msg.into())
    }
}

/// Rejected input to [crate::config::StatusTarget].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing host")]
    MissingHost,

    #[error("invalid port {0}, expected 1-65535")]
    InvalidPort(u32),

    #[error("timeout must be a positive number of milliseconds")]
    InvalidTimeout,
}
