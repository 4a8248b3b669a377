use std::time::Duration;

use crate::error::ConfigError;

/// Timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// A validated server to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTarget {
    host: String,
    port: u16,
    timeout: Duration,
}

impl StatusTarget {
    /// Validate raw input. `port` is taken wide so out-of-range values are
    /// reported instead of wrapping.
    pub fn new(host: &str, port: u32, timeout_ms: Option<u64>) -> Result<Self, ConfigError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::MissingHost);
        }

        let port = match u16::try_from(port) {
            Ok(0) | Err(_) => return Err(ConfigError::InvalidPort(port)),
            Ok(p) => p,
        };

        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(StatusTarget {
            host: host.to_owned(),
            port,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_timeout() {
        let target = StatusTarget::new(" 10.0.0.1 ", 2303, None).unwrap();
        assert_eq!(target.host(), "10.0.0.1");
        assert_eq!(target.port(), 2303);
        assert_eq!(target.timeout(), Duration::from_millis(2000));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(StatusTarget::new("  ", 2303, None), Err(ConfigError::MissingHost));
        assert_eq!(StatusTarget::new("h", 0, None), Err(ConfigError::InvalidPort(0)));
        assert_eq!(
            StatusTarget::new("h", 65536, None),
            Err(ConfigError::InvalidPort(65536))
        );
        assert_eq!(StatusTarget::new("h", 1, Some(0)), Err(ConfigError::InvalidTimeout));
        assert!(StatusTarget::new("h", 65535, Some(1)).is_ok());
    }
}
