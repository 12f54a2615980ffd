//! Transport settings for the web API.
//!
//! The API answers quickly and keeps connections alive for a long time, so
//! the defaults favour a small warm pool and a whole-exchange deadline over
//! per-phase tuning.

use std::time::Duration;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("spotkit/", env!("CARGO_PKG_VERSION"));

/// Settings of the [`HyperClient`](crate::HyperClient) transport.
///
/// ```ignore
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("jukebox/2.1");
/// let client = HyperClient::with_config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline for one exchange, from connecting to the last body byte.
    pub timeout: Duration,
    /// Deadline for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Idle connections kept per host. Only two hosts are ever contacted.
    pub pool_idle_per_host: usize,
    /// How long an idle connection is kept.
    pub pool_idle_timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 8,
            pool_idle_timeout: Duration::from_secs(90),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Replace the exchange deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the connection deadline.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replace the idle pool size and lifetime.
    #[must_use]
    pub const fn with_pool(mut self, idle_per_host: usize, idle_timeout: Duration) -> Self {
        self.pool_idle_per_host = idle_per_host;
        self.pool_idle_timeout = idle_timeout;
        self
    }

    /// Identify the application, e.g. `"jukebox/2.1"`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 8);
        assert!(config.user_agent.starts_with("spotkit/"));
    }

    #[test]
    fn setters_replace_single_fields() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(60))
            .with_pool(2, Duration::from_secs(15))
            .with_user_agent("jukebox/2.1");

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 2);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(15));
        assert_eq!(config.user_agent, "jukebox/2.1");
    }
}
