//! CLI configuration
//!
//! The handful of knobs the import flow needs: where the importer API
//! lives, how often to check progress, and how long a single request may
//! take.

use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Importer API base URL (e.g., "http://localhost:5000")
    pub api_url: String,

    /// Spacing between progress checks
    pub poll_interval: Duration,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_url: String, poll_interval_secs: u64, timeout_secs: u64) -> Self {
        Self {
            api_url,
            poll_interval: Duration::from_secs(poll_interval_secs),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.as_secs() == 0 {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000".to_string(), 2, 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api_url = String::new();
        assert!(config.validate().is_err());

        config.api_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.api_url = "http://localhost:5000".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::from_secs(0);
        assert!(config.validate().is_err());
    }
}
