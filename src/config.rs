//! Validator configuration.
//!
//! The engine consumes configuration but does not load it; the server and
//! CLI binaries map their flags and environment onto [`ValidatorConfig`].

use std::time::Duration;

use crate::error::ConfigError;

/// Default BIN lookup service.
pub const DEFAULT_BIN_SERVICE_URL: &str = "https://lookup.binlist.net";

/// Default timeout for one BIN lookup.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Look up issuer data for numbers that pass the checksum.
    pub enable_bin_lookup: bool,
    /// Upper bound for one outbound lookup.
    pub http_timeout: Duration,
    /// Base URL of the lookup service; the BIN is appended as a path segment.
    pub bin_service_url: String,
    /// Attach the masked number to outcome log lines. When false the number
    /// is left out of the log line entirely.
    pub mask_sensitive: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            enable_bin_lookup: true,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            bin_service_url: DEFAULT_BIN_SERVICE_URL.to_string(),
            mask_sensitive: true,
        }
    }
}

impl ValidatorConfig {
    /// Configuration with BIN lookup turned off.
    pub fn offline() -> Self {
        Self {
            enable_bin_lookup: false,
            ..Self::default()
        }
    }

    /// Enables or disables BIN lookup.
    pub fn with_bin_lookup(mut self, enabled: bool) -> Self {
        self.enable_bin_lookup = enabled;
        self
    }

    /// Sets the lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Sets the lookup service base URL.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.bin_service_url = url.into();
        self
    }

    /// Controls whether the masked number is logged.
    pub fn with_mask_sensitive(mut self, mask: bool) -> Self {
        self.mask_sensitive = mask;
        self
    }

    /// Checks the settings for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.enable_bin_lookup && self.bin_service_url.trim().is_empty() {
            return Err(ConfigError::EmptyServiceUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert!(config.enable_bin_lookup);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.bin_service_url, "https://lookup.binlist.net");
        assert!(config.mask_sensitive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ValidatorConfig::default()
            .with_bin_lookup(false)
            .with_timeout(Duration::from_millis(250))
            .with_service_url("http://localhost:9999")
            .with_mask_sensitive(false);
        assert!(!config.enable_bin_lookup);
        assert_eq!(config.http_timeout, Duration::from_millis(250));
        assert_eq!(config.bin_service_url, "http://localhost:9999");
        assert!(!config.mask_sensitive);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ValidatorConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_empty_url_only_when_enabled() {
        let config = ValidatorConfig::default().with_service_url("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyServiceUrl));
        assert!(config.with_bin_lookup(false).validate().is_ok());
    }
}
