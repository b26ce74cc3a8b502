//! Fetcher configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the request time limit in milliseconds.
pub const TIMEOUT_ENV: &str = "JSON_FETCH_TIMEOUT_MS";

/// Settings for a `JsonFetcher`.
///
/// The default has no time limit: a request whose transport never completes
/// never invokes its callback. Set `timeout` to get `FetchError::Timeout`
/// instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout: Option<Duration>,
}

impl FetchConfig {
    /// Read the configuration from `JSON_FETCH_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_timeout_var(std::env::var(TIMEOUT_ENV).ok().as_deref())
    }

    /// Build from the raw variable value. Unset, empty or `0` means no limit.
    pub fn from_timeout_var(value: Option<&str>) -> Result<Self, ConfigError> {
        let raw = match value.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };
        let millis: u64 = raw.parse().map_err(|_| ConfigError::InvalidTimeout {
            var: TIMEOUT_ENV,
            value: raw.to_string(),
        })?;
        Ok(Self::with_timeout_ms(millis))
    }

    /// Limit every request to `millis` milliseconds; `0` disables the limit.
    pub fn with_timeout_ms(millis: u64) -> Self {
        Self {
            timeout: (millis > 0).then(|| Duration::from_millis(millis)),
        }
    }
}
