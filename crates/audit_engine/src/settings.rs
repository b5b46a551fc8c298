use std::fmt;
use std::time::Duration;

use crate::ConfigError;

pub const CLIENT_ID_VAR: &str = "CONNECTWISE_CLIENT_ID";
pub const ACCESS_TOKEN_VAR: &str = "CONNECTWISE_ACCESS_TOKEN";

/// API credentials sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub access_token: String,
}

impl Credentials {
    /// Empty values count as missing.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };
        Ok(Self {
            client_id: read(CLIENT_ID_VAR)?,
            access_token: read(ACCESS_TOKEN_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://snrmm.securenetworkers.com/cwa/api/v1/".to_string(),
            page_size: 200,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Retry schedule for processor lookups.
///
/// The wait before retry `n` (1-based) is `base_delay * 2^n`, clamped to
/// `max_delay` when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnrichSettings {
    pub workers: usize,
    pub retry: RetryPolicy,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        Self {
            workers: 5,
            retry: RetryPolicy::default(),
        }
    }
}
