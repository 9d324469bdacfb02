//! # Client Configuration
//!
//! Configuration for the checkout API client.
//! Everything has a default; environment variables only override.

use crate::wait::WaitConfig;
use cult_core::CultError;
use std::env;
use std::time::Duration;

/// Production API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://forthecult.store/api";

/// Per-request timeout applied by the HTTP client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Checkout API client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub api_base_url: String,

    /// Timeout for a single HTTP request
    pub request_timeout: Duration,

    /// Payment polling cadence and deadline
    pub wait: WaitConfig,
}

impl ClientConfig {
    /// Create config for an explicit base URL
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url.into()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            wait: WaitConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `CULT_API_BASE_URL`
    /// - `CULT_HTTP_TIMEOUT_SECS`
    /// - `CULT_POLL_INTERVAL_SECS`
    /// - `CULT_POLL_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, CultError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = match non_empty_var("CULT_API_BASE_URL") {
            Some(url) => Self::new(url),
            None => Self::default(),
        };

        if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://") {
            return Err(CultError::Configuration(
                "CULT_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        if let Some(secs) = secs_var("CULT_HTTP_TIMEOUT_SECS")? {
            if secs.is_zero() {
                return Err(CultError::Configuration(
                    "CULT_HTTP_TIMEOUT_SECS must be greater than 0".to_string(),
                ));
            }
            config.request_timeout = secs;
        }
        if let Some(secs) = secs_var("CULT_POLL_INTERVAL_SECS")? {
            if secs.is_zero() {
                return Err(CultError::Configuration(
                    "CULT_POLL_INTERVAL_SECS must be greater than 0".to_string(),
                ));
            }
            config.wait.interval = secs;
        }
        if let Some(secs) = secs_var("CULT_POLL_TIMEOUT_SECS")? {
            config.wait.timeout = secs;
        }

        Ok(config)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = normalize_base_url(url.into());
        self
    }

    /// Builder: set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder: set payment polling config
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Join a path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn secs_var(name: &str) -> Result<Option<Duration>, CultError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| {
                CultError::Configuration(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    name, raw
                ))
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "CULT_API_BASE_URL",
        "CULT_HTTP_TIMEOUT_SECS",
        "CULT_POLL_INTERVAL_SECS",
        "CULT_POLL_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "https://forthecult.store/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.wait.interval, Duration::from_secs(10));
        assert_eq!(config.wait.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://localhost:3000/api/");
        assert_eq!(config.url("/chains"), "http://localhost:3000/api/chains");

        let config = ClientConfig::default().with_api_base_url("http://127.0.0.1:9999//");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_from_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        env::set_var("CULT_API_BASE_URL", "http://localhost:4000/api/");
        env::set_var("CULT_HTTP_TIMEOUT_SECS", "5");
        env::set_var("CULT_POLL_INTERVAL_SECS", "2");
        env::set_var("CULT_POLL_TIMEOUT_SECS", "60");

        let config = ClientConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "http://localhost:4000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.wait.interval, Duration::from_secs(2));
        assert_eq!(config.wait.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        env::set_var("CULT_POLL_TIMEOUT_SECS", "ten minutes");
        let result = ClientConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(CultError::Configuration(_))));

        env::set_var("CULT_API_BASE_URL", "forthecult.store/api");
        let result = ClientConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(CultError::Configuration(_))));

        env::set_var("CULT_HTTP_TIMEOUT_SECS", "0");
        let result = ClientConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(CultError::Configuration(_))));
    }

    #[test]
    fn test_from_env_rejects_zero_poll_interval() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        env::set_var("CULT_POLL_INTERVAL_SECS", "0");
        let result = ClientConfig::from_env();
        clear_env();

        match result {
            Err(CultError::Configuration(msg)) => assert!(msg.contains("CULT_POLL_INTERVAL_SECS")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
