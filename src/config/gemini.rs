use std::time::Duration;

use secrecy::SecretString;

use crate::config::{optional_env, parse_optional_env};
use crate::error::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini generateContent API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub model: String,
    /// Base URL up to and including the API version segment.
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Build a config with default model, endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns `Ok(None)` when `GEMINI_API_KEY` is unset.
    pub(crate) fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = optional_env("GEMINI_API_KEY")? else {
            return Ok(None);
        };

        let base_url = optional_env("GEMINI_BASE_URL")?
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "GEMINI_BASE_URL".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: optional_env("GEMINI_MODEL")?
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url,
            timeout: Duration::from_secs(parse_optional_env("GEMINI_TIMEOUT_SECS", 30u64)?),
        }))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::config::tests::ENV_LOCK;

    fn clear() {
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GEMINI_MODEL");
            std::env::remove_var("GEMINI_BASE_URL");
            std::env::remove_var("GEMINI_TIMEOUT_SECS");
        }
    }

    #[test]
    fn missing_key_means_no_provider() {
        let _lock = ENV_LOCK.lock();
        clear();
        assert!(GeminiConfig::from_env().unwrap().is_none());
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let _lock = ENV_LOCK.lock();
        clear();
        unsafe { std::env::set_var("GEMINI_API_KEY", "k-123") };
        let cfg = GeminiConfig::from_env().unwrap().unwrap();
        assert_eq!(cfg.api_key.expose_secret(), "k-123");
        assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        clear();
    }

    #[test]
    fn rejects_non_http_base_url() {
        let _lock = ENV_LOCK.lock();
        clear();
        unsafe {
            std::env::set_var("GEMINI_API_KEY", "k");
            std::env::set_var("GEMINI_BASE_URL", "ftp://example.com");
        }
        let err = GeminiConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "GEMINI_BASE_URL"
        ));
        clear();
    }
}
