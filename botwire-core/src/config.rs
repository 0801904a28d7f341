//! # Client configuration
//!
//! Settings for the HTTP transport and the update cursor. Values are layered in increasing
//! precedence: defaults, a JSON file ([`ClientConfig::load`]), the environment
//! ([`ClientConfig::apply_env`]) and finally explicit overrides by the caller.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

pub const TOKEN_ENV: &str = "BOTWIRE_TOKEN";
pub const API_URL_ENV: &str = "BOTWIRE_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': '{source}'", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file '{}': '{source}'", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No bot token configured (set 'BOTWIRE_TOKEN' or pass one explicitly)")]
    MissingToken,
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Bot token issued by the API provider.
    pub token: String,
    /// Base URL of the API, without the `/bot<token>` suffix.
    pub api_url: String,
    /// Upper bound for a single request, on top of the long-poll wait.
    pub request_timeout_secs: u64,
    /// Batch size requested by the update cursor (1-100).
    pub poll_limit: u32,
    /// Long-poll wait requested by the update cursor.
    pub poll_timeout_secs: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            poll_limit: 100,
            poll_timeout_secs: 25,
        }
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Reads a JSON config file. Missing keys take their default value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides the token and API URL with `BOTWIRE_TOKEN` / `BOTWIRE_API_URL` when set.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = var(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.token = token;
        }
        if let Some(api_url) = var(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_url = api_url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: format!("'{}' is not an http(s) URL", self.api_url),
            });
        }

        if !(1..=100).contains(&self.poll_limit) {
            return Err(ConfigError::InvalidValue {
                field: "poll_limit",
                reason: format!("{} is outside 1-100", self.poll_limit),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "token": "123:abc", "poll_limit": 10 }"#).unwrap();

        assert_eq!(config.token, "123:abc");
        assert_eq!(config.poll_limit, 10);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_timeout_secs, 25);
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = ClientConfig::new("from-file").apply_vars(|key| match key {
            TOKEN_ENV => Some("from-env".to_string()),
            API_URL_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.token, "from-env");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn validation() {
        assert!(matches!(
            ClientConfig::default().validate(),
            Err(ConfigError::MissingToken)
        ));

        let mut config = ClientConfig::new("123:abc");
        assert!(config.validate().is_ok());

        config.poll_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "poll_limit",
                ..
            })
        ));

        config.poll_limit = 100;
        config.api_url = "ftp://example.org".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "api_url",
                ..
            })
        ));
    }

    #[test]
    fn unreadable_file_reports_its_path() {
        let err = ClientConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
