//! Gateway configuration.
//!
//! The base URL and the anonymous user identifier are explicit
//! construction-time inputs, not module globals. Resolution order:
//! built-in defaults, then `.plotbuddy/settings.json`, then environment
//! variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Default backend URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Identifier sent with every request when no account is configured.
pub const DEFAULT_USER_ID: &str = "anonymous_user";

/// Environment variable overriding the backend URL.
pub const API_URL_ENV: &str = "PLOTBUDDY_API_URL";

/// Environment variable overriding the user identifier.
pub const USER_ID_ENV: &str = "PLOTBUDDY_USER_ID";

/// Request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the agent backend (no trailing slash)
    pub base_url: String,
    /// User identifier included in every request body
    pub user_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

/// On-disk settings shape (`.plotbuddy/settings.json`).
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(rename = "apiUrl")]
    api_url: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

impl ApiConfig {
    /// Create a configuration with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Load overrides from the environment on top of `self`.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                self.base_url = normalize_base_url(url);
            }
        }
        if let Ok(user) = std::env::var(USER_ID_ENV) {
            if !user.is_empty() {
                self.user_id = user;
            }
        }
        self
    }

    /// Load a configuration from a settings file.
    pub fn from_settings(path: impl AsRef<Path>) -> ApiResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ApiError::Settings(format!("{}: {}", path.as_ref().display(), e)))?;
        let settings: SettingsFile = serde_json::from_str(&content)
            .map_err(|e| ApiError::Settings(format!("{}: {}", path.as_ref().display(), e)))?;

        let mut config = Self::default();
        if let Some(url) = settings.api_url {
            config.base_url = normalize_base_url(url);
        }
        if let Some(user) = settings.user_id {
            config.user_id = user;
        }
        Ok(config)
    }

    /// Resolve the effective configuration: settings file if present,
    /// then environment overrides.
    pub fn resolve(workspace_root: impl AsRef<Path>) -> Self {
        let settings_path = workspace_root.as_ref().join(".plotbuddy").join("settings.json");
        let base = if settings_path.exists() {
            Self::from_settings(&settings_path).unwrap_or_default()
        } else {
            Self::default()
        };
        base.with_env()
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.user_id, "anonymous_user");
    }

    #[test]
    fn test_endpoint_join() {
        let config = ApiConfig::new("http://localhost:8000/");
        assert_eq!(
            config.endpoint("/api/chat"),
            "http://localhost:8000/api/chat"
        );
    }

    #[test]
    fn test_settings_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "apiUrl": "https://plotbuddy.example.com/", "userId": "writer_7" }"#,
        )
        .unwrap();

        let config = ApiConfig::from_settings(&path).unwrap();
        assert_eq!(config.base_url, "https://plotbuddy.example.com");
        assert_eq!(config.user_id, "writer_7");
    }

    #[test]
    fn test_settings_file_partial() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{ "apiUrl": "http://10.0.0.2:8000" }"#).unwrap();

        let config = ApiConfig::from_settings(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.user_id, DEFAULT_USER_ID);
    }

    #[test]
    fn test_missing_settings_file() {
        let temp = tempfile::tempdir().unwrap();
        let result = ApiConfig::from_settings(temp.path().join("nope.json"));
        assert!(matches!(result, Err(ApiError::Settings(_))));
    }
}
