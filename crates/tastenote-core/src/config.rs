//! Persisted share config (app URL, hashtag) in the app data directory.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app_data;

const CONFIG_FILENAME: &str = "config.toml";

/// Overrides the stored app URL when set and non-empty.
pub const APP_URL_ENV: &str = "TASTENOTE_APP_URL";

pub const DEFAULT_APP_URL: &str = "https://whiskytastingnote-web.pages.dev";
pub const DEFAULT_HASHTAG: &str = "#WhiskyTastingNote";

/// What every shared post links to and is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Public URL of the app, always posted in full.
    pub app_url: String,
    pub hashtag: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            app_url: DEFAULT_APP_URL.to_string(),
            hashtag: DEFAULT_HASHTAG.to_string(),
        }
    }
}

impl ShareConfig {
    /// Stored config with the [`APP_URL_ENV`] override applied.
    pub fn resolve() -> Self {
        load_config().with_app_url_override(std::env::var(APP_URL_ENV).ok())
    }

    /// Replaces the app URL with `url` unless it is missing or blank.
    pub fn with_app_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.app_url = url;
        }
        self
    }
}

/// Load config from the app data directory. Returns default config if missing or invalid.
pub fn load_config() -> ShareConfig {
    let Some(data_dir) = app_data::app_data_dir() else {
        return ShareConfig::default();
    };
    load_config_from(&data_dir.join(CONFIG_FILENAME))
}

/// Load config from `path`. Returns default config if missing or invalid.
pub fn load_config_from(path: &Path) -> ShareConfig {
    let Ok(s) = std::fs::read_to_string(path) else {
        return ShareConfig::default();
    };
    toml::from_str(&s).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring invalid config");
        ShareConfig::default()
    })
}

/// Save config to the app data directory.
pub fn save_config(config: &ShareConfig) -> Result<(), ConfigError> {
    let data_dir = app_data::app_data_dir().ok_or(ConfigError::NoDataDir)?;
    save_config_to(config, &data_dir.join(CONFIG_FILENAME))
}

/// Save config to `path`.
pub fn save_config_to(config: &ShareConfig, path: &Path) -> Result<(), ConfigError> {
    let s = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    std::fs::write(path, s).map_err(ConfigError::Write)
}

/// Set and persist the app URL. Must be an absolute http(s) URL.
pub fn set_app_url(url: &str) -> Result<(), ConfigError> {
    let url = validate_app_url(url)?;
    let mut config = load_config();
    config.app_url = url;
    save_config(&config)
}

/// Set and persist the hashtag.
pub fn set_hashtag(tag: &str) -> Result<(), ConfigError> {
    let tag = validate_hashtag(tag)?;
    let mut config = load_config();
    config.hashtag = tag;
    save_config(&config)
}

fn validate_app_url(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn validate_hashtag(raw: &str) -> Result<String, ConfigError> {
    let tag = raw.trim();
    let body = tag.strip_prefix('#').unwrap_or("");
    if body.is_empty() || body.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidHashtag(raw.to_string()));
    }
    Ok(tag.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine app data directory")]
    NoDataDir,
    #[error("failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(std::io::Error),
    #[error("invalid app URL {0:?}: {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("app URL must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("hashtag must start with # and contain no whitespace: {0:?}")]
    InvalidHashtag(String),
}
