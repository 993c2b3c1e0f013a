//! TOML-based configuration.
//!
//! Settings load from `./hachikoma.toml` or
//! `~/.config/hachikoma/hachikoma.toml`, with the local file taking
//! precedence. Every field has a default, so a missing file is not an
//! error.

use crate::gemini::{IMAGE_MODEL, STORY_MODEL};
use crate::retry::RetryPolicy;
use hachikoma_error::{ConfigError, HachikomaResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Retry tuning.
///
/// ```toml
/// [retry]
/// max_retries = 3
/// initial_backoff_ms = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RetrySettings {
    /// Maximum retries after the initial attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Delay before the first retry; doubles each retry
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_max_retries() -> usize {
    RetryPolicy::default().max_retries
}

fn default_initial_backoff_ms() -> u64 {
    RetryPolicy::default().initial_backoff_ms
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl From<RetrySettings> for RetryPolicy {
    fn from(settings: RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_backoff_ms: settings.initial_backoff_ms,
        }
    }
}

/// Top-level configuration.
///
/// ```toml
/// story_model = "gemini-3-flash-preview"
/// image_model = "gemini-3-pro-image-preview"
///
/// [retry]
/// max_retries = 3
/// initial_backoff_ms = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HachikomaConfig {
    /// Model used for story generation
    #[serde(default = "default_story_model")]
    pub story_model: String,
    /// Model used for image generation
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Retry tuning for both request kinds
    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_story_model() -> String {
    STORY_MODEL.to_string()
}

fn default_image_model() -> String {
    IMAGE_MODEL.to_string()
}

impl Default for HachikomaConfig {
    fn default() -> Self {
        Self {
            story_model: default_story_model(),
            image_model: default_image_model(),
            retry: RetrySettings::default(),
        }
    }
}

impl HachikomaConfig {
    /// Load configuration from the first file found, or defaults.
    ///
    /// Search order: `./hachikoma.toml`, then
    /// `~/.config/hachikoma/hachikoma.toml`.
    ///
    /// # Errors
    ///
    /// Returns error if a file exists but cannot be read or parsed.
    pub fn load() -> HachikomaResult<Self> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }
        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Parse configuration from a specific file.
    pub fn from_file(path: &std::path::Path) -> HachikomaResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("hachikoma.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hachikoma").join("hachikoma.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: HachikomaConfig = toml::from_str("story_model = \"custom-model\"").unwrap();
        assert_eq!(config.story_model, "custom-model");
        assert_eq!(config.image_model, IMAGE_MODEL);
        assert_eq!(config.retry, RetrySettings::default());
    }

    #[test]
    fn retry_section_overrides() {
        let config: HachikomaConfig =
            toml::from_str("[retry]\nmax_retries = 5\ninitial_backoff_ms = 500\n").unwrap();
        let policy: RetryPolicy = config.retry.into();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.initial_backoff_ms, 500);
    }
}
