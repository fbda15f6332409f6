// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest), `STUDYFORGE__SECTION__KEY`
    /// 2. Config file (`path`, or `~/.studyforge/config.toml` when absent)
    /// 3. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            // An explicitly requested file must exist
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("STUDYFORGE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject settings that would make the cache or chunker unusable.
    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(AppError::Config("cache.capacity must be at least 1".to_string()));
        }
        if self.cache.ttl_seconds == 0 {
            return Err(AppError::Config("cache.ttl_seconds must be at least 1".to_string()));
        }
        if self.segmenter.max_chunk_tokens == 0 {
            return Err(AppError::Config(
                "segmenter.max_chunk_tokens must be at least 1".to_string(),
            ));
        }
        if self.generation.max_concurrent_chunks == 0 {
            return Err(AppError::Config(
                "generation.max_concurrent_chunks must be at least 1".to_string(),
            ));
        }
        if self.server.workers == 0 {
            return Err(AppError::Config("server.workers must be at least 1".to_string()));
        }
        Ok(())
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studyforge")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.ttl_seconds, 86_400);
        assert_eq!(config.segmenter.max_chunk_tokens, 1500);
    }

    #[test]
    fn test_zero_chunk_budget_rejected() {
        let mut config = AppConfig::default();
        config.segmenter.max_chunk_tokens = 0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
