use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

#[derive(Deserialize, Clone, Default)]
pub struct GitHubConfig {
    /// Personal access token. Falls back to `GH_TOKEN`, `GITHUB_TOKEN`, then `gh auth token`.
    #[serde(default)]
    pub token: Option<String>,
    /// Base URI for GitHub Enterprise installations.
    #[serde(default)]
    pub api_url: Option<String>,
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CleanupConfig {
    #[serde(default = "default_keep_count")]
    pub default_keep_count: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u8,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            default_keep_count: default_keep_count(),
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
            page_size: default_page_size(),
        }
    }
}

impl CleanupConfig {
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }
}

/// Largest page the runs listing endpoint accepts.
pub const MAX_PAGE_SIZE: u8 = 100;

fn default_keep_count() -> usize {
    20
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_pause_ms() -> u64 {
    1000
}

fn default_page_size() -> u8 {
    MAX_PAGE_SIZE
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("gh-moles").required(false));
        }

        // Environment variable overrides, e.g. GH_MOLES__CLEANUP__BATCH_SIZE=10
        builder = builder.add_source(
            config::Environment::with_prefix("GH_MOLES")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let cleanup = &self.cleanup;
        if cleanup.default_keep_count == 0 {
            return Err(AppError::Config(
                "cleanup.default_keep_count must be at least 1".to_string(),
            ));
        }
        if cleanup.batch_size == 0 {
            return Err(AppError::Config(
                "cleanup.batch_size must be at least 1".to_string(),
            ));
        }
        if cleanup.page_size == 0 || cleanup.page_size > MAX_PAGE_SIZE {
            return Err(AppError::Config(format!(
                "cleanup.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cleanup.default_keep_count, 20);
        assert_eq!(config.cleanup.batch_size, 5);
        assert_eq!(config.cleanup.batch_pause(), Duration::from_secs(1));
        assert_eq!(config.cleanup.page_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moles.toml");
        std::fs::write(
            &path,
            "[cleanup]\nbatch_size = 3\nbatch_pause_ms = 250\n\n[github]\napi_url = \"https://ghe.example.com/api/v3\"\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.cleanup.batch_size, 3);
        assert_eq!(config.cleanup.batch_pause(), Duration::from_millis(250));
        assert_eq!(config.cleanup.default_keep_count, 20);
        assert_eq!(
            config.github.api_url.as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let mut config = AppConfig::default();
        config.cleanup.batch_size = 0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_oversized_page() {
        let mut config = AppConfig::default();
        config.cleanup.page_size = 101;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let github = GitHubConfig {
            token: Some("ghp_secret".to_string()),
            api_url: None,
        };
        let rendered = format!("{github:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
