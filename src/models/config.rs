use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration loaded from issuebatch.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Target repository in `owner/name` form
    #[serde(default)]
    pub repository: Option<String>,
    /// Timeout in seconds for each create request
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Bearer credential. Only ever set from the command line or environment.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repository: None,
            timeout_seconds: default_timeout(),
            token: None,
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Fixed pause between two create requests, in milliseconds
    #[serde(default = "default_pace_millis")]
    pub pace_millis: u64,
    /// Number of body characters shown in the dry-run preview
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pace_millis: default_pace_millis(),
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_pace_millis() -> u64 {
    1000
}

fn default_preview_chars() -> usize {
    100
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub repository: Option<String>,
    pub token: Option<String>,
    pub pace_millis: Option<u64>,
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.clone(), e))
    }

    /// Try to load config from issuebatch.toml in the given directory
    pub fn load_from_dir(dir: &PathBuf) -> Result<Self, ConfigError> {
        let config_path = dir.join("issuebatch.toml");
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.api_url {
            self.github.api_url = url;
        }
        if let Some(repo) = overrides.repository {
            self.github.repository = Some(repo);
        }
        if let Some(token) = overrides.token {
            self.github.token = Some(token);
        }
        if let Some(pace) = overrides.pace_millis {
            self.behavior.pace_millis = pace;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
}
