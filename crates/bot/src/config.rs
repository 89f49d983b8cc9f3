use std::path::Path;

use anilist::{TitleLanguage, DEFAULT_ENDPOINT};
use formatter::{TitlePriority, MAX_REPLY_LENGTH};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_VAR: &str = "ANIBOT_CONFIG";
/// Environment variable overriding the API endpoint
pub const ENDPOINT_VAR: &str = "ANILIST_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Bot configuration, every field optional in the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// GraphQL endpoint
    #[serde(default = "BotConfig::default_endpoint")]
    pub endpoint: String,
    /// Command prefix, e.g. "." for ".al frieren"
    #[serde(default = "BotConfig::default_prefix")]
    pub prefix: String,
    /// Host whose `/<kind>/<id>` links trigger an id lookup
    #[serde(default = "BotConfig::default_site_host")]
    pub site_host: String,
    /// Longest reply line, in characters
    #[serde(default = "BotConfig::default_max_reply_length")]
    pub max_reply_length: usize,
    /// Title languages in preference order
    #[serde(default = "BotConfig::default_title_priority")]
    pub title_priority: Vec<TitleLanguage>,
    /// User-Agent sent to the API
    #[serde(default = "BotConfig::default_user_agent")]
    pub user_agent: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            prefix: Self::default_prefix(),
            site_host: Self::default_site_host(),
            max_reply_length: Self::default_max_reply_length(),
            title_priority: Self::default_title_priority(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl BotConfig {
    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }

    fn default_prefix() -> String {
        ".".to_string()
    }

    fn default_site_host() -> String {
        "anilist.co".to_string()
    }

    fn default_max_reply_length() -> usize {
        MAX_REPLY_LENGTH
    }

    fn default_title_priority() -> Vec<TitleLanguage> {
        TitlePriority::DEFAULT_ORDER.to_vec()
    }

    fn default_user_agent() -> String {
        concat!("anibot/", env!("CARGO_PKG_VERSION")).to_string()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load from `$ANIBOT_CONFIG` if set, otherwise defaults; then apply
    /// `$ANILIST_ENDPOINT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        Ok(config.with_endpoint_override(std::env::var(ENDPOINT_VAR).ok()))
    }

    /// Replace the endpoint when `endpoint` is a non-blank value
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() || self.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "prefix must be non-empty and contain no whitespace".to_string(),
            ));
        }
        if self.max_reply_length == 0 {
            return Err(ConfigError::Invalid(
                "max_reply_length must be positive".to_string(),
            ));
        }
        if self.title_priority.is_empty() {
            return Err(ConfigError::Invalid(
                "title_priority must name at least one language".to_string(),
            ));
        }
        Ok(())
    }

    pub fn title_priority(&self) -> TitlePriority {
        TitlePriority::new(self.title_priority.clone())
    }
}
