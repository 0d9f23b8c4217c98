use actix_web::http::Uri;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::evaluator::{FairnessThreshold, InvalidThreshold};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "trade-analyzer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: trade.{0}")]
    Threshold(#[from] InvalidThreshold),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub espn: EspnConfig,
    pub trade: TradeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin of the dashboard front-end allowed by CORS
    pub allowed_origin: String,
    /// Built front-end to serve at `/`, if any
    pub static_dir: Option<PathBuf>,
    /// At least 64 bytes; a random key is generated when unset, which logs
    /// everyone out on restart.
    pub session_secret: Option<String>,
    pub secure_cookies: bool,
    pub session_ttl_minutes: i64,
}

impl ServerConfig {
    /// Idle time after which a session is dropped
    pub fn session_ttl(&self) -> Result<Duration, ConfigError> {
        if self.session_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid("server.session_ttl_minutes must be positive".to_string()));
        }
        Duration::try_minutes(self.session_ttl_minutes).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "server.session_ttl_minutes is out of range: {}",
                self.session_ttl_minutes
            ))
        })
    }

    /// CORS needs one concrete `scheme://host[:port]` origin
    fn validate_origin(&self) -> Result<(), ConfigError> {
        let origin = self.allowed_origin.trim();
        let invalid = || {
            ConfigError::Invalid(format!(
                "server.allowed_origin must be a scheme://host origin, got '{}'",
                self.allowed_origin
            ))
        };
        if origin == "*" {
            return Err(invalid());
        }
        let uri: Uri = origin.parse().map_err(|_| invalid())?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(invalid());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origin: "http://localhost:3000".to_string(),
            static_dir: None,
            session_secret: None,
            secure_cookies: false,
            session_ttl_minutes: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspnConfig {
    pub base_url: String,
    /// Seasons tried in order when connecting to a league
    pub seasons: Vec<i32>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for EspnConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl".to_string(),
            seasons: vec![2025, 2024, 2023],
            timeout_secs: 30,
            user_agent: concat!("trade-analyzer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    pub fairness: FairnessThreshold,
    /// CSV of externally computed trade values (`player_id,trade_value`)
    pub value_overrides: Option<PathBuf>,
    /// Length the segment breakdown scales a side's bar to
    pub bar_length: f64,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            fairness: FairnessThreshold::default(),
            value_overrides: None,
            bar_length: 100.0,
        }
    }
}

impl AppConfig {
    /// Loads the given file, or `trade-analyzer.toml` from the working
    /// directory when present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trade.fairness.validate()?;
        if !self.trade.bar_length.is_finite() || self.trade.bar_length <= 0.0 {
            return Err(ConfigError::Invalid("trade.bar_length must be positive".to_string()));
        }
        if self.espn.seasons.is_empty() {
            return Err(ConfigError::Invalid("espn.seasons must list at least one season".to_string()));
        }
        self.server.session_ttl()?;
        self.server.validate_origin()?;
        if let Some(secret) = &self.server.session_secret {
            if secret.len() < 64 {
                return Err(ConfigError::Invalid(
                    "server.session_secret must be at least 64 bytes".to_string(),
                ));
            }
        }
        Ok(())
    }
}
