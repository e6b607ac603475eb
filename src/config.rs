use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::plays::models::contains_reserved_separator;
use crate::stats::YardageScope;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid team config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Roster name '{0}' contains a reserved separator")]
    ReservedRosterName(String),

    #[error("Roster lists '{0}' more than once")]
    DuplicateRosterName(String),
}

/// Process settings taken from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub play_log_path: PathBuf,
    pub team_config_path: PathBuf,
    pub yardage_scope: YardageScope,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let yardage_scope = match lookup("FLAGSTATS_YARDAGE_SCOPE") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "FLAGSTATS_YARDAGE_SCOPE",
                value,
            })?,
            None => YardageScope::default(),
        };

        Ok(Self {
            bind_addr: lookup("FLAGSTATS_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            play_log_path: lookup("FLAGSTATS_PLAY_LOG")
                .unwrap_or_else(|| "team_stats.csv".to_string())
                .into(),
            team_config_path: lookup("FLAGSTATS_TEAM_CONFIG")
                .unwrap_or_else(|| "team.yaml".to_string())
                .into(),
            yardage_scope,
        })
    }
}

fn default_max_weeks() -> u32 {
    10
}

/// Public facts about the team used in labels and entry validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub team_name: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub roster: Vec<String>,
    #[serde(default = "default_max_weeks")]
    pub max_weeks: u32,
}

impl TeamProfile {
    pub fn is_rostered(&self, player: &str) -> bool {
        self.roster.iter().any(|p| p == player)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCredential {
    pub name: String,
    /// Argon2 PHC string.
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub usernames: HashMap<String, UserCredential>,
}

/// Session signing settings. Other keys in the block (such as the
/// cookie `name`) are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    pub key: String,
    pub expiry_days: i64,
}

/// Contents of `team.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    #[serde(flatten)]
    pub profile: TeamProfile,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    pub cookie: CookieConfig,
}

impl TeamConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: TeamConfig = serde_yaml::from_str(text)?;

        let mut seen = HashSet::new();
        for player in &config.profile.roster {
            if contains_reserved_separator(player) {
                return Err(ConfigError::ReservedRosterName(player.clone()));
            }
            if !seen.insert(player.as_str()) {
                return Err(ConfigError::DuplicateRosterName(player.clone()));
            }
        }

        Ok(config)
    }
}
