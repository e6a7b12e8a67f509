use core::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "secret-santa.toml";
pub const ENV_PREFIX: &str = "SECRET_SANTA_";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupConfig {
    pub name: String,
    pub members: Vec<String>,
    /// Members that may not give inside the group. All members when absent.
    #[serde(default)]
    pub restricted_givers: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `name,address` per line.
    pub roster: PathBuf,
    /// Past pairings, read if it exists.
    pub history: PathBuf,
    pub output: Option<PathBuf>,
    pub draws_per_participant: usize,
    pub max_restarts: usize,
    pub seed: Option<u64>,
    #[serde(default)]
    pub exclusions: Vec<(String, String)>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("pairings_list.txt"),
            history: PathBuf::from("pairings.json"),
            output: None,
            draws_per_participant: 50,
            max_restarts: 100,
            seed: None,
            exclusions: Vec::new(),
            groups: Vec::new(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn get_config() -> Result<Config, ConfigError> {
    get_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

pub fn get_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment(path).extract()?)
}
