use std::path::PathBuf;

use secret_santa_config::ConfigError;
use secret_santa_pairing::{HistoryError, PairingError, RosterError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history error: {0}")]
    History(#[from] HistoryError),
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("pairing error: {0}")]
    Pairing(#[from] PairingError),
}
