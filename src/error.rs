// src/error.rs
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Only echecs.asso.fr URLs are allowed: {0}")]
    ForeignUrl(String),

    #[error("Failed to fetch FFE page: {status} {reason} ({url})")]
    Status { url: String, status: u16, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Event with id {0} not found")]
    EventNotFound(String),

    #[error("Tournament with id {0} not found")]
    TournamentNotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
