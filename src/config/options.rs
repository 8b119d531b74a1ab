// src/config/options.rs
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::core::HalfPointTable;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub parse: ParseOptions,
    pub fetch: FetchOptions,
    pub store: StoreOptions,
}

/// Everything the extraction pipeline is allowed to know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Compared case-sensitively against the roster page's club column.
    pub club: String,
    pub half_point_variants: HalfPointTable,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            club: s!(DEFAULT_CLUB),
            half_point_variants: HalfPointTable::default(),
        }
    }
}

impl ParseOptions {
    pub fn for_club(club: impl Into<String>) -> Self {
        Self { club: club.into(), ..Self::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    pub workers: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            accept: s!(ACCEPT),
            accept_language: s!(ACCEPT_LANGUAGE),
            timeout_secs: TIMEOUT_SECS,
            workers: WORKERS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub path: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_STORE_PATH) }
    }
}
