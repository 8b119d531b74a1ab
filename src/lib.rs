// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod model;
pub mod urls;
pub mod specs;
pub mod stats;
pub mod pipeline;

pub mod progress;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::options::{AppOptions, ParseOptions};
pub use model::{ClubStats, Extraction, Opponent, Player, RoundResult, Score};
pub use pipeline::parse_pages;
pub use stats::{compute_club_stats, detect_current_round};
pub use urls::{derive_list_url, derive_results_url};
