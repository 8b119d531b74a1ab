// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific extraction for the federation's tournament pages. Each spec
//! focuses on one page (`Action=Ls`, `Action=Ga`) and encodes *where the data
//! lives in the HTML* and *how to read it tolerantly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of an already-fetched document (no I/O).
//! - **Layout detection**: the roster has two column offsets, the results grid
//!   has two unrelated markups; the spec picks one and says so at debug level.
//! - **Tolerant extraction** through `core::html` (direct-child cells, sibling
//!   walks) and `core::sanitize` (names, integers, half points).
//!
//! ## What does **not** live here
//! - Fetching (`core::net`, `scrape`), persistence (`store`), aggregation
//!   (`stats`), or the two-page orchestration (`pipeline`).
//!
//! ## Conventions & invariants
//! - Names pass through `normalize_name` on both pages; the roster is the only
//!   club filter.
//! - A malformed cell degrades to 0 or to a missing round, never to an error.
//! - Specs are tested **offline** against inline HTML snippets and the
//!   fixtures under `tests/fixtures/`.
//!
//! ## Current specs
//! - `roster`: normalized name → club.
//! - `results`: club players with per-round outcomes, flat or nested grid.
pub mod results;
pub mod roster;

pub use results::{GridLayout, extract_results, extract_results_with};
pub use roster::{Roster, RosterLayout, extract_roster, extract_roster_with};
