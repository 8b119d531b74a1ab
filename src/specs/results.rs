// src/specs/results.rs
//! Scraping *spec* for the results grid (`Resultats.aspx?...&Action=Ga`).
//!
//! The federation serves two unrelated markups for the same "American grid":
//! - [`GridLayout::Flat`]: legacy, one `<tr>` per player, round columns found by
//!   their `R N` header label (see `flat.rs`);
//! - [`GridLayout::Nested`]: current, one `div.papi_joueur_box` per player with
//!   one nested sub-row per round (see `nested.rs`).
//!
//! Both strategies share the normalizer and emit the same [`Player`] shape.
//! Rows whose normalized name is missing from the roster, or whose club is not
//! the configured one, are dropped whole.

mod flat;
mod nested;

use scraper::Html;

use crate::config::consts::NESTED_MARKER;
use crate::config::options::ParseOptions;
use crate::core::html;
use crate::model::Player;
use super::roster::Roster;

pub use flat::parse_round_cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridLayout {
    Flat,
    Nested,
}

impl GridLayout {
    /// Structural sniff: the nested marker container decides.
    pub fn detect(doc: &Html) -> Self {
        let marker = html::selector(NESTED_MARKER);
        if doc.select(&marker).next().is_some() {
            GridLayout::Nested
        } else {
            GridLayout::Flat
        }
    }
}

/// Parse the results grid, auto-detecting its layout.
pub fn extract_results(doc: &str, roster: &Roster, opts: &ParseOptions) -> Vec<Player> {
    let parsed = html::parse(doc);
    let layout = GridLayout::detect(&parsed);
    extract_from(&parsed, layout, roster, opts)
}

/// Parse the results grid with a known layout.
pub fn extract_results_with(layout: GridLayout, doc: &str, roster: &Roster, opts: &ParseOptions) -> Vec<Player> {
    extract_from(&html::parse(doc), layout, roster, opts)
}

pub(crate) fn extract_from(doc: &Html, layout: GridLayout, roster: &Roster, opts: &ParseOptions) -> Vec<Player> {
    let players = match layout {
        GridLayout::Flat => flat::extract(doc, roster, opts),
        GridLayout::Nested => nested::extract(doc, roster, opts),
    };
    logd!("Results: {:?} grid → {} players of {:?}", layout, players.len(), opts.club);
    players
}

/// Club of `name` if it is a member of the target club.
fn club_member(roster: &Roster, name: &str, club: &str) -> Option<String> {
    match roster.get(name) {
        Some(c) if c == club => Some(c.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::from([
            (s!("ALPHA ANN"), s!("Hay Chess")),
            (s!("BETA BOB"), s!("hay chess")),
        ])
    }

    #[test]
    fn detects_layout_from_marker() {
        let nested = html::parse(r#"<table><tr><td><div class="papi_joueur_box"><b>X</b></div></td></tr></table>"#);
        let flat = html::parse(r#"<table><tr><th>R 1</th></tr></table>"#);
        assert_eq!(GridLayout::detect(&nested), GridLayout::Nested);
        assert_eq!(GridLayout::detect(&flat), GridLayout::Flat);
        assert_eq!(GridLayout::detect(&html::parse("")), GridLayout::Flat);
    }

    #[test]
    fn club_match_is_case_sensitive() {
        let r = roster();
        assert_eq!(club_member(&r, "ALPHA ANN", "Hay Chess").as_deref(), Some("Hay Chess"));
        assert_eq!(club_member(&r, "BETA BOB", "Hay Chess"), None);
        assert_eq!(club_member(&r, "NOBODY", "Hay Chess"), None);
    }

    #[test]
    fn forced_layout_on_wrong_markup_yields_nothing() {
        let doc = r#"<table><thead><tr><th>Pl</th><th>Nom</th><th>Elo</th><th>R 1</th><th>Pts</th></tr></thead>
            <tbody><tr><td>1</td><td>ALPHA Ann</td><td>1500</td><td>+ 2B</td><td>1</td></tr></tbody></table>"#;
        let opts = ParseOptions::default();
        assert_eq!(extract_results_with(GridLayout::Flat, doc, &roster(), &opts).len(), 1);
        assert!(extract_results_with(GridLayout::Nested, doc, &roster(), &opts).is_empty());
    }
}
