// src/specs/roster.rs
//! Scraping *spec* for the roster page (`Resultats.aspx?...&Action=Ls`).
//!
//! Purpose:
//! - Build the `normalized name → club` lookup used to filter the results grid.
//!
//! Layouts seen in the wild:
//! - **Compact**: `N° | Nom | Elo | Cat. | Fédé | Ligue | Club` (7 cells).
//! - **Extended**: an extra leading column pushes name to 2 and club to 7 (8 cells).
//!
//! The layout is picked from row width: Extended when most data rows carry 8
//! cells, else Compact, falling back to the other when it yields nothing.
//! Rows with too few cells (headers, separators, page chrome) are skipped.

use std::collections::HashMap;

use scraper::Html;

use crate::config::consts::{ROSTER_COMPACT, ROSTER_EXTENDED};
use crate::core::html::{self, cell_texts};
use crate::core::sanitize::normalize_name;

pub type Roster = HashMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterLayout {
    Compact,
    Extended,
}

impl RosterLayout {
    /// (minimum cells, name column, club column)
    fn offsets(self) -> (usize, usize, usize) {
        match self {
            RosterLayout::Compact => ROSTER_COMPACT,
            RosterLayout::Extended => ROSTER_EXTENDED,
        }
    }
}

/// Parse the roster page, auto-detecting the column layout.
pub fn extract_roster(doc: &str) -> Roster {
    let rows = all_rows(&html::parse(doc));

    let preferred = layout_by_width(&rows);
    let (map, populated) = collect(&rows, preferred);
    logd!("Roster: {:?} layout by row width → {} populated rows", preferred, populated);
    if populated > 0 {
        return map;
    }

    let other = match preferred {
        RosterLayout::Compact => RosterLayout::Extended,
        RosterLayout::Extended => RosterLayout::Compact,
    };
    let (map, populated) = collect(&rows, other);
    logd!("Roster: falling back to {:?} → {} populated rows", other, populated);
    map
}

/// Extended when most rows wide enough for any layout are wide enough for it.
/// An 8-cell row also passes the Compact minimum, so counts alone cannot decide.
fn layout_by_width(rows: &[Vec<String>]) -> RosterLayout {
    let (compact_min, _, _) = RosterLayout::Compact.offsets();
    let (extended_min, _, _) = RosterLayout::Extended.offsets();
    let candidates = rows.iter().filter(|r| r.len() >= compact_min).count();
    let wide = rows.iter().filter(|r| r.len() >= extended_min).count();
    if wide * 2 > candidates {
        RosterLayout::Extended
    } else {
        RosterLayout::Compact
    }
}

/// Parse the roster page with a fixed layout.
pub fn extract_roster_with(doc: &str, layout: RosterLayout) -> Roster {
    collect(&all_rows(&html::parse(doc)), layout).0
}

fn all_rows(doc: &Html) -> Vec<Vec<String>> {
    let tr = html::selector("tr");
    doc.select(&tr).map(cell_texts).collect()
}

fn collect(rows: &[Vec<String>], layout: RosterLayout) -> (Roster, usize) {
    let (min_cells, name_col, club_col) = layout.offsets();
    let mut map = Roster::new();
    let mut populated = 0usize;

    for cells in rows {
        if cells.len() < min_cells {
            continue;
        }
        let name = normalize_name(&cells[name_col]);
        let club = cells[club_col].trim();
        if name.is_empty() || club.is_empty() {
            continue;
        }
        populated += 1;
        // Last write wins on duplicate names.
        map.insert(name, s!(club));
    }

    (map, populated)
}
