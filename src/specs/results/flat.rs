// src/specs/results/flat.rs
// Legacy flat grid: one row per player.
//
//   Pl | Nom | Elo | ... | R 1 | R 2 | ... | Pts | Tr. | Perf
//
// Rank, name and Elo sit at fixed offsets; round, points, tie-break and
// performance columns are found by header label.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::club_member;
use crate::config::consts::{BYE_CODE, FLAT_ELO_COL, FLAT_MIN_CELLS, FLAT_NAME_COL, FLAT_RANK_COL};
use crate::config::options::ParseOptions;
use crate::core::html::{self, cells, text_of};
use crate::core::sanitize::{normalize_name, parse_decimal, parse_integer, parse_points};
use crate::model::{Opponent, Player, RoundResult, Score};
use crate::specs::roster::Roster;

static ROUND_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\s*\d+$").expect("static regex"));

/// `+ 75B`, `-6N`, `= 2`
static RESULT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+\-=])\s*(\d+)\s*([BN])?$").expect("static regex"));

#[derive(Debug, Default, PartialEq, Eq)]
struct Columns {
    rounds: Vec<usize>,
    points: Option<usize>,
    buchholz: Option<usize>,
    performance: Option<usize>,
}

impl Columns {
    fn from_header(labels: &[String]) -> Self {
        let mut cols = Columns::default();
        for (i, label) in labels.iter().enumerate() {
            let t = label.trim();
            if ROUND_LABEL.is_match(t) {
                cols.rounds.push(i);
            }
            match t {
                "Pts" => cols.points = Some(i),
                "Tr." | "Tr" => cols.buchholz = Some(i),
                "Perf" => cols.performance = Some(i),
                _ => {}
            }
        }
        cols
    }

    fn is_grid(&self) -> bool {
        !self.rounds.is_empty() || self.points.is_some()
    }
}

pub(super) fn extract(doc: &Html, roster: &Roster, opts: &ParseOptions) -> Vec<Player> {
    let Some((table, header)) = find_grid(doc) else {
        logd!("Flat grid: no table");
        return Vec::new();
    };

    let header_labels: Vec<String> = cells(header).into_iter().map(text_of).collect();
    let cols = Columns::from_header(&header_labels);
    logd!("Flat grid: {} round columns, {:?}", cols.rounds.len(), cols);

    let tr = html::selector("tr");
    let mut players = Vec::new();
    let mut skipped = 0usize;

    for row in table.select(&tr) {
        if row.id() == header.id() {
            continue;
        }
        let texts: Vec<String> = cells(row).into_iter().map(text_of).collect();
        if texts.len() < FLAT_MIN_CELLS {
            continue;
        }

        let name = normalize_name(&texts[FLAT_NAME_COL]);
        let Some(club) = club_member(roster, &name, &opts.club) else {
            skipped += 1;
            continue;
        };

        let results = cols
            .rounds
            .iter()
            .enumerate()
            .filter_map(|(i, &col)| {
                let cell = texts.get(col)?;
                parse_round_cell(cell, i as u32 + 1)
            })
            .collect();

        let half = &opts.half_point_variants;
        let current_points = cols
            .points
            .and_then(|i| texts.get(i))
            .map(|t| parse_points(t, half))
            .unwrap_or(0.0);
        // A zero tie-break or performance is how the site prints "none yet".
        let buchholz = cols
            .buchholz
            .and_then(|i| texts.get(i))
            .and_then(|t| parse_decimal(&half.repair(t)))
            .filter(|v| *v != 0.0);
        let performance = cols
            .performance
            .and_then(|i| texts.get(i))
            .map(|t| parse_integer(t))
            .filter(|v| *v != 0);

        players.push(Player {
            name,
            elo: parse_integer(&texts[FLAT_ELO_COL]),
            club,
            ranking: parse_integer(&texts[FLAT_RANK_COL]),
            results,
            current_points,
            buchholz,
            performance,
            validated: vec![false; cols.rounds.len()],
        });
    }

    logd!("Flat grid: kept {}, dropped {} (not in club)", players.len(), skipped);
    players
}

/// First table whose header looks like a results grid, else the first table.
fn find_grid(doc: &Html) -> Option<(ElementRef<'_>, ElementRef<'_>)> {
    let table_sel = html::selector("table");
    let mut first: Option<(ElementRef<'_>, ElementRef<'_>)> = None;

    for table in doc.select(&table_sel) {
        let Some(header) = header_row(table) else { continue };
        let labels: Vec<String> = cells(header).into_iter().map(text_of).collect();
        if Columns::from_header(&labels).is_grid() {
            return Some((table, header));
        }
        if first.is_none() {
            first = Some((table, header));
        }
    }
    first
}

/// `<thead>` row, else the first row made of `<th>`, else the first row.
fn header_row(table: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let thead = html::selector("thead tr");
    if let Some(r) = table.select(&thead).next() {
        return Some(r);
    }
    let tr = html::selector("tr");
    table
        .select(&tr)
        .find(|r| cells(*r).iter().any(|c| c.value().name() == "th"))
        .or_else(|| table.select(&tr).next())
}

/// Result-code grammar of a round cell:
/// - `+ 75B` / `- 6N` / `= 2B` → win / loss / draw against seed 75 / 6 / 2;
/// - `EXE`, or `> 91B` (forfeit win) → bye;
/// - empty, `-`, anything else → no game.
pub fn parse_round_cell(cell: &str, round: u32) -> Option<RoundResult> {
    let t = cell.trim();
    if t.is_empty() || t == "-" {
        return None;
    }
    if t == BYE_CODE || t.starts_with('>') {
        return Some(RoundResult::bye(round));
    }

    let caps = RESULT_CODE.captures(t)?;
    let score = match &caps[1] {
        "+" => Score::Win,
        "-" => Score::Loss,
        _ => Score::Draw,
    };
    Some(RoundResult {
        round,
        score,
        opponent: Some(Opponent::Id(s!(&caps[2]))),
    })
}
