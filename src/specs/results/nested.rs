// src/specs/results/nested.rs
// Current grid: one `div.papi_joueur_box` per player, sitting in a cell of an
// outer row together with rank (before) and points / tie-break / perf (after).
// Rounds are sub-rows of a table nested in the box:
//
//   <td>3</td>
//   <td><div class="papi_joueur_box">
//         <b>DOE John</b> 1650 F
//         <table><tr><td>R1</td><td>B</td><td>1</td><td>12</td></tr>...</table>
//       </div></td>
//   <td>2½</td><td>7,5</td><td>1712</td>

use scraper::{ElementRef, Html};

use super::club_member;
use crate::config::consts::{BYE_CODE, EXEMPT, NESTED_MARKER, NESTED_OPPONENT_COL, NESTED_SCORE_COL};
use crate::config::options::ParseOptions;
use crate::core::html::{self, cell_texts, closest, data_cells, next_siblings, prev_siblings, text_of};
use crate::core::sanitize::{HalfPointTable, normalize_name, parse_decimal, parse_integer, parse_points};
use crate::model::{Opponent, Player, RoundResult, Score};
use crate::specs::roster::Roster;

pub(super) fn extract(doc: &Html, roster: &Roster, opts: &ParseOptions) -> Vec<Player> {
    let marker = html::selector(NESTED_MARKER);
    let bold = html::selector("b");
    let tr = html::selector("tr");
    let half = &opts.half_point_variants;

    let mut players = Vec::new();
    let mut skipped = 0usize;

    for player_box in doc.select(&marker) {
        let name_el = player_box.select(&bold).next();
        let name = name_el.map(text_of).map(|t| normalize_name(&t)).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let Some(club) = club_member(roster, &name, &opts.club) else {
            skipped += 1;
            continue;
        };

        let elo = parse_integer(&box_text(player_box, name_el));

        let box_cell = closest(player_box, "td");
        let ranking = box_cell
            .and_then(|td| prev_siblings(td, "td").next())
            .map(|td| parse_integer(&text_of(td)))
            .unwrap_or(0);
        let trailing: Vec<String> = box_cell
            .map(|td| next_siblings(td, "td").map(text_of).collect())
            .unwrap_or_default();

        let current_points = trailing.first().map(|t| parse_points(t, half)).unwrap_or(0.0);
        // Same reading as the flat grid: a zero tie-break means "none yet".
        let buchholz = trailing
            .get(1)
            .and_then(|t| parse_decimal(&half.repair(t)))
            .filter(|v| *v != 0.0);
        let performance = trailing.get(2).map(|t| parse_integer(t)).filter(|v| *v != 0);

        let results: Vec<RoundResult> = player_box
            .select(&tr)
            .filter(|row| !data_cells(*row).is_empty())
            .enumerate()
            .filter_map(|(i, row)| parse_sub_row(&cell_texts(row), i as u32 + 1, half))
            .collect();

        players.push(Player {
            name,
            elo,
            club,
            ranking,
            validated: vec![false; results.len()],
            results,
            current_points,
            buchholz,
            performance,
        });
    }

    logd!("Nested grid: kept {}, dropped {} (not in club)", players.len(), skipped);
    players
}

/// Box text outside the name and the round table, where the rating lives.
fn box_text(player_box: ElementRef<'_>, name_el: Option<ElementRef<'_>>) -> String {
    let mut out = s!();
    for node in player_box.descendants() {
        let Some(text) = node.value().as_text() else { continue };
        let hidden = node
            .ancestors()
            .take_while(|a| a.id() != player_box.id())
            .filter_map(ElementRef::wrap)
            .any(|a| a.value().name() == "table" || name_el.is_some_and(|n| n.id() == a.id()));
        if !hidden {
            out.push_str(text);
            out.push(' ');
        }
    }
    out
}

fn parse_sub_row(cells: &[String], round: u32, half: &HalfPointTable) -> Option<RoundResult> {
    let score = cells.get(NESTED_SCORE_COL)?.trim();
    let opponent = cells.get(NESTED_OPPONENT_COL)?.trim();
    if score.is_empty() && opponent.is_empty() {
        return None;
    }

    if score == BYE_CODE || opponent.eq_ignore_ascii_case(EXEMPT) {
        return Some(RoundResult::bye(round));
    }

    let score = if score == "1" {
        Score::Win
    } else if half.is_half(score) {
        Score::Draw
    } else {
        Score::Loss
    };
    let opponent = (!opponent.is_empty()).then(|| Opponent::Id(s!(opponent)));
    Some(RoundResult { round, score, opponent })
}
