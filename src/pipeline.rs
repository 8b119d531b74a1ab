// src/pipeline.rs
//! Two HTML documents in, club players and current round out.
//! Pure and synchronous; fetching is someone else's job.

use crate::config::options::ParseOptions;
use crate::core::html;
use crate::model::Extraction;
use crate::specs::results::{self, GridLayout};
use crate::specs::roster::extract_roster;
use crate::stats::detect_current_round;

pub fn parse_pages(html_roster: &str, html_results: &str, opts: &ParseOptions) -> Extraction {
    let roster = extract_roster(html_roster);

    let doc = html::parse(html_results);
    let layout = GridLayout::detect(&doc);
    let players = results::extract_from(&doc, layout, &roster, opts);

    let current_round = detect_current_round(&players);
    logd!(
        "Pipeline: roster {} names, {} club players, round {}",
        roster.len(),
        players.len(),
        current_round
    );
    Extraction { players, current_round }
}
