// src/stats.rs
//! Round detection and club aggregates over extracted players.

use std::cmp::Ordering;

use crate::model::{ClubStats, Player};

/// Highest round number present in any player's results, 0 if none.
pub fn detect_current_round(players: &[Player]) -> u32 {
    players
        .iter()
        .flat_map(|p| p.results.iter().map(|r| r.round))
        .max()
        .unwrap_or(0)
}

/// Club total and average of points scored in rounds `<= upto_round`.
/// Derived from `results`, not from the site-reported totals.
pub fn compute_club_stats(players: &[Player], upto_round: u32) -> ClubStats {
    let total_points: f64 = players.iter().map(|p| p.points_upto(upto_round)).sum();
    let player_count = players.len();
    let average_points = if player_count == 0 {
        0.0
    } else {
        round2(total_points / player_count as f64)
    };
    ClubStats { round: upto_round, total_points, player_count, average_points }
}

/// Players ordered by points up to `upto_round` (desc), then by name.
pub fn standings(players: &[Player], upto_round: u32) -> Vec<(&Player, f64)> {
    let mut rows: Vec<(&Player, f64)> = players.iter().map(|p| (p, p.points_upto(upto_round))).collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.name.cmp(&b.0.name))
    });
    rows
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoundResult, Score};

    fn player(name: &str, results: &[(u32, Score)]) -> Player {
        Player {
            name: s!(name),
            elo: 0,
            club: s!("Hay Chess"),
            ranking: 0,
            results: results
                .iter()
                .map(|&(round, score)| RoundResult { round, score, opponent: None })
                .collect(),
            current_points: 0.0,
            buchholz: None,
            performance: None,
            validated: vec![],
        }
    }

    #[test]
    fn current_round_is_max_across_players() {
        let ps = [
            player("A", &[(1, Score::Win), (3, Score::Loss)]),
            player("B", &[(2, Score::Draw)]),
        ];
        assert_eq!(detect_current_round(&ps), 3);
        assert_eq!(detect_current_round(&[]), 0);
        assert_eq!(detect_current_round(&[player("C", &[])]), 0);
    }

    #[test]
    fn club_stats_two_players_first_round() {
        let ps = [player("A", &[(1, Score::Win)]), player("B", &[(1, Score::Draw)])];
        let s = compute_club_stats(&ps, 1);
        assert_eq!(s, ClubStats { round: 1, total_points: 1.5, player_count: 2, average_points: 0.75 });
    }

    #[test]
    fn club_stats_empty_and_rounding() {
        assert_eq!(compute_club_stats(&[], 5).average_points, 0.0);
        let ps = [
            player("A", &[(1, Score::Win)]),
            player("B", &[]),
            player("C", &[]),
        ];
        assert_eq!(compute_club_stats(&ps, 1).average_points, 0.33);
        assert_eq!(compute_club_stats(&ps, 0).total_points, 0.0);
    }

    #[test]
    fn standings_order_by_points_then_name() {
        let ps = [
            player("ZED", &[(1, Score::Win)]),
            player("AMY", &[(1, Score::Win)]),
            player("BOB", &[(1, Score::Draw), (2, Score::Win)]),
        ];
        let names: Vec<&str> = standings(&ps, 1).iter().map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(names, vec!["AMY", "ZED", "BOB"]);
        let names: Vec<&str> = standings(&ps, 2).iter().map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(names, vec!["BOB", "AMY", "ZED"]);
    }
}
