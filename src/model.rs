// src/model.rs
//! Typed output of the extraction pipeline.
//!
//! Field names serialize in camelCase so a [`Player`] can be dropped as-is
//! into the persisted tracker state (see `store`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::consts::EXEMPT;

/// Outcome of one game, from the club player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Score {
    Loss,
    Draw,
    Win,
}

impl Score {
    pub fn points(self) -> f64 {
        match self {
            Score::Loss => 0.0,
            Score::Draw => 0.5,
            Score::Win => 1.0,
        }
    }

    pub fn from_points(p: f64) -> Option<Self> {
        if p == 0.0 {
            Some(Score::Loss)
        } else if p == 0.5 {
            Some(Score::Draw)
        } else if p == 1.0 {
            Some(Score::Win)
        } else {
            None
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Loss => s.serialize_u8(0),
            Score::Draw => s.serialize_f64(0.5),
            Score::Win => s.serialize_u8(1),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let p = f64::deserialize(d)?;
        Score::from_points(p)
            .ok_or_else(|| serde::de::Error::custom(format!("score must be 0, 0.5 or 1, got {p}")))
    }
}

/// Who the player faced in a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Opponent {
    /// Seed number (flat grid) or whatever identifier the nested grid shows.
    Id(String),
    /// Bye; scored as a win.
    Exempt,
}

impl From<String> for Opponent {
    fn from(s: String) -> Self {
        if s == EXEMPT { Opponent::Exempt } else { Opponent::Id(s) }
    }
}

impl From<Opponent> for String {
    fn from(o: Opponent) -> Self {
        match o {
            Opponent::Id(s) => s,
            Opponent::Exempt => s!(EXEMPT),
        }
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opponent::Id(s) => f.write_str(s),
            Opponent::Exempt => f.write_str(EXEMPT),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<Opponent>,
}

impl RoundResult {
    pub fn bye(round: u32) -> Self {
        Self { round, score: Score::Win, opponent: Some(Opponent::Exempt) }
    }

    pub fn is_bye(&self) -> bool {
        self.opponent == Some(Opponent::Exempt)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Normalized join key: uppercase, single-spaced.
    pub name: String,
    pub elo: u32,
    pub club: String,
    pub ranking: u32,
    pub results: Vec<RoundResult>,
    /// As printed by the site, not re-derived from `results`.
    pub current_points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buchholz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<u32>,
    /// Manual confirmation slots, one per detected round. Owned by the UI.
    #[serde(default)]
    pub validated: Vec<bool>,
}

impl Player {
    /// Sum of scores for rounds `<= upto_round`.
    pub fn points_upto(&self, upto_round: u32) -> f64 {
        self.results
            .iter()
            .filter(|r| r.round <= upto_round)
            .map(|r| r.score.points())
            .sum()
    }

    pub fn result_for(&self, round: u32) -> Option<&RoundResult> {
        self.results.iter().find(|r| r.round == round)
    }
}

/// Pipeline output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub players: Vec<Player>,
    pub current_round: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStats {
    pub round: u32,
    pub total_points: f64,
    pub player_count: usize,
    pub average_points: f64,
}
