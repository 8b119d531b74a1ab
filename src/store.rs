// src/store.rs
//! Persisted tracker state: events, their tournaments, and manual round
//! validations, kept in one JSON file.
//!
//! ```text
//! { currentEventId, events: [{ id, name, createdAt, tournaments: [
//!     { id, name, url, lastUpdate, players } ] }],
//!   validations: { tournamentId: { playerName: { "round_N": bool } } } }
//! ```
//!
//! Every mutating call writes the file back before returning.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::Player;

/// tournament id → player name → `round_N` → validated
pub type ValidationState = BTreeMap<String, BTreeMap<String, BTreeMap<String, bool>>>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageData {
    pub current_event_id: String,
    pub events: Vec<Event>,
    pub validations: ValidationState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

impl Event {
    /// New event with one empty tournament per `(name, url)`.
    pub fn new<I>(name: &str, tournaments: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let now = Utc::now();
        let ts = now.timestamp_millis();
        let tournaments = tournaments
            .into_iter()
            .enumerate()
            .map(|(i, (name, url))| Tournament {
                id: format!("trn_{ts}_{i}"),
                name,
                url,
                last_update: now,
                players: Vec::new(),
            })
            .collect();
        Self { id: format!("evt_{ts}"), name: s!(name), created_at: now, tournaments }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub url: String,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// A tournament together with the event that owns it.
#[derive(Clone, Copy, Debug)]
pub struct TournamentEntry<'a> {
    pub event_id: &'a str,
    pub event_name: &'a str,
    pub tournament: &'a Tournament,
}

/// Partial update for [`Store::update_tournament`]; `None` keeps the field.
#[derive(Clone, Debug, Default)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub players: Option<Vec<Player>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub tournament_id: String,
    pub tournament_name: String,
    pub event_name: String,
    pub total_players: usize,
    pub club_player_count: usize,
    pub total_points: f64,
    pub average_points: f64,
    pub last_update: DateTime<Utc>,
    pub validated_rounds_count: usize,
}

pub fn round_key(round: u32) -> String {
    format!("round_{round}")
}

pub struct Store {
    path: PathBuf,
    data: StorageData,
}

impl Store {
    /// Open the store at `path`. A missing or unreadable file is an empty state.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = read_state(&path);
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StorageData {
        &self.data
    }

    /// Write the current state to disk, creating parent directories.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        logd!("Store: saved {} events to {}", self.data.events.len(), self.path.display());
        Ok(())
    }

    // ---- events ----------------------------------------------------------

    pub fn events(&self) -> &[Event] {
        &self.data.events
    }

    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.data.events.iter().find(|e| e.id == event_id)
    }

    pub fn current_event(&self) -> Option<&Event> {
        if self.data.current_event_id.is_empty() {
            return None;
        }
        self.event(&self.data.current_event_id)
    }

    pub fn set_current_event(&mut self, event_id: &str) -> Result<(), StoreError> {
        if self.event(event_id).is_none() {
            return Err(StoreError::EventNotFound(s!(event_id)));
        }
        self.data.current_event_id = s!(event_id);
        self.save()
    }

    /// Insert or replace by id; the saved event becomes current.
    pub fn save_event(&mut self, event: Event) -> Result<(), StoreError> {
        let id = event.id.clone();
        match self.data.events.iter_mut().find(|e| e.id == id) {
            Some(slot) => *slot = event,
            None => self.data.events.push(event),
        }
        self.data.current_event_id = id;
        self.save()
    }

    /// Remove an event and the validations of its tournaments. If it was
    /// current, the first remaining event (or none) becomes current.
    pub fn delete_event(&mut self, event_id: &str) -> Result<bool, StoreError> {
        let Some(idx) = self.data.events.iter().position(|e| e.id == event_id) else {
            return Ok(false);
        };
        let removed = self.data.events.remove(idx);
        for t in &removed.tournaments {
            self.data.validations.remove(&t.id);
        }
        if self.data.current_event_id == event_id {
            self.data.current_event_id = self.data.events.first().map(|e| e.id.clone()).unwrap_or_default();
        }
        self.save()?;
        Ok(true)
    }

    // ---- tournaments -----------------------------------------------------

    pub fn tournaments(&self) -> impl Iterator<Item = TournamentEntry<'_>> {
        self.data.events.iter().flat_map(|e| {
            e.tournaments.iter().map(move |t| TournamentEntry {
                event_id: &e.id,
                event_name: &e.name,
                tournament: t,
            })
        })
    }

    pub fn find_tournament(&self, tournament_id: &str) -> Option<TournamentEntry<'_>> {
        self.tournaments().find(|t| t.tournament.id == tournament_id)
    }

    /// Case-insensitive substring match on tournament or event name.
    pub fn search_tournaments(&self, query: &str) -> Vec<TournamentEntry<'_>> {
        let q = query.to_lowercase();
        self.tournaments()
            .filter(|t| t.tournament.name.to_lowercase().contains(&q) || t.event_name.to_lowercase().contains(&q))
            .collect()
    }

    pub fn create_tournament(&mut self, event_id: &str, name: &str, url: &str) -> Result<Tournament, StoreError> {
        let event = self
            .data
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| StoreError::EventNotFound(s!(event_id)))?;

        let now = Utc::now();
        let t = Tournament {
            id: format!("trn_{}_{}", now.timestamp_millis(), event.tournaments.len()),
            name: s!(name),
            url: s!(url),
            last_update: now,
            players: Vec::new(),
        };
        event.tournaments.push(t.clone());
        self.save()?;
        Ok(t)
    }

    /// Apply `update` and refresh `lastUpdate`.
    pub fn update_tournament(&mut self, tournament_id: &str, update: TournamentUpdate) -> Result<Tournament, StoreError> {
        let t = self
            .data
            .events
            .iter_mut()
            .flat_map(|e| e.tournaments.iter_mut())
            .find(|t| t.id == tournament_id)
            .ok_or_else(|| StoreError::TournamentNotFound(s!(tournament_id)))?;

        if let Some(name) = update.name {
            t.name = name;
        }
        if let Some(url) = update.url {
            t.url = url;
        }
        if let Some(players) = update.players {
            t.players = players;
        }
        t.last_update = Utc::now();
        let out = t.clone();
        self.save()?;
        Ok(out)
    }

    pub fn update_tournament_players(&mut self, tournament_id: &str, players: Vec<Player>) -> Result<Tournament, StoreError> {
        self.update_tournament(tournament_id, TournamentUpdate { players: Some(players), ..Default::default() })
    }

    pub fn delete_tournament(&mut self, tournament_id: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        for event in &mut self.data.events {
            let before = event.tournaments.len();
            event.tournaments.retain(|t| t.id != tournament_id);
            if event.tournaments.len() < before {
                removed = true;
                break;
            }
        }
        if removed {
            self.data.validations.remove(tournament_id);
            self.save()?;
        }
        Ok(removed)
    }

    /// Totals for one tournament. `club` matches case-insensitively as a substring.
    pub fn tournament_summary(&self, tournament_id: &str, club: &str) -> Option<TournamentSummary> {
        let entry = self.find_tournament(tournament_id)?;
        let t = entry.tournament;
        let needle = club.to_lowercase();
        let club_players: Vec<&Player> = t.players.iter().filter(|p| p.club.to_lowercase().contains(&needle)).collect();

        let total_points: f64 = club_players.iter().map(|p| p.current_points).sum();
        let average_points = if club_players.is_empty() {
            0.0
        } else {
            (total_points / club_players.len() as f64 * 100.0).round() / 100.0
        };
        let validated_rounds_count = t.players.iter().flat_map(|p| p.validated.iter()).filter(|v| **v).count();

        Some(TournamentSummary {
            tournament_id: t.id.clone(),
            tournament_name: t.name.clone(),
            event_name: s!(entry.event_name),
            total_players: t.players.len(),
            club_player_count: club_players.len(),
            total_points,
            average_points,
            last_update: t.last_update,
            validated_rounds_count,
        })
    }

    // ---- validations -----------------------------------------------------

    pub fn validations(&self) -> &ValidationState {
        &self.data.validations
    }

    pub fn set_validation(&mut self, tournament_id: &str, player: &str, round: u32, valid: bool) -> Result<(), StoreError> {
        self.data
            .validations
            .entry(s!(tournament_id))
            .or_default()
            .entry(s!(player))
            .or_default()
            .insert(round_key(round), valid);
        self.save()
    }

    pub fn validation(&self, tournament_id: &str, player: &str, round: u32) -> bool {
        self.data
            .validations
            .get(tournament_id)
            .and_then(|by_player| by_player.get(player))
            .and_then(|rounds| rounds.get(&round_key(round)))
            .copied()
            .unwrap_or(false)
    }

    // ---- whole state -----------------------------------------------------

    /// Drop everything, file included.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.data = StorageData::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// Replace the whole state. Invalid JSON leaves the store untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), StoreError> {
        let data: StorageData = serde_json::from_str(json)?;
        self.data = data;
        self.save()
    }
}

fn read_state(path: &Path) -> StorageData {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                logw!("Store: cannot read {}: {}", path.display(), e);
            }
            return StorageData::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(e) => {
            logw!("Store: {} is not valid state ({}), starting empty", path.display(), e);
            StorageData::default()
        }
    }
}
