// tests/store_roundtrip.rs
use std::fs;
use std::path::PathBuf;

use ffe_scrape::{
    ParseOptions, parse_pages,
    error::StoreError,
    store::{Event, Store, TournamentUpdate},
};

fn tmp_store(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("ffe_store_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p.push("state.json");
    p
}

fn event(name: &str, n: usize) -> Event {
    Event::new(name, (0..n).map(|i| (format!("T{i}"), format!("https://www.echecs.asso.fr/FicheTournoi.aspx?Ref={i}"))))
}

#[test]
fn missing_or_corrupt_file_opens_empty() {
    let path = tmp_store("corrupt");
    assert!(Store::open(&path).events().is_empty());

    fs::write(&path, "{ not json").unwrap();
    let store = Store::open(&path);
    assert!(store.events().is_empty());
    assert!(store.current_event().is_none());
}

#[test]
fn saved_event_survives_reopen_and_becomes_current() {
    let path = tmp_store("reopen");
    let mut store = Store::open(&path);
    let e = event("Printemps", 2);
    let id = e.id.clone();
    store.save_event(e).unwrap();

    let again = Store::open(&path);
    assert_eq!(again.events().len(), 1);
    assert_eq!(again.current_event().map(|e| e.id.as_str()), Some(id.as_str()));
    assert_eq!(again.current_event().unwrap().tournaments.len(), 2);
}

#[test]
fn save_event_upserts_by_id() {
    let path = tmp_store("upsert");
    let mut store = Store::open(&path);
    let mut e = event("A", 1);
    store.save_event(e.clone()).unwrap();
    e.name = "A renamed".into();
    store.save_event(e).unwrap();
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].name, "A renamed");
}

#[test]
fn delete_event_moves_current_and_drops_validations() {
    let path = tmp_store("delete");
    let mut store = Store::open(&path);

    let mut first = event("First", 1);
    first.id = "evt_1".into();
    first.tournaments[0].id = "trn_1_0".into();
    let mut second = event("Second", 1);
    second.id = "evt_2".into();
    second.tournaments[0].id = "trn_2_0".into();

    store.save_event(first).unwrap();
    store.save_event(second).unwrap();
    store.set_validation("trn_2_0", "DOE JOHN", 1, true).unwrap();
    store.set_validation("trn_1_0", "DOE JOHN", 1, true).unwrap();

    assert!(store.delete_event("evt_2").unwrap());
    assert_eq!(store.current_event().map(|e| e.id.as_str()), Some("evt_1"));
    assert!(!store.validation("trn_2_0", "DOE JOHN", 1));
    assert!(store.validation("trn_1_0", "DOE JOHN", 1));
    assert!(!store.delete_event("evt_2").unwrap());

    assert!(store.delete_event("evt_1").unwrap());
    assert!(store.current_event().is_none());
}

#[test]
fn set_current_event_requires_existing_id() {
    let path = tmp_store("current");
    let mut store = Store::open(&path);
    let err = store.set_current_event("evt_nope").unwrap_err();
    assert!(matches!(err, StoreError::EventNotFound(_)));
    assert_eq!(err.to_string(), "Event with id evt_nope not found");
}

#[test]
fn tournament_crud_and_search() {
    let path = tmp_store("crud");
    let mut store = Store::open(&path);
    let e = event("Open de Nantes", 0);
    let eid = e.id.clone();
    store.save_event(e).unwrap();

    let t = store.create_tournament(&eid, "Blitz A", "https://www.echecs.asso.fr/FicheTournoi.aspx?Ref=7").unwrap();
    assert!(t.players.is_empty());
    assert!(store.create_tournament("evt_nope", "x", "y").is_err());

    let before = t.last_update;
    let updated = store
        .update_tournament(&t.id, TournamentUpdate { name: Some("Blitz B".into()), ..Default::default() })
        .unwrap();
    assert_eq!(updated.name, "Blitz B");
    assert_eq!(updated.url, t.url);
    assert!(updated.last_update >= before);

    assert_eq!(store.search_tournaments("blitz").len(), 1);
    assert_eq!(store.search_tournaments("NANTES").len(), 1);
    assert!(store.search_tournaments("rapide").is_empty());

    let found = store.find_tournament(&t.id).unwrap();
    assert_eq!(found.event_id, eid);

    assert!(matches!(
        store.update_tournament("trn_nope", TournamentUpdate::default()),
        Err(StoreError::TournamentNotFound(_))
    ));

    store.set_validation(&t.id, "X", 2, true).unwrap();
    assert!(store.delete_tournament(&t.id).unwrap());
    assert!(!store.validation(&t.id, "X", 2));
    assert!(!store.delete_tournament(&t.id).unwrap());
}

#[test]
fn players_summary_and_export_import() {
    let path = tmp_store("summary");
    let mut store = Store::open(&path);
    let e = event("Printemps", 1);
    let tid = e.tournaments[0].id.clone();
    store.save_event(e).unwrap();

    let x = parse_pages(
        include_str!("fixtures/roster_ls.html"),
        include_str!("fixtures/grid_flat.html"),
        &ParseOptions::default(),
    );
    let mut players = x.players;
    players[0].validated[0] = true;
    store.update_tournament_players(&tid, players).unwrap();

    let sum = store.tournament_summary(&tid, "Hay Chess").unwrap();
    assert_eq!(sum.total_players, 3);
    assert_eq!(sum.club_player_count, 3);
    assert_eq!(sum.total_points, 3.0);
    assert_eq!(sum.average_points, 1.0);
    assert_eq!(sum.validated_rounds_count, 1);
    assert!(store.tournament_summary("trn_nope", "Hay Chess").is_none());

    let json = store.export_json().unwrap();
    assert!(json.contains("\"currentEventId\""));
    assert!(json.contains("\"currentPoints\""));

    let other = tmp_store("summary_import");
    let mut restored = Store::open(&other);
    assert!(restored.import_json("[1, 2").is_err());
    assert!(restored.events().is_empty());
    restored.import_json(&json).unwrap();
    assert_eq!(restored.data(), store.data());
    assert_eq!(Store::open(&other).data(), store.data());
}

#[test]
fn clear_removes_everything() {
    let path = tmp_store("clear");
    let mut store = Store::open(&path);
    store.save_event(event("E", 1)).unwrap();
    assert!(path.exists());
    store.clear().unwrap();
    assert!(!path.exists());
    assert!(store.events().is_empty());
    store.clear().unwrap();
}
