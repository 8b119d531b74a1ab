// src/config/consts.rs

// Net config
pub const FFE_DOMAIN: &str = "echecs.asso.fr";
pub const FFE_BASE: &str = "https://www.echecs.asso.fr/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "fr-FR,fr;q=0.9,en-US;q=0.8,en;q=0.7";
pub const TIMEOUT_SECS: u64 = 20;

// Action codes on Resultats.aspx
pub const ACTION_LIST: &str = "Action=Ls";
pub const ACTION_GRID: &str = "Action=Ga";

// Club
pub const DEFAULT_CLUB: &str = "Hay Chess";

// Roster page (Action=Ls): minimum cells, name column, club column
pub const ROSTER_COMPACT: (usize, usize, usize) = (7, 1, 6);
pub const ROSTER_EXTENDED: (usize, usize, usize) = (8, 2, 7);

// Flat grid (Action=Ga, legacy)
pub const FLAT_MIN_CELLS: usize = 5;
pub const FLAT_RANK_COL: usize = 0;
pub const FLAT_NAME_COL: usize = 1;
pub const FLAT_ELO_COL: usize = 2;

// Nested grid (Action=Ga, current)
pub const NESTED_MARKER: &str = "div.papi_joueur_box";
pub const NESTED_SCORE_COL: usize = 2;
pub const NESTED_OPPONENT_COL: usize = 3;

// Bye
pub const BYE_CODE: &str = "EXE";
pub const EXEMPT: &str = "EXEMPT";

// Local store
pub const DEFAULT_STORE_PATH: &str = ".store/ffe_tracker.json";
pub const DEFAULT_CONFIG_PATH: &str = "ffe_scrape.toml";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 150; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
