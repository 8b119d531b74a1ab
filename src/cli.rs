// src/cli.rs
use std::{fs, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    config::{self, consts::DEFAULT_CONFIG_PATH, options::AppOptions},
    log,
    model::{Extraction, Player},
    pipeline::parse_pages,
    progress::Progress,
    scrape::{self, Target},
    stats::{compute_club_stats, standings},
    store::{Event, Store},
    urls::{derive_urls, tournament_id},
};

#[derive(Parser, Debug)]
#[command(name = "ffe_scrape", version, about = "Club results from echecs.asso.fr tournament pages")]
pub struct Cli {
    /// -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, global = true, env = "FFE_SCRAPE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Target club, exact spelling of the roster's club column
    #[arg(long, global = true)]
    pub club: Option<String>,

    /// JSON state file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the roster and results URLs derived from a tournament URL
    Urls { url: String },

    /// Parse two saved pages (roster, results grid)
    Parse {
        roster: PathBuf,
        results: PathBuf,
        #[arg(long)]
        round: Option<u32>,
        #[arg(long)]
        json: bool,
    },

    /// Fetch and parse one tournament
    Fetch {
        url: String,
        #[arg(long)]
        round: Option<u32>,
        #[arg(long)]
        json: bool,
    },

    /// Club stats of a stored tournament
    Stats {
        tournament: String,
        #[arg(long)]
        round: Option<u32>,
    },

    /// Manage stored events
    Event {
        #[command(subcommand)]
        action: EventCommand,
    },

    /// Mark a round of a player as checked (or not, with --unset)
    Validate {
        tournament: String,
        player: String,
        round: u32,
        #[arg(long)]
        unset: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    List,
    /// New event with one tournament per URL; becomes current
    Create {
        name: String,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Switch the current event
    Use { id: String },
    Delete { id: String },
    /// Scrape every tournament of an event (current by default) and store the players
    Refresh { id: Option<String> },
    Search { query: String },
    Export { out: Option<PathBuf> },
    Import { file: PathBuf },
    Clear,
}

pub fn run() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    log::init(cli.verbose);

    let mut opts = config::load(&cli.config).wrap_err_with(|| format!("loading {}", cli.config.display()))?;
    if let Some(club) = cli.club {
        opts.parse.club = club;
    }
    if let Some(path) = cli.store {
        opts.store.path = path;
    }
    logd!("Options: {:?}", opts);

    match cli.command {
        Command::Urls { url } => {
            let (list, results) = derive_urls(&url);
            println!("list:    {list}");
            println!("results: {results}");
        }
        Command::Parse { roster, results, round, json } => {
            let html_roster = fs::read_to_string(&roster).wrap_err_with(|| format!("reading {}", roster.display()))?;
            let html_results = fs::read_to_string(&results).wrap_err_with(|| format!("reading {}", results.display()))?;
            let x = parse_pages(&html_roster, &html_results, &opts.parse);
            print_extraction(&x, round, json)?;
        }
        Command::Fetch { url, round, json } => {
            let x = scrape::fetch_tournament(&url, &opts)?;
            print_extraction(&x, round, json)?;
        }
        Command::Stats { tournament, round } => {
            let store = Store::open(&opts.store.path);
            let entry = store
                .find_tournament(&tournament)
                .ok_or_else(|| eyre!("Tournament with id {tournament} not found"))?;
            let t = entry.tournament;
            println!("{} / {} (updated {})", entry.event_name, t.name, t.last_update.format("%Y-%m-%d %H:%M"));
            print_report(&t.players, round);
            if let Some(sum) = store.tournament_summary(&t.id, &opts.parse.club) {
                println!("validated rounds: {}", sum.validated_rounds_count);
            }
        }
        Command::Event { action } => run_event(action, &opts)?,
        Command::Validate { tournament, player, round, unset } => {
            let mut store = Store::open(&opts.store.path);
            if store.find_tournament(&tournament).is_none() {
                bail!("Tournament with id {tournament} not found");
            }
            store.set_validation(&tournament, &player, round, !unset)?;
            println!("{tournament} {player} round {round}: {}", if unset { "unchecked" } else { "checked" });
        }
    }
    Ok(())
}

fn run_event(action: EventCommand, opts: &AppOptions) -> Result<()> {
    let mut store = Store::open(&opts.store.path);

    match action {
        EventCommand::List => {
            let current = store.current_event().map(|e| e.id.clone()).unwrap_or_default();
            for e in store.events() {
                let mark = if e.id == current { "*" } else { " " };
                println!("{mark} {}  {}  ({} tournaments)", e.id, e.name, e.tournaments.len());
                for t in &e.tournaments {
                    println!("      {}  {}  {} players", t.id, t.name, t.players.len());
                }
            }
        }
        EventCommand::Create { name, urls } => {
            let event = Event::new(&name, urls.into_iter().map(|u| (tournament_label(&u), u)));
            println!("{}", event.id);
            store.save_event(event)?;
        }
        EventCommand::Use { id } => store.set_current_event(&id)?,
        EventCommand::Delete { id } => {
            if !store.delete_event(&id)? {
                bail!("Event with id {id} not found");
            }
        }
        EventCommand::Refresh { id } => {
            let event = match id {
                Some(id) => store.event(&id).ok_or_else(|| eyre!("Event with id {id} not found"))?,
                None => store.current_event().ok_or_else(|| eyre!("No current event"))?,
            };
            let ids: Vec<String> = event.tournaments.iter().map(|t| t.id.clone()).collect();
            let targets: Vec<Target> = event
                .tournaments
                .iter()
                .map(|t| Target { name: t.name.clone(), url: t.url.clone() })
                .collect();

            let mut progress = StderrProgress::default();
            let collected = scrape::collect_event(&targets, opts, Some(&mut progress as &mut dyn Progress))?;

            for c in collected {
                match c.result {
                    Ok(x) => {
                        store.update_tournament_players(&ids[c.index], x.players)?;
                    }
                    Err(e) => eprintln!("{}: {e}", c.target.name),
                }
            }
        }
        EventCommand::Search { query } => {
            for t in store.search_tournaments(&query) {
                println!("{}  {}  [{}]", t.tournament.id, t.tournament.name, t.event_name);
            }
        }
        EventCommand::Export { out } => {
            let json = store.export_json()?;
            match out {
                Some(path) => fs::write(&path, json).wrap_err_with(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        EventCommand::Import { file } => {
            let json = fs::read_to_string(&file).wrap_err_with(|| format!("reading {}", file.display()))?;
            store.import_json(&json).wrap_err("importing state")?;
        }
        EventCommand::Clear => store.clear()?,
    }
    Ok(())
}

fn tournament_label(url: &str) -> String {
    match tournament_id(url) {
        Some(id) => format!("Tournoi {id}"),
        None => s!(url),
    }
}

fn print_extraction(x: &Extraction, round: Option<u32>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(x)?);
        return Ok(());
    }
    println!("current round: {}", x.current_round);
    print_report(&x.players, round.or(Some(x.current_round)));
    Ok(())
}

fn print_report(players: &[Player], round: Option<u32>) {
    let upto = round.unwrap_or_else(|| crate::stats::detect_current_round(players));
    for (p, pts) in standings(players, upto) {
        let rounds: Vec<String> = p
            .results
            .iter()
            .filter(|r| r.round <= upto)
            .map(|r| format!("R{}:{}", r.round, r.score.points()))
            .collect();
        println!("{:>4}  {:<32} {:>4}  {:>4.1} / {:>4.1}  {}", p.ranking, p.name, p.elo, pts, p.current_points, rounds.join(" "));
    }
    let s = compute_club_stats(players, upto);
    println!(
        "round {}: {} players, {} points, {} average",
        s.round, s.player_count, s.total_points, s.average_points
    );
}

#[derive(Default)]
struct StderrProgress {
    total: usize,
    seen: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, _index: usize, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name}", self.seen, self.total);
    }
    fn item_failed(&mut self, _index: usize, name: &str, err: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name} failed: {err}", self.seen, self.total);
    }
    fn finish(&mut self) {
        eprintln!("Done ({}/{})", self.seen, self.total);
    }
}
