// src/scrape.rs
// Network side of the pipeline: fetch the two pages of a tournament, parse,
// and do it for every tournament of an event with a small worker pool.
use std::{
    sync::{Arc, atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use reqwest::blocking::Client;

use crate::{
    config::consts::{JITTER_MS, REQUEST_PAUSE_MS},
    config::options::{AppOptions, FetchOptions},
    core::net,
    error::FetchError,
    model::Extraction,
    pipeline::parse_pages,
    progress::Progress,
    urls::derive_urls,
};

/// A tournament to scrape: display name and any accepted URL shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
}

/// Outcome for one target, in input order.
#[derive(Debug)]
pub struct Collected {
    /// Position in the input slice.
    pub index: usize,
    pub target: Target,
    pub result: Result<Extraction, FetchError>,
}

/// Fetch roster and grid of one tournament, then parse them.
pub fn fetch_tournament(url: &str, opts: &AppOptions) -> Result<Extraction, FetchError> {
    let client = net::client(&opts.fetch)?;
    fetch_with(&client, url, opts)
}

fn fetch_with(client: &Client, url: &str, opts: &AppOptions) -> Result<Extraction, FetchError> {
    let (list_url, grid_url) = derive_urls(url);
    logd!("Tournament {url}: list {list_url}, grid {grid_url}");

    let (roster, grid) = fetch_pair(client, &list_url, &grid_url, &opts.fetch);
    Ok(parse_pages(&roster?, &grid?, &opts.parse))
}

/// Both pages in parallel; joined before anything is parsed.
fn fetch_pair(
    client: &Client,
    list_url: &str,
    grid_url: &str,
    fetch: &FetchOptions,
) -> (Result<String, FetchError>, Result<String, FetchError>) {
    thread::scope(|s| {
        let list = s.spawn(|| net::http_get(client, list_url, fetch));
        let grid = net::http_get(client, grid_url, fetch);
        let list = list.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (list, grid)
    })
}

/// Scrape every target. Failures are reported per target and never stop the run.
pub fn collect_event(
    targets: &[Target],
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Collected>, FetchError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(targets.len());
    }

    let client = net::client(&opts.fetch)?;

    let targets_arc = Arc::new(targets.to_vec());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Extraction, FetchError>)>();

    let workers = opts.fetch.workers.min(targets.len()).max(1);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {} tournaments with {} workers", targets.len(), workers));
    }

    for _ in 0..workers {
        let targets = Arc::clone(&targets_arc);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let client = client.clone();
        let opts = opts.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= targets.len() {
                    break;
                }
                let result = fetch_with(&client, &targets[i].url, &opts);
                if tx.send((i, result)).is_err() {
                    break;
                }
                let jitter = (i as u64 * 17) % JITTER_MS;
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    let mut slots: Vec<Option<Result<Extraction, FetchError>>> = (0..targets.len()).map(|_| None).collect();
    for _ in 0..targets.len() {
        let Ok((i, result)) = res_rx.recv() else {
            break; // workers ended early
        };
        let name = targets[i].name.as_str();
        match &result {
            Ok(x) => {
                logf!("{name}: {} club players, round {}", x.players.len(), x.current_round);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(i, name);
                }
            }
            Err(e) => {
                loge!("{name}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i, name, &e.to_string());
                }
            }
        }
        slots[i] = Some(result);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(targets
        .iter()
        .cloned()
        .zip(slots)
        .enumerate()
        .filter_map(|(index, (target, slot))| slot.map(|result| Collected { index, target, result }))
        .collect())
}
