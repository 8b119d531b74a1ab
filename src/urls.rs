// src/urls.rs
//! From one user-supplied tournament URL to the two pages the pipeline needs:
//! the roster with clubs (`Action=Ls`) and the results grid (`Action=Ga`).
//!
//! Accepted shapes:
//! - `Resultats.aspx?...&Action=Ga` / `Action=Ls`: toggled by substring replacement,
//!   every other parameter (`Groupe=`, ...) is kept;
//! - `FicheTournoi.aspx?Ref=68249`, or anything carrying `Tournois/Id/68249`:
//!   both pages are rebuilt from the id.
//!
//! Nothing here fails. Unknown shapes come back unchanged.

use reqwest::Url;

use crate::config::consts::{ACTION_GRID, ACTION_LIST, FFE_BASE, FFE_DOMAIN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlShape {
    ResultsGrid,
    List,
    Reference(u32),
    Unknown,
}

pub fn classify(url: &str) -> UrlShape {
    if url.contains(ACTION_GRID) {
        UrlShape::ResultsGrid
    } else if url.contains(ACTION_LIST) {
        UrlShape::List
    } else if let Some(id) = tournament_id(url) {
        UrlShape::Reference(id)
    } else {
        UrlShape::Unknown
    }
}

pub fn derive_results_url(url: &str) -> String {
    match classify(url) {
        UrlShape::ResultsGrid => s!(url),
        UrlShape::List => url.replace(ACTION_LIST, ACTION_GRID),
        UrlShape::Reference(id) => canonical_url(id, ACTION_GRID),
        UrlShape::Unknown => s!(url),
    }
}

pub fn derive_list_url(url: &str) -> String {
    match classify(url) {
        UrlShape::List => s!(url),
        UrlShape::Reference(id) => canonical_url(id, ACTION_LIST),
        // Grid or unknown: best-effort replacement either way.
        UrlShape::ResultsGrid | UrlShape::Unknown => url.replace(ACTION_GRID, ACTION_LIST),
    }
}

/// Both pages at once: (list, results).
pub fn derive_urls(url: &str) -> (String, String) {
    (derive_list_url(url), derive_results_url(url))
}

fn canonical_url(id: u32, action: &str) -> String {
    let id = id.to_string();
    join!(FFE_BASE, "Resultats.aspx?URL=Tournois/Id/", &id, "/", &id, "&", action)
}

/// Tournament id from a `Ref=` query parameter or a `Tournois/Id/N` path segment.
pub fn tournament_id(url: &str) -> Option<u32> {
    if let Some(q) = url.find('?') {
        for pair in url[q + 1..].split(['&', '#']) {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            if k.eq_ignore_ascii_case("ref") {
                if let Some(id) = leading_digits(v) {
                    return Some(id);
                }
            }
        }
    }

    let lc = url.to_ascii_lowercase();
    let needle = "tournois/id/";
    let idx = lc.find(needle)?;
    leading_digits(&url[idx + needle.len()..])
}

fn leading_digits(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { digits.parse().ok() }
}

/// Only `http(s)://` URLs whose host is the federation domain or one of its subdomains.
/// The host is read by the same parser the HTTP client connects with.
pub fn is_federation_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host_str() {
        Some(host) => host == FFE_DOMAIN || host.ends_with(&join!(".", FFE_DOMAIN)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GA: &str = "https://www.echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/68249/68249&Action=Ga";
    const LS: &str = "https://www.echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/68249/68249&Action=Ls";

    #[test]
    fn grid_url_toggles_action_code() {
        assert_eq!(derive_results_url(GA), GA);
        assert_eq!(derive_list_url(GA), LS);
        assert_eq!(derive_results_url(LS), GA);
        assert_eq!(derive_list_url(LS), LS);
    }

    #[test]
    fn toggling_keeps_other_parameters() {
        let u = "https://echecs.asso.fr/Resultats.aspx?Action=Ga&Groupe=1234";
        assert_eq!(derive_list_url(u), "https://echecs.asso.fr/Resultats.aspx?Action=Ls&Groupe=1234");
    }

    #[test]
    fn list_results_round_trip_restores_action() {
        for u in [GA, LS, "https://echecs.asso.fr/Resultats.aspx?Action=Ga&Groupe=7"] {
            let back_to_list = derive_list_url(&derive_results_url(u));
            assert!(back_to_list.contains(ACTION_LIST));
            assert_eq!(derive_results_url(&back_to_list), derive_results_url(u));
        }
        assert_eq!(derive_list_url(&derive_results_url(LS)), LS);
        assert_eq!(derive_results_url(&derive_list_url(GA)), GA);
    }

    #[test]
    fn reference_url_builds_canonical_pages() {
        let u = "https://www.echecs.asso.fr/FicheTournoi.aspx?Ref=68249";
        assert_eq!(classify(u), UrlShape::Reference(68249));
        assert_eq!(derive_results_url(u), GA);
        assert_eq!(derive_list_url(u), LS);
        assert_eq!(derive_urls(u), (s!(LS), s!(GA)));
    }

    #[test]
    fn reference_id_from_path_or_lowercase_key() {
        assert_eq!(tournament_id("https://echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/555/555&Action=Fs"), Some(555));
        assert_eq!(tournament_id("https://echecs.asso.fr/FicheTournoi.aspx?ref=42&x=1"), Some(42));
        assert_eq!(tournament_id("https://echecs.asso.fr/FicheTournoi.aspx?Ref=abc"), None);
    }

    #[test]
    fn unknown_shape_falls_back_to_input() {
        let u = "https://echecs.asso.fr/Default.aspx";
        assert_eq!(classify(u), UrlShape::Unknown);
        assert_eq!(derive_results_url(u), u);
        assert_eq!(derive_list_url(u), u);
        assert_eq!(derive_results_url(""), "");
    }

    #[test]
    fn federation_domain_check() {
        assert!(is_federation_url(GA));
        assert!(is_federation_url("http://echecs.asso.fr/path"));
        assert!(is_federation_url("https://WWW.ECHECS.ASSO.FR:443/x"));
        assert!(!is_federation_url("https://google.com"));
        assert!(!is_federation_url("https://google.com/?u=echecs.asso.fr"));
        assert!(!is_federation_url("https://echecs.asso.fr.evil.com/"));
        assert!(!is_federation_url("ftp://echecs.asso.fr/"));
        assert!(!is_federation_url(""));
    }

    #[test]
    fn federation_check_agrees_with_the_client_parser() {
        // Backslash ends the authority; the real host is evil.example.
        assert!(!is_federation_url("https://evil.example\\.echecs.asso.fr/Resultats.aspx?Action=Ga"));
        // Userinfo is not the host.
        assert!(!is_federation_url("https://www.echecs.asso.fr@evil.example/Resultats.aspx"));
        assert!(is_federation_url("https://user@www.echecs.asso.fr/Resultats.aspx"));
        assert!(!is_federation_url("https://echecs.asso.fr.evil.example/"));
        assert!(is_federation_url("  https://www.echecs.asso.fr/Resultats.aspx?Action=Ls  "));
    }
}
