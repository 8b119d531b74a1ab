// src/core/net.rs
// Blocking HTTPS GET of one federation page. Stands in for the CORS proxy:
// same domain check, same browser-like headers, non-2xx mapped to an error.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

use crate::config::options::FetchOptions;
use crate::error::FetchError;
use crate::urls::is_federation_url;

pub fn client(opts: &FetchOptions) -> Result<Client, FetchError> {
    let c = Client::builder()
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()?;
    Ok(c)
}

pub fn http_get(client: &Client, url: &str, opts: &FetchOptions) -> Result<String, FetchError> {
    if !is_federation_url(url) {
        return Err(FetchError::ForeignUrl(s!(url)));
    }

    let t = Instant::now();
    let resp = client
        .get(url)
        .header(USER_AGENT, opts.user_agent.as_str())
        .header(ACCEPT, opts.accept.as_str())
        .header(ACCEPT_LANGUAGE, opts.accept_language.as_str())
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: s!(url),
            status: status.as_u16(),
            reason: s!(status.canonical_reason().unwrap_or("")),
        });
    }

    let body = resp.text()?;
    logd!("GET {url} → {} bytes in {:?}", body.len(), t.elapsed());
    Ok(body)
}

/// One-shot convenience: build a client and fetch.
pub fn fetch_html(url: &str, opts: &FetchOptions) -> Result<String, FetchError> {
    let c = client(opts)?;
    http_get(&c, url, opts)
}
