// src/log.rs
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt::time::Uptime};

#[doc(hidden)]
pub use tracing as __tracing;

/// Env var that overrides the verbosity flag (standard `EnvFilter` syntax).
pub const LOG_ENV: &str = "FFE_SCRAPE_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "ffe_scrape=warn",
        1 => "ffe_scrape=info",
        2 => "ffe_scrape=debug",
        _ => "ffe_scrape=trace",
    }
}

/// Install the stderr subscriber once. Lines carry the elapsed time since start.
/// Later calls are no-ops, so tests and the CLI can both call it.
pub fn init(verbosity: u8) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(Uptime::default())
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(0), "ffe_scrape=warn");
        assert_eq!(default_directive(2), "ffe_scrape=debug");
        assert_eq!(default_directive(9), "ffe_scrape=trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0);
        init(3);
        logd!("still alive");
    }
}
