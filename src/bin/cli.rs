// src/bin/cli.rs
use ffe_scrape::cli;

fn main() -> color_eyre::Result<()> {
    cli::run()
}
