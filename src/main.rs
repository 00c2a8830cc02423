mod fitness;
mod ingest;
mod player;
mod pool;
mod report;
mod search;
mod team;

use indicatif::{ProgressBar, ProgressStyle};
use pool::{RolePools, Roster};
use report::ConsoleReporter;
use search::{Search, SearchSettings};
use std::path::Path;
use std::process;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Players per team: one setter, one dia, two middles, two outs.
pub const TEAM_SIZE: usize = 6;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner() -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {pos} candidates tried, {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(200));
    progress
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("volley-teams");
        eprintln!("Usage: {} <filename>", program);
        process::exit(1);
    }
    enable_tracing();

    // a broken file leaves us with nobody, the pool checks below take care of that
    let players = match ingest::read_file(Path::new(&args[1])) {
        Ok(players) if !players.is_empty() => {
            info!("Read {} players", players.len());
            players
        }
        Ok(_) => {
            error!("Could not read players");
            Vec::new()
        }
        Err(e) => {
            error!("{}", e);
            error!("Could not read players");
            Vec::new()
        }
    };

    let roster = match Roster::new(players) {
        Ok(roster) => roster,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let pools = RolePools::new(&roster);
    if let Err(e) = pools.check(roster.teams_count) {
        error!("{}", e);
        process::exit(1);
    }

    let progress = spinner();
    let mut reporter = ConsoleReporter::new(progress.clone());
    let search = Search::new(&pools, roster.teams_count, SearchSettings::default());
    if let Err(e) = search.run(&mut reporter, &progress) {
        error!("{}", e);
        process::exit(1);
    }
    progress.finish_and_clear();
}
