// Renders a set of teams as the comma separated result table.

use crate::search::{Partition, Reporter};
use crate::team::Team;
use csv::{QuoteStyle, WriterBuilder};
use indicatif::ProgressBar;

pub const HEADER: [&str; 9] = ["team", "set", "dia", "mid", "mid", "out", "out", "score", "ladies"];

pub fn render_teams(teams: &[Team]) -> csv::Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for (i, team) in teams.iter().enumerate() {
        let mut row = vec![format!("team{}", i + 1)];
        // empty cell for an empty slot
        row.extend(
            team.slots()
                .map(|slot| slot.as_ref().map(|p| p.to_string()).unwrap_or_default()),
        );
        row.push(team.score().to_string());
        row.push(team.female_count().to_string());
        wtr.write_record(&row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Prints every new best partition to stdout, keeping the progress spinner out of the way.
pub struct ConsoleReporter {
    progress: ProgressBar,
}

impl ConsoleReporter {
    pub fn new(progress: ProgressBar) -> ConsoleReporter {
        ConsoleReporter { progress }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, partition: &Partition) {
        let table = match render_teams(&partition.teams) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("Could not render teams: {}", e);
                return;
            }
        };
        self.progress.suspend(|| {
            println!("Found better score = {}", partition.score);
            println!("{}", table);
        });
    }
}
