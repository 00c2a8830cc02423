// This file reads the player list from a comma separated text file.
// Each non-blank line is `name,genderFlag,level,positionSpec`, no header row.
// Any malformed line throws away the whole file, callers treat an error as an empty roster.

use crate::player::{parse_positions, Player, PlayerError, RcPlayer};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line} cannot be tokenized correctly: expected 4 fields, found {found}")]
    FieldCount { line: u64, found: usize },
    #[error("line {line}: {source}")]
    Player {
        line: u64,
        #[source]
        source: PlayerError,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// One line of the input file before any interpretation.
#[derive(Debug, Deserialize)]
struct PlayerRecord {
    name: String,
    gender: String,
    level: String,
    positions: String,
}

/// Base 10 integer prefix, like strtol: "7" -> 7, "8th" -> 8, "x" -> 0.
/// Out of range values are left for the player constructor to warn about.
pub fn parse_level(raw: &str) -> i32 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// a whitespace-only line comes back as one empty field, a line of bare commas does not
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(str::is_empty)
}

pub fn read_players<R: Read>(input: R) -> Result<Vec<RcPlayer>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let mut players: Vec<RcPlayer> = Vec::new();
    // names in a legacy encoding are kept with replacement characters instead of failing the file
    for result in rdr.byte_records() {
        let raw_record = result?;
        let line = raw_record.position().map(|p| p.line()).unwrap_or(0);
        let record = StringRecord::from_byte_record_lossy(raw_record);
        if is_blank(&record) {
            continue;
        }
        if record.len() != 4 {
            return Err(LoadError::FieldCount {
                line,
                found: record.len(),
            });
        }
        let raw: PlayerRecord = record.deserialize(None)?;
        let positions = parse_positions(&raw.positions).map_err(|source| LoadError::Player { line, source })?;
        let player = Player::new(raw.name, parse_level(&raw.level), raw.gender == "F", positions)
            .map_err(|source| LoadError::Player { line, source })?;
        players.push(Arc::new(player));
    }
    Ok(players)
}

pub fn read_file(path: &Path) -> Result<Vec<RcPlayer>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_players(file)
}
