// Players and the positions they can play.
// A player is parsed once at startup and then shared read-only by every candidate team.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

pub const LEVEL_MIN: i32 = 1;
pub const LEVEL_MAX: i32 = 10;

/// Atomically reference-counted Player so teams can point at the roster without copying it.
/// Arc instead of Rc because search workers run on rayon threads.
pub type RcPlayer = Arc<Player>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Mid,
    Libero, // same as mid, but always plays back row
    Set,
    Out,
    Dia,
}

/// The slot category a position fills. Libero shares the mid slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Mid,
    Set,
    Out,
    Dia,
}

impl Position {
    pub fn role(self) -> Role {
        match self {
            Position::Mid | Position::Libero => Role::Mid,
            Position::Set => Role::Set,
            Position::Out => Role::Out,
            Position::Dia => Role::Dia,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Mid => "middles",
            Role::Set => "setters",
            Role::Out => "outs",
            Role::Dia => "dias",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("position `{0}' is unknown")]
    UnknownPosition(String),
    #[error("player {0} has no positions")]
    NoPositions(String),
}

/// Parse a position spec like "Mid/Out" or "joker".
/// The wildcard expands to every base role (no libero) and ignores anything else in the spec.
pub fn parse_positions(spec: &str) -> Result<Vec<Position>, PlayerError> {
    let mut positions = Vec::new();
    for token in spec.split('/') {
        let token = token.trim().to_lowercase();
        let position = match token.as_str() {
            "all" | "any" | "joker" => {
                return Ok(vec![Position::Mid, Position::Out, Position::Dia, Position::Set]);
            }
            "mid" => Position::Mid,
            "set" => Position::Set,
            "out" => Position::Out,
            "dia" => Position::Dia,
            "libero" => Position::Libero,
            other => return Err(PlayerError::UnknownPosition(other.to_string())),
        };
        positions.push(position);
    }
    Ok(positions)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub level: i32,
    pub is_female: bool,
    pub positions: Vec<Position>,
}

impl Player {
    pub fn new(name: String, level: i32, is_female: bool, positions: Vec<Position>) -> Result<Player, PlayerError> {
        if positions.is_empty() {
            return Err(PlayerError::NoPositions(name));
        }
        if !(LEVEL_MIN..=LEVEL_MAX).contains(&level) {
            warn!("Level {} is outside of range for {}", level, name);
        }
        Ok(Player {
            name,
            level,
            is_female,
            positions,
        })
    }

    /// Only the first listed position takes part in placement, extra ones are kept for later use.
    pub fn primary_position(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    pub fn role(&self) -> Option<Role> {
        self.primary_position().map(Position::role)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, if self.is_female { " (F)" } else { "" })
    }
}

#[cfg(test)]
pub(crate) fn test_player(name: &str, level: i32, is_female: bool, position: Position) -> RcPlayer {
    Arc::new(Player {
        name: name.to_string(),
        level,
        is_female,
        positions: vec![position],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_positions_in_order() {
        assert_eq!(parse_positions("Mid/Out"), Ok(vec![Position::Mid, Position::Out]));
        assert_eq!(parse_positions(" out / LIBERO "), Ok(vec![Position::Out, Position::Libero]));
    }

    #[test]
    fn test_parse_wildcards() {
        let all = vec![Position::Mid, Position::Out, Position::Dia, Position::Set];
        assert_eq!(parse_positions("ALL"), Ok(all.clone()));
        assert_eq!(parse_positions("any"), Ok(all.clone()));
        // wildcard wins even when other tokens follow
        assert_eq!(parse_positions("joker/mid"), Ok(all.clone()));
        assert_eq!(parse_positions("set/joker"), Ok(all));
    }

    #[test]
    fn test_parse_unknown_token_fails() {
        assert_eq!(
            parse_positions("unknown"),
            Err(PlayerError::UnknownPosition("unknown".to_string()))
        );
        assert!(parse_positions("mid/").is_err());
        assert!(parse_positions("").is_err());
    }

    #[test]
    fn test_libero_plays_mid_role() {
        assert_eq!(Position::Libero.role(), Role::Mid);
        assert_eq!(Position::Mid.role(), Role::Mid);
        assert_eq!(Position::Dia.role(), Role::Dia);
    }

    #[test]
    fn test_new_player_needs_positions() {
        let err = Player::new("Bob".to_string(), 5, false, vec![]).unwrap_err();
        assert_eq!(err, PlayerError::NoPositions("Bob".to_string()));
    }

    #[test]
    fn test_out_of_range_level_is_kept() {
        let player = Player::new("Zed".to_string(), 14, false, vec![Position::Set]).unwrap();
        assert_eq!(player.level, 14);
    }

    #[test]
    fn test_only_first_position_counts() {
        let player = Player::new("Ann".to_string(), 3, true, vec![Position::Out, Position::Set]).unwrap();
        assert_eq!(player.primary_position(), Some(Position::Out));
        assert_eq!(player.role(), Some(Role::Out));
        assert_eq!(player.to_string(), "Ann (F)");
    }
}
