// Role pools: the roster split by each player's first position.
// Pools are built once at startup, every search worker then shuffles its own copy.

use crate::player::{RcPlayer, Role};
use crate::TEAM_SIZE;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("not enough players for a single team")]
    NoTeams,
    #[error("player {0} has no positions")]
    NoPositions(String),
    #[error("not enough {role}. Found {found}, need {needed}")]
    NotEnough { role: Role, found: usize, needed: usize },
}

/// The players taking part in this run, already cut down to whole teams.
#[derive(Debug, Clone)]
pub struct Roster {
    pub players: Vec<RcPlayer>,
    pub teams_count: usize,
}

impl Roster {
    /// Drop surplus players from the end so the roster splits into full teams,
    /// then make sure every remaining player can be placed somewhere.
    pub fn new(mut players: Vec<RcPlayer>) -> Result<Roster, PoolError> {
        let teams_count = players.len() / TEAM_SIZE;
        if teams_count * TEAM_SIZE != players.len() {
            info!("Reducing players from {} to {}", players.len(), teams_count * TEAM_SIZE);
            players.truncate(teams_count * TEAM_SIZE);
        }
        info!("We go with {} teams", teams_count);

        if let Some(player) = players.iter().find(|p| p.positions.is_empty()) {
            return Err(PoolError::NoPositions(player.name.clone()));
        }
        Ok(Roster { players, teams_count })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RolePools {
    pub middles: Vec<RcPlayer>,
    pub setters: Vec<RcPlayer>,
    pub outs: Vec<RcPlayer>,
    pub dias: Vec<RcPlayer>,
    // gender split is only reported, the search does not use it
    pub males: usize,
    pub females: usize,
}

impl RolePools {
    pub fn new(roster: &Roster) -> RolePools {
        let mut pools = RolePools::default();
        for player in &roster.players {
            match player.role() {
                Some(Role::Mid) => pools.middles.push(RcPlayer::clone(player)),
                Some(Role::Set) => pools.setters.push(RcPlayer::clone(player)),
                Some(Role::Out) => pools.outs.push(RcPlayer::clone(player)),
                Some(Role::Dia) => pools.dias.push(RcPlayer::clone(player)),
                None => {}
            }
            if player.is_female {
                pools.females += 1;
            } else {
                pools.males += 1;
            }
        }
        info!(
            "Middles = {} setters = {} dias = {} outs = {} males = {} females = {}",
            pools.middles.len(),
            pools.setters.len(),
            pools.dias.len(),
            pools.outs.len(),
            pools.males,
            pools.females
        );
        pools
    }

    pub fn pool(&self, role: Role) -> &[RcPlayer] {
        match role {
            Role::Mid => &self.middles,
            Role::Set => &self.setters,
            Role::Out => &self.outs,
            Role::Dia => &self.dias,
        }
    }

    /// How many players of a role every team needs.
    pub fn per_team(role: Role) -> usize {
        match role {
            Role::Mid | Role::Out => 2,
            Role::Set | Role::Dia => 1,
        }
    }

    /// Fail fast if any role cannot cover all teams.
    pub fn check(&self, teams_count: usize) -> Result<(), PoolError> {
        if teams_count == 0 {
            return Err(PoolError::NoTeams);
        }
        for role in [Role::Mid, Role::Set, Role::Dia, Role::Out] {
            let found = self.pool(role).len();
            let needed = Self::per_team(role) * teams_count;
            if found < needed {
                return Err(PoolError::NotEnough { role, found, needed });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::player::{test_player, Position};

    /// Twelve players, enough for two full teams.
    pub(crate) fn two_team_players() -> Vec<RcPlayer> {
        vec![
            test_player("Mia", 4, true, Position::Mid),
            test_player("Max", 7, false, Position::Mid),
            test_player("Lea", 5, true, Position::Libero),
            test_player("Tom", 6, false, Position::Mid),
            test_player("Ola", 8, true, Position::Out),
            test_player("Ben", 3, false, Position::Out),
            test_player("Ida", 6, true, Position::Out),
            test_player("Kai", 9, false, Position::Out),
            test_player("Eva", 5, true, Position::Dia),
            test_player("Jon", 7, false, Position::Dia),
            test_player("Zoe", 8, true, Position::Set),
            test_player("Sam", 2, false, Position::Set),
        ]
    }

    #[test]
    fn test_pools_split_by_first_position() {
        let roster = Roster::new(two_team_players()).unwrap();
        assert_eq!(roster.teams_count, 2);
        let pools = RolePools::new(&roster);
        assert_eq!(pools.middles.len(), 4);
        assert_eq!(pools.outs.len(), 4);
        assert_eq!(pools.dias.len(), 2);
        assert_eq!(pools.setters.len(), 2);
        assert_eq!((pools.males, pools.females), (6, 6));
        assert_eq!(pools.check(roster.teams_count), Ok(()));
    }

    #[test]
    fn test_surplus_players_are_dropped() {
        let mut players = two_team_players();
        players.push(test_player("Extra", 5, false, Position::Set));
        players.push(test_player("Spare", 5, false, Position::Dia));
        let roster = Roster::new(players).unwrap();
        assert_eq!(roster.players.len(), 12);
        assert!(roster.players.iter().all(|p| p.name != "Extra" && p.name != "Spare"));
    }

    #[test]
    fn test_empty_roster_has_no_teams() {
        let roster = Roster::new(Vec::new()).unwrap();
        assert_eq!(roster.teams_count, 0);
        assert_eq!(RolePools::new(&roster).check(0), Err(PoolError::NoTeams));
    }

    #[test]
    fn test_missing_setter_is_fatal() {
        let mut players = two_team_players();
        // swap the second setter for a fifth out
        players[11] = test_player("Sam", 2, false, Position::Out);
        let roster = Roster::new(players).unwrap();
        let pools = RolePools::new(&roster);
        assert_eq!(
            pools.check(roster.teams_count),
            Err(PoolError::NotEnough {
                role: Role::Set,
                found: 1,
                needed: 2
            })
        );
    }

    #[test]
    fn test_player_without_positions_is_fatal() {
        let mut players = two_team_players();
        players[3] = RcPlayer::new(crate::player::Player {
            name: "Nobody".to_string(),
            level: 5,
            is_female: false,
            positions: vec![],
        });
        assert_eq!(
            Roster::new(players).unwrap_err(),
            PoolError::NoPositions("Nobody".to_string())
        );
    }
}
