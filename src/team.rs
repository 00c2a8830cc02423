// A team is six role slots filled in place during one search iteration.
// Slots only ever go from empty to filled, the whole team is thrown away and rebuilt on the next iteration.

use crate::fitness::{Score, INCOMPLETE};
use crate::player::{RcPlayer, Role};

#[derive(Debug, Clone, Default)]
pub struct Team {
    pub set: Option<RcPlayer>,
    pub dia: Option<RcPlayer>,
    pub mid: [Option<RcPlayer>; 2],
    pub out: [Option<RcPlayer>; 2],
}

// first empty slot wins
fn fill(slots: &mut [Option<RcPlayer>], player: &RcPlayer) -> bool {
    match slots.iter_mut().find(|slot| slot.is_none()) {
        Some(slot) => {
            *slot = Some(RcPlayer::clone(player));
            true
        }
        None => false,
    }
}

impl Team {
    pub fn new() -> Team {
        Team::default()
    }

    /// Put the player into the first open slot of their primary role.
    /// Returns false and leaves the team untouched when that role is already full.
    pub fn try_place(&mut self, player: &RcPlayer) -> bool {
        let Some(role) = player.role() else {
            return false;
        };
        match role {
            Role::Mid => fill(&mut self.mid, player),
            Role::Out => fill(&mut self.out, player),
            Role::Set => fill(std::slice::from_mut(&mut self.set), player),
            Role::Dia => fill(std::slice::from_mut(&mut self.dia), player),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.slots().all(|slot| slot.is_some())
    }

    /// All six slots in report order: set, dia, mid, mid, out, out.
    pub fn slots(&self) -> impl Iterator<Item = &Option<RcPlayer>> {
        std::iter::once(&self.set)
            .chain(std::iter::once(&self.dia))
            .chain(self.mid.iter())
            .chain(self.out.iter())
    }

    pub fn players(&self) -> impl Iterator<Item = &RcPlayer> {
        self.slots().flatten()
    }

    /// Sum of the levels of everyone placed so far. Only meaningful on a complete team.
    pub fn total_level(&self) -> Score {
        self.players().map(|p| Score::from(p.level)).sum()
    }

    pub fn female_count(&self) -> Score {
        self.players().filter(|p| p.is_female).count() as Score
    }

    pub fn score(&self) -> Score {
        if !self.is_complete() {
            return INCOMPLETE;
        }
        self.total_level()
    }
}
