// Balance scoring for a set of teams. Lower is better, 0 means every pair of teams is even.

use crate::team::Team;

pub type Score = i64;

/// Score of anything involving an incomplete team. Worse than every real score.
pub const INCOMPLETE: Score = Score::MAX;

/// A one-player gender gap outweighs any realistic level gap.
pub const GENDER_WEIGHT: Score = 100;

pub fn pair_score(a: &Team, b: &Team) -> Score {
    if !a.is_complete() || !b.is_complete() {
        return INCOMPLETE;
    }
    (a.score() - b.score()).abs() + (a.female_count() - b.female_count()).abs() * GENDER_WEIGHT
}

/// Sum of the pair scores over every unordered pair of teams.
/// Saturates at INCOMPLETE so a partition with incomplete teams never wraps around.
pub fn total_score(teams: &[Team]) -> Score {
    let mut total: Score = 0;
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            total = total.saturating_add(pair_score(a, b));
        }
    }
    total
}
