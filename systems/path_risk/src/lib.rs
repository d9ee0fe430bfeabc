#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that scores deployment cells by the damage a unit would take
//! walking from them to the opposite edge.

use corner_rush_core::{Board, BoardLocation, Player, UnitCatalog, UnitKind};

/// Candidate picked by [`PathRisk::rank`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedCandidate {
    /// Deployment cell with the lowest risk.
    pub location: BoardLocation,
    /// Projected damage along the cell's path.
    pub risk: u64,
}

/// Path damage estimator.
///
/// Every turn recomputes paths from scratch because the board changes between
/// turns; nothing is cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathRisk {
    damage_per_hit: u64,
}

impl PathRisk {
    /// Creates an estimator charging `damage_per_hit` for every attacker in range.
    #[must_use]
    pub const fn new(damage_per_hit: u64) -> Self {
        Self { damage_per_hit }
    }

    /// Creates an estimator using the configured turret damage against mobile units.
    #[must_use]
    pub fn from_catalog(catalog: &UnitCatalog) -> Self {
        let damage = catalog.spec(UnitKind::Turret).damage_to_mobile;
        Self::new(if damage > 0.0 { damage.round() as u64 } else { 0 })
    }

    /// Damage charged per attacker able to hit a step.
    #[must_use]
    pub const fn damage_per_hit(&self) -> u64 {
        self.damage_per_hit
    }

    /// Sums attacker count times per-hit damage over the candidate's path.
    ///
    /// A candidate without a path (blocked, or already at the edge) scores
    /// zero, so callers must filter blocked cells before ranking.
    #[must_use]
    pub fn estimate_risk<B: Board + ?Sized>(&self, board: &B, candidate: BoardLocation) -> u64 {
        board
            .find_path_to_edge(candidate)
            .into_iter()
            .map(|step| {
                let attackers = board.attackers_able_to_hit(step, Player::Friendly).len();
                u64::try_from(attackers)
                    .unwrap_or(u64::MAX)
                    .saturating_mul(self.damage_per_hit)
            })
            .fold(0, u64::saturating_add)
    }

    /// Returns the first candidate with the lowest risk, or `None` when there
    /// are no candidates.
    #[must_use]
    pub fn rank<B: Board + ?Sized>(
        &self,
        board: &B,
        candidates: &[BoardLocation],
    ) -> Option<RankedCandidate> {
        let mut best: Option<RankedCandidate> = None;
        for &location in candidates {
            let risk = self.estimate_risk(board, location);
            tracing::trace!(?location, risk, "estimated deployment risk");
            match &best {
                Some(existing) if existing.risk <= risk => {}
                _ => {
                    best = Some(RankedCandidate { location, risk });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corner_rush_core::fixtures::{standard_catalog, FixtureBoard};

    #[test]
    fn catalog_damage_is_used_per_hit() {
        assert_eq!(PathRisk::from_catalog(&standard_catalog()).damage_per_hit(), 5);
    }

    #[test]
    fn pathless_candidate_scores_zero() {
        let board = FixtureBoard::new(0);
        assert_eq!(PathRisk::new(5).estimate_risk(&board, BoardLocation::new(13, 0)), 0);
    }
}
