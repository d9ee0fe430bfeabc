#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reactive defense fed by breach reports.
//!
//! Every enemy breach is remembered for the rest of the match, and each turn
//! a turret is requested one row in front of every remembered location.
//! Entries are never pruned or de-duplicated, so repeated breaches at one
//! cell produce repeated requests; the board declines the occupied ones.

use corner_rush_core::{Board, BoardLocation, Breach, Intent, Player, UnitKind};

/// Append-only record of cells where enemy units scored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreachLog {
    locations: Vec<BoardLocation>,
}

impl BreachLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the breach when an enemy unit scored it. Returns whether the
    /// breach was recorded.
    pub fn record(&mut self, breach: Breach) -> bool {
        if breach.attacker == Player::Friendly {
            return false;
        }
        tracing::debug!(location = ?breach.location, "enemy breach recorded");
        self.locations.push(breach.location);
        true
    }

    /// Number of recorded breaches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Recorded locations in arrival order.
    #[must_use]
    pub fn locations(&self) -> &[BoardLocation] {
        &self.locations
    }

    /// Requests a turret in front of every recorded breach.
    ///
    /// Returns the number of turrets the board accepted.
    pub fn reinforce<B: Board + ?Sized>(&self, board: &mut B) -> u32 {
        let mut placed = 0;
        for location in &self.locations {
            placed += board.apply(&Intent::place(UnitKind::Turret, &[location.offset(0, 1)]));
        }
        if !self.locations.is_empty() {
            tracing::debug!(
                attempts = self.locations.len(),
                placed,
                "reinforced breached cells"
            );
        }
        placed
    }
}
