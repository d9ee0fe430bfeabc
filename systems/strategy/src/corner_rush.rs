use corner_rush_core::Board;
use corner_rush_system_fortification::Fortification;
use corner_rush_system_offense::Offense;
use corner_rush_system_path_risk::PathRisk;
use corner_rush_system_reactive_defense::BreachLog;

use crate::TurnReport;

/// Layered fortification followed by the corner rush timing machine.
#[derive(Clone, Debug)]
pub struct CornerRush {
    offense: Offense,
    fortification: Fortification,
}

impl Default for CornerRush {
    fn default() -> Self {
        Self::new()
    }
}

impl CornerRush {
    /// Plan with nothing latched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offense: Offense::new(),
            fortification: Fortification::corner_rush(),
        }
    }

    /// Offense machine driven by this plan.
    #[must_use]
    pub fn offense(&self) -> &Offense {
        &self.offense
    }

    pub(crate) fn on_turn<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
        breaches: &BreachLog,
        risk: &PathRisk,
    ) -> TurnReport {
        let direction = self.offense.observe(board);
        tracing::debug!(?direction, "rush direction observed");
        let fortification = self.fortification.handle(board);
        let reinforced = breaches.reinforce(board);
        let offense = self.offense.attack(board, risk);
        tracing::debug!(?offense, "corner rush turn finished");
        TurnReport {
            fortification,
            reinforced,
            offense: Some(offense),
            starter: None,
        }
    }
}
