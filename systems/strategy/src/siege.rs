use corner_rush_core::{Board, BoardLocation, Intent, ResourceKind, UnitKind};
use corner_rush_system_fortification::{
    layout,
    sweep::{upgrade_sweep, SweepFilter, SweepPass},
    Fortification,
};
use corner_rush_system_offense::UNCAPPED_WAVE;

use crate::TurnReport;

const PUSH_START: BoardLocation = BoardLocation::new(13, 0);

const UPGRADE_PASSES: [SweepPass; 4] = [
    SweepPass {
        filter: SweepFilter::Kind(UnitKind::Turret),
        reserve: 4.0,
    },
    SweepPass {
        filter: SweepFilter::WallsExcept(layout::SIEGE_FUNNEL),
        reserve: 2.0,
    },
    SweepPass {
        filter: SweepFilter::Kind(UnitKind::Support),
        reserve: 10.0,
    },
    SweepPass {
        filter: SweepFilter::Any,
        reserve: 10.0,
    },
];

/// Reports whether mobile points cover a demolisher push this turn.
#[must_use]
fn push_due(turn: u32, mobile: f64) -> bool {
    mobile >= 14.0 + 0.25 * f64::from(turn)
}

/// Demolisher pushes behind a wall funnel.
#[derive(Clone, Debug)]
pub struct Siege {
    fortification: Fortification,
}

impl Default for Siege {
    fn default() -> Self {
        Self::new()
    }
}

impl Siege {
    /// Plan with the siege layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fortification: Fortification::new(layout::SIEGE),
        }
    }

    pub(crate) fn on_turn<B: Board + ?Sized>(&mut self, board: &mut B) -> TurnReport {
        if push_due(board.turn_number(), board.resource(ResourceKind::MobilePoints)) {
            let push = Intent::wave(UnitKind::Demolisher, PUSH_START, UNCAPPED_WAVE);
            let accepted = board.apply(&push);
            tracing::info!(accepted, "demolisher push");
        }

        let mut fortification = self.fortification.handle(board);
        fortification.upgraded += upgrade_sweep(board, &UPGRADE_PASSES);
        TurnReport {
            fortification,
            ..TurnReport::default()
        }
    }
}
