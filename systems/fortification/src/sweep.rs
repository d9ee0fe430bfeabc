//! Board-wide upgrade sweeps gated on a structure reserve.

use corner_rush_core::{Board, BoardLocation, Intent, Player, ResourceKind, UnitKind};

/// Units an upgrade sweep considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepFilter {
    /// Units of one kind.
    Kind(UnitKind),
    /// Walls outside the listed cells.
    WallsExcept(&'static [BoardLocation]),
    /// Any stationary unit.
    Any,
}

impl SweepFilter {
    fn matches(self, kind: UnitKind, location: BoardLocation) -> bool {
        match self {
            Self::Kind(wanted) => kind == wanted,
            Self::WallsExcept(excluded) => kind == UnitKind::Wall && !excluded.contains(&location),
            Self::Any => kind.is_stationary(),
        }
    }
}

/// One sweep over the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPass {
    /// Units upgraded by this pass.
    pub filter: SweepFilter,
    /// Structure balance below which the pass stops.
    pub reserve: f64,
}

/// Walks the board in reverse map order once per pass, upgrading matching
/// friendly units until the balance drops below the pass reserve.
///
/// Returns the number of upgrades the board accepted.
pub fn upgrade_sweep<B: Board + ?Sized>(board: &mut B, passes: &[SweepPass]) -> u32 {
    let locations = board.arena_locations();
    let mut upgraded = 0;
    for pass in passes {
        for &location in locations.iter().rev() {
            if board.resource(ResourceKind::StructurePoints) < pass.reserve {
                break;
            }
            let wanted = board.units_at(location).iter().any(|unit| {
                unit.owner == Player::Friendly
                    && !unit.upgraded
                    && pass.filter.matches(unit.kind, location)
            });
            if wanted {
                upgraded += board.apply(&Intent::upgrade(&[location]));
            }
        }
    }
    tracing::debug!(upgraded, "upgrade sweep finished");
    upgraded
}
