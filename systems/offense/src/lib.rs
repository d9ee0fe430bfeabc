#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-phase offense timing.
//!
//! Once mobile points pass a turn-scaled threshold the engine latches the
//! enemy corner to attack, arms on the same turn and fires the rush on the
//! following one. Before turn 21 the rush is never evaluated; spare mobile
//! points go into demolisher harassment from the safest friendly edge cell.

use corner_rush_core::{
    unblocked, Board, BoardLocation, Corner, Intent, Quadrant, ResourceKind, UnitKind,
};
use corner_rush_system_path_risk::PathRisk;
use corner_rush_system_threat::weaker_corner;

/// First turn on which a rush can be armed.
pub const RUSH_START_TURN: u32 = 21;

/// Request size used when a wave should spend everything available.
pub const UNCAPPED_WAVE: u32 = 1000;

/// Mobile points spent per unit of the first scout wave.
pub const FIRST_WAVE_DIVISOR: f64 = 2.1;

/// Wall placed and removed on firing turns to open the lane.
pub const LANE_MARKER: BoardLocation = BoardLocation::new(23, 11);

/// Attack side chosen for the current rush cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionSignal {
    /// No side chosen yet.
    #[default]
    Unset,
    /// Rush the enemy's left corner.
    Left,
    /// Rush the enemy's right corner.
    Right,
}

impl DirectionSignal {
    /// Corner behind the signal, if one was chosen.
    #[must_use]
    pub const fn corner(self) -> Option<Corner> {
        match self {
            Self::Unset => None,
            Self::Left => Some(Corner::Left),
            Self::Right => Some(Corner::Right),
        }
    }
}

impl From<Corner> for DirectionSignal {
    fn from(corner: Corner) -> Self {
        match corner {
            Corner::Left => Self::Left,
            Corner::Right => Self::Right,
        }
    }
}

/// Rush staging state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RushState {
    /// Waiting for a direction.
    #[default]
    Idle,
    /// Direction set; the rush fires on the next evaluation.
    Armed,
}

/// Units requested and accepted for one wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wave {
    /// Deployment cell.
    pub location: BoardLocation,
    /// Units requested.
    pub requested: u32,
    /// Units the board accepted.
    pub accepted: u32,
}

/// What the offense step did this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffenseOutcome {
    /// Demolishers were sent from the lowest-risk friendly edge cell.
    Harassed(Wave),
    /// Harassment was due but every friendly edge cell was blocked.
    Held,
    /// The rush was armed towards the corner; nothing was spawned.
    Armed(Corner),
    /// The rush fired.
    Fired {
        /// Corner attacked.
        corner: Corner,
        /// Scouts sized from the mobile balance.
        first_wave: Wave,
        /// Uncapped follow-up scouts.
        second_wave: Wave,
    },
    /// Nothing to do.
    Idle,
}

/// Deployment cells of the two scout waves for a corner.
#[must_use]
pub const fn rush_lane(corner: Corner) -> (BoardLocation, BoardLocation) {
    match corner {
        Corner::Left => (BoardLocation::new(14, 0), BoardLocation::new(16, 2)),
        Corner::Right => (BoardLocation::new(13, 0), BoardLocation::new(11, 2)),
    }
}

/// Reports whether the mobile balance is high enough to arm on the turn.
#[must_use]
pub fn arming_threshold_met(turn: u32, mobile: f64) -> bool {
    turn >= RUSH_START_TURN && mobile >= 11.0 + 0.1 * f64::from(turn)
}

/// Reports whether harassment takes over the turn.
#[must_use]
pub fn harassment_due(turn: u32, mobile: f64) -> bool {
    turn < RUSH_START_TURN && mobile >= f64::from(6 + 3 * (turn / 10))
}

/// Offense timing state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Offense {
    direction: DirectionSignal,
    state: RushState,
}

impl Offense {
    /// Fresh machine with no direction and nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latched attack side.
    #[must_use]
    pub const fn direction(&self) -> DirectionSignal {
        self.direction
    }

    /// Current staging state.
    #[must_use]
    pub const fn state(&self) -> RushState {
        self.state
    }

    /// Latches the weaker enemy corner the first turn the arming threshold
    /// holds. A set direction is never re-evaluated.
    pub fn observe<B: Board + ?Sized>(&mut self, board: &B) -> DirectionSignal {
        if self.direction == DirectionSignal::Unset
            && arming_threshold_met(
                board.turn_number(),
                board.resource(ResourceKind::MobilePoints),
            )
        {
            self.direction = weaker_corner(board).into();
            tracing::debug!(direction = ?self.direction, "rush direction latched");
        }
        self.direction
    }

    /// Runs the attack step: harassment, arming or firing.
    pub fn attack<B: Board + ?Sized>(&mut self, board: &mut B, risk: &PathRisk) -> OffenseOutcome {
        let turn = board.turn_number();
        if harassment_due(turn, board.resource(ResourceKind::MobilePoints)) {
            return harass(board, risk);
        }

        let Some(corner) = self.direction.corner() else {
            return OffenseOutcome::Idle;
        };
        match self.state {
            RushState::Idle => {
                self.state = RushState::Armed;
                tracing::info!(turn, ?corner, "rush armed");
                OffenseOutcome::Armed(corner)
            }
            RushState::Armed => {
                let outcome = fire(board, corner);
                *self = Self::new();
                outcome
            }
        }
    }
}

fn harass<B: Board + ?Sized>(board: &mut B, risk: &PathRisk) -> OffenseOutcome {
    let mut edges = board.edge_locations(Quadrant::BottomLeft);
    edges.extend(board.edge_locations(Quadrant::BottomRight));
    let candidates = unblocked(board, &edges);
    let Some(best) = risk.rank(board, &candidates) else {
        tracing::debug!("no open edge cell to harass from");
        return OffenseOutcome::Held;
    };

    let accepted = board.apply(&Intent::wave(UnitKind::Demolisher, best.location, UNCAPPED_WAVE));
    tracing::info!(location = ?best.location, risk = best.risk, accepted, "harassing");
    OffenseOutcome::Harassed(Wave {
        location: best.location,
        requested: UNCAPPED_WAVE,
        accepted,
    })
}

fn fire<B: Board + ?Sized>(board: &mut B, corner: Corner) -> OffenseOutcome {
    let _ = board.apply(&Intent::place(UnitKind::Wall, &[LANE_MARKER]));
    let _ = board.apply(&Intent::remove(&[LANE_MARKER]));

    let (first_cell, second_cell) = rush_lane(corner);
    let mobile = board.resource(ResourceKind::MobilePoints);
    let requested = first_wave_size(mobile);
    let first_wave = Wave {
        location: first_cell,
        requested,
        accepted: board.apply(&Intent::wave(UnitKind::Scout, first_cell, requested)),
    };
    let second_wave = Wave {
        location: second_cell,
        requested: UNCAPPED_WAVE,
        accepted: board.apply(&Intent::wave(UnitKind::Scout, second_cell, UNCAPPED_WAVE)),
    };
    tracing::info!(
        ?corner,
        first = first_wave.accepted,
        second = second_wave.accepted,
        "rush fired"
    );
    OffenseOutcome::Fired {
        corner,
        first_wave,
        second_wave,
    }
}

fn first_wave_size(mobile: f64) -> u32 {
    let size = (mobile / FIRST_WAVE_DIVISOR).floor();
    if size <= 0.0 {
        0
    } else if size >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        size as u32
    }
}
