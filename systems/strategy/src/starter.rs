use corner_rush_core::{unblocked, Board, BoardLocation, Intent, Quadrant, ResourceKind, UnitKind};
use corner_rush_system_fortification::{layout, Fortification};
use corner_rush_system_offense::UNCAPPED_WAVE;
use corner_rush_system_path_risk::PathRisk;
use corner_rush_system_reactive_defense::BreachLog;
use corner_rush_system_threat::count_enemy_units;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::TurnReport;

/// Turns spent stalling with interceptors before attacking.
const STALL_TURNS: u32 = 5;

/// Interceptors sent per stalling turn at most.
const STALL_INTERCEPTORS: u32 = 2;

/// Enemy front-row density that triggers the demolisher line.
const CROWDED_FRONT: u32 = 10;

const ENEMY_FRONT_ROWS: [i32; 2] = [14, 15];

const SCOUT_STARTS: [BoardLocation; 2] = [BoardLocation::new(13, 0), BoardLocation::new(14, 0)];

const SUPPORT_CELLS: [BoardLocation; 4] = [
    BoardLocation::new(13, 2),
    BoardLocation::new(14, 2),
    BoardLocation::new(13, 3),
    BoardLocation::new(14, 3),
];

const DEMOLISHER_POST: BoardLocation = BoardLocation::new(24, 10);

/// Attack chosen by the starter profile on a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarterAttack {
    /// Interceptors sent to random friendly edge cells.
    Stalled {
        /// Interceptors the board accepted.
        interceptors: u32,
    },
    /// A stationary line was built for demolishers to shoot over.
    DemolisherLine {
        /// Line units accepted.
        line: u32,
        /// Demolishers accepted.
        demolishers: u32,
    },
    /// Scouts sent from the safer back cell.
    Scouts {
        /// Deployment cell.
        location: BoardLocation,
        /// Scouts accepted.
        accepted: u32,
    },
    /// Even turn; scouts are saved up.
    Saving,
}

/// Spread-out defense with interceptor stalling and opportunistic raids.
#[derive(Clone, Debug)]
pub struct Starter {
    rng: ChaCha8Rng,
    fortification: Fortification,
}

impl Starter {
    /// Plan drawing its random choices from `rng`.
    #[must_use]
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            fortification: Fortification::new(layout::STARTER),
        }
    }

    pub(crate) fn on_turn<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
        breaches: &BreachLog,
        risk: &PathRisk,
    ) -> TurnReport {
        let mut fortification = self.fortification.handle(board);
        let reinforced = breaches.reinforce(board);

        let attack = if board.turn_number() < STALL_TURNS {
            self.stall_with_interceptors(board)
        } else if count_enemy_units(board, None, &ENEMY_FRONT_ROWS) > CROWDED_FRONT {
            demolisher_line(board)
        } else {
            let attack = if board.turn_number() % 2 == 1 {
                send_scouts(board, risk)
            } else {
                StarterAttack::Saving
            };
            let supports = Intent::place(UnitKind::Support, &SUPPORT_CELLS);
            fortification.placed += board.apply(&supports);
            attack
        };
        tracing::debug!(?attack, "starter turn finished");

        TurnReport {
            fortification,
            reinforced,
            offense: None,
            starter: Some(attack),
        }
    }

    fn stall_with_interceptors<B: Board + ?Sized>(&mut self, board: &mut B) -> StarterAttack {
        let mut edges = board.edge_locations(Quadrant::BottomLeft);
        edges.extend(board.edge_locations(Quadrant::BottomRight));
        let candidates = unblocked(board, &edges);
        let price = board.type_cost(UnitKind::Interceptor).mobile;

        let mut interceptors = 0;
        let mut sent = 0;
        while sent < STALL_INTERCEPTORS
            && !candidates.is_empty()
            && board.resource(ResourceKind::MobilePoints) >= price
        {
            let location = candidates[self.rng.gen_range(0..candidates.len())];
            interceptors += board.apply(&Intent::place(UnitKind::Interceptor, &[location]));
            sent += 1;
        }
        StarterAttack::Stalled { interceptors }
    }
}

fn demolisher_line<B: Board + ?Sized>(board: &mut B) -> StarterAttack {
    let mut cheapest = UnitKind::Wall;
    for kind in [UnitKind::Wall, UnitKind::Turret, UnitKind::Support] {
        if board.type_cost(kind).mobile < board.type_cost(cheapest).mobile {
            cheapest = kind;
        }
    }

    let line: Vec<BoardLocation> = (6..=27).rev().map(|x| BoardLocation::new(x, 11)).collect();
    let line = board.apply(&Intent::place(cheapest, &line));
    let demolishers = board.apply(&Intent::wave(
        UnitKind::Demolisher,
        DEMOLISHER_POST,
        UNCAPPED_WAVE,
    ));
    tracing::info!(?cheapest, line, demolishers, "demolisher line");
    StarterAttack::DemolisherLine { line, demolishers }
}

fn send_scouts<B: Board + ?Sized>(board: &mut B, risk: &PathRisk) -> StarterAttack {
    let location = risk
        .rank(board, &SCOUT_STARTS)
        .map_or(SCOUT_STARTS[0], |best| best.location);
    let accepted = board.apply(&Intent::wave(UnitKind::Scout, location, UNCAPPED_WAVE));
    tracing::info!(?location, accepted, "scouts sent");
    StarterAttack::Scouts { location, accepted }
}
