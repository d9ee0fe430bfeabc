#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Match session wiring the decision systems into a per-turn pass.
//!
//! A [`Session`] is created when the host sends its configuration and owns
//! every piece of state that outlives a turn: the unit catalog, the breach log
//! and the profile's own bookkeeping. The host adapter drives it with one
//! [`Session::on_turn`] call per deploy phase and one [`Session::on_breach`]
//! call per breach reported in action frames.

mod corner_rush;
mod siege;
mod starter;

use corner_rush_core::{Board, Breach, UnitCatalog};
use corner_rush_system_fortification::FortificationReport;
use corner_rush_system_offense::{Offense, OffenseOutcome};
use corner_rush_system_path_risk::PathRisk;
use corner_rush_system_reactive_defense::BreachLog;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use corner_rush::CornerRush;
pub use siege::Siege;
pub use starter::{Starter, StarterAttack};

/// Turn plans the session can run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Layered defense with a two-phase corner scout rush.
    #[default]
    CornerRush,
    /// Spread-out defense with interceptor stalling and opportunistic raids.
    Starter,
    /// Wall funnel with budget-gated upgrades and demolisher pushes.
    Siege,
}

/// Options fixed for the whole match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Plan to run every turn.
    pub profile: Profile,
    /// Seed for the random choices; drawn from the OS when absent.
    pub seed: Option<u64>,
}

/// What a turn pass submitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Fortification placements and upgrades.
    pub fortification: FortificationReport,
    /// Turrets accepted in front of recorded breaches.
    pub reinforced: u32,
    /// Offense step result, for the corner rush profile.
    pub offense: Option<OffenseOutcome>,
    /// Attack chosen by the starter profile.
    pub starter: Option<StarterAttack>,
}

#[derive(Clone, Debug)]
enum Plan {
    CornerRush(CornerRush),
    Starter(Starter),
    Siege(Siege),
}

/// Per-match decision state.
#[derive(Clone, Debug)]
pub struct Session {
    catalog: UnitCatalog,
    risk: PathRisk,
    breaches: BreachLog,
    plan: Plan,
}

impl Session {
    /// Starts a match with the host's unit configuration.
    #[must_use]
    pub fn on_game_start(config: SessionConfig, catalog: UnitCatalog) -> Self {
        let plan = match config.profile {
            Profile::CornerRush => Plan::CornerRush(CornerRush::new()),
            Profile::Starter => {
                let rng = match config.seed {
                    Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                    None => ChaCha8Rng::from_entropy(),
                };
                Plan::Starter(Starter::new(rng))
            }
            Profile::Siege => Plan::Siege(Siege::new()),
        };
        tracing::info!(profile = ?config.profile, seed = ?config.seed, "session started");
        Self {
            risk: PathRisk::from_catalog(&catalog),
            catalog,
            breaches: BreachLog::new(),
            plan,
        }
    }

    /// Profile running this match.
    #[must_use]
    pub fn profile(&self) -> Profile {
        match self.plan {
            Plan::CornerRush(_) => Profile::CornerRush,
            Plan::Starter(_) => Profile::Starter,
            Plan::Siege(_) => Profile::Siege,
        }
    }

    /// Unit configuration received at game start.
    #[must_use]
    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Enemy breaches recorded so far.
    #[must_use]
    pub fn breaches(&self) -> &BreachLog {
        &self.breaches
    }

    /// Offense machine, when the corner rush profile is running.
    #[must_use]
    pub fn offense(&self) -> Option<&Offense> {
        match &self.plan {
            Plan::CornerRush(plan) => Some(plan.offense()),
            Plan::Starter(_) | Plan::Siege(_) => None,
        }
    }

    /// Records a breach reported by the host. Returns whether it was kept.
    pub fn on_breach(&mut self, breach: Breach) -> bool {
        self.breaches.record(breach)
    }

    /// Runs the decision pass for the board's current turn.
    pub fn on_turn<B: Board + ?Sized>(&mut self, board: &mut B) -> TurnReport {
        let span = tracing::debug_span!("turn", turn = board.turn_number());
        let _entered = span.enter();
        match &mut self.plan {
            Plan::CornerRush(plan) => plan.on_turn(board, &self.breaches, &self.risk),
            Plan::Starter(plan) => plan.on_turn(board, &self.breaches, &self.risk),
            Plan::Siege(plan) => plan.on_turn(board),
        }
    }
}
