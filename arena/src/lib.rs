#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Board facade backed by the host's turn snapshot.
//!
//! [`Arena`] rebuilds the board from a [`TurnState`] every turn, answers the
//! queries of the decision systems, validates and prices their intents the way
//! the host does, and queues accepted actions until [`Arena::submit_turn`]
//! serialises them into the two reply lines.

mod navigation;
pub mod protocol;

use corner_rush_core::{
    arena_locations, Board, BoardLocation, Cost, Player, Quadrant, ResourceKind, UnitCatalog,
    UnitKind, UnitSnapshot, ARENA_SIZE,
};
use serde::Serialize;

pub use protocol::{parse_message, ActionFrame, Message, ProtocolError, TurnState};

use navigation::{index, PathWalk};

const CELL_COUNT: usize = (ARENA_SIZE * ARENA_SIZE) as usize;

/// Kind of queued action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Place a unit.
    Spawn(UnitKind),
    /// Upgrade the stationary unit on the cell.
    Upgrade,
    /// Remove the stationary unit on the cell.
    Remove,
}

/// Action accepted during the turn, awaiting submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueuedAction {
    /// What to do.
    pub action: Action,
    /// Where to do it.
    pub location: BoardLocation,
}

/// Serialised reply for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Structure placements, upgrades and removals.
    pub build: String,
    /// Mobile unit deployments.
    pub deploy: String,
}

/// Authoritative board for the turn being decided.
#[derive(Debug)]
pub struct Arena {
    catalog: UnitCatalog,
    turn: u32,
    structure: f64,
    mobile: f64,
    cells: Vec<Vec<UnitSnapshot>>,
    max_range: f64,
    build_stack: Vec<QueuedAction>,
    deploy_stack: Vec<QueuedAction>,
}

impl Arena {
    /// Builds the board for a turn from the host snapshot.
    #[must_use]
    pub fn new(catalog: UnitCatalog, state: &TurnState) -> Self {
        let max_range = UnitKind::ALL
            .into_iter()
            .map(|kind| {
                let spec = catalog.spec(kind);
                spec.effective_range(true).max(spec.range)
            })
            .fold(0.0, f64::max);

        let mut arena = Self {
            catalog,
            turn: state.turn,
            structure: state.friendly.structure,
            mobile: state.friendly.mobile,
            cells: vec![Vec::new(); CELL_COUNT],
            max_range,
            build_stack: Vec::new(),
            deploy_stack: Vec::new(),
        };

        for unit in &state.units {
            let health = unit.health;
            arena.add_unit(unit.location, unit.kind, unit.owner, health);
        }
        for location in &state.upgraded {
            if let Some(unit) = arena.stationary_mut(*location) {
                unit.upgraded = true;
            }
        }
        arena
    }

    /// Catalog the arena prices intents with.
    #[must_use]
    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Actions accepted so far for the structure phase.
    #[must_use]
    pub fn build_stack(&self) -> &[QueuedAction] {
        &self.build_stack
    }

    /// Actions accepted so far for the deploy phase.
    #[must_use]
    pub fn deploy_stack(&self) -> &[QueuedAction] {
        &self.deploy_stack
    }

    /// Drains the queued actions into the two reply lines.
    pub fn submit_turn(&mut self) -> Result<Submission, ProtocolError> {
        let build = self.encode(&self.build_stack)?;
        let deploy = self.encode(&self.deploy_stack)?;
        tracing::debug!(
            turn = self.turn,
            build = self.build_stack.len(),
            deploy = self.deploy_stack.len(),
            "submitting turn"
        );
        self.build_stack.clear();
        self.deploy_stack.clear();
        Ok(Submission { build, deploy })
    }

    fn encode(&self, stack: &[QueuedAction]) -> Result<String, ProtocolError> {
        let entries: Vec<WireAction<'_>> = stack
            .iter()
            .map(|queued| {
                let code = match queued.action {
                    Action::Spawn(kind) => self.catalog.spec(kind).shorthand.as_str(),
                    Action::Upgrade => self.catalog.upgrade_code(),
                    Action::Remove => self.catalog.removal_code(),
                };
                WireAction(code, queued.location.x(), queued.location.y())
            })
            .collect();
        Ok(serde_json::to_string(&entries)?)
    }

    fn add_unit(&mut self, location: BoardLocation, kind: UnitKind, owner: Player, health: f64) {
        if let Some(index) = index(location) {
            self.cells[index].push(UnitSnapshot {
                kind,
                owner,
                upgraded: false,
                health,
            });
        }
    }

    fn stationary_mut(&mut self, location: BoardLocation) -> Option<&mut UnitSnapshot> {
        let index = index(location)?;
        self.cells[index]
            .iter_mut()
            .find(|unit| unit.kind.is_stationary())
    }

    fn can_spawn(&self, kind: UnitKind, location: BoardLocation) -> bool {
        if !location.in_arena_bounds() || !location.is_friendly_half() {
            return false;
        }
        if self.type_cost(kind).affordable(self.structure, self.mobile) == 0 {
            return false;
        }

        let blocked = self.contains_stationary_unit(location)
            || (kind.is_stationary() && !self.units_at(location).is_empty());
        if blocked {
            return false;
        }

        kind.is_stationary()
            || Quadrant::BottomLeft.edge_locations().contains(&location)
            || Quadrant::BottomRight.edge_locations().contains(&location)
    }

    fn charge(&mut self, cost: Cost) {
        self.structure -= cost.structure;
        self.mobile -= cost.mobile;
    }
}

#[derive(Serialize)]
struct WireAction<'a>(&'a str, i32, i32);

impl Board for Arena {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn resource(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::StructurePoints => self.structure,
            ResourceKind::MobilePoints => self.mobile,
        }
    }

    fn type_cost(&self, kind: UnitKind) -> Cost {
        self.catalog.spec(kind).cost
    }

    fn upgrade_cost(&self, kind: UnitKind) -> Option<Cost> {
        self.catalog
            .spec(kind)
            .upgrade
            .as_ref()
            .map(|upgrade| upgrade.cost)
    }

    fn contains_stationary_unit(&self, location: BoardLocation) -> bool {
        self.units_at(location)
            .iter()
            .any(|unit| unit.kind.is_stationary())
    }

    fn units_at(&self, location: BoardLocation) -> &[UnitSnapshot] {
        index(location).map_or(&[], |index| self.cells[index].as_slice())
    }

    fn edge_locations(&self, quadrant: Quadrant) -> Vec<BoardLocation> {
        quadrant.edge_locations()
    }

    fn arena_locations(&self) -> Vec<BoardLocation> {
        arena_locations()
    }

    fn find_path_to_edge(&self, start: BoardLocation) -> Vec<BoardLocation> {
        if self.contains_stationary_unit(start) {
            tracing::trace!(?start, "path requested from a blocked cell");
            return Vec::new();
        }
        let end_points = Quadrant::target_for(start).edge_locations();
        PathWalk::new(&end_points, |location| {
            self.contains_stationary_unit(location)
        })
        .walk(start)
    }

    fn attackers_able_to_hit(
        &self,
        location: BoardLocation,
        defender: Player,
    ) -> Vec<UnitSnapshot> {
        let reach = self.max_range.ceil().clamp(0.0, f64::from(ARENA_SIZE)) as i32;
        let mut attackers = Vec::new();
        for x in (location.x() - reach)..=(location.x() + reach) {
            for y in (location.y() - reach)..=(location.y() + reach) {
                let candidate = BoardLocation::new(x, y);
                for unit in self.units_at(candidate) {
                    if unit.owner == defender || !unit.kind.is_stationary() {
                        continue;
                    }
                    let spec = self.catalog.spec(unit.kind);
                    if spec.effective_damage_to_mobile(unit.upgraded) <= 0.0 {
                        continue;
                    }
                    if location.distance(candidate) <= spec.effective_range(unit.upgraded) {
                        attackers.push(*unit);
                    }
                }
            }
        }
        attackers
    }

    fn attempt_spawn(&mut self, kind: UnitKind, locations: &[BoardLocation], count: u32) -> u32 {
        let cost = self.type_cost(kind);
        let health = self.catalog.spec(kind).health;
        let mut spawned = 0;
        for &location in locations {
            for _ in 0..count {
                if !self.can_spawn(kind, location) {
                    tracing::trace!(?kind, ?location, "spawn declined");
                    break;
                }
                self.charge(cost);
                let queued = QueuedAction {
                    action: Action::Spawn(kind),
                    location,
                };
                if kind.is_stationary() {
                    self.add_unit(location, kind, Player::Friendly, health);
                    self.build_stack.push(queued);
                } else {
                    self.deploy_stack.push(queued);
                }
                spawned += 1;
            }
        }
        spawned
    }

    fn attempt_upgrade(&mut self, locations: &[BoardLocation]) -> u32 {
        let mut upgraded = 0;
        for &location in locations {
            if !location.is_friendly_half() {
                continue;
            }
            let Some(kind) = self
                .stationary_mut(location)
                .filter(|unit| !unit.upgraded && unit.owner == Player::Friendly)
                .map(|unit| unit.kind)
            else {
                continue;
            };
            let Some(cost) = self.upgrade_cost(kind) else {
                continue;
            };
            if cost.affordable(self.structure, self.mobile) == 0 {
                tracing::trace!(?location, "upgrade declined");
                continue;
            }

            self.charge(cost);
            if let Some(unit) = self.stationary_mut(location) {
                unit.upgraded = true;
            }
            self.build_stack.push(QueuedAction {
                action: Action::Upgrade,
                location,
            });
            upgraded += 1;
        }
        upgraded
    }

    fn attempt_remove(&mut self, locations: &[BoardLocation]) -> u32 {
        let mut removed = 0;
        for &location in locations {
            if location.is_friendly_half() && self.contains_stationary_unit(location) {
                self.build_stack.push(QueuedAction {
                    action: Action::Remove,
                    location,
                });
                removed += 1;
            }
        }
        removed
    }
}
