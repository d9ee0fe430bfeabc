//! Scriptable in-memory board used by system tests.
//!
//! [`FixtureBoard`] follows the facade contract closely enough for decision
//! systems to be exercised without the host: placements are gated by budget
//! and occupancy, upgrades by budget, and every intent is recorded together
//! with the number of accepted actions. Paths and attacker counts are scripted
//! per location instead of simulated.

use std::collections::BTreeMap;

use crate::{
    arena_locations, Board, BoardLocation, Cost, Intent, Player, Quadrant, ResourceKind,
    UnitCatalog, UnitKind, UnitSnapshot, UnitSpec, UpgradeSpec,
};

/// Catalog mirroring the stock host configuration.
#[must_use]
pub fn standard_catalog() -> UnitCatalog {
    let stationary = |shorthand: &str, cost: f64, health: f64, upgrade: UpgradeSpec| UnitSpec {
        shorthand: shorthand.to_owned(),
        cost: Cost::new(cost, 0.0),
        health,
        damage_to_mobile: 0.0,
        damage_to_stationary: 0.0,
        range: 0.0,
        upgrade: Some(upgrade),
    };
    let mobile = |shorthand: &str, cost: f64, damage: f64, range: f64| UnitSpec {
        shorthand: shorthand.to_owned(),
        cost: Cost::new(0.0, cost),
        health: 15.0,
        damage_to_mobile: damage,
        damage_to_stationary: damage,
        range,
        upgrade: None,
    };

    let wall = stationary(
        "FF",
        1.0,
        60.0,
        UpgradeSpec {
            cost: Cost::new(1.0, 0.0),
            health: 120.0,
            damage_to_mobile: 0.0,
            damage_to_stationary: 0.0,
            range: 0.0,
        },
    );
    let support = stationary(
        "EF",
        4.0,
        30.0,
        UpgradeSpec {
            cost: Cost::new(4.0, 0.0),
            health: 30.0,
            damage_to_mobile: 0.0,
            damage_to_stationary: 0.0,
            range: 0.0,
        },
    );
    let mut turret = stationary(
        "DF",
        2.0,
        75.0,
        UpgradeSpec {
            cost: Cost::new(4.0, 0.0),
            health: 75.0,
            damage_to_mobile: 14.0,
            damage_to_stationary: 0.0,
            range: 3.5,
        },
    );
    turret.damage_to_mobile = 5.0;
    turret.range = 2.5;

    UnitCatalog::new(
        [
            wall,
            support,
            turret,
            mobile("PI", 1.0, 2.0, 3.5),
            mobile("EI", 3.0, 8.0, 4.5),
            mobile("SI", 1.0, 20.0, 4.5),
        ],
        "RM".to_owned(),
        "UP".to_owned(),
    )
}

/// Intent submitted to a [`FixtureBoard`] and the number of accepted actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    /// Intent as submitted.
    pub intent: Intent,
    /// Actions the board accepted.
    pub accepted: u32,
}

/// Scriptable [`Board`] implementation.
#[derive(Clone, Debug)]
pub struct FixtureBoard {
    turn: u32,
    structure: f64,
    mobile: f64,
    catalog: UnitCatalog,
    units: BTreeMap<BoardLocation, Vec<UnitSnapshot>>,
    edges: BTreeMap<u8, Vec<BoardLocation>>,
    paths: BTreeMap<BoardLocation, Vec<BoardLocation>>,
    attackers: BTreeMap<BoardLocation, usize>,
    attempts: Vec<Attempt>,
}

impl FixtureBoard {
    /// Empty board on the provided turn with no resources.
    #[must_use]
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            structure: 0.0,
            mobile: 0.0,
            catalog: standard_catalog(),
            units: BTreeMap::new(),
            edges: BTreeMap::new(),
            paths: BTreeMap::new(),
            attackers: BTreeMap::new(),
            attempts: Vec::new(),
        }
    }

    /// Sets both balances.
    #[must_use]
    pub fn with_resources(mut self, structure: f64, mobile: f64) -> Self {
        self.structure = structure;
        self.mobile = mobile;
        self
    }

    /// Adds a stationary unit owned by `owner`.
    #[must_use]
    pub fn with_unit(mut self, location: BoardLocation, kind: UnitKind, owner: Player) -> Self {
        let health = self.catalog.spec(kind).health;
        self.units.entry(location).or_default().push(UnitSnapshot {
            kind,
            owner,
            upgraded: false,
            health,
        });
        self
    }

    /// Overrides the cells reported for an edge.
    #[must_use]
    pub fn with_edge(mut self, quadrant: Quadrant, locations: Vec<BoardLocation>) -> Self {
        let _ = self.edges.insert(quadrant_key(quadrant), locations);
        self
    }

    /// Scripts the path reported for a start location.
    #[must_use]
    pub fn with_path(mut self, start: BoardLocation, path: Vec<BoardLocation>) -> Self {
        let _ = self.paths.insert(start, path);
        self
    }

    /// Scripts how many enemy turrets can hit a location.
    #[must_use]
    pub fn with_attackers(mut self, location: BoardLocation, count: usize) -> Self {
        let _ = self.attackers.insert(location, count);
        self
    }

    /// Moves the board to another turn, keeping units and recorded attempts.
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Overwrites both balances.
    pub fn set_resources(&mut self, structure: f64, mobile: f64) {
        self.structure = structure;
        self.mobile = mobile;
    }

    /// Every intent submitted so far, in order.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Forgets recorded attempts.
    pub fn clear_attempts(&mut self) {
        self.attempts.clear();
    }

    /// Spawn intents of the provided kind as `(first location, count, accepted)`.
    #[must_use]
    pub fn spawns_of(&self, wanted: UnitKind) -> Vec<(BoardLocation, u32, u32)> {
        self.attempts
            .iter()
            .filter_map(|attempt| match &attempt.intent {
                Intent::Spawn {
                    kind,
                    locations,
                    count,
                } if *kind == wanted => locations
                    .first()
                    .map(|location| (*location, *count, attempt.accepted)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, intent: Intent, accepted: u32) -> u32 {
        self.attempts.push(Attempt { intent, accepted });
        accepted
    }

    fn friendly_stationary_mut(&mut self, location: BoardLocation) -> Option<&mut UnitSnapshot> {
        self.units.get_mut(&location).and_then(|units| {
            units
                .iter_mut()
                .find(|unit| unit.kind.is_stationary() && unit.owner == Player::Friendly)
        })
    }
}

fn quadrant_key(quadrant: Quadrant) -> u8 {
    match quadrant {
        Quadrant::TopRight => 0,
        Quadrant::TopLeft => 1,
        Quadrant::BottomLeft => 2,
        Quadrant::BottomRight => 3,
    }
}

impl Board for FixtureBoard {
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
        self.units.get(&location).map_or(&[], Vec::as_slice)
    }

    fn edge_locations(&self, quadrant: Quadrant) -> Vec<BoardLocation> {
        self.edges
            .get(&quadrant_key(quadrant))
            .cloned()
            .unwrap_or_else(|| quadrant.edge_locations())
    }

    fn arena_locations(&self) -> Vec<BoardLocation> {
        arena_locations()
    }

    fn find_path_to_edge(&self, start: BoardLocation) -> Vec<BoardLocation> {
        if self.contains_stationary_unit(start) {
            return Vec::new();
        }
        self.paths.get(&start).cloned().unwrap_or_default()
    }

    fn attackers_able_to_hit(
        &self,
        location: BoardLocation,
        defender: Player,
    ) -> Vec<UnitSnapshot> {
        let count = self.attackers.get(&location).copied().unwrap_or(0);
        let turret = UnitSnapshot {
            kind: UnitKind::Turret,
            owner: defender.opponent(),
            upgraded: false,
            health: self.catalog.spec(UnitKind::Turret).health,
        };
        vec![turret; count]
    }

    fn attempt_spawn(&mut self, kind: UnitKind, locations: &[BoardLocation], count: u32) -> u32 {
        let cost = self.type_cost(kind);
        let health = self.catalog.spec(kind).health;
        let mut accepted = 0;
        for &location in locations {
            for _ in 0..count {
                let occupied = if kind.is_stationary() {
                    !self.units_at(location).is_empty()
                } else {
                    self.contains_stationary_unit(location)
                };
                if occupied || cost.affordable(self.structure, self.mobile) == 0 {
                    break;
                }
                self.structure -= cost.structure;
                self.mobile -= cost.mobile;
                if kind.is_stationary() {
                    self.units.entry(location).or_default().push(UnitSnapshot {
                        kind,
                        owner: Player::Friendly,
                        upgraded: false,
                        health,
                    });
                }
                accepted += 1;
            }
        }
        self.record(
            Intent::Spawn {
                kind,
                locations: locations.to_vec(),
                count,
            },
            accepted,
        )
    }

    fn attempt_upgrade(&mut self, locations: &[BoardLocation]) -> u32 {
        let mut accepted = 0;
        for &location in locations {
            let Some(kind) = self
                .friendly_stationary_mut(location)
                .filter(|unit| !unit.upgraded)
                .map(|unit| unit.kind)
            else {
                continue;
            };
            let Some(cost) = self.upgrade_cost(kind) else {
                continue;
            };
            if cost.affordable(self.structure, self.mobile) == 0 {
                continue;
            }
            if let Some(unit) = self.friendly_stationary_mut(location) {
                unit.upgraded = true;
            }
            self.structure -= cost.structure;
            self.mobile -= cost.mobile;
            accepted += 1;
        }
        self.record(Intent::upgrade(locations), accepted)
    }

    fn attempt_remove(&mut self, locations: &[BoardLocation]) -> u32 {
        let accepted = locations
            .iter()
            .filter(|location| {
                self.units_at(**location)
                    .iter()
                    .any(|unit| unit.kind.is_stationary() && unit.owner == Player::Friendly)
            })
            .count();
        let accepted = u32::try_from(accepted).unwrap_or(u32::MAX);
        self.record(Intent::remove(locations), accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_stops_when_budget_runs_out() {
        let mut board = FixtureBoard::new(0).with_resources(0.0, 3.0);
        let accepted = board.attempt_spawn(UnitKind::Scout, &[BoardLocation::new(13, 0)], 100);
        assert_eq!(accepted, 3);
        assert!(board.resource(ResourceKind::MobilePoints).abs() < f64::EPSILON);
    }

    #[test]
    fn stationary_spawn_skips_occupied_cells() {
        let location = BoardLocation::new(3, 13);
        let mut board = FixtureBoard::new(0)
            .with_resources(10.0, 0.0)
            .with_unit(location, UnitKind::Wall, Player::Friendly);
        assert_eq!(board.attempt_spawn(UnitKind::Turret, &[location], 1), 0);
        assert_eq!(board.attempts().len(), 1);
    }
}
