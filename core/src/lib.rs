#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Corner Rush decision engine.
//!
//! This crate defines the vocabulary that connects the host adapter, the
//! board facade and the pure decision systems. Systems never own the board:
//! they query it through the [`Board`] trait and express every mutation as an
//! [`Intent`] that the facade either accepts or silently declines. The facade
//! debits resources for accepted intents, so systems always re-query balances
//! instead of tracking spend locally.

use serde::{Deserialize, Serialize};

#[cfg(feature = "fixtures")]
pub mod fixtures;

/// Width and height of the square bounding box that contains the diamond arena.
pub const ARENA_SIZE: i32 = 28;

/// Row index at which the board switches from the friendly to the enemy half.
pub const HALF_ARENA: i32 = ARENA_SIZE / 2;

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct BoardLocation {
    x: i32,
    y: i32,
}

impl BoardLocation {
    /// Creates a new board location.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the location, growing from left to right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the location, growing from the friendly back edge to the enemy one.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the location shifted by the provided column and row deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two locations.
    #[must_use]
    pub fn distance(self, other: BoardLocation) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Reports whether the location lies on the friendly half of the board.
    #[must_use]
    pub const fn is_friendly_half(self) -> bool {
        self.y < HALF_ARENA
    }

    /// Reports whether the location lies inside the diamond arena.
    #[must_use]
    pub const fn in_arena_bounds(self) -> bool {
        let (x, y) = (self.x, self.y);
        if y < 0 || y >= ARENA_SIZE {
            return false;
        }

        if y < HALF_ARENA {
            x >= HALF_ARENA - 1 - y && x <= HALF_ARENA + y
        } else {
            x >= y - HALF_ARENA && x <= ARENA_SIZE + HALF_ARENA - 1 - y
        }
    }

    /// The four orthogonal neighbours in the order the host's path walk visits them.
    #[must_use]
    pub const fn neighbours(self) -> [BoardLocation; 4] {
        [
            self.offset(0, 1),
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(-1, 0),
        ]
    }
}

impl From<[i32; 2]> for BoardLocation {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<BoardLocation> for [i32; 2] {
    fn from(location: BoardLocation) -> Self {
        [location.x, location.y]
    }
}

/// Enumerates every in-bounds location in host map order (column-major).
#[must_use]
pub fn arena_locations() -> Vec<BoardLocation> {
    (0..ARENA_SIZE)
        .flat_map(|x| (0..ARENA_SIZE).map(move |y| BoardLocation::new(x, y)))
        .filter(|location| location.in_arena_bounds())
        .collect()
}

/// Kinds of units that can be placed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Cheap stationary blocker.
    Wall,
    /// Stationary unit that shields friendly mobile units passing nearby.
    Support,
    /// Stationary unit that attacks enemy units in range.
    Turret,
    /// Fast, fragile mobile unit.
    Scout,
    /// Slow mobile unit that attacks stationary units from long range.
    Demolisher,
    /// Mobile unit that hunts enemy mobile units.
    Interceptor,
}

impl UnitKind {
    /// Every unit kind in host configuration order.
    pub const ALL: [UnitKind; 6] = [
        Self::Wall,
        Self::Support,
        Self::Turret,
        Self::Scout,
        Self::Demolisher,
        Self::Interceptor,
    ];

    /// Stationary kinds in host configuration order.
    pub const STATIONARY: [UnitKind; 3] = [Self::Wall, Self::Support, Self::Turret];

    /// Reports whether units of this kind stay where they are placed.
    #[must_use]
    pub const fn is_stationary(self) -> bool {
        matches!(self, Self::Wall | Self::Support | Self::Turret)
    }

    /// Position of the kind inside the host's `unitInformation` table.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Wall => 0,
            Self::Support => 1,
            Self::Turret => 2,
            Self::Scout => 3,
            Self::Demolisher => 4,
            Self::Interceptor => 5,
        }
    }

    /// Resolves a `unitInformation` index back into a kind.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Wall),
            1 => Some(Self::Support),
            2 => Some(Self::Turret),
            3 => Some(Self::Scout),
            4 => Some(Self::Demolisher),
            5 => Some(Self::Interceptor),
            _ => None,
        }
    }
}

/// The two independent currencies tracked by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Budget spent on stationary units and upgrades.
    StructurePoints,
    /// Budget spent on mobile units.
    MobilePoints,
}

/// Side that owns a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    /// The agent driven by this engine.
    Friendly,
    /// The opponent.
    Enemy,
}

impl Player {
    /// Returns the opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Friendly => Self::Enemy,
            Self::Enemy => Self::Friendly,
        }
    }
}

/// Named edges of the diamond arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Enemy back edge on the left.
    TopLeft,
    /// Enemy back edge on the right.
    TopRight,
    /// Friendly back edge on the left.
    BottomLeft,
    /// Friendly back edge on the right.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in host order.
    pub const ALL: [Quadrant; 4] = [
        Self::TopRight,
        Self::TopLeft,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Enumerates the fourteen cells that form this edge.
    #[must_use]
    pub fn edge_locations(self) -> Vec<BoardLocation> {
        (0..HALF_ARENA)
            .map(|n| match self {
                Self::TopRight => BoardLocation::new(HALF_ARENA + n, ARENA_SIZE - 1 - n),
                Self::TopLeft => BoardLocation::new(HALF_ARENA - 1 - n, ARENA_SIZE - 1 - n),
                Self::BottomLeft => BoardLocation::new(HALF_ARENA - 1 - n, n),
                Self::BottomRight => BoardLocation::new(HALF_ARENA + n, n),
            })
            .collect()
    }

    /// Edge a mobile unit starting at `start` walks towards.
    #[must_use]
    pub const fn target_for(start: BoardLocation) -> Self {
        let left = start.x() < HALF_ARENA;
        let bottom = start.y() < HALF_ARENA;
        match (left, bottom) {
            (true, true) => Self::TopRight,
            (true, false) => Self::BottomRight,
            (false, true) => Self::TopLeft,
            (false, false) => Self::BottomLeft,
        }
    }
}

/// Enemy back corner regions compared by the threat detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Enemy corner on the left side of the board.
    Left,
    /// Enemy corner on the right side of the board.
    Right,
}

/// Price of an action in both currencies.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cost {
    /// Structure points charged.
    pub structure: f64,
    /// Mobile points charged.
    pub mobile: f64,
}

impl Cost {
    /// Creates a new cost descriptor.
    #[must_use]
    pub const fn new(structure: f64, mobile: f64) -> Self {
        Self { structure, mobile }
    }

    /// Amount charged in the provided currency.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::StructurePoints => self.structure,
            ResourceKind::MobilePoints => self.mobile,
        }
    }

    /// Number of whole purchases affordable with the provided balances.
    #[must_use]
    pub fn affordable(&self, structure: f64, mobile: f64) -> u32 {
        let by_structure = whole_units(structure, self.structure);
        let by_mobile = whole_units(mobile, self.mobile);
        by_structure.min(by_mobile)
    }
}

fn whole_units(balance: f64, price: f64) -> u32 {
    if price <= 0.0 {
        return u32::MAX;
    }
    let count = (balance / price).floor();
    if count <= 0.0 {
        0
    } else if count >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        count as u32
    }
}

/// Statistics a unit gains once upgraded.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeSpec {
    /// Price of the upgrade.
    pub cost: Cost,
    /// Health after upgrading.
    pub health: f64,
    /// Damage per hit against mobile units after upgrading.
    pub damage_to_mobile: f64,
    /// Damage per hit against stationary units after upgrading.
    pub damage_to_stationary: f64,
    /// Attack range after upgrading.
    pub range: f64,
}

/// Configuration-driven description of a unit kind.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSpec {
    /// Two-letter code used on the wire.
    pub shorthand: String,
    /// Price of placing one unit.
    pub cost: Cost,
    /// Starting health.
    pub health: f64,
    /// Damage per hit against mobile units.
    pub damage_to_mobile: f64,
    /// Damage per hit against stationary units.
    pub damage_to_stationary: f64,
    /// Attack range measured in cells.
    pub range: f64,
    /// Upgrade statistics, when the kind can be upgraded.
    pub upgrade: Option<UpgradeSpec>,
}

impl UnitSpec {
    /// Attack range, accounting for an applied upgrade.
    #[must_use]
    pub fn effective_range(&self, upgraded: bool) -> f64 {
        match (&self.upgrade, upgraded) {
            (Some(upgrade), true) => upgrade.range,
            _ => self.range,
        }
    }

    /// Damage against mobile units, accounting for an applied upgrade.
    #[must_use]
    pub fn effective_damage_to_mobile(&self, upgraded: bool) -> f64 {
        match (&self.upgrade, upgraded) {
            (Some(upgrade), true) => upgrade.damage_to_mobile,
            _ => self.damage_to_mobile,
        }
    }
}

/// Immutable lookup table from [`UnitKind`] to its configured statistics.
///
/// Built once when the match starts and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitCatalog {
    units: [UnitSpec; 6],
    removal_code: String,
    upgrade_code: String,
}

impl UnitCatalog {
    /// Creates a catalog from per-kind specs in [`UnitKind::ALL`] order.
    #[must_use]
    pub fn new(units: [UnitSpec; 6], removal_code: String, upgrade_code: String) -> Self {
        Self {
            units,
            removal_code,
            upgrade_code,
        }
    }

    /// Statistics configured for the provided kind.
    #[must_use]
    pub fn spec(&self, kind: UnitKind) -> &UnitSpec {
        &self.units[kind.index()]
    }

    /// Resolves a wire shorthand into the matching kind.
    #[must_use]
    pub fn kind_for_shorthand(&self, shorthand: &str) -> Option<UnitKind> {
        UnitKind::ALL
            .into_iter()
            .find(|kind| self.spec(*kind).shorthand == shorthand)
    }

    /// Wire code that requests removal of a stationary unit.
    #[must_use]
    pub fn removal_code(&self) -> &str {
        &self.removal_code
    }

    /// Wire code that requests an upgrade of a stationary unit.
    #[must_use]
    pub fn upgrade_code(&self) -> &str {
        &self.upgrade_code
    }

    /// Lowest structure-point price among the stationary upgrades, if any exist.
    #[must_use]
    pub fn cheapest_upgrade(&self) -> Option<f64> {
        UnitKind::STATIONARY
            .into_iter()
            .filter_map(|kind| self.spec(kind).upgrade.as_ref())
            .map(|upgrade| upgrade.cost.structure)
            .reduce(f64::min)
    }
}

/// Immutable view of a unit occupying a board cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Kind of unit.
    pub kind: UnitKind,
    /// Side that owns the unit.
    pub owner: Player,
    /// Whether the unit has been upgraded.
    pub upgraded: bool,
    /// Remaining health.
    pub health: f64,
}

/// Host report that a mobile unit reached a back edge and damaged that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breach {
    /// Edge cell where the unit scored.
    pub location: BoardLocation,
    /// Side that owned the scoring unit.
    pub attacker: Player,
}

/// Mutation requested from the board facade.
///
/// Intents are side-effect free values until passed to [`Board::apply`]. The
/// facade may decline individual locations (occupied, out of budget) without
/// failing the rest of the intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Places up to `count` units of `kind` on each location.
    Spawn {
        /// Kind of unit to place.
        kind: UnitKind,
        /// Target locations, attempted in order.
        locations: Vec<BoardLocation>,
        /// Upper bound on units placed per location.
        count: u32,
    },
    /// Upgrades the friendly stationary units on each location.
    Upgrade {
        /// Target locations, attempted in order.
        locations: Vec<BoardLocation>,
    },
    /// Removes the friendly stationary units on each location.
    Remove {
        /// Target locations, attempted in order.
        locations: Vec<BoardLocation>,
    },
}

impl Intent {
    /// Single unit per location.
    #[must_use]
    pub fn place(kind: UnitKind, locations: &[BoardLocation]) -> Self {
        Self::Spawn {
            kind,
            locations: locations.to_vec(),
            count: 1,
        }
    }

    /// Wave of up to `count` units on one location.
    #[must_use]
    pub fn wave(kind: UnitKind, location: BoardLocation, count: u32) -> Self {
        Self::Spawn {
            kind,
            locations: vec![location],
            count,
        }
    }

    /// Upgrade request for the provided locations.
    #[must_use]
    pub fn upgrade(locations: &[BoardLocation]) -> Self {
        Self::Upgrade {
            locations: locations.to_vec(),
        }
    }

    /// Removal request for the provided locations.
    #[must_use]
    pub fn remove(locations: &[BoardLocation]) -> Self {
        Self::Remove {
            locations: locations.to_vec(),
        }
    }
}

/// Query and mutation surface of the board, provided by the host environment.
///
/// Implementations own occupancy, geometry, the path walk and resource
/// accounting. Attempt methods debit resources for accepted actions and report
/// how many actions were accepted; declined actions are not errors.
pub trait Board {
    /// Turn currently being decided, starting from zero.
    fn turn_number(&self) -> u32;

    /// Current balance of the requested currency.
    fn resource(&self, kind: ResourceKind) -> f64;

    /// Price of placing one unit of the provided kind.
    fn type_cost(&self, kind: UnitKind) -> Cost;

    /// Price of upgrading a unit of the provided kind, when upgrades exist.
    fn upgrade_cost(&self, kind: UnitKind) -> Option<Cost>;

    /// Reports whether a stationary unit occupies the location.
    fn contains_stationary_unit(&self, location: BoardLocation) -> bool;

    /// Units occupying the location.
    fn units_at(&self, location: BoardLocation) -> &[UnitSnapshot];

    /// Cells on the requested edge.
    fn edge_locations(&self, quadrant: Quadrant) -> Vec<BoardLocation>;

    /// Every in-bounds location in host map order.
    fn arena_locations(&self) -> Vec<BoardLocation>;

    /// Cells a mobile unit starting at `start` would traverse towards the
    /// opposite edge, starting with `start` itself. Empty when `start` is
    /// blocked or outside the arena.
    fn find_path_to_edge(&self, start: BoardLocation) -> Vec<BoardLocation>;

    /// Stationary units not owned by `defender` that can hit the location.
    fn attackers_able_to_hit(&self, location: BoardLocation, defender: Player)
        -> Vec<UnitSnapshot>;

    /// Places up to `count` units of `kind` on each location.
    fn attempt_spawn(&mut self, kind: UnitKind, locations: &[BoardLocation], count: u32) -> u32;

    /// Upgrades the friendly stationary units on the locations.
    fn attempt_upgrade(&mut self, locations: &[BoardLocation]) -> u32;

    /// Queues removal of the friendly stationary units on the locations.
    fn attempt_remove(&mut self, locations: &[BoardLocation]) -> u32;

    /// Submits an intent, returning the number of accepted actions.
    fn apply(&mut self, intent: &Intent) -> u32 {
        match intent {
            Intent::Spawn {
                kind,
                locations,
                count,
            } => self.attempt_spawn(*kind, locations, *count),
            Intent::Upgrade { locations } => self.attempt_upgrade(locations),
            Intent::Remove { locations } => self.attempt_remove(locations),
        }
    }
}

/// Drops every location already occupied by a stationary unit.
#[must_use]
pub fn unblocked<B: Board + ?Sized>(board: &B, locations: &[BoardLocation]) -> Vec<BoardLocation> {
    locations
        .iter()
        .copied()
        .filter(|location| !board.contains_stationary_unit(*location))
        .collect()
}
