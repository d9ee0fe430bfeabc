//! Fixed fortification layouts.

use corner_rush_core::{BoardLocation, UnitKind};

use crate::{Step, Tier, UpgradeGate};

const fn cell(x: i32, y: i32) -> BoardLocation {
    BoardLocation::new(x, y)
}

/// Front corner walls, forward turrets and their upgrades.
pub const CORNER_RUSH_TIER_1: Tier = Tier {
    name: "tier-1",
    gate: UpgradeGate::Always,
    steps: &[
        Step::Place(
            UnitKind::Wall,
            &[
                cell(0, 13),
                cell(1, 13),
                cell(2, 13),
                cell(3, 13),
                cell(24, 13),
                cell(25, 13),
                cell(26, 13),
                cell(27, 13),
                cell(5, 11),
                cell(22, 11),
                cell(11, 9),
                cell(16, 9),
            ],
        ),
        Step::Place(
            UnitKind::Turret,
            &[cell(5, 10), cell(22, 10), cell(11, 8), cell(16, 8)],
        ),
        Step::Upgrade(&[cell(5, 10), cell(22, 10)]),
    ],
};

/// Secondary wall and turret lines.
pub const CORNER_RUSH_TIER_2: Tier = Tier {
    name: "tier-2",
    gate: UpgradeGate::Affordable,
    steps: &[
        Step::Place(
            UnitKind::Wall,
            &[
                cell(4, 12),
                cell(23, 12),
                cell(10, 9),
                cell(12, 9),
                cell(15, 9),
                cell(17, 9),
                cell(6, 11),
                cell(21, 11),
                cell(4, 11),
                cell(23, 11),
                cell(7, 9),
                cell(20, 9),
            ],
        ),
        Step::Place(
            UnitKind::Turret,
            &[
                cell(2, 12),
                cell(3, 12),
                cell(24, 12),
                cell(25, 12),
                cell(12, 8),
                cell(15, 8),
                cell(9, 8),
                cell(19, 8),
                cell(6, 10),
                cell(21, 10),
            ],
        ),
        Step::Upgrade(&[
            cell(2, 13),
            cell(3, 13),
            cell(24, 13),
            cell(25, 13),
            cell(2, 12),
            cell(3, 12),
            cell(24, 12),
            cell(25, 12),
            cell(6, 10),
            cell(21, 10),
            cell(8, 8),
            cell(11, 8),
            cell(12, 8),
            cell(15, 8),
            cell(16, 8),
            cell(19, 8),
            cell(18, 8),
            cell(6, 11),
            cell(21, 11),
        ]),
    ],
};

/// Tertiary lines closing the gaps between the first two tiers.
pub const CORNER_RUSH_TIER_3: Tier = Tier {
    name: "tier-3",
    gate: UpgradeGate::Affordable,
    steps: &[
        Step::Place(
            UnitKind::Wall,
            &[
                cell(7, 10),
                cell(8, 9),
                cell(9, 9),
                cell(13, 9),
                cell(14, 9),
                cell(18, 9),
                cell(19, 9),
                cell(20, 10),
                cell(1, 12),
                cell(26, 12),
            ],
        ),
        Step::Place(
            UnitKind::Turret,
            &[cell(8, 8), cell(18, 8), cell(3, 11), cell(24, 11)],
        ),
        Step::Upgrade(&[
            cell(0, 13),
            cell(1, 13),
            cell(26, 13),
            cell(27, 13),
            cell(1, 12),
            cell(26, 12),
            cell(5, 11),
            cell(22, 11),
            cell(8, 9),
            cell(9, 9),
            cell(12, 9),
            cell(15, 9),
            cell(18, 9),
            cell(19, 9),
            cell(11, 8),
            cell(13, 8),
            cell(14, 8),
            cell(16, 8),
        ]),
    ],
};

/// Support cluster behind the front line.
pub const CORNER_RUSH_SUPPORT: Tier = Tier {
    name: "support",
    gate: UpgradeGate::Always,
    steps: &[Step::Place(
        UnitKind::Support,
        &[
            cell(11, 4),
            cell(12, 4),
            cell(13, 4),
            cell(14, 4),
            cell(15, 4),
            cell(16, 4),
            cell(12, 3),
            cell(13, 3),
            cell(14, 3),
            cell(15, 3),
        ],
    )],
};

/// Layered defense used by the corner rush profile, in build order.
pub const CORNER_RUSH: &[Tier] = &[
    CORNER_RUSH_TIER_1,
    CORNER_RUSH_TIER_2,
    CORNER_RUSH_TIER_3,
    CORNER_RUSH_SUPPORT,
];

/// Spread-out opening defense with armoured walls in front of two turrets.
pub const STARTER: &[Tier] = &[Tier {
    name: "starter",
    gate: UpgradeGate::Always,
    steps: &[
        Step::Place(
            UnitKind::Turret,
            &[
                cell(0, 13),
                cell(27, 13),
                cell(8, 11),
                cell(19, 11),
                cell(13, 11),
                cell(14, 11),
            ],
        ),
        Step::Place(UnitKind::Wall, &[cell(8, 12), cell(19, 12)]),
        Step::Upgrade(&[cell(8, 12), cell(19, 12)]),
    ],
}];

/// Wall funnel guiding enemy units through the middle of the siege layout.
pub const SIEGE_FUNNEL: &[BoardLocation] = &[
    cell(2, 11),
    cell(3, 10),
    cell(4, 9),
    cell(5, 8),
    cell(19, 8),
    cell(6, 7),
    cell(19, 7),
    cell(7, 6),
    cell(18, 6),
    cell(8, 5),
    cell(17, 5),
    cell(9, 4),
    cell(16, 4),
    cell(10, 3),
    cell(15, 3),
    cell(11, 2),
    cell(12, 2),
    cell(13, 2),
    cell(14, 2),
];

/// Funnel with turret-heavy corners and a support spine.
pub const SIEGE: &[Tier] = &[Tier {
    name: "siege",
    gate: UpgradeGate::Always,
    steps: &[
        Step::Place(UnitKind::Wall, SIEGE_FUNNEL),
        Step::Place(UnitKind::Turret, &[cell(1, 12), cell(2, 12)]),
        Step::Place(
            UnitKind::Turret,
            &[
                cell(24, 12),
                cell(20, 9),
                cell(25, 13),
                cell(26, 13),
                cell(23, 12),
                cell(25, 12),
                cell(25, 11),
                cell(20, 10),
                cell(21, 10),
            ],
        ),
        Step::Place(
            UnitKind::Turret,
            &[
                cell(2, 13),
                cell(1, 12),
                cell(2, 12),
                cell(3, 12),
                cell(4, 12),
                cell(5, 12),
                cell(6, 12),
                cell(7, 12),
                cell(3, 11),
            ],
        ),
        Step::Place(UnitKind::Wall, &[cell(0, 13), cell(1, 13), cell(2, 13)]),
        Step::Place(
            UnitKind::Wall,
            &[
                cell(23, 13),
                cell(24, 13),
                cell(27, 13),
                cell(26, 12),
                cell(20, 11),
                cell(21, 11),
                cell(19, 10),
            ],
        ),
        Step::Place(UnitKind::Support, &[cell(22, 10), cell(21, 9), cell(20, 8)]),
        Step::Place(
            UnitKind::Support,
            &[
                cell(18, 7),
                cell(17, 6),
                cell(16, 5),
                cell(15, 4),
                cell(11, 3),
                cell(12, 3),
                cell(13, 3),
                cell(14, 3),
            ],
        ),
    ],
}];
