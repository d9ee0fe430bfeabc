#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that measures enemy fortification density in fixed regions.
//!
//! The corner comparison drives the rush direction: the engine attacks the
//! enemy back corner holding fewer turrets.

use corner_rush_core::{Board, BoardLocation, Corner, Player, UnitKind};

const fn cell(x: i32, y: i32) -> BoardLocation {
    BoardLocation::new(x, y)
}

/// Cells scanned for the enemy's left back corner.
pub const LEFT_CORNER: [BoardLocation; 11] = [
    cell(0, 14),
    cell(1, 14),
    cell(2, 14),
    cell(3, 14),
    cell(4, 14),
    cell(5, 14),
    cell(1, 15),
    cell(2, 15),
    cell(3, 15),
    cell(4, 15),
    cell(5, 15),
];

/// Cells scanned for the enemy's right back corner.
pub const RIGHT_CORNER: [BoardLocation; 11] = [
    cell(22, 14),
    cell(23, 14),
    cell(24, 14),
    cell(25, 14),
    cell(26, 14),
    cell(27, 14),
    cell(22, 15),
    cell(23, 15),
    cell(24, 15),
    cell(25, 15),
    cell(26, 15),
];

/// Cells that make up the provided corner region.
#[must_use]
pub fn corner_cells(corner: Corner) -> &'static [BoardLocation] {
    match corner {
        Corner::Left => &LEFT_CORNER,
        Corner::Right => &RIGHT_CORNER,
    }
}

/// Counts enemy stationary units inside a corner, optionally of one kind only.
#[must_use]
pub fn count_corner_units<B: Board + ?Sized>(
    board: &B,
    corner: Corner,
    kind: Option<UnitKind>,
) -> u32 {
    count_enemy_units_in(board, corner_cells(corner).iter().copied(), kind)
}

/// Counts enemy stationary units anywhere in the provided rows.
#[must_use]
pub fn count_enemy_units<B: Board + ?Sized>(
    board: &B,
    kind: Option<UnitKind>,
    rows: &[i32],
) -> u32 {
    let locations = board
        .arena_locations()
        .into_iter()
        .filter(|location| rows.contains(&location.y()));
    count_enemy_units_in(board, locations, kind)
}

fn count_enemy_units_in<B, I>(board: &B, locations: I, kind: Option<UnitKind>) -> u32
where
    B: Board + ?Sized,
    I: IntoIterator<Item = BoardLocation>,
{
    let mut total = 0;
    for location in locations {
        if !board.contains_stationary_unit(location) {
            continue;
        }
        total += board
            .units_at(location)
            .iter()
            .filter(|unit| unit.owner == Player::Enemy)
            .filter(|unit| kind.map_or(true, |wanted| unit.kind == wanted))
            .count();
    }
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Corner with strictly fewer enemy turrets; equal counts favour the right.
#[must_use]
pub fn weaker_corner<B: Board + ?Sized>(board: &B) -> Corner {
    let left = count_corner_units(board, Corner::Left, Some(UnitKind::Turret));
    let right = count_corner_units(board, Corner::Right, Some(UnitKind::Turret));
    tracing::debug!(left, right, "enemy corner turret counts");
    if left < right {
        Corner::Left
    } else {
        Corner::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_regions_are_disjoint_and_in_bounds() {
        for location in LEFT_CORNER {
            assert!(location.in_arena_bounds());
            assert!(!RIGHT_CORNER.contains(&location));
        }
        assert!(RIGHT_CORNER.iter().all(|location| location.in_arena_bounds()));
    }
}
