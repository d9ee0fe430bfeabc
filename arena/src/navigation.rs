//! Deterministic path walk used by the host to move mobile units.
//!
//! The walk has three stages. An idealness flood from the start finds the
//! reachable cell closest to the target edge (or any target edge cell). A
//! reverse breadth-first search then assigns path lengths from that endpoint.
//! Finally the unit greedily descends the path lengths, breaking ties in
//! favour of changing direction and then of heading towards the target edge.

use std::collections::VecDeque;

use corner_rush_core::{BoardLocation, ARENA_SIZE, HALF_ARENA};

const CELL_COUNT: usize = (ARENA_SIZE * ARENA_SIZE) as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    None,
    Horizontal,
    Vertical,
}

/// Direction of the target edge along both axes, `1` or `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EdgeDirection {
    x: i32,
    y: i32,
}

impl EdgeDirection {
    fn towards(end_points: &[BoardLocation]) -> Self {
        let Some(point) = end_points.first() else {
            return Self { x: 1, y: 1 };
        };
        Self {
            x: if point.x() < HALF_ARENA { -1 } else { 1 },
            y: if point.y() < HALF_ARENA { -1 } else { 1 },
        }
    }
}

/// Scratch state for one path query.
#[derive(Debug)]
pub(crate) struct PathWalk<'a, F> {
    end_points: &'a [BoardLocation],
    direction: EdgeDirection,
    is_blocked: F,
    path_lengths: Vec<Option<u32>>,
}

impl<'a, F> PathWalk<'a, F>
where
    F: Fn(BoardLocation) -> bool,
{
    pub(crate) fn new(end_points: &'a [BoardLocation], is_blocked: F) -> Self {
        Self {
            end_points,
            direction: EdgeDirection::towards(end_points),
            is_blocked,
            path_lengths: vec![None; CELL_COUNT],
        }
    }

    /// Walks from `start` until a cell with path length zero is reached.
    pub(crate) fn walk(mut self, start: BoardLocation) -> Vec<BoardLocation> {
        if !start.in_arena_bounds() || (self.is_blocked)(start) {
            return Vec::new();
        }

        let ideal = self.most_ideal_reachable(start);
        self.assign_path_lengths(ideal);

        let mut path = vec![start];
        let mut current = start;
        let mut heading = Heading::None;
        while self.path_length(current) != Some(0) && path.len() <= CELL_COUNT {
            let next = self.choose_next_move(current, heading);
            if next == current {
                break;
            }
            heading = if current.x() == next.x() {
                Heading::Vertical
            } else {
                Heading::Horizontal
            };
            path.push(next);
            current = next;
        }
        path
    }

    fn passable(&self, location: BoardLocation) -> bool {
        location.in_arena_bounds() && !(self.is_blocked)(location)
    }

    fn idealness(&self, location: BoardLocation) -> u32 {
        if self.end_points.contains(&location) {
            return u32::MAX;
        }

        let rows = if self.direction.y == 1 {
            location.y()
        } else {
            ARENA_SIZE - 1 - location.y()
        };
        let columns = if self.direction.x == 1 {
            location.x()
        } else {
            ARENA_SIZE - 1 - location.x()
        };
        u32::try_from(ARENA_SIZE * rows + columns).unwrap_or(0)
    }

    fn most_ideal_reachable(&self, start: BoardLocation) -> BoardLocation {
        let mut visited = vec![false; CELL_COUNT];
        let mut queue = VecDeque::from([start]);
        let mut best = self.idealness(start);
        let mut most_ideal = start;
        let _ = mark(&mut visited, start);

        while let Some(location) = queue.pop_front() {
            for neighbour in location.neighbours() {
                if !self.passable(neighbour) {
                    continue;
                }

                let idealness = self.idealness(neighbour);
                if idealness > best {
                    best = idealness;
                    most_ideal = neighbour;
                }

                if mark(&mut visited, neighbour) {
                    queue.push_back(neighbour);
                }
            }
        }

        most_ideal
    }

    fn assign_path_lengths(&mut self, ideal: BoardLocation) {
        let mut queue = VecDeque::new();
        if self.end_points.contains(&ideal) {
            for &end_point in self.end_points {
                self.set_path_length(end_point, 0);
                queue.push_back(end_point);
            }
        } else {
            self.set_path_length(ideal, 0);
            queue.push_back(ideal);
        }

        while let Some(location) = queue.pop_front() {
            if (self.is_blocked)(location) {
                continue;
            }
            let Some(length) = self.path_length(location) else {
                continue;
            };

            for neighbour in location.neighbours() {
                if !self.passable(neighbour) || self.path_length(neighbour).is_some() {
                    continue;
                }
                self.set_path_length(neighbour, length + 1);
                queue.push_back(neighbour);
            }
        }
    }

    fn choose_next_move(&self, current: BoardLocation, heading: Heading) -> BoardLocation {
        let mut ideal = current;
        let Some(mut best) = self.path_length(current) else {
            return current;
        };

        for neighbour in current.neighbours() {
            if !self.passable(neighbour) {
                continue;
            }
            let Some(length) = self.path_length(neighbour) else {
                continue;
            };

            if length > best {
                continue;
            }
            let improves = length < best;
            if !improves && !self.better_direction(current, neighbour, ideal, heading) {
                continue;
            }

            ideal = neighbour;
            best = length;
        }

        ideal
    }

    fn better_direction(
        &self,
        current: BoardLocation,
        candidate: BoardLocation,
        best: BoardLocation,
        heading: Heading,
    ) -> bool {
        match heading {
            Heading::Horizontal if candidate.x() != best.x() => {
                return current.y() != candidate.y();
            }
            Heading::Vertical if candidate.y() != best.y() => {
                return current.x() != candidate.x();
            }
            Heading::None => return current.y() != candidate.y(),
            _ => {}
        }

        if candidate.y() == best.y() {
            return (self.direction.x == 1 && candidate.x() > best.x())
                || (self.direction.x == -1 && candidate.x() < best.x());
        }
        if candidate.x() == best.x() {
            return (self.direction.y == 1 && candidate.y() > best.y())
                || (self.direction.y == -1 && candidate.y() < best.y());
        }
        true
    }

    fn path_length(&self, location: BoardLocation) -> Option<u32> {
        index(location).and_then(|index| self.path_lengths[index])
    }

    fn set_path_length(&mut self, location: BoardLocation, length: u32) {
        if let Some(index) = index(location) {
            self.path_lengths[index] = Some(length);
        }
    }
}

/// Marks the cell visited, returning `true` when it was not visited before.
fn mark(visited: &mut [bool], location: BoardLocation) -> bool {
    match index(location) {
        Some(index) if !visited[index] => {
            visited[index] = true;
            true
        }
        _ => false,
    }
}

pub(crate) fn index(location: BoardLocation) -> Option<usize> {
    if !location.in_arena_bounds() {
        return None;
    }
    usize::try_from(location.x() * ARENA_SIZE + location.y()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use corner_rush_core::Quadrant;

    #[test]
    fn open_board_walk_reaches_the_opposite_edge() {
        let start = BoardLocation::new(13, 0);
        let end_points = Quadrant::TopRight.edge_locations();
        let path = PathWalk::new(&end_points, |_| false).walk(start);

        assert_eq!(path.first(), Some(&start));
        let last = path.last().copied().expect("non-empty path");
        assert!(end_points.contains(&last), "walk ended at {last:?}");
        for pair in path.windows(2) {
            let step = (pair[1].x() - pair[0].x()).abs() + (pair[1].y() - pair[0].y()).abs();
            assert_eq!(step, 1, "path must move one orthogonal cell at a time");
        }
    }

    #[test]
    fn blocked_start_yields_no_path() {
        let start = BoardLocation::new(13, 0);
        let end_points = Quadrant::TopRight.edge_locations();
        let path = PathWalk::new(&end_points, |location| location == start).walk(start);
        assert!(path.is_empty());
    }

    #[test]
    fn sealed_start_stays_in_place() {
        let start = BoardLocation::new(13, 0);
        let end_points = Quadrant::TopRight.edge_locations();
        let path = PathWalk::new(&end_points, |location| location != start).walk(start);
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn equal_length_moves_prefer_turning() {
        let start = BoardLocation::new(13, 0);
        let end_points = Quadrant::TopRight.edge_locations();
        let path = PathWalk::new(&end_points, |_| false).walk(start);

        let staircase = [(13, 0), (13, 1), (14, 1), (14, 2), (15, 2)]
            .map(|(x, y)| BoardLocation::new(x, y));
        assert_eq!(&path[..staircase.len()], &staircase);
    }

    #[test]
    fn walk_detours_through_the_gap_in_a_wall() {
        let gap = BoardLocation::new(18, 5);
        let blocked = |location: BoardLocation| {
            location.y() == 5 && location != gap && (8..=19).contains(&location.x())
        };
        let end_points = Quadrant::TopRight.edge_locations();
        let path = PathWalk::new(&end_points, blocked).walk(BoardLocation::new(13, 0));

        assert!(path.contains(&gap));
        assert!(path.iter().all(|&location| !blocked(location)));
        let last = path.last().copied().expect("gap leaves a path");
        assert!(end_points.contains(&last), "walk ended at {last:?}");
    }
}
