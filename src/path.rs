//! Helpers for inspecting paths returned by the searches.
use grid_util::point::Point;
use itertools::Itertools;

use crate::grid::{Direction, Grid};
use crate::DEFAULT_COST;

/// Total cost of walking `path`: the sum of the costs of every cell entered after the first,
/// saturating at [u32::MAX] like the search does.
pub fn path_cost(grid: &Grid, path: &[Point]) -> u32 {
    path.iter()
        .skip(1)
        .fold(0u32, |acc, &p| acc.saturating_add(grid.cost(p, DEFAULT_COST)))
}

/// Checks that every consecutive pair of cells in `path` is a single allowed step.
pub fn is_contiguous(path: &[Point], allow_diagonal: bool) -> bool {
    path.iter().tuple_windows().all(|(a, b)| {
        let dir = Direction::between(*a, *b);
        !dir.is_zero() && dir.apply(*a) == *b && (allow_diagonal || !dir.is_diagonal())
    })
}

/// Reduces a step-by-step path to its endpoints and the cells where it changes direction.
pub fn path_waypoints(path: &[Point]) -> Vec<Point> {
    let mut waypoints: Vec<Point> = path.first().copied().into_iter().collect();
    for (a, b, c) in path.iter().tuple_windows() {
        if Direction::between(*a, *b) != Direction::between(*b, *c) {
            waypoints.push(*b);
        }
    }
    if path.len() > 1 {
        waypoints.extend(path.last().copied());
    }
    waypoints
}
