//! Distance estimates for [find_path](crate::astar::find_path). A heuristic is any
//! `Fn(Point, Point) -> u32`; it must never return a negative estimate, which `u32` enforces.
use grid_util::point::Point;

/// Estimate of the remaining cost between two cells. Implemented for every matching closure
/// and function, so plain functions such as [manhattan] can be passed directly.
pub trait Heuristic: Fn(Point, Point) -> u32 {}

impl<F: Fn(Point, Point) -> u32> Heuristic for F {}

/// Sum of absolute coordinate differences. Admissible on a 4-grid with costs of at least 1;
/// on an 8-grid it overestimates but still steers towards the goal.
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Largest coordinate difference. Admissible on an 8-grid with costs of at least 1.
pub fn chebyshev(a: Point, b: Point) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

/// No estimate at all, turning A* into Dijkstra's algorithm. Admissible for any costs,
/// including zero-cost cells.
pub fn zero(_: Point, _: Point) -> u32 {
    0
}
