//! Flow fields: a breadth-first pass from one goal records, for every reachable cell, the step
//! that leads one cell closer to it. Any number of agents can then look up their next step in
//! constant time and trace a path in time proportional to its length.
//!
//! Every step counts as one, whatever the cells' traversal costs are. A field is a snapshot:
//! it is not updated when the grid changes and must be recomputed to reflect new obstacles.
use grid_util::grid::{Grid as ValueGrid, SimpleGrid};
use grid_util::point::Point;
use log::trace;
use std::collections::VecDeque;

use crate::grid::{Direction, Grid};
use crate::neighbors::NeighborBuffer;

/// Cost of cells the goal cannot be reached from.
pub const UNREACHED: u32 = u32::MAX;

/// Per-cell step count to the goal and the direction to take from there, kept in two
/// [SimpleGrid]s of the grid's shape.
#[derive(Clone, Debug)]
pub struct FlowField {
    goal: Point,
    costs: SimpleGrid<u32>,
    directions: SimpleGrid<Direction>,
}

impl PartialEq for FlowField {
    fn eq(&self, other: &FlowField) -> bool {
        self.goal == other.goal
            && self.costs.width == other.costs.width
            && self.costs.height == other.costs.height
            && self.costs.values == other.costs.values
            && self.directions.values == other.directions.values
    }
}

impl Eq for FlowField {}

fn refill<T: Copy>(values: &mut SimpleGrid<T>, grid: &Grid, value: T) {
    values.width = grid.width();
    values.height = grid.height();
    values.values.clear();
    values.values.resize(grid.area(), value);
}

impl FlowField {
    /// A field of the grid's shape in which no cell is reached.
    pub fn unreached(grid: &Grid, goal: Point) -> FlowField {
        FlowField {
            goal,
            costs: SimpleGrid::new(grid.width(), grid.height(), UNREACHED),
            directions: SimpleGrid::new(grid.width(), grid.height(), Direction::ZERO),
        }
    }

    fn reset(&mut self, grid: &Grid, goal: Point) {
        self.goal = goal;
        refill(&mut self.costs, grid, UNREACHED);
        refill(&mut self.directions, grid, Direction::ZERO);
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn width(&self) -> usize {
        self.costs.width
    }

    pub fn height(&self) -> usize {
        self.costs.height
    }

    /// Steps from `cell` to the goal, or [None] if the goal is unreachable from it or the cell
    /// lies outside the field.
    pub fn cost_at(&self, cell: Point) -> Option<u32> {
        if !self.costs.point_in_bounds(cell) {
            return None;
        }
        Some(self.costs.get_point(cell)).filter(|&c| c != UNREACHED)
    }

    /// The step to take from `cell` towards the goal. [Direction::ZERO] at the goal itself, at
    /// unreached cells and outside the field.
    pub fn direction_at(&self, cell: Point) -> Direction {
        if self.directions.point_in_bounds(cell) {
            self.directions.get_point(cell)
        } else {
            Direction::ZERO
        }
    }

    /// Number of cells from which the goal can be reached, the goal included.
    pub fn reachable_count(&self) -> usize {
        self.costs.values.iter().filter(|&&c| c != UNREACHED).count()
    }
}

/// Computes the flow field towards `goal`. If the goal is blocked or outside the grid no cell
/// is reached.
pub fn compute_field(goal: Point, grid: &Grid, allow_diagonal: bool) -> FlowField {
    let mut field = FlowField::unreached(grid, goal);
    let mut neighbors = NeighborBuffer::new();
    compute_field_into(&mut field, goal, grid, allow_diagonal, &mut neighbors);
    field
}

/// Recomputes `field` in place, reusing its allocations.
pub fn compute_field_into(
    field: &mut FlowField,
    goal: Point,
    grid: &Grid,
    allow_diagonal: bool,
    neighbors: &mut NeighborBuffer,
) {
    field.reset(grid, goal);
    if !grid.is_walkable(goal) {
        trace!("Flow field goal {} is blocked or outside the grid", goal);
        return;
    }
    field.costs.set_point(goal, 0);
    let mut queue = VecDeque::with_capacity(grid.width().max(grid.height()) * 4);
    queue.push_back(goal);
    while let Some(current) = queue.pop_front() {
        let next_cost = field.costs.get_point(current).saturating_add(1);
        // Neighbours are walkable, hence inside the field
        grid.neighbors(current, allow_diagonal, neighbors);
        for &n in neighbors.iter() {
            if next_cost < field.costs.get_point(n) {
                field.costs.set_point(n, next_cost);
                field.directions.set_point(n, Direction::between(n, current));
                queue.push_back(n);
            }
        }
    }
    trace!(
        "Flow field towards {} reaches {} cells",
        goal,
        field.reachable_count()
    );
}

/// Follows the field from `start`. The returned path begins with `start` and ends at `goal`, or
/// earlier where the field gives no direction or leads outside the grid.
pub fn trace_from_field(field: &FlowField, start: Point, goal: Point) -> Vec<Point> {
    let mut path = vec![start];
    let mut current = start;
    // Fields computed by compute_field never cycle; the bound guards against hand-edited ones
    for _ in 0..field.costs.values.len() {
        if current == goal {
            break;
        }
        let dir = field.direction_at(current);
        if dir.is_zero() {
            break;
        }
        current = dir.apply(current);
        path.push(current);
    }
    path
}
