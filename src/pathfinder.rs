use grid_util::point::Point;
use log::debug;

use crate::astar::{find_path_in, SearchContext};
use crate::components::Components;
use crate::config::SearchConfig;
use crate::flow_field::{compute_field_into, FlowField};
use crate::grid::Grid;
use crate::heuristic::{manhattan, Heuristic};
use crate::neighbors::{NeighborBuffer, Pool};

/// Runs searches and flow field passes with pooled scratch state. Each call checks out its own
/// [SearchContext] and [NeighborBuffer] and hands them back when done, so one [Pathfinder] can
/// be shared between threads (e.g. behind an `Arc`) without searches interfering, while
/// repeated searches reuse allocations instead of building fresh ones.
#[derive(Debug, Default)]
pub struct Pathfinder {
    pub config: SearchConfig,
    contexts: Pool<SearchContext<Point, u32>>,
    neighbors: Pool<NeighborBuffer>,
}

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Pathfinder {
        Pathfinder {
            config,
            contexts: Pool::new(),
            neighbors: Pool::new(),
        }
    }

    /// Searches using the [Manhattan distance](crate::heuristic::manhattan) as heuristic.
    pub fn find_path(&self, grid: &Grid, start: Point, goal: Point) -> Option<Vec<Point>> {
        self.find_path_with(grid, start, goal, manhattan)
    }

    pub fn find_path_with<H>(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        heuristic: H,
    ) -> Option<Vec<Point>>
    where
        H: Heuristic,
    {
        self.find_path_with_cost(grid, start, goal, heuristic)
            .map(|(path, _)| path)
    }

    pub fn find_path_with_cost<H>(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        heuristic: H,
    ) -> Option<(Vec<Point>, u32)>
    where
        H: Heuristic,
    {
        let mut context = self.contexts.checkout();
        let mut neighbors = self.neighbors.checkout();
        find_path_in(
            &mut context,
            &mut neighbors,
            grid,
            start,
            goal,
            &self.config,
            heuristic,
        )
    }

    /// Like [find_path_with](Self::find_path_with), but first asks `components` whether the goal
    /// can be reached and skips the search when it cannot. Components generated without
    /// diagonals say nothing about diagonal searches and are not consulted for them.
    pub fn find_path_checked<H>(
        &self,
        grid: &Grid,
        components: &Components,
        start: Point,
        goal: Point,
        heuristic: H,
    ) -> Option<Vec<Point>>
    where
        H: Heuristic,
    {
        let conclusive = components.allow_diagonal() || !self.config.allow_diagonal;
        if conclusive && components.unreachable(start, goal) {
            debug!("Skipping search from {} to {}: not connected", start, goal);
            return None;
        }
        self.find_path_with(grid, start, goal, heuristic)
    }

    /// Computes a flow field towards `goal` under the configured movement mode.
    pub fn flow_field(&self, grid: &Grid, goal: Point) -> FlowField {
        let mut field = FlowField::unreached(grid, goal);
        self.update_flow_field(&mut field, grid, goal);
        field
    }

    /// Recomputes an existing field in place, e.g. once per frame after obstacles moved.
    pub fn update_flow_field(&self, field: &mut FlowField, grid: &Grid, goal: Point) {
        let mut neighbors = self.neighbors.checkout();
        compute_field_into(field, goal, grid, self.config.allow_diagonal, &mut neighbors);
    }

    /// Number of idle search contexts kept for reuse.
    pub fn idle_contexts(&self) -> usize {
        self.contexts.len_idle()
    }
}
