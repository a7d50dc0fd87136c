use grid_util::grid::{BoolGrid, Grid as ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::grid::{Direction, Grid};

/// Connected components of the walkable cells of a grid, maintained in a [UnionFind]
/// structure. Answers whether a search can succeed without running one, so hopeless searches
/// can be skipped instead of flood-filling a whole region. Like a flow field this is a snapshot
/// and must be regenerated after obstacles change.
#[derive(Clone, Debug)]
pub struct Components {
    walkable: BoolGrid,
    sets: UnionFind<usize>,
    allow_diagonal: bool,
}

impl Components {
    /// Links every walkable cell to its walkable neighbours under the given movement mode.
    pub fn generate(grid: &Grid, allow_diagonal: bool) -> Components {
        info!(
            "Generating connected components for a {}x{} grid",
            grid.width(),
            grid.height()
        );
        let mut sets = UnionFind::new(grid.area());
        let mut walkable = BoolGrid::new(grid.width(), grid.height(), false);
        for cell in (0..grid.area()).map(|ix| grid.cell_at(ix)) {
            walkable.set_point(cell, grid.is_walkable(cell));
        }
        // Links are symmetric, so looking forward (east, south and the two southern diagonals)
        // covers every pair once.
        let forward: &[Direction] = if allow_diagonal {
            &[
                Direction::EAST,
                Direction::SOUTH,
                Direction::SOUTH_EAST,
                Direction::SOUTH_WEST,
            ]
        } else {
            &[Direction::EAST, Direction::SOUTH]
        };
        for cell in (0..grid.area()).map(|ix| grid.cell_at(ix)) {
            if !walkable.get_point(cell) {
                continue;
            }
            let ix = walkable.get_ix_point(&cell);
            for dir in forward {
                let n = dir.apply(cell);
                if walkable.point_in_bounds(n) && walkable.get_point(n) {
                    sets.union(ix, walkable.get_ix_point(&n));
                }
            }
        }
        Components {
            walkable,
            sets,
            allow_diagonal,
        }
    }

    pub fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    /// Retrieves the component id of a walkable cell.
    pub fn component(&self, cell: Point) -> Option<usize> {
        if self.walkable.point_in_bounds(cell) && self.walkable.get_point(cell) {
            Some(self.sets.find(self.walkable.get_ix_point(&cell)))
        } else {
            None
        }
    }

    /// Checks if a search from `start` can reach `goal`. Both must be walkable unless they are
    /// the same cell.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        if start == goal {
            return true;
        }
        match (self.component(start), self.component(goal)) {
            (Some(s), Some(g)) => s == g,
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: Point, goal: Point) -> bool {
        !self.reachable(start, goal)
    }
}
