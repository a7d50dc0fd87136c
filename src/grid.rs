use core::fmt;
use grid_util::grid::{BoolGrid, Grid as ValueGrid, SimpleGrid};
use grid_util::point::Point;
use grid_util::rect::Rect;

use crate::error::{GridError, Result};
use crate::neighbors::NeighborBuffer;
use crate::{DEFAULT_COST, MAX_NEIGHBORS};

/// A unit step between two grid cells. North points towards `y - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const ZERO: Direction = Direction::new(0, 0);
    pub const NORTH: Direction = Direction::new(0, -1);
    pub const EAST: Direction = Direction::new(1, 0);
    pub const SOUTH: Direction = Direction::new(0, 1);
    pub const WEST: Direction = Direction::new(-1, 0);
    pub const NORTH_EAST: Direction = Direction::new(1, -1);
    pub const SOUTH_EAST: Direction = Direction::new(1, 1);
    pub const SOUTH_WEST: Direction = Direction::new(-1, 1);
    pub const NORTH_WEST: Direction = Direction::new(-1, -1);

    pub const fn new(dx: i8, dy: i8) -> Direction {
        Direction { dx, dy }
    }

    /// The step leading from `from` to an adjacent `to`, with each component clamped to -1..=1.
    pub fn between(from: Point, to: Point) -> Direction {
        Direction::new((to.x - from.x).signum() as i8, (to.y - from.y).signum() as i8)
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// The cell reached by taking this step from `cell`.
    pub fn apply(&self, cell: Point) -> Point {
        Point::new(cell.x + self.dx as i32, cell.y + self.dy as i32)
    }
}

/// Cardinal steps in enumeration order. Tie-breaks in both searches depend on this order.
pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
    Direction::NORTH,
    Direction::EAST,
    Direction::SOUTH,
    Direction::WEST,
];

/// Diagonal steps, enumerated after all cardinals when diagonal movement is allowed.
pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::NORTH_EAST,
    Direction::SOUTH_EAST,
    Direction::SOUTH_WEST,
    Direction::NORTH_WEST,
];

/// Cardinals followed by diagonals.
pub const ALL_DIRECTIONS: [Direction; MAX_NEIGHBORS] = concat_directions();

const fn concat_directions() -> [Direction; MAX_NEIGHBORS] {
    let mut all = [Direction::ZERO; MAX_NEIGHBORS];
    let mut i = 0;
    while i < CARDINAL_DIRECTIONS.len() {
        all[i] = CARDINAL_DIRECTIONS[i];
        all[i + CARDINAL_DIRECTIONS.len()] = DIAGONAL_DIRECTIONS[i];
        i += 1;
    }
    all
}

/// The direction set in use for a given movement mode.
pub fn directions(allow_diagonal: bool) -> &'static [Direction] {
    if allow_diagonal {
        &ALL_DIRECTIONS
    } else {
        &ALL_DIRECTIONS[..CARDINAL_DIRECTIONS.len()]
    }
}

/// [Grid] records for every cell whether it is blocked and what it costs to enter it, in a
/// [BoolGrid] of obstacles next to a [SimpleGrid] of costs. The dimensions are fixed at
/// construction and always positive. Blocking a cell keeps its cost around so that unblocking
/// restores it.
#[derive(Clone, Debug)]
pub struct Grid {
    blocked: BoolGrid,
    costs: SimpleGrid<u32>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.costs.width == other.costs.width
            && self.costs.height == other.costs.height
            && self.costs.values == other.costs.values
            && self.blocked.values == other.blocked.values
    }
}

impl Eq for Grid {}

impl Grid {
    /// Creates a grid where every cell is open with [DEFAULT_COST].
    pub fn new(width: usize, height: usize) -> Result<Grid> {
        Self::check_dimensions(width, height)?;
        Ok(Grid {
            blocked: BoolGrid::new(width, height, false),
            costs: SimpleGrid::new(width, height, DEFAULT_COST),
        })
    }

    /// Creates a grid from row-major cell data, where [None] marks a blocked cell.
    pub fn from_costs(width: usize, height: usize, cells: Vec<Option<u32>>) -> Result<Grid> {
        let n = Self::check_dimensions(width, height)?;
        if cells.len() != n {
            return Err(GridError::CellCountMismatch {
                expected: n,
                actual: cells.len(),
            });
        }
        let mut blocked = BoolGrid::new(width, height, false);
        for (ix, _) in cells.iter().enumerate().filter(|(_, c)| c.is_none()) {
            blocked.set(ix % width, ix / width, true);
        }
        let costs = SimpleGrid {
            width,
            height,
            values: cells
                .into_iter()
                .map(|c| c.unwrap_or(DEFAULT_COST))
                .collect(),
        };
        Ok(Grid { blocked, costs })
    }

    fn check_dimensions(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroArea { width, height });
        }
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::TooLarge { width, height });
        }
        width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })
    }

    pub fn width(&self) -> usize {
        self.costs.width
    }

    pub fn height(&self) -> usize {
        self.costs.height
    }

    /// Number of cells in the grid.
    pub fn area(&self) -> usize {
        self.costs.values.len()
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        self.costs.point_in_bounds(cell)
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Point) -> Option<usize> {
        self.in_bounds(cell).then(|| self.costs.get_ix_point(&cell))
    }

    /// Inverse of [index](Self::index).
    pub fn cell_at(&self, index: usize) -> Point {
        let width = self.width();
        Point::new((index % width) as i32, (index / width) as i32)
    }

    pub fn is_walkable(&self, cell: Point) -> bool {
        self.in_bounds(cell) && !self.blocked.get_point(cell)
    }

    pub fn is_blocked(&self, cell: Point) -> bool {
        !self.is_walkable(cell)
    }

    /// The cost of entering `cell`, or `default_cost` when it lies outside the grid.
    pub fn cost(&self, cell: Point, default_cost: u32) -> u32 {
        if self.in_bounds(cell) {
            self.costs.get_point(cell)
        } else {
            default_cost
        }
    }

    /// Marks a cell blocked or open. Out of bounds cells are ignored.
    pub fn set_blocked(&mut self, cell: Point, blocked: bool) {
        if self.in_bounds(cell) {
            self.blocked.set_point(cell, blocked);
        }
    }

    /// Entry point for gameplay code changing obstacles. Previously computed flow fields and
    /// components are not updated.
    pub fn set_obstacle(&mut self, cell: Point, blocked: bool) {
        self.set_blocked(cell, blocked);
    }

    /// Sets the traversal cost of a cell without touching its blocked flag.
    pub fn set_cost(&mut self, cell: Point, cost: u32) {
        if self.in_bounds(cell) {
            self.costs.set_point(cell, cost);
        }
    }

    /// Blocks or opens every cell of the `w` by `h` rectangle at (`x`, `y`), clipped to the grid.
    pub fn set_rect(&mut self, x: i32, y: i32, w: i32, h: i32, blocked: bool) {
        let bounds = self.blocked.rect();
        let rect = Rect {
            x1: x.max(bounds.x1),
            x2: x.saturating_add(w).min(bounds.x2),
            y1: y.max(bounds.y1),
            y2: y.saturating_add(h).min(bounds.y2),
        };
        self.blocked.set_rectangle(&rect, blocked);
    }

    /// Writes the walkable neighbours of `cell` into `out` in direction order and returns how
    /// many were written.
    ///
    /// # Panics
    ///
    /// Panics if `out` cannot hold [MAX_NEIGHBORS] cells, even when fewer would be written.
    pub fn neighbors_into(&self, cell: Point, allow_diagonal: bool, out: &mut [Point]) -> usize {
        assert!(
            out.len() >= MAX_NEIGHBORS,
            "neighbour buffer holds {} cells, at least {} required",
            out.len(),
            MAX_NEIGHBORS
        );
        let mut n = 0;
        for dir in directions(allow_diagonal) {
            let p = dir.apply(cell);
            if self.is_walkable(p) {
                out[n] = p;
                n += 1;
            }
        }
        n
    }

    /// Fills `buf` with the walkable neighbours of `cell` in direction order.
    pub fn neighbors(&self, cell: Point, allow_diagonal: bool, buf: &mut NeighborBuffer) {
        buf.clear();
        buf.extend(
            directions(allow_diagonal)
                .iter()
                .map(|dir| dir.apply(cell))
                .filter(|p| self.is_walkable(*p)),
        );
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.blocked.get(x, y) {
                    write!(f, "#")?;
                } else {
                    match self.costs.get(x, y) {
                        c @ 0..=9 => write!(f, "{}", c)?,
                        _ => write!(f, "+")?,
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
