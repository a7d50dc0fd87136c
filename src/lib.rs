//! # grid_flow
//!
//! Pathfinding on weighted occupancy grids. Provides
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) for single start/goal queries and
//! [flow fields](https://howtorts.github.io/2014/01/04/basic-flow-fields.html) for steering many
//! agents towards one shared goal, with optional diagonal movement.
//!
//! All searches own their scratch state, either per call ([find_path], [compute_field]) or
//! checked out of a pool ([Pathfinder]), so they can run concurrently on a shared [Grid].
//! Pre-computing [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! with [Components] lets [Pathfinder::find_path_checked] skip searches for goals that cannot be
//! reached, instead of flood-filling the start's whole region.
//!
//! ```
//! use grid_flow::{compute_field, find_path, manhattan, trace_from_field, Grid, Point};
//!
//! let mut grid = Grid::new(3, 3).unwrap();
//! grid.set_obstacle(Point::new(1, 1), true);
//! let start = Point::new(0, 0);
//! let goal = Point::new(2, 2);
//!
//! let path = find_path(start, goal, &grid, false, manhattan).unwrap();
//! assert_eq!(path.len(), 5);
//!
//! let field = compute_field(goal, &grid, false);
//! assert_eq!(trace_from_field(&field, start, goal).len(), 5);
//! ```
pub mod astar;
pub mod components;
pub mod config;
pub mod error;
pub mod flow_field;
pub mod frontier;
pub mod grid;
pub mod heuristic;
pub mod neighbors;
pub mod path;
pub mod pathfinder;

pub use grid_util::point::Point;

pub use astar::{find_path, find_path_with_cost, SearchContext};
pub use components::Components;
pub use config::SearchConfig;
pub use error::GridError;
pub use flow_field::{compute_field, trace_from_field, FlowField};
pub use grid::{Direction, Grid};
pub use heuristic::{chebyshev, manhattan, Heuristic};
pub use pathfinder::Pathfinder;

/// A grid cell, identified by its integer coordinates.
pub type Cell = Point;

/// The largest number of neighbours a cell can have (the 8-neighbourhood).
pub const MAX_NEIGHBORS: usize = 8;

/// Traversal cost of cells that were not given one.
pub const DEFAULT_COST: u32 = 1;
