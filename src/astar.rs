//! A* search. The generic core in [SearchContext::astar] works over any hashable node type and
//! is driven by closures, in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! [find_path] runs it on a [Grid].
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::{SaturatingAdd, Zero};
use smallvec::SmallVec;
use std::hash::Hash;

use crate::config::SearchConfig;
use crate::frontier::{Frontier, FrontierEntry};
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::neighbors::NeighborBuffer;
use crate::{DEFAULT_COST, MAX_NEIGHBORS};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct NodeState<C> {
    parent: usize,
    g: C,
    closed: bool,
}

/// Scratch state of one search: the frontier and every discovered node, keyed by node with its
/// best known cost, predecessor index and whether it has been expanded. A context serves one
/// search at a time; [clear](Self::clear) keeps its allocations for the next one.
#[derive(Clone, Debug)]
pub struct SearchContext<N, C> {
    frontier: Frontier<C>,
    nodes: FxIndexMap<N, NodeState<C>>,
    expanded: usize,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + SaturatingAdd + Ord + Copy,
{
    fn default() -> SearchContext<N, C> {
        SearchContext::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + SaturatingAdd + Ord + Copy,
{
    pub fn new() -> SearchContext<N, C> {
        SearchContext {
            frontier: Frontier::new(),
            nodes: FxIndexMap::default(),
            expanded: 0,
        }
    }

    pub fn clear(&mut self) {
        self.frontier.clear();
        self.nodes.clear();
        self.expanded = 0;
    }

    /// Number of nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of nodes discovered by the last search.
    pub fn discovered(&self) -> usize {
        self.nodes.len()
    }

    /// Best known cost from the start for every node discovered by the last search.
    pub fn costs(&self) -> impl Iterator<Item = (&N, C)> + '_ {
        self.nodes.iter().map(|(n, s)| (n, s.g))
    }

    fn reverse_path(&self, goal_index: usize) -> Vec<N> {
        let mut path: Vec<N> = std::iter::successors(Some(goal_index), |&i| {
            self.nodes
                .get_index(i)
                .map(|(_, s)| s.parent)
                .filter(|&p| p != NO_PARENT)
        })
        .filter_map(|i| self.nodes.get_index(i).map(|(n, _)| n.clone()))
        .collect();
        path.reverse();
        path
    }

    /// Searches from `start` until `success` accepts a popped node and returns the path to it
    /// together with its cost. Among entries of equal estimated total cost the one with the
    /// smaller heuristic is expanded first. Expanded nodes are never reopened, so the result is
    /// only optimal for heuristics that are consistent with the step costs. Returns [None] if
    /// the reachable graph is exhausted or more than `max_expansions` nodes would be expanded.
    /// Costs saturate at the largest value of `C` instead of overflowing.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        max_expansions: Option<usize>,
    ) -> Option<(Vec<N>, C)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.clear();
        let h = heuristic(start);
        let (index, _) = self.nodes.insert_full(
            start.clone(),
            NodeState {
                parent: NO_PARENT,
                g: Zero::zero(),
                closed: false,
            },
        );
        self.frontier.push(FrontierEntry {
            f: h,
            h,
            g: Zero::zero(),
            index,
        });
        while let Some(FrontierEntry { g, index, .. }) = self.frontier.pop_min() {
            let successors = {
                let Some((node, state)) = self.nodes.get_index_mut(index) else {
                    continue;
                };
                // A node is pushed again whenever a cheaper way to it is found, so entries
                // for expanded nodes or outdated costs are stale.
                if state.closed || g > state.g {
                    continue;
                }
                if success(node) {
                    trace!("Goal reached after expanding {} nodes", self.expanded);
                    let path = self.reverse_path(index);
                    return Some((path, g));
                }
                if max_expansions.is_some_and(|max| self.expanded >= max) {
                    debug!("Giving up after expanding {} nodes", self.expanded);
                    return None;
                }
                state.closed = true;
                self.expanded += 1;
                successors(node)
            };
            for (successor, move_cost) in successors {
                let new_cost = g.saturating_add(&move_cost);
                let h; // heuristic(&successor)
                let n; // index for successor
                match self.nodes.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(NodeState {
                            parent: index,
                            g: new_cost,
                            closed: false,
                        });
                    }
                    Occupied(mut e) => {
                        let state = e.get();
                        if state.closed || state.g <= new_cost {
                            continue;
                        }
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(NodeState {
                            parent: index,
                            g: new_cost,
                            closed: false,
                        });
                    }
                }
                self.frontier.push(FrontierEntry {
                    f: new_cost.saturating_add(&h),
                    h,
                    g: new_cost,
                    index: n,
                });
            }
        }
        debug!(
            "Search space exhausted after expanding {} nodes",
            self.expanded
        );
        None
    }
}

/// Finds a cheapest path from `start` to `goal`, both included, where stepping onto a cell
/// costs that cell's traversal cost. Returns [None] when no path exists, which includes a
/// blocked or outside start or goal. Equal start and goal always give `[start]`.
///
/// `heuristic` estimates the remaining cost between two cells; see [crate::heuristic].
pub fn find_path<H>(
    start: Point,
    goal: Point,
    grid: &Grid,
    allow_diagonal: bool,
    heuristic: H,
) -> Option<Vec<Point>>
where
    H: Heuristic,
{
    find_path_with_cost(start, goal, grid, allow_diagonal, heuristic).map(|(path, _)| path)
}

/// Like [find_path], but also returns the total cost of the path.
pub fn find_path_with_cost<H>(
    start: Point,
    goal: Point,
    grid: &Grid,
    allow_diagonal: bool,
    heuristic: H,
) -> Option<(Vec<Point>, u32)>
where
    H: Heuristic,
{
    let mut context = SearchContext::new();
    let mut neighbors = NeighborBuffer::new();
    find_path_in(
        &mut context,
        &mut neighbors,
        grid,
        start,
        goal,
        &SearchConfig::new(allow_diagonal),
        heuristic,
    )
}

/// Runs a grid search using caller-owned scratch state.
pub fn find_path_in<H>(
    context: &mut SearchContext<Point, u32>,
    neighbors: &mut NeighborBuffer,
    grid: &Grid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
    heuristic: H,
) -> Option<(Vec<Point>, u32)>
where
    H: Heuristic,
{
    if start == goal {
        context.clear();
        return Some((vec![start], 0));
    }
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        debug!("No path from {} to {}: endpoint blocked or outside", start, goal);
        context.clear();
        return None;
    }
    let allow_diagonal = config.allow_diagonal;
    context.astar(
        &start,
        |&node| {
            grid.neighbors(node, allow_diagonal, neighbors);
            neighbors
                .iter()
                .map(|&p| (p, grid.cost(p, DEFAULT_COST)))
                .collect::<SmallVec<[(Point, u32); MAX_NEIGHBORS]>>()
        },
        |&p| heuristic(p, goal),
        |&p| p == goal,
        config.max_expansions,
    )
}
