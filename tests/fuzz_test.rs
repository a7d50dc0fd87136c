/// Fuzzes the searches on many random grids: a path is found exactly when start and goal share a
/// connected component, every path is a valid walk, and path lengths match a brute-force
/// breadth-first search. Both movement modes are tested.
use grid_flow::heuristic::zero;
use grid_flow::path::{is_contiguous, path_cost};
use grid_flow::{
    chebyshev, compute_field, find_path, find_path_with_cost, manhattan, trace_from_field,
    Components, Grid, Point, MAX_NEIGHBORS,
};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(w, h).unwrap();
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            grid.set_blocked(Point::new(x, y), rng.gen_bool(0.4));
        }
    }
    grid
}

fn random_weighted_grid(w: usize, h: usize, rng: &mut StdRng) -> Grid {
    let mut grid = random_grid(w, h, rng);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            grid.set_cost(Point::new(x, y), rng.gen_range(1..=5));
        }
    }
    grid
}

fn visualize_grid(grid: &Grid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_blocked(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Hop counts from `source` to every cell, None where unreachable.
fn bfs_hops(grid: &Grid, source: Point, allow_diagonal: bool) -> Vec<Option<usize>> {
    let mut hops = vec![None; grid.area()];
    let mut queue = VecDeque::new();
    if let Some(ix) = grid.index(source) {
        hops[ix] = Some(0);
        queue.push_back(source);
    }
    let mut out = [Point::new(0, 0); MAX_NEIGHBORS];
    while let Some(p) = queue.pop_front() {
        let d = hops[grid.index(p).unwrap()].unwrap();
        let n = grid.neighbors_into(p, allow_diagonal, &mut out);
        for &q in &out[..n] {
            let q_ix = grid.index(q).unwrap();
            if hops[q_ix].is_none() {
                hops[q_ix] = Some(d + 1);
                queue.push_back(q);
            }
        }
    }
    hops
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for diagonal in [false, true] {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, N, &mut rng);
            grid.set_obstacle(start, false);
            grid.set_obstacle(end, false);
            let reachable = Components::generate(&grid, diagonal).reachable(start, end);
            let path = find_path(start, end, &grid, diagonal, manhattan);
            // Show the grid if a path is not found
            if path.is_some() != reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(path.is_some(), reachable);
            if let Some(path) = path {
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert!(is_contiguous(&path, diagonal));
                assert!(path.iter().all(|p| grid.is_walkable(*p)));
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 6;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    // Both heuristics are admissible and consistent for their movement mode on unit costs
    for (diagonal, heuristic) in [
        (false, manhattan as fn(Point, Point) -> u32),
        (true, chebyshev as fn(Point, Point) -> u32),
    ] {
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, N, &mut rng);
            let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            if !grid.is_walkable(start) {
                continue;
            }
            let hops = bfs_hops(&grid, start, diagonal)[grid.index(end).unwrap()];
            let path = find_path(start, end, &grid, diagonal, heuristic);
            match (path, hops) {
                (Some(path), Some(hops)) => {
                    if path.len() != hops + 1 {
                        visualize_grid(&grid, &start, &end);
                        println!("A* path: {path:?}");
                    }
                    assert_eq!(path.len(), hops + 1);
                }
                (None, None) => {}
                (path, hops) => panic!("A* gave {path:?} but BFS gave {hops:?}"),
            }
        }
    }
}

#[test]
fn fuzz_weighted_cost() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(2);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    // With every cell costing at least 1 both heuristics are consistent for their movement mode
    for (diagonal, heuristic) in [
        (false, manhattan as fn(Point, Point) -> u32),
        (true, chebyshev as fn(Point, Point) -> u32),
    ] {
        for _ in 0..N_GRIDS {
            let mut grid = random_weighted_grid(N, N, &mut rng);
            grid.set_obstacle(start, false);
            grid.set_obstacle(end, false);
            let astar = find_path_with_cost(start, end, &grid, diagonal, heuristic);
            let dijkstra = find_path_with_cost(start, end, &grid, diagonal, zero);
            assert_eq!(astar.is_some(), dijkstra.is_some());
            if let (Some((path, cost)), Some((_, best))) = (astar, dijkstra) {
                if cost != best {
                    visualize_grid(&grid, &start, &end);
                    println!("{grid}");
                }
                assert_eq!(cost, best);
                assert_eq!(path_cost(&grid, &path), cost);
                assert!(is_contiguous(&path, diagonal));
            }
        }
    }
}

#[test]
fn fuzz_flow_field() {
    const N: usize = 10;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(3);
    for diagonal in [false, true] {
        for _ in 0..N_GRIDS {
            let grid = random_weighted_grid(N, N, &mut rng);
            let goal = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let field = compute_field(goal, &grid, diagonal);
            assert_eq!(field, compute_field(goal, &grid, diagonal));
            if !grid.is_walkable(goal) {
                assert_eq!(field.reachable_count(), 0);
                continue;
            }
            let hops = bfs_hops(&grid, goal, diagonal);
            for (ix, hop) in hops.iter().enumerate() {
                let cell = grid.cell_at(ix);
                assert_eq!(field.cost_at(cell).map(|c| c as usize), *hop);
                if let Some(hop) = hop {
                    let path = trace_from_field(&field, cell, goal);
                    assert_eq!(path.len(), hop + 1);
                    assert_eq!(path.last(), Some(&goal));
                    assert!(is_contiguous(&path, diagonal));
                }
            }
        }
    }
}
