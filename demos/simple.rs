use grid_flow::path::path_waypoints;
use grid_flow::{compute_field, find_path, manhattan, trace_from_field, Grid, Point};

// In this example a path is found on a grid with shape
// S....
// .###.
// ...#.
// .#...
// .#..G
// S marks the start
// G marks the goal
fn main() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set_rect(1, 1, 3, 1, true);
    grid.set_obstacle(Point::new(3, 2), true);
    grid.set_rect(1, 3, 1, 2, true);
    println!("{}", grid);
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    if let Some(path) = find_path(start, goal, &grid, false, manhattan) {
        println!("A path has been found:");
        for p in &path {
            println!("{:?}", p);
        }
        println!("Waypoints: {:?}", path_waypoints(&path));
    }
    let field = compute_field(goal, &grid, true);
    for corner in [Point::new(0, 4), Point::new(4, 0)] {
        println!(
            "Following the flow field from {:?}: {:?}",
            corner,
            trace_from_field(&field, corner, goal)
        );
    }
}
