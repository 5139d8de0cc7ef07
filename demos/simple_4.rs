use grid_pacman::room::grid_from_ascii;
use grid_pacman::{find_path, route_from_start, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let pathing_grid = grid_from_ascii("...\n.#.\n...\n");
    println!("{}", pathing_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = find_path(start, end, &pathing_grid).unwrap_or_default();
    println!("Path:");
    for p in route_from_start(start, &path) {
        println!("{:?}", p);
    }
}
