//! # grid_pacman
//!
//! A single-player arcade game on a walled grid. The player is steered with the arrow keys and
//! every frame runs an [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search with a
//! [Manhattan](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic towards the cell the
//! pressed key points at, advancing the player by exactly one step of the found path.
//!
//! The pathfinding core lives in [astar], [pathing_grid] and [solver]; [movement] turns
//! direction vectors into steps. [config], [room], [input] and [game] form a headless harness
//! that a graphics backend can be plugged into through the [game::Renderer] trait.
pub mod astar;
pub mod config;
pub mod game;
pub mod input;
pub mod movement;
pub mod pathing_grid;
pub mod room;
pub mod solver;

pub use grid_util::point::Point;

pub use config::{ConfigError, GameConfig};
pub use movement::{cell_to_pixel, pixel_to_cell, MoveOutcome, MovementController, PixelPos};
pub use pathing_grid::{Bounds, PathingGrid};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Cost of a single orthogonal move.
pub const C: i32 = 1;
/// Default size of a grid cell in pixels.
pub const CELL_SIZE: i32 = 30;
/// Inline capacity of successor lists; a cell has at most four orthogonal neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Manhattan distance between two cells.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

/// Computes a path from `start` to `goal` on `grid` with the default [AstarSolver].
///
/// The returned path is ordered from the goal back to the cell right after `start`, which is
/// itself excluded. An empty path means `start == goal`; [None] means that no path exists,
/// including the case where `start` or `goal` is a wall or lies outside the grid bounds.
pub fn find_path(start: Point, goal: Point, grid: &PathingGrid) -> Option<Vec<Point>> {
    AstarSolver::new().find_path(grid, start, goal)
}

/// The first step to take along a path returned by [find_path], i.e. its last element.
pub fn first_step(path: &[Point]) -> Option<Point> {
    path.last().copied()
}

/// Turns a goal-first path as returned by [find_path] into the route that is walked, starting
/// with `start` itself and ending at the goal.
pub fn route_from_start(start: Point, path: &[Point]) -> Vec<Point> {
    std::iter::once(start)
        .chain(path.iter().rev().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_starts_at_start_and_ends_at_goal() {
        let start = Point::new(0, 0);
        let path = vec![Point::new(2, 0), Point::new(1, 0)];
        assert_eq!(first_step(&path), Some(Point::new(1, 0)));
        assert_eq!(
            route_from_start(start, &path),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn empty_path_has_no_first_step() {
        assert_eq!(first_step(&[]), None);
        assert_eq!(
            route_from_start(Point::new(4, 4), &[]),
            vec![Point::new(4, 4)]
        );
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(-2, 5);
        let b = Point::new(3, 1);
        assert_eq!(manhattan_distance(&a, &b), 9);
        assert_eq!(manhattan_distance(&b, &a), 9);
    }
}
