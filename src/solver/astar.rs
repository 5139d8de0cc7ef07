use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{pathing_grid::PathingGrid, solver::GridSolver, N_SMALLVEC_SIZE};

/// A* with the Manhattan distance as heuristic, which is admissible and consistent for
/// orthogonal unit-cost moves.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        self.cost(p1, p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manhattan_distance, route_from_start, Bounds};

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = PathingGrid::open(Bounds::from_size(1, 1));
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let path = solver.find_path(&grid, start, start).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn straight_line_on_open_grid() {
        let grid = PathingGrid::open(Bounds::from_size(20, 20));
        let solver = AstarSolver::new();
        let path = solver
            .find_path(&grid, Point::new(0, 0), Point::new(3, 0))
            .unwrap();
        assert_eq!(
            path,
            vec![Point::new(3, 0), Point::new(2, 0), Point::new(1, 0)]
        );
        assert_eq!(path.last(), Some(&Point::new(1, 0)));
    }

    /// Asserts that the optimal 4 step solution is found around the obstacle.
    #[test]
    fn solve_simple_problem() {
        let grid = PathingGrid::new(Bounds::from_size(3, 3), vec![Point::new(1, 1)]);
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        let path = solver.find_path(&grid, start, end).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], end);
        assert!(path.iter().all(|p| grid.can_move_to(p)));
        assert_eq!(solver.path_cost(&route_from_start(start, &path)), 4);
    }

    #[test]
    fn test_complex() {
        //  __________
        // |S.........|
        // |#########.|
        // |..........|
        // |.#########|
        // |.........G|
        //  __________
        let mut walls = Vec::new();
        for x in 0..9 {
            walls.push(Point::new(x, 1));
            walls.push(Point::new(x + 1, 3));
        }
        let grid = PathingGrid::new(Bounds::from_size(10, 5), walls);
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let end = Point::new(9, 4);
        let path = solver.find_path(&grid, start, end).unwrap();
        assert_eq!(path.len(), 9 + 2 + 9 + 2 + 9);
        assert!(path.len() as i32 > manhattan_distance(&start, &end));
    }

    #[test]
    fn ties_resolve_in_neighbour_order() {
        // All shortest paths from (0, 0) to (1, 1) have length two; the search discovers the
        // lower neighbour first and therefore steps down.
        let grid = PathingGrid::open(Bounds::from_size(2, 2));
        let solver = AstarSolver::new();
        let path = solver
            .find_path(&grid, Point::new(0, 0), Point::new(1, 1))
            .unwrap();
        assert_eq!(path, vec![Point::new(1, 1), Point::new(0, 1)]);
    }

    #[test]
    fn walled_start_or_goal_is_rejected() {
        let grid = PathingGrid::new(Bounds::from_size(3, 3), vec![Point::new(1, 1)]);
        let solver = AstarSolver::new();
        let wall = Point::new(1, 1);
        assert!(solver.find_path(&grid, wall, wall).is_none());
        assert!(solver.find_path(&grid, Point::new(0, 0), wall).is_none());
        assert!(solver.find_path(&grid, wall, Point::new(0, 0)).is_none());
        let outside = Point::new(5, 0);
        let (path, stats) = solver.find_path_with_stats(&grid, Point::new(0, 0), outside);
        assert!(path.is_none());
        assert_eq!(stats.expanded, 0);
    }

    #[test]
    fn heuristic_guides_search_on_open_grid() {
        let grid = PathingGrid::open(Bounds::from_size(20, 20));
        let solver = AstarSolver::new();
        let (start, goal) = (Point::new(0, 0), Point::new(0, 10));
        let (path, stats) = solver.find_path_with_stats(&grid, start, goal);
        assert_eq!(path.map(|p| p.len()), Some(10));
        // Only the cells on the straight line are expanded.
        assert_eq!(stats.expanded, 10);
    }
}
