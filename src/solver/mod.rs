use crate::astar::{SearchContext, SearchStats};
use crate::{manhattan_distance, pathing_grid::PathingGrid, C};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};

pub mod astar;
pub mod dijkstra;

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, i32)>;

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    fn successors(&self, grid: &PathingGrid, node: &Point) -> Self::Successors;

    /// Uses C as cost for every orthogonal move.
    fn cost(&self, p1: &Point, p2: &Point) -> i32 {
        manhattan_distance(p1, p2) * C
    }

    /// Total cost of walking a route of consecutive cells.
    fn path_cost(&self, route: &[Point]) -> i32 {
        route
            .iter()
            .tuple_windows()
            .map(|(a, b)| self.cost(a, b))
            .sum()
    }

    /// Computes a path from start to goal. The path is ordered from the goal back to the cell
    /// right after start, so its last element is the first step to take.
    fn find_path(&self, grid: &PathingGrid, start: Point, goal: Point) -> Option<Vec<Point>> {
        self.find_path_with_stats(grid, start, goal).0
    }

    /// Same as [find_path](Self::find_path), also reporting how much work the search did.
    fn find_path_with_stats(
        &self,
        grid: &PathingGrid,
        start: Point,
        goal: Point,
    ) -> (Option<Vec<Point>>, SearchStats) {
        if !grid.can_move_to(&start) || !grid.can_move_to(&goal) {
            info!(
                "Rejecting search from {} to {}: blocked or out of bounds",
                start, goal
            );
            return (None, SearchStats::default());
        }
        // Check if start and goal are on the same connected component.
        if grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return (None, SearchStats::default());
        }
        // The goal is reachable from the start, compute a path
        let mut ct = SearchContext::new();
        let result = ct.astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        if result.is_none() {
            warn!(
                "Reachable goal {} could not be pathed to from {}, are the components correct?",
                goal, start
            );
        }
        (result.map(|(path, _cost)| path), ct.stats())
    }
}
