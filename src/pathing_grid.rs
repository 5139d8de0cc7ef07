use super::*;
use core::fmt;
use fxhash::FxHashSet;
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Inclusive cell bounds of the traversable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Bounds {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
    /// Bounds spanning `width` columns and `height` rows starting at the origin.
    pub fn from_size(width: usize, height: usize) -> Bounds {
        Bounds::new(0, 0, width as i32 - 1, height as i32 - 1)
    }
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1).max(0) as usize
    }
    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1).max(0) as usize
    }
    /// All cells inside the bounds in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        } = *self;
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Point::new(x, y)))
    }
    /// Row-major index of a cell inside the bounds.
    fn get_ix_point(&self, point: &Point) -> Option<usize> {
        if self.contains(point) {
            let row = (point.y - self.min_y) as usize;
            let column = (point.x - self.min_x) as usize;
            Some(row * self.width() + column)
        } else {
            None
        }
    }
}

/// [PathingGrid] is the immutable description of the playfield: a set of wall cells and the
/// [Bounds] of the traversable area. Connected components of the open cells are computed once
/// on construction using a [UnionFind] structure so that searches towards a cell in another
/// component can be rejected without flood-filling the start's component.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    bounds: Bounds,
    walls: FxHashSet<Point>,
    components: UnionFind<usize>,
}

impl PathingGrid {
    /// Creates a grid with the given walls. Walls outside `bounds` can never be reached anyway
    /// and are dropped.
    pub fn new<I>(bounds: Bounds, walls: I) -> PathingGrid
    where
        I: IntoIterator<Item = Point>,
    {
        let walls = walls
            .into_iter()
            .filter(|p| {
                let inside = bounds.contains(p);
                if !inside {
                    debug!("Dropping wall {} outside of the grid bounds", p);
                }
                inside
            })
            .collect::<FxHashSet<Point>>();
        let mut grid = PathingGrid {
            bounds,
            walls,
            components: UnionFind::new(bounds.width() * bounds.height()),
        };
        grid.generate_components();
        grid
    }

    /// Creates a grid without any walls.
    pub fn open(bounds: Bounds) -> PathingGrid {
        PathingGrid::new(bounds, std::iter::empty())
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    pub fn width(&self) -> usize {
        self.bounds.width()
    }
    pub fn height(&self) -> usize {
        self.bounds.height()
    }
    /// Number of wall cells inside the bounds.
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn is_blocked(&self, point: &Point) -> bool {
        self.walls.contains(point)
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        self.bounds.contains(point)
    }
    pub fn can_move_to(&self, point: &Point) -> bool {
        self.in_bounds(point) && !self.is_blocked(point)
    }

    /// The four orthogonal neighbours of a cell, in the order down, up, right, left. The search
    /// discovers cells in this order, which fixes how equal-cost paths are chosen.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        [(0, 1), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.can_move_to(p))
            .map(|p| (p, C))
            .collect::<SmallVec<[_; N_SMALLVEC_SIZE]>>()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.bounds
            .get_ix_point(point)
            .map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are open cells on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.can_move_to(start) || !self.can_move_to(goal) {
            return false;
        }
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
    /// Checks if start and goal are not open cells on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Links up every open cell with its open right and lower neighbours.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.bounds.width() * self.bounds.height());
        for point in self.bounds.cells() {
            if !self.can_move_to(&point) {
                continue;
            }
            let Some(parent_ix) = self.bounds.get_ix_point(&point) else {
                continue;
            };
            let linked = [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ]
            .into_iter()
            .filter(|p| self.can_move_to(p))
            .filter_map(|p| self.bounds.get_ix_point(&p))
            .collect::<SmallVec<[usize; 2]>>();
            for ix in linked {
                self.components.union(parent_ix, ix);
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in self.bounds.min_y..=self.bounds.max_y {
            let row = (self.bounds.min_x..=self.bounds.max_x)
                .map(|x| {
                    if self.is_blocked(&Point::new(x, y)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_queries() {
        let bounds = Bounds::from_size(20, 20);
        assert_eq!(bounds, Bounds::new(0, 0, 19, 19));
        assert!(bounds.contains(&Point::new(0, 0)));
        assert!(bounds.contains(&Point::new(19, 19)));
        assert!(!bounds.contains(&Point::new(20, 5)));
        assert!(!bounds.contains(&Point::new(-1, 5)));
        assert_eq!(bounds.cells().count(), 400);
        assert_eq!(bounds.cells().nth(21), Some(Point::new(1, 1)));
    }

    #[test]
    fn walls_outside_bounds_are_dropped() {
        let grid = PathingGrid::new(
            Bounds::from_size(3, 3),
            vec![Point::new(1, 1), Point::new(3, 1), Point::new(-1, 0)],
        );
        assert_eq!(grid.wall_count(), 1);
        assert!(grid.is_blocked(&Point::new(1, 1)));
        assert!(!grid.can_move_to(&Point::new(1, 1)));
        assert!(!grid.can_move_to(&Point::new(3, 1)));
        assert!(grid.can_move_to(&Point::new(0, 0)));
    }

    #[test]
    fn neighbours_skip_walls_and_borders() {
        let grid = PathingGrid::new(Bounds::from_size(3, 3), vec![Point::new(1, 0)]);
        let neighbours = grid.neighborhood_points_and_cost(&Point::new(0, 0));
        assert_eq!(neighbours.as_slice(), &[(Point::new(0, 1), 1)]);
        let neighbours = grid.neighborhood_points_and_cost(&Point::new(1, 1));
        assert_eq!(
            neighbours.as_slice(),
            &[
                (Point::new(1, 2), 1),
                (Point::new(2, 1), 1),
                (Point::new(0, 1), 1)
            ]
        );
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let grid = PathingGrid::new(
            Bounds::from_size(3, 2),
            vec![Point::new(1, 0), Point::new(1, 1)],
        );
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert!(grid.reachable(&p4, &Point::new(2, 1)));
    }

    /// Asserts that the two corners are connected on a 4-grid.
    #[test]
    fn reachable_around_obstacle() {
        // |S  |
        // | # |
        // |  G|
        //  ___
        let grid = PathingGrid::new(Bounds::from_size(3, 3), vec![Point::new(1, 1)]);
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 2)));
    }

    // Diagonal neighbours are not connected on a 4-grid.
    #[test]
    fn diagonal_cells_are_not_connected() {
        //  __
        // | #|
        // |# |
        //  __
        let grid = PathingGrid::new(
            Bounds::from_size(2, 2),
            vec![Point::new(1, 0), Point::new(0, 1)],
        );
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn walls_and_out_of_bounds_cells_are_never_reachable() {
        let grid = PathingGrid::new(Bounds::from_size(3, 3), vec![Point::new(1, 1)]);
        let wall = Point::new(1, 1);
        assert!(grid.unreachable(&wall, &wall));
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(3, 0)));
        assert_eq!(grid.get_component(&Point::new(3, 0)), None);
    }

    #[test]
    fn display_marks_walls() {
        let grid = PathingGrid::new(Bounds::from_size(3, 2), vec![Point::new(1, 0)]);
        assert_eq!(grid.to_string(), ".#.\n...\n");
    }
}
