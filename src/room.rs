//! Room layouts and their conversion into a [PathingGrid].

use grid_util::point::Point;
use itertools::Itertools;
use log::info;

use crate::{config::ConfigError, Bounds, GameConfig, PathingGrid};

/// Axis-aligned wall rectangle in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WallRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> WallRect {
        WallRect {
            x,
            y,
            width,
            height,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::EmptyWall {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Every cell the rectangle overlaps. Pixel spans are half-open, so a wall ending exactly on
    /// a cell border does not spill into the next cell.
    pub fn cells(&self, cell_size: i32) -> impl Iterator<Item = Point> {
        let x0 = self.x.div_euclid(cell_size);
        let y0 = self.y.div_euclid(cell_size);
        let x1 = (self.x + self.width - 1).div_euclid(cell_size);
        let y1 = (self.y + self.height - 1).div_euclid(cell_size);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Point::new(x, y)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Room {
    pub walls: Vec<WallRect>,
}

impl Room {
    pub fn new(walls: Vec<WallRect>) -> Room {
        Room { walls }
    }

    /// The bordered 600x600 room: four thin walls along the edges of the playfield.
    pub fn room_one() -> Room {
        Room::new(vec![
            WallRect::new(0, 0, 6, 600),
            WallRect::new(0, 0, 600, 6),
            WallRect::new(0, 600, 606, 6),
            WallRect::new(600, 0, 6, 606),
        ])
    }

    /// Distinct cells covered by any wall, in the order the walls list them.
    pub fn wall_cells(&self, cell_size: i32) -> Vec<Point> {
        self.walls
            .iter()
            .flat_map(|wall| wall.cells(cell_size))
            .unique()
            .collect()
    }

    /// Validates the configuration and the walls and builds the grid the player moves on.
    pub fn build_grid(&self, config: &GameConfig) -> Result<PathingGrid, ConfigError> {
        config.validate()?;
        for wall in &self.walls {
            wall.validate()?;
        }
        let grid = PathingGrid::new(config.bounds(), self.wall_cells(config.cell_size));
        info!(
            "Built {}x{} grid with {} wall cells",
            grid.width(),
            grid.height(),
            grid.wall_count()
        );
        Ok(grid)
    }
}

/// Parses a layout with one character per cell, `#` marking a wall. The widest line sets the
/// grid width; shorter lines are open to the right.
pub fn grid_from_ascii(layout: &str) -> PathingGrid {
    let lines = layout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let walls = lines.iter().enumerate().flat_map(|(y, line)| {
        line.chars()
            .enumerate()
            .filter(|(_, c)| *c == '#')
            .map(move |(x, _)| Point::new(x as i32, y as i32))
    });
    PathingGrid::new(Bounds::from_size(width, lines.len()), walls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_covers_overlapped_cells() {
        let wall = WallRect::new(25, 0, 40, 30);
        let cells = wall.cells(30).collect::<Vec<_>>();
        assert_eq!(
            cells,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
        let exact = WallRect::new(30, 30, 30, 30);
        assert_eq!(exact.cells(30).collect::<Vec<_>>(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn room_one_walls_the_border() {
        let config = GameConfig::default();
        let grid = Room::room_one().build_grid(&config).unwrap();
        // Column 0 and row 0 are walls; the walls along x = 600 and y = 600 lie outside.
        assert_eq!(grid.wall_count(), 39);
        assert!(grid.is_blocked(&Point::new(0, 7)));
        assert!(grid.is_blocked(&Point::new(7, 0)));
        assert!(grid.can_move_to(&Point::new(19, 19)));
        assert!(grid.can_move_to(&Point::new(9, 14)));
        assert!(grid.reachable(&Point::new(1, 1), &Point::new(19, 19)));
    }

    #[test]
    fn wall_cells_are_distinct() {
        let room = Room::new(vec![
            WallRect::new(0, 0, 60, 30),
            WallRect::new(30, 0, 60, 30),
        ]);
        assert_eq!(
            room.wall_cells(30),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn empty_wall_is_rejected() {
        let room = Room::new(vec![WallRect::new(30, 30, 0, 30)]);
        assert_eq!(
            room.build_grid(&GameConfig::default()).unwrap_err(),
            ConfigError::EmptyWall {
                x: 30,
                y: 30,
                width: 0,
                height: 30
            }
        );
    }

    #[test]
    fn ascii_layout() {
        let grid = grid_from_ascii("..#\n.#\n");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.is_blocked(&Point::new(2, 0)));
        assert!(grid.is_blocked(&Point::new(1, 1)));
        assert!(grid.can_move_to(&Point::new(2, 1)));
    }
}
