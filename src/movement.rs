//! The per-frame movement state machine of the player.
//!
//! The controller keeps the player position in pixels and the direction the input harness last
//! requested. Every [update](MovementController::update) computes the cell the direction points
//! at, runs a full search towards it and commits only the first step of the result. The path is
//! deliberately recomputed from scratch on every tick instead of being cached.

use grid_util::point::Point;
use log::{debug, trace};

use crate::{
    first_step, pathing_grid::PathingGrid, solver::astar::AstarSolver, solver::GridSolver,
};

/// Continuous pixel position, the top-left corner of a sprite's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> PixelPos {
        PixelPos { x, y }
    }
    pub fn offset(self, dx: i32, dy: i32) -> PixelPos {
        PixelPos::new(self.x + dx, self.y + dy)
    }
}

/// Cell containing a pixel. Uses floored division so that pixels left of or above the origin
/// land in negative cells.
pub fn pixel_to_cell(pos: PixelPos, cell_size: i32) -> Point {
    Point::new(pos.x.div_euclid(cell_size), pos.y.div_euclid(cell_size))
}

/// Top-left pixel of a cell.
pub fn cell_to_pixel(cell: Point, cell_size: i32) -> PixelPos {
    PixelPos::new(cell.x * cell_size, cell.y * cell_size)
}

/// What a single [update](MovementController::update) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No direction is active.
    Idle,
    /// The player stepped from one cell to the next.
    Moved { from: Point, to: Point },
    /// The direction points into the cell the player already occupies.
    AtGoal,
    /// No path towards the goal exists, the player stays in place.
    Blocked { goal: Point },
}

#[derive(Clone, Debug)]
pub struct MovementController<S = AstarSolver> {
    position: PixelPos,
    direction: (i32, i32),
    cell_size: i32,
    solver: S,
}

impl MovementController<AstarSolver> {
    pub fn new(position: PixelPos, cell_size: i32) -> MovementController<AstarSolver> {
        MovementController::with_solver(position, cell_size, AstarSolver::new())
    }
}

impl<S: GridSolver> MovementController<S> {
    /// # Panics
    ///
    /// Panics if `cell_size` is not positive.
    pub fn with_solver(position: PixelPos, cell_size: i32, solver: S) -> MovementController<S> {
        assert!(cell_size > 0, "cell size must be positive, got {cell_size}");
        MovementController {
            position,
            direction: (0, 0),
            cell_size,
            solver,
        }
    }

    pub fn position(&self) -> PixelPos {
        self.position
    }
    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }
    /// Cell currently occupied by the player.
    pub fn cell(&self) -> Point {
        pixel_to_cell(self.position, self.cell_size)
    }

    /// Overwrites the pending direction, in pixels per tick.
    pub fn set_direction(&mut self, dx: i32, dy: i32) {
        self.direction = (dx, dy);
    }

    /// Advances the player by at most one cell towards the cell the direction points at.
    pub fn update(&mut self, grid: &PathingGrid) -> MoveOutcome {
        let (dx, dy) = self.direction;
        if dx == 0 && dy == 0 {
            return MoveOutcome::Idle;
        }
        let start = pixel_to_cell(self.position, self.cell_size);
        let goal = pixel_to_cell(self.position.offset(dx, dy), self.cell_size);
        let Some(path) = self.solver.find_path(grid, start, goal) else {
            trace!("No path from {} to {}, staying put", start, goal);
            return MoveOutcome::Blocked { goal };
        };
        match first_step(&path) {
            Some(next) => {
                self.position = cell_to_pixel(next, self.cell_size);
                debug!("Player moved from {} to {}", start, next);
                MoveOutcome::Moved {
                    from: start,
                    to: next,
                }
            }
            None => MoveOutcome::AtGoal,
        }
    }
}
