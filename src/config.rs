//! Immutable game configuration handed to the harness at startup.

use std::time::Duration;

use thiserror::Error;

use crate::{movement::PixelPos, Bounds, CELL_SIZE};

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }
}

/// Colors used when drawing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub wall: Color,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            background: Color::BLACK,
            wall: Color::BLUE,
        }
    }
}

/// Reasons a [GameConfig] or a room layout cannot be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    #[error("playfield {width}x{height} is not a positive multiple of the cell size {cell_size}")]
    PlayfieldNotAligned {
        width: i32,
        height: i32,
        cell_size: i32,
    },
    #[error("wall at ({x}, {y}) has non-positive size {width}x{height}")]
    EmptyWall {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error("player spawn ({x}, {y}) lies outside the playfield")]
    SpawnOutOfBounds { x: i32, y: i32 },
}

/// Everything the harness needs to know to set up a game. The pathfinding core only ever sees
/// the derived [Bounds] and the cell size.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub cell_size: i32,
    pub playfield_width: i32,
    pub playfield_height: i32,
    pub window_width: u32,
    pub window_height: u32,
    pub frames_per_second: u32,
    pub title: String,
    pub player_spawn: PixelPos,
    pub player_image: String,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            cell_size: CELL_SIZE,
            playfield_width: 600,
            playfield_height: 600,
            window_width: 606,
            window_height: 606,
            frames_per_second: 10,
            title: "Pacman".to_owned(),
            player_spawn: PixelPos::new(303 - 16, 7 * 60 + 19),
            player_image: "images/nath.png".to_owned(),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let aligned = |extent: i32| extent > 0 && extent % self.cell_size == 0;
        if !aligned(self.playfield_width) || !aligned(self.playfield_height) {
            return Err(ConfigError::PlayfieldNotAligned {
                width: self.playfield_width,
                height: self.playfield_height,
                cell_size: self.cell_size,
            });
        }
        let spawn = self.player_spawn;
        if !(0..self.playfield_width).contains(&spawn.x)
            || !(0..self.playfield_height).contains(&spawn.y)
        {
            return Err(ConfigError::SpawnOutOfBounds {
                x: spawn.x,
                y: spawn.y,
            });
        }
        Ok(())
    }

    /// Cell bounds of the playfield, 0..=19 on both axes for the default configuration.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            0,
            0,
            self.playfield_width / self.cell_size - 1,
            self.playfield_height / self.cell_size - 1,
        )
    }

    /// Pixel offset a single key press moves the player by.
    pub fn step(&self) -> i32 {
        self.cell_size
    }

    /// Target duration of a single frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}
