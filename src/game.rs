//! Headless frame loop around the movement core.
//!
//! A graphics backend implements [Renderer] and feeds [InputEvent]s into [Game::frame] once per
//! frame. [TextRenderer] is a backend that rasterizes frames into characters, used by the demos
//! and the tests.

use log::{debug, info};

use crate::config::{Color, ConfigError, GameConfig};
use crate::input::{InputEvent, InputState};
use crate::movement::{MoveOutcome, MovementController, PixelPos};
use crate::room::{Room, WallRect};
use crate::PathingGrid;

/// Handle of an image asset; loading it is up to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Appearance {
    Fill(Color),
    Image(ImageHandle),
}

/// Anything the renderer can put on screen.
pub trait Drawable {
    /// Top-left corner in pixels.
    fn position(&self) -> PixelPos;
    /// Width and height in pixels.
    fn size(&self) -> (i32, i32);
    fn appearance(&self) -> Appearance;
}

/// The player sprite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub position: PixelPos,
    pub size: (i32, i32),
    pub image: ImageHandle,
}

impl Drawable for Sprite {
    fn position(&self) -> PixelPos {
        self.position
    }
    fn size(&self) -> (i32, i32) {
        self.size
    }
    fn appearance(&self) -> Appearance {
        Appearance::Image(self.image.clone())
    }
}

/// A solid wall rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallBlock {
    pub rect: WallRect,
    pub color: Color,
}

impl Drawable for WallBlock {
    fn position(&self) -> PixelPos {
        PixelPos::new(self.rect.x, self.rect.y)
    }
    fn size(&self) -> (i32, i32) {
        (self.rect.width, self.rect.height)
    }
    fn appearance(&self) -> Appearance {
        Appearance::Fill(self.color)
    }
}

pub trait Renderer {
    fn begin_frame(&mut self, background: Color);
    fn draw(&mut self, item: &dyn Drawable);
    fn end_frame(&mut self);
}

/// Renders frames as text with one character per cell: `#` for filled shapes, `@` for images
/// and `.` for background.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    cell_size: i32,
    columns: usize,
    rows: usize,
    buffer: Vec<char>,
    last_frame: String,
    frames: usize,
}

impl TextRenderer {
    pub fn new(width: u32, height: u32, cell_size: i32) -> TextRenderer {
        let cell = cell_size.max(1) as u32;
        let columns = width.div_ceil(cell) as usize;
        let rows = height.div_ceil(cell) as usize;
        TextRenderer {
            cell_size: cell_size.max(1),
            columns,
            rows,
            buffer: vec!['.'; columns * rows],
            last_frame: String::new(),
            frames: 0,
        }
    }

    /// Creates a renderer covering the configured window.
    pub fn for_config(config: &GameConfig) -> TextRenderer {
        TextRenderer::new(config.window_width, config.window_height, config.cell_size)
    }

    /// The most recently completed frame, one line per row of cells.
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    /// Number of completed frames.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Renderer for TextRenderer {
    fn begin_frame(&mut self, _background: Color) {
        self.buffer.fill('.');
    }

    fn draw(&mut self, item: &dyn Drawable) {
        let glyph = match item.appearance() {
            Appearance::Fill(_) => '#',
            Appearance::Image(_) => '@',
        };
        let pos = item.position();
        let (width, height) = item.size();
        if width <= 0 || height <= 0 {
            return;
        }
        let x0 = pos.x.div_euclid(self.cell_size).max(0);
        let y0 = pos.y.div_euclid(self.cell_size).max(0);
        let x1 = (pos.x + width - 1).div_euclid(self.cell_size);
        let y1 = (pos.y + height - 1).div_euclid(self.cell_size);
        for y in y0..=y1.min(self.rows as i32 - 1) {
            for x in x0..=x1.min(self.columns as i32 - 1) {
                self.buffer[y as usize * self.columns + x as usize] = glyph;
            }
        }
    }

    fn end_frame(&mut self) {
        self.last_frame = self
            .buffer
            .chunks(self.columns.max(1))
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        self.frames += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

/// One game session: the immutable grid and configuration plus the moving player.
pub struct Game {
    config: GameConfig,
    grid: PathingGrid,
    walls: Vec<WallBlock>,
    input: InputState,
    player: MovementController,
    last_outcome: MoveOutcome,
}

impl Game {
    pub fn new(config: GameConfig, room: &Room) -> Result<Game, ConfigError> {
        let grid = room.build_grid(&config)?;
        let walls = room
            .walls
            .iter()
            .map(|&rect| WallBlock {
                rect,
                color: config.palette.wall,
            })
            .collect();
        let player = MovementController::new(config.player_spawn, config.cell_size);
        info!(
            "Starting '{}' with the player at {:?}",
            config.title, config.player_spawn
        );
        Ok(Game {
            config,
            grid,
            walls,
            input: InputState::default(),
            player,
            last_outcome: MoveOutcome::Idle,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    pub fn player(&self) -> &MovementController {
        &self.player
    }
    pub fn last_outcome(&self) -> MoveOutcome {
        self.last_outcome
    }

    pub fn player_sprite(&self) -> Sprite {
        Sprite {
            position: self.player.position(),
            size: (self.config.cell_size, self.config.cell_size),
            image: ImageHandle(self.config.player_image.clone()),
        }
    }

    /// Runs one frame: applies the input events, updates the player once and draws the walls
    /// followed by the player. A quit event ends the game before anything is updated.
    pub fn frame<I, R>(&mut self, events: I, renderer: &mut R) -> FrameStatus
    where
        I: IntoIterator<Item = InputEvent>,
        R: Renderer + ?Sized,
    {
        for event in events {
            if event == InputEvent::Quit {
                info!("Quit requested");
                return FrameStatus::Quit;
            }
            let (dx, dy) = self.input.apply(event, self.config.step());
            self.player.set_direction(dx, dy);
        }

        self.last_outcome = self.player.update(&self.grid);

        renderer.begin_frame(self.config.palette.background);
        for wall in &self.walls {
            renderer.draw(wall);
        }
        renderer.draw(&self.player_sprite());
        renderer.end_frame();
        FrameStatus::Continue
    }

    /// Drives frames until a quit event arrives or the input runs out. Returns the number of
    /// frames that were drawn.
    pub fn run<F, I, R>(&mut self, frames: F, renderer: &mut R) -> usize
    where
        F: IntoIterator<Item = I>,
        I: IntoIterator<Item = InputEvent>,
        R: Renderer + ?Sized,
    {
        let mut drawn = 0;
        for events in frames {
            if self.frame(events, renderer) == FrameStatus::Quit {
                break;
            }
            drawn += 1;
        }
        debug!("Ran {} frames", drawn);
        drawn
    }
}
