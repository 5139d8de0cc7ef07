//! Translation of key transitions into direction vectors.

/// Arrow keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

/// Input events as delivered by the windowing backend, already reduced to what the game uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
    Quit,
}

/// Tracks the direction requested by the keyboard.
///
/// Pressing a key replaces the whole direction, so left cancels right and vice versa. Releasing
/// a horizontal key zeroes the x axis and releasing a vertical key zeroes the y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    direction: (i32, i32),
}

impl InputState {
    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }

    /// Applies an event and returns the resulting direction, `step` pixels per axis.
    pub fn apply(&mut self, event: InputEvent, step: i32) -> (i32, i32) {
        let (dx, dy) = self.direction;
        self.direction = match event {
            InputEvent::Pressed(Key::Left) => (-step, 0),
            InputEvent::Pressed(Key::Right) => (step, 0),
            InputEvent::Pressed(Key::Up) => (0, -step),
            InputEvent::Pressed(Key::Down) => (0, step),
            InputEvent::Released(Key::Left | Key::Right) => (0, dy),
            InputEvent::Released(Key::Up | Key::Down) => (dx, 0),
            InputEvent::Quit => (dx, dy),
        };
        self.direction
    }
}
