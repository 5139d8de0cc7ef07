use grid_pacman::game::{FrameStatus, Game, TextRenderer};
use grid_pacman::input::{InputEvent, Key};
use grid_pacman::room::Room;
use grid_pacman::GameConfig;
use std::thread;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// Plays a scripted sequence of key presses in the bordered room and prints every frame.
// Run with RUST_LOG=debug to see the moves the player makes.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GameConfig::default();
    let mut game = Game::new(config.clone(), &Room::room_one())?;
    let mut renderer = TextRenderer::for_config(&config);

    let mut script: Vec<Vec<InputEvent>> = Vec::new();
    let mut hold = |key: Key, frames: usize| {
        script.push(vec![InputEvent::Pressed(key)]);
        script.extend((1..frames).map(|_| Vec::new()));
        script.push(vec![InputEvent::Released(key)]);
    };
    hold(Key::Left, 12);
    hold(Key::Up, 16);
    hold(Key::Right, 5);
    script.push(vec![InputEvent::Quit]);

    for events in script {
        let frame_start = Instant::now();
        if game.frame(events, &mut renderer) == FrameStatus::Quit {
            break;
        }
        println!("{}\n{:?}\n", renderer.last_frame(), game.last_outcome());
        if let Some(rest) = config.frame_duration().checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
    println!("Drew {} frames", renderer.frames());
    Ok(())
}
