use bevy::prelude::*;
use merge_engine::GameConfig;

mod app;
mod board;
mod input;

pub use app::{WINDOW_HEIGHT, WINDOW_WIDTH, get_default_app};
pub use board::{Board, BoardPlugin, Settings};
pub use input::{InputPlugin, MoveRequested, ReadInput, ResizeRequested, RestartRequested};

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Init,
    Playing,
    /// A slide landed; the spawn waits for the transition delay.
    Settling,
    GameOver,
}

pub fn run() {
    run_with(GameConfig::default());
}

/// Runs the bit with a custom rule, grid size or timing.
pub fn run_with(config: GameConfig) {
    get_default_app(env!("CARGO_PKG_NAME"))
        .insert_resource(Settings(config))
        .add_plugins(BoardPlugin)
        .add_plugins(InputPlugin)
        .init_state::<GameState>()
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
