use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowMode, WindowResolution};

// typical smartphone screen ratio (9:16)
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

const LOG_FILTER: &str = "wgpu=error,naga=warn,merge_engine=debug,twenty48=debug";

// Creates a Bevy app sized for a phone-shaped canvas, with engine logs enabled
pub fn get_default_app(bit_name: &str) -> App {
    let mut app = App::new();

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: bit_name.to_string(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#bit".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Leave browser shortcuts (F5, Ctrl+R) alone
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let log_plugin = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    app.add_plugins(DefaultPlugins.set(window_plugin).set(log_plugin));

    // Nothing animates between moves, so keep the frame rate low on mobile.
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(Color::BLACK));

    app
}
