use bevy::prelude::*;
use merge_engine::{Direction, classify_swipe};

use crate::board::Settings;

/// A slide asked for by the keyboard or a swipe.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequested(pub Direction);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartRequested;

/// Start over on a grid with the given side length.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequested(pub usize);

/// Turns raw input into requests; the board consumes them later in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadInput;

/// Screen position where the current press started.
#[derive(Resource, Debug, Default)]
struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    const fn press(&mut self, at: Vec2) {
        self.start = Some(at);
    }

    /// Ends the gesture. Screen y grows downwards, like the swipe classifier expects.
    fn release(&mut self, at: Vec2, threshold: f32) -> Option<Direction> {
        let start = self.start.take()?;
        let delta = at - start;
        classify_swipe(delta.x, delta.y, threshold)
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SwipeTracker>()
            .add_event::<MoveRequested>()
            .add_event::<RestartRequested>()
            .add_event::<ResizeRequested>()
            .add_systems(Update, (keyboard_input, swipe_input).in_set(ReadInput));
    }
}

const fn key_direction(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::ArrowUp => Some(Direction::Up),
        KeyCode::ArrowDown => Some(Direction::Down),
        KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}

const fn key_size(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Digit4 => Some(4),
        KeyCode::Digit5 => Some(5),
        KeyCode::Digit6 => Some(6),
        KeyCode::Digit7 => Some(7),
        KeyCode::Digit8 => Some(8),
        _ => None,
    }
}

fn keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut moves: EventWriter<MoveRequested>,
    mut restarts: EventWriter<RestartRequested>,
    mut resizes: EventWriter<ResizeRequested>,
) {
    for &key in keys.get_just_pressed() {
        if let Some(direction) = key_direction(key) {
            moves.send(MoveRequested(direction));
        } else if let Some(size) = key_size(key) {
            resizes.send(ResizeRequested(size));
        } else if key == KeyCode::KeyR {
            restarts.send(RestartRequested);
        }
    }
}

fn swipe_input(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    settings: Res<Settings>,
    mut tracker: ResMut<SwipeTracker>,
    mut moves: EventWriter<MoveRequested>,
) {
    if let Some(at) = just_pressed_position(&buttons, &touches, &windows) {
        tracker.press(at);
    }
    if let Some(at) = just_released_position(&buttons, &touches, &windows) {
        if let Some(direction) = tracker.release(at, settings.swipe_threshold) {
            moves.send(MoveRequested(direction));
        }
    }
}

fn just_pressed_position(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if buttons.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touches.iter_just_pressed().next().map(|touch| touch.position())
    }
}

fn just_released_position(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if buttons.just_released(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touches.iter_just_released().next().map(|touch| touch.position())
    }
}
