use bevy::prelude::*;
use merge_engine::{GameConfig, MoveReport, Session};

use crate::GameState;
use crate::input::{MoveRequested, ReadInput, ResizeRequested, RestartRequested};

/// Configuration the board is (re)built from.
#[derive(Resource, Deref, Debug, Clone, Default)]
pub struct Settings(pub GameConfig);

#[derive(Resource, Deref, DerefMut)]
pub struct Board(pub Session<fastrand::Rng>);

/// Counts down the pause between a slide and its spawn.
#[derive(Resource, Deref, DerefMut)]
struct SettleTimer(Timer);

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveRequested>()
            .add_event::<RestartRequested>()
            .add_event::<ResizeRequested>()
            .add_systems(OnEnter(GameState::Init), start_session)
            .add_systems(OnEnter(GameState::GameOver), announce_game_over)
            .add_systems(
                Update,
                (
                    restart,
                    resize,
                    apply_moves,
                    settle
                        .run_if(in_state(GameState::Settling))
                        .run_if(resource_exists::<SettleTimer>),
                )
                    .chain()
                    .after(ReadInput)
                    .run_if(resource_exists::<Board>),
            );
    }
}

fn start_session(
    mut commands: Commands,
    settings: Res<Settings>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    match Session::new(settings.0.clone(), fastrand::Rng::new()) {
        Ok(session) => {
            let size = settings.size;
            info!("Starting {} on {size}x{size}\n{}", settings.rule, session.grid());
            commands.insert_resource(Board(session));
            next_state.set(GameState::Playing);
        }
        Err(err) => error!("Cannot start a game: {err}"),
    }
}

fn apply_moves(
    mut commands: Commands,
    mut moves: EventReader<MoveRequested>,
    mut board: ResMut<Board>,
    settings: Res<Settings>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // The session ignores requests while a spawn is pending or the game is over.
    for MoveRequested(direction) in moves.read() {
        match board.slide(*direction) {
            MoveReport::Moved { score_delta, merges } => {
                info!(
                    "{direction}: +{score_delta} from {merges} merges, score {}",
                    board.score()
                );
                commands.insert_resource(SettleTimer(Timer::new(
                    settings.spawn_delay,
                    TimerMode::Once,
                )));
                next_state.set(GameState::Settling);
            }
            MoveReport::Blocked => debug!("{direction} does not move anything"),
            MoveReport::Ignored => {}
        }
    }
}

fn settle(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<SettleTimer>,
    mut board: ResMut<Board>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !timer.tick(time.delta()).finished() {
        return;
    }
    commands.remove_resource::<SettleTimer>();

    if let Some(tile) = board.complete_move() {
        debug!("Spawned {} at ({}, {})", tile.value, tile.row, tile.col);
    }
    info!("\n{}", board.grid());

    if board.is_game_over() {
        next_state.set(GameState::GameOver);
    } else {
        next_state.set(GameState::Playing);
    }
}

fn restart(
    mut commands: Commands,
    mut requests: EventReader<RestartRequested>,
    mut board: ResMut<Board>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    commands.remove_resource::<SettleTimer>();
    board.reset();
    info!("Restarted\n{}", board.grid());
    next_state.set(GameState::Playing);
}

fn resize(
    mut commands: Commands,
    mut requests: EventReader<ResizeRequested>,
    mut board: ResMut<Board>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(&ResizeRequested(size)) = requests.read().last() else {
        return;
    };
    match board.resize(size) {
        Ok(()) => {
            commands.remove_resource::<SettleTimer>();
            info!("Resized to {size}x{size}\n{}", board.grid());
            next_state.set(GameState::Playing);
        }
        Err(err) => warn!("Keeping the current grid: {err}"),
    }
}

fn announce_game_over(board: Res<Board>) {
    info!(
        "Game over with {} points, best tile {}. Press R to play again",
        board.score(),
        board.best_tile()
    );
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use bevy::state::app::StatesPlugin;
    use merge_engine::{Classic, Direction, RuleKind, apply_move};

    use super::*;

    fn app(config: GameConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, BoardPlugin))
            .insert_resource(Settings(config))
            .init_state::<GameState>();
        // Enter Init, then settle into Playing.
        for _ in 0..3 {
            app.update();
        }
        app
    }

    fn instant() -> GameConfig {
        GameConfig {
            spawn_delay: Duration::ZERO,
            ..GameConfig::default()
        }
    }

    fn state(app: &App) -> GameState {
        app.world().resource::<State<GameState>>().get().clone()
    }

    fn open_direction(app: &App) -> Direction {
        let board = app.world().resource::<Board>();
        Direction::ALL
            .into_iter()
            .find(|&direction| apply_move(board.grid(), direction, &Classic).moved)
            .unwrap_or(Direction::Left)
    }

    #[test]
    fn session_starts_with_two_tiles() {
        let app = app(instant());
        assert_eq!(state(&app), GameState::Playing, "ready for input");
        let board = app.world().resource::<Board>();
        assert_eq!(board.grid().tile_count(), 2, "starting tiles");
        assert_eq!(board.score(), 0, "fresh score");
    }

    #[test]
    fn a_move_spawns_after_settling() {
        let mut app = app(instant());
        let direction = open_direction(&app);
        app.world_mut().send_event(MoveRequested(direction));
        for _ in 0..4 {
            app.update();
        }

        assert_eq!(state(&app), GameState::Playing, "back to input");
        let board = app.world().resource::<Board>();
        assert!(!board.is_spawn_pending(), "spawn delivered");
        let newest = board.grid().tiles().map(|tile| tile.id.get()).max();
        assert_eq!(newest, Some(3), "one tile spawned after the two starters");
    }

    #[test]
    fn spawn_waits_for_the_delay() {
        let mut app = app(GameConfig {
            spawn_delay: Duration::from_secs(3600),
            ..GameConfig::default()
        });
        let direction = open_direction(&app);
        app.world_mut().send_event(MoveRequested(direction));
        for _ in 0..3 {
            app.update();
        }

        assert_eq!(state(&app), GameState::Settling, "timer still running");
        assert!(
            app.world().resource::<Board>().is_spawn_pending(),
            "spawn held back"
        );
    }

    #[test]
    fn restart_clears_the_score() {
        let mut app = app(instant());
        let direction = open_direction(&app);
        app.world_mut().resource_mut::<Board>().step(direction);
        app.world_mut().send_event(RestartRequested);
        app.update();

        let board = app.world().resource::<Board>();
        assert_eq!(board.score(), 0, "score reset");
        assert_eq!(board.grid().tile_count(), 2, "fresh opening");
    }

    #[test]
    fn stuck_board_ends_the_game_until_restart() {
        let mut app = app(instant());
        let mut updates = 0;
        while state(&app) != GameState::GameOver && updates < 50_000 {
            if state(&app) == GameState::Playing {
                let direction = open_direction(&app);
                app.world_mut().send_event(MoveRequested(direction));
            }
            app.update();
            updates += 1;
        }
        assert_eq!(state(&app), GameState::GameOver, "play runs into a stuck board");
        assert!(app.world().resource::<Board>().is_game_over(), "session agrees");

        let grid = app.world().resource::<Board>().grid().clone();
        let score = app.world().resource::<Board>().score();
        for direction in Direction::ALL {
            app.world_mut().send_event(MoveRequested(direction));
        }
        app.update();
        assert_eq!(state(&app), GameState::GameOver, "moves do not revive the game");
        let board = app.world().resource::<Board>();
        assert_eq!(board.grid(), &grid, "grid untouched after game over");
        assert_eq!(board.score(), score, "score untouched after game over");

        app.world_mut().send_event(RestartRequested);
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::Playing, "restart resumes play");
        let board = app.world().resource::<Board>();
        assert!(!board.is_game_over(), "fresh game");
        assert_eq!(board.score(), 0, "score reset");
        assert_eq!(board.grid().tile_count(), 2, "fresh opening");
    }

    #[test]
    fn resize_rejects_unsupported_sizes() {
        let mut app = app(instant());
        app.world_mut().send_event(ResizeRequested(3));
        app.update();
        assert_eq!(app.world().resource::<Board>().grid().size(), 4, "unchanged");

        app.world_mut().send_event(ResizeRequested(6));
        app.update();
        let board = app.world().resource::<Board>();
        assert_eq!(board.grid().size(), 6, "resized");
        assert_eq!(board.rule(), RuleKind::Classic, "rule kept");
    }
}
