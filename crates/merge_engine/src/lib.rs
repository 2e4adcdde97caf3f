//! Rules for sliding-tile merge puzzles such as 2048 and Entropy Grid.
//!
//! [`apply_move`] is the core: a pure function of a [`Grid`], a [`Direction`]
//! and a [`MergeRule`]. Around it sit the random tile spawner, the game-over
//! check, swipe classification and a [`Session`] that ties them together for
//! an interactive host.

mod direction;
mod engine;
mod grid;
mod rule;
mod session;
mod spawn;
mod status;
mod swipe;

pub use direction::{Direction, Traversal};
pub use engine::{LineSlide, MoveOutcome, apply_move, slide_line};
pub use grid::{Grid, GridError, MAX_SIZE, MIN_SIZE, Tile, TileId, TileIds, Value};
pub use rule::{Classic, Entropy, MergeRule, RuleKind, SpawnValues};
pub use session::{ConfigError, GameConfig, MoveReport, SPAWN_DELAY, START_TILES, Session};
pub use spawn::{RandomSource, spawn_tile};
pub use status::{available_moves, has_available_move, has_mergeable_neighbors, is_game_over};
pub use swipe::{SWIPE_THRESHOLD, classify_swipe};
