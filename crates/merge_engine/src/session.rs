use core::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::direction::Direction;
use crate::engine::apply_move;
use crate::grid::{Grid, GridError, Tile, TileId, TileIds, Value};
use crate::rule::{MergeRule, RuleKind};
use crate::spawn::{RandomSource, spawn_tile};
use crate::status::is_game_over;
use crate::swipe::SWIPE_THRESHOLD;

/// How long a host lets the slide transition play before spawning.
pub const SPAWN_DELAY: Duration = Duration::from_millis(200);

/// Tiles placed when a game starts.
pub const START_TILES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub rule: RuleKind,
    /// Grid width and height.
    pub size: usize,
    pub start_tiles: usize,
    /// Delay between a successful slide and the spawn that follows it.
    pub spawn_delay: Duration,
    /// Minimum swipe length in logical pixels.
    pub swipe_threshold: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_rule(RuleKind::Classic)
    }
}

impl GameConfig {
    pub fn for_rule(rule: RuleKind) -> Self {
        Self {
            rule,
            size: rule.default_size(),
            start_tiles: START_TILES,
            spawn_delay: SPAWN_DELAY,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }

    pub fn entropy() -> Self {
        Self::for_rule(RuleKind::Entropy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = self.rule.size_range();
        if !sizes.contains(&self.size) {
            return Err(ConfigError::SizeOutOfRange {
                rule: self.rule,
                size: self.size,
                min: *sizes.start(),
                max: *sizes.end(),
            });
        }
        if self.start_tiles == 0 {
            return Err(ConfigError::NoStartTiles);
        }
        let cells = self.size * self.size;
        if self.start_tiles > cells {
            return Err(ConfigError::TooManyStartTiles {
                start_tiles: self.start_tiles,
                cells,
            });
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{rule} grids are {min}..={max} cells wide, got {size}")]
    SizeOutOfRange {
        rule: RuleKind,
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("a game needs at least one starting tile")]
    NoStartTiles,

    #[error("{start_tiles} starting tiles do not fit in {cells} cells")]
    TooManyStartTiles { start_tiles: usize, cells: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// What a slide request did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReport {
    /// Game over, or the previous move is still waiting for its spawn.
    Ignored,
    /// Nothing could slide or merge that way.
    Blocked,
    Moved { score_delta: Value, merges: usize },
}

impl MoveReport {
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// One play-through from reset to game over.
///
/// A successful [`Session::slide`] leaves a spawn pending; the host calls
/// [`Session::complete_move`] once its transition is done (or uses
/// [`Session::step`] to do both at once). Game over is only evaluated after
/// the spawn.
#[derive(Debug, Clone)]
pub struct Session<R> {
    config: GameConfig,
    grid: Grid,
    ids: TileIds,
    score: Value,
    game_over: bool,
    spawn_pending: bool,
    merged_ids: Vec<TileId>,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            grid: Grid::new(config.size)?,
            config,
            ids: TileIds::new(),
            score: 0,
            game_over: false,
            spawn_pending: false,
            merged_ids: Vec::new(),
            rng,
        };
        session.reset();
        Ok(session)
    }

    /// Starts a new game on the current configuration.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.ids.reset();
        self.score = 0;
        self.game_over = false;
        self.spawn_pending = false;
        self.merged_ids.clear();

        let values = self.config.rule.spawn_values();
        for _ in 0..self.config.start_tiles {
            spawn_tile(&mut self.grid, &mut self.ids, values, &mut self.rng);
        }
        self.game_over = is_game_over(&self.grid, &self.config.rule);
        info!(
            rule = %self.config.rule,
            size = self.config.size,
            "new game"
        );
    }

    /// Switches to a `size`×`size` grid and starts a new game on it.
    pub fn resize(&mut self, size: usize) -> Result<(), ConfigError> {
        let config = GameConfig {
            size,
            ..self.config.clone()
        };
        config.validate()?;
        self.grid = Grid::new(size)?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Slides the board. On success the move is committed and a spawn is left
    /// pending.
    pub fn slide(&mut self, direction: Direction) -> MoveReport {
        if self.game_over || self.spawn_pending {
            return MoveReport::Ignored;
        }

        let outcome = apply_move(&self.grid, direction, &self.config.rule);
        if !outcome.moved {
            debug!(%direction, "blocked");
            return MoveReport::Blocked;
        }

        self.grid = outcome.grid;
        self.score += outcome.score_delta;
        self.spawn_pending = true;
        let merges = outcome.merged_ids.len();
        self.merged_ids = outcome.merged_ids;
        debug!(%direction, score = self.score, merges, "moved");

        MoveReport::Moved {
            score_delta: outcome.score_delta,
            merges,
        }
    }

    /// Spawns the tile owed by the last successful slide, then checks for game
    /// over. Does nothing when no spawn is pending.
    pub fn complete_move(&mut self) -> Option<Tile> {
        if !self.spawn_pending {
            return None;
        }
        self.spawn_pending = false;
        self.merged_ids.clear();

        let values = self.config.rule.spawn_values();
        let tile = spawn_tile(&mut self.grid, &mut self.ids, values, &mut self.rng);
        self.game_over = is_game_over(&self.grid, &self.config.rule);
        if self.game_over {
            info!(score = self.score, best = self.best_tile(), "game over");
        }
        tile
    }

    /// [`Session::slide`] followed immediately by [`Session::complete_move`].
    pub fn step(&mut self, direction: Direction) -> MoveReport {
        let report = self.slide(direction);
        self.complete_move();
        report
    }
}

impl<R> Session<R> {
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn score(&self) -> Value {
        self.score
    }

    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub const fn is_spawn_pending(&self) -> bool {
        self.spawn_pending
    }

    /// Tiles that absorbed a neighbour in the last slide, until its spawn.
    pub fn merged_ids(&self) -> &[TileId] {
        &self.merged_ids
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn rule(&self) -> RuleKind {
        self.config.rule
    }

    pub fn best_tile(&self) -> Value {
        self.grid.max_value().unwrap_or(0)
    }
}
