use crate::direction::Direction;
use crate::engine::apply_move;
use crate::grid::{Grid, Value};
use crate::rule::MergeRule;

/// True when some horizontally or vertically adjacent pair could fuse.
pub fn has_mergeable_neighbors<R: MergeRule + ?Sized>(grid: &Grid, rule: &R) -> bool {
    let size = grid.size();
    (0..size).any(|row| {
        (0..size).any(|col| {
            let Some(value) = grid.value(row, col) else {
                return false;
            };
            let fuses = |neighbor: Option<Value>| {
                neighbor.is_some_and(|other| rule.can_merge(value, other))
            };
            fuses(grid.value(row, col + 1)) || fuses(grid.value(row + 1, col))
        })
    })
}

/// The grid is full and nothing can fuse.
///
/// Only meaningful once a move has finished, spawn included.
pub fn is_game_over<R: MergeRule + ?Sized>(grid: &Grid, rule: &R) -> bool {
    grid.is_full() && !has_mergeable_neighbors(grid, rule)
}

pub fn has_available_move<R: MergeRule + ?Sized>(grid: &Grid, rule: &R) -> bool {
    !is_game_over(grid, rule)
}

/// Directions that would change the grid.
pub fn available_moves<R: MergeRule + ?Sized>(grid: &Grid, rule: &R) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| apply_move(grid, direction, rule).moved)
        .collect()
}
