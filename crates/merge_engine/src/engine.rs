//! Move resolution: slide every line toward one edge, fuse neighbours once.

use tracing::trace;

use crate::direction::Direction;
use crate::grid::{Grid, Tile, TileId, Value};
use crate::rule::MergeRule;

/// Result of [`apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub grid: Grid,
    /// Sum of every value produced by a merge.
    pub score_delta: Value,
    /// Whether any slot changed occupant.
    pub moved: bool,
    /// Tiles that absorbed a neighbour, in line order. Only useful for
    /// animation.
    pub merged_ids: Vec<TileId>,
}

/// One resolved line, index 0 at the edge tiles slide toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlide {
    pub cells: Vec<Option<Tile>>,
    pub score: Value,
    pub merged: Vec<TileId>,
}

/// Compresses, merges in a single pass, and pads `line` back to its length.
///
/// The leading tile of a merged pair survives with the combined value; the
/// trailing one is dropped. The scan resumes after the consumed pair, so a
/// tile produced by a merge never merges again in the same slide.
pub fn slide_line<R: MergeRule + ?Sized>(line: &[Option<Tile>], rule: &R) -> LineSlide {
    let mut cells = Vec::with_capacity(line.len());
    let mut score = 0;
    let mut merged = Vec::new();

    let mut pending = line.iter().flatten().copied().peekable();
    while let Some(lead) = pending.next() {
        if let Some(absorbed) = pending.next_if(|next| rule.can_merge(lead.value, next.value)) {
            let value = rule.combine(lead.value, absorbed.value);
            trace!(
                "{} ({}) absorbed {} ({})",
                lead.id, lead.value, absorbed.id, absorbed.value
            );
            score += value;
            merged.push(lead.id);
            cells.push(Some(Tile { value, ..lead }));
        } else {
            cells.push(Some(lead));
        }
    }
    cells.resize(line.len(), None);

    LineSlide {
        cells,
        score,
        merged,
    }
}

/// Slides the whole grid toward `direction` under `rule`.
///
/// Pure: `grid` is left untouched and identical inputs give identical
/// outcomes. Movement is detected by tile identity, so a merge that happens
/// to leave the same value in the same slot still counts. When nothing moves
/// the returned grid equals the input, identities included.
pub fn apply_move<R: MergeRule + ?Sized>(
    grid: &Grid,
    direction: Direction,
    rule: &R,
) -> MoveOutcome {
    let size = grid.size();
    let traversal = direction.traversal();
    let mut next = grid.clone();
    let mut score_delta = 0;
    let mut merged_ids = Vec::new();
    let mut moved = false;

    for line in 0..size {
        let before: Vec<Option<Tile>> = traversal
            .line_cells(line, size)
            .map(|(row, col)| grid.get(row, col).copied())
            .collect();
        let slid = slide_line(&before, rule);

        for ((row, col), tile) in traversal.line_cells(line, size).zip(&slid.cells) {
            next.set(row, col, *tile);
        }

        let identities = |cells: &[Option<Tile>]| -> Vec<Option<TileId>> {
            cells.iter().map(|cell| cell.map(|tile| tile.id)).collect()
        };
        moved |= identities(&before) != identities(&slid.cells);
        score_delta += slid.score;
        merged_ids.extend(slid.merged);
    }

    trace!(%direction, moved, score_delta, merges = merged_ids.len(), "resolved move");

    MoveOutcome {
        grid: next,
        score_delta,
        moved,
        merged_ids,
    }
}
