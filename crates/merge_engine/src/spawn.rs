use tracing::debug;

use crate::grid::{Grid, Tile, TileIds};
use crate::rule::SpawnValues;

/// Randomness used to place new tiles.
pub trait RandomSource {
    /// Uniform index in `0..bound`. Callers never pass zero.
    fn below(&mut self, bound: usize) -> usize;
    /// Uniform roll in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, bound: usize) -> usize {
        self.usize(..bound)
    }

    fn unit(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// Drops a new tile into a uniformly chosen empty slot.
///
/// Returns the placed tile, or `None` when the grid is full, in which case
/// neither the grid nor `ids` is touched.
pub fn spawn_tile<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    ids: &mut TileIds,
    values: SpawnValues,
    rng: &mut R,
) -> Option<Tile> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let &(row, col) = empty.get(rng.below(empty.len()))?;
    let value = values.pick(rng.unit());
    let tile = Tile {
        id: ids.next_id(),
        value,
        row,
        col,
    };
    grid.set(row, col, Some(tile));
    debug!("spawned {} ({value}) at {row},{col}", tile.id);
    Some(tile)
}
