use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Numeric value carried by a tile.
pub type Value = u64;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 16;

/// Stable identity of a tile, kept across slides and merges so a host can
/// animate continuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u64);

impl TileId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out tile identities in increasing order, starting at 1.
///
/// Owned by whoever owns the game state, so independent sessions never share
/// a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIds {
    next: u64,
}

impl Default for TileIds {
    fn default() -> Self {
        Self::new()
    }
}

impl TileIds {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub const fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// The identity the next call to [`Self::next_id`] will return.
    pub const fn peek(&self) -> TileId {
        TileId(self.next)
    }

    pub const fn reset(&mut self) {
        self.next = 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: Value,
    pub row: usize,
    pub col: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size {size} is outside {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Square board of optional tiles, stored row-major.
///
/// This is the only board representation; the tile list is derived from it
/// on demand. Every write keeps each tile's `row`/`col` equal to the slot
/// holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, GridError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GridError::SizeOutOfRange {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Builds a grid from plain value rows, `0` meaning empty.
    ///
    /// Tiles get fresh identities from `ids` in row-major order.
    pub fn from_values<Row: AsRef<[Value]>>(
        rows: &[Row],
        ids: &mut TileIds,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows.len())?;
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != grid.size {
                return Err(GridError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: grid.size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    grid.set(
                        row,
                        col,
                        Some(Tile {
                            id: ids.next_id(),
                            value,
                            row,
                            col,
                        }),
                    );
                }
            }
        }
        Ok(grid)
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    const fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        self.index(row, col)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<Value> {
        self.get(row, col).map(|tile| tile.value)
    }

    /// Puts `tile` (or nothing) at `row`/`col`, rewriting the tile's
    /// coordinates to match. Out-of-range coordinates are ignored.
    pub(crate) fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) {
        let Some(slot) = self
            .index(row, col)
            .and_then(|index| self.cells.get_mut(index))
        else {
            return;
        };
        *slot = tile.map(|tile| Tile { row, col, ..tile });
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.tiles().find(|tile| tile.id == id)
    }

    /// Coordinates of every empty slot, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| (index / self.size, index % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn total_value(&self) -> Value {
        self.tiles().map(|tile| tile.value).sum()
    }

    pub fn max_value(&self) -> Option<Value> {
        self.tiles().map(|tile| tile.value).max()
    }

    /// Value-only snapshot, `0` for empty slots.
    pub fn values(&self) -> Vec<Vec<Value>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.map_or(0, |tile| tile.value)).collect())
            .collect()
    }

    /// Mirror across the main diagonal.
    pub fn transposed(&self) -> Self {
        self.remapped(|row, col| (col, row))
    }

    /// Mirror every row left to right.
    pub fn reversed_rows(&self) -> Self {
        let last = self.size - 1;
        self.remapped(|row, col| (row, last - col))
    }

    fn remapped(&self, to: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let mut grid = Self {
            size: self.size,
            cells: vec![None; self.cells.len()],
        };
        for tile in self.tiles() {
            let (row, col) = to(tile.row, tile.col);
            grid.set(row, col, Some(*tile));
        }
        grid
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "{:>6}", tile.value)?,
                    None => write!(f, "{:>6}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
