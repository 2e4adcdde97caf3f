use strum::{Display, EnumIter, EnumString};

/// A slide direction.
///
/// Parses from browser key names (`"ArrowLeft"`) as well as plain lowercase
/// names (`"left"`), so a host can feed raw key events straight through and
/// drop whatever fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Direction {
    #[strum(to_string = "up", serialize = "ArrowUp")]
    Up,
    #[strum(to_string = "down", serialize = "ArrowDown")]
    Down,
    #[strum(to_string = "left", serialize = "ArrowLeft")]
    Left,
    #[strum(to_string = "right", serialize = "ArrowRight")]
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Coordinate mapping used to extract and write back lines for this direction.
    pub const fn traversal(self) -> Traversal {
        match self {
            Self::Up => UP,
            Self::Down => DOWN,
            Self::Left => LEFT,
            Self::Right => RIGHT,
        }
    }
}

/// Maps a line-local position to grid coordinates and back.
///
/// `line` picks the row or column, `offset` counts from the edge tiles slide
/// toward. Both functions take the grid size as their last argument.
#[derive(Debug, Clone, Copy)]
pub struct Traversal {
    pub cell: fn(usize, usize, usize) -> (usize, usize),
    pub line_offset: fn(usize, usize, usize) -> (usize, usize),
}

impl Traversal {
    /// Grid coordinates of every slot of `line`, in traversal order.
    pub fn line_cells(self, line: usize, size: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..size).map(move |offset| (self.cell)(line, offset, size))
    }
}

const LEFT: Traversal = Traversal {
    cell: |line, offset, _| (line, offset),
    line_offset: |row, col, _| (row, col),
};

const RIGHT: Traversal = Traversal {
    cell: |line, offset, size| (line, size - 1 - offset),
    line_offset: |row, col, size| (row, size - 1 - col),
};

const UP: Traversal = Traversal {
    cell: |line, offset, _| (offset, line),
    line_offset: |row, col, _| (col, row),
};

const DOWN: Traversal = Traversal {
    cell: |line, offset, size| (size - 1 - offset, line),
    line_offset: |row, col, size| (col, size - 1 - row),
};
