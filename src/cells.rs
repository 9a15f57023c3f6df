use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnsCount, RowsCount};

/// A (row, column) coordinate.
///
/// The same type is used in cell-space (one entry per maze cell, as the generator sees it) and in
/// grid-space (the rasterized maze where walls occupy their own tiles).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

pub type CellSmallVec = SmallVec<[Cell; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Neighbour emission order. Breadth first search tie-breaking depends on this never changing.
pub const DIRECTIONS: [GridDirection; 4] = [GridDirection::Up,
                                            GridDirection::Down,
                                            GridDirection::Left,
                                            GridDirection::Right];

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell { row: row, col: col }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cell {
        let ColumnsCount(width) = columns;
        Cell::new(index / width, index % width)
    }

    #[inline]
    pub fn row_major_index(&self, columns: ColumnsCount) -> usize {
        self.row * columns.0 + self.col
    }

    #[inline]
    pub fn is_within(&self, rows: RowsCount, columns: ColumnsCount) -> bool {
        self.row < rows.0 && self.col < columns.0
    }
}

impl From<(usize, usize)> for Cell {
    fn from(row_col_pair: (usize, usize)) -> Cell {
        Cell::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Structural equality of two cells.
#[inline]
pub fn cells_equal(a: Cell, b: Cell) -> bool {
    a.row == b.row && a.col == b.col
}

/// Are the two cells exactly one step apart along one axis?
pub fn is_adjacent(a: Cell, b: Cell) -> bool {
    let row_delta = if a.row > b.row { a.row - b.row } else { b.row - a.row };
    let col_delta = if a.col > b.col { a.col - b.col } else { b.col - a.col };
    row_delta + col_delta == 1
}

/// Creates a new `Cell` offset 1 step away in the given direction.
/// Returns None if the result would leave `[0, rows) x [0, columns)`.
pub fn offset_coordinate(coord: Cell,
                         dir: GridDirection,
                         rows: RowsCount,
                         columns: ColumnsCount)
                         -> Option<Cell> {
    let (row, col) = (coord.row, coord.col);
    let candidate = match dir {
        GridDirection::Up => {
            if row > 0 {
                Some(Cell::new(row - 1, col))
            } else {
                None
            }
        }
        GridDirection::Down => Some(Cell::new(row + 1, col)),
        GridDirection::Left => {
            if col > 0 {
                Some(Cell::new(row, col - 1))
            } else {
                None
            }
        }
        GridDirection::Right => Some(Cell::new(row, col + 1)),
    };

    candidate.and_then(|c| if c.is_within(rows, columns) { Some(c) } else { None })
}

/// The cells up, down, left and right of `coord` (in that order) that lie inside the bounds.
pub fn neighbours(coord: Cell, rows: RowsCount, columns: ColumnsCount) -> CellSmallVec {
    DIRECTIONS.iter()
        .filter_map(|dir| offset_coordinate(coord, *dir, rows, columns))
        .collect()
}

/// Maps a cell-space coordinate onto its tile in the rasterized maze grid.
#[inline]
pub fn to_grid_coordinate(cell: Cell) -> Cell {
    Cell::new(cell.row * 2 + 1, cell.col * 2 + 1)
}

/// The grid tile separating two grid-space cells that are two tiles apart on one axis.
#[inline]
pub fn wall_between(a: Cell, b: Cell) -> Cell {
    Cell::new((a.row + b.row) / 2, (a.col + b.col) / 2)
}
