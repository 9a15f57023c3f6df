use bit_set::BitSet;
use error_chain::bail;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::cells::{self, Cell, CellSmallVec};
use crate::errors::*;
use crate::grid::{MazeGrid, Tile};
use crate::units::{ColumnsCount, RowsCount};

/// A generated maze: the rasterized grid plus the conventional entry and exit tiles.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Maze {
    pub grid: MazeGrid,
    pub start: Cell,
    pub end: Cell,
    pub rows: RowsCount,
    pub columns: ColumnsCount,
}

/// Apply the recursive backtracker maze generation algorithm to a `rows x columns` cell grid.
///
/// A depth first random walk that carves a passage into a randomly chosen unvisited neighbour,
/// and when stuck backtracks along its own path (an explicit stack) until it finds a cell with
/// an unvisited neighbour. Every cell gets visited exactly once so the carved passages form a
/// spanning tree of the cell grid, i.e. a perfect maze.
///
/// The walk is rasterized as it goes into a `(2 * rows + 1) x (2 * columns + 1)` grid of walls.
/// The tile above the start and the tile below the end, both on the outer boundary, are opened
/// as the maze entrance and exit.
///
/// The only randomness is the neighbour choice, so a seeded `rng` reproduces the same maze.
pub fn recursive_backtracker<R: Rng>(rows: RowsCount,
                                     columns: ColumnsCount,
                                     rng: &mut R)
                                     -> Result<Maze> {
    let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
    if rows_count < 1 || columns_count < 1 {
        bail!(ErrorKind::InvalidDimension(rows_count, columns_count));
    }

    let grid_rows = RowsCount(rows_count * 2 + 1);
    let grid_columns = ColumnsCount(columns_count * 2 + 1);
    let mut grid = MazeGrid::filled(grid_rows, grid_columns, Tile::Wall);

    let mut visited = BitSet::with_capacity(rows_count * columns_count);
    let first_cell = Cell::new(0, 0);
    visited.insert(first_cell.row_major_index(columns));
    let mut stack = vec![first_cell];
    let mut passages_carved = 0;

    while let Some(&current) = stack.last() {

        let current_tile = cells::to_grid_coordinate(current);
        grid.set(current_tile, Tile::Path);

        let mut unvisited_neighbours = cells::neighbours(current, rows, columns)
            .iter()
            .cloned()
            .filter(|c| !visited.contains(c.row_major_index(columns)))
            .collect::<CellSmallVec>();

        if unvisited_neighbours.is_empty() {
            let _ = stack.pop();
        } else {
            if unvisited_neighbours.len() > 1 {
                unvisited_neighbours.shuffle(rng);
            }
            let next = unvisited_neighbours[0];
            visited.insert(next.row_major_index(columns));

            let wall = cells::wall_between(current_tile, cells::to_grid_coordinate(next));
            grid.set(wall, Tile::Path);
            passages_carved += 1;

            stack.push(next);
        }
    }

    let start = cells::to_grid_coordinate(first_cell);
    let end = cells::to_grid_coordinate(Cell::new(rows_count - 1, columns_count - 1));
    grid.set(start, Tile::Path);
    grid.set(end, Tile::Path);

    // Entrance through the top boundary, exit through the bottom boundary
    grid.set(Cell::new(0, start.col), Tile::Path);
    grid.set(Cell::new(grid_rows.0 - 1, end.col), Tile::Path);

    debug!("generated {}x{} maze with {} passages ({}x{} grid)",
           rows_count, columns_count, passages_carved, grid_rows.0, grid_columns.0);

    Ok(Maze {
        grid: grid,
        start: start,
        end: end,
        rows: rows,
        columns: columns,
    })
}
