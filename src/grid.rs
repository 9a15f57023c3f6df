use error_chain::bail;
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::cells::{self, Cell, CellSmallVec};
use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};


#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Tile {
    Wall,
    Path,
}

impl Tile {
    /// The wire value of the tile: 0 for a wall, 1 for an open path.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Tile::Wall => 0,
            Tile::Path => 1,
        }
    }

    pub fn from_value(value: u8) -> Option<Tile> {
        match value {
            0 => Some(Tile::Wall),
            1 => Some(Tile::Path),
            _ => None,
        }
    }
}

/// The rasterized maze: a rows x columns matrix of wall and path tiles.
///
/// For a maze of `r x c` cells the grid is `(2r + 1) x (2c + 1)`. Odd/odd tiles are the cells,
/// the other tiles are the walls between cells and the outer boundary.
///
/// There is no public mutation, once built a grid is a read-only artifact.
#[derive(Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct MazeGrid {
    tiles: Vec<Tile>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: rows: {:?}, columns: {:?}, open tiles: {}",
               self.rows, self.columns, self.open_tiles_count())
    }
}

impl MazeGrid {
    /// A grid with every tile set to `tile`. Only the generator builds grids from scratch.
    pub(crate) fn filled(rows: RowsCount, columns: ColumnsCount, tile: Tile) -> MazeGrid {
        MazeGrid {
            tiles: vec![tile; rows.0 * columns.0],
            rows: rows,
            columns: columns,
        }
    }

    /// Panics if the coordinate is outside the grid.
    pub(crate) fn set(&mut self, coord: Cell, tile: Tile) {
        let index = self.tile_index(coord).expect("Tile coordinate outside the maze grid.");
        self.tiles[index] = tile;
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cell) -> bool {
        coord.is_within(self.rows, self.columns)
    }

    #[inline]
    pub fn tile(&self, coord: Cell) -> Option<Tile> {
        self.tile_index(coord).map(|index| self.tiles[index])
    }

    /// True only for in-bounds open tiles.
    #[inline]
    pub fn is_path(&self, coord: Cell) -> bool {
        self.tile(coord) == Some(Tile::Path)
    }

    /// In-bounds tiles up, down, left and right of `coord`, whether open or not.
    #[inline]
    pub fn neighbours(&self, coord: Cell) -> CellSmallVec {
        cells::neighbours(coord, self.rows, self.columns)
    }

    /// Open tiles adjacent to `coord`, in the fixed up, down, left, right order.
    pub fn open_neighbours(&self, coord: Cell) -> CellSmallVec {
        self.neighbours(coord)
            .iter()
            .cloned()
            .filter(|neighbour| self.is_path(*neighbour))
            .collect()
    }

    pub fn open_tiles_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Path).count()
    }

    /// All the grid coordinates in row major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> {
        let columns = self.columns;
        (0..self.size()).map(move |index| Cell::from_row_major_index(index, columns))
    }

    /// The grid as rows of 0 (wall) and 1 (path) values.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.columns.0)
            .map(|row| row.iter().map(|t| t.value()).collect())
            .collect()
    }

    #[inline]
    fn tile_index(&self, coord: Cell) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row_major_index(self.columns))
        } else {
            None
        }
    }
}

impl From<MazeGrid> for Vec<Vec<u8>> {
    fn from(grid: MazeGrid) -> Vec<Vec<u8>> {
        grid.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for MazeGrid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<MazeGrid> {

        let columns_count = rows.first().map_or(0, |row| row.len());
        if columns_count == 0 {
            bail!(ErrorKind::MalformedGrid(String::from("the grid has no tiles")));
        }

        let mut tiles = Vec::with_capacity(rows.len() * columns_count);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns_count {
                bail!(ErrorKind::MalformedGrid(format!("row {} has {} tiles, expected {}",
                                                       row_index,
                                                       row.len(),
                                                       columns_count)));
            }
            for (col_index, value) in row.iter().enumerate() {
                let tile = Tile::from_value(*value).ok_or_else(|| {
                    ErrorKind::MalformedGrid(format!("tile {} has value {}, expected 0 or 1",
                                                     Cell::new(row_index, col_index),
                                                     value))
                })?;
                tiles.push(tile);
            }
        }

        Ok(MazeGrid {
            tiles: tiles,
            rows: RowsCount(rows.len()),
            columns: ColumnsCount(columns_count),
        })
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn corridor() -> MazeGrid {
        MazeGrid::try_from(vec![vec![0, 1, 0],
                                vec![0, 1, 0],
                                vec![0, 1, 0]])
            .expect("valid grid")
    }

    #[test]
    fn grid_dimensions() {
        let g = MazeGrid::filled(RowsCount(5), ColumnsCount(7), Tile::Wall);
        assert_eq!(g.rows(), RowsCount(5));
        assert_eq!(g.columns(), ColumnsCount(7));
        assert_eq!(g.size(), 35);
        assert_eq!(g.open_tiles_count(), 0);
    }

    #[test]
    fn tile_lookup() {
        let g = corridor();
        assert_eq!(g.tile(Cell::new(0, 0)), Some(Tile::Wall));
        assert_eq!(g.tile(Cell::new(1, 1)), Some(Tile::Path));
        assert_eq!(g.tile(Cell::new(3, 1)), None);
        assert!(g.is_path(Cell::new(2, 1)));
        assert!(!g.is_path(Cell::new(2, 2)));
        assert!(!g.is_path(Cell::new(9, 9)));
    }

    #[test]
    fn setting_tiles() {
        let mut g = MazeGrid::filled(RowsCount(3), ColumnsCount(3), Tile::Wall);
        g.set(Cell::new(1, 1), Tile::Path);
        assert!(g.is_path(Cell::new(1, 1)));
        assert_eq!(g.open_tiles_count(), 1);
    }

    #[test]
    fn open_neighbours_skip_walls() {
        let g = corridor();
        assert_eq!(&*g.open_neighbours(Cell::new(1, 1)), &[Cell::new(0, 1), Cell::new(2, 1)]);
        assert_eq!(&*g.open_neighbours(Cell::new(0, 1)), &[Cell::new(1, 1)]);
    }

    #[test]
    fn iter_is_row_major() {
        let g = MazeGrid::filled(RowsCount(2), ColumnsCount(3), Tile::Wall);
        let coords: Vec<Cell> = g.iter().collect();
        assert_eq!(coords,
                   vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2),
                        Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)]);
    }

    #[test]
    fn rows_round_trip() {
        let rows = vec![vec![0, 1, 0, 0, 0], vec![0, 1, 1, 1, 0], vec![0, 0, 0, 1, 0]];
        let g = MazeGrid::try_from(rows.clone()).unwrap();
        assert_eq!(g.rows(), RowsCount(3));
        assert_eq!(g.columns(), ColumnsCount(5));
        assert_eq!(g.to_rows(), rows);
    }

    #[test]
    fn empty_grids_are_rejected() {
        let no_rows = MazeGrid::try_from(Vec::<Vec<u8>>::new());
        assert!(matches!(no_rows.unwrap_err().kind(), ErrorKind::MalformedGrid(_)));

        let no_columns = MazeGrid::try_from(vec![vec![]]);
        assert!(matches!(no_columns.unwrap_err().kind(), ErrorKind::MalformedGrid(_)));
    }

    #[test]
    fn ragged_grids_are_rejected() {
        let ragged = MazeGrid::try_from(vec![vec![0, 1, 0], vec![0, 1]]);
        assert!(matches!(ragged.unwrap_err().kind(), ErrorKind::MalformedGrid(_)));
    }

    #[test]
    fn non_binary_tiles_are_rejected() {
        let bad = MazeGrid::try_from(vec![vec![0, 2, 0]]);
        let err = bad.unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedGrid(_)));
        assert!(err.to_string().contains("(0, 1)"));
    }

    #[test]
    fn json_representation_is_nested_rows() {
        let g = corridor();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[0,1,0],[0,1,0],[0,1,0]]");

        let parsed: MazeGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, g);

        let ragged: ::std::result::Result<MazeGrid, _> = serde_json::from_str("[[0,1],[1]]");
        assert!(ragged.is_err());
    }
}
