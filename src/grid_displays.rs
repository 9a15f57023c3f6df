use std::fmt;

use crate::cells::Cell;
use crate::grid::{MazeGrid, Tile};
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::FnvHashSet;

const WALL_BODY: &str = "██";
const OPEN_BODY: &str = "  ";

pub trait GridDisplay {
    /// Render the body of a grid tile as text, 2 glyphs wide.
    /// None falls back to the plain wall or open rendering.
    fn render_tile_body(&self, _: Cell) -> Option<String> {
        None
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cell>,
}
impl PathDisplay {
    pub fn new(path: &[Cell]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_tile_body(&self, coord: Cell) -> Option<String> {
        if self.on_path_coordinates.contains(&coord) {
            Some(String::from("()"))
        } else {
            None
        }
    }
}

/// Marks the tiles a search has reached so far, used to draw animation frames.
#[derive(Debug)]
pub struct VisitedDisplay {
    visited_coordinates: FnvHashSet<Cell>,
}
impl VisitedDisplay {
    pub fn new(visited: &[Cell]) -> Self {
        VisitedDisplay { visited_coordinates: visited.iter().cloned().collect() }
    }
}
impl GridDisplay for VisitedDisplay {
    fn render_tile_body(&self, coord: Cell) -> Option<String> {
        if self.visited_coordinates.contains(&coord) {
            Some(String::from("··"))
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: Cell,
    end: Cell,
}
impl StartEndPointsDisplay {
    pub fn new(start: Cell, end: Cell) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start: start, end: end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_tile_body(&self, coord: Cell) -> Option<String> {
        if coord == self.start {
            Some(String::from("S "))
        } else if coord == self.end {
            Some(String::from("E "))
        } else {
            None
        }
    }
}

/// The first display with something to say about a tile wins.
#[derive(Default)]
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    pub fn new() -> LayeredDisplay<'a> {
        LayeredDisplay { layers: vec![] }
    }

    pub fn layer(mut self, display: &'a dyn GridDisplay) -> LayeredDisplay<'a> {
        self.layers.push(display);
        self
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_tile_body(&self, coord: Cell) -> Option<String> {
        self.layers.iter().filter_map(|d| d.render_tile_body(coord)).next()
    }
}

/// A maze grid paired with a display that decorates its open tiles.
pub struct DisplayedGrid<'a> {
    grid: &'a MazeGrid,
    grid_display: Option<&'a dyn GridDisplay>,
}
impl<'a> DisplayedGrid<'a> {
    pub fn new(grid: &'a MazeGrid, grid_display: Option<&'a dyn GridDisplay>) -> DisplayedGrid<'a> {
        DisplayedGrid {
            grid: grid,
            grid_display: grid_display,
        }
    }
}

impl<'a> fmt::Display for DisplayedGrid<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let RowsCount(rows_count) = self.grid.rows();
        let ColumnsCount(columns_count) = self.grid.columns();

        let mut output = String::with_capacity(rows_count * (columns_count * WALL_BODY.len() + 1));
        for row in 0..rows_count {
            for col in 0..columns_count {
                let coord = Cell::new(row, col);
                match self.grid.tile(coord) {
                    Some(Tile::Path) => {
                        let body = self.grid_display.and_then(|d| d.render_tile_body(coord));
                        match body {
                            Some(text) => output.push_str(&text),
                            None => output.push_str(OPEN_BODY),
                        }
                    }
                    _ => output.push_str(WALL_BODY),
                }
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", DisplayedGrid::new(self, None))
    }
}


#[cfg(test)]
mod tests {

    use std::convert::TryFrom;

    use super::*;

    fn u_shaped() -> MazeGrid {
        MazeGrid::try_from(vec![vec![0, 1, 0, 0, 0],
                                vec![0, 1, 0, 1, 0],
                                vec![0, 1, 0, 1, 0],
                                vec![0, 1, 1, 1, 0],
                                vec![0, 0, 0, 1, 0]])
            .unwrap()
    }

    #[test]
    fn plain_grid() {
        let text = format!("{}", u_shaped());
        let expected = "██  ██████\n\
                        ██  ██  ██\n\
                        ██  ██  ██\n\
                        ██      ██\n\
                        ██████  ██\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn start_and_end_markers() {
        let g = MazeGrid::try_from(vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 1, 0]]).unwrap();
        let start_end = StartEndPointsDisplay::new(Cell::new(1, 1), Cell::new(1, 1));
        let text = format!("{}", DisplayedGrid::new(&g, Some(&start_end)));
        assert_eq!(text, "██  ██\n██S ██\n██  ██\n");
    }

    #[test]
    fn layers_take_priority_in_order() {
        let g = u_shaped();
        let path = [Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)];
        let visited = [Cell::new(1, 1), Cell::new(0, 1), Cell::new(2, 1), Cell::new(3, 1),
                       Cell::new(3, 2)];
        let path_display = PathDisplay::new(&path);
        let visited_display = VisitedDisplay::new(&visited);
        let start_end = StartEndPointsDisplay::new(Cell::new(1, 1), Cell::new(1, 3));
        let layered = LayeredDisplay::new()
            .layer(&start_end)
            .layer(&path_display)
            .layer(&visited_display);

        let text = format!("{}", DisplayedGrid::new(&g, Some(&layered)));
        let expected = "██··██████\n\
                        ██S ██E ██\n\
                        ██()██  ██\n\
                        ██()··  ██\n\
                        ██████  ██\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn displays_ignore_walls() {
        let g = u_shaped();
        let wall_path = PathDisplay::new(&[Cell::new(0, 0)]);
        let text = format!("{}", DisplayedGrid::new(&g, Some(&wall_path)));
        assert_eq!(text, format!("{}", g));
    }
}
