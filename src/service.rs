//! Request and response contracts for reaching the maze algorithms across a service boundary.
//!
//! The types serialize with the field names a remote client expects (`visitedOrder`,
//! `pathLength`, ...) so the same values can be exchanged with an out of process implementation.

use error_chain::bail;
use log::{info, warn};
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::cells::Cell;
use crate::errors::*;
use crate::generators::{self, Maze};
use crate::grid::MazeGrid;
use crate::pathing::{self, Solution};
use crate::units::{ColumnsCount, RowsCount};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub grid: MazeGrid,
    pub start: Cell,
    pub end: Cell,
    pub rows: usize,
    pub cols: usize,
}

impl From<Maze> for GenerateResponse {
    fn from(maze: Maze) -> GenerateResponse {
        GenerateResponse {
            grid: maze.grid,
            start: maze.start,
            end: maze.end,
            rows: maze.rows.0,
            cols: maze.columns.0,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub rows: usize,
    pub cols: usize,
    pub grid: MazeGrid,
    pub start: Cell,
    pub end: Cell,
}

impl From<GenerateResponse> for SolveRequest {
    fn from(generated: GenerateResponse) -> SolveRequest {
        SolveRequest {
            rows: generated.rows,
            cols: generated.cols,
            grid: generated.grid,
            start: generated.start,
            end: generated.end,
        }
    }
}

impl SolveRequest {
    /// The grid must be the rasterization of a `rows x cols` cell maze.
    pub fn validate(&self) -> Result<()> {
        let raster_size = |cells: usize| cells.checked_mul(2).and_then(|n| n.checked_add(1));
        let (expected_rows, expected_cols) = match (raster_size(self.rows), raster_size(self.cols)) {
            (Some(rows), Some(cols)) => (rows, cols),
            _ => bail!(ErrorKind::MalformedGrid(format!("a {}x{} maze is too large", self.rows, self.cols))),
        };

        let expected = (RowsCount(expected_rows), ColumnsCount(expected_cols));
        let actual = (self.grid.rows(), self.grid.columns());
        if self.rows < 1 || self.cols < 1 || expected != actual {
            bail!(ErrorKind::MalformedGrid(format!("a {}x{} maze needs a {}x{} grid, got {}x{}",
                                                   self.rows,
                                                   self.cols,
                                                   (expected.0).0,
                                                   (expected.1).0,
                                                   (actual.0).0,
                                                   (actual.1).0)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub solution: Vec<Cell>,
    pub path_length: usize,
    pub found: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveWithStepsResponse {
    pub solution: Vec<Cell>,
    pub visited_order: Vec<Cell>,
    pub path_length: usize,
    pub found: bool,
}

impl From<Solution> for SolveWithStepsResponse {
    fn from(solution: Solution) -> SolveWithStepsResponse {
        SolveWithStepsResponse {
            path_length: solution.path_length(),
            solution: solution.path,
            visited_order: solution.visited_order,
            found: solution.found,
        }
    }
}

impl From<SolveWithStepsResponse> for SolveResponse {
    fn from(steps: SolveWithStepsResponse) -> SolveResponse {
        SolveResponse {
            solution: steps.solution,
            path_length: steps.path_length,
            found: steps.found,
        }
    }
}

/// The operations a maze backend offers, whatever carries the calls.
///
/// Implementations reaching a remote backend report transport failures as
/// `ErrorKind::BackendUnavailable` and a missing step-by-step capability as
/// `ErrorKind::StepsUnsupported`.
pub trait MazeService {
    fn health_check(&self) -> bool;
    fn generate(&mut self, size: usize) -> Result<GenerateResponse>;
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse>;
    fn solve_with_steps(&self, request: &SolveRequest) -> Result<SolveWithStepsResponse>;
}

/// Runs the algorithms in process, with its own random source for maze generation.
#[derive(Debug)]
pub struct LocalMazeService<R: Rng> {
    rng: R,
}

impl<R: Rng> LocalMazeService<R> {
    pub fn new(rng: R) -> LocalMazeService<R> {
        LocalMazeService { rng: rng }
    }
}

impl<R: Rng> MazeService for LocalMazeService<R> {
    fn health_check(&self) -> bool {
        true
    }

    fn generate(&mut self, size: usize) -> Result<GenerateResponse> {
        info!("generating {}x{} maze", size, size);
        let maze = generators::recursive_backtracker(RowsCount(size), ColumnsCount(size), &mut self.rng)?;
        Ok(GenerateResponse::from(maze))
    }

    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse> {
        self.solve_with_steps(request).map(SolveResponse::from)
    }

    fn solve_with_steps(&self, request: &SolveRequest) -> Result<SolveWithStepsResponse> {
        request.validate()?;
        info!("solving {}x{} maze from {} to {}", request.rows, request.cols, request.start, request.end);
        let solution = pathing::shortest_path(&request.grid, request.start, request.end)?;
        Ok(SolveWithStepsResponse::from(solution))
    }
}

/// Ask for the step-by-step solution, degrading to the plain solution only when the service
/// says it cannot produce steps.
///
/// The degraded visitation order is the solution path itself. Any other failure, such as an
/// unavailable backend, is returned as is rather than being hidden behind the fallback.
pub fn solve_with_steps_or_fallback<S>(service: &S,
                                       request: &SolveRequest)
                                       -> Result<SolveWithStepsResponse>
    where S: MazeService + ?Sized
{
    match service.solve_with_steps(request) {
        Err(ref e) if matches!(e.kind(), ErrorKind::StepsUnsupported) => {
            warn!("step by step solving unsupported, replaying the solution path instead");
            let plain = service.solve(request)?;
            Ok(SolveWithStepsResponse {
                visited_order: plain.solution.clone(),
                solution: plain.solution,
                path_length: plain.path_length,
                found: plain.found,
            })
        }
        other => other,
    }
}
