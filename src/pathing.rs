use error_chain::bail;
use log::debug;
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::cells::Cell;
use crate::errors::*;
use crate::grid::MazeGrid;
use crate::utils::{self, FnvHashMap};

/// The outcome of a breadth first search between two grid tiles.
///
/// `visited_order` lists every tile in the order the search first reached it, starting with the
/// start tile, so that a caller can replay the search frontier. It is filled in whether or not a
/// path was found.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Solution {
    pub path: Vec<Cell>,
    pub visited_order: Vec<Cell>,
    pub found: bool,
}

impl Solution {
    /// Number of tiles on the path, start and end included. 0 when there is no path.
    #[inline]
    pub fn path_length(&self) -> usize {
        self.path.len()
    }
}

/// Breadth first search for a shortest route of open tiles from `start` to `end`.
///
/// Neighbours are explored up, down, left, right so the result is deterministic. A tile is given
/// its parent only when first discovered, which is at its shortest distance from the start, so
/// following the parents back from the end gives a shortest path.
///
/// An unreachable end is not an error: the solution has `found == false` and an empty path.
/// Endpoints off the grid or on a wall are rejected before any searching.
pub fn shortest_path(grid: &MazeGrid, start: Cell, end: Cell) -> Result<Solution> {

    for endpoint in &[start, end] {
        if !grid.is_path(*endpoint) {
            bail!(ErrorKind::InvalidEndpoint(*endpoint));
        }
    }

    let capacity = grid.open_tiles_count();
    let mut visited = utils::fnv_hashset(capacity);
    let mut parents: FnvHashMap<Cell, Cell> = utils::fnv_hashmap(capacity);
    let mut visited_order = Vec::with_capacity(capacity);
    let mut queue = VecDeque::new();

    visited.insert(start);
    visited_order.push(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {

        if current == end {
            let path = reconstruct_path(&parents, start, end);
            debug!("path of {} tiles from {} to {} found after visiting {} tiles",
                   path.len(), start, end, visited_order.len());
            return Ok(Solution {
                path: path,
                visited_order: visited_order,
                found: true,
            });
        }

        for neighbour in grid.open_neighbours(current).iter() {
            if visited.insert(*neighbour) {
                let _ = parents.insert(*neighbour, current);
                visited_order.push(*neighbour);
                queue.push_back(*neighbour);
            }
        }
    }

    debug!("no path from {} to {}, {} tiles visited", start, end, visited_order.len());
    Ok(Solution {
        path: vec![],
        visited_order: visited_order,
        found: false,
    })
}

fn reconstruct_path(parents: &FnvHashMap<Cell, Cell>, start: Cell, end: Cell) -> Vec<Cell> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        current = *parents.get(&current)
            .expect("Every visited tile other than the start has a parent.");
        path.push(current);
    }

    path.reverse();
    path
}


/// Distance, in steps over open tiles, from a start tile to every tile reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cell,
    distances: FnvHashMap<Cell, usize>,
    max_distance: usize,
}

impl Distances {
    /// None if the start is not an open tile of the grid.
    pub fn new(grid: &MazeGrid, start_coordinate: Cell) -> Option<Distances> {

        if !grid.is_path(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.open_tiles_count());
        distances.insert(start_coordinate, 0);

        // Every step costs the same so the first distance recorded for a tile is final and the
        // distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        let mut distance = 0;
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for coord in &frontier {
                for neighbour in grid.open_neighbours(*coord).iter() {
                    if !distances.contains_key(neighbour) {
                        distances.insert(*neighbour, distance + 1);
                        new_frontier.push(*neighbour);
                    }
                }
            }
            if !new_frontier.is_empty() {
                distance += 1;
                max = distance;
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate: start_coordinate,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cell {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> usize {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cell) -> Option<usize> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cell; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cell; 8]>>();
        furthest.sort();
        furthest
    }
}
