//! **maze_solver** generates perfect mazes with a randomized depth first backtracker and finds
//! shortest routes through them with a breadth first search.
//!
//! Both algorithms return their complete results as data: the rasterized maze grid, and the
//! solution path together with the order the search visited tiles in. Animating either is left
//! to the caller, see `playback`.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod playback;
pub mod service;
pub mod units;
mod utils;
