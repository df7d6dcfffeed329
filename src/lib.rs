//! # grid_astar
//!
//! Least-cost pathfinding on tile grids using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with 4-directional movement and a
//! per-cell cost of entering each cell. The result is a [Path] that an agent consumes one cell per
//! tick, either directly through [Path::current_cell] and [Path::advance] or through a
//! [PathFollower].
//!
//! Grids are built once from map data and never change afterwards. On construction the
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of walkable
//! cells are computed, so that requests between disconnected regions return without flood-filling
//! the grid.
//!
//! ```
//! use grid_astar::{AstarSolver, CellGrid, GridSolver};
//! use grid_util::point::Point;
//!
//! let grid = CellGrid::from_ascii(".#.\n.#.\n...", 32, 32).unwrap();
//! let path = AstarSolver::new()
//!     .get_path(&grid, Point::new(0, 0), Point::new(2, 2))
//!     .unwrap()
//!     .expect("reachable");
//! assert_eq!(path.len(), 4);
//! ```
pub mod astar;
pub mod cell_grid;
pub mod error;
pub mod follower;
mod frontier;
pub mod path;
pub mod solver;

use grid_util::point::Point;
use std::num::NonZeroU32;

pub use cell_grid::{Cell, CellGrid, CellSpec, TileLayer};
pub use error::{GridError, SearchError};
pub use follower::{PathFollower, Step};
pub use path::Path;
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Cost assigned to every cell of a grid built from a collision layer.
pub const DEFAULT_CELL_COST: f64 = 1.0;
pub const DEFAULT_HEURISTIC_FACTOR: f64 = 1.0;
/// Inline capacity for neighbourhoods, one slot per orthogonal direction.
pub const N_SMALLVEC_SIZE: usize = 4;

pub fn manhattan_distance(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

/// Maps a world pixel position to the coordinates of the square cell containing it. Positions
/// left of or above the origin map to negative coordinates.
pub fn cell_from_world_point(px: i32, py: i32, cell_size: NonZeroU32) -> Point {
    let size = cell_size.get().min(i32::MAX as u32) as i32;
    world_to_cell(px, py, size, size)
}

pub(crate) fn world_to_cell(px: i32, py: i32, cell_width: i32, cell_height: i32) -> Point {
    Point::new(px.div_euclid(cell_width), py.div_euclid(cell_height))
}
