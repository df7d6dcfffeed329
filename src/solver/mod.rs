use crate::astar::{SearchContext, SearchOutcome};
use crate::cell_grid::CellGrid;
use crate::error::SearchError;
use crate::path::Path;
use crate::N_SMALLVEC_SIZE;
use grid_util::point::Point;
use log::{debug, info, warn};
use smallvec::SmallVec;

pub mod astar;
pub mod dijkstra;

/// Binds the generic A* loop to a [CellGrid]. Implementors choose the heuristic and, if they
/// want to, the neighbourhood and search budget.
pub trait GridSolver {
    fn heuristic(&self, grid: &CellGrid, p1: &Point, p2: &Point) -> f64;

    /// Walkable orthogonal neighbours in west, east, south, north order.
    fn successors(
        &self,
        grid: &CellGrid,
        node: &Point,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        grid.neighbours(node)
    }

    fn max_expansions(&self) -> Option<usize> {
        None
    }

    /// Whether to consult the grid's connected components before searching.
    fn component_check(&self) -> bool {
        true
    }

    /// Cost of walking `path`, where `path[0]` is the cell the walk starts on. Every later point
    /// is charged the cost of the cell it enters. Off-grid or blocked points make the walk
    /// infinitely expensive.
    fn get_path_cost(&self, grid: &CellGrid, path: &[Point]) -> f64 {
        path.iter()
            .skip(1)
            .map(|p| match grid.get_point(*p) {
                Some(cell) if cell.walkable => cell.cost,
                _ => f64::INFINITY,
            })
            .sum()
    }

    /// Computes a least-cost path from `origin` to `destination`. Returns `Ok(None)` if the
    /// destination cannot be reached, which includes a blocked origin or destination. The
    /// returned [Path] excludes the origin, so `origin == destination` yields an empty path.
    fn get_path(
        &self,
        grid: &CellGrid,
        origin: Point,
        destination: Point,
    ) -> Result<Option<Path>, SearchError> {
        let origin_cell = grid
            .get_point(origin)
            .ok_or(SearchError::OriginOutOfBounds(origin))?;
        let destination_cell = grid
            .get_point(destination)
            .ok_or(SearchError::DestinationOutOfBounds(destination))?;
        if !destination_cell.walkable {
            debug!("Destination {} is blocked", destination);
            return Ok(None);
        }
        if !origin_cell.walkable {
            debug!("Origin {} is blocked", origin);
            return Ok(None);
        }
        // Check if origin and destination are on the same connected component.
        if self.component_check() && grid.unreachable(&origin, &destination) {
            info!("{} is not reachable from {}", destination, origin);
            return Ok(None);
        }
        let mut ct = SearchContext::new();
        let outcome = ct.astar(
            &origin,
            origin_cell.cost,
            |point| self.successors(grid, point),
            |point| self.heuristic(grid, point, &destination),
            |point| *point == destination,
            self.max_expansions(),
        );
        match outcome {
            SearchOutcome::Found { path, .. } => {
                let cells = path
                    .into_iter()
                    .filter_map(|p| grid.get_point(p).copied())
                    .collect();
                Ok(Some(Path::new(cells)))
            }
            SearchOutcome::Exhausted => {
                if self.component_check() {
                    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
                }
                Ok(None)
            }
            SearchOutcome::LimitReached => Err(SearchError::ExpansionLimit(ct.stats().expanded)),
        }
    }

    /// Same as [get_path](Self::get_path) with both endpoints given as world pixel positions,
    /// translated through the grid's tile size.
    fn get_path_between_world_points(
        &self,
        grid: &CellGrid,
        origin_px: (i32, i32),
        destination_px: (i32, i32),
    ) -> Result<Option<Path>, SearchError> {
        let origin = grid.cell_at_world_point(origin_px.0, origin_px.1);
        let destination = grid.cell_at_world_point(destination_px.0, destination_px.1);
        self.get_path(grid, origin, destination)
    }
}
