use grid_util::point::Point;

use crate::{cell_grid::CellGrid, solver::GridSolver};

/// Uninformed search. Expands cells purely by accumulated cost, which makes it the reference
/// for what the cheapest path costs.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &CellGrid, _: &Point, _: &Point) -> f64 {
        0.0
    }
}
