use grid_util::point::Point;

use crate::{cell_grid::CellGrid, manhattan_distance, solver::GridSolver, DEFAULT_HEURISTIC_FACTOR};

/// A* over 4-connected cells with a Manhattan heuristic.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Must be finite and non-negative; anything else is treated as
    /// [DEFAULT_HEURISTIC_FACTOR]. Values above 1.0 trade optimality for fewer expansions.
    pub heuristic_factor: f64,
    pub max_expansions: Option<usize>,
    pub component_check: bool,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: DEFAULT_HEURISTIC_FACTOR,
            max_expansions: None,
            component_check: true,
        }
    }

    fn factor(&self) -> f64 {
        if self.heuristic_factor.is_finite() && self.heuristic_factor >= 0.0 {
            self.heuristic_factor
        } else {
            DEFAULT_HEURISTIC_FACTOR
        }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    /// Manhattan distance scaled by the cheapest cell cost on the grid, so it stays admissible
    /// when cells cost less than one.
    fn heuristic(&self, grid: &CellGrid, p1: &Point, p2: &Point) -> f64 {
        manhattan_distance(p1, p2) as f64 * grid.min_cost() * self.factor()
    }

    fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    fn component_check(&self) -> bool {
        self.component_check
    }
}
