use crate::cell_grid::Cell;
use grid_util::point::Point;

/// The result of a successful search: the cells to walk through, origin excluded, and a cursor
/// pointing at the cell the agent should head for next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    cells: Vec<Cell>,
    cursor: usize,
    cost: f64,
}

impl Path {
    /// Builds a path from cells in travel order, origin excluded.
    pub fn new(cells: Vec<Cell>) -> Path {
        let cost = cells.iter().map(|c| c.cost).sum();
        Path {
            cells,
            cursor: 0,
            cost,
        }
    }

    /// The cell at the cursor, or [None] once every cell has been visited.
    pub fn current_cell(&self) -> Option<&Cell> {
        self.cells.get(self.cursor)
    }

    /// Moves the cursor one cell forward. Advancing past the end is allowed and simply keeps
    /// reporting arrival.
    pub fn advance(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    pub fn is_arrived(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells not yet reached, starting with the current one.
    pub fn remaining(&self) -> &[Cell] {
        self.cells.get(self.cursor..).unwrap_or(&[])
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(|c| c.point)
    }

    /// Sum of the costs of entering every cell on the path.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}
