use crate::cell_grid::CellGrid;
use crate::path::Path;
use grid_util::point::Point;
use log::trace;
use std::num::NonZeroU32;

/// What an agent should do this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing left to walk.
    Arrived,
    /// The agent stands exactly on this cell; the path cursor moved past it.
    Reached(Point),
    /// Move by this many pixels. Only one axis is non-zero.
    Move { dx: i32, dy: i32 },
}

/// Steers an agent along a [Path] in world pixels, one tick at a time. The agent's position is
/// compared with the top-left pixel of the current cell: horizontal distance is closed first,
/// then vertical, never overshooting the cell.
#[derive(Clone, Copy, Debug)]
pub struct PathFollower {
    cell_width: i32,
    cell_height: i32,
    speed: i32,
}

impl PathFollower {
    /// Uses the grid's tile size and moves at most `speed` pixels per tick.
    pub fn new(grid: &CellGrid, speed: NonZeroU32) -> PathFollower {
        PathFollower {
            cell_width: grid.tile_width() as i32,
            cell_height: grid.tile_height() as i32,
            speed: speed.get().min(i32::MAX as u32) as i32,
        }
    }

    /// Top-left pixel of `point`, saturating at the edges of the `i32` range.
    pub fn cell_origin(&self, point: Point) -> (i32, i32) {
        (
            point.x.saturating_mul(self.cell_width),
            point.y.saturating_mul(self.cell_height),
        )
    }

    pub fn step(&self, path: &mut Path, position: (i32, i32)) -> Step {
        let Some(cell) = path.current_cell() else {
            return Step::Arrived;
        };
        let point = cell.point;
        let (tx, ty) = self.cell_origin(point);
        let (x, y) = position;
        if (tx, ty) == (x, y) {
            trace!("Reached {}", point);
            path.advance();
            return Step::Reached(point);
        }
        let towards = |from: i32, to: i32| (to - from).clamp(-self.speed, self.speed);
        if tx != x {
            Step::Move {
                dx: towards(x, tx),
                dy: 0,
            }
        } else {
            Step::Move {
                dx: 0,
                dy: towards(y, ty),
            }
        }
    }
}
