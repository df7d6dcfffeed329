use crate::error::GridError;
use crate::{world_to_cell, DEFAULT_CELL_COST, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

/// Orthogonal offsets in expansion order: west, east, south, north.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A single grid position. Two cells are the same cell when their coordinates match, regardless
/// of cost or walkability.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub point: Point,
    /// Cost of entering this cell.
    pub cost: f64,
    pub walkable: bool,
}

impl Cell {
    pub fn x(&self) -> i32 {
        self.point.x
    }
    pub fn y(&self) -> i32 {
        self.point.y
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}

/// Walkability and cost of a cell before it is placed on a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSpec {
    pub walkable: bool,
    pub cost: f64,
}

impl CellSpec {
    pub fn open(cost: f64) -> CellSpec {
        CellSpec {
            walkable: true,
            cost,
        }
    }
    pub fn blocked() -> CellSpec {
        CellSpec {
            walkable: false,
            cost: DEFAULT_CELL_COST,
        }
    }
}

impl Default for CellSpec {
    fn default() -> CellSpec {
        CellSpec::open(DEFAULT_CELL_COST)
    }
}

/// A collision layer as handed over by a map loader: one optional tile id per position, stored
/// row-major. Any tile present blocks its position.
#[derive(Clone, Debug, Default)]
pub struct TileLayer {
    pub width: usize,
    pub height: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tiles: Vec<Option<u32>>,
}

/// [CellGrid] is the read-only search space. Besides the cells themselves it records the tile
/// size in pixels for world-to-cell translation and a [UnionFind] over 4-connected walkable cells
/// so that unreachable requests can be answered without searching.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: usize,
    height: usize,
    tile_width: u32,
    tile_height: u32,
    cells: Vec<Cell>,
    min_cost: f64,
    components: UnionFind<usize>,
}

impl CellGrid {
    /// Builds a grid from a collision layer. Positions without a tile are walkable and all cells
    /// cost [DEFAULT_CELL_COST].
    pub fn from_collision_layer(layer: &TileLayer) -> Result<CellGrid, GridError> {
        let expected = layer.width * layer.height;
        if layer.tiles.len() != expected {
            return Err(GridError::LayerSizeMismatch {
                expected,
                actual: layer.tiles.len(),
            });
        }
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let rows = layer
            .tiles
            .chunks(layer.width)
            .map(|row| {
                row.iter()
                    .map(|tile| match tile {
                        Some(_) => CellSpec::blocked(),
                        None => CellSpec::default(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        CellGrid::from_rows(rows, layer.tile_width, layer.tile_height)
    }

    /// Builds a grid from explicit rows, `rows[y][x]`. Every row must have the same length and
    /// every cost must be finite and positive.
    pub fn from_rows(
        rows: Vec<Vec<CellSpec>>,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<CellGrid, GridError> {
        let valid_size = |s: u32| s > 0 && s <= i32::MAX as u32;
        if !valid_size(tile_width) || !valid_size(tile_height) {
            return Err(GridError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, spec) in row.into_iter().enumerate() {
                if !spec.cost.is_finite() || spec.cost <= 0.0 {
                    return Err(GridError::InvalidCost {
                        x,
                        y,
                        cost: spec.cost,
                    });
                }
                cells.push(Cell {
                    point: Point::new(x as i32, y as i32),
                    cost: spec.cost,
                    walkable: spec.walkable,
                });
            }
        }
        let min_cost = cells
            .iter()
            .filter(|c| c.walkable)
            .map(|c| c.cost)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |m| m.min(c))))
            .unwrap_or(DEFAULT_CELL_COST);
        let mut grid = CellGrid {
            width,
            height,
            tile_width,
            tile_height,
            cells,
            min_cost,
            components: UnionFind::new(width * height),
        };
        grid.generate_components();
        debug!(
            "Built {}x{} grid, {} walkable cells",
            width,
            height,
            grid.cells.iter().filter(|c| c.walkable).count()
        );
        Ok(grid)
    }

    /// Parses a text map, one line per row. `.` is walkable with cost 1, a digit `1`-`9` is
    /// walkable with that cost and `#`, `@` or `T` is blocked. Blank lines around the map are
    /// ignored.
    pub fn from_ascii(map: &str, tile_width: u32, tile_height: u32) -> Result<CellGrid, GridError> {
        let lines = map.lines().map(str::trim_end).collect::<Vec<_>>();
        let first = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
        let last = lines.iter().rposition(|l| !l.is_empty()).map_or(first, |i| i + 1);
        let mut rows = Vec::with_capacity(last - first);
        for (y, line) in lines[first..last].iter().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, glyph)| match glyph {
                    '.' => Ok(CellSpec::default()),
                    '#' | '@' | 'T' => Ok(CellSpec::blocked()),
                    '1'..='9' => Ok(CellSpec::open(f64::from(glyph as u8 - b'0'))),
                    _ => Err(GridError::UnknownGlyph { glyph, x, y }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        CellGrid::from_rows(rows, tile_width, tile_height)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }
    /// Cheapest cost of any walkable cell, used to keep the Manhattan heuristic admissible.
    pub fn min_cost(&self) -> f64 {
        self.min_cost
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    fn get_ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    /// The cell at `(x, y)`, or [None] outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.get_ix(x, y)])
        } else {
            None
        }
    }
    pub fn get_point(&self, point: Point) -> Option<&Cell> {
        self.get(point.x, point.y)
    }
    pub fn can_move_to(&self, point: Point) -> bool {
        self.get_point(point).is_some_and(|c| c.walkable)
    }

    /// Maps a world pixel position to the cell containing it using this grid's tile size.
    pub fn cell_at_world_point(&self, px: i32, py: i32) -> Point {
        world_to_cell(px, py, self.tile_width as i32, self.tile_height as i32)
    }

    /// Walkable orthogonal neighbours of `point` in west, east, south, north order, each paired
    /// with the cost of entering it. Positions off the grid are skipped.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        NEUMANN_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.get(point.x + dx, point.y + dy))
            .filter(|c| c.walkable)
            .map(|c| (c.point, c.cost))
            .collect()
    }

    /// Retrieves the component id of a walkable cell.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.get_point(*point)
            .filter(|c| c.walkable)
            .map(|_| self.components.find(self.get_ix(point.x, point.y)))
    }

    /// Checks if start and goal are walkable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Links up walkable cells with their walkable east and north neighbours.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.width * self.height);
        for (y, x) in iproduct!(0..self.height as i32, 0..self.width as i32) {
            if !self.cells[self.get_ix(x, y)].walkable {
                continue;
            }
            let ix = self.get_ix(x, y);
            for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                if self.get(nx, ny).is_some_and(|c| c.walkable) {
                    let n_ix = self.get_ix(nx, ny);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.cells.chunks(self.width) {
            let values = row
                .iter()
                .map(|c| !c.walkable as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
