use grid_util::point::Point;
use thiserror::Error;

/// Raised while building a [CellGrid](crate::cell_grid::CellGrid) from map data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cell ({x}, {y}) has cost {cost}, costs must be finite and positive")]
    InvalidCost { x: usize, y: usize, cost: f64 },

    #[error("tile size must be positive, got {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },

    #[error("tile layer holds {actual} tiles, expected {expected}")]
    LayerSizeMismatch { expected: usize, actual: usize },

    #[error("unknown map glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// Raised when a search request itself is invalid. An unreachable destination is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("origin {0} lies outside the grid")]
    OriginOutOfBounds(Point),

    #[error("destination {0} lies outside the grid")]
    DestinationOutOfBounds(Point),

    #[error("search gave up after expanding {0} nodes")]
    ExpansionLimit(usize),
}
