//! Core library for voxel occupancy grids.
//! Defines the coordinate, grid and index-mesh types and the logic that turns
//! parsed input rows into an occupancy grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Row validation and grid construction.
pub mod builder;
/// Validated voxel coordinates.
pub mod coordinate;
/// Generic 3D grid structures and the packed occupancy grid.
pub mod grid;
/// Corner coordinates of every voxel, as consumed by renderers.
pub mod mesh;

/// Builds an occupancy grid from parsed input rows.
pub use crate::builder::build_occupancy_grid;
/// Computes the grid dimensions for a set of rows.
pub use crate::builder::grid_extent;
/// A validated, non-negative voxel coordinate.
pub use crate::coordinate::Coordinate;
/// Generic 3D grid structure.
pub use crate::grid::Grid;
/// Packed boolean grid marking occupied voxels.
pub use crate::grid::OccupancyGrid;
/// The `(u, v, w)` node arrays bounding every voxel.
pub use crate::mesh::IndexMesh;

/// Upper bound on the number of cells an occupancy grid may hold.
///
/// The index mesh stores three integers per node, so this also bounds the
/// memory spent on rendering geometry.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Errors that can occur while validating rows or building a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoxelError {
    /// The input contained no rows, so no grid size can be derived.
    #[error("No data: the input contains no coordinate rows")]
    EmptyInput,
    /// A row had fewer than the three values needed for a coordinate.
    #[error("Row {row} has {found} field(s); at least 3 are required")]
    TooFewFields { row: usize, found: usize },
    /// One of the first three values of a row was negative.
    #[error("Row {row} has negative coordinate value {value}")]
    NegativeValue { row: usize, value: i64 },
    /// The grid dimensions would exceed [`MAX_GRID_CELLS`].
    #[error("Grid of {width}x{height}x{depth} exceeds the limit of {limit} cells")]
    GridTooLarge {
        width: usize,
        height: usize,
        depth: usize,
        limit: usize,
    },
    /// A coordinate fell outside the grid it was written to.
    #[error("Coordinate ({0}, {1}, {2}) is outside the grid")]
    OutOfBounds(usize, usize, usize),
}

/// How the grid dimensions are derived from the input rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SizingMode {
    /// Every axis is `max + 2`, where `max` is the largest value anywhere in
    /// the input (extra columns included).
    #[default]
    Cubic,
    /// Each axis is sized independently from its own column's maximum.
    PerAxis,
}
