use crate::{Coordinate, VoxelError, MAX_GRID_CELLS};
use bitvec::prelude::*;

/// Dense 3D array stored in x-fastest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub(crate) data: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid whose cells are produced by `f(x, y, z)`.
    pub fn from_fn(
        width: usize,
        height: usize,
        depth: usize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(width * height * depth);
        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    data.push(f(x, y, z));
                }
            }
        }
        Self {
            width,
            height,
            depth,
            data,
        }
    }

    /// Returns an immutable reference to the element at the given coordinates,
    /// or None if the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&T> {
        self.index(x, y, z).and_then(|idx| self.data.get(idx))
    }

    pub const fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Calculates the 1D index for the given 3D coordinates.
    /// Returns None if the coordinates are out of bounds.
    fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x < self.width && y < self.height && z < self.depth {
            Some(z * self.width * self.height + y * self.width + x)
        } else {
            None
        }
    }
}

/// Boolean grid marking which unit cubes are filled.
///
/// Cells are packed one bit each. A freshly created grid is entirely empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    cells: BitVec,
}

impl OccupancyGrid {
    /// Creates an empty grid with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the grid would hold more than [`MAX_GRID_CELLS`] cells.
    /// Use [`OccupancyGrid::try_new`] for sizes taken from input.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        match Self::try_new(width, height, depth) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an empty grid, refusing sizes above [`MAX_GRID_CELLS`].
    ///
    /// # Errors
    ///
    /// Returns `VoxelError::GridTooLarge` if the cell count overflows or
    /// exceeds the limit.
    pub fn try_new(width: usize, height: usize, depth: usize) -> Result<Self, VoxelError> {
        let cells = width
            .checked_mul(height)
            .and_then(|plane| plane.checked_mul(depth))
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or(VoxelError::GridTooLarge {
                width,
                height,
                depth,
                limit: MAX_GRID_CELLS,
            })?;
        Ok(Self {
            width,
            height,
            depth,
            cells: bitvec![0; cells],
        })
    }

    pub const fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    pub const fn total_cells(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Returns the cell state, or None if the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<bool> {
        self.index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Returns true if the cell is in bounds and occupied.
    pub fn is_occupied(&self, x: usize, y: usize, z: usize) -> bool {
        self.get(x, y, z).unwrap_or(false)
    }

    /// Marks the cell at `coord` as occupied. Marking a cell twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `VoxelError::OutOfBounds` if `coord` lies outside the grid.
    pub fn occupy(&mut self, coord: Coordinate) -> Result<(), VoxelError> {
        let idx = self
            .index(coord.x, coord.y, coord.z)
            .ok_or(VoxelError::OutOfBounds(coord.x, coord.y, coord.z))?;
        self.cells.set(idx, true);
        Ok(())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Iterates over occupied cells in x-fastest, then y, then z order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let plane = self.width * self.height;
        self.cells.iter_ones().map(move |idx| {
            Coordinate::new(idx % self.width, (idx % plane) / self.width, idx / plane)
        })
    }

    fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x < self.width && y < self.height && z < self.depth {
            Some(z * self.width * self.height + y * self.width + x)
        } else {
            None
        }
    }
}
