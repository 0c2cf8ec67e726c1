use crate::grid::{Grid, OccupancyGrid};

/// The node lattice bounding every voxel of an occupancy grid.
///
/// For a grid of `w x h x d` voxels the mesh has `(w+1) x (h+1) x (d+1)`
/// nodes, and node `(x, y, z)` holds `u = x`, `v = y`, `w = z`. Voxel
/// `(x, y, z)` spans nodes `(x..=x+1, y..=y+1, z..=z+1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMesh {
    pub u: Grid<u32>,
    pub v: Grid<u32>,
    pub w: Grid<u32>,
}

impl IndexMesh {
    /// Builds the mesh matching `grid`'s dimensions.
    pub fn for_grid(grid: &OccupancyGrid) -> Self {
        let (width, height, depth) = grid.dimensions();
        Self::new(width + 1, height + 1, depth + 1)
    }

    /// Builds a mesh with the given number of nodes along each axis.
    pub fn new(nodes_x: usize, nodes_y: usize, nodes_z: usize) -> Self {
        // Node counts are bounded by MAX_GRID_CELLS, so they fit in u32.
        let axis = |n: usize| n as u32;
        Self {
            u: Grid::from_fn(nodes_x, nodes_y, nodes_z, |x, _, _| axis(x)),
            v: Grid::from_fn(nodes_x, nodes_y, nodes_z, |_, y, _| axis(y)),
            w: Grid::from_fn(nodes_x, nodes_y, nodes_z, |_, _, z| axis(z)),
        }
    }

    /// Node counts along each axis.
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        self.u.dimensions()
    }

    /// Returns the `[u, v, w]` position of a mesh node, or None if out of bounds.
    pub fn corner(&self, x: usize, y: usize, z: usize) -> Option<[u32; 3]> {
        Some([
            *self.u.get(x, y, z)?,
            *self.v.get(x, y, z)?,
            *self.w.get(x, y, z)?,
        ])
    }

    /// Returns the eight corner positions of voxel `(x, y, z)`, indexed by
    /// `dx | dy << 1 | dz << 2`.
    pub fn voxel_corners(&self, x: usize, y: usize, z: usize) -> Option<[[u32; 3]; 8]> {
        let mut corners = [[0; 3]; 8];
        for (bits, corner) in corners.iter_mut().enumerate() {
            *corner = self.corner(x + (bits & 1), y + ((bits >> 1) & 1), z + (bits >> 2))?;
        }
        Some(corners)
    }
}
