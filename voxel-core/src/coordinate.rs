use crate::VoxelError;

/// A voxel position inside an occupancy grid.
///
/// Built from the first three values of an input row; any further values are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Validates one parsed input row and takes its first three values.
    ///
    /// `row_index` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `VoxelError::TooFewFields` if the row has fewer than three
    /// values, and `VoxelError::NegativeValue` if any of the first three is
    /// negative.
    pub fn from_row(row_index: usize, row: &[i64]) -> Result<Self, VoxelError> {
        let [x, y, z] = match row {
            [x, y, z, ..] => [*x, *y, *z],
            _ => {
                return Err(VoxelError::TooFewFields {
                    row: row_index,
                    found: row.len(),
                })
            }
        };

        let to_index = |value: i64| {
            usize::try_from(value).map_err(|_| VoxelError::NegativeValue {
                row: row_index,
                value,
            })
        };

        Ok(Self {
            x: to_index(x)?,
            y: to_index(y)?,
            z: to_index(z)?,
        })
    }

    /// Returns the coordinate as an `[x, y, z]` array.
    pub const fn to_array(self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}
