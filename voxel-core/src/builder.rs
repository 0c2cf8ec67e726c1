use crate::{Coordinate, OccupancyGrid, SizingMode, VoxelError, MAX_GRID_CELLS};

/// Computes `(width, height, depth)` for a grid holding `rows`.
///
/// Every axis gets one cell of margin beyond the largest index, so the last
/// layer along each axis is always empty.
///
/// # Errors
///
/// Returns `VoxelError::EmptyInput` if `rows` is empty, a row validation
/// error if any row is not a valid coordinate, and `VoxelError::GridTooLarge`
/// if the grid would exceed [`MAX_GRID_CELLS`].
pub fn grid_extent(
    rows: &[Vec<i64>],
    mode: SizingMode,
) -> Result<(usize, usize, usize), VoxelError> {
    let coords = validate_rows(rows)?;
    extent_of(rows, &coords, mode)
}

/// Builds an occupancy grid from parsed input rows.
///
/// The first three values of each row name an occupied cell. Duplicate rows
/// and row order have no effect on the result.
///
/// # Errors
///
/// See [`grid_extent`].
pub fn build_occupancy_grid(
    rows: &[Vec<i64>],
    mode: SizingMode,
) -> Result<OccupancyGrid, VoxelError> {
    let coords = validate_rows(rows)?;
    let (width, height, depth) = extent_of(rows, &coords, mode)?;
    log::debug!(
        "Allocating {}x{}x{} occupancy grid ({:?} sizing) for {} rows",
        width,
        height,
        depth,
        mode,
        rows.len()
    );

    let mut grid = OccupancyGrid::try_new(width, height, depth)?;
    for coord in coords {
        grid.occupy(coord)?;
    }
    Ok(grid)
}

fn validate_rows(rows: &[Vec<i64>]) -> Result<Vec<Coordinate>, VoxelError> {
    if rows.is_empty() {
        return Err(VoxelError::EmptyInput);
    }
    rows.iter()
        .enumerate()
        .map(|(index, row)| Coordinate::from_row(index, row))
        .collect()
}

fn extent_of(
    rows: &[Vec<i64>],
    coords: &[Coordinate],
    mode: SizingMode,
) -> Result<(usize, usize, usize), VoxelError> {
    let (max_x, max_y, max_z) = match mode {
        SizingMode::Cubic => {
            // The first three columns are already known to be non-negative,
            // so the global maximum is too.
            let global = rows.iter().flatten().copied().max().unwrap_or(0);
            let global = usize::try_from(global).unwrap_or(0);
            (global, global, global)
        }
        SizingMode::PerAxis => coords.iter().fold((0, 0, 0), |(x, y, z), c| {
            (x.max(c.x), y.max(c.y), z.max(c.z))
        }),
    };

    let too_large = || VoxelError::GridTooLarge {
        width: max_x.saturating_add(2),
        height: max_y.saturating_add(2),
        depth: max_z.saturating_add(2),
        limit: MAX_GRID_CELLS,
    };

    let width = max_x.checked_add(2).ok_or_else(too_large)?;
    let height = max_y.checked_add(2).ok_or_else(too_large)?;
    let depth = max_z.checked_add(2).ok_or_else(too_large)?;
    let cells = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(depth))
        .ok_or_else(too_large)?;
    if cells > MAX_GRID_CELLS {
        return Err(too_large());
    }

    Ok((width, height, depth))
}
