use voxel_core::grid::{Grid, OccupancyGrid};
use voxel_core::{Coordinate, VoxelError, MAX_GRID_CELLS};

#[test]
fn test_grid_from_fn() {
    let grid = Grid::from_fn(2, 3, 2, |x, y, z| x + 10 * y + 100 * z);
    assert_eq!(grid.dimensions(), (2, 3, 2));
    assert_eq!(*grid.get(1, 0, 0).unwrap(), 1);
    assert_eq!(*grid.get(0, 1, 0).unwrap(), 10);
    assert_eq!(*grid.get(1, 2, 1).unwrap(), 121);

    // Out of bounds checks
    assert!(grid.get(2, 0, 0).is_none()); // x out of bounds
    assert!(grid.get(0, 3, 0).is_none()); // y out of bounds
    assert!(grid.get(0, 0, 2).is_none()); // z out of bounds
}

#[test]
fn test_try_new_rejects_oversized_grids() {
    let grid = OccupancyGrid::try_new(4, 4, 4).unwrap();
    assert_eq!(grid.total_cells(), 64);

    // Overflowing product
    match OccupancyGrid::try_new(usize::MAX, 2, 1) {
        Err(VoxelError::GridTooLarge { width, limit, .. }) => {
            assert_eq!(width, usize::MAX);
            assert_eq!(limit, MAX_GRID_CELLS);
        }
        other => panic!("Expected GridTooLarge, got {other:?}"),
    }
    // Fits in usize but exceeds the limit
    assert!(matches!(
        OccupancyGrid::try_new(MAX_GRID_CELLS + 1, 1, 1),
        Err(VoxelError::GridTooLarge { .. })
    ));
}

#[test]
#[should_panic(expected = "exceeds")]
fn test_new_panics_on_oversized_grid() {
    let _ = OccupancyGrid::new(1 << 20, 1 << 20, 1 << 20);
}

#[test]
fn test_occupancy_grid_starts_empty() {
    let grid = OccupancyGrid::new(3, 3, 3);
    assert_eq!(grid.total_cells(), 27);
    assert_eq!(grid.occupied_count(), 0);
    assert_eq!(grid.get(2, 2, 2), Some(false));
    assert_eq!(grid.get(3, 0, 0), None);
}

#[test]
fn test_occupy_and_query() {
    let mut grid = OccupancyGrid::new(2, 3, 4);
    grid.occupy(Coordinate::new(1, 2, 3)).unwrap();
    grid.occupy(Coordinate::new(1, 2, 3)).unwrap();

    assert!(grid.is_occupied(1, 2, 3));
    assert!(!grid.is_occupied(0, 2, 3));
    assert!(!grid.is_occupied(5, 5, 5));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_occupy_out_of_bounds() {
    let mut grid = OccupancyGrid::new(2, 2, 2);
    let err = grid.occupy(Coordinate::new(0, 2, 0)).unwrap_err();
    assert_eq!(err, VoxelError::OutOfBounds(0, 2, 0));
}

#[test]
fn test_iter_occupied_order() {
    let mut grid = OccupancyGrid::new(3, 2, 2);
    grid.occupy(Coordinate::new(0, 0, 1)).unwrap();
    grid.occupy(Coordinate::new(2, 1, 0)).unwrap();
    grid.occupy(Coordinate::new(1, 0, 0)).unwrap();

    let occupied: Vec<_> = grid.iter_occupied().collect();
    assert_eq!(
        occupied,
        vec![
            Coordinate::new(1, 0, 0),
            Coordinate::new(2, 1, 0),
            Coordinate::new(0, 0, 1),
        ]
    );
}
