//! Runs the load, build and render pipeline.

use crate::{
    config::Settings,
    error::AppError,
    output,
    render::{render_scene, Camera, RenderStyle, VoxelScene},
    setup::visualization::setup_visualization,
};
use log::info;
use std::time::Instant;
use voxel_core::build_occupancy_grid;
use voxel_input::{load_with_parser, DelimitedFormatParser};

/// Loads the input file, builds the grid, runs the configured exports and
/// displays the result.
///
/// Returns the scene that was displayed. With the window render mode this
/// only returns after the window has been closed.
pub fn run_pipeline(settings: &Settings) -> Result<VoxelScene, AppError> {
    // Reject bad styling before touching the input file.
    let style = RenderStyle::from_settings(settings)?;
    let camera = Camera::new(settings.azimuth, settings.elevation);
    let parser = DelimitedFormatParser::with_delimiter(settings.delimiter)?;

    let start = Instant::now();
    info!("Loading coordinates from: {:?}", settings.input);
    let rows = load_with_parser(&settings.input, &parser)?;
    info!("Loaded {} rows", rows.len());

    let grid = build_occupancy_grid(&rows, settings.sizing)?;
    let (width, height, depth) = grid.dimensions();
    info!(
        "Built {}x{}x{} grid with {} occupied cells in {:?}",
        width,
        height,
        depth,
        grid.occupied_count(),
        start.elapsed()
    );
    let scene = VoxelScene::new(grid);

    if let Some(path) = &settings.dump_grid {
        output::save_grid_to_file(&scene.grid, path)?;
    }

    if let Some(path) = &settings.output {
        let frame = render_scene(
            &scene,
            &camera,
            &style,
            settings.window_width,
            settings.window_height,
        )?;
        output::save_frame_png(&frame, path)?;
    }

    match setup_visualization(settings, camera, style) {
        Some(mut visualizer) => visualizer.display(&scene)?,
        None => info!("Display disabled; skipping render"),
    }

    Ok(scene)
}
