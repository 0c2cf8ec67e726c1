use crate::error::AppError;
use crate::render::Frame;
use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use voxel_core::OccupancyGrid;

/// Saves the occupancy grid to a file in a simple text format.
///
/// Format: `1`/`0` per cell along X, newline per row (Y), blank line
/// between layers (Z).
pub fn save_grid_to_file(grid: &OccupancyGrid, output_path: &Path) -> Result<()> {
    log::info!("Saving occupancy grid to {:?}...", output_path);

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {:?}", output_path))?;
    let mut writer = io::BufWriter::new(file);

    for z in 0..grid.depth {
        if z > 0 {
            // Separator between Z slices
            writeln!(writer)?;
        }
        for y in 0..grid.height {
            let line: String = (0..grid.width)
                .map(|x| if grid.is_occupied(x, y, z) { '1' } else { '0' })
                .collect();
            writeln!(writer, "{}", line)
                .with_context(|| format!("Failed to write line for coords (:, {}, {})", y, z))?;
        }
    }

    writer
        .flush()
        .context("Failed to flush writer for output file")?;
    log::info!("Successfully saved grid to {:?}", output_path);

    Ok(())
}

/// Converts a rendered frame into an RGB image.
pub fn frame_to_image(frame: &Frame) -> Result<RgbImage, AppError> {
    let width = u32::try_from(frame.width)
        .map_err(|_| AppError::Export(format!("Frame width {} is too large", frame.width)))?;
    let height = u32::try_from(frame.height)
        .map_err(|_| AppError::Export(format!("Frame height {} is too large", frame.height)))?;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let pixel = frame.pixels[y as usize * frame.width + x as usize];
        Rgb([(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8])
    }))
}

/// Saves a rendered frame as a PNG image, whatever the file extension.
pub fn save_frame_png(frame: &Frame, output_path: &Path) -> Result<(), AppError> {
    log::info!(
        "Saving {}x{} render to {:?}...",
        frame.width,
        frame.height,
        output_path
    );
    frame_to_image(frame)?
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| {
            AppError::Export(format!("Failed to write {}: {e}", output_path.display()))
        })?;
    log::info!("Successfully saved render to {:?}", output_path);
    Ok(())
}
