use crate::error::AppError;
use crate::render::{render_scene, Camera, RenderStyle, VoxelScene};
use colored::Colorize;
use minifb::{Key, Window, WindowOptions};
use std::fmt::Write as _;
use voxel_core::OccupancyGrid;

/// Degrees the camera turns per frame while an arrow key is held.
const ROTATION_STEP: f32 = 2.0;

/// Trait for types that can present a voxel scene to the user.
///
/// Implementors define how the occupancy grid is shown, such as via
/// terminal output or a graphical window.
pub trait Visualizer {
    /// Displays the scene.
    ///
    /// Interactive implementations block until the user is done with the view.
    ///
    /// # Returns
    ///
    /// * `Ok(())` once the scene has been shown (and, for windows, closed).
    /// * `Err(AppError)` if the scene could not be displayed.
    fn display(&mut self, scene: &VoxelScene) -> Result<(), AppError>;
}

// --- Implementations ---

/// Prints the grid as text, one z-layer at a time.
#[derive(Debug, Default)]
pub struct TerminalVisualizer {
    layer: Option<usize>,
}

impl TerminalVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a visualizer that prints only `layer`.
    pub fn with_layer(layer: Option<usize>) -> Self {
        Self { layer }
    }

    pub fn set_layer(&mut self, layer: usize) {
        self.layer = Some(layer);
    }

    /// Formats the selected layers, `#` for occupied and `.` for empty cells.
    ///
    /// Each layer lists rows by increasing y, cells by increasing x.
    pub fn render_layers(&self, grid: &OccupancyGrid) -> String {
        let (width, height, depth) = grid.dimensions();
        let mut text = format!(
            "Grid: {}x{}x{} ({} occupied)\n",
            width,
            height,
            depth,
            grid.occupied_count()
        );

        let layers = match self.layer {
            Some(layer) if layer >= depth => {
                let _ = writeln!(text, "Layer {layer} is outside the grid (depth {depth})");
                return text;
            }
            Some(layer) => layer..layer + 1,
            None => 0..depth,
        };

        for z in layers {
            let _ = writeln!(text, "z = {z}");
            for y in 0..height {
                let row: String = (0..width)
                    .map(|x| if grid.is_occupied(x, y, z) { '#' } else { '.' })
                    .collect();
                text.push_str(&row);
                text.push('\n');
            }
        }
        text
    }
}

impl Visualizer for TerminalVisualizer {
    fn display(&mut self, scene: &VoxelScene) -> Result<(), AppError> {
        for line in self.render_layers(&scene.grid).lines() {
            let is_cell_row = !line.is_empty() && line.chars().all(|c| c == '#' || c == '.');
            if is_cell_row {
                let colored_line: String = line
                    .chars()
                    .map(|c| {
                        if c == '#' {
                            "#".blue().bold().to_string()
                        } else {
                            ".".dimmed().to_string()
                        }
                    })
                    .collect();
                println!("{colored_line}");
            } else {
                println!("{}", line.bold());
            }
        }
        Ok(())
    }
}

/// Shows the rendered voxels in a window and blocks until it is closed.
///
/// Arrow keys rotate the camera; Escape or the window's close button ends
/// the display.
pub struct WindowVisualizer {
    title: String,
    width: usize,
    height: usize,
    camera: Camera,
    style: RenderStyle,
}

impl WindowVisualizer {
    pub fn new(
        title: &str,
        width: usize,
        height: usize,
        camera: Camera,
        style: RenderStyle,
    ) -> Self {
        Self {
            title: title.to_owned(),
            width,
            height,
            camera,
            style,
        }
    }

    pub const fn camera(&self) -> Camera {
        self.camera
    }
}

impl Visualizer for WindowVisualizer {
    fn display(&mut self, scene: &VoxelScene) -> Result<(), AppError> {
        let mut window = Window::new(
            &self.title,
            self.width,
            self.height,
            WindowOptions::default(),
        )
        .map_err(|e| AppError::Visualization(format!("Failed to create window: {e}")))?;
        window.set_target_fps(60);

        log::info!("Window open: arrow keys rotate the view, Escape or close to exit");
        let mut frame = render_scene(scene, &self.camera, &self.style, self.width, self.height)?;

        while window.is_open() && !window.is_key_down(Key::Escape) {
            let (d_azimuth, d_elevation) = rotation_from_keys(&window.get_keys());
            if d_azimuth != 0.0 || d_elevation != 0.0 {
                self.camera.rotate(d_azimuth, d_elevation);
                log::trace!("Camera moved to {:?}", self.camera);
                frame = render_scene(scene, &self.camera, &self.style, self.width, self.height)?;
            }
            window
                .update_with_buffer(&frame.pixels, frame.width, frame.height)
                .map_err(|e| AppError::Visualization(format!("Failed to update window: {e}")))?;
        }

        log::info!("Window closed");
        Ok(())
    }
}

/// Camera rotation `(azimuth, elevation)` requested by the held keys.
pub fn rotation_from_keys(keys: &[Key]) -> (f32, f32) {
    keys.iter().fold((0.0, 0.0), |(az, el), key| match key {
        Key::Left => (az - ROTATION_STEP, el),
        Key::Right => (az + ROTATION_STEP, el),
        Key::Up => (az, el + ROTATION_STEP),
        Key::Down => (az, el - ROTATION_STEP),
        _ => (az, el),
    })
}
