//! Chooses the visualizer based on configuration.

use crate::config::{RenderMode, Settings};
use crate::render::{Camera, RenderStyle};
use crate::visualization::{TerminalVisualizer, Visualizer, WindowVisualizer};

/// Creates the visualizer for the configured render mode.
///
/// Returns `None` when the grid should not be displayed at all.
pub fn setup_visualization(
    settings: &Settings,
    camera: Camera,
    style: RenderStyle,
) -> Option<Box<dyn Visualizer>> {
    match settings.render_mode {
        RenderMode::None => None,
        RenderMode::Terminal => {
            log::info!("Using terminal visualization");
            Some(Box::new(TerminalVisualizer::with_layer(settings.layer)))
        }
        RenderMode::Window => {
            let title = format!("voxel-plot - {}", settings.input.display());
            log::info!(
                "Using window visualization ({}x{})",
                settings.window_width,
                settings.window_height
            );
            Some(Box::new(WindowVisualizer::new(
                &title,
                settings.window_width,
                settings.window_height,
                camera,
                style,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_mode_has_no_visualizer() {
        let settings = Settings {
            render_mode: RenderMode::None,
            ..Settings::default()
        };
        let visualizer = setup_visualization(&settings, Camera::default(), RenderStyle::default());
        assert!(visualizer.is_none());
    }

    #[test]
    fn test_display_modes_have_visualizers() {
        for mode in [RenderMode::Terminal, RenderMode::Window] {
            let settings = Settings {
                render_mode: mode,
                ..Settings::default()
            };
            assert!(
                setup_visualization(&settings, Camera::default(), RenderStyle::default()).is_some()
            );
        }
    }
}
