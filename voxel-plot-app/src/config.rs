use crate::error::AppError;
use crate::render::MAX_FRAME_SIDE;
use clap::{Parser, ValueEnum};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use voxel_core::SizingMode;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "voxel-plot.toml";
/// Prefix of environment variables that override config file values.
pub const ENV_PREFIX: &str = "VOXEL_PLOT_";

/// Represents the different ways the grid can be displayed.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    #[default]
    Window, // Interactive window, blocks until closed
    Terminal, // Text slices on stdout
    None,     // Load and build only (plus any exports)
}

/// Represents the different global log levels available.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlobalLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Command-line arguments for voxel-plot.
///
/// Every option is optional: flags that are not given leave the value from
/// the config file, the environment, or the built-in default in place.
#[derive(Parser, Debug, Default, Serialize)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Coordinate file with one comma-separated `x,y,z` triple per line.
    #[arg(value_name = "INPUT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// TOML config file. Defaults to `voxel-plot.toml` if it exists.
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Field delimiter of the input file.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,

    /// How grid dimensions are derived from the input.
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingMode>,

    /// Choose how the grid is displayed.
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_mode: Option<RenderMode>,

    /// Only print this z-layer in terminal mode.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<usize>,

    /// Render one frame off-screen and save it as a PNG.
    #[arg(short, long, value_name = "PNG")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Save the occupancy grid as text slices.
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_grid: Option<PathBuf>,

    /// Width of the window or exported image in pixels.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<usize>,

    /// Height of the window or exported image in pixels.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<usize>,

    /// Initial camera azimuth in degrees.
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<f32>,

    /// Initial camera elevation in degrees.
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f32>,

    /// Voxel face colour as `#rrggbb`.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_color: Option<String>,

    /// Voxel edge colour as `#rrggbb`.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<String>,

    /// Global log level (RUST_LOG directives take precedence).
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<GlobalLogLevel>,
}

/// Fully resolved application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub delimiter: char,
    pub sizing: SizingMode,
    pub render_mode: RenderMode,
    pub layer: Option<usize>,
    pub output: Option<PathBuf>,
    pub dump_grid: Option<PathBuf>,
    pub window_width: usize,
    pub window_height: usize,
    pub azimuth: f32,
    pub elevation: f32,
    pub face_color: String,
    pub edge_color: String,
    pub log_level: GlobalLogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/input.txt"),
            delimiter: ',',
            sizing: SizingMode::Cubic,
            render_mode: RenderMode::Window,
            layer: None,
            output: None,
            dump_grid: None,
            window_width: 800,
            window_height: 600,
            azimuth: -60.0,
            elevation: 30.0,
            face_color: "#1f77b4".to_owned(),
            edge_color: "#000000".to_owned(),
            log_level: GlobalLogLevel::Info,
        }
    }
}

impl Settings {
    /// Resolves settings from defaults, the config file, the environment and
    /// the command line, in increasing order of precedence.
    pub fn load(cli: &AppConfig) -> Result<Self, AppError> {
        let settings: Self = Self::figment(cli)?.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Builds the layered figment without extracting it.
    pub fn figment(cli: &AppConfig) -> Result<Figment, AppError> {
        let file = match &cli.config {
            Some(path) if !path.is_file() => {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Toml::file(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(cli)))
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(AppError::Config(format!(
                "Window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.window_width > MAX_FRAME_SIDE || self.window_height > MAX_FRAME_SIDE {
            return Err(AppError::Config(format!(
                "Window size {}x{} exceeds the {MAX_FRAME_SIDE} pixel limit per side",
                self.window_width, self.window_height
            )));
        }
        if !self.azimuth.is_finite() || !self.elevation.is_finite() {
            return Err(AppError::Config(
                "Camera angles must be finite numbers".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_basic_args() {
        let args = vec![
            "voxel-plot",
            "points.txt",
            "--sizing",
            "per-axis",
            "--window-width",
            "320",
            "--output",
            "out.png",
        ];
        let cli = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("points.txt")));
        assert_eq!(cli.sizing, Some(SizingMode::PerAxis));
        assert_eq!(cli.window_width, Some(320));
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert_eq!(cli.render_mode, None);
    }

    #[test]
    fn test_defaults_without_args() {
        let cli = AppConfig::try_parse_from(["voxel-plot"]).unwrap();
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.input, PathBuf::from("data/input.txt"));
        assert_eq!(settings.delimiter, ',');
        assert_eq!(settings.sizing, SizingMode::Cubic);
        assert_eq!(settings.render_mode, RenderMode::Window);
        assert_eq!(settings.edge_color, "#000000");
    }

    #[test]
    fn test_negative_azimuth() {
        let args = vec!["voxel-plot", "--azimuth", "-30", "--elevation", "-10"];
        let cli = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(cli.azimuth, Some(-30.0));
        assert_eq!(cli.elevation, Some(-10.0));
    }

    #[test]
    fn test_render_mode() {
        let args = vec!["voxel-plot", "--render-mode", "terminal"];
        let cli = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(cli.render_mode, Some(RenderMode::Terminal));

        let args_err = vec!["voxel-plot", "--render-mode", "invalid-mode"];
        assert!(AppConfig::try_parse_from(args_err).is_err());
    }

    #[test]
    fn test_config_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.toml");
        fs::write(
            &path,
            r##"
                input = "cubes.txt"
                delimiter = ";"
                sizing = "per-axis"
                render_mode = "none"
                window_width = 400
                azimuth = 45
                face_color = "#ff0000"
            "##,
        )
        .unwrap();

        let cli = AppConfig {
            config: Some(path),
            ..AppConfig::default()
        };
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.input, PathBuf::from("cubes.txt"));
        assert_eq!(settings.delimiter, ';');
        assert_eq!(settings.sizing, SizingMode::PerAxis);
        assert_eq!(settings.render_mode, RenderMode::None);
        assert_eq!(settings.window_width, 400);
        assert_eq!(settings.window_height, 600);
        assert!((settings.azimuth - 45.0).abs() < f32::EPSILON);
        assert_eq!(settings.face_color, "#ff0000");
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.toml");
        fs::write(&path, "window_width = 400\nrender_mode = \"terminal\"\n").unwrap();

        let cli = AppConfig {
            config: Some(path),
            window_width: Some(1024),
            ..AppConfig::default()
        };
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.window_width, 1024);
        assert_eq!(settings.render_mode, RenderMode::Terminal);
    }

    #[test]
    fn test_missing_explicit_config() {
        let cli = AppConfig {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..AppConfig::default()
        };
        match Settings::load(&cli) {
            Err(AppError::Config(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_window_size_is_rejected() {
        let cli = AppConfig {
            window_height: Some(0),
            ..AppConfig::default()
        };
        assert!(matches!(Settings::load(&cli), Err(AppError::Config(_))));
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let cli = AppConfig::try_parse_from([
            "voxel-plot",
            "--window-width",
            "8589934592",
            "--window-height",
            "8589934592",
        ])
        .unwrap();
        match Settings::load(&cli) {
            Err(AppError::Config(msg)) => assert!(msg.contains("pixel limit")),
            other => panic!("Expected Config error, got {other:?}"),
        }

        let cli = AppConfig {
            window_width: Some(MAX_FRAME_SIDE + 1),
            ..AppConfig::default()
        };
        assert!(matches!(Settings::load(&cli), Err(AppError::Config(_))));

        let cli = AppConfig {
            window_width: Some(MAX_FRAME_SIDE),
            window_height: Some(MAX_FRAME_SIDE),
            ..AppConfig::default()
        };
        assert!(Settings::load(&cli).is_ok());
    }
}
