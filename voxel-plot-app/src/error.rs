use thiserror::Error;
use voxel_core::VoxelError;
use voxel_input::LoadError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Input Error: {0}")]
    Load(#[from] LoadError),

    #[error("Grid Error: {0}")]
    Voxel(#[from] VoxelError),

    #[error("Visualization Error: {0}")]
    Visualization(String),

    #[error("Export Error: {0}")]
    Export(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<figment::Error> for AppError {
    fn from(error: figment::Error) -> Self {
        Self::Config(error.to_string())
    }
}
