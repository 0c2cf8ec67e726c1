//! Setup module for the voxel-plot application.
//!
//! This module contains the pipeline that loads, builds and displays a grid,
//! and the selection of the visualizer used for display.

pub mod execution;
pub mod visualization;
