//! # voxel-plot (Binary)
//!
//! Main executable entry point.

fn main() {
    std::process::exit(match voxel_plot_app::run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    });
}
