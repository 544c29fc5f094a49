//! Render and show command implementations

use std::path::Path;
use std::process::ExitCode;

use tracing::info;

use crate::config::TpxConfig;
use crate::render::{render_grid, save_png, scale_image};
use crate::terminal::render_ansi;

use super::{load_grid, parse_color_arg, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the render command - write a canvas to PNG
pub fn run_render(
    input: &Path,
    output: &Path,
    scale: Option<u32>,
    background: Option<&str>,
    config: &TpxConfig,
) -> ExitCode {
    let background = match background {
        Some(value) => match parse_color_arg("--background", value) {
            Ok(color) => Some(color),
            Err(code) => return code,
        },
        None => config.canvas.background,
    };

    let grid = match load_grid(input, config) {
        Ok(grid) => grid,
        Err(code) => return code,
    };

    let scale = scale.unwrap_or(config.render.scale);
    let image = scale_image(render_grid(&grid, background), scale);

    if let Err(e) = save_png(&image, output) {
        eprintln!("Error: Failed to save '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    info!(path = %output.display(), scale, "rendered canvas");
    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the show command - display a canvas with colored terminal output
pub fn run_show(input: &Path, config: &TpxConfig) -> ExitCode {
    let grid = match load_grid(input, config) {
        Ok(grid) => grid,
        Err(code) => return code,
    };

    print!("{}", render_ansi(&grid));
    println!("{} pixels set on a {}x{} canvas", grid.len(), grid.size(), grid.size());
    ExitCode::from(EXIT_SUCCESS)
}
