//! Palette command implementation

use std::process::ExitCode;

use crate::palette::DEFAULT_SWATCHES;
use crate::terminal::render_swatches;

use super::{parse_color_arg, EXIT_SUCCESS};

/// Execute the palette command
///
/// Without `--color`, lists the default swatches. With it, lists the five
/// shades of that color from darkest to lightest.
pub fn run_palette(color: Option<&str>) -> ExitCode {
    let colors = match color {
        Some(value) => match parse_color_arg("--color", value) {
            Ok(base) => base.shades().to_vec(),
            Err(code) => return code,
        },
        None => DEFAULT_SWATCHES.to_vec(),
    };

    print!("{}", render_swatches(&colors));
    ExitCode::from(EXIT_SUCCESS)
}
