//! Encode and decode command implementations

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use crate::codec;
use crate::config::TpxConfig;
use crate::rows;
use crate::vector;

use super::{load_grid, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the encode command - print a canvas as trait hex
pub fn run_encode(input: &Path, prefix: bool, config: &TpxConfig) -> ExitCode {
    let grid = match load_grid(input, config) {
        Ok(grid) => grid,
        Err(code) => return code,
    };
    debug!(pixels = grid.len(), "encoding canvas");

    let hex = codec::encode_hex(&grid);
    if prefix {
        println!("0x{}", hex);
    } else {
        println!("{}", hex);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the decode command - print a canvas as JSON rows or SVG
pub fn run_decode(input: &Path, svg: bool, config: &TpxConfig) -> ExitCode {
    let grid = match load_grid(input, config) {
        Ok(grid) => grid,
        Err(code) => return code,
    };

    if svg {
        println!("{}", vector::to_svg(&grid));
        return ExitCode::from(EXIT_SUCCESS);
    }

    match rows::to_json(&grid) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
