//! Compose command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::compositor::MergeMode;
use crate::config::TpxConfig;
use crate::studio::Session;

use super::{load_grid, load_records, read_input, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the compose command - merge a trait onto a base and print hex
pub fn run_compose(
    base: &Path,
    layer: &Path,
    x_offset: i32,
    y_offset: i32,
    mode: MergeMode,
    prefix: bool,
    config: &TpxConfig,
) -> ExitCode {
    let mut session = match Session::from_config(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let base_grid = match load_grid(base, config) {
        Ok(grid) => grid,
        Err(code) => return code,
    };
    let base_records: Vec<_> = base_grid.iter_set().collect();
    session.merge_records(&base_records, 0, 0, MergeMode::Replace);

    let text = match read_input(layer) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let records = match load_records(&text, config.canvas.size) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}: {}", layer.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let applied = session.merge_records(&records, x_offset, y_offset, mode);
    eprintln!("Applied {} of {} pixels", applied, records.len());

    let hex = session.export_hex();
    if prefix {
        println!("0x{}", hex);
    } else {
        println!("{}", hex);
    }
    ExitCode::from(EXIT_SUCCESS)
}
