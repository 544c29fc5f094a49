//! Colormap rows: the text-editor view of a canvas.
//!
//! A canvas is written as a square JSON array of rows, `rows[y][x]`, where
//! each cell is a color string or `""` for transparent:
//!
//! ```json
//! [
//!   ["", "#EFB15E"],
//!   ["#000000", ""]
//! ]
//! ```

use thiserror::Error;

use crate::color::{parse_color, ColorError};
use crate::grid::{GridError, PixelGrid};

/// Error type for colormap row conversion.
#[derive(Debug, Error)]
pub enum RowsError {
    /// Input is not a JSON array of string arrays
    #[error("invalid colormap JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Row count or a row's width does not match the canvas size
    #[error("colormap must be {expected}x{expected}, found {found} at {context}")]
    Dimensions { expected: u32, found: usize, context: String },
    /// A cell is neither empty nor a color
    #[error("invalid color at ({x}, {y}): {source}")]
    Color {
        x: usize,
        y: usize,
        #[source]
        source: ColorError,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Convert a grid to `rows[y][x]` of `#RRGGBB` or `""`.
pub fn to_rows(grid: &PixelGrid) -> Vec<Vec<String>> {
    let size = grid.size() as usize;
    let mut rows = vec![vec![String::new(); size]; size];
    for record in grid.iter_set() {
        rows[record.y as usize][record.x as usize] = record.color.to_hex();
    }
    rows
}

/// Build a `size × size` grid from rows.
///
/// Cells accept any color [`parse_color`] understands; blank cells are
/// transparent.
pub fn from_rows(rows: &[Vec<String>], size: u32) -> Result<PixelGrid, RowsError> {
    let mut grid = PixelGrid::with_size(size)?;

    if rows.len() != size as usize {
        return Err(RowsError::Dimensions {
            expected: size,
            found: rows.len(),
            context: "row count".to_string(),
        });
    }

    for (y, row) in rows.iter().enumerate() {
        if row.len() != size as usize {
            return Err(RowsError::Dimensions {
                expected: size,
                found: row.len(),
                context: format!("row {}", y),
            });
        }
        for (x, cell) in row.iter().enumerate() {
            if cell.trim().is_empty() {
                continue;
            }
            let color = parse_color(cell).map_err(|source| RowsError::Color { x, y, source })?;
            grid.set(x as u32, y as u32, color)?;
        }
    }

    Ok(grid)
}

/// Serialize a grid as pretty-printed colormap JSON.
pub fn to_json(grid: &PixelGrid) -> Result<String, RowsError> {
    Ok(serde_json::to_string_pretty(&to_rows(grid))?)
}

/// Parse colormap JSON into a `size × size` grid.
pub fn from_json(json: &str, size: u32) -> Result<PixelGrid, RowsError> {
    let rows: Vec<Vec<String>> = serde_json::from_str(json)?;
    from_rows(&rows, size)
}
