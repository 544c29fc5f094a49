//! Compositing of pixel records onto a live canvas.
//!
//! Records from the byte codec or the SVG reader are translated by an
//! offset and written into a [`PixelGrid`]. Records that land outside the
//! canvas are clipped, so a trait can be dragged partly off an edge.

use tracing::debug;

use crate::color::Rgb;
use crate::grid::{PixelGrid, PixelRecord};

/// How a merge treats what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MergeMode {
    /// Clear the canvas first, then apply the records.
    Replace,
    /// Overlay the records; everything they do not touch is kept.
    #[default]
    Affix,
}

/// Merge `records` into `grid`, each shifted by `(x_offset, y_offset)`.
///
/// Under [`MergeMode::Replace`] the grid is reset once before any record is
/// applied. Under [`MergeMode::Affix`] incoming pixels overwrite whatever is
/// at their destination. Destinations outside the canvas are skipped.
///
/// Returns the number of records actually written.
///
/// # Examples
///
/// ```
/// use traitpx::color::Rgb;
/// use traitpx::compositor::{merge, MergeMode};
/// use traitpx::grid::{PixelGrid, PixelRecord};
///
/// let mut grid = PixelGrid::new();
/// let records = [PixelRecord::new(0, 0, Rgb::new(0, 0, 255))];
///
/// assert_eq!(merge(&mut grid, &records, 2, 3, MergeMode::Affix), 1);
/// assert_eq!(grid.get(2, 3).unwrap(), Some(Rgb::new(0, 0, 255)));
///
/// // One column past the right edge: clipped
/// assert_eq!(merge(&mut grid, &records, 30, 0, MergeMode::Affix), 0);
/// ```
pub fn merge(
    grid: &mut PixelGrid,
    records: &[PixelRecord],
    x_offset: i32,
    y_offset: i32,
    mode: MergeMode,
) -> usize {
    if mode == MergeMode::Replace {
        grid.reset_all();
    }

    let mut applied = 0;
    for record in records {
        let x = record.x as i64 + x_offset as i64;
        let y = record.y as i64 + y_offset as i64;
        if place(grid, x, y, record.color) {
            applied += 1;
        }
    }

    let clipped = records.len() - applied;
    if clipped > 0 {
        debug!(applied, clipped, x_offset, y_offset, "clipped records outside canvas");
    }
    applied
}

/// Write a single pixel at signed coordinates, clipping instead of failing.
///
/// Returns whether the pixel landed on the canvas.
pub fn place(grid: &mut PixelGrid, x: i64, y: i64, color: Rgb) -> bool {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return false;
    };
    grid.set(x, y, color).is_ok()
}
