//! Terminal rendering utilities for colored canvas display
//!
//! Provides ANSI escape sequence generation for displaying a canvas with
//! true-color backgrounds in terminal emulators that support 24-bit color.

use crate::color::Rgb;
use crate::grid::PixelGrid;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a cell to an ANSI 24-bit background escape sequence.
///
/// Transparent cells are rendered as a dark gray background to visually
/// distinguish them from painted ones.
///
/// # Examples
///
/// ```
/// use traitpx::color::Rgb;
/// use traitpx::terminal::color_to_ansi_bg;
///
/// assert_eq!(color_to_ansi_bg(Some(Rgb::new(255, 0, 0))), "\x1b[48;2;255;0;0m");
/// assert_eq!(color_to_ansi_bg(None), "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(color: Option<Rgb>) -> String {
    match color {
        Some(c) => format!("\x1b[48;2;{};{};{}m", c.r, c.g, c.b),
        None => "\x1b[48;5;236m".to_string(),
    }
}

/// Render the canvas as rows of two-space cells with colored backgrounds.
pub fn render_ansi(grid: &PixelGrid) -> String {
    let size = grid.size();
    let mut cells: Vec<Option<Rgb>> = vec![None; (size * size) as usize];
    for record in grid.iter_set() {
        cells[record.y as usize * size as usize + record.x as usize] = Some(record.color);
    }

    let mut output = String::new();
    for row in cells.chunks(size as usize) {
        for &cell in row {
            output.push_str(&color_to_ansi_bg(cell));
            output.push_str("  ");
        }
        output.push_str(ANSI_RESET);
        output.push('\n');
    }
    output
}

/// Render a row of labelled swatches, one per color.
pub fn render_swatches(colors: &[Rgb]) -> String {
    let mut output = String::new();
    for color in colors {
        output.push_str(&color_to_ansi_bg(Some(*color)));
        output.push_str("    ");
        output.push_str(ANSI_RESET);
        output.push(' ');
        output.push_str(&color.to_hex());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ansi_dimensions() {
        let grid = PixelGrid::with_size(3).unwrap();
        let out = render_ansi(&grid);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.ends_with(ANSI_RESET)));
        assert_eq!(lines[0].matches("\x1b[48;5;236m").count(), 3);
    }

    #[test]
    fn test_render_ansi_colored_cell_position() {
        let mut grid = PixelGrid::with_size(2).unwrap();
        grid.set(1, 1, Rgb::new(1, 2, 3)).unwrap();
        let out = render_ansi(&grid);
        let lines: Vec<&str> = out.lines().collect();
        assert!(!lines[0].contains("48;2;1;2;3"));
        assert!(lines[1].contains("\x1b[48;5;236m  \x1b[48;2;1;2;3m  "));
    }

    #[test]
    fn test_render_swatches() {
        let out = render_swatches(&[Rgb::BLACK, Rgb::WHITE]);
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("#FFFFFF"));
    }
}
