//! PNG preview of a canvas

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use std::io;
use std::path::Path;

use crate::color::Rgb;
use crate::grid::PixelGrid;

/// Transparent color used for unset pixels without a background
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Rasterize a grid at one image pixel per cell.
///
/// Unset cells take the background color if given, otherwise stay fully
/// transparent.
///
/// # Examples
///
/// ```
/// use traitpx::color::Rgb;
/// use traitpx::grid::PixelGrid;
/// use traitpx::render::render_grid;
///
/// let mut grid = PixelGrid::with_size(4).unwrap();
/// grid.set(1, 2, Rgb::new(255, 0, 0)).unwrap();
///
/// let image = render_grid(&grid, None);
/// assert_eq!(image.dimensions(), (4, 4));
/// assert_eq!(image.get_pixel(1, 2).0, [255, 0, 0, 255]);
/// assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
/// ```
pub fn render_grid(grid: &PixelGrid, background: Option<Rgb>) -> RgbaImage {
    let size = grid.size();
    let fill = background.map(Rgb::to_rgba).unwrap_or(TRANSPARENT);
    let mut image = RgbaImage::from_pixel(size, size, fill);
    for record in grid.iter_set() {
        image.put_pixel(record.x as u32, record.y as u32, record.color.to_rgba());
    }
    image
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_with_background() {
        let mut grid = PixelGrid::with_size(3).unwrap();
        grid.set(2, 2, Rgb::WHITE).unwrap();
        let image = render_grid(&grid, Some(Rgb::new(0x0F, 0x6E, 0x9D)));

        assert_eq!(image.get_pixel(0, 0).0, [0x0F, 0x6E, 0x9D, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_scale_image_nearest() {
        let mut grid = PixelGrid::with_size(2).unwrap();
        grid.set(1, 0, Rgb::new(10, 20, 30)).unwrap();
        let scaled = scale_image(render_grid(&grid, None), 3);

        assert_eq!(scaled.dimensions(), (6, 6));
        assert_eq!(scaled.get_pixel(3, 0).0, [10, 20, 30, 255]);
        assert_eq!(scaled.get_pixel(5, 2).0, [10, 20, 30, 255]);
        assert_eq!(scaled.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_scale_factor_one_is_identity() {
        let image = render_grid(&PixelGrid::with_size(5).unwrap(), None);
        assert_eq!(scale_image(image.clone(), 1), image);
    }

    #[test]
    fn test_save_png_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("out.png");
        let image = render_grid(&PixelGrid::new(), Some(Rgb::BLACK));

        save_png(&image, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (30, 30));
        assert_eq!(loaded.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }
}
