//! Sparse pixel canvas for a single trait layer.
//!
//! A [`PixelGrid`] maps `(x, y)` coordinates inside a square `N × N` canvas
//! to an opaque [`Rgb`] color. Unset coordinates are transparent; there is
//! no "transparent color" value.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::color::Rgb;

/// Edge length of the studio canvas.
pub const DEFAULT_SIZE: u32 = 30;

/// Largest canvas whose coordinates still fit in a single byte.
pub const MAX_SIZE: u32 = 256;

/// Error type for grid operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside `[0, size)` on either axis.
    #[error("coordinates ({x}, {y}) out of bounds for {size}x{size} grid")]
    OutOfBounds { x: u32, y: u32, size: u32 },
    /// Canvas size outside `1..=256`.
    #[error("invalid canvas size {0}, expected 1..={MAX_SIZE}")]
    InvalidSize(u32),
}

/// One pixel in transfer: byte coordinates plus a color.
///
/// This is the shape produced by the byte codec and the SVG reader and
/// consumed by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelRecord {
    pub x: u8,
    pub y: u8,
    pub color: Rgb,
}

impl PixelRecord {
    pub const fn new(x: u8, y: u8, color: Rgb) -> Self {
        Self { x, y, color }
    }
}

/// A square canvas of optional colors.
///
/// Every mutation that changes the visible state bumps [`PixelGrid::version`],
/// so observers can detect changes by comparing versions instead of diffing.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    size: u32,
    /// Keyed by `(y, x)` so iteration is row-major.
    pixels: BTreeMap<(u8, u8), Rgb>,
    version: u64,
}

impl PixelGrid {
    /// Create an empty canvas of the studio's default size.
    pub fn new() -> Self {
        Self { size: DEFAULT_SIZE, pixels: BTreeMap::new(), version: 0 }
    }

    /// Create an empty `size × size` canvas.
    pub fn with_size(size: u32) -> Result<Self, GridError> {
        if size == 0 || size > MAX_SIZE {
            return Err(GridError::InvalidSize(size));
        }
        Ok(Self { size, pixels: BTreeMap::new(), version: 0 })
    }

    /// Edge length of the canvas.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of set pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Change counter, bumped by every state-changing mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether `(x, y)` lies inside the canvas.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.size && y < self.size
    }

    fn key(&self, x: u32, y: u32) -> Result<(u8, u8), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y, size: self.size });
        }
        // size <= 256, so in-bounds coordinates fit in a byte
        Ok((y as u8, x as u8))
    }

    /// Set the pixel at `(x, y)`, overwriting any previous color.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) -> Result<(), GridError> {
        let key = self.key(x, y)?;
        if self.pixels.insert(key, color) != Some(color) {
            self.version += 1;
        }
        Ok(())
    }

    /// Remove the pixel at `(x, y)`. Unset or out-of-range coordinates are a no-op.
    pub fn clear(&mut self, x: u32, y: u32) {
        if let Ok(key) = self.key(x, y) {
            if self.pixels.remove(&key).is_some() {
                self.version += 1;
            }
        }
    }

    /// Get the pixel at `(x, y)`; `None` means transparent.
    pub fn get(&self, x: u32, y: u32) -> Result<Option<Rgb>, GridError> {
        let key = self.key(x, y)?;
        Ok(self.pixels.get(&key).copied())
    }

    /// Remove every pixel.
    pub fn reset_all(&mut self) {
        if !self.pixels.is_empty() {
            self.pixels.clear();
            self.version += 1;
        }
    }

    /// Iterate over every set pixel in row-major order.
    ///
    /// The iterator borrows the grid, so the canvas cannot change while a
    /// pass is in progress. Call again for a fresh pass.
    pub fn iter_set(&self) -> impl Iterator<Item = PixelRecord> + '_ {
        self.pixels.iter().map(|(&(y, x), &color)| PixelRecord { x, y, color })
    }

    /// Replace the contents with another grid's pixels, keeping this grid's
    /// version history monotonic.
    pub(crate) fn restore_from(&mut self, snapshot: PixelGrid) {
        if self.pixels != snapshot.pixels || self.size != snapshot.size {
            self.size = snapshot.size;
            self.pixels = snapshot.pixels;
            self.version += 1;
        }
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Two grids are equal when they have the same size and the same pixels;
/// the version counter is bookkeeping and does not take part.
impl PartialEq for PixelGrid {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.pixels == other.pixels
    }
}

impl Eq for PixelGrid {}
