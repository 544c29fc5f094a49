//! Saved colors and built-in swatches.

use crate::color::Rgb;

/// Swatches the studio always offers, before any saved colors.
pub const DEFAULT_SWATCHES: [Rgb; 10] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xEA, 0xD9, 0xD9),
    Rgb::new(0xE2, 0xCA, 0xCA),
    Rgb::new(0xEF, 0xB1, 0x5E),
    Rgb::new(0xD6, 0x97, 0x43),
    Rgb::new(0xBA, 0x81, 0x36),
    Rgb::new(0x9A, 0x6D, 0x2E),
    Rgb::new(0x8A, 0x5E, 0x24),
    Rgb::new(0x77, 0x51, 0x1E),
];

/// A saved color and the position it was saved at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub index: usize,
    pub color: Rgb,
}

/// Colors the user explicitly saved, in insertion order.
///
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteStore {
    colors: Vec<Rgb>,
}

impl PaletteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, color: Rgb) {
        self.colors.push(color);
    }

    pub fn reset_all(&mut self) {
        self.colors.clear();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Saved colors in the order they were appended.
    pub fn iter(&self) -> impl Iterator<Item = PaletteEntry> + '_ {
        self.colors.iter().enumerate().map(|(index, &color)| PaletteEntry { index, color })
    }

    /// The swatch row shown to the user: defaults, then saved colors if
    /// `include_saved` is set.
    pub fn swatches(&self, include_saved: bool) -> Vec<Rgb> {
        let mut out = DEFAULT_SWATCHES.to_vec();
        if include_saved {
            out.extend_from_slice(&self.colors);
        }
        out
    }
}
