//! Color parsing utilities for trait pixels
//!
//! Trait pixels carry exactly three channels. Transparency is never a color
//! value; it is the absence of a pixel in the grid.
//!
//! Supported input formats:
//! - Hex: `#RGB`, `#RRGGBB` (and `#RGBA`, `#RRGGBBAA` when fully opaque)
//! - Functional: `rgb()`, `hsl()`, `hwb()`, `oklch()`
//! - Named: `red`, `blue`, etc.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Color has an alpha channel below 255
    #[error("color '{0}' is translucent; trait pixels are opaque 24-bit RGB")]
    Translucent(String),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// An opaque 24-bit RGB color.
///
/// Serializes as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Brightness offsets offered as shading variants, darkest first.
pub const SHADE_STEPS: [i32; 5] = [-50, -10, 0, 10, 50];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The three channel bytes in wire order.
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse exactly six hex digits, with or without a leading `#`.
    ///
    /// This is the strict form used for SVG `fill` attributes.
    ///
    /// ```
    /// use traitpx::color::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex_digits("#123456").unwrap(), Rgb::new(0x12, 0x34, 0x56));
    /// assert_eq!(Rgb::from_hex_digits("abcdef").unwrap(), Rgb::new(0xAB, 0xCD, 0xEF));
    /// assert!(Rgb::from_hex_digits("#123").is_err());
    /// ```
    pub fn from_hex_digits(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(c));
        }
        if hex.len() != 6 {
            return Err(ColorError::InvalidLength(hex.len()));
        }
        Ok(Rgb::new(
            parse_hex_pair(&hex[0..2])?,
            parse_hex_pair(&hex[2..4])?,
            parse_hex_pair(&hex[4..6])?,
        ))
    }

    /// Brighten (positive) or darken (negative) every channel by `percent`
    /// of its own value, clamped to `0..=255`.
    ///
    /// ```
    /// use traitpx::color::Rgb;
    ///
    /// assert_eq!(Rgb::new(100, 50, 0).shade(-50), Rgb::new(50, 25, 0));
    /// assert_eq!(Rgb::new(200, 100, 10).shade(50), Rgb::new(255, 150, 15));
    /// ```
    pub fn shade(self, percent: i32) -> Self {
        let adjust = |c: u8| {
            let c = c as f64;
            (c + c * percent as f64 / 100.0).clamp(0.0, 255.0).round() as u8
        };
        Rgb::new(adjust(self.r), adjust(self.g), adjust(self.b))
    }

    /// The shading variants for this color, one per [`SHADE_STEPS`] entry.
    pub fn shades(self) -> [Rgb; 5] {
        SHADE_STEPS.map(|p| self.shade(p))
    }

    /// Convert to an opaque image pixel.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_color(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// Parse a CSS color string into an opaque RGB color.
///
/// # Examples
///
/// ```
/// use traitpx::color::{parse_color, Rgb};
///
/// assert_eq!(parse_color("#F00").unwrap(), Rgb::new(255, 0, 0));
/// assert_eq!(parse_color("#EFB15E").unwrap(), Rgb::new(0xEF, 0xB1, 0x5E));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), Rgb::new(0, 255, 0));
/// assert_eq!(parse_color("blue").unwrap(), Rgb::new(0, 0, 255));
/// assert!(parse_color("#FF000080").is_err());
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid, unparseable, or not fully
/// opaque.
pub fn parse_color(s: &str) -> Result<Rgb, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    let rgba = if s.starts_with('#') { parse_hex_color(s)? } else { parse_css_color(s)? };

    if rgba[3] != 255 {
        return Err(ColorError::Translucent(s.to_string()));
    }
    Ok(Rgb::new(rgba[0], rgba[1], rgba[2]))
}

/// Parse a hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let hex = &s[1..];
    let len = hex.len();

    for c in hex.chars() {
        if !c.is_ascii_hexdigit() {
            return Err(ColorError::InvalidHex(c));
        }
    }

    let digits: Vec<u8> = hex.chars().map(parse_hex_digit).collect::<Result<_, _>>()?;

    match len {
        // #RGB and #RGBA double each digit
        3 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Rgba([
            parse_hex_pair(&hex[0..2])?,
            parse_hex_pair(&hex[2..4])?,
            parse_hex_pair(&hex[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            parse_hex_pair(&hex[0..2])?,
            parse_hex_pair(&hex[2..4])?,
            parse_hex_pair(&hex[4..6])?,
            parse_hex_pair(&hex[6..8])?,
        ])),
        _ => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Rgba([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut value = 0;
    for c in s.chars() {
        value = value * 16 + parse_hex_digit(c)?;
    }
    Ok(value)
}
