//! On-chain color map codec.
//!
//! A color map is a flat stream of 5-byte records, one per set pixel:
//!
//! ```text
//! x  y  r  g  b | x  y  r  g  b | ...
//! ```
//!
//! There is no header, length prefix, or terminator. The format is shared
//! with the minting contract and the on-chain renderer, so it must stay
//! byte-for-byte stable.
//!
//! At the system boundary the bytes travel as a hex string, optionally
//! prefixed with `0x`.

use thiserror::Error;
use tracing::trace;

use crate::color::Rgb;
use crate::grid::{PixelGrid, PixelRecord};

/// Bytes per encoded pixel.
pub const RECORD_LEN: usize = 5;

/// Error type for color map decoding.
///
/// Both variants are the "malformed encoding" failure; they differ only in
/// which layer rejected the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Byte length is not a whole number of records.
    #[error("malformed encoding: {len} bytes is not a multiple of {RECORD_LEN}")]
    MalformedLength { len: usize },
    /// Boundary string is not valid hex.
    #[error("malformed encoding: {0}")]
    MalformedHex(#[from] hex::FromHexError),
}

/// Encode every set pixel of `grid`, in [`PixelGrid::iter_set`] order.
///
/// # Examples
///
/// ```
/// use traitpx::codec::encode;
/// use traitpx::color::Rgb;
/// use traitpx::grid::PixelGrid;
///
/// let mut grid = PixelGrid::with_size(32).unwrap();
/// grid.set(1, 2, Rgb::new(0xFF, 0, 0)).unwrap();
/// assert_eq!(encode(&grid), vec![0x01, 0x02, 0xFF, 0x00, 0x00]);
/// ```
pub fn encode(grid: &PixelGrid) -> Vec<u8> {
    encode_records(grid.iter_set())
}

/// Encode an arbitrary record sequence.
pub fn encode_records(records: impl IntoIterator<Item = PixelRecord>) -> Vec<u8> {
    let records = records.into_iter();
    let mut bytes = Vec::with_capacity(records.size_hint().0 * RECORD_LEN);
    for record in records {
        let [r, g, b] = record.color.to_bytes();
        bytes.extend_from_slice(&[record.x, record.y, r, g, b]);
    }
    bytes
}

/// Decode a color map into records.
///
/// Coordinates are not checked against any canvas size; the compositor
/// clips them when the records are merged into a grid.
///
/// # Errors
///
/// Returns [`CodecError::MalformedLength`] if `bytes.len()` is not a
/// multiple of [`RECORD_LEN`]. An empty slice decodes to no records.
pub fn decode(bytes: &[u8]) -> Result<Vec<PixelRecord>, CodecError> {
    if bytes.len() % RECORD_LEN != 0 {
        return Err(CodecError::MalformedLength { len: bytes.len() });
    }

    let records: Vec<PixelRecord> = bytes
        .chunks_exact(RECORD_LEN)
        .map(|c| PixelRecord::new(c[0], c[1], Rgb::new(c[2], c[3], c[4])))
        .collect();
    trace!(records = records.len(), "decoded color map");
    Ok(records)
}

/// Encode `grid` as a lowercase hex string without a `0x` marker.
pub fn encode_hex(grid: &PixelGrid) -> String {
    hex::encode(encode(grid))
}

/// Decode a boundary hex string.
///
/// Surrounding whitespace and a single leading `0x`/`0X` marker are
/// ignored.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHex`] for an odd digit count or non-hex
/// characters, and [`CodecError::MalformedLength`] if the decoded bytes do
/// not form whole records.
pub fn decode_hex(input: &str) -> Result<Vec<PixelRecord>, CodecError> {
    let bytes = hex_to_bytes(input)?;
    decode(&bytes)
}

/// Strip the optional marker and convert hex digits to raw bytes.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, CodecError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(digits)?)
}
