//! End-to-end scenarios through the public library API.
//!
//! Each test walks a trait from one representation to another the way the
//! studio and the minting flow do: draw or paste, encode, decode, merge.

use traitpx::codec::{decode, decode_hex, encode, encode_hex, encode_records, CodecError};
use traitpx::color::Rgb;
use traitpx::compositor::{merge, MergeMode};
use traitpx::grid::{PixelGrid, PixelRecord};
use traitpx::rows;
use traitpx::studio::Session;
use traitpx::vector;

const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
const GREEN: Rgb = Rgb::new(0x00, 0xFF, 0x00);
const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);

fn replay(records: &[PixelRecord], size: u32) -> PixelGrid {
    let mut grid = PixelGrid::with_size(size).unwrap();
    for r in records {
        grid.set(r.x as u32, r.y as u32, r.color).unwrap();
    }
    grid
}

// ============================================================================
// Byte format
// ============================================================================

#[test]
fn test_known_encoding_for_32_canvas() {
    let mut grid = PixelGrid::with_size(32).unwrap();
    grid.set(30, 31, GREEN).unwrap();
    grid.set(1, 2, RED).unwrap();

    assert_eq!(encode(&grid), vec![0x01, 0x02, 0xFF, 0x00, 0x00, 0x1E, 0x1F, 0x00, 0xFF, 0x00]);
    assert_eq!(encode_hex(&grid), "0102ff00001e1f00ff00");
}

#[test]
fn test_round_trip_dense_canvas() {
    let mut grid = PixelGrid::with_size(256).unwrap();
    for i in 0..256u32 {
        grid.set(i, 255 - i, Rgb::new(i as u8, 0x80, 255 - i as u8)).unwrap();
        grid.set(i, i, BLUE).unwrap();
    }

    let restored = replay(&decode(&encode(&grid)).unwrap(), 256);
    assert_eq!(restored, grid);
}

#[test]
fn test_empty_canvas_round_trip() {
    let grid = PixelGrid::new();
    assert!(encode(&grid).is_empty());
    assert_eq!(encode_hex(&grid), "");
    assert!(decode(&[]).unwrap().is_empty());
    assert!(decode_hex("0x").unwrap().is_empty());
}

#[test]
fn test_truncated_boundary_data_rejected() {
    let mut grid = PixelGrid::new();
    grid.set(3, 4, RED).unwrap();
    grid.set(5, 6, BLUE).unwrap();
    let hex = encode_hex(&grid);

    for cut in 1..5 {
        let truncated = &hex[..hex.len() - cut * 2];
        assert!(
            matches!(decode_hex(truncated), Err(CodecError::MalformedLength { .. })),
            "cut of {} bytes should be rejected",
            cut
        );
    }
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_replace_and_affix_over_existing_pixel() {
    let incoming = [PixelRecord::new(0, 0, BLUE)];

    let mut affixed = PixelGrid::new();
    affixed.set(5, 5, RED).unwrap();
    assert_eq!(merge(&mut affixed, &incoming, 0, 0, MergeMode::Affix), 1);
    assert_eq!(affixed.len(), 2);
    assert_eq!(affixed.get(5, 5).unwrap(), Some(RED));

    let mut replaced = PixelGrid::new();
    replaced.set(5, 5, RED).unwrap();
    assert_eq!(merge(&mut replaced, &incoming, 0, 0, MergeMode::Replace), 1);
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced.get(0, 0).unwrap(), Some(BLUE));
}

#[test]
fn test_offset_by_full_width_clips_everything() {
    let mut grid = PixelGrid::new();
    grid.set(2, 2, RED).unwrap();
    let before = grid.clone();

    let applied = merge(&mut grid, &[PixelRecord::new(0, 0, BLUE)], 30, 0, MergeMode::Affix);
    assert_eq!(applied, 0);
    assert_eq!(grid, before);
}

#[test]
fn test_hat_trait_on_base_body() {
    // A 3-pixel hat brim positioned near the right edge loses one pixel
    let hat = [
        PixelRecord::new(0, 0, BLUE),
        PixelRecord::new(1, 0, BLUE),
        PixelRecord::new(2, 0, BLUE),
    ];
    let mut session = Session::new(30).unwrap();
    session.paint(10, 10);

    let hex = hex::encode(encode_records(hat));
    let applied = session.load_trait(&format!("0x{}", hex), 28, 1, MergeMode::Affix).unwrap();

    assert_eq!(applied, 2);
    assert_eq!(session.grid().get(28, 1).unwrap(), Some(BLUE));
    assert_eq!(session.grid().get(29, 1).unwrap(), Some(BLUE));
    assert!(session.grid().get(10, 10).unwrap().is_some());
}

// ============================================================================
// SVG and colormap rows
// ============================================================================

#[test]
fn test_nested_rect_and_missing_fill() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 30">
        <g><g><rect x="4" y="4" width="1" height="1" fill="#123456"/></g></g>
        <rect x="5" y="5" width="1" height="1"/>
    </svg>"##;

    let records = vector::parse(svg).unwrap();
    assert_eq!(records, vec![PixelRecord::new(4, 4, Rgb::new(0x12, 0x34, 0x56))]);
}

#[test]
fn test_svg_export_matches_byte_round_trip() {
    let mut grid = PixelGrid::new();
    grid.set(0, 0, RED).unwrap();
    grid.set(29, 0, GREEN).unwrap();
    grid.set(7, 13, BLUE).unwrap();

    let from_svg = vector::parse(&vector::to_svg(&grid)).unwrap();
    let from_bytes = decode(&encode(&grid)).unwrap();
    assert_eq!(from_svg, from_bytes);
}

#[test]
fn test_rows_then_hex() {
    let mut cells = vec![vec![String::new(); 30]; 30];
    cells[2][1] = "#FF0000".to_string();
    cells[0][29] = "lime".to_string();
    let json = serde_json::to_string(&cells).unwrap();

    let grid = rows::from_json(&json, 30).unwrap();
    assert_eq!(encode_hex(&grid), "1d0000ff000102ff0000");
}
