//! SVG rectangle ingestion and export.
//!
//! Pixel art exported from drawing tools arrives as an `<svg>` document
//! whose pixels are `<rect>` elements, possibly nested in `<g>` groups.
//! The document is first lifted into a small typed tree ([`VectorNode`]) and
//! then flattened into the same [`PixelRecord`] stream the byte codec
//! produces.

use std::fmt::Write;

use thiserror::Error;
use tracing::debug;

use crate::color::Rgb;
use crate::grid::{PixelGrid, PixelRecord};

/// Error type for SVG ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Document is not well-formed XML or its root is not `<svg>`.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// A rectangle as found in the document.
///
/// Attributes are kept as parsed; a rectangle missing any of them is
/// skipped when the tree is flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectNode {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub fill: Option<Rgb>,
}

/// The closed set of node kinds the reader distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorNode {
    /// The `<svg>` document element.
    Root(Vec<VectorNode>),
    /// Any other container element (`<g>`, `<a>`, `<defs>`, ...).
    Group(Vec<VectorNode>),
    Rect(RectNode),
}

impl VectorNode {
    /// Depth-first, document-order walk collecting every rectangle that
    /// carries usable coordinates and a fill.
    pub fn records(&self) -> Vec<PixelRecord> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<PixelRecord>) {
        match self {
            VectorNode::Root(children) | VectorNode::Group(children) => {
                for child in children {
                    child.collect(out);
                }
            }
            VectorNode::Rect(rect) => match rect_record(rect) {
                Some(record) => out.push(record),
                None => debug!(?rect, "skipping rect without usable position or fill"),
            },
        }
    }
}

fn rect_record(rect: &RectNode) -> Option<PixelRecord> {
    let x = u8::try_from(rect.x?).ok()?;
    let y = u8::try_from(rect.y?).ok()?;
    Some(PixelRecord::new(x, y, rect.fill?))
}

/// Parse an SVG document into a typed node tree.
///
/// # Errors
///
/// Returns [`VectorError::InvalidDocument`] if the text is not well-formed
/// XML or the document element is not `<svg>`.
pub fn parse_document(text: &str) -> Result<VectorNode, VectorError> {
    // Editors commonly emit the SVG 1.1 DOCTYPE
    let options = roxmltree::ParsingOptions { allow_dtd: true, ..Default::default() };
    let doc = roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| VectorError::InvalidDocument(e.to_string()))?;

    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(VectorError::InvalidDocument(format!(
            "expected <svg> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    Ok(VectorNode::Root(children_of(root)))
}

fn children_of(node: roxmltree::Node<'_, '_>) -> Vec<VectorNode> {
    node.children().filter(|n| n.is_element()).map(lift).collect()
}

fn lift(node: roxmltree::Node<'_, '_>) -> VectorNode {
    if node.tag_name().name() == "rect" {
        VectorNode::Rect(RectNode {
            x: node.attribute("x").and_then(parse_leading_int),
            y: node.attribute("y").and_then(parse_leading_int),
            fill: node.attribute("fill").and_then(|f| Rgb::from_hex_digits(f.trim()).ok()),
        })
    } else {
        VectorNode::Group(children_of(node))
    }
}

/// Parse the leading integer of an attribute value: `"4"`, `"4.0"` and
/// `"4px"` all read as 4. Returns `None` when no digits lead the value.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<i64>().ok().map(|v| sign * v)
}

/// Parse an SVG document straight into pixel records.
///
/// Rectangles without a fill (or with a fill that is not six hex digits),
/// or whose `x`/`y` are missing or outside a byte, are skipped. Width and
/// height are not consulted: every rectangle is one pixel at its `x, y`.
///
/// # Examples
///
/// ```
/// use traitpx::color::Rgb;
/// use traitpx::grid::PixelRecord;
/// use traitpx::vector::parse;
///
/// let svg = r##"<svg xmlns="http://www.w3.org/2000/svg">
///   <g><g><rect x="4" y="4" width="1" height="1" fill="#123456"/></g></g>
///   <rect x="5" y="5" width="1" height="1"/>
/// </svg>"##;
///
/// let records = parse(svg).unwrap();
/// assert_eq!(records, vec![PixelRecord::new(4, 4, Rgb::new(0x12, 0x34, 0x56))]);
/// ```
pub fn parse(text: &str) -> Result<Vec<PixelRecord>, VectorError> {
    Ok(parse_document(text)?.records())
}

/// Render the grid as an SVG document with one unit `<rect>` per set pixel.
///
/// The output reads back through [`parse`] to the same records, in the
/// same order, as the byte codec produces.
pub fn to_svg(grid: &PixelGrid) -> String {
    let size = grid.size();
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}" shape-rendering="crispEdges">"#
    );
    for record in grid.iter_set() {
        let _ = writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="1" height="1" fill="{}"/>"#,
            record.x, record.y, record.color
        );
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn test_nested_rect_found() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 30">
            <g id="outer">
                <g id="inner">
                    <rect x="4" y="4" width="1" height="1" fill="#123456"/>
                </g>
            </g>
        </svg>"##;
        let records = parse(svg).unwrap();
        assert_eq!(records, vec![PixelRecord::new(4, 4, Rgb::new(0x12, 0x34, 0x56))]);
    }

    #[test]
    fn test_doctype_prefixed_document() {
        let svg = r##"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 30">
    <g><g><rect x="4" y="4" width="1" height="1" fill="#123456"/></g></g>
</svg>"##;
        let records = parse(svg).unwrap();
        assert_eq!(records, vec![PixelRecord::new(4, 4, Rgb::new(0x12, 0x34, 0x56))]);
    }

    #[test]
    fn test_rect_without_fill_skipped() {
        let svg = r##"<svg>
            <rect x="1" y="1" width="1" height="1"/>
            <rect x="2" y="2" width="1" height="1" fill="#00FF00"/>
        </svg>"##;
        let records = parse(svg).unwrap();
        assert_eq!(records, vec![PixelRecord::new(2, 2, Rgb::new(0, 255, 0))]);
    }

    #[test]
    fn test_unrecognized_fills_skipped() {
        let svg = r##"<svg>
            <rect x="1" y="1" fill="none"/>
            <rect x="1" y="2" fill="url(#g)"/>
            <rect x="1" y="3" fill="#FFF"/>
            <rect x="1" y="4" fill="ABCDEF"/>
        </svg>"##;
        let records = parse(svg).unwrap();
        assert_eq!(records, vec![PixelRecord::new(1, 4, Rgb::new(0xAB, 0xCD, 0xEF))]);
    }

    #[test]
    fn test_bad_coordinates_skipped() {
        let svg = r##"<svg>
            <rect y="1" fill="#000000"/>
            <rect x="abc" y="1" fill="#000000"/>
            <rect x="-1" y="1" fill="#000000"/>
            <rect x="256" y="1" fill="#000000"/>
            <rect x="255" y="0" fill="#000000"/>
        </svg>"##;
        let records = parse(svg).unwrap();
        assert_eq!(records, vec![PixelRecord::new(255, 0, Rgb::BLACK)]);
    }

    #[test]
    fn test_leading_integer_coordinates() {
        let svg = r##"<svg>
            <rect x="3.7" y="2px" fill="#010203"/>
            <rect x=" 7" y="+8" fill="#010203"/>
        </svg>"##;
        let records = parse(svg).unwrap();
        assert_eq!(
            records,
            vec![
                PixelRecord::new(3, 2, Rgb::new(1, 2, 3)),
                PixelRecord::new(7, 8, Rgb::new(1, 2, 3)),
            ]
        );
    }

    #[test]
    fn test_non_unit_rects_taken_literally() {
        let svg = r##"<svg><rect x="10" y="11" width="5" height="3" fill="#FF0000"/></svg>"##;
        assert_eq!(parse(svg).unwrap(), vec![PixelRecord::new(10, 11, Rgb::new(255, 0, 0))]);
    }

    #[test]
    fn test_document_order_depth_first() {
        let svg = r##"<svg>
            <rect x="0" y="0" fill="#000001"/>
            <g>
                <rect x="1" y="0" fill="#000002"/>
                <g><rect x="2" y="0" fill="#000003"/></g>
            </g>
            <rect x="3" y="0" fill="#000004"/>
        </svg>"##;
        let xs: Vec<u8> = parse(svg).unwrap().iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_typed_tree_shape() {
        let svg = r##"<svg><g><rect x="1" y="2" fill="#000000"/></g><!-- c --></svg>"##;
        let tree = parse_document(svg).unwrap();
        assert_eq!(
            tree,
            VectorNode::Root(vec![VectorNode::Group(vec![VectorNode::Rect(RectNode {
                x: Some(1),
                y: Some(2),
                fill: Some(Rgb::BLACK),
            })])])
        );
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(parse(""), Err(VectorError::InvalidDocument(_))));
        assert!(matches!(parse("not xml at all"), Err(VectorError::InvalidDocument(_))));
        assert!(matches!(parse("<svg><rect></svg>"), Err(VectorError::InvalidDocument(_))));
        assert!(matches!(
            parse(r##"<html><rect x="1" y="1" fill="#000000"/></html>"##),
            Err(VectorError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_empty_svg_yields_no_records() {
        assert!(parse("<svg/>").unwrap().is_empty());
    }

    #[test]
    fn test_to_svg_reads_back_like_codec() {
        let mut grid = PixelGrid::new();
        grid.set(0, 0, Rgb::new(0xEF, 0xB1, 0x5E)).unwrap();
        grid.set(29, 3, Rgb::new(0x0F, 0x6E, 0x9D)).unwrap();
        grid.set(12, 29, Rgb::WHITE).unwrap();

        let svg = to_svg(&grid);
        assert!(svg.contains(r#"viewBox="0 0 30 30""#));
        assert!(svg.contains(r##"<rect x="29" y="3" width="1" height="1" fill="#0F6E9D"/>"##));

        let from_svg = parse(&svg).unwrap();
        let from_bytes = codec::decode(&codec::encode(&grid)).unwrap();
        assert_eq!(from_svg, from_bytes);
    }

    #[test]
    fn test_to_svg_empty_grid() {
        let svg = to_svg(&PixelGrid::new());
        assert!(parse(&svg).unwrap().is_empty());
    }
}
