//! traitpx - Library for on-chain pixel-art trait data
//!
//! This library provides functionality to:
//! - Encode a square canvas into the compact 5-byte-per-pixel trait format
//!   and decode it back, with a hex boundary for contract calls
//! - Ingest traits drawn as SVG unit rectangles
//! - Composite a trait onto a canvas at an offset, clipping at the edges
//! - Keep a palette of saved colors and an undoable editing session
//! - Preview a canvas as PNG or in the terminal

pub mod cli;
pub mod codec;
pub mod color;
pub mod compositor;
pub mod config;
pub mod grid;
pub mod palette;
pub mod render;
pub mod rows;
pub mod studio;
pub mod terminal;
pub mod vector;
