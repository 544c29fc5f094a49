//! Editing session: one canvas, one palette, an undo history.
//!
//! Every user-facing edit goes through the compositor, so painting or
//! loading near an edge clips instead of failing. Operations that change the
//! canvas push a snapshot first; [`Session::undo`] pops it back.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, info};

use crate::codec::{self, CodecError};
use crate::color::{ColorError, Rgb};
use crate::compositor::{self, MergeMode};
use crate::config::TpxConfig;
use crate::grid::{GridError, PixelGrid, PixelRecord};
use crate::palette::PaletteStore;
use crate::rows::{self, RowsError};
use crate::vector::{self, VectorError};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("could not load trait data: {0}")]
    Codec(#[from] CodecError),
    #[error("could not read SVG: {0}")]
    Vector(#[from] VectorError),
    #[error("could not read colormap: {0}")]
    Rows(#[from] RowsError),
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// An editing session.
#[derive(Debug, Clone)]
pub struct Session {
    grid: PixelGrid,
    palette: PaletteStore,
    selected: Rgb,
    history: VecDeque<PixelGrid>,
    undo_depth: usize,
}

impl Session {
    /// Start a session on an empty `size × size` canvas.
    pub fn new(size: u32) -> Result<Self, StudioError> {
        let defaults = TpxConfig::default();
        Ok(Self {
            grid: PixelGrid::with_size(size)?,
            palette: PaletteStore::new(),
            selected: defaults.studio.selected,
            history: VecDeque::new(),
            undo_depth: defaults.studio.undo_depth,
        })
    }

    /// Start a session using canvas and studio settings from `config`.
    pub fn from_config(config: &TpxConfig) -> Result<Self, StudioError> {
        let mut session = Self::new(config.canvas.size)?;
        session.selected = config.studio.selected;
        session.undo_depth = config.studio.undo_depth.max(1);
        Ok(session)
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn palette(&self) -> &PaletteStore {
        &self.palette
    }

    pub fn selected(&self) -> Rgb {
        self.selected
    }

    /// Number of snapshots available to [`Session::undo`].
    pub fn undo_len(&self) -> usize {
        self.history.len()
    }

    fn snapshot(&mut self) {
        if self.history.len() == self.undo_depth {
            self.history.pop_front();
        }
        self.history.push_back(self.grid.clone());
    }

    pub fn select_color(&mut self, color: Rgb) {
        self.selected = color;
    }

    /// Paint the selected color at `(x, y)`.
    ///
    /// Returns `false` (and records nothing) if the point is off the canvas.
    pub fn paint(&mut self, x: i64, y: i64) -> bool {
        let on_canvas = match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.grid.contains(x, y),
            _ => false,
        };
        if !on_canvas {
            return false;
        }
        self.snapshot();
        compositor::place(&mut self.grid, x, y, self.selected)
    }

    /// Erase the pixel at `(x, y)`.
    ///
    /// Returns `false` (and records nothing) if there was nothing to erase,
    /// including points off the canvas.
    pub fn erase(&mut self, x: i64, y: i64) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return false;
        };
        if !matches!(self.grid.get(x, y), Ok(Some(_))) {
            return false;
        }
        self.snapshot();
        self.grid.clear(x, y);
        true
    }

    /// Merge already-decoded records onto the canvas, returning how many
    /// landed.
    pub fn merge_records(
        &mut self,
        records: &[PixelRecord],
        x_offset: i32,
        y_offset: i32,
        mode: MergeMode,
    ) -> usize {
        self.snapshot();
        let applied = compositor::merge(&mut self.grid, records, x_offset, y_offset, mode);
        info!(applied, total = records.len(), ?mode, "merged trait into canvas");
        applied
    }

    /// Decode a boundary hex color map and merge it onto the canvas.
    ///
    /// A malformed encoding leaves the canvas and history untouched.
    pub fn load_trait(
        &mut self,
        hex: &str,
        x_offset: i32,
        y_offset: i32,
        mode: MergeMode,
    ) -> Result<usize, StudioError> {
        let records = codec::decode_hex(hex)?;
        Ok(self.merge_records(&records, x_offset, y_offset, mode))
    }

    /// Parse SVG markup and merge its rectangles onto the canvas.
    pub fn paste_svg(
        &mut self,
        svg: &str,
        x_offset: i32,
        y_offset: i32,
        mode: MergeMode,
    ) -> Result<usize, StudioError> {
        let records = vector::parse(svg)?;
        Ok(self.merge_records(&records, x_offset, y_offset, mode))
    }

    /// Replace the canvas with colormap JSON rows.
    pub fn load_rows(&mut self, json: &str) -> Result<(), StudioError> {
        let grid = rows::from_json(json, self.grid.size())?;
        self.snapshot();
        self.grid.restore_from(grid);
        Ok(())
    }

    pub fn reset_canvas(&mut self) {
        if !self.grid.is_empty() {
            self.snapshot();
            self.grid.reset_all();
        }
    }

    /// Restore the canvas to the state before the last edit.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.grid.restore_from(previous);
                debug!(remaining = self.history.len(), "undo");
                true
            }
            None => false,
        }
    }

    pub fn save_selected_color(&mut self) {
        self.palette.append(self.selected);
    }

    pub fn reset_saved_colors(&mut self) {
        self.palette.reset_all();
    }

    /// The canvas as a boundary hex string, ready for the mint call.
    pub fn export_hex(&self) -> String {
        codec::encode_hex(&self.grid)
    }

    pub fn export_svg(&self) -> String {
        vector::to_svg(&self.grid)
    }

    pub fn export_rows(&self) -> Result<String, StudioError> {
        Ok(rows::to_json(&self.grid)?)
    }
}
