//! Configuration schema types for `tpx.toml`
//!
//! Defines the structure and validation rules for studio configuration.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::grid::{DEFAULT_SIZE, MAX_SIZE};

/// Largest preview scale factor accepted.
pub const MAX_SCALE: u32 = 64;

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Edge length of the square canvas
    #[serde(default = "default_size")]
    pub size: u32,
    /// Background color used behind transparent pixels in previews
    #[serde(default)]
    pub background: Option<Rgb>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { size: default_size(), background: None }
    }
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

/// Editing session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Number of undo snapshots kept
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
    /// Initially selected paint color
    #[serde(default = "default_selected")]
    pub selected: Rgb,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self { undo_depth: default_undo_depth(), selected: default_selected() }
    }
}

fn default_undo_depth() -> usize {
    100
}

fn default_selected() -> Rgb {
    Rgb::new(0xEF, 0xB1, 0x5E)
}

/// PNG preview settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Integer upscale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: default_scale() }
    }
}

fn default_scale() -> u32 {
    10
}

/// Root configuration (`tpx.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TpxConfig {
    /// Default tracing filter when neither `--verbose` nor `TPX_LOG` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub studio: StudioConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for TpxConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            canvas: CanvasConfig::default(),
            studio: StudioConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "canvas.size")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tpx.toml: '{}' {}", self.field, self.message)
    }
}

impl TpxConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.canvas.size == 0 || self.canvas.size > MAX_SIZE {
            errors.push(ConfigValidationError {
                field: "canvas.size".to_string(),
                message: format!("must be between 1 and {}", MAX_SIZE),
            });
        }

        if self.studio.undo_depth == 0 {
            errors.push(ConfigValidationError {
                field: "studio.undo_depth".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.render.scale == 0 || self.render.scale > MAX_SCALE {
            errors.push(ConfigValidationError {
                field: "render.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        if self.log_level.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "log_level".to_string(),
                message: "must be a non-empty filter directive".to_string(),
            });
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
