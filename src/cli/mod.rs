//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod compose;
mod convert;
mod palette;
mod render;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::color::{parse_color, Rgb};
use crate::compositor::MergeMode;
use crate::config::{load_config, TpxConfig};
use crate::grid::{PixelGrid, PixelRecord};
use crate::rows;
use crate::studio::StudioError;
use crate::{codec, vector};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "TPX_LOG";

/// traitpx - Encode, compose and preview on-chain pixel-art traits
#[derive(Parser)]
#[command(name = "tpx")]
#[command(about = "traitpx - Encode, compose and preview on-chain pixel-art traits")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of discovering tpx.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode an SVG or colormap JSON file into the trait hex format
    Encode {
        /// Input file (SVG or JSON rows), or - for stdin
        input: PathBuf,

        /// Prefix the output with 0x
        #[arg(long)]
        prefix: bool,
    },
    /// Decode trait hex into colormap JSON rows or SVG
    Decode {
        /// Input file containing hex, or - for stdin
        input: PathBuf,

        /// Emit SVG markup instead of JSON rows
        #[arg(long)]
        svg: bool,
    },
    /// Merge a trait onto a base canvas and print the resulting hex
    Compose {
        /// Base canvas (hex, SVG or JSON rows)
        base: PathBuf,

        /// Trait to merge on top (hex, SVG or JSON rows)
        #[arg(value_name = "TRAIT")]
        layer: PathBuf,

        /// Horizontal offset applied to every trait pixel
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: i32,

        /// Vertical offset applied to every trait pixel
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        y: i32,

        /// Replace clears the base first; affix paints over it
        #[arg(long, value_enum, default_value = "affix")]
        mode: MergeMode,

        /// Prefix the output with 0x
        #[arg(long)]
        prefix: bool,
    },
    /// Render a canvas to PNG
    Render {
        /// Input file (hex, SVG or JSON rows), or - for stdin
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Scale output by integer factor (1-64, default from tpx.toml)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: Option<u32>,

        /// Fill unset pixels with this color (default: transparent)
        #[arg(long)]
        background: Option<String>,
    },
    /// Preview a canvas in the terminal with ANSI colors
    Show {
        /// Input file (hex, SVG or JSON rows), or - for stdin
        input: PathBuf,
    },
    /// List the default swatches, or the shades of a color
    Palette {
        /// Show the five shades of this color
        #[arg(long)]
        color: Option<String>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Encode { input, prefix } => convert::run_encode(&input, prefix, &config),
        Commands::Decode { input, svg } => convert::run_decode(&input, svg, &config),
        Commands::Compose { base, layer, x, y, mode, prefix } => {
            compose::run_compose(&base, &layer, x, y, mode, prefix, &config)
        }
        Commands::Render { input, output, scale, background } => {
            render::run_render(&input, &output, scale, background.as_deref(), &config)
        }
        Commands::Show { input } => render::run_show(&input, &config),
        Commands::Palette { color } => palette::run_palette(color.as_deref()),
    }
}

/// Install the stderr tracing subscriber.
///
/// `--verbose` wins over `TPX_LOG`, which wins over `log_level` in tpx.toml.
fn init_logging(verbose: bool, config: &TpxConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Kind of canvas data in an input file, judged by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Svg,
    Rows,
    Hex,
}

impl InputKind {
    pub fn detect(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('<') => InputKind::Svg,
            Some('[') => InputKind::Rows,
            _ => InputKind::Hex,
        }
    }
}

/// Read an input file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, ExitCode> {
    let result = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|e| {
        eprintln!("Error: Cannot read input file '{}': {}", path.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Decode input text of any supported kind into pixel records.
pub(crate) fn load_records(text: &str, size: u32) -> Result<Vec<PixelRecord>, StudioError> {
    match InputKind::detect(text) {
        InputKind::Svg => Ok(vector::parse(text)?),
        InputKind::Rows => Ok(rows::from_json(text, size)?.iter_set().collect()),
        InputKind::Hex => Ok(codec::decode_hex(text)?),
    }
}

/// Read and decode an input file into a canvas of the configured size.
///
/// Records that fall outside the canvas are clipped with a warning.
pub(crate) fn load_grid(path: &Path, config: &TpxConfig) -> Result<PixelGrid, ExitCode> {
    let text = read_input(path)?;
    let size = config.canvas.size;
    let records = load_records(&text, size).map_err(|e| {
        eprintln!("Error: {}: {}", path.display(), e);
        ExitCode::from(EXIT_ERROR)
    })?;
    let mut grid = PixelGrid::with_size(size).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    let applied = crate::compositor::merge(&mut grid, &records, 0, 0, MergeMode::Replace);
    if applied < records.len() {
        warn!(
            input = %path.display(),
            dropped = records.len() - applied,
            "pixels outside the {}x{} canvas were dropped",
            size,
            size
        );
    }
    Ok(grid)
}

/// Parse a color given on the command line.
pub(crate) fn parse_color_arg(flag: &str, value: &str) -> Result<Rgb, ExitCode> {
    parse_color(value).map_err(|e| {
        eprintln!("Error: Invalid color for {}: {}", flag, e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_input_kind() {
        assert_eq!(InputKind::detect("<svg></svg>"), InputKind::Svg);
        assert_eq!(InputKind::detect("  \n<?xml version=\"1.0\"?>"), InputKind::Svg);
        assert_eq!(InputKind::detect("[[\"#000000\"]]"), InputKind::Rows);
        assert_eq!(InputKind::detect("0x0102ff0000"), InputKind::Hex);
        assert_eq!(InputKind::detect(""), InputKind::Hex);
    }

    #[test]
    fn test_load_records_each_kind() {
        let hex = load_records("0x0102ff0000\n", 30).unwrap();
        assert_eq!(hex, vec![PixelRecord::new(1, 2, Rgb::new(255, 0, 0))]);

        let svg = load_records(r##"<svg><rect x="1" y="2" fill="#FF0000"/></svg>"##, 30).unwrap();
        assert_eq!(svg, hex);

        let json = load_records(r##"[["", "#00FF00"], ["", ""]]"##, 2).unwrap();
        assert_eq!(json, vec![PixelRecord::new(1, 0, Rgb::new(0, 255, 0))]);
    }

    #[test]
    fn test_load_records_malformed_hex() {
        assert!(matches!(load_records("0x0102", 30), Err(StudioError::Codec(_))));
    }

    #[test]
    fn test_cli_parses_compose() {
        let cli = Cli::try_parse_from([
            "tpx", "compose", "base.hex", "hat.svg", "--x", "-3", "--y", "4", "--mode", "replace",
        ])
        .unwrap();
        match cli.command {
            Commands::Compose { x, y, mode, .. } => {
                assert_eq!((x, y), (-3, 4));
                assert_eq!(mode, MergeMode::Replace);
            }
            _ => panic!("expected compose"),
        }
    }

    #[test]
    fn test_cli_rejects_out_of_range_scale() {
        for scale in ["0", "65"] {
            let args = ["tpx", "render", "a.hex", "-o", "a.png", "--scale", scale];
            assert!(Cli::try_parse_from(args).is_err());
        }
    }
}
