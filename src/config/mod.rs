//! Configuration module for traitpx
//!
//! Provides types and parsing for `tpx.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
