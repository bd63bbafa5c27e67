//! CLI command implementations.
//!
//! - `convert` - Convert one SVG into a scene descriptor
//! - `build` - Convert all scenes listed in a manifest
//! - `path` - Inspect how a single path string is parsed
//! - `morph` - Run scenes through a shard pool

pub mod build;
pub mod common;
pub mod convert;
pub mod morph;
pub mod path;

pub use build::{cmd_build, BuildArgs};
pub use convert::{cmd_convert, ConvertArgs};
pub use morph::{cmd_morph, MorphArgs};
pub use path::{cmd_path, PathArgs};
