//! # shardbox
//!
//! Turn flat SVG illustrations into CSS clip-path shards, and morph a
//! fixed pool of shard elements between them.
//!
//! ```text
//! SVG text ──► SvgDocument ──► serialize_scene ──► SceneDescriptor (JSON)
//!                                                        │
//!                                     ShardPool::morph_to ◄┘
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod container;
pub mod error;
pub mod geometry;
mod number;
pub mod path;
pub mod pool;
pub mod scale;
pub mod scene;
pub mod store;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use container::{HtmlContainer, MemoryContainer, MemoryHost};
pub use error::{ShardError, ShardResult};
pub use geometry::{Percent, Point, ViewBox};
pub use path::{parse_path, PathCommand};
pub use pool::{
    MorphReport, ShardContainer, ShardHost, ShardPool, ShardSlot, SlotState, DEFAULT_CAPACITY,
    DEFAULT_CONTAINER_ID,
};
pub use scale::{polygon_css, to_percentages, DEFAULT_PRECISION, MAX_PRECISION};
pub use scene::{
    convert_svg, serialize_scene, serialize_scene_with, ConvertOptions, SceneDescriptor,
    ShardDescriptor, DEFAULT_FILL, DEFAULT_SCENE_NAME,
};
pub use store::{load_scene, save_scene, DirStore, MemoryStore, SceneStore};
pub use svg::{Element, SvgDocument, SvgElement};
