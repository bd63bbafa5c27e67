//! Scene descriptors - the JSON data object between parser and animator.
//!
//! A scene is what a browser page (or the [`crate::pool`] module) needs to
//! draw one illustration: the view box for the aspect ratio, and for
//! every shard a CSS `polygon()` clip path plus a fill color.
//!
//! ```json
//! {
//!   "name": "condor",
//!   "box": { "x": 0, "y": 0, "w": 68, "h": 87 },
//!   "shards": {
//!     "1": { "path": "polygon(0% 100%, 47.1% 0%, 100% 100%)", "fill": "#2B2B2B" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ShardError, ShardResult};
use crate::geometry::ViewBox;
use crate::path::parse_path;
use crate::scale::{polygon_css, to_percentages, DEFAULT_PRECISION};
use crate::svg::{SvgDocument, SvgElement};

/// Name used when the caller doesn't give one.
pub const DEFAULT_SCENE_NAME: &str = "piece";

/// Fill used for paths without a `fill` attribute.
pub const DEFAULT_FILL: &str = "#000000";

/// One shard: a clip-path polygon and its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardDescriptor {
    pub path: String,
    pub fill: String,
}

/// A complete named illustration.
///
/// ## Rust Lesson #12: BTreeMap
///
/// Shard keys are 1-based integers. A `BTreeMap<u32, _>` iterates in
/// numeric order (`1, 2, ..., 10`, never `1, 10, 2`), and serde_json
/// writes integer map keys as strings, which is exactly the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub name: String,
    #[serde(rename = "box")]
    pub view_box: ViewBox,
    pub shards: BTreeMap<u32, ShardDescriptor>,
}

impl SceneDescriptor {
    /// Pretty-printed JSON with 2-space indentation.
    ///
    /// Stable: serializing, parsing and serializing again gives the same
    /// bytes.
    pub fn to_json(&self) -> ShardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ShardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Check the descriptor invariants: a non-degenerate box and shard
    /// keys running `1..=n` without gaps.
    ///
    /// Descriptors produced by [`serialize_scene`] always pass. Files
    /// written by hand may not; the pool tolerates them either way.
    pub fn validate(&self) -> ShardResult<()> {
        self.view_box.validate()?;
        for (expected, key) in (1u32..).zip(self.shards.keys()) {
            if *key != expected {
                return Err(ShardError::invalid_input(format!(
                    "scene '{}': shard keys must run 1..={} without gaps, found {} where {} was expected",
                    self.name,
                    self.shards.len(),
                    key,
                    expected
                )));
            }
        }
        Ok(())
    }
}

/// How an SVG document is turned into a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub name: String,
    /// Decimal places in the percentages (`<= 0` rounds to integers).
    pub precision: i32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCENE_NAME.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ConvertOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

/// Read and validate the root's `viewBox`.
fn read_view_box(root: &impl SvgElement) -> ShardResult<ViewBox> {
    match root.attribute("viewBox") {
        None => Err(ShardError::MissingViewBox { found: None }),
        Some(value) if value.trim().is_empty() => Err(ShardError::MissingViewBox { found: None }),
        Some(value) => value.parse(),
    }
}

/// Build a scene from an SVG root element with the default precision.
pub fn serialize_scene(root: &impl SvgElement, name: &str) -> ShardResult<SceneDescriptor> {
    serialize_scene_with(root, &ConvertOptions::named(name))
}

/// Build a scene from an SVG root element.
///
/// Every `<path>` becomes one shard, keyed `1, 2, ...` in document order.
/// The whole call fails if any path uses a curve or arc command.
pub fn serialize_scene_with(root: &impl SvgElement, options: &ConvertOptions) -> ShardResult<SceneDescriptor> {
    if root.tag() != "svg" {
        return Err(ShardError::invalid_input(format!(
            "expected an <svg> element, got <{}>",
            root.tag()
        )));
    }

    let view_box = read_view_box(root)?;
    let mut shards = BTreeMap::new();

    for (key, path) in (1u32..).zip(root.query_all("path")) {
        let d = path.attribute("d").unwrap_or("");
        let points = parse_path(d)?;
        let percentages = to_percentages(&points, &view_box, options.precision)?;

        let fill = match path.attribute("fill") {
            Some(fill) if !fill.is_empty() => fill.to_string(),
            _ => DEFAULT_FILL.to_string(),
        };

        debug!(key, points = points.len(), %fill, "serialized shard");
        shards.insert(key, ShardDescriptor { path: polygon_css(&percentages), fill });
    }

    debug!(name = %options.name, shards = shards.len(), "serialized scene");

    Ok(SceneDescriptor {
        name: options.name.clone(),
        view_box,
        shards,
    })
}

/// Parse SVG text and serialize it in one go.
pub fn convert_svg(svg: &str, options: &ConvertOptions) -> ShardResult<SceneDescriptor> {
    let document = SvgDocument::parse(svg)?;
    serialize_scene_with(document.root(), options)
}

// ============================================================================
// TESTS
// ============================================================================
