//! Core geometry types for shardbox.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! In JS you'd write: `const box = { x: 0, y: 0, w: 68, h: 87 }`
//! In Rust, we define a `struct` with explicit types.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` / `Copy` = can duplicate the value implicitly (small stack values)
//! - `PartialEq` = can compare with `==`
//! - `Serialize` / `Deserialize` = serde can write/read it as JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ShardError, ShardResult};
use crate::number;

/// An absolute 2D point in SVG user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a relative delta.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A coordinate expressed as a percentage of the view box.
///
/// Values are plain numbers and are NOT clamped: a path that pokes out
/// of the view box yields values below 0 or above 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent {
    pub x: f64,
    pub y: f64,
}

impl Percent {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The SVG coordinate-space rectangle paths are expressed in.
///
/// Field names match the scene wire format (`{x, y, w, h}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    #[serde(with = "crate::number")]
    pub x: f64,
    #[serde(with = "crate::number")]
    pub y: f64,
    #[serde(with = "crate::number")]
    pub w: f64,
    #[serde(with = "crate::number")]
    pub h: f64,
}

impl ViewBox {
    /// Build a view box, rejecting zero, negative or non-finite extents.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> ShardResult<Self> {
        let view_box = Self { x, y, w, h };
        view_box.validate()?;
        Ok(view_box)
    }

    /// Check the non-degenerate invariant (`w > 0 && h > 0`, all finite).
    pub fn validate(&self) -> ShardResult<()> {
        let finite = [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite());
        if finite && self.w > 0.0 && self.h > 0.0 {
            Ok(())
        } else {
            Err(ShardError::bad_view_box(self.to_string()))
        }
    }

    /// CSS `aspect-ratio` value, e.g. `68 / 87`.
    pub fn aspect_ratio(&self) -> String {
        format!("{} / {}", number::display(self.w), number::display(self.h))
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            number::display(self.x),
            number::display(self.y),
            number::display(self.w),
            number::display(self.h)
        )
    }
}

/// Parse a `viewBox` attribute value: four numbers separated by
/// whitespace and/or commas.
impl FromStr for ViewBox {
    type Err = ShardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .map_err(|_| ShardError::bad_view_box(s))?;

        match parts.as_slice() {
            &[x, y, w, h] => Self::new(x, y, w, h).map_err(|_| ShardError::bad_view_box(s)),
            _ => Err(ShardError::bad_view_box(s)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
