//! Rescale absolute coordinates into view-box percentages.
//!
//! CSS `clip-path: polygon(...)` percentages are relative to the element
//! box, so once the container has the view box's aspect ratio the shard
//! lines up with the original drawing at any size.

use crate::error::ShardResult;
use crate::geometry::{Percent, Point, ViewBox};
use crate::number;

/// Decimal places kept in percentage output unless asked otherwise.
pub const DEFAULT_PRECISION: i32 = 1;

/// Most decimal places honoured; larger requests are capped here.
pub const MAX_PRECISION: i32 = 100;

/// Convert absolute coordinates to percentages of the view box.
///
/// `precision > 0` keeps that many decimal places (at most
/// [`MAX_PRECISION`]); anything else rounds to whole percent. Values
/// outside `0..=100` are kept as-is.
pub fn to_percentages(points: &[Point], view_box: &ViewBox, precision: i32) -> ShardResult<Vec<Percent>> {
    // A hand-built box can still be degenerate; never divide by zero.
    view_box.validate()?;

    let percentages = points
        .iter()
        .map(|p| {
            let x = (p.x - view_box.x) / view_box.w * 100.0;
            let y = (p.y - view_box.y) / view_box.h * 100.0;
            Percent::new(number::round_to(x, precision), number::round_to(y, precision))
        })
        .collect();

    Ok(percentages)
}

/// Format percentage pairs as a CSS `polygon()` function.
///
/// `polygon(0% 100%, 47.1% 0%, 100% 100%)`
pub fn polygon_css(percentages: &[Percent]) -> String {
    let pairs: Vec<String> = percentages
        .iter()
        .map(|p| format!("{}% {}%", number::display(p.x), number::display(p.y)))
        .collect();
    format!("polygon({})", pairs.join(", "))
}
