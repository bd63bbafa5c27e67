//! Number formatting shared by the CSS output and the JSON wire format.
//!
//! Descriptor files are often written by hand or by other tools, where
//! `68` is spelled `68` and not `68.0`. Integral values are therefore
//! written as integers, everything else as the shortest float that reads
//! back to the same value. `-0` is normalized to `0`.

use serde::{Deserialize, Deserializer, Serializer};

use crate::scale::MAX_PRECISION;

/// Largest integer an f64 represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

#[inline]
fn as_integer(value: f64) -> Option<i64> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// Format a number the way it appears in CSS and JSON output.
pub fn display(value: f64) -> String {
    match as_integer(value) {
        Some(int) => int.to_string(),
        None => format!("{}", value),
    }
}

/// Round to `precision` decimal places.
///
/// Goes through the fixed-point formatter (`{:.N}`) and parses the text
/// back, so the result is exactly the number a reader sees printed.
/// Exact ties go to the even digit (`0.25` -> `0.2`). `precision <= 0`
/// rounds to the nearest integer, ties away from zero (`-0.5` -> `-1`).
/// Precision above [`MAX_PRECISION`] is capped.
pub fn round_to(value: f64, precision: i32) -> f64 {
    let rounded = if precision > 0 {
        let places = precision.min(MAX_PRECISION) as usize;
        let text = format!("{:.*}", places, value);
        text.parse::<f64>().unwrap_or(value)
    } else {
        value.round()
    };
    // `-0.04` rounds to `-0.0`; fold it into plain zero.
    rounded + 0.0
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_integer(*value) {
        Some(int) => serializer.serialize_i64(int),
        None => serializer.serialize_f64(*value),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer)
}
