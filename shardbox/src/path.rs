//! SVG path parsing - turn a `d` attribute into absolute polygon points.
//!
//! Only straight-edged paths are supported: `M/m`, `L/l`, `H/h`, `V/v`
//! and `Z/z`. Shards are triangles in practice, so any curve or arc
//! command means the input is not what we expect and the whole path is
//! rejected instead of silently dropping a segment.
//!
//! ## Command Chaining
//!
//! Path data is usually written without separators between commands
//! (`M0 76L24 0L51 76H0Z`). Tokenizing is greedy: each command letter
//! owns every numeric token up to the next command letter.

use tracing::debug;

use crate::error::{ShardError, ShardResult};
use crate::geometry::Point;

/// Letters that start a curve or arc segment.
const UNSUPPORTED_COMMANDS: &[char] = &['C', 'S', 'Q', 'T', 'A'];

/// A single path command.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// In JS you'd `switch` over the command letter and check
/// `type === type.toLowerCase()` for relative commands. Here each
/// absolute/relative variant is its own enum case, and `match` forces us
/// to handle every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    MoveAbs,
    MoveRel,
    LineAbs,
    LineRel,
    HorizAbs,
    HorizRel,
    VertAbs,
    VertRel,
    Close,
}

impl PathCommand {
    /// Map a command letter to its command, if it is one we support.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(Self::MoveAbs),
            'm' => Some(Self::MoveRel),
            'L' => Some(Self::LineAbs),
            'l' => Some(Self::LineRel),
            'H' => Some(Self::HorizAbs),
            'h' => Some(Self::HorizRel),
            'V' => Some(Self::VertAbs),
            'v' => Some(Self::VertRel),
            'Z' | 'z' => Some(Self::Close),
            _ => None,
        }
    }

    /// Number of arguments the command consumes.
    pub fn arity(self) -> usize {
        match self {
            Self::MoveAbs | Self::MoveRel | Self::LineAbs | Self::LineRel => 2,
            Self::HorizAbs | Self::HorizRel | Self::VertAbs | Self::VertRel => 1,
            Self::Close => 0,
        }
    }

    /// Apply the command to the current point.
    ///
    /// Returns `None` for `Close` (which contributes no coordinate) and
    /// when too few arguments were supplied.
    pub fn apply(self, current: Point, args: &[f64]) -> Option<Point> {
        if self == Self::Close || args.len() < self.arity() {
            return None;
        }

        let next = match self {
            Self::MoveAbs | Self::LineAbs => Point::new(args[0], args[1]),
            Self::MoveRel | Self::LineRel => current.offset(args[0], args[1]),
            Self::HorizAbs => Point::new(args[0], current.y),
            Self::HorizRel => current.offset(args[0], 0.0),
            Self::VertAbs => Point::new(current.x, args[0]),
            Self::VertRel => current.offset(0.0, args[0]),
            Self::Close => unreachable!("close handled above"),
        };
        Some(next)
    }
}

/// Find the first curve/arc letter anywhere in the path, either case.
fn find_unsupported(path: &str) -> Option<char> {
    path.chars()
        .find(|c| UNSUPPORTED_COMMANDS.contains(&c.to_ascii_uppercase()))
}

/// Split path data into `(command, args)` pairs.
///
/// Anything before the first command letter is ignored, and tokens that
/// don't parse as finite numbers are dropped. `f64::from_str` accepts
/// `inf`, which must never reach a coordinate.
fn tokenize(path: &str) -> Vec<(PathCommand, Vec<f64>)> {
    let mut commands: Vec<(PathCommand, String)> = Vec::new();

    for c in path.chars() {
        match PathCommand::from_letter(c) {
            Some(command) => commands.push((command, String::new())),
            None => {
                if let Some((_, args)) = commands.last_mut() {
                    args.push(c);
                }
            }
        }
    }

    commands
        .into_iter()
        .map(|(command, args)| {
            let values = args
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .filter_map(|token| token.parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .collect();
            (command, values)
        })
        .collect()
}

/// Parse an SVG path string into absolute coordinates.
///
/// Relative commands are resolved against a running current point that
/// starts at `(0, 0)`. The result keeps traversal order and contains each
/// point once (exact match, first occurrence wins), which removes the
/// redundant closing point a trailing `H`/`L` back to the start produces.
///
/// ```
/// use shardbox::{parse_path, Point};
///
/// let points = parse_path("M0 76L24 0L51 76H0Z").unwrap();
/// assert_eq!(points, vec![
///     Point::new(0.0, 76.0),
///     Point::new(24.0, 0.0),
///     Point::new(51.0, 76.0),
/// ]);
/// ```
pub fn parse_path(path: &str) -> ShardResult<Vec<Point>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(letter) = find_unsupported(path) {
        return Err(ShardError::UnsupportedCommand(letter));
    }

    // Close contributes nothing; strip it before splitting commands.
    let path: String = path.chars().filter(|c| !matches!(c, 'Z' | 'z')).collect();

    let mut points = Vec::new();
    let mut current = Point::new(0.0, 0.0);

    for (command, args) in tokenize(path.trim()) {
        match command.apply(current, &args) {
            Some(next) => {
                current = next;
                points.push(current);
            }
            None => {
                debug!(?command, args = args.len(), "skipping path command with too few arguments");
            }
        }
    }

    Ok(dedup_points(points))
}

/// Remove repeated points, keeping the first occurrence of each.
///
/// ## Rust Lesson #23: Iterator Adapters
///
/// `Vec::dedup` only removes *consecutive* duplicates. A closing point
/// equal to the very first one is not adjacent to it, so we filter
/// against everything kept so far instead. Shards have a handful of
/// points; the O(n²) scan is fine.
fn dedup_points(points: Vec<Point>) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        if !unique.contains(&point) {
            unique.push(point);
        }
    }
    unique
}

// ============================================================================
// TESTS
// ============================================================================
