//! Path inspection command - show how one `d` string is parsed.

use clap::Args;
use serde::Serialize;

use shardbox::{parse_path, polygon_css, to_percentages, ViewBox, DEFAULT_PRECISION, MAX_PRECISION};

#[derive(Args, Debug)]
pub struct PathArgs {
    /// SVG path data, e.g. "M0 76L24 0L51 76H0Z".
    #[arg(allow_hyphen_values = true)]
    pub d: String,

    /// View box "x y w h"; when given, percentages and the polygon are shown too.
    #[arg(long)]
    pub view_box: Option<ViewBox>,

    /// Decimal places in percentages.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRECISION,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(..=MAX_PRECISION as i64)
    )]
    pub precision: i32,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Path inspection in JSON output format.
#[derive(Serialize)]
struct JsonPath {
    points: Vec<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentages: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    polygon: Option<String>,
}

/// Execute the path command.
pub fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let points = parse_path(&args.d)?;

    let scaled = match &args.view_box {
        Some(view_box) => {
            let percentages = to_percentages(&points, view_box, args.precision)?;
            let polygon = polygon_css(&percentages);
            Some((percentages, polygon))
        }
        None => None,
    };

    if args.json {
        let output = JsonPath {
            points: points.iter().map(|p| [p.x, p.y]).collect(),
            percentages: scaled.as_ref().map(|(pct, _)| pct.iter().map(|p| [p.x, p.y]).collect()),
            polygon: scaled.map(|(_, polygon)| polygon),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Points ({}):", points.len());
    for p in &points {
        println!("  {} {}", p.x, p.y);
    }
    if let Some((percentages, polygon)) = scaled {
        println!("Percentages:");
        for p in &percentages {
            println!("  {}% {}%", p.x, p.y);
        }
        println!("{}", polygon);
    }
    Ok(())
}
