//! Convert command implementation.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use shardbox::{convert_svg, ConvertOptions, DEFAULT_PRECISION, MAX_PRECISION};

use super::common::{default_scene_name, read_input, write_output};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input SVG file ('-' for stdin).
    pub svg: PathBuf,

    /// Scene name (default: the file stem, or "piece" for stdin).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Decimal places in percentages (0 or less rounds to integers).
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRECISION,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(..=MAX_PRECISION as i64)
    )]
    pub precision: i32,

    /// Output file (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the convert command.
pub fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let svg = read_input(&args.svg)?;

    let options = ConvertOptions {
        name: args.name.unwrap_or_else(|| default_scene_name(&args.svg)),
        precision: args.precision,
    };

    let scene = convert_svg(&svg, &options)
        .with_context(|| format!("failed to convert {}", args.svg.display()))?;
    eprintln!("Converted {} shards for '{}'", scene.len(), scene.name);

    write_output(args.output.as_deref(), &scene.to_json()?)
}
