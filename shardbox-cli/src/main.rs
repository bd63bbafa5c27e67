//! shardbox - convert SVG illustrations into clip-path shard scenes
//!
//! Usage:
//!   shardbox convert <svg>              Print the scene JSON for one SVG
//!   shardbox build [--manifest FILE]    Convert every scene in a manifest
//!   shardbox path <d>                   Inspect how one path is parsed
//!   shardbox morph <scene.json>...      Run scenes through a shard pool

mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli::{BuildArgs, ConvertArgs, MorphArgs, PathArgs};

#[derive(Parser, Debug)]
#[command(name = "shardbox", version, about = "SVG path to CSS clip-path shard scenes")]
struct Cli {
    /// Show debug logging (or set RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one SVG file into a scene descriptor.
    Convert(ConvertArgs),
    /// Convert every scene listed in a TOML manifest.
    Build(BuildArgs),
    /// Parse a single path `d` string and show the result.
    Path(PathArgs),
    /// Morph a shard pool through scene files in order.
    Morph(MorphArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries JSON; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.cmd {
        Command::Convert(args) => cli::cmd_convert(args),
        Command::Build(args) => cli::cmd_build(args),
        Command::Path(args) => cli::cmd_path(args),
        Command::Morph(args) => cli::cmd_morph(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
