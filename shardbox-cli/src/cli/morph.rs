//! Morph command - run scene files through a shard pool.
//!
//! A page creates the pool once and morphs it on a timer. This command
//! does the same steps back to back and reports what each morph did, so
//! a scene set can be checked against a pool size before it ships.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use tracing::warn;

use shardbox::{
    HtmlContainer, MorphReport, SceneDescriptor, ShardPool, DEFAULT_CAPACITY, DEFAULT_CONTAINER_ID,
};

use super::common::{read_input, write_output};

#[derive(Args, Debug)]
pub struct MorphArgs {
    /// Scene JSON files, morphed in the order given.
    #[arg(required = true)]
    pub scenes: Vec<PathBuf>,

    /// Number of shard slots in the pool.
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Container element id used in the HTML output.
    #[arg(long, default_value = DEFAULT_CONTAINER_ID)]
    pub container: String,

    /// Write the final pool state as HTML.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Output reports as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the morph command.
pub fn cmd_morph(args: MorphArgs) -> anyhow::Result<()> {
    // Load everything up front so a bad file fails before any output.
    let mut scenes = Vec::with_capacity(args.scenes.len());
    for path in &args.scenes {
        let json = read_input(path)?;
        let scene = SceneDescriptor::from_json(&json)
            .with_context(|| format!("invalid scene file {}", path.display()))?;
        if let Err(e) = scene.validate() {
            warn!(file = %path.display(), "{}", e);
        }
        scenes.push(scene);
    }

    let mut pool = ShardPool::new(args.capacity, HtmlContainer::new(args.container.as_str()));
    let reports: Vec<MorphReport> = scenes.iter().map(|scene| pool.morph_to(scene)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}: {} shown, {} hidden", report.scene, report.shown, report.hidden);
            if report.is_truncated() {
                print!(", {} dropped (pool capacity {})", report.dropped, args.capacity);
            }
            println!();
        }
    }

    if let Some(path) = &args.html {
        write_output(Some(path), &pool.container().render())?;
    }
    Ok(())
}
