//! Build command - convert every scene in a manifest ahead of time.
//!
//! ```toml
//! out_dir = "public/json"   # default "."
//! precision = 1             # default 1
//!
//! [[scene]]
//! name = "condor"
//! svg = "svg/condor.svg"
//!
//! [[scene]]
//! name = "guanaco"
//! svg = "svg/guanaco.svg"
//! precision = 2             # per-scene override
//! ```
//!
//! Relative paths are resolved against the manifest's directory. A scene
//! that fails to convert is logged and skipped; the others still build.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::Args;
use serde::Deserialize;
use tracing::{debug, error};

use shardbox::{convert_svg, save_scene, ConvertOptions, DirStore, DEFAULT_PRECISION, MAX_PRECISION};

/// Manifest file name looked up when none is given.
pub const DEFAULT_MANIFEST: &str = "shardbox.toml";

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Manifest file.
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Override the manifest's output directory.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_precision")]
    pub precision: i32,
    #[serde(default, rename = "scene")]
    pub scenes: Vec<ManifestScene>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestScene {
    pub name: String,
    pub svg: PathBuf,
    pub precision: Option<i32>,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_precision() -> i32 {
    DEFAULT_PRECISION
}

impl Manifest {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let manifest: Self = toml::from_str(text)?;
        manifest.check_precision()?;
        Ok(manifest)
    }

    fn check_precision(&self) -> anyhow::Result<()> {
        if self.precision > MAX_PRECISION {
            bail!("precision {} exceeds the maximum of {}", self.precision, MAX_PRECISION);
        }
        for scene in &self.scenes {
            match scene.precision {
                Some(p) if p > MAX_PRECISION => bail!(
                    "scene '{}': precision {} exceeds the maximum of {}",
                    scene.name,
                    p,
                    MAX_PRECISION
                ),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid manifest {}", path.display()))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Execute the build command.
pub fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let base = args.manifest.parent().unwrap_or_else(|| Path::new("."));

    let out_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => resolve(base, &manifest.out_dir),
    };
    let mut store = DirStore::open(&out_dir)
        .with_context(|| format!("failed to open output directory {}", out_dir.display()))?;

    if manifest.scenes.is_empty() {
        eprintln!("No scenes listed in {}", args.manifest.display());
        return Ok(());
    }

    let mut failed = Vec::new();

    for entry in &manifest.scenes {
        let svg_path = resolve(base, &entry.svg);
        let options = ConvertOptions {
            name: entry.name.clone(),
            precision: entry.precision.unwrap_or(manifest.precision),
        };
        debug!(scene = %entry.name, svg = %svg_path.display(), "building scene");

        let result = fs::read_to_string(&svg_path)
            .with_context(|| format!("failed to read {}", svg_path.display()))
            .and_then(|svg| Ok(convert_svg(&svg, &options)?))
            .and_then(|scene| {
                save_scene(&mut store, &scene)?;
                Ok(scene)
            });

        match result {
            Ok(scene) => eprintln!("Built '{}' ({} shards)", scene.name, scene.len()),
            Err(e) => {
                error!(scene = %entry.name, "skipping scene: {:#}", e);
                failed.push(entry.name.clone());
            }
        }
    }

    eprintln!(
        "Wrote {} of {} scenes to {}",
        manifest.scenes.len() - failed.len(),
        manifest.scenes.len(),
        store.root().display()
    );

    if !failed.is_empty() {
        bail!("{} scene(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_defaults() {
        let manifest = Manifest::parse(
            r#"
            [[scene]]
            name = "condor"
            svg = "condor.svg"
            "#,
        )
        .unwrap();
        assert_eq!(manifest.out_dir, PathBuf::from("."));
        assert_eq!(manifest.precision, 1);
        assert_eq!(manifest.scenes.len(), 1);
        assert_eq!(manifest.scenes[0].precision, None);
    }

    #[test]
    fn manifest_overrides() {
        let manifest = Manifest::parse(
            r#"
            out_dir = "public/json"
            precision = 2

            [[scene]]
            name = "guanaco"
            svg = "svg/guanaco.svg"
            precision = 0
            "#,
        )
        .unwrap();
        assert_eq!(manifest.out_dir, PathBuf::from("public/json"));
        assert_eq!(manifest.precision, 2);
        assert_eq!(manifest.scenes[0].precision, Some(0));
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        assert!(Manifest::parse("outdir = \"x\"").is_err());
        assert!(Manifest::parse("[[scene]]\nname = \"a\"\nsvg = \"a.svg\"\ncolor = \"red\"").is_err());
    }

    #[test]
    fn manifest_rejects_excessive_precision() {
        assert!(Manifest::parse("precision = 101").is_err());
        assert!(Manifest::parse("[[scene]]\nname = \"a\"\nsvg = \"a.svg\"\nprecision = 2147483647").is_err());
        assert!(Manifest::parse("precision = 100").is_ok());
    }

    #[test]
    fn relative_paths_resolve_against_manifest() {
        assert_eq!(resolve(Path::new("site"), Path::new("a.svg")), PathBuf::from("site/a.svg"));
        let absolute = std::env::temp_dir().join("a.svg");
        assert_eq!(resolve(Path::new("site"), &absolute), absolute);
    }
}
