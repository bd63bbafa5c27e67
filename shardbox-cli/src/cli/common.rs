//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context as _;

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        eprintln!("Reading from stdin...");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else {
        eprintln!("Loading: {}", path.display());
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Write to a file, or stdout when no path (or `-`) is given.
pub fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote: {}", path.display());
        }
        _ => println!("{}", output),
    }
    Ok(())
}

/// Scene name for an input file: its stem, or the library default for stdin.
pub fn default_scene_name(path: &Path) -> String {
    if path == Path::new("-") {
        return shardbox::DEFAULT_SCENE_NAME.to_string();
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(shardbox::DEFAULT_SCENE_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_name_from_file_stem() {
        assert_eq!(default_scene_name(Path::new("svg/condor.svg")), "condor");
        assert_eq!(default_scene_name(Path::new("-")), "piece");
    }
}
