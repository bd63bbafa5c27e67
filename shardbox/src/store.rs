//! Scene stores - cache serialized scenes by name.
//!
//! A store is an opaque string key/value interface (think
//! `localStorage`). Scenes go in as their JSON wire format, so anything
//! stored can also be served as a static file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ShardError, ShardResult};
use crate::scene::SceneDescriptor;

/// String key/value storage.
pub trait SceneStore {
    fn get(&self, key: &str) -> ShardResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ShardResult<()>;
}

/// Store a scene under its own name.
pub fn save_scene(store: &mut impl SceneStore, scene: &SceneDescriptor) -> ShardResult<()> {
    let json = scene.to_json()?;
    store.set(&scene.name, &json)
}

/// Load a scene by name. `Ok(None)` when nothing is stored under it.
pub fn load_scene(store: &impl SceneStore, name: &str) -> ShardResult<Option<SceneDescriptor>> {
    match store.get(name)? {
        Some(json) => Ok(Some(SceneDescriptor::from_json(&json)?)),
        None => Ok(None),
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SceneStore for MemoryStore {
    fn get(&self, key: &str) -> ShardResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ShardResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Use `root` as the store, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> ShardResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a key maps to.
    ///
    /// Keys become file names, so anything that could escape the
    /// directory is refused.
    pub fn path_for(&self, key: &str) -> ShardResult<PathBuf> {
        let bad = key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
            || key.chars().any(char::is_control);
        if bad {
            return Err(ShardError::invalid_input(format!("'{}' is not a usable scene name", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl SceneStore for DirStore {
    fn get(&self, key: &str) -> ShardResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> ShardResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "stored scene");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{convert_svg, ConvertOptions};

    fn condor() -> SceneDescriptor {
        let svg = r##"<svg viewBox="0 0 68 87"><path d="M0 87L34 0L68 87Z" fill="#111"/></svg>"##;
        convert_svg(svg, &ConvertOptions::named("condor")).unwrap()
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::default();
        save_scene(&mut store, &condor()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(load_scene(&store, "condor").unwrap(), Some(condor()));
        assert_eq!(load_scene(&store, "guanaco").unwrap(), None);
    }

    #[test]
    fn dir_store_writes_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path().join("json")).unwrap();
        save_scene(&mut store, &condor()).unwrap();

        let written = fs::read_to_string(dir.path().join("json/condor.json")).unwrap();
        assert_eq!(written, condor().to_json().unwrap());
        assert_eq!(load_scene(&store, "condor").unwrap(), Some(condor()));
        assert_eq!(load_scene(&store, "missing").unwrap(), None);
    }

    #[test]
    fn dir_store_refuses_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden", "a\\b"] {
            assert!(store.path_for(key).is_err(), "'{}' should be refused", key);
        }
        assert!(store.path_for("condor").is_ok());
    }

    #[test]
    fn corrupt_entry_is_a_json_error() {
        let mut store = MemoryStore::default();
        store.set("broken", "{ not json").unwrap();
        assert!(matches!(load_scene(&store, "broken"), Err(ShardError::Json(_))));
    }
}
