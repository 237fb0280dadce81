/// Persistent key-value store for a StageLog profile
///
/// The StageLog app keeps its datasets as string entries in a single
/// JSON object file (storage.json) inside the profile directory. This
/// module wraps that file behind a small store capability so restore
/// logic can be exercised against an in-memory fake in tests.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store capability: get/set string entries, persist on demand
pub trait StageStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: String);
    fn keys(&self) -> Vec<String>;
    fn persist(&mut self) -> Result<()>;
}

/// File-backed store over the profile's storage.json
pub struct LocalStore {
    store_file: PathBuf,
    entries: HashMap<String, String>,
}

impl LocalStore {
    /// Load the store from a profile's storage file.
    /// A missing file loads as an empty store.
    pub fn load<P: AsRef<Path>>(store_file: P) -> Result<Self> {
        let store_file = store_file.as_ref().to_path_buf();

        if !store_file.exists() {
            return Ok(Self {
                store_file,
                entries: HashMap::new(),
            });
        }

        let content = fs::read_to_string(&store_file)
            .context("Failed to read storage file")?;

        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .context("Failed to parse storage file")?;

        Ok(Self {
            store_file,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.store_file
    }
}

impl StageStore for LocalStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn persist(&mut self) -> Result<()> {
        if let Some(parent) = self.store_file.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create profile directory")?;
        }

        // BTreeMap for stable key order in the written file
        let ordered: BTreeMap<&String, &String> = self.entries.iter().collect();
        let content = serde_json::to_string_pretty(&ordered)
            .context("Failed to serialize store")?;

        fs::write(&self.store_file, content)
            .context("Failed to write storage file")?;

        Ok(())
    }
}

/// Mapping-backed store fake for tests; persist is a no-op
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
impl StageStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }
}
