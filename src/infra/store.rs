// ============================================================
// Layer 6 — File-Backed Model Store
// ============================================================
// Implements the ModelStore trait with one JSON file per key
// in a managed directory:
//
//   model_store/
//     label_freqs.json        ← staged label totals
//     conditional_freqs.json  ← staged (label, feature) counts
//     feature_scores.json     ← staged score table
//     best_features.json      ← staged selected features
//     train_config.json       ← config of the run that trained
//     naivebayes.json         ← the persisted classifier
//
// Why pretty-printed JSON?
//   Staged artifacts double as a debugging window into the
//   run — a human can open feature_scores.json and read it.
//   The store contract only requires opaque blobs, so the
//   format is free to choose.
//
// Keys are restricted to simple names (alphanumerics, '-',
// '_') so a key can never escape the store directory.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::{fs, path::PathBuf};

use crate::domain::traits::ModelStore;

/// Key-value store over JSON files in a single directory.
pub struct JsonFileStore {
    /// Directory holding one .json file per key
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create store directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Map a key to its file path, rejecting keys that could
    /// traverse outside the store directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            bail!("invalid store key '{key}'");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ModelStore for JsonFileStore {
    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Stored key '{}' at '{}'", key, path.display());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value> {
        let path = self.path_for(key)?;

        let json = fs::read_to_string(&path)
            .with_context(|| format!("No value stored under key '{key}'"))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Corrupt value under key '{key}'"))
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).map(|p| p.exists()).unwrap_or(false)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Cannot remove key '{key}'"))?;
            tracing::debug!("Removed key '{}'", key);
        }
        Ok(())
    }
}
