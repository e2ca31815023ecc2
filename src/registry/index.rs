use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use super::{INDEX_FILE, Registry, write_atomic};
use crate::error::{Error, Result};
use crate::model::Repository;

/// Raw `_index_images` entries. Kept as JSON values so fields this tool does
/// not know about survive a rewrite untouched.
pub type IndexEntries = Vec<Value>;

impl Registry {
    pub fn index_path(&self, repo: &Repository) -> PathBuf {
        repo.path.join(INDEX_FILE)
    }

    /// `None` when the repository has no index file.
    pub fn read_index(&self, repo: &Repository) -> Result<Option<IndexEntries>> {
        let path = self.index_path(repo);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(Error::io("read index", &path))?;
        let entries: IndexEntries = serde_json::from_slice(&bytes).map_err(Error::parse(&path))?;
        Ok(Some(entries))
    }

    pub fn write_index(&self, repo: &Repository, entries: &[Value]) -> Result<()> {
        let path = self.index_path(repo);
        let bytes = serde_json::to_vec(entries).map_err(Error::parse(&path))?;
        write_atomic(&path, &bytes)
    }
}

/// The `id` of an index entry, when it has a string one.
pub fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}
