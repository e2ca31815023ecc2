use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ImageId;

mod images;
mod index;
mod scan;

pub use self::index::{IndexEntries, entry_id};

pub const REPOSITORIES_DIR: &str = "repositories";
pub const IMAGES_DIR: &str = "images";
pub const TAG_PREFIX: &str = "tag_";
pub const INDEX_FILE: &str = "_index_images";
pub const ANCESTRY_FILE: &str = "ancestry";
pub const CHECKSUM_FILE: &str = "_checksum";

/// Handle on a registry root laid out as `repositories/` plus `images/`.
#[derive(Clone, Debug)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    pub fn open(base_dir: &Path) -> Result<Self> {
        if !base_dir.is_dir() {
            return Err(Error::Config(format!(
                "{} does not exist or is not a directory",
                base_dir.display()
            )));
        }
        let registry = Self {
            root: base_dir.to_path_buf(),
        };
        for dir in [registry.repositories_dir(), registry.images_dir()] {
            if !dir.is_dir() {
                return Err(Error::Layout { path: dir });
            }
        }
        Ok(registry)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repositories_dir(&self) -> PathBuf {
        self.root.join(REPOSITORIES_DIR)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn image_dir(&self, id: &ImageId) -> PathBuf {
        self.images_dir().join(id.as_str())
    }
}

/// Sorted child directories of `dir`; plain files and other entries are skipped.
fn child_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(Error::io("read dir", dir))? {
        let entry = entry.map_err(Error::io("read dir entry", dir))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        out.push((name, path));
    }
    out.sort();
    Ok(out)
}

/// Replaces `path` through a sibling temp file. An existing file's permission
/// bits carry over to the replacement.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    let result = replace_with(&tmp, path, bytes);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn replace_with(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(tmp, bytes).map_err(Error::io("write temp file", tmp))?;
    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(tmp, meta.permissions())
            .map_err(Error::io("copy permissions to", tmp))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(Error::io("stat", path)(err)),
    }
    fs::rename(tmp, path).map_err(Error::io("replace", path))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/registry/layout_tests.rs"]
mod tests;
