use std::fs;

use time::OffsetDateTime;

use super::{Registry, TAG_PREFIX, child_dirs};
use crate::error::{Error, Result};
use crate::model::{ImageId, Repository, Tag};

impl Registry {
    /// Every `repositories/<library>/<repository>` directory, sorted by library then name.
    pub fn repositories(&self) -> Result<Vec<Repository>> {
        let mut out = Vec::new();
        for (library, library_path) in child_dirs(&self.repositories_dir())? {
            for (name, path) in child_dirs(&library_path)? {
                out.push(Repository {
                    library: library.clone(),
                    name,
                    path,
                });
            }
        }
        Ok(out)
    }

    pub fn tags(&self, repo: &Repository) -> Result<Vec<Tag>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&repo.path).map_err(Error::io("read repository", &repo.path))? {
            let entry = entry.map_err(Error::io("read repository entry", &repo.path))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.starts_with(TAG_PREFIX) {
                continue;
            }
            let path = entry.path();
            let meta = fs::metadata(&path).map_err(Error::io("stat tag", &path))?;
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified().map_err(Error::io("read mtime of", &path))?;
            out.push(Tag {
                name,
                path,
                modified: OffsetDateTime::from(modified),
            });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    /// The image a tag points at, or `None` when the tag content is not a usable hash.
    pub fn read_tag_target(&self, tag: &Tag) -> Result<Option<ImageId>> {
        let bytes = fs::read(&tag.path).map_err(Error::io("read tag", &tag.path))?;
        Ok(std::str::from_utf8(&bytes).ok().and_then(ImageId::parse))
    }

    /// Names of all image directories under `images/`.
    pub fn image_ids(&self) -> Result<Vec<ImageId>> {
        Ok(child_dirs(&self.images_dir())?
            .into_iter()
            .map(|(name, _)| ImageId(name))
            .collect())
    }
}
