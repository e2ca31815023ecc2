use std::fs;
use std::io;

use time::OffsetDateTime;

use super::{ANCESTRY_FILE, CHECKSUM_FILE, Registry};
use crate::error::{Error, Result};
use crate::model::ImageId;

impl Registry {
    /// Parsed `images/<id>/ancestry`, or `None` when the image records no ancestry.
    pub fn read_ancestry(&self, id: &ImageId) -> Result<Option<Vec<String>>> {
        let path = self.image_dir(id).join(ANCESTRY_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(Error::io("read ancestry", &path))?;
        let ancestry: Vec<String> = serde_json::from_slice(&bytes).map_err(Error::parse(&path))?;
        Ok(Some(ancestry))
    }

    /// Modification time of `images/<id>/_checksum`, if the marker exists.
    pub fn checksum_modified(&self, id: &ImageId) -> Result<Option<OffsetDateTime>> {
        let path = self.image_dir(id).join(CHECKSUM_FILE);
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::io("stat checksum marker", &path)(err)),
        };
        if !meta.is_file() {
            return Ok(None);
        }
        let modified = meta.modified().map_err(Error::io("read mtime of", &path))?;
        Ok(Some(OffsetDateTime::from(modified)))
    }

    /// Recursively removes `images/<id>`. An absent directory is not an error.
    pub fn remove_image(&self, id: &ImageId) -> Result<()> {
        let path = self.image_dir(id);
        match fs::remove_dir_all(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::io("remove image", &path)(err)),
        }
    }
}
