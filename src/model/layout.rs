use std::path::PathBuf;

use time::OffsetDateTime;

/// `repositories/<library>/<name>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    pub library: String,
    pub name: String,
    pub path: PathBuf,
}

impl Repository {
    /// `library/name`, the way registry clients spell it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.library, self.name)
    }
}

/// A `tag_*` file inside a repository.
#[derive(Clone, Debug)]
pub struct Tag {
    pub name: String,
    pub path: PathBuf,
    pub modified: OffsetDateTime,
}
