use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The registry root itself is unusable.
    #[error("invalid base dir: {0}")]
    Config(String),

    /// `repositories/` or `images/` is missing under the root.
    #[error("registry layout error: {} is not a directory", .path.display())]
    Layout { path: PathBuf },

    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Error {
        let path = path.to_path_buf();
        move |source| Error::Io {
            action,
            path,
            source,
        }
    }

    pub(crate) fn parse(path: &Path) -> impl FnOnce(serde_json::Error) -> Error {
        let path = path.to_path_buf();
        move |source| Error::Parse { path, source }
    }

    /// True for on-disk corruption that the collector refuses to reason past.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
