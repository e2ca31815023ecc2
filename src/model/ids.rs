use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Content hash naming an image directory under `images/`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    /// Accepts a hash read from a tag or ancestry file.
    ///
    /// The value ends up as a path component below `images/`, so anything that
    /// could step outside that directory is refused.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() || s == "." || s == ".." || s.contains(&['/', '\\'][..]) {
            return None;
        }
        Some(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets sets of ids be probed with a plain `&str`; ordering matches `String`.
impl Borrow<str> for ImageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
