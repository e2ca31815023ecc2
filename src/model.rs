mod ids;
mod layout;
mod policy;

pub use self::ids::ImageId;
pub use self::layout::{Repository, Tag};
pub use self::policy::{AgeGate, DEFAULT_SAFETY_MARGIN_SECS, GcOptions, SafetyCutoff};
