use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 60 * 60;

/// Which timestamp keeps freshly written data away from the sweeper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeGate {
    /// Tags written inside the safety window are not counted as roots.
    /// Every image directory is a deletion candidate.
    Tag,

    /// Every tag counts. An image is a candidate only once its `_checksum`
    /// marker is older than the safety window; images without one are never
    /// candidates.
    #[default]
    Checksum,
}

impl AgeGate {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGate::Tag => "tag",
            AgeGate::Checksum => "checksum",
        }
    }
}

impl fmt::Display for AgeGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tag" => Ok(AgeGate::Tag),
            "checksum" => Ok(AgeGate::Checksum),
            other => Err(format!(
                "unknown age gate '{}' (expected 'tag' or 'checksum')",
                other
            )),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GcOptions {
    /// Minimum age, in seconds, before anything gated by the age gate counts as settled.
    #[serde(default = "default_safety_margin")]
    pub safety_margin_secs: u64,

    #[serde(default)]
    pub age_gate: AgeGate,

    /// Compute and log the plan without touching indexes or images.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_safety_margin() -> u64 {
    DEFAULT_SAFETY_MARGIN_SECS
}

impl Default for GcOptions {
    fn default() -> Self {
        Self {
            safety_margin_secs: DEFAULT_SAFETY_MARGIN_SECS,
            age_gate: AgeGate::default(),
            dry_run: false,
        }
    }
}

/// `now - safety_margin`. Only timestamps strictly before it are settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafetyCutoff(OffsetDateTime);

impl SafetyCutoff {
    pub fn new(now: OffsetDateTime, margin_secs: u64) -> Self {
        let margin = Duration::seconds(i64::try_from(margin_secs).unwrap_or(i64::MAX));
        // Margins reaching past the representable range protect everything.
        let at = now
            .checked_sub(margin)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);
        Self(at)
    }

    pub fn at(&self) -> OffsetDateTime {
        self.0
    }

    pub fn is_settled(&self, modified: OffsetDateTime) -> bool {
        modified < self.0
    }
}

#[cfg(test)]
#[path = "../tests/model/policy_tests.rs"]
mod tests;
