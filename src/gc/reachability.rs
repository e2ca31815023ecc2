use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{AgeGate, ImageId, Repository, SafetyCutoff};
use crate::registry::Registry;

#[derive(Clone, Debug, Default)]
pub(super) struct UsedImages {
    pub(super) ids: BTreeSet<ImageId>,
    pub(super) tags_counted: usize,
    pub(super) tags_skipped: usize,
}

/// Union of the ancestry chains of every counted tag's target.
pub(super) fn collect_used_images(
    registry: &Registry,
    repositories: &[Repository],
    age_gate: AgeGate,
    cutoff: &SafetyCutoff,
) -> Result<UsedImages> {
    let mut used = UsedImages::default();
    for repo in repositories {
        for tag in registry.tags(repo)? {
            if age_gate == AgeGate::Tag && !cutoff.is_settled(tag.modified) {
                debug!(
                    "{}:{} is inside the safety window, not counting it",
                    repo.full_name(),
                    tag.name
                );
                used.tags_skipped += 1;
                continue;
            }
            used.tags_counted += 1;

            let Some(target) = registry.read_tag_target(&tag)? else {
                warn!("ignoring {}: not an image hash", tag.path.display());
                continue;
            };
            match registry.read_ancestry(&target)? {
                Some(ancestry) => used.ids.extend(ancestry.into_iter().map(ImageId)),
                None => debug!("{} has no ancestry file", target),
            }
        }
    }
    Ok(used)
}

/// `candidates - used`.
pub fn unused_images(
    candidates: &BTreeSet<ImageId>,
    used: &BTreeSet<ImageId>,
) -> BTreeSet<ImageId> {
    candidates.difference(used).cloned().collect()
}

#[cfg(test)]
#[path = "../tests/gc/reachability_tests.rs"]
mod tests;
