use std::collections::BTreeSet;

use time::OffsetDateTime;
use tracing::debug;

use super::candidates::deletion_candidates;
use super::reachability::{collect_used_images, unused_images};
use crate::error::Result;
use crate::model::{AgeGate, GcOptions, ImageId, Repository, SafetyCutoff};
use crate::registry::Registry;

/// Everything a run decides before it mutates anything.
///
/// Both the index pruner and the image sweep read `unused` from the same plan,
/// so they can never disagree about what is garbage.
#[derive(Clone, Debug)]
pub struct GcPlan {
    pub cutoff: SafetyCutoff,
    pub age_gate: AgeGate,
    pub repositories: Vec<Repository>,
    pub used: BTreeSet<ImageId>,
    pub candidates: BTreeSet<ImageId>,
    pub unused: BTreeSet<ImageId>,
    pub tags_counted: usize,
    pub tags_skipped: usize,
}

impl GcPlan {
    pub fn build(registry: &Registry, options: &GcOptions, now: OffsetDateTime) -> Result<Self> {
        let cutoff = SafetyCutoff::new(now, options.safety_margin_secs);
        let repositories = registry.repositories()?;
        let used = collect_used_images(registry, &repositories, options.age_gate, &cutoff)?;
        let candidates = deletion_candidates(registry, options.age_gate, &cutoff)?;
        let unused = unused_images(&candidates, &used.ids);

        debug!(
            repositories = repositories.len(),
            used = used.ids.len(),
            candidates = candidates.len(),
            unused = unused.len(),
            "gc plan ready"
        );

        Ok(Self {
            cutoff,
            age_gate: options.age_gate,
            repositories,
            used: used.ids,
            candidates,
            unused,
            tags_counted: used.tags_counted,
            tags_skipped: used.tags_skipped,
        })
    }
}
