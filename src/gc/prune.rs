use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, info};

use super::GcReport;
use crate::error::Result;
use crate::model::{ImageId, Repository};
use crate::registry::{Registry, entry_id};

/// Drops index entries that reference an unused image.
///
/// Stops at the first index that cannot be read or parsed; indexes already
/// rewritten by then stay rewritten.
pub(super) fn prune_index_references(
    registry: &Registry,
    repositories: &[Repository],
    unused: &BTreeSet<ImageId>,
    dry_run: bool,
    report: &mut GcReport,
) -> Result<()> {
    for repo in repositories {
        let Some(original) = registry.read_index(repo)? else {
            debug!("{} has no index file", repo.path.display());
            continue;
        };
        let original_len = original.len();
        let kept = filter_index_entries(original, unused);
        if kept.len() == original_len {
            continue;
        }

        info!("Updating index for {}", repo.path.display());
        report.updated_indexes += 1;
        report.pruned_index_entries += original_len - kept.len();
        if !dry_run {
            registry.write_index(repo, &kept)?;
        }
    }
    Ok(())
}

/// Keeps every entry whose `id` is not in `unused`, in the original order.
pub fn filter_index_entries(entries: Vec<Value>, unused: &BTreeSet<ImageId>) -> Vec<Value> {
    entries
        .into_iter()
        .filter(|entry| match entry_id(entry) {
            Some(id) => !unused.contains(id),
            None => true,
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/gc/prune_tests.rs"]
mod tests;
