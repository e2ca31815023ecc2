use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::model::{AgeGate, ImageId, SafetyCutoff};
use crate::registry::Registry;

/// Image directories that may be deleted if nothing reaches them.
pub(super) fn deletion_candidates(
    registry: &Registry,
    age_gate: AgeGate,
    cutoff: &SafetyCutoff,
) -> Result<BTreeSet<ImageId>> {
    let mut out = BTreeSet::new();
    for id in registry.image_ids()? {
        match age_gate {
            AgeGate::Tag => {
                out.insert(id);
            }
            AgeGate::Checksum => match registry.checksum_modified(&id)? {
                Some(modified) if cutoff.is_settled(modified) => {
                    out.insert(id);
                }
                Some(_) => debug!("{} is inside the safety window, keeping", id),
                None => debug!("{} has no checksum marker, keeping", id),
            },
        }
    }
    Ok(out)
}
