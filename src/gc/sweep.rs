use std::collections::BTreeSet;

use tracing::{error, info};

use super::GcReport;
use crate::model::ImageId;
use crate::registry::Registry;

/// Removes every unused image directory.
///
/// A failed removal is logged and recorded in the report; the remaining
/// images are still processed.
pub(super) fn remove_unused_images(
    registry: &Registry,
    unused: &BTreeSet<ImageId>,
    dry_run: bool,
    report: &mut GcReport,
) {
    for id in unused {
        info!("Removing {}", id);
        if dry_run {
            report.removed_images += 1;
            continue;
        }
        match registry.remove_image(id) {
            Ok(()) => report.removed_images += 1,
            Err(err) => {
                error!("could not remove {}: {}", id, err);
                report.failed_removals.push(id.clone());
            }
        }
    }
}
