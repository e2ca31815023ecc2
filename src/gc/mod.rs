use serde::Serialize;

use crate::model::{AgeGate, ImageId};

mod candidates;
mod execute;
mod plan;
mod prune;
mod reachability;
mod sweep;

pub use self::execute::{collect_garbage, execute_plan};
pub use self::plan::GcPlan;
pub use self::prune::filter_index_entries;
pub use self::reachability::unused_images;

/// Where a run got to. Phases only ever advance in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GcPhase {
    #[default]
    Init,
    IndexesPruned,
    ImagesRemoved,
    Done,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct GcReport {
    /// RFC 3339 safety cutoff the run was evaluated against.
    pub cutoff: String,
    pub age_gate: AgeGate,
    pub dry_run: bool,
    pub repositories: usize,
    pub tags_counted: usize,
    pub tags_skipped: usize,
    pub used_images: usize,
    pub candidate_images: usize,
    pub unused_images: Vec<ImageId>,
    pub updated_indexes: usize,
    pub pruned_index_entries: usize,
    pub removed_images: usize,
    pub failed_removals: Vec<ImageId>,
    pub phase: GcPhase,
}

impl GcReport {
    pub fn is_clean(&self) -> bool {
        self.failed_removals.is_empty()
    }
}
