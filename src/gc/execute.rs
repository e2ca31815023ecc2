use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use super::plan::GcPlan;
use super::prune::prune_index_references;
use super::sweep::remove_unused_images;
use super::{GcPhase, GcReport};
use crate::error::Result;
use crate::model::GcOptions;
use crate::registry::Registry;

/// Plans and runs one collection pass over `registry`, evaluated as of `now`.
pub fn collect_garbage(
    registry: &Registry,
    options: &GcOptions,
    now: OffsetDateTime,
) -> Result<GcReport> {
    let plan = GcPlan::build(registry, options, now)?;
    execute_plan(registry, &plan, options.dry_run)
}

/// Applies a plan: indexes first, then image directories.
///
/// Images are never removed before every index has been pruned, so an index
/// cannot end up naming an image that is already gone.
pub fn execute_plan(registry: &Registry, plan: &GcPlan, dry_run: bool) -> Result<GcReport> {
    let mut report = GcReport {
        cutoff: plan
            .cutoff
            .at()
            .format(&Rfc3339)
            .unwrap_or_else(|_| plan.cutoff.at().to_string()),
        age_gate: plan.age_gate,
        dry_run,
        repositories: plan.repositories.len(),
        tags_counted: plan.tags_counted,
        tags_skipped: plan.tags_skipped,
        used_images: plan.used.len(),
        candidate_images: plan.candidates.len(),
        unused_images: plan.unused.iter().cloned().collect(),
        ..GcReport::default()
    };

    prune_index_references(
        registry,
        &plan.repositories,
        &plan.unused,
        dry_run,
        &mut report,
    )?;
    advance(&mut report, GcPhase::IndexesPruned);

    remove_unused_images(registry, &plan.unused, dry_run, &mut report);
    advance(&mut report, GcPhase::ImagesRemoved);

    advance(&mut report, GcPhase::Done);
    Ok(report)
}

fn advance(report: &mut GcReport, next: GcPhase) {
    debug_assert!(next > report.phase, "gc phase went backwards");
    debug!(from = ?report.phase, to = ?next, "gc phase");
    report.phase = next;
}
