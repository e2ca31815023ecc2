use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use time::OffsetDateTime;
use tracing::{debug, warn};

use registry_gc::gc::collect_garbage;
use registry_gc::logging::{self, LogOptions};
use registry_gc::model::{AgeGate, DEFAULT_SAFETY_MARGIN_SECS, GcOptions};
use registry_gc::registry::Registry;

#[derive(Parser)]
#[command(name = "registry-gc")]
#[command(about = "Remove registry images that no tag can reach", long_about = None)]
struct Cli {
    /// Registry root containing `repositories/` and `images/`
    #[arg(long, env = "REGISTRY_GC_BASE_DIR", default_value = "/data/registry")]
    base_dir: PathBuf,

    /// Seconds an image or tag must have aged before it is trusted
    #[arg(
        long = "safety-margin",
        value_name = "SECONDS",
        env = "REGISTRY_GC_SAFETY_MARGIN",
        default_value_t = DEFAULT_SAFETY_MARGIN_SECS
    )]
    safety_margin_secs: u64,

    /// Timestamp that enforces the safety margin: `tag` or `checksum`
    #[arg(long, env = "REGISTRY_GC_AGE_GATE", default_value_t = AgeGate::Checksum)]
    age_gate: AgeGate,

    /// Log what would change without writing indexes or removing images
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as JSON on stdout; log lines move to stderr
    #[arg(long)]
    json: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH", env = "REGISTRY_GC_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log filter directives
    #[arg(long, env = "REGISTRY_GC_LOG", default_value = logging::DEFAULT_LOG_FILTER)]
    log_level: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init_logger(&LogOptions {
        filter: cli.log_level.clone(),
        file: cli.log_file.clone(),
        to_stderr: cli.json,
    })?;

    let registry = Registry::open(&cli.base_dir).context("open registry")?;
    let options = GcOptions {
        safety_margin_secs: cli.safety_margin_secs,
        age_gate: cli.age_gate,
        dry_run: cli.dry_run,
    };
    if options.dry_run {
        warn!("dry run: indexes and images are left untouched");
    }

    let report = collect_garbage(&registry, &options, OffsetDateTime::now_utc())
        .with_context(|| format!("collect garbage in {}", registry.root().display()))?;
    debug!(
        updated_indexes = report.updated_indexes,
        removed_images = report.removed_images,
        failed_removals = report.failed_removals.len(),
        "gc finished"
    );

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize gc report")?
        );
    }

    if !report.is_clean() {
        anyhow::bail!(
            "{} image(s) could not be removed: {}",
            report.failed_removals.len(),
            report
                .failed_removals
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}
