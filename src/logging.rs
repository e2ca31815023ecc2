use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer};

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug)]
pub struct LogOptions {
    /// `EnvFilter` directives, e.g. `info` or `registry_gc=debug`.
    pub filter: String,
    /// Also append events to this file.
    pub file: Option<PathBuf>,
    /// Write console lines to stderr instead of stdout, leaving stdout for
    /// machine-readable output.
    pub to_stderr: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
            to_stderr: false,
        }
    }
}

/// Renders each event as `LEVEL: message key=value...` on one line.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}: ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// or buffered file output is lost.
pub fn init_logger(options: &LogOptions) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&options.filter)
        .with_context(|| format!("invalid log filter '{}'", options.filter))?;

    let console = if options.to_stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    let console_layer = fmt_layer::layer()
        .with_writer(console)
        .event_format(LineFormat);

    let (file_layer, guard) = match &options.file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            fs::create_dir_all(&dir)
                .with_context(|| format!("create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt_layer::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = path
        .file_name()
        .with_context(|| format!("log file path {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}

#[cfg(test)]
#[path = "tests/logging_tests.rs"]
mod tests;
