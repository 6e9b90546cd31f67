//! Console logging via `tracing` with a compact, colorized format.
//!
//! All output goes to stderr so that tool pass-through and progress bars
//! never fight the logger for stdout. Verbosity is applied at the
//! subscriber level: `--quiet` drops everything below `ERROR`,
//! `--verbose` enables `DEBUG`, and `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

/// Target used for stage-header events so the formatter can render them
/// with the `==>` prefix.
const STAGE_TARGET: &str = "llvm_docset::stage";

/// Thin facade over `tracing` used by the pipeline stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    /// Create a new logger facade.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "llvm_docset::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (shown only with `--verbose`).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message (shown even with `--quiet`).
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits the generator's
/// console style: `==>` stage headers, colored level tags, dim debug.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let msg = &visitor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31merror:\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mwarning:\x1b[0m {msg}"),
            tracing::Level::INFO if metadata.target() == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;35m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Safe to call more than once; later calls are no-ops (relevant for
/// tests that share a process).
pub fn init_subscriber(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .event_format(ConsoleFormatter)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
