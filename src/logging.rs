use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::dispatcher::{self, DefaultGuard};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Registry};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Formats every record as `<timestamp> - <LEVEL> - <message>`.
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
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Console plus append-only file sink for one run.
///
/// Install it with [`Logger::set_default`] and call [`Logger::shutdown`] when
/// done; the file writer is flushed when the logger is dropped.
pub struct Logger {
    dispatch: Dispatch,
    _file_guard: WorkerGuard,
}

impl Logger {
    pub fn init(path: impl AsRef<Path>, level: Level) -> Result<Self> {
        Self::with_console(path, level, std::io::stderr)
    }

    pub fn with_console<W>(path: impl AsRef<Path>, level: Level, console: W) -> Result<Self>
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .with_context(|| format!("log file path {} has no file name", path.display()))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Rotation::NEVER writes straight to `dir/file_name`, opened for append.
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name.to_string_lossy())
            .build(dir)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        let (file_writer, file_guard) = tracing_appender::non_blocking(appender);

        let filter = EnvFilter::new(format!(
            "port_checker={}",
            level.as_str().to_lowercase()
        ));
        // One layer formats each record once, so both sinks get identical lines.
        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(console.and(file_writer)),
        );

        Ok(Logger {
            dispatch: Dispatch::new(subscriber),
            _file_guard: file_guard,
        })
    }

    /// Routes this thread's events to the logger until the guard drops.
    pub fn set_default(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// Flushes pending file writes and closes the sink.
    pub fn shutdown(self) {
        drop(self);
    }
}
