//! Log line layout: wall-clock time, frame counter, level, spans, target, fields.

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Frames run so far; advanced by the application loop.
static FRAME: AtomicU64 = AtomicU64::new(0);

const TIMESTAMP: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

#[derive(Clone, Copy)]
enum Style {
    Dim,
    Bold,
    Color(&'static str),
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Dim => "\x1b[2m",
            Style::Bold => "\x1b[1m",
            Style::Color(code) => code,
        }
    }
}

/// Writes `value`, wrapped in the style's escape codes when the writer takes them.
fn paint(writer: &mut Writer<'_>, style: Style, value: impl Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}\x1b[0m", style.code(), value)
    } else {
        write!(writer, "{value}")
    }
}

/// Five-character label and colour for a level.
fn level_label(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("TRACE", "\x1b[35m"),
        Level::DEBUG => ("DEBUG", "\x1b[34m"),
        Level::INFO => (" INFO", "\x1b[32m"),
        Level::WARN => (" WARN", "\x1b[33m"),
        Level::ERROR => ("ERROR", "\x1b[31m"),
    }
}

/// The frame counter as it appears in log lines: the low 16 bits in hex.
pub fn frame_label(frame: u64) -> String {
    format!("0x{:04X}", frame & 0xFFFF)
}

pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let now = OffsetDateTime::now_utc().format(&TIMESTAMP).map_err(|_| fmt::Error)?;
        paint(&mut writer, Style::Dim, now)?;
        writer.write_char(' ')?;
        paint(&mut writer, Style::Dim, frame_label(get_tick_count()))?;
        writer.write_char(' ')?;

        let (label, color) = level_label(meta.level());
        paint(&mut writer, Style::Color(color), label)?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut any = false;
            for span in scope.from_root() {
                any = true;
                paint(&mut writer, Style::Bold, span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|f| !f.is_empty()) {
                    paint(&mut writer, Style::Bold, "{")?;
                    write!(writer, "{fields}")?;
                    paint(&mut writer, Style::Bold, "}")?;
                }
                paint(&mut writer, Style::Dim, ':')?;
            }
            if any {
                writer.write_char(' ')?;
            }
        }

        paint(&mut writer, Style::Dim, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

pub fn increment_tick() {
    FRAME.fetch_add(1, Ordering::Relaxed);
}

pub fn get_tick_count() -> u64 {
    FRAME.load(Ordering::Relaxed)
}
