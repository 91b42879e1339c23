use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// How much context each log line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// `[HH:MM:SS] [LEVEL] message`, for the terminal
    Compact,
    /// `[TIMESTAMP] [LEVEL] [SCOPE] [TARGET: FILE:LINE]: message`, for log files
    Full,
}

/// Event formatter that wraps each field in brackets
pub struct BracketedFormatter {
    style: LineStyle,
}

impl BracketedFormatter {
    pub fn compact() -> Self {
        Self {
            style: LineStyle::Compact,
        }
    }

    pub fn full() -> Self {
        Self {
            style: LineStyle::Full,
        }
    }
}

impl<S, N> FormatEvent<S, N> for BracketedFormatter
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
        let metadata = event.metadata();
        let now = chrono::Local::now();

        match self.style {
            LineStyle::Compact => {
                write!(writer, "[{}] [{:5}] ", now.format("%H:%M:%S"), metadata.level())?;
            }
            LineStyle::Full => {
                write!(
                    writer,
                    "[{}]  [{:5}] ",
                    now.format("%Y-%m-%dT%H:%M:%S%.6f"),
                    metadata.level()
                )?;

                let scope = ctx
                    .event_scope()
                    .and_then(|scope| scope.from_root().last().map(|span| span.name()))
                    .unwrap_or_else(|| metadata.target().rsplit("::").next().unwrap_or("unknown"));
                write!(writer, "[{}] ", scope)?;

                match (metadata.file(), metadata.line()) {
                    (Some(file), Some(line)) => {
                        write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?
                    }
                    _ => write!(writer, "[{}]: ", metadata.target())?,
                }
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render(formatter: BracketedFormatter) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(formatter)
                .with_writer(move || writer.clone())
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("'a.jpg' --> '.chosen'");
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_compact_line_has_time_level_and_message_only() {
        let line = render(BracketedFormatter::compact());
        assert!(line.starts_with('['));
        assert!(line.contains("] [INFO ] 'a.jpg' --> '.chosen'"));
        assert!(!line.contains("formatter.rs"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_full_line_includes_source_location() {
        let line = render(BracketedFormatter::full());
        assert!(line.contains("[INFO ] [tests] "));
        assert!(line.contains("formatter.rs:"));
        assert!(line.trim_end().ends_with("]: 'a.jpg' --> '.chosen'"));
    }
}
