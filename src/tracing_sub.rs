use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

use crate::error::DeskError;

/// Where formatted log lines go. The desktop owns the terminal, so logging
/// to stderr would tear the screen; without a log file output is dropped.
#[derive(Clone, Debug)]
pub enum LogSink {
    File(Arc<File>),
    Discard,
}

impl LogSink {
    /// Append to `path`, creating it if needed.
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LogSink::File(Arc::new(file)))
    }
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    sink: LogSink,
}

impl SubscriberMakeWriter {
    pub fn new(sink: LogSink) -> Self {
        Self { sink }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.sink {
            LogSink::File(file) => DelegatingInner::File(Arc::clone(file)),
            LogSink::Discard => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Compact, colourless formatter writing through `sink`.
pub fn subscriber(sink: LogSink, level: Level) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter::new(sink))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .finish()
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(log_file: Option<&Path>, level: Level) -> Result<(), DeskError> {
    let sink = match log_file {
        Some(path) => LogSink::file(path)?,
        None => LogSink::Discard,
    };
    let _ = tracing::subscriber::set_global_default(subscriber(sink, level));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_sink_receives_structured_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.log");
        let sink = LogSink::file(&path).unwrap();
        tracing::subscriber::with_default(subscriber(sink, Level::DEBUG), || {
            tracing::debug!(window_id = ?"notes", z_index = 7u64, "focused window");
            tracing::trace!("filtered out");
        });
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("focused window"));
        assert!(contents.contains("window_id=\"notes\""));
        assert!(contents.contains("z_index=7"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("desk.log");
        let err = init(Some(&path), Level::INFO).unwrap_err();
        assert!(matches!(err, DeskError::Io(_)));
    }
}
