//! # Output Sinks
//!
//! A sink is a shared destination for rendered lines. Writers are guarded by
//! a mutex and every line is handed over with a single `write_all`, so
//! concurrent callers may interleave whole lines but never partial ones.
//! Write errors are dropped here; a failing destination must not fail the
//! operation that was being logged.

use crate::terminal;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Destination for rendered log lines. Clones write to the same place.
#[derive(Clone)]
pub struct Sink {
    writer: SharedWriter,
    interactive: bool,
    discards: bool,
}

impl Sink {
    fn new(writer: Box<dyn Write + Send>, interactive: bool, discards: bool) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            interactive,
            discards,
        }
    }

    /// Process standard output, probed for a terminal.
    pub fn stdout() -> Self {
        Self::probed(io::stdout())
    }

    /// Process standard error, probed for a terminal.
    pub fn stderr() -> Self {
        Self::probed(io::stderr())
    }

    /// Sink that swallows everything written to it.
    pub fn discard() -> Self {
        Self::new(Box::new(io::sink()), false, true)
    }

    /// Wraps a destination that can tell whether it is a terminal.
    pub fn probed<W>(writer: W) -> Self
    where
        W: Write + IsTerminal + Send + 'static,
    {
        let interactive = terminal::is_interactive(&writer);
        Self::new(Box::new(writer), interactive, false)
    }

    /// Wraps an arbitrary writer. Such sinks are never interactive.
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::new(Box::new(writer), false, false)
    }

    /// In-memory sink plus a handle for reading back what was written.
    pub fn buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::from_writer(buffer.clone()), buffer)
    }

    /// Result of the terminal probe taken when the sink was created.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_discard(&self) -> bool {
        self.discards
    }

    /// Writes one complete line. Errors are ignored.
    pub fn write_line(&self, line: &[u8]) {
        if self.discards {
            return;
        }
        let mut writer = self.writer.lock();
        let _ = writer.write_all(line);
        let _ = writer.flush();
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("interactive", &self.interactive)
            .field("discards", &self.discards)
            .finish()
    }
}

/// Growable byte buffer shared between a sink and a reader.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written output split into lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_buffer_collects_lines() {
        let (sink, buffer) = Sink::buffer();
        sink.write_line(b"one\n");
        sink.clone().write_line(b"two\n");
        assert_eq!(buffer.lines(), vec!["one", "two"]);
        assert!(!sink.is_interactive());
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let sink = Sink::from_writer(FailingWriter);
        sink.write_line(b"lost\n");
    }

    #[test]
    fn test_discard_sink() {
        let sink = Sink::discard();
        assert!(sink.is_discard());
        assert!(!sink.is_interactive());
        sink.write_line(b"nothing\n");
    }

    #[test]
    fn test_file_sink_is_not_interactive() {
        let sink = Sink::probed(tempfile::tempfile().unwrap());
        assert!(!sink.is_interactive());
    }

    #[test]
    fn test_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sink>();
        assert_send_sync::<SharedBuffer>();
    }
}
