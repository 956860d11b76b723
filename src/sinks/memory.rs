//! In-memory sink for capturing output

use crate::core::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A growable byte buffer that can be shared with a [`Sink`]
///
/// Clones share the same storage, so a test keeps one clone and hands the
/// other to the logger.
///
/// # Example
///
/// ```
/// use fieldlog::{Logger, MemoryBuffer, Sink};
///
/// let buffer = MemoryBuffer::new();
/// let logger = Logger::with_sink(Sink::memory(&buffer));
/// logger.info("captured");
///
/// assert!(buffer.contents().contains("INFO captured"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.lock().clone()
    }

    /// Written output split into lines, without the line terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Take the contents, leaving the buffer empty
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.bytes.lock())
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink {
    /// A sink writing into `buffer`
    pub fn memory(buffer: &MemoryBuffer) -> Self {
        Sink::new("memory", buffer.clone())
    }
}
