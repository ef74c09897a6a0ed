//! Newline-delimited record reader
//!
//! Reads one line at a time from any byte stream. A read timeout ends the
//! line early: whatever arrived so far is returned as if it were complete.
//! A signal interrupting the read drops the partial line instead, so the
//! caller can check its stop flag before anything is parsed.

use crate::error::ConnectionError;
use std::io::{ErrorKind, Read};

/// Line reader over a blocking byte stream with a read timeout
pub struct LineReader<R> {
    inner: R,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read up to and including the next `\n`.
    ///
    /// Returns the bytes read so far (possibly empty) when the stream times
    /// out. The caller cannot tell a truncated line from a complete one
    /// except by the missing newline.
    ///
    /// Returns `None` when the read is interrupted by a signal. Bytes already
    /// buffered are discarded.
    pub fn read_line(&mut self) -> Result<Option<String>, ConnectionError> {
        let mut buffer = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    if buffer.is_empty() {
                        return Err(ConnectionError::Closed);
                    }
                    break;
                }
                Ok(_) => {
                    buffer.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::TimedOut => {
                    log::debug!("Read timed out after {} bytes", buffer.len());
                    break;
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {
                    log::debug!("Read interrupted, dropping {} bytes", buffer.len());
                    return Ok(None);
                }
                Err(e) => return Err(ConnectionError::Read(e)),
            }
        }

        Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
    }
}
