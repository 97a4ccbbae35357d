//! Byte-at-a-time view over a buffered input source.

use std::io::{self, BufRead};

/// Wraps a buffered reader with single-byte pushback and a running count of
/// consumed bytes.
///
/// The cursor makes no buffering promises beyond one byte of lookahead:
/// [`unread_byte`](ByteCursor::unread_byte) may only be called immediately
/// after a successful read, and only once before the next read.
pub(crate) struct ByteCursor<R> {
    inner: R,
    /// Byte restored by `unread_byte`, served before touching `inner` again.
    pushback: Option<u8>,
    /// Byte returned by the most recent read, eligible for pushback.
    last_read: Option<u8>,
    consumed: u64,
}

impl<R: BufRead> ByteCursor<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: None,
            last_read: None,
            consumed: 0,
        }
    }

    /// Read one byte. End of input surfaces as `ErrorKind::UnexpectedEof`.
    pub(crate) fn read_byte(&mut self) -> io::Result<u8> {
        let b = match self.pushback.take() {
            Some(b) => b,
            None => {
                let buf = self.inner.fill_buf()?;
                if buf.is_empty() {
                    return Err(io::ErrorKind::UnexpectedEof.into());
                }
                let b = buf[0];
                self.inner.consume(1);
                b
            }
        };
        self.consumed += 1;
        self.last_read = Some(b);
        Ok(b)
    }

    /// Push the most recently read byte back so the next read returns it
    /// again. Fails if no read happened since the last pushback.
    pub(crate) fn unread_byte(&mut self) -> io::Result<()> {
        match self.last_read.take() {
            Some(b) => {
                self.pushback = Some(b);
                self.consumed = self.consumed.saturating_sub(1);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no byte available to unread",
            )),
        }
    }

    /// Total bytes accepted so far (reads minus unreads, never negative).
    pub(crate) fn bytes_consumed(&self) -> u64 {
        self.consumed
    }
}
