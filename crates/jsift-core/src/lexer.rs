//! Byte-level token layer: value classification, scalar decoding, skipping.
//!
//! The lexer owns the cursor and the scratch buffer for one scan. Scalar
//! readers decode into the scratch buffer; callers copy the text out with
//! [`Lexer::scratch_string`] when they decide to keep it. Skip routines consume
//! the same byte ranges without decoding anything.
//!
//! Every terminal scalar (string aside) must be followed, after optional
//! whitespace, by exactly one of `,` `}` `]`; the terminator byte is pushed
//! back for the caller. Anything else is a decode error. Cursor-level read
//! failures, including end of input mid-value, surface as the same error —
//! the engine does not distinguish error subtypes.

use std::io::BufRead;

use crate::cursor::ByteCursor;
use crate::error::{Result, ScanError};
use crate::node::NodeKind;
use crate::scratch::Scratch;

pub(crate) fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r')
}

pub(crate) fn is_terminator(b: u8) -> bool {
    matches!(b, b',' | b'}' | b']')
}

/// Classify the next value from its lead byte alone.
pub(crate) fn classify(lead: u8) -> Result<NodeKind> {
    match lead {
        b'"' => Ok(NodeKind::String),
        b'0'..=b'9' | b'-' => Ok(NodeKind::Number),
        b't' | b'f' => Ok(NodeKind::Boolean),
        b'n' => Ok(NodeKind::Null),
        b'[' => Ok(NodeKind::Array),
        b'{' => Ok(NodeKind::Object),
        _ => Err(ScanError::InvalidDocument),
    }
}

pub(crate) struct Lexer<R> {
    cursor: ByteCursor<R>,
    scratch: Scratch,
}

impl<R: BufRead> Lexer<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            cursor: ByteCursor::new(reader),
            scratch: Scratch::new(),
        }
    }

    pub(crate) fn bytes_consumed(&self) -> u64 {
        self.cursor.bytes_consumed()
    }

    /// Raw read for the hunting loop, where end of input is not an error.
    pub(crate) fn try_read(&mut self) -> std::io::Result<u8> {
        self.cursor.read_byte()
    }

    /// Read one byte mid-value, where end of input means a truncated document.
    pub(crate) fn must_read(&mut self) -> Result<u8> {
        self.cursor.read_byte().map_err(|_| ScanError::InvalidDocument)
    }

    fn unread(&mut self) -> Result<()> {
        self.cursor.unread_byte().map_err(|_| ScanError::InvalidDocument)
    }

    /// Skip whitespace and return the first non-whitespace byte.
    pub(crate) fn next_non_ws(&mut self) -> Result<u8> {
        loop {
            let b = self.must_read()?;
            if !is_ws(b) {
                return Ok(b);
            }
        }
    }

    /// Decoded text of the most recent `read_string`/`read_number`.
    pub(crate) fn scratch_bytes(&self) -> &[u8] {
        self.scratch.as_bytes()
    }

    pub(crate) fn scratch_string(&self) -> String {
        self.scratch.to_string_lossy()
    }

    /// Read a string body into the scratch buffer, then peek through
    /// whitespace for a `:`. Returns true when the string was a property
    /// name (the colon is consumed); otherwise the lookahead byte is pushed
    /// back and the string was an ordinary value.
    pub(crate) fn read_property_name(&mut self) -> Result<bool> {
        self.read_string()?;
        let b = self.next_non_ws()?;
        if b == b':' {
            return Ok(true);
        }
        self.unread()?;
        Ok(false)
    }

    /// Decode a string literal into the scratch buffer. The opening `"` has
    /// already been consumed.
    ///
    /// Supported escapes: `\" \\ \/ \' \b \f \n \r \t` and `\uXXXX` with
    /// UTF-16 surrogate-pair combination. A lone or mismatched surrogate is
    /// emitted as U+FFFD with no error. Unescaped bytes below 0x20 are a
    /// decode error.
    pub(crate) fn read_string(&mut self) -> Result<()> {
        self.scratch.reset();
        let mut c = self.must_read()?;
        loop {
            match c {
                b'"' => return Ok(()),
                b'\\' => {
                    let esc = self.must_read()?;
                    c = self.finish_escape(esc)?;
                    continue;
                }
                _ if c < 0x20 => return Err(ScanError::InvalidDocument),
                _ => self.scratch.push(c),
            }
            c = self.must_read()?;
        }
    }

    /// Decode one escape whose code byte (the byte after `\`) is `esc`.
    /// Returns the next not-yet-processed byte, because `\uXXXX` decoding has
    /// to look one byte past the escape to detect surrogate pairs.
    fn finish_escape(&mut self, esc: u8) -> Result<u8> {
        match esc {
            b'"' | b'\\' | b'/' | b'\'' => self.scratch.push(esc),
            b'b' => self.scratch.push(0x08),
            b'f' => self.scratch.push(0x0c),
            b'n' => self.scratch.push(b'\n'),
            b'r' => self.scratch.push(b'\r'),
            b't' => self.scratch.push(b'\t'),
            b'u' => return self.finish_unicode_escape(),
            _ => return Err(ScanError::InvalidDocument),
        }
        self.must_read()
    }

    /// Decode `\uXXXX`, combining a high surrogate with a following `\uXXXX`
    /// low surrogate into one code point. Returns the next unprocessed byte.
    fn finish_unicode_escape(&mut self) -> Result<u8> {
        let hi = self.read_hex4()?;
        let c = self.must_read()?;

        if !is_surrogate(hi) || c != b'\\' {
            self.scratch.push_code_point(hi as u32);
            return Ok(c);
        }

        let esc = self.must_read()?;
        if esc != b'u' {
            // A surrogate followed by some other escape: emit the surrogate
            // on its own, then process that escape.
            self.scratch.push_code_point(hi as u32);
            return self.finish_escape(esc);
        }

        let lo = self.read_hex4()?;
        self.scratch.push_code_point(combine_surrogates(hi, lo));
        self.must_read()
    }

    /// Read the four hex digits of a `\uXXXX` escape.
    fn read_hex4(&mut self) -> Result<u16> {
        let mut v: u16 = 0;
        for _ in 0..4 {
            let c = self.must_read()?;
            let digit = match c {
                b'0'..=b'9' => c - b'0',
                b'A'..=b'F' => c - b'A' + 10,
                b'a'..=b'f' => c - b'a' + 10,
                _ => return Err(ScanError::InvalidDocument),
            };
            v = (v << 4) | digit as u16;
        }
        Ok(v)
    }

    /// Consume a string literal without decoding it. The closing quote must
    /// be unescaped: tracking the previous two bytes keeps `\\"` closing the
    /// string while `\"` does not.
    pub(crate) fn skip_string(&mut self) -> Result<()> {
        let mut prev = 0u8;
        let mut prev_prev = 0u8;
        loop {
            let c = self.must_read()?;
            if c == b'"' && !(prev == b'\\' && prev_prev != b'\\') {
                return Ok(());
            }
            prev_prev = prev;
            prev = c;
        }
    }

    /// Accumulate a number literal into the scratch buffer, `first` included.
    /// Stops at a terminator (pushed back) or at whitespace that is followed
    /// by a terminator; whitespace followed by anything else is an error.
    pub(crate) fn read_number(&mut self, first: u8) -> Result<()> {
        self.scratch.reset();
        self.scratch.push(first);
        loop {
            let c = self.must_read()?;
            if is_ws(c) {
                return self.expect_terminator();
            }
            if is_terminator(c) {
                return self.unread();
            }
            self.scratch.push(c);
        }
    }

    /// Complete a boolean whose lead byte (`t` or `f`) was consumed by
    /// `classify`, then verify the terminator lookahead.
    pub(crate) fn read_boolean(&mut self, first: u8) -> Result<bool> {
        let rest: &[u8] = match first {
            b't' => b"rue",
            b'f' => b"alse",
            _ => return Err(ScanError::InvalidDocument),
        };
        self.expect_bytes(rest)?;
        self.expect_terminator()?;
        Ok(first == b't')
    }

    /// Complete `null` after its classifying `n`, then verify the terminator.
    pub(crate) fn read_null(&mut self) -> Result<()> {
        self.expect_bytes(b"ull")?;
        self.expect_terminator()
    }

    fn expect_bytes(&mut self, expected: &[u8]) -> Result<()> {
        for &want in expected {
            if self.must_read()? != want {
                return Err(ScanError::InvalidDocument);
            }
        }
        Ok(())
    }

    /// After optional whitespace the next byte must be `,` `}` or `]`; it is
    /// pushed back for the enclosing object/array loop.
    fn expect_terminator(&mut self) -> Result<()> {
        let c = self.next_non_ws()?;
        if !is_terminator(c) {
            return Err(ScanError::InvalidDocument);
        }
        self.unread()
    }

    /// Skip a whole object or array whose opening bracket was already
    /// consumed, counting nested `open`/`close` until depth returns to zero.
    /// String contents are opaque, so brackets inside strings don't perturb
    /// the depth.
    pub(crate) fn skip_balanced(&mut self, open: u8, close: u8) -> Result<()> {
        let mut depth: usize = 1;
        loop {
            let c = self.must_read()?;
            if c == b'"' {
                self.skip_string()?;
            } else if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
    }
}

fn is_surrogate(v: u16) -> bool {
    (0xD800..=0xDFFF).contains(&v)
}

/// Combine a surrogate pair into a code point. An invalid pair yields U+FFFD,
/// the same coercion the scratch buffer applies to lone surrogates.
fn combine_surrogates(hi: u16, lo: u16) -> u32 {
    if (0xD800..=0xDBFF).contains(&hi) && (0xDC00..=0xDFFF).contains(&lo) {
        0x10000 + (((hi as u32 - 0xD800) << 10) | (lo as u32 - 0xDC00))
    } else {
        char::REPLACEMENT_CHARACTER as u32
    }
}
