//! Reusable byte accumulator for scalar decoding.

/// Scratch buffer shared by the string and number readers.
///
/// One scan owns one `Scratch`; every decoded scalar passes through it, so the
/// allocation is amortized over the whole document instead of paid per value.
pub(crate) struct Scratch {
    buf: Vec<u8>,
}

impl Scratch {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::with_capacity(2048),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.buf.clear();
    }

    pub(crate) fn push(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Append a decoded code point as UTF-8. Values that are not scalar code
    /// points (unpaired surrogates from `\uXXXX` escapes) encode as U+FFFD;
    /// the buffer stays convertible and the scan does not fail.
    pub(crate) fn push_code_point(&mut self, cp: u32) {
        let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut utf8 = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Copy the accumulated bytes out as a string, coercing any invalid UTF-8
    /// carried through from the raw input to well-formed text. The buffer
    /// itself is left untouched for the next `reset`.
    pub(crate) fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}
