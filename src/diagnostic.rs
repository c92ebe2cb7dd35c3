//! Context windows for parse errors.
//!
//! When text input stops matching the grammar, the decoder captures the bytes
//! around the failure from its [`Target`] and renders them with a marker under
//! the offending byte:
//!
//! ```text
//! Unexpected character 'x' at position 4. Expected '['.
//! [1;]x[2;]
//!     |
//! ```

use crate::{Result, Target};

/// Bytes framing a failure position, captured without moving the cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Snippet {
    before: Vec<u8>,
    found: Option<u8>,
    after: Vec<u8>,
}

impl Snippet {
    /// Captures up to `radius` bytes on either side of `tell() + offset`.
    pub(crate) fn capture<T: Target + ?Sized>(
        target: &mut T,
        radius: usize,
        offset: i64,
    ) -> Result<Self> {
        let before = target.context(radius, 0, offset)?;
        let found = target.context(0, 1, offset)?.first().copied();
        let after = target.context(0, radius, offset.saturating_add(1))?;
        Ok(Snippet {
            before,
            found,
            after,
        })
    }

    #[must_use]
    pub(crate) fn found(&self) -> Option<u8> {
        self.found
    }

    /// Human-readable name of the offending byte.
    pub(crate) fn describe_found(&self) -> String {
        match self.found {
            Some(byte) => format!("character '{}'", escape(&[byte])),
            None => "end of input".to_string(),
        }
    }

    /// Renders the window on one line and a `|` marker under the offending byte.
    ///
    /// Non-printable bytes are escaped, and the marker column accounts for the
    /// escaped width.
    pub(crate) fn render(&self) -> String {
        let before = escape(&self.before);
        let found = self.found.map(|byte| escape(&[byte])).unwrap_or_default();
        let after = escape(&self.after);
        format!(
            "{before}{found}{after}\n{:width$}|",
            "",
            width = before.len()
        )
    }
}

/// Printable ASCII passes through; everything else is shown as an escape.
fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes {
        if byte.is_ascii_graphic() || byte == b' ' {
            out.push(byte as char);
        } else {
            out.extend(byte.escape_ascii().map(char::from));
        }
    }
    out
}

/// Absolute stream position for `tell() + offset`, clamped at zero.
pub(crate) fn position_at(tell: u64, offset: i64) -> u64 {
    if offset < 0 {
        tell.saturating_sub(offset.unsigned_abs())
    } else {
        tell.saturating_add(offset as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferTarget;

    fn at(bytes: &[u8], pos: usize) -> BufferTarget {
        let mut target = BufferTarget::from_bytes(bytes.to_vec());
        let mut skip = vec![0u8; pos];
        target.read(&mut skip).unwrap();
        target
    }

    #[test]
    fn test_marker_under_offending_byte() {
        let mut target = at(b"[1;]x[2;]", 4);
        let snippet = Snippet::capture(&mut target, 10, 0).unwrap();
        assert_eq!(snippet.found(), Some(b'x'));
        assert_eq!(snippet.render(), "[1;]x[2;]\n    |");
        assert_eq!(target.tell(), 4);
    }

    #[test]
    fn test_window_is_bounded_by_radius() {
        let mut target = at(b"0123456789abcdefghijklmnopqrstuvwxyz", 15);
        let snippet = Snippet::capture(&mut target, 3, 0).unwrap();
        assert_eq!(snippet.render(), "cdefghi\n   |");
    }

    #[test]
    fn test_end_of_input() {
        let mut target = at(b"\"abc", 4);
        let snippet = Snippet::capture(&mut target, 10, 0).unwrap();
        assert_eq!(snippet.found(), None);
        assert_eq!(snippet.describe_found(), "end of input");
        assert_eq!(snippet.render(), "\"abc\n    |");
    }

    #[test]
    fn test_escaped_bytes_shift_marker() {
        let mut target = at(b"\t\n[x", 3);
        let snippet = Snippet::capture(&mut target, 10, 0).unwrap();
        assert_eq!(snippet.describe_found(), "character 'x'");
        assert_eq!(snippet.render(), "\\t\\n[x\n     |");
    }

    #[test]
    fn test_negative_offset() {
        let mut target = at(b"12x4;", 3);
        let snippet = Snippet::capture(&mut target, 10, -3).unwrap();
        assert_eq!(snippet.found(), Some(b'1'));
        assert_eq!(snippet.render(), "12x4;\n|");
        assert_eq!(position_at(3, -3), 0);
        assert_eq!(position_at(3, -10), 0);
        assert_eq!(position_at(3, 2), 5);
    }
}
