//! Indentation tracking for nested trace output

use std::io::{self, Write};

/// Columns added per nesting level
pub const INDENT_SIZE: usize = 2;

/// Spaces written per call when emitting padding
const PADDING_CHUNK: [u8; 64] = [b' '; 64];

/// Current nesting depth of the trace, in columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent {
    depth: usize,
}

impl Indent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current depth in columns
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a structural region
    pub fn enter(&mut self) {
        self.depth += INDENT_SIZE;
    }

    /// Leave a structural region
    ///
    /// # Panics
    ///
    /// Panics if there is no open region. That means the decoder emitted an
    /// end event without a matching begin event.
    pub fn leave(&mut self) {
        assert!(
            self.depth >= INDENT_SIZE,
            "unbalanced trace nesting: leave at depth {}",
            self.depth
        );
        self.depth -= INDENT_SIZE;
    }

    /// Write the padding for the current depth
    pub fn write_prefix<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_padding(out, self.depth)
    }
}

/// Write exactly `width` spaces, in fixed-size chunks
pub fn write_padding<W: Write + ?Sized>(out: &mut W, width: usize) -> io::Result<()> {
    let mut remaining = width;
    while remaining > 0 {
        let n = remaining.min(PADDING_CHUNK.len());
        out.write_all(&PADDING_CHUNK[..n])?;
        remaining -= n;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_leave() {
        let mut indent = Indent::new();
        assert_eq!(indent.depth(), 0);
        indent.enter();
        indent.enter();
        assert_eq!(indent.depth(), 4);
        indent.leave();
        assert_eq!(indent.depth(), 2);
        indent.leave();
        assert_eq!(indent.depth(), 0);
    }

    #[test]
    #[should_panic(expected = "unbalanced trace nesting")]
    fn test_leave_at_zero_panics() {
        let mut indent = Indent::new();
        indent.leave();
    }

    #[test]
    fn test_padding_exact_width() {
        for width in [0, 1, 2, 63, 64, 65, 128, 1000] {
            let mut out = Vec::new();
            write_padding(&mut out, width).unwrap();
            assert_eq!(out.len(), width);
            assert!(out.iter().all(|&b| b == b' '));
        }
    }

    #[test]
    fn test_deep_prefix() {
        let mut indent = Indent::new();
        for _ in 0..500 {
            indent.enter();
        }
        let mut out = Vec::new();
        indent.write_prefix(&mut out).unwrap();
        assert_eq!(out.len(), 1000);
    }
}
