//! Consumer interface for decoding events

use core::convert::Infallible;
use core::fmt;

use crate::event::Event;
use crate::types::SectionKind;

/// A consumer of decoding events
///
/// Decoders push every [`Event`] into a visitor in stream order. The visitor
/// returns `Ok(())` to let decoding continue or an error to stop it.
///
/// Both real consumers and decorators such as
/// [`LoggingVisitor`](crate::LoggingVisitor) implement this trait, so a
/// decoder can drive either one, or a chain of them.
pub trait Visitor {
    /// Failure reported back to the decoder
    type Error;

    /// Handle one decoding event
    fn visit(&mut self, event: &Event<'_>) -> Result<(), Self::Error>;

    /// A decoding problem found by the decoder
    ///
    /// Returns `true` if the visitor reported the diagnostic itself; the
    /// decoder falls back to its own reporting otherwise.
    fn on_error(&mut self, diagnostic: &Diagnostic) -> bool {
        let _ = diagnostic;
        false
    }

    /// The decoder's current stream position
    fn on_set_state(&mut self, state: &ReaderState) {
        let _ = state;
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Error = V::Error;

    fn visit(&mut self, event: &Event<'_>) -> Result<(), Self::Error> {
        (**self).visit(event)
    }

    fn on_error(&mut self, diagnostic: &Diagnostic) -> bool {
        (**self).on_error(diagnostic)
    }

    fn on_set_state(&mut self, state: &ReaderState) {
        (**self).on_set_state(state)
    }
}

/// Visitor that accepts every event and does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NopVisitor;

impl Visitor for NopVisitor {
    type Error = Infallible;

    fn visit(&mut self, _event: &Event<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A decoding problem reported by the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte offset of the problem, when known
    pub offset: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(offset: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{:08x}: error: {}", offset, self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

/// Snapshot of the decoder's position, sent at the start of each section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderState {
    /// Offset of the section contents in the module
    pub offset: usize,
    /// Section being read
    pub section: SectionKind,
    /// Size of the section contents in bytes
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let with_offset = Diagnostic::new(Some(0x1a), "unexpected end");
        assert_eq!(with_offset.to_string(), "0000001a: error: unexpected end");

        let without = Diagnostic::new(None, "bad magic");
        assert_eq!(without.to_string(), "error: bad magic");
    }

    #[test]
    fn test_nop_visitor_accepts_everything() {
        let mut nop = NopVisitor;
        assert!(nop.visit(&Event::EndModule).is_ok());
        assert!(!nop.on_error(&Diagnostic::new(None, "ignored")));
    }

    #[test]
    fn test_mut_ref_forwards() {
        struct Counter(usize);
        impl Visitor for Counter {
            type Error = ();
            fn visit(&mut self, _event: &Event<'_>) -> Result<(), ()> {
                self.0 += 1;
                Ok(())
            }
        }

        fn drive<V: Visitor>(mut visitor: V) -> Result<(), V::Error> {
            visitor.visit(&Event::Nop)?;
            visitor.visit(&Event::Drop)
        }

        let mut counter = Counter(0);
        drive(&mut counter).unwrap();
        assert_eq!(counter.0, 2);
    }
}
