//! Tracing decorator for decoding events
//!
//! [`LoggingVisitor`] wraps another [`Visitor`], writes one indented line per
//! event to an output sink and forwards every call unchanged.
//!
//! ```ignore
//! use nether_trace::{LoggingVisitor, NopVisitor, ReadOptions, read_module};
//!
//! let wasm = std::fs::read("game.wasm")?;
//! let mut out = Vec::new();
//! let mut logger = LoggingVisitor::new(&mut out, NopVisitor);
//! read_module(&wasm, &mut logger, &ReadOptions::default())?;
//! print!("{}", String::from_utf8_lossy(&out));
//! ```

use std::io::{self, Write};

use crate::event::{Event, Shape};
use crate::indent::Indent;
use crate::visitor::{Diagnostic, ReaderState, Visitor};

/// Visitor decorator that traces every event before forwarding it
///
/// Rendering happens before the wrapped visitor is called and never looks at
/// its result. Begin events indent the lines that follow; end events dedent
/// before their own line is written. Raw opcode routing events, diagnostics
/// and state snapshots are forwarded without a trace line.
///
/// The sink is written line by line. If a write fails, the error is kept
/// (see [`sink_error`](Self::sink_error)), a warning is logged and the rest
/// of the session is forwarded without tracing.
#[derive(Debug)]
pub struct LoggingVisitor<W, V> {
    out: W,
    inner: V,
    indent: Indent,
    state: Option<ReaderState>,
    sink_error: Option<io::Error>,
}

impl<W: Write, V: Visitor> LoggingVisitor<W, V> {
    /// Trace into `out`, forwarding to `inner`
    pub fn new(out: W, inner: V) -> Self {
        Self {
            out,
            inner,
            indent: Indent::new(),
            state: None,
            sink_error: None,
        }
    }

    /// Current indentation in columns
    pub fn depth(&self) -> usize {
        self.indent.depth()
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    pub fn sink(&self) -> &W {
        &self.out
    }

    /// Last state snapshot forwarded by the decoder
    pub fn last_state(&self) -> Option<&ReaderState> {
        self.state.as_ref()
    }

    /// First write error reported by the sink, if any
    pub fn sink_error(&self) -> Option<&io::Error> {
        self.sink_error.as_ref()
    }

    /// End the session, returning the sink and the wrapped visitor
    pub fn into_parts(self) -> (W, V) {
        if self.indent.depth() != 0 {
            tracing::debug!(
                depth = self.indent.depth(),
                "trace ended with open regions"
            );
        }
        (self.out, self.inner)
    }

    fn render(&mut self, event: &Event<'_>) {
        if self.sink_error.is_some() {
            return;
        }
        if let Err(err) = write_line(&mut self.out, &self.indent, event) {
            tracing::warn!(
                event = event.name(),
                "trace output failed, tracing disabled for this session: {}",
                err
            );
            self.sink_error = Some(err);
        }
    }
}

fn write_line<W: Write>(out: &mut W, indent: &Indent, event: &Event<'_>) -> io::Result<()> {
    indent.write_prefix(out)?;
    writeln!(out, "{}", event.line())
}

impl<W: Write, V: Visitor> Visitor for LoggingVisitor<W, V> {
    type Error = V::Error;

    fn visit(&mut self, event: &Event<'_>) -> Result<(), Self::Error> {
        match event.shape() {
            Shape::Begin => {
                self.render(event);
                self.indent.enter();
            }
            Shape::End => {
                self.indent.leave();
                self.render(event);
            }
            Shape::Leaf => self.render(event),
            Shape::Silent => {}
        }
        self.inner.visit(event)
    }

    fn on_error(&mut self, diagnostic: &Diagnostic) -> bool {
        self.inner.on_error(diagnostic)
    }

    fn on_set_state(&mut self, state: &ReaderState) {
        self.state = Some(*state);
        self.inner.on_set_state(state);
    }
}

#[cfg(test)]
mod tests;
