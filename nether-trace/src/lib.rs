//! Nether-Trace: event-level tracing for WebAssembly module decoding
//!
//! A module reader reports everything it decodes as a stream of [`Event`]s
//! pushed into a [`Visitor`]. [`LoggingVisitor`] sits between the reader and
//! any other visitor: it writes one indented, human-readable line per event
//! and forwards the call unchanged, so the wrapped consumer sees exactly what
//! it would have seen without tracing.
//!
//! # Key Features
//!
//! - **Transparent**: the wrapped visitor's result is returned as is
//! - **Structured**: begin/end events indent the lines between them
//! - **Exact values**: floats keep their raw bits, `v128` its lanes
//! - **Chainable**: a logger is itself a visitor and can be wrapped again
//!
//! # Usage
//!
//! ```ignore
//! use nether_trace::{LoggingVisitor, NopVisitor, ReadOptions, read_module};
//!
//! let wasm = std::fs::read("game.wasm").unwrap();
//! let mut logger = LoggingVisitor::new(std::io::stdout(), NopVisitor);
//! read_module(&wasm, &mut logger, &ReadOptions::default()).unwrap();
//! ```
//!
//! Output for a single function returning a constant:
//!
//! ```text
//! BeginModule(version: 1)
//!   BeginTypeSection(size: 5)
//!     OnTypeCount(count: 1)
//!     OnType(index: 0, params: [], results: [i32])
//!   EndTypeSection
//!   ...
//! EndModule
//! ```
//!
//! # Format Reference
//!
//! - WebAssembly core specification, binary format
//! - <https://webassembly.github.io/spec/core/binary/index.html>

mod decode;
mod event;
mod format;
mod indent;
mod logging;
mod types;
mod visitor;

pub mod test_utils;

pub use decode::{DecodeError, ReadOptions, read_module};
pub use event::{Event, Line, Shape};
pub use format::{
    F32Bits, F64Bits, Flag, Hex, IndexList, IntBits, Quoted, TypeList, signed,
};
pub use indent::{INDENT_SIZE, Indent, write_padding};
pub use logging::LoggingVisitor;
pub use types::{
    Address, ComdatType, ExternalKind, Index, Limits, Offset, Opcode, RelocType, SectionKind,
    SymbolType, Type, V128,
};
pub use visitor::{Diagnostic, NopVisitor, ReaderState, Visitor};
