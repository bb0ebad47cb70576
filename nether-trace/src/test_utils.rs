//! Shared test utilities for integration and unit tests

use std::fmt;

use crate::event::Event;
use crate::types::{ComdatType, ExternalKind, Limits, Opcode, RelocType, SymbolType, Type, V128};
use crate::visitor::{Diagnostic, ReaderState, Visitor};

// ============================================================================
// Recording Visitor
// ============================================================================

/// Error returned by [`RecordingVisitor`] for its configured event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub event: &'static str,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recorder rejects {}", self.event)
    }
}

impl std::error::Error for Rejected {}

/// Visitor that records every call it receives
///
/// Events are stored in their `Debug` form so the exact arguments can be
/// compared after the borrowed data is gone.
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    pub events: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub states: Vec<ReaderState>,
    /// Event name to reject with [`Rejected`]
    pub fail_on: Option<&'static str>,
    /// Value returned from `on_error`
    pub handles_errors: bool,
}

impl RecordingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that rejects every event with the given name
    pub fn failing_on(event: &'static str) -> Self {
        Self {
            fail_on: Some(event),
            ..Default::default()
        }
    }
}

impl Visitor for RecordingVisitor {
    type Error = Rejected;

    fn visit(&mut self, event: &Event<'_>) -> Result<(), Rejected> {
        self.events.push(format!("{:?}", event));
        match self.fail_on {
            Some(name) if name == event.name() => Err(Rejected { event: name }),
            _ => Ok(()),
        }
    }

    fn on_error(&mut self, diagnostic: &Diagnostic) -> bool {
        self.diagnostics.push(diagnostic.clone());
        self.handles_errors
    }

    fn on_set_state(&mut self, state: &ReaderState) {
        self.states.push(*state);
    }
}

// ============================================================================
// Trace Helpers
// ============================================================================

/// Split a trace buffer into lines
pub fn trace_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .lines()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Event Samples
// ============================================================================

/// One instance of every event kind
///
/// Ordered so that all begin events come first and all end events last, which
/// keeps the sequence balanced when fed through a trace session.
pub fn all_event_kinds() -> Vec<Event<'static>> {
    let add = Opcode::new("i32.add", 0x6a);
    let load = Opcode::new("i32.load", 0x28);
    let limits = Limits::new(1).with_max(4);
    let lanes = V128::from_lanes([0, 1, 2, 3]);

    let mut events = vec![
        // Begin events
        Event::BeginModule { version: 1 },
        Event::BeginCustomSection { name: "producers", size: 8 },
        Event::BeginTypeSection { size: 5 },
        Event::BeginImportSection { size: 5 },
        Event::BeginFunctionSection { size: 5 },
        Event::BeginTableSection { size: 5 },
        Event::BeginMemorySection { size: 5 },
        Event::BeginGlobalSection { size: 5 },
        Event::BeginGlobal { index: 0, ty: Type::I32, mutable: true },
        Event::BeginGlobalInitExpr { index: 0 },
        Event::BeginExportSection { size: 5 },
        Event::BeginStartSection { size: 1 },
        Event::BeginCodeSection { size: 5 },
        Event::BeginFunctionBody { index: 0, size: 4 },
        Event::BeginElemSection { size: 5 },
        Event::BeginElemSegment { index: 0, table_index: 0, passive: false, elem_type: Type::FuncRef },
        Event::BeginElemSegmentInitExpr { index: 0 },
        Event::BeginDataSection { size: 5 },
        Event::BeginDataSegment { index: 0, memory_index: 0, passive: false },
        Event::BeginDataSegmentInitExpr { index: 0 },
        Event::BeginDataCountSection { size: 1 },
        Event::BeginNamesSection { size: 5 },
        Event::BeginRelocSection { size: 5 },
        Event::BeginDylinkSection { size: 5 },
        Event::BeginLinkingSection { size: 5 },
        Event::BeginTagSection { size: 5 },
        // Leaf events
        Event::TypeCount { count: 1 },
        Event::Type { index: 0, params: &[Type::I32, Type::I64], results: &[Type::F32] },
        Event::ImportCount { count: 5 },
        Event::Import { index: 0, module: "env", field: "f" },
        Event::ImportFunc { import_index: 0, module: "env", field: "f", func_index: 0, sig_index: 0 },
        Event::ImportTable {
            import_index: 1,
            module: "env",
            field: "t",
            table_index: 0,
            elem_type: Type::FuncRef,
            limits,
        },
        Event::ImportMemory { import_index: 2, module: "env", field: "m", memory_index: 0, limits },
        Event::ImportGlobal {
            import_index: 3,
            module: "env",
            field: "g",
            global_index: 0,
            ty: Type::F64,
            mutable: false,
        },
        Event::ImportTag { import_index: 4, module: "env", field: "e", tag_index: 0, sig_index: 1 },
        Event::FunctionCount { count: 1 },
        Event::Function { index: 1, sig_index: 0 },
        Event::TableCount { count: 1 },
        Event::Table { index: 1, elem_type: Type::ExternRef, limits },
        Event::MemoryCount { count: 1 },
        Event::Memory { index: 1, limits: Limits::new(2) },
        Event::GlobalCount { count: 1 },
        Event::ExportCount { count: 1 },
        Event::Export { index: 0, kind: ExternalKind::Func, item_index: 1, name: "main" },
        Event::StartFunction { func_index: 1 },
        Event::FunctionBodyCount { count: 1 },
        Event::LocalDeclCount { count: 1 },
        Event::LocalDecl { decl_index: 0, count: 2, ty: Type::I32 },
        Event::AtomicLoad { opcode: load, align_log2: 2, offset: 0 },
        Event::AtomicStore { opcode: load, align_log2: 2, offset: 0 },
        Event::AtomicRmw { opcode: load, align_log2: 2, offset: 0 },
        Event::AtomicRmwCmpxchg { opcode: load, align_log2: 2, offset: 0 },
        Event::AtomicWait { opcode: load, align_log2: 2, offset: 0 },
        Event::AtomicNotify { opcode: load, align_log2: 2, offset: 0 },
        Event::Unary { opcode: add },
        Event::Binary { opcode: add },
        Event::Compare { opcode: add },
        Event::Convert { opcode: add },
        Event::Ternary { opcode: add },
        Event::Block { sig: Type::Void },
        Event::Loop { sig: Type::I32 },
        Event::If { sig: Type::FuncIndex(2) },
        Event::Try { sig: Type::Void },
        Event::Br { depth: 0 },
        Event::BrIf { depth: 1 },
        Event::BrTable { targets: &[0, 1], default_target: 2 },
        Event::BrOnExn { depth: 0, tag_index: 0 },
        Event::Call { func_index: 0 },
        Event::CallIndirect { sig_index: 0, table_index: 0 },
        Event::ReturnCall { func_index: 0 },
        Event::ReturnCallIndirect { sig_index: 0, table_index: 0 },
        Event::Catch { tag_index: 0 },
        Event::CatchAll,
        Event::Throw { tag_index: 0 },
        Event::Rethrow { depth: 0 },
        Event::Delegate { depth: 0 },
        Event::Drop,
        Event::Else,
        Event::End,
        Event::Nop,
        Event::Return,
        Event::Select,
        Event::Unreachable,
        Event::GlobalGet { index: 0 },
        Event::GlobalSet { index: 0 },
        Event::LocalGet { index: 0 },
        Event::LocalSet { index: 0 },
        Event::LocalTee { index: 0 },
        Event::Load { opcode: load, align_log2: 2, offset: 16 },
        Event::Store { opcode: load, align_log2: 2, offset: 16 },
        Event::MemoryCopy,
        Event::MemoryFill,
        Event::MemoryGrow,
        Event::MemorySize,
        Event::MemoryInit { segment: 0 },
        Event::DataDrop { segment: 0 },
        Event::TableCopy,
        Event::TableInit { segment: 0 },
        Event::ElemDrop { segment: 0 },
        Event::TableGet { table_index: 0 },
        Event::TableSet { table_index: 0 },
        Event::TableGrow { table_index: 0 },
        Event::TableSize { table_index: 0 },
        Event::TableFill { table_index: 0 },
        Event::RefNull,
        Event::RefIsNull,
        Event::RefFunc { func_index: 0 },
        Event::I32Const { value: 42 },
        Event::I64Const { value: 42 },
        Event::F32Const { bits: 0x3fc0_0000 },
        Event::F64Const { bits: 0x3ff8_0000_0000_0000 },
        Event::V128Const { value: lanes },
        Event::SimdLaneOp { opcode: add, lane: 3 },
        Event::SimdShuffleOp { opcode: add, lanes },
        Event::ElemSegmentCount { count: 1 },
        Event::ElemSegmentElemExprCount { index: 0, count: 2 },
        Event::ElemSegmentElemExprRefNull { index: 0 },
        Event::ElemSegmentElemExprRefFunc { index: 0, func_index: 1 },
        Event::DataSegmentCount { count: 1 },
        Event::DataSegmentData { index: 0, data: b"hello" },
        Event::DataCount { count: 1 },
        Event::ModuleNameSubsection { index: 0, name_type: 0, size: 4 },
        Event::ModuleName { name: "m" },
        Event::FunctionNameSubsection { index: 1, name_type: 1, size: 4 },
        Event::FunctionNamesCount { count: 1 },
        Event::FunctionName { index: 0, name: "f" },
        Event::LocalNameSubsection { index: 2, name_type: 2, size: 4 },
        Event::LocalNameFunctionCount { count: 1 },
        Event::LocalNameLocalCount { index: 0, count: 1 },
        Event::LocalName { func_index: 0, local_index: 0, name: "x" },
        Event::RelocCount { count: 1, section_index: 10 },
        Event::Reloc { ty: RelocType::MemoryAddrSleb, offset: 4, index: 0, addend: 0xffff_fffc },
        Event::DylinkInfo { mem_size: 16, mem_align: 2, table_size: 1, table_align: 0 },
        Event::DylinkNeededCount { count: 1 },
        Event::DylinkNeeded { so_name: "libc.so" },
        Event::SymbolCount { count: 1 },
        Event::Symbol { index: 0, ty: SymbolType::Function, flags: 0x10 },
        Event::DataSymbol { index: 1, flags: 0, name: "buf", segment: 0, offset: 0, size: 16 },
        Event::FunctionSymbol { index: 2, flags: 0, name: "f", func_index: 0 },
        Event::GlobalSymbol { index: 3, flags: 0, name: "g", global_index: 0 },
        Event::SectionSymbol { index: 4, flags: 0, section_index: 10 },
        Event::TagSymbol { index: 5, flags: 0, name: "e", tag_index: 0 },
        Event::SegmentInfoCount { count: 1 },
        Event::SegmentInfo { index: 0, name: ".data", alignment: 4, flags: 0 },
        Event::InitFunctionCount { count: 1 },
        Event::InitFunction { priority: 65535, func_index: 0 },
        Event::ComdatCount { count: 1 },
        Event::ComdatBegin { name: "group", flags: 0, count: 1 },
        Event::ComdatEntry { kind: ComdatType::Function, index: 0 },
        Event::TagCount { count: 1 },
        Event::TagType { index: 1, sig_index: 0 },
        Event::InitExprI32Const { index: 0, value: 7 },
        Event::InitExprI64Const { index: 0, value: 7 },
        Event::InitExprF32Const { index: 0, bits: 0x3fc0_0000 },
        Event::InitExprF64Const { index: 0, bits: 0x3ff8_0000_0000_0000 },
        Event::InitExprV128Const { index: 0, value: lanes },
        Event::InitExprGlobalGet { index: 0, global_index: 0 },
        Event::InitExprRefNull { index: 0, ty: Type::FuncRef },
        Event::InitExprRefFunc { index: 0, func_index: 0 },
        // Raw opcode routing
        Event::Opcode { opcode: add },
        Event::OpcodeBare,
        Event::OpcodeIndex { index: 0 },
        Event::OpcodeIndexIndex { index: 0, index2: 1 },
        Event::OpcodeUint32 { value: 1 },
        Event::OpcodeUint32Uint32 { value: 1, value2: 2 },
        Event::OpcodeUint32Uint64 { value: 1, value2: 2 },
        Event::OpcodeUint64 { value: 1 },
        Event::OpcodeF32 { bits: 0 },
        Event::OpcodeF64 { bits: 0 },
        Event::OpcodeV128 { value: lanes },
        Event::OpcodeBlockSig { sig: Type::Void },
        Event::EndFunc,
    ];

    // End events, innermost first
    events.extend([
        Event::EndTagSection,
        Event::EndLinkingSection,
        Event::EndDylinkSection,
        Event::EndRelocSection,
        Event::EndNamesSection,
        Event::EndDataCountSection,
        Event::EndDataSegmentInitExpr { index: 0 },
        Event::EndDataSegment { index: 0 },
        Event::EndDataSection,
        Event::EndElemSegmentInitExpr { index: 0 },
        Event::EndElemSegment { index: 0 },
        Event::EndElemSection,
        Event::EndFunctionBody { index: 0 },
        Event::EndCodeSection,
        Event::EndStartSection,
        Event::EndExportSection,
        Event::EndGlobalInitExpr { index: 0 },
        Event::EndGlobal { index: 0 },
        Event::EndGlobalSection,
        Event::EndMemorySection,
        Event::EndTableSection,
        Event::EndFunctionSection,
        Event::EndImportSection,
        Event::EndTypeSection,
        Event::EndCustomSection,
        Event::EndModule,
    ]);
    events
}
