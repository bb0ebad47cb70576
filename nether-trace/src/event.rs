//! Decoding event vocabulary and its rendering rules
//!
//! [`Event`] is the closed set of callbacks a module decoder issues. Each
//! variant has exactly one entry in each rule table below: its canonical
//! name ([`Event::name`]), its nesting behaviour ([`Event::shape`]) and its
//! argument rendering ([`Event::line`]).
//!
//! Events borrow names, type lists and byte spans from the decoder; they live
//! for the duration of a single callback.

use core::fmt::{self, Display};

use crate::format::{F32Bits, F64Bits, Flag, Hex, IndexList, IntBits, Quoted, TypeList, signed};
use crate::types::{
    Address, ComdatType, ExternalKind, Index, Limits, Offset, Opcode, RelocType, SymbolType, Type,
    V128,
};

/// How an event affects trace nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Opens a structural region: rendered, then indented
    Begin,
    /// Closes a structural region: dedented, then rendered
    End,
    /// Rendered at the current depth
    Leaf,
    /// Forwarded without a trace line (raw opcode routing)
    Silent,
}

/// One decoder callback with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    // Module
    BeginModule { version: u32 },
    EndModule,

    // Custom sections
    BeginCustomSection { name: &'a str, size: Offset },
    EndCustomSection,

    // Type section
    BeginTypeSection { size: Offset },
    TypeCount { count: Index },
    Type { index: Index, params: &'a [Type], results: &'a [Type] },
    EndTypeSection,

    // Import section
    BeginImportSection { size: Offset },
    ImportCount { count: Index },
    Import { index: Index, module: &'a str, field: &'a str },
    ImportFunc {
        import_index: Index,
        module: &'a str,
        field: &'a str,
        func_index: Index,
        sig_index: Index,
    },
    ImportTable {
        import_index: Index,
        module: &'a str,
        field: &'a str,
        table_index: Index,
        elem_type: Type,
        limits: Limits,
    },
    ImportMemory {
        import_index: Index,
        module: &'a str,
        field: &'a str,
        memory_index: Index,
        limits: Limits,
    },
    ImportGlobal {
        import_index: Index,
        module: &'a str,
        field: &'a str,
        global_index: Index,
        ty: Type,
        mutable: bool,
    },
    ImportTag {
        import_index: Index,
        module: &'a str,
        field: &'a str,
        tag_index: Index,
        sig_index: Index,
    },
    EndImportSection,

    // Function section
    BeginFunctionSection { size: Offset },
    FunctionCount { count: Index },
    Function { index: Index, sig_index: Index },
    EndFunctionSection,

    // Table section
    BeginTableSection { size: Offset },
    TableCount { count: Index },
    Table { index: Index, elem_type: Type, limits: Limits },
    EndTableSection,

    // Memory section
    BeginMemorySection { size: Offset },
    MemoryCount { count: Index },
    Memory { index: Index, limits: Limits },
    EndMemorySection,

    // Global section
    BeginGlobalSection { size: Offset },
    GlobalCount { count: Index },
    BeginGlobal { index: Index, ty: Type, mutable: bool },
    BeginGlobalInitExpr { index: Index },
    EndGlobalInitExpr { index: Index },
    EndGlobal { index: Index },
    EndGlobalSection,

    // Export section
    BeginExportSection { size: Offset },
    ExportCount { count: Index },
    Export { index: Index, kind: ExternalKind, item_index: Index, name: &'a str },
    EndExportSection,

    // Start section
    BeginStartSection { size: Offset },
    StartFunction { func_index: Index },
    EndStartSection,

    // Code section
    BeginCodeSection { size: Offset },
    FunctionBodyCount { count: Index },
    BeginFunctionBody { index: Index, size: Offset },
    LocalDeclCount { count: Index },
    LocalDecl { decl_index: Index, count: Index, ty: Type },
    EndFunctionBody { index: Index },
    EndCodeSection,

    // Instructions
    AtomicLoad { opcode: Opcode, align_log2: u32, offset: Address },
    AtomicStore { opcode: Opcode, align_log2: u32, offset: Address },
    AtomicRmw { opcode: Opcode, align_log2: u32, offset: Address },
    AtomicRmwCmpxchg { opcode: Opcode, align_log2: u32, offset: Address },
    AtomicWait { opcode: Opcode, align_log2: u32, offset: Address },
    AtomicNotify { opcode: Opcode, align_log2: u32, offset: Address },
    Unary { opcode: Opcode },
    Binary { opcode: Opcode },
    Compare { opcode: Opcode },
    Convert { opcode: Opcode },
    Ternary { opcode: Opcode },
    Block { sig: Type },
    Loop { sig: Type },
    If { sig: Type },
    Try { sig: Type },
    Br { depth: Index },
    BrIf { depth: Index },
    BrTable { targets: &'a [Index], default_target: Index },
    BrOnExn { depth: Index, tag_index: Index },
    Call { func_index: Index },
    CallIndirect { sig_index: Index, table_index: Index },
    ReturnCall { func_index: Index },
    ReturnCallIndirect { sig_index: Index, table_index: Index },
    Catch { tag_index: Index },
    CatchAll,
    Throw { tag_index: Index },
    Rethrow { depth: Index },
    Delegate { depth: Index },
    Drop,
    Else,
    End,
    Nop,
    Return,
    Select,
    Unreachable,
    GlobalGet { index: Index },
    GlobalSet { index: Index },
    LocalGet { index: Index },
    LocalSet { index: Index },
    LocalTee { index: Index },
    Load { opcode: Opcode, align_log2: u32, offset: Address },
    Store { opcode: Opcode, align_log2: u32, offset: Address },
    MemoryCopy,
    MemoryFill,
    MemoryGrow,
    MemorySize,
    MemoryInit { segment: Index },
    DataDrop { segment: Index },
    TableCopy,
    TableInit { segment: Index },
    ElemDrop { segment: Index },
    TableGet { table_index: Index },
    TableSet { table_index: Index },
    TableGrow { table_index: Index },
    TableSize { table_index: Index },
    TableFill { table_index: Index },
    RefNull,
    RefIsNull,
    RefFunc { func_index: Index },
    I32Const { value: u32 },
    I64Const { value: u64 },
    F32Const { bits: u32 },
    F64Const { bits: u64 },
    V128Const { value: V128 },
    SimdLaneOp { opcode: Opcode, lane: u64 },
    SimdShuffleOp { opcode: Opcode, lanes: V128 },

    // Element section
    BeginElemSection { size: Offset },
    ElemSegmentCount { count: Index },
    BeginElemSegment { index: Index, table_index: Index, passive: bool, elem_type: Type },
    BeginElemSegmentInitExpr { index: Index },
    EndElemSegmentInitExpr { index: Index },
    ElemSegmentElemExprCount { index: Index, count: Index },
    ElemSegmentElemExprRefNull { index: Index },
    ElemSegmentElemExprRefFunc { index: Index, func_index: Index },
    EndElemSegment { index: Index },
    EndElemSection,

    // Data section
    BeginDataSection { size: Offset },
    DataSegmentCount { count: Index },
    BeginDataSegment { index: Index, memory_index: Index, passive: bool },
    BeginDataSegmentInitExpr { index: Index },
    EndDataSegmentInitExpr { index: Index },
    DataSegmentData { index: Index, data: &'a [u8] },
    EndDataSegment { index: Index },
    EndDataSection,

    // Data count section
    BeginDataCountSection { size: Offset },
    DataCount { count: Index },
    EndDataCountSection,

    // Name section
    BeginNamesSection { size: Offset },
    ModuleNameSubsection { index: Index, name_type: u32, size: Offset },
    ModuleName { name: &'a str },
    FunctionNameSubsection { index: Index, name_type: u32, size: Offset },
    FunctionNamesCount { count: Index },
    FunctionName { index: Index, name: &'a str },
    LocalNameSubsection { index: Index, name_type: u32, size: Offset },
    LocalNameFunctionCount { count: Index },
    LocalNameLocalCount { index: Index, count: Index },
    LocalName { func_index: Index, local_index: Index, name: &'a str },
    EndNamesSection,

    // Relocation sections
    BeginRelocSection { size: Offset },
    RelocCount { count: Index, section_index: Index },
    Reloc { ty: RelocType, offset: Offset, index: Index, addend: u32 },
    EndRelocSection,

    // Dynamic linking section
    BeginDylinkSection { size: Offset },
    DylinkInfo { mem_size: u32, mem_align: u32, table_size: u32, table_align: u32 },
    DylinkNeededCount { count: Index },
    DylinkNeeded { so_name: &'a str },
    EndDylinkSection,

    // Linking section
    BeginLinkingSection { size: Offset },
    SymbolCount { count: Index },
    Symbol { index: Index, ty: SymbolType, flags: u32 },
    DataSymbol {
        index: Index,
        flags: u32,
        name: &'a str,
        segment: Index,
        offset: u32,
        size: u32,
    },
    FunctionSymbol { index: Index, flags: u32, name: &'a str, func_index: Index },
    GlobalSymbol { index: Index, flags: u32, name: &'a str, global_index: Index },
    SectionSymbol { index: Index, flags: u32, section_index: Index },
    TagSymbol { index: Index, flags: u32, name: &'a str, tag_index: Index },
    SegmentInfoCount { count: Index },
    SegmentInfo { index: Index, name: &'a str, alignment: u32, flags: u32 },
    InitFunctionCount { count: Index },
    InitFunction { priority: u32, func_index: Index },
    ComdatCount { count: Index },
    ComdatBegin { name: &'a str, flags: u32, count: Index },
    ComdatEntry { kind: ComdatType, index: Index },
    EndLinkingSection,

    // Tag section
    BeginTagSection { size: Offset },
    TagCount { count: Index },
    TagType { index: Index, sig_index: Index },
    EndTagSection,

    // Constant initializer expressions
    InitExprI32Const { index: Index, value: u32 },
    InitExprI64Const { index: Index, value: u64 },
    InitExprF32Const { index: Index, bits: u32 },
    InitExprF64Const { index: Index, bits: u64 },
    InitExprV128Const { index: Index, value: V128 },
    InitExprGlobalGet { index: Index, global_index: Index },
    InitExprRefNull { index: Index, ty: Type },
    InitExprRefFunc { index: Index, func_index: Index },

    // Raw opcode routing, always followed by a typed instruction event
    Opcode { opcode: Opcode },
    OpcodeBare,
    OpcodeIndex { index: Index },
    OpcodeIndexIndex { index: Index, index2: Index },
    OpcodeUint32 { value: u32 },
    OpcodeUint32Uint32 { value: u32, value2: u32 },
    OpcodeUint32Uint64 { value: u32, value2: u64 },
    OpcodeUint64 { value: u64 },
    OpcodeF32 { bits: u32 },
    OpcodeF64 { bits: u64 },
    OpcodeV128 { value: V128 },
    OpcodeBlockSig { sig: Type },
    EndFunc,
}

impl<'a> Event<'a> {
    /// Canonical event name, as it appears in the trace
    pub fn name(&self) -> &'static str {
        use Event::*;
        match self {
            BeginModule { .. } => "BeginModule",
            EndModule => "EndModule",
            BeginCustomSection { .. } => "BeginCustomSection",
            EndCustomSection => "EndCustomSection",
            BeginTypeSection { .. } => "BeginTypeSection",
            TypeCount { .. } => "OnTypeCount",
            Event::Type { .. } => "OnType",
            EndTypeSection => "EndTypeSection",
            BeginImportSection { .. } => "BeginImportSection",
            ImportCount { .. } => "OnImportCount",
            Import { .. } => "OnImport",
            ImportFunc { .. } => "OnImportFunc",
            ImportTable { .. } => "OnImportTable",
            ImportMemory { .. } => "OnImportMemory",
            ImportGlobal { .. } => "OnImportGlobal",
            ImportTag { .. } => "OnImportTag",
            EndImportSection => "EndImportSection",
            BeginFunctionSection { .. } => "BeginFunctionSection",
            FunctionCount { .. } => "OnFunctionCount",
            Function { .. } => "OnFunction",
            EndFunctionSection => "EndFunctionSection",
            BeginTableSection { .. } => "BeginTableSection",
            TableCount { .. } => "OnTableCount",
            Table { .. } => "OnTable",
            EndTableSection => "EndTableSection",
            BeginMemorySection { .. } => "BeginMemorySection",
            MemoryCount { .. } => "OnMemoryCount",
            Memory { .. } => "OnMemory",
            EndMemorySection => "EndMemorySection",
            BeginGlobalSection { .. } => "BeginGlobalSection",
            GlobalCount { .. } => "OnGlobalCount",
            BeginGlobal { .. } => "BeginGlobal",
            BeginGlobalInitExpr { .. } => "BeginGlobalInitExpr",
            EndGlobalInitExpr { .. } => "EndGlobalInitExpr",
            EndGlobal { .. } => "EndGlobal",
            EndGlobalSection => "EndGlobalSection",
            BeginExportSection { .. } => "BeginExportSection",
            ExportCount { .. } => "OnExportCount",
            Export { .. } => "OnExport",
            EndExportSection => "EndExportSection",
            BeginStartSection { .. } => "BeginStartSection",
            StartFunction { .. } => "OnStartFunction",
            EndStartSection => "EndStartSection",
            BeginCodeSection { .. } => "BeginCodeSection",
            FunctionBodyCount { .. } => "OnFunctionBodyCount",
            BeginFunctionBody { .. } => "BeginFunctionBody",
            LocalDeclCount { .. } => "OnLocalDeclCount",
            LocalDecl { .. } => "OnLocalDecl",
            EndFunctionBody { .. } => "EndFunctionBody",
            EndCodeSection => "EndCodeSection",
            AtomicLoad { .. } => "OnAtomicLoadExpr",
            AtomicStore { .. } => "OnAtomicStoreExpr",
            AtomicRmw { .. } => "OnAtomicRmwExpr",
            AtomicRmwCmpxchg { .. } => "OnAtomicRmwCmpxchgExpr",
            AtomicWait { .. } => "OnAtomicWaitExpr",
            AtomicNotify { .. } => "OnAtomicNotifyExpr",
            Unary { .. } => "OnUnaryExpr",
            Binary { .. } => "OnBinaryExpr",
            Compare { .. } => "OnCompareExpr",
            Convert { .. } => "OnConvertExpr",
            Ternary { .. } => "OnTernaryExpr",
            Block { .. } => "OnBlockExpr",
            Loop { .. } => "OnLoopExpr",
            If { .. } => "OnIfExpr",
            Try { .. } => "OnTryExpr",
            Br { .. } => "OnBrExpr",
            BrIf { .. } => "OnBrIfExpr",
            BrTable { .. } => "OnBrTableExpr",
            BrOnExn { .. } => "OnBrOnExnExpr",
            Call { .. } => "OnCallExpr",
            CallIndirect { .. } => "OnCallIndirectExpr",
            ReturnCall { .. } => "OnReturnCallExpr",
            ReturnCallIndirect { .. } => "OnReturnCallIndirectExpr",
            Catch { .. } => "OnCatchExpr",
            CatchAll => "OnCatchAllExpr",
            Throw { .. } => "OnThrowExpr",
            Rethrow { .. } => "OnRethrowExpr",
            Delegate { .. } => "OnDelegateExpr",
            Drop => "OnDropExpr",
            Else => "OnElseExpr",
            End => "OnEndExpr",
            Nop => "OnNopExpr",
            Return => "OnReturnExpr",
            Select => "OnSelectExpr",
            Unreachable => "OnUnreachableExpr",
            GlobalGet { .. } => "OnGlobalGetExpr",
            GlobalSet { .. } => "OnGlobalSetExpr",
            LocalGet { .. } => "OnLocalGetExpr",
            LocalSet { .. } => "OnLocalSetExpr",
            LocalTee { .. } => "OnLocalTeeExpr",
            Load { .. } => "OnLoadExpr",
            Store { .. } => "OnStoreExpr",
            MemoryCopy => "OnMemoryCopyExpr",
            MemoryFill => "OnMemoryFillExpr",
            MemoryGrow => "OnMemoryGrowExpr",
            MemorySize => "OnMemorySizeExpr",
            MemoryInit { .. } => "OnMemoryInitExpr",
            DataDrop { .. } => "OnDataDropExpr",
            TableCopy => "OnTableCopyExpr",
            TableInit { .. } => "OnTableInitExpr",
            ElemDrop { .. } => "OnElemDropExpr",
            TableGet { .. } => "OnTableGetExpr",
            TableSet { .. } => "OnTableSetExpr",
            TableGrow { .. } => "OnTableGrowExpr",
            TableSize { .. } => "OnTableSizeExpr",
            TableFill { .. } => "OnTableFillExpr",
            RefNull => "OnRefNullExpr",
            RefIsNull => "OnRefIsNullExpr",
            RefFunc { .. } => "OnRefFuncExpr",
            I32Const { .. } => "OnI32ConstExpr",
            I64Const { .. } => "OnI64ConstExpr",
            F32Const { .. } => "OnF32ConstExpr",
            F64Const { .. } => "OnF64ConstExpr",
            V128Const { .. } => "OnV128ConstExpr",
            SimdLaneOp { .. } => "OnSimdLaneOpExpr",
            SimdShuffleOp { .. } => "OnSimdShuffleOpExpr",
            BeginElemSection { .. } => "BeginElemSection",
            ElemSegmentCount { .. } => "OnElemSegmentCount",
            BeginElemSegment { .. } => "BeginElemSegment",
            BeginElemSegmentInitExpr { .. } => "BeginElemSegmentInitExpr",
            EndElemSegmentInitExpr { .. } => "EndElemSegmentInitExpr",
            ElemSegmentElemExprCount { .. } => "OnElemSegmentElemExprCount",
            ElemSegmentElemExprRefNull { .. } => "OnElemSegmentElemExpr_RefNull",
            ElemSegmentElemExprRefFunc { .. } => "OnElemSegmentElemExpr_RefFunc",
            EndElemSegment { .. } => "EndElemSegment",
            EndElemSection => "EndElemSection",
            BeginDataSection { .. } => "BeginDataSection",
            DataSegmentCount { .. } => "OnDataSegmentCount",
            BeginDataSegment { .. } => "BeginDataSegment",
            BeginDataSegmentInitExpr { .. } => "BeginDataSegmentInitExpr",
            EndDataSegmentInitExpr { .. } => "EndDataSegmentInitExpr",
            DataSegmentData { .. } => "OnDataSegmentData",
            EndDataSegment { .. } => "EndDataSegment",
            EndDataSection => "EndDataSection",
            BeginDataCountSection { .. } => "BeginDataCountSection",
            DataCount { .. } => "OnDataCount",
            EndDataCountSection => "EndDataCountSection",
            BeginNamesSection { .. } => "BeginNamesSection",
            ModuleNameSubsection { .. } => "OnModuleNameSubsection",
            ModuleName { .. } => "OnModuleName",
            FunctionNameSubsection { .. } => "OnFunctionNameSubsection",
            FunctionNamesCount { .. } => "OnFunctionNamesCount",
            FunctionName { .. } => "OnFunctionName",
            LocalNameSubsection { .. } => "OnLocalNameSubsection",
            LocalNameFunctionCount { .. } => "OnLocalNameFunctionCount",
            LocalNameLocalCount { .. } => "OnLocalNameLocalCount",
            LocalName { .. } => "OnLocalName",
            EndNamesSection => "EndNamesSection",
            BeginRelocSection { .. } => "BeginRelocSection",
            RelocCount { .. } => "OnRelocCount",
            Reloc { .. } => "OnReloc",
            EndRelocSection => "EndRelocSection",
            BeginDylinkSection { .. } => "BeginDylinkSection",
            DylinkInfo { .. } => "OnDylinkInfo",
            DylinkNeededCount { .. } => "OnDylinkNeededCount",
            DylinkNeeded { .. } => "OnDylinkNeeded",
            EndDylinkSection => "EndDylinkSection",
            BeginLinkingSection { .. } => "BeginLinkingSection",
            SymbolCount { .. } => "OnSymbolCount",
            Symbol { .. } => "OnSymbol",
            DataSymbol { .. } => "OnDataSymbol",
            FunctionSymbol { .. } => "OnFunctionSymbol",
            GlobalSymbol { .. } => "OnGlobalSymbol",
            SectionSymbol { .. } => "OnSectionSymbol",
            TagSymbol { .. } => "OnTagSymbol",
            SegmentInfoCount { .. } => "OnSegmentInfoCount",
            SegmentInfo { .. } => "OnSegmentInfo",
            InitFunctionCount { .. } => "OnInitFunctionCount",
            InitFunction { .. } => "OnInitFunction",
            ComdatCount { .. } => "OnComdatCount",
            ComdatBegin { .. } => "OnComdatBegin",
            ComdatEntry { .. } => "OnComdatEntry",
            EndLinkingSection => "EndLinkingSection",
            BeginTagSection { .. } => "BeginTagSection",
            TagCount { .. } => "OnTagCount",
            TagType { .. } => "OnTagType",
            EndTagSection => "EndTagSection",
            InitExprI32Const { .. } => "OnInitExprI32ConstExpr",
            InitExprI64Const { .. } => "OnInitExprI64ConstExpr",
            InitExprF32Const { .. } => "OnInitExprF32ConstExpr",
            InitExprF64Const { .. } => "OnInitExprF64ConstExpr",
            InitExprV128Const { .. } => "OnInitExprV128ConstExpr",
            InitExprGlobalGet { .. } => "OnInitExprGlobalGetExpr",
            InitExprRefNull { .. } => "OnInitExprRefNullExpr",
            InitExprRefFunc { .. } => "OnInitExprRefFuncExpr",
            Event::Opcode { .. } => "OnOpcode",
            OpcodeBare => "OnOpcodeBare",
            OpcodeIndex { .. } => "OnOpcodeIndex",
            OpcodeIndexIndex { .. } => "OnOpcodeIndexIndex",
            OpcodeUint32 { .. } => "OnOpcodeUint32",
            OpcodeUint32Uint32 { .. } => "OnOpcodeUint32Uint32",
            OpcodeUint32Uint64 { .. } => "OnOpcodeUint32Uint64",
            OpcodeUint64 { .. } => "OnOpcodeUint64",
            OpcodeF32 { .. } => "OnOpcodeF32",
            OpcodeF64 { .. } => "OnOpcodeF64",
            OpcodeV128 { .. } => "OnOpcodeV128",
            OpcodeBlockSig { .. } => "OnOpcodeBlockSig",
            EndFunc => "OnEndFunc",
        }
    }

    /// Nesting behaviour of this event
    pub fn shape(&self) -> Shape {
        use Event::*;
        match self {
            BeginModule { .. }
            | BeginCustomSection { .. }
            | BeginTypeSection { .. }
            | BeginImportSection { .. }
            | BeginFunctionSection { .. }
            | BeginTableSection { .. }
            | BeginMemorySection { .. }
            | BeginGlobalSection { .. }
            | BeginGlobal { .. }
            | BeginGlobalInitExpr { .. }
            | BeginExportSection { .. }
            | BeginStartSection { .. }
            | BeginCodeSection { .. }
            | BeginFunctionBody { .. }
            | BeginElemSection { .. }
            | BeginElemSegment { .. }
            | BeginElemSegmentInitExpr { .. }
            | BeginDataSection { .. }
            | BeginDataSegment { .. }
            | BeginDataSegmentInitExpr { .. }
            | BeginDataCountSection { .. }
            | BeginNamesSection { .. }
            | BeginRelocSection { .. }
            | BeginDylinkSection { .. }
            | BeginLinkingSection { .. }
            | BeginTagSection { .. } => Shape::Begin,

            EndModule
            | EndCustomSection
            | EndTypeSection
            | EndImportSection
            | EndFunctionSection
            | EndTableSection
            | EndMemorySection
            | EndGlobalSection
            | EndGlobal { .. }
            | EndGlobalInitExpr { .. }
            | EndExportSection
            | EndStartSection
            | EndCodeSection
            | EndFunctionBody { .. }
            | EndElemSection
            | EndElemSegment { .. }
            | EndElemSegmentInitExpr { .. }
            | EndDataSection
            | EndDataSegment { .. }
            | EndDataSegmentInitExpr { .. }
            | EndDataCountSection
            | EndNamesSection
            | EndRelocSection
            | EndDylinkSection
            | EndLinkingSection
            | EndTagSection => Shape::End,

            Event::Opcode { .. }
            | OpcodeBare
            | OpcodeIndex { .. }
            | OpcodeIndexIndex { .. }
            | OpcodeUint32 { .. }
            | OpcodeUint32Uint32 { .. }
            | OpcodeUint32Uint64 { .. }
            | OpcodeUint64 { .. }
            | OpcodeF32 { .. }
            | OpcodeF64 { .. }
            | OpcodeV128 { .. }
            | OpcodeBlockSig { .. }
            | EndFunc => Shape::Silent,

            TypeCount { .. }
            | Event::Type { .. }
            | ImportCount { .. }
            | Import { .. }
            | ImportFunc { .. }
            | ImportTable { .. }
            | ImportMemory { .. }
            | ImportGlobal { .. }
            | ImportTag { .. }
            | FunctionCount { .. }
            | Function { .. }
            | TableCount { .. }
            | Table { .. }
            | MemoryCount { .. }
            | Memory { .. }
            | GlobalCount { .. }
            | ExportCount { .. }
            | Export { .. }
            | StartFunction { .. }
            | FunctionBodyCount { .. }
            | LocalDeclCount { .. }
            | LocalDecl { .. }
            | AtomicLoad { .. }
            | AtomicStore { .. }
            | AtomicRmw { .. }
            | AtomicRmwCmpxchg { .. }
            | AtomicWait { .. }
            | AtomicNotify { .. }
            | Unary { .. }
            | Binary { .. }
            | Compare { .. }
            | Convert { .. }
            | Ternary { .. }
            | Block { .. }
            | Loop { .. }
            | If { .. }
            | Try { .. }
            | Br { .. }
            | BrIf { .. }
            | BrTable { .. }
            | BrOnExn { .. }
            | Call { .. }
            | CallIndirect { .. }
            | ReturnCall { .. }
            | ReturnCallIndirect { .. }
            | Catch { .. }
            | CatchAll
            | Throw { .. }
            | Rethrow { .. }
            | Delegate { .. }
            | Drop
            | Else
            | End
            | Nop
            | Return
            | Select
            | Unreachable
            | GlobalGet { .. }
            | GlobalSet { .. }
            | LocalGet { .. }
            | LocalSet { .. }
            | LocalTee { .. }
            | Load { .. }
            | Store { .. }
            | MemoryCopy
            | MemoryFill
            | MemoryGrow
            | MemorySize
            | MemoryInit { .. }
            | DataDrop { .. }
            | TableCopy
            | TableInit { .. }
            | ElemDrop { .. }
            | TableGet { .. }
            | TableSet { .. }
            | TableGrow { .. }
            | TableSize { .. }
            | TableFill { .. }
            | RefNull
            | RefIsNull
            | RefFunc { .. }
            | I32Const { .. }
            | I64Const { .. }
            | F32Const { .. }
            | F64Const { .. }
            | V128Const { .. }
            | SimdLaneOp { .. }
            | SimdShuffleOp { .. }
            | ElemSegmentCount { .. }
            | ElemSegmentElemExprCount { .. }
            | ElemSegmentElemExprRefNull { .. }
            | ElemSegmentElemExprRefFunc { .. }
            | DataSegmentCount { .. }
            | DataSegmentData { .. }
            | DataCount { .. }
            | ModuleNameSubsection { .. }
            | ModuleName { .. }
            | FunctionNameSubsection { .. }
            | FunctionNamesCount { .. }
            | FunctionName { .. }
            | LocalNameSubsection { .. }
            | LocalNameFunctionCount { .. }
            | LocalNameLocalCount { .. }
            | LocalName { .. }
            | RelocCount { .. }
            | Reloc { .. }
            | DylinkInfo { .. }
            | DylinkNeededCount { .. }
            | DylinkNeeded { .. }
            | SymbolCount { .. }
            | Symbol { .. }
            | DataSymbol { .. }
            | FunctionSymbol { .. }
            | GlobalSymbol { .. }
            | SectionSymbol { .. }
            | TagSymbol { .. }
            | SegmentInfoCount { .. }
            | SegmentInfo { .. }
            | InitFunctionCount { .. }
            | InitFunction { .. }
            | ComdatCount { .. }
            | ComdatBegin { .. }
            | ComdatEntry { .. }
            | TagCount { .. }
            | TagType { .. }
            | InitExprI32Const { .. }
            | InitExprI64Const { .. }
            | InitExprF32Const { .. }
            | InitExprF64Const { .. }
            | InitExprV128Const { .. }
            | InitExprGlobalGet { .. }
            | InitExprRefNull { .. }
            | InitExprRefFunc { .. } => Shape::Leaf,
        }
    }

    /// Check if this event is forwarded without a trace line
    pub fn is_silent(&self) -> bool {
        self.shape() == Shape::Silent
    }

    /// The trace line for this event, without indentation or newline
    pub fn line(&self) -> Line<'_, 'a> {
        Line(self)
    }
}

/// `Name(key: value, ...)`, or just `Name` for events without arguments
pub struct Line<'e, 'a>(&'e Event<'a>);

impl Display for Line<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())?;
        let mut args = Args::new(f);
        write_args(self.0, &mut args)?;
        args.finish()
    }
}

/// Writes `(k: v, k: v)`, opening the parenthesis on the first argument
struct Args<'f, 'b> {
    f: &'f mut fmt::Formatter<'b>,
    empty: bool,
}

impl<'f, 'b> Args<'f, 'b> {
    fn new(f: &'f mut fmt::Formatter<'b>) -> Self {
        Self { f, empty: true }
    }

    fn separator(&mut self) -> fmt::Result {
        let sep = if self.empty { "(" } else { ", " };
        self.empty = false;
        self.f.write_str(sep)
    }

    fn arg(&mut self, key: &str, value: impl Display) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{}: {}", key, value)
    }

    /// A pre-keyed fragment such as limits (`initial: 1, max: 2`)
    fn fragment(&mut self, value: impl Display) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{}", value)
    }

    fn finish(self) -> fmt::Result {
        if self.empty { Ok(()) } else { self.f.write_str(")") }
    }
}

fn write_args(event: &Event<'_>, a: &mut Args<'_, '_>) -> fmt::Result {
    use Event::*;
    match *event {
        BeginModule { version } => a.arg("version", version),
        BeginCustomSection { name, size } => {
            a.arg("name", Quoted(name))?;
            a.arg("size", size)
        }
        BeginTypeSection { size }
        | BeginImportSection { size }
        | BeginFunctionSection { size }
        | BeginTableSection { size }
        | BeginMemorySection { size }
        | BeginGlobalSection { size }
        | BeginExportSection { size }
        | BeginStartSection { size }
        | BeginCodeSection { size }
        | BeginElemSection { size }
        | BeginDataSection { size }
        | BeginDataCountSection { size }
        | BeginNamesSection { size }
        | BeginRelocSection { size }
        | BeginDylinkSection { size }
        | BeginLinkingSection { size }
        | BeginTagSection { size } => a.arg("size", size),

        TypeCount { count }
        | ImportCount { count }
        | FunctionCount { count }
        | TableCount { count }
        | MemoryCount { count }
        | GlobalCount { count }
        | ExportCount { count }
        | FunctionBodyCount { count }
        | LocalDeclCount { count }
        | ElemSegmentCount { count }
        | DataSegmentCount { count }
        | DataCount { count }
        | FunctionNamesCount { count }
        | LocalNameFunctionCount { count }
        | DylinkNeededCount { count }
        | SymbolCount { count }
        | SegmentInfoCount { count }
        | InitFunctionCount { count }
        | ComdatCount { count }
        | TagCount { count } => a.arg("count", count),

        Event::Type { index, params, results } => {
            a.arg("index", index)?;
            a.arg("params", TypeList(params))?;
            a.arg("results", TypeList(results))
        }

        Import { index, module, field } => {
            a.arg("index", index)?;
            a.arg("module", Quoted(module))?;
            a.arg("field", Quoted(field))
        }
        ImportFunc { import_index, func_index, sig_index, .. } => {
            a.arg("import_index", import_index)?;
            a.arg("func_index", func_index)?;
            a.arg("sig_index", sig_index)
        }
        ImportTable { import_index, table_index, elem_type, limits, .. } => {
            a.arg("import_index", import_index)?;
            a.arg("table_index", table_index)?;
            a.arg("elem_type", elem_type)?;
            a.fragment(limits)
        }
        ImportMemory { import_index, memory_index, limits, .. } => {
            a.arg("import_index", import_index)?;
            a.arg("memory_index", memory_index)?;
            a.fragment(limits)
        }
        ImportGlobal { import_index, global_index, ty, mutable, .. } => {
            a.arg("import_index", import_index)?;
            a.arg("global_index", global_index)?;
            a.arg("type", ty)?;
            a.arg("mutable", Flag(mutable))
        }
        ImportTag { import_index, tag_index, sig_index, .. } => {
            a.arg("import_index", import_index)?;
            a.arg("tag_index", tag_index)?;
            a.arg("sig_index", sig_index)
        }

        Function { index, sig_index } | TagType { index, sig_index } => {
            a.arg("index", index)?;
            a.arg("sig_index", sig_index)
        }
        Table { index, elem_type, limits } => {
            a.arg("index", index)?;
            a.arg("elem_type", elem_type)?;
            a.fragment(limits)
        }
        Memory { index, limits } => {
            a.arg("index", index)?;
            a.fragment(limits)
        }
        BeginGlobal { index, ty, mutable } => {
            a.arg("index", index)?;
            a.arg("type", ty)?;
            a.arg("mutable", Flag(mutable))
        }
        BeginGlobalInitExpr { index }
        | EndGlobalInitExpr { index }
        | EndGlobal { index }
        | EndFunctionBody { index }
        | BeginElemSegmentInitExpr { index }
        | EndElemSegmentInitExpr { index }
        | ElemSegmentElemExprRefNull { index }
        | EndElemSegment { index }
        | BeginDataSegmentInitExpr { index }
        | EndDataSegmentInitExpr { index }
        | EndDataSegment { index }
        | GlobalGet { index }
        | GlobalSet { index }
        | LocalGet { index }
        | LocalSet { index }
        | LocalTee { index } => a.arg("index", index),

        Export { index, kind, item_index, name } => {
            a.arg("index", index)?;
            a.arg("kind", kind.name())?;
            a.arg("item_index", item_index)?;
            a.arg("name", Quoted(name))
        }
        StartFunction { func_index }
        | Call { func_index }
        | ReturnCall { func_index }
        | RefFunc { func_index } => a.arg("func_index", func_index),

        BeginFunctionBody { index, size } => {
            a.arg("index", index)?;
            a.arg("size", size)
        }
        LocalDecl { decl_index, count, ty } => {
            a.arg("index", decl_index)?;
            a.arg("count", count)?;
            a.arg("type", ty)
        }

        AtomicLoad { opcode, align_log2, offset }
        | AtomicStore { opcode, align_log2, offset }
        | AtomicRmw { opcode, align_log2, offset }
        | AtomicRmwCmpxchg { opcode, align_log2, offset }
        | AtomicWait { opcode, align_log2, offset }
        | AtomicNotify { opcode, align_log2, offset }
        | Load { opcode, align_log2, offset }
        | Store { opcode, align_log2, offset } => {
            a.arg("opcode", opcode)?;
            a.arg("align_log2", align_log2)?;
            a.arg("offset", offset)
        }
        Unary { opcode }
        | Binary { opcode }
        | Compare { opcode }
        | Convert { opcode }
        | Ternary { opcode } => a.arg("opcode", opcode),

        Block { sig } | Loop { sig } | If { sig } | Try { sig } => a.arg("sig", sig),
        Br { depth } | BrIf { depth } | Rethrow { depth } | Delegate { depth } => {
            a.arg("depth", depth)
        }
        BrTable { targets, default_target } => {
            a.arg("num_targets", targets.len())?;
            a.arg("depths", IndexList(targets))?;
            a.arg("default", default_target)
        }
        BrOnExn { depth, tag_index } => {
            a.arg("depth", depth)?;
            a.arg("tag_index", tag_index)
        }
        CallIndirect { sig_index, table_index } | ReturnCallIndirect { sig_index, table_index } => {
            a.arg("sig_index", sig_index)?;
            a.arg("table_index", table_index)
        }
        Catch { tag_index } | Throw { tag_index } => a.arg("tag_index", tag_index),

        MemoryInit { segment } | DataDrop { segment } | TableInit { segment } | ElemDrop { segment } => {
            a.arg("segment", segment)
        }
        TableGet { table_index }
        | TableSet { table_index }
        | TableGrow { table_index }
        | TableSize { table_index }
        | TableFill { table_index } => a.arg("table_index", table_index),

        I32Const { value } => a.arg("value", IntBits(u64::from(value))),
        I64Const { value } => a.arg("value", IntBits(value)),
        F32Const { bits } => a.arg("value", F32Bits(bits)),
        F64Const { bits } => a.arg("value", F64Bits(bits)),
        V128Const { value } => a.arg("value", value),
        SimdLaneOp { opcode, lane } => {
            a.arg("opcode", opcode)?;
            a.arg("lane", lane)
        }
        SimdShuffleOp { opcode, lanes } => {
            a.arg("opcode", opcode)?;
            a.arg("lanes", lanes)
        }

        BeginElemSegment { index, table_index, passive, elem_type } => {
            a.arg("index", index)?;
            a.arg("table_index", table_index)?;
            a.arg("passive", Flag(passive))?;
            a.arg("elem_type", elem_type)
        }
        ElemSegmentElemExprCount { index, count } | LocalNameLocalCount { index, count } => {
            a.arg("index", index)?;
            a.arg("count", count)
        }
        ElemSegmentElemExprRefFunc { index, func_index }
        | InitExprRefFunc { index, func_index } => {
            a.arg("index", index)?;
            a.arg("func_index", func_index)
        }

        BeginDataSegment { index, memory_index, passive } => {
            a.arg("index", index)?;
            a.arg("memory_index", memory_index)?;
            a.arg("passive", Flag(passive))
        }
        DataSegmentData { index, data } => {
            a.arg("index", index)?;
            a.arg("size", data.len())
        }

        ModuleNameSubsection { index, name_type, size }
        | FunctionNameSubsection { index, name_type, size }
        | LocalNameSubsection { index, name_type, size } => {
            a.arg("index", index)?;
            a.arg("name_type", name_type)?;
            a.arg("size", size)
        }
        ModuleName { name } => a.arg("name", Quoted(name)),
        FunctionName { index, name } => {
            a.arg("index", index)?;
            a.arg("name", Quoted(name))
        }
        LocalName { func_index, local_index, name } => {
            a.arg("func_index", func_index)?;
            a.arg("local_index", local_index)?;
            a.arg("name", Quoted(name))
        }

        RelocCount { count, section_index } => {
            a.arg("count", count)?;
            a.arg("section", section_index)
        }
        Reloc { ty, offset, index, addend } => {
            a.arg("type", ty.name())?;
            a.arg("offset", offset)?;
            a.arg("index", index)?;
            a.arg("addend", signed(addend))
        }

        DylinkInfo { mem_size, mem_align, table_size, table_align } => {
            a.arg("mem_size", mem_size)?;
            a.arg("mem_align", mem_align)?;
            a.arg("table_size", table_size)?;
            a.arg("table_align", table_align)
        }
        DylinkNeeded { so_name } => a.arg("name", Quoted(so_name)),

        Symbol { index, ty, flags } => {
            a.arg("index", index)?;
            a.arg("type", ty.name())?;
            a.arg("flags", Hex(flags))
        }
        DataSymbol { index, flags, name, segment, offset, size } => {
            a.arg("index", index)?;
            a.arg("name", Quoted(name))?;
            a.arg("flags", Hex(flags))?;
            a.arg("segment", segment)?;
            a.arg("offset", offset)?;
            a.arg("size", size)
        }
        FunctionSymbol { index, flags, name, func_index } => {
            a.arg("index", index)?;
            a.arg("name", Quoted(name))?;
            a.arg("flags", Hex(flags))?;
            a.arg("func_index", func_index)
        }
        GlobalSymbol { index, flags, name, global_index } => {
            a.arg("index", index)?;
            a.arg("name", Quoted(name))?;
            a.arg("flags", Hex(flags))?;
            a.arg("global_index", global_index)
        }
        SectionSymbol { index, flags, section_index } => {
            a.arg("index", index)?;
            a.arg("flags", Hex(flags))?;
            a.arg("section_index", section_index)
        }
        TagSymbol { index, flags, name, tag_index } => {
            a.arg("index", index)?;
            a.arg("name", Quoted(name))?;
            a.arg("flags", Hex(flags))?;
            a.arg("tag_index", tag_index)
        }
        SegmentInfo { index, name, alignment, flags } => {
            a.arg("index", index)?;
            a.arg("name", Quoted(name))?;
            a.arg("alignment", alignment)?;
            a.arg("flags", Hex(flags))
        }
        InitFunction { priority, func_index } => {
            a.arg("priority", priority)?;
            a.arg("func_index", func_index)
        }
        ComdatBegin { name, flags, count } => {
            a.arg("name", Quoted(name))?;
            a.arg("flags", Hex(flags))?;
            a.arg("count", count)
        }
        ComdatEntry { kind, index } => {
            a.arg("kind", kind.name())?;
            a.arg("index", index)
        }

        InitExprI32Const { index, value } => {
            a.arg("index", index)?;
            a.arg("value", value)
        }
        InitExprI64Const { index, value } => {
            a.arg("index", index)?;
            a.arg("value", value)
        }
        InitExprF32Const { index, bits } => {
            a.arg("index", index)?;
            a.arg("value", F32Bits(bits))
        }
        InitExprF64Const { index, bits } => {
            a.arg("index", index)?;
            a.arg("value", F64Bits(bits))
        }
        InitExprV128Const { index, value } => {
            a.arg("index", index)?;
            a.arg("value", value)
        }
        InitExprGlobalGet { index, global_index } => {
            a.arg("index", index)?;
            a.arg("global_index", global_index)
        }
        InitExprRefNull { index, ty } => {
            a.arg("index", index)?;
            a.arg("type", ty)
        }

        // No payload, or never rendered
        EndModule
        | EndCustomSection
        | EndTypeSection
        | EndImportSection
        | EndFunctionSection
        | EndTableSection
        | EndMemorySection
        | EndGlobalSection
        | EndExportSection
        | EndStartSection
        | EndCodeSection
        | EndElemSection
        | EndDataSection
        | EndDataCountSection
        | EndNamesSection
        | EndRelocSection
        | EndDylinkSection
        | EndLinkingSection
        | EndTagSection
        | CatchAll
        | Drop
        | Else
        | End
        | Nop
        | Return
        | Select
        | Unreachable
        | MemoryCopy
        | MemoryFill
        | MemoryGrow
        | MemorySize
        | TableCopy
        | RefNull
        | RefIsNull
        | Event::Opcode { .. }
        | OpcodeBare
        | OpcodeIndex { .. }
        | OpcodeIndexIndex { .. }
        | OpcodeUint32 { .. }
        | OpcodeUint32Uint32 { .. }
        | OpcodeUint32Uint64 { .. }
        | OpcodeUint64 { .. }
        | OpcodeF32 { .. }
        | OpcodeF64 { .. }
        | OpcodeV128 { .. }
        | OpcodeBlockSig { .. }
        | EndFunc => Ok(()),
    }
}

#[cfg(test)]
mod tests;
