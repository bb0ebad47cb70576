//! Push-style module reader
//!
//! Walks a binary module with `wasmparser` and reports it as a stream of
//! [`Event`]s to any [`Visitor`]. The reader decodes but does not validate:
//! type and index checks are left to the consumer.
//!
//! # Example
//!
//! ```ignore
//! use nether_trace::{LoggingVisitor, NopVisitor, ReadOptions, read_module};
//!
//! let wasm = wat::parse_str("(module (func))")?;
//! let mut logger = LoggingVisitor::new(std::io::stdout(), NopVisitor);
//! read_module(&wasm, &mut logger, &ReadOptions::default())?;
//! ```

mod code;
mod convert;
mod error;
mod names;
mod ops;

pub use error::DecodeError;

use std::ops::Range;

use wasmparser::{
    CustomSectionReader, DataKind, DataSectionReader, ElementItems, ElementKind,
    ElementSectionReader, Encoding, ExportSectionReader, FunctionSectionReader,
    GlobalSectionReader, ImportSectionReader, KnownCustom, MemorySectionReader, Parser, Payload,
    TableSectionReader, TagSectionReader, TypeRef, TypeSectionReader,
};

use crate::event::Event;
use crate::types::{Index, SectionKind, Type};
use crate::visitor::{Diagnostic, ReaderState, Visitor};

/// Reader settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Expand the `name` custom section into name events
    pub read_debug_names: bool,
    /// Stop on a malformed custom section instead of warning and moving on
    pub fail_on_custom_section_error: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            read_debug_names: true,
            fail_on_custom_section_error: false,
        }
    }
}

/// Decode `bytes` as a module, pushing every event into `visitor`
///
/// A decoding failure is reported to [`Visitor::on_error`] before it is
/// returned. If the visitor does not handle it, it is logged at error level.
///
/// # Errors
///
/// - [`DecodeError::Malformed`] if the bytes are not a module this reader
///   understands
/// - [`DecodeError::Callback`] if the visitor rejects an event
pub fn read_module<V: Visitor + ?Sized>(
    bytes: &[u8],
    visitor: &mut V,
    options: &ReadOptions,
) -> Result<(), DecodeError<V::Error>> {
    let mut reader = ModuleReader::new(visitor, *options);
    let result = reader.read(bytes);

    if let Err(DecodeError::Malformed { offset, message }) = &result {
        let diagnostic = Diagnostic::new(Some(*offset), message.clone());
        if !reader.visitor.on_error(&diagnostic) {
            tracing::error!("{}", diagnostic);
        }
    }
    result
}

/// Sizes of the module's index spaces seen so far
#[derive(Debug, Default)]
struct IndexSpaces {
    types: Index,
    funcs: Index,
    imported_funcs: Index,
    tables: Index,
    memories: Index,
    globals: Index,
    tags: Index,
}

/// Progress through the code section
#[derive(Debug, Default)]
struct CodeCursor {
    next_body: Index,
    remaining: u32,
}

struct ModuleReader<'v, V: ?Sized> {
    visitor: &'v mut V,
    options: ReadOptions,
    spaces: IndexSpaces,
    code: CodeCursor,
}

type ReadResult<V> = Result<(), DecodeError<<V as Visitor>::Error>>;

impl<'v, V: Visitor + ?Sized> ModuleReader<'v, V> {
    fn new(visitor: &'v mut V, options: ReadOptions) -> Self {
        Self {
            visitor,
            options,
            spaces: IndexSpaces::default(),
            code: CodeCursor::default(),
        }
    }

    fn read(&mut self, bytes: &[u8]) -> ReadResult<V> {
        for payload in Parser::new(0).parse_all(bytes) {
            self.payload(payload?)?;
        }
        Ok(())
    }

    /// Push one event, naming it in the error if the visitor rejects it
    fn emit(&mut self, event: Event<'_>) -> ReadResult<V> {
        self.visitor
            .visit(&event)
            .map_err(|error| DecodeError::Callback {
                event: event.name(),
                error,
            })
    }

    fn set_state(&mut self, id: u8, range: &Range<usize>) {
        let Some(section) = SectionKind::from_id(id) else {
            return;
        };
        self.visitor.on_set_state(&ReaderState {
            offset: range.start,
            section,
            size: range.len(),
        });
    }

    fn payload(&mut self, payload: Payload<'_>) -> ReadResult<V> {
        let section = payload.as_section();
        if let Some((id, range)) = &section {
            self.set_state(*id, range);
        }
        let (start, size) = section
            .as_ref()
            .map_or((0, 0), |(_, range)| (range.start, range.len()));

        match payload {
            Payload::Version {
                num,
                encoding,
                range,
            } => match encoding {
                Encoding::Module => self.emit(Event::BeginModule {
                    version: u32::from(num),
                }),
                Encoding::Component => {
                    Err(DecodeError::unsupported(range.start, "component encoding"))
                }
            },
            Payload::TypeSection(reader) => self.type_section(reader, size),
            Payload::ImportSection(reader) => self.import_section(reader, size),
            Payload::FunctionSection(reader) => self.function_section(reader, size),
            Payload::TableSection(reader) => self.table_section(reader, size),
            Payload::MemorySection(reader) => self.memory_section(reader, size),
            Payload::TagSection(reader) => self.tag_section(reader, size),
            Payload::GlobalSection(reader) => self.global_section(reader, size),
            Payload::ExportSection(reader) => self.export_section(reader, size),
            Payload::StartSection { func, .. } => {
                self.emit(Event::BeginStartSection { size })?;
                self.emit(Event::StartFunction { func_index: func })?;
                self.emit(Event::EndStartSection)
            }
            Payload::ElementSection(reader) => self.element_section(reader, size),
            Payload::DataCountSection { count, .. } => {
                self.emit(Event::BeginDataCountSection { size })?;
                self.emit(Event::DataCount { count })?;
                self.emit(Event::EndDataCountSection)
            }
            Payload::DataSection(reader) => self.data_section(reader, size),
            Payload::CodeSectionStart { count, .. } => {
                self.emit(Event::BeginCodeSection { size })?;
                self.emit(Event::FunctionBodyCount { count })?;
                self.code.remaining = count;
                if count == 0 {
                    self.emit(Event::EndCodeSection)?;
                }
                Ok(())
            }
            Payload::CodeSectionEntry(body) => self.function_body(body),
            Payload::CustomSection(reader) => self.custom_section(reader, size),
            Payload::UnknownSection { id, range, .. } => Err(DecodeError::unsupported(
                range.start,
                format_args!("section id {}", id),
            )),
            Payload::End(_) => self.emit(Event::EndModule),
            _ => Err(DecodeError::unsupported(start, "component section")),
        }
    }

    fn type_section(&mut self, reader: TypeSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginTypeSection { size })?;
        self.emit(Event::TypeCount {
            count: reader.count(),
        })?;
        for func_type in reader.into_iter_err_on_gc_types() {
            let func_type = func_type?;
            let params: Vec<Type> = func_type
                .params()
                .iter()
                .map(|ty| convert::val_type(*ty))
                .collect();
            let results: Vec<Type> = func_type
                .results()
                .iter()
                .map(|ty| convert::val_type(*ty))
                .collect();
            let index = self.spaces.types;
            self.spaces.types += 1;
            self.emit(Event::Type {
                index,
                params: &params,
                results: &results,
            })?;
        }
        self.emit(Event::EndTypeSection)
    }

    fn import_section(&mut self, reader: ImportSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginImportSection { size })?;
        self.emit(Event::ImportCount {
            count: reader.count(),
        })?;
        let start = reader.range().start;
        for (import_index, import) in (0..).zip(reader) {
            let import = import?;
            let (module, field) = (import.module, import.name);
            self.emit(Event::Import {
                index: import_index,
                module,
                field,
            })?;

            let event = match import.ty {
                TypeRef::Func(sig_index) => {
                    let func_index = self.spaces.funcs;
                    self.spaces.funcs += 1;
                    self.spaces.imported_funcs += 1;
                    Event::ImportFunc {
                        import_index,
                        module,
                        field,
                        func_index,
                        sig_index,
                    }
                }
                TypeRef::Table(ty) => {
                    let table_index = self.spaces.tables;
                    self.spaces.tables += 1;
                    Event::ImportTable {
                        import_index,
                        module,
                        field,
                        table_index,
                        elem_type: convert::ref_type(ty.element_type),
                        limits: convert::table_limits(&ty),
                    }
                }
                TypeRef::Memory(ty) => {
                    let memory_index = self.spaces.memories;
                    self.spaces.memories += 1;
                    Event::ImportMemory {
                        import_index,
                        module,
                        field,
                        memory_index,
                        limits: convert::memory_limits(&ty),
                    }
                }
                TypeRef::Global(ty) => {
                    let global_index = self.spaces.globals;
                    self.spaces.globals += 1;
                    Event::ImportGlobal {
                        import_index,
                        module,
                        field,
                        global_index,
                        ty: convert::val_type(ty.content_type),
                        mutable: ty.mutable,
                    }
                }
                TypeRef::Tag(ty) => {
                    let tag_index = self.spaces.tags;
                    self.spaces.tags += 1;
                    Event::ImportTag {
                        import_index,
                        module,
                        field,
                        tag_index,
                        sig_index: ty.func_type_idx,
                    }
                }
                #[allow(unreachable_patterns)]
                _ => return Err(DecodeError::unsupported(start, "import kind")),
            };
            self.emit(event)?;
        }
        self.emit(Event::EndImportSection)
    }

    fn function_section(
        &mut self,
        reader: FunctionSectionReader<'_>,
        size: usize,
    ) -> ReadResult<V> {
        self.emit(Event::BeginFunctionSection { size })?;
        self.emit(Event::FunctionCount {
            count: reader.count(),
        })?;
        for sig_index in reader {
            let sig_index = sig_index?;
            let index = self.spaces.funcs;
            self.spaces.funcs += 1;
            self.emit(Event::Function { index, sig_index })?;
        }
        self.emit(Event::EndFunctionSection)
    }

    fn table_section(&mut self, reader: TableSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginTableSection { size })?;
        self.emit(Event::TableCount {
            count: reader.count(),
        })?;
        for table in reader {
            let table = table?;
            let index = self.spaces.tables;
            self.spaces.tables += 1;
            self.emit(Event::Table {
                index,
                elem_type: convert::ref_type(table.ty.element_type),
                limits: convert::table_limits(&table.ty),
            })?;
        }
        self.emit(Event::EndTableSection)
    }

    fn memory_section(&mut self, reader: MemorySectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginMemorySection { size })?;
        self.emit(Event::MemoryCount {
            count: reader.count(),
        })?;
        for memory in reader {
            let memory = memory?;
            let index = self.spaces.memories;
            self.spaces.memories += 1;
            self.emit(Event::Memory {
                index,
                limits: convert::memory_limits(&memory),
            })?;
        }
        self.emit(Event::EndMemorySection)
    }

    fn tag_section(&mut self, reader: TagSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginTagSection { size })?;
        self.emit(Event::TagCount {
            count: reader.count(),
        })?;
        for tag in reader {
            let tag = tag?;
            let index = self.spaces.tags;
            self.spaces.tags += 1;
            self.emit(Event::TagType {
                index,
                sig_index: tag.func_type_idx,
            })?;
        }
        self.emit(Event::EndTagSection)
    }

    fn global_section(&mut self, reader: GlobalSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginGlobalSection { size })?;
        self.emit(Event::GlobalCount {
            count: reader.count(),
        })?;
        for global in reader {
            let global = global?;
            let index = self.spaces.globals;
            self.spaces.globals += 1;
            self.emit(Event::BeginGlobal {
                index,
                ty: convert::val_type(global.ty.content_type),
                mutable: global.ty.mutable,
            })?;
            self.emit(Event::BeginGlobalInitExpr { index })?;
            self.init_expr(index, &global.init_expr)?;
            self.emit(Event::EndGlobalInitExpr { index })?;
            self.emit(Event::EndGlobal { index })?;
        }
        self.emit(Event::EndGlobalSection)
    }

    fn export_section(&mut self, reader: ExportSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginExportSection { size })?;
        self.emit(Event::ExportCount {
            count: reader.count(),
        })?;
        let start = reader.range().start;
        for (index, export) in (0..).zip(reader) {
            let export = export?;
            let kind = convert::external_kind(export.kind)
                .ok_or_else(|| DecodeError::unsupported(start, "export kind"))?;
            self.emit(Event::Export {
                index,
                kind,
                item_index: export.index,
                name: export.name,
            })?;
        }
        self.emit(Event::EndExportSection)
    }

    fn element_section(
        &mut self,
        reader: ElementSectionReader<'_>,
        size: usize,
    ) -> ReadResult<V> {
        self.emit(Event::BeginElemSection { size })?;
        self.emit(Event::ElemSegmentCount {
            count: reader.count(),
        })?;
        for (index, element) in (0..).zip(reader) {
            let element = element?;
            let (table_index, passive, offset_expr) = match element.kind {
                ElementKind::Active {
                    table_index,
                    offset_expr,
                } => (table_index.unwrap_or(0), false, Some(offset_expr)),
                ElementKind::Passive | ElementKind::Declared => (0, true, None),
            };
            let elem_type = match &element.items {
                ElementItems::Functions(_) => Type::FuncRef,
                ElementItems::Expressions(ty, _) => convert::ref_type(*ty),
            };

            self.emit(Event::BeginElemSegment {
                index,
                table_index,
                passive,
                elem_type,
            })?;
            if let Some(expr) = offset_expr {
                self.emit(Event::BeginElemSegmentInitExpr { index })?;
                self.init_expr(index, &expr)?;
                self.emit(Event::EndElemSegmentInitExpr { index })?;
            }

            match element.items {
                ElementItems::Functions(funcs) => {
                    self.emit(Event::ElemSegmentElemExprCount {
                        index,
                        count: funcs.count(),
                    })?;
                    for func_index in funcs {
                        self.emit(Event::ElemSegmentElemExprRefFunc {
                            index,
                            func_index: func_index?,
                        })?;
                    }
                }
                ElementItems::Expressions(_, exprs) => {
                    self.emit(Event::ElemSegmentElemExprCount {
                        index,
                        count: exprs.count(),
                    })?;
                    for expr in exprs {
                        self.elem_expr(index, &expr?)?;
                    }
                }
            }
            self.emit(Event::EndElemSegment { index })?;
        }
        self.emit(Event::EndElemSection)
    }

    fn data_section(&mut self, reader: DataSectionReader<'_>, size: usize) -> ReadResult<V> {
        self.emit(Event::BeginDataSection { size })?;
        self.emit(Event::DataSegmentCount {
            count: reader.count(),
        })?;
        for (index, data) in (0..).zip(reader) {
            let data = data?;
            match data.kind {
                DataKind::Active {
                    memory_index,
                    offset_expr,
                } => {
                    self.emit(Event::BeginDataSegment {
                        index,
                        memory_index,
                        passive: false,
                    })?;
                    self.emit(Event::BeginDataSegmentInitExpr { index })?;
                    self.init_expr(index, &offset_expr)?;
                    self.emit(Event::EndDataSegmentInitExpr { index })?;
                }
                DataKind::Passive => {
                    self.emit(Event::BeginDataSegment {
                        index,
                        memory_index: 0,
                        passive: true,
                    })?;
                }
            }
            self.emit(Event::DataSegmentData {
                index,
                data: data.data,
            })?;
            self.emit(Event::EndDataSegment { index })?;
        }
        self.emit(Event::EndDataSection)
    }

    fn custom_section(&mut self, reader: CustomSectionReader<'_>, size: usize) -> ReadResult<V> {
        let name = reader.name();
        self.emit(Event::BeginCustomSection { name, size })?;

        if self.options.read_debug_names
            && let KnownCustom::Name(names) = reader.as_known()
        {
            self.emit(Event::BeginNamesSection {
                size: reader.data().len(),
            })?;
            let result = self.names_section(names);
            self.custom_section_result(name, result)?;
            self.emit(Event::EndNamesSection)?;
        }

        self.emit(Event::EndCustomSection)
    }

    /// Downgrade a malformed custom section to a warning unless configured
    /// to fail
    fn custom_section_result(&self, name: &str, result: ReadResult<V>) -> ReadResult<V> {
        match result {
            Err(DecodeError::Malformed { offset, message })
                if !self.options.fail_on_custom_section_error =>
            {
                tracing::warn!(
                    section = name,
                    offset,
                    "skipping rest of malformed custom section: {}",
                    message
                );
                Ok(())
            }
            other => other,
        }
    }
}
