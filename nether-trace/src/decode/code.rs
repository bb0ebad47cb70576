//! Function bodies and constant expressions

use wasmparser::{ConstExpr, FunctionBody, Operator};

use super::convert;
use super::ops::{self, Access, Numeric, TableOp};
use super::{DecodeError, ModuleReader, ReadResult};
use crate::event::Event;
use crate::types::{Index, Opcode, V128};
use crate::visitor::Visitor;

impl<V: Visitor + ?Sized> ModuleReader<'_, V> {
    pub(super) fn function_body(&mut self, body: FunctionBody<'_>) -> ReadResult<V> {
        let index = self.spaces.imported_funcs + self.code.next_body;
        self.code.next_body += 1;

        self.emit(Event::BeginFunctionBody {
            index,
            size: body.range().len(),
        })?;

        let locals = body.get_locals_reader()?;
        self.emit(Event::LocalDeclCount {
            count: locals.get_count(),
        })?;
        for (decl_index, local) in (0..).zip(locals) {
            let (count, ty) = local?;
            self.emit(Event::LocalDecl {
                decl_index,
                count,
                ty: convert::val_type(ty),
            })?;
        }

        // Open control frames, counting the body itself
        let mut frames = 1usize;
        for item in body.get_operators_reader()?.into_iter_with_offsets() {
            let (op, offset) = item?;
            if frames == 0 {
                return Err(DecodeError::malformed(offset, "operators after end of function"));
            }
            // `delegate` closes its `try` like `end` does
            match op {
                Operator::Block { .. }
                | Operator::Loop { .. }
                | Operator::If { .. }
                | Operator::Try { .. }
                | Operator::TryTable { .. } => frames += 1,
                Operator::End | Operator::Delegate { .. } => frames -= 1,
                _ => {}
            }
            if frames == 0 {
                if !matches!(op, Operator::End) {
                    return Err(DecodeError::malformed(offset, "delegate outside of try"));
                }
                self.emit(Event::EndFunc)?;
            } else {
                self.operator(op, offset)?;
            }
        }

        self.emit(Event::EndFunctionBody { index })?;

        self.code.remaining = self.code.remaining.saturating_sub(1);
        if self.code.remaining == 0 {
            self.emit(Event::EndCodeSection)?;
        }
        Ok(())
    }

    /// Raw opcode, its immediates, then the typed event
    fn instr(&mut self, opcode: Opcode, immediates: Event<'_>, event: Event<'_>) -> ReadResult<V> {
        self.emit(Event::Opcode { opcode })?;
        self.emit(immediates)?;
        self.emit(event)
    }

    fn bare(&mut self, name: &'static str, code: u32, event: Event<'_>) -> ReadResult<V> {
        self.instr(Opcode::new(name, code), Event::OpcodeBare, event)
    }

    fn indexed(
        &mut self,
        name: &'static str,
        code: u32,
        index: Index,
        event: Event<'_>,
    ) -> ReadResult<V> {
        self.instr(Opcode::new(name, code), Event::OpcodeIndex { index }, event)
    }

    fn uint32(
        &mut self,
        name: &'static str,
        code: u32,
        value: u32,
        event: Event<'_>,
    ) -> ReadResult<V> {
        self.instr(Opcode::new(name, code), Event::OpcodeUint32 { value }, event)
    }

    fn uint32_pair(
        &mut self,
        name: &'static str,
        code: u32,
        (value, value2): (u32, u32),
        event: Event<'_>,
    ) -> ReadResult<V> {
        self.instr(
            Opcode::new(name, code),
            Event::OpcodeUint32Uint32 { value, value2 },
            event,
        )
    }

    fn table_operator(&mut self, op: TableOp) -> ReadResult<V> {
        match op {
            TableOp::Bare(family, opcode) => {
                let event = match family {
                    Numeric::Unary => Event::Unary { opcode },
                    Numeric::Binary => Event::Binary { opcode },
                    Numeric::Compare => Event::Compare { opcode },
                    Numeric::Convert => Event::Convert { opcode },
                    Numeric::Ternary => Event::Ternary { opcode },
                };
                self.instr(opcode, Event::OpcodeBare, event)
            }
            TableOp::Memory(family, opcode, memarg) => {
                let align_log2 = u32::from(memarg.align);
                let offset = memarg.offset;
                let event = match family {
                    Access::Load => Event::Load { opcode, align_log2, offset },
                    Access::Store => Event::Store { opcode, align_log2, offset },
                    Access::AtomicLoad => Event::AtomicLoad { opcode, align_log2, offset },
                    Access::AtomicStore => Event::AtomicStore { opcode, align_log2, offset },
                    Access::AtomicRmw => Event::AtomicRmw { opcode, align_log2, offset },
                    Access::AtomicRmwCmpxchg => {
                        Event::AtomicRmwCmpxchg { opcode, align_log2, offset }
                    }
                    Access::AtomicWait => Event::AtomicWait { opcode, align_log2, offset },
                    Access::AtomicNotify => Event::AtomicNotify { opcode, align_log2, offset },
                };
                let immediates = Event::OpcodeUint32Uint64 {
                    value: align_log2,
                    value2: offset,
                };
                self.instr(opcode, immediates, event)
            }
            TableOp::Lane(opcode, lane) => {
                let lane = u64::from(lane);
                self.instr(
                    opcode,
                    Event::OpcodeUint64 { value: lane },
                    Event::SimdLaneOp { opcode, lane },
                )
            }
        }
    }

    fn operator(&mut self, op: Operator<'_>, offset: usize) -> ReadResult<V> {
        if let Some(op) = ops::lookup(&op) {
            return self.table_operator(op);
        }

        match op {
            // control
            Operator::Unreachable => self.bare("unreachable", 0x00, Event::Unreachable),
            Operator::Nop => self.bare("nop", 0x01, Event::Nop),
            Operator::Block { blockty } => {
                let sig = convert::block_type(blockty);
                self.instr(
                    Opcode::new("block", 0x02),
                    Event::OpcodeBlockSig { sig },
                    Event::Block { sig },
                )
            }
            Operator::Loop { blockty } => {
                let sig = convert::block_type(blockty);
                self.instr(
                    Opcode::new("loop", 0x03),
                    Event::OpcodeBlockSig { sig },
                    Event::Loop { sig },
                )
            }
            Operator::If { blockty } => {
                let sig = convert::block_type(blockty);
                self.instr(
                    Opcode::new("if", 0x04),
                    Event::OpcodeBlockSig { sig },
                    Event::If { sig },
                )
            }
            Operator::Else => self.bare("else", 0x05, Event::Else),
            Operator::Try { blockty } => {
                let sig = convert::block_type(blockty);
                self.instr(
                    Opcode::new("try", 0x06),
                    Event::OpcodeBlockSig { sig },
                    Event::Try { sig },
                )
            }
            Operator::Catch { tag_index } => {
                self.indexed("catch", 0x07, tag_index, Event::Catch { tag_index })
            }
            Operator::Throw { tag_index } => {
                self.indexed("throw", 0x08, tag_index, Event::Throw { tag_index })
            }
            Operator::Rethrow { relative_depth } => self.indexed(
                "rethrow",
                0x09,
                relative_depth,
                Event::Rethrow {
                    depth: relative_depth,
                },
            ),
            Operator::End => self.bare("end", 0x0b, Event::End),
            Operator::Br { relative_depth } => self.indexed(
                "br",
                0x0c,
                relative_depth,
                Event::Br {
                    depth: relative_depth,
                },
            ),
            Operator::BrIf { relative_depth } => self.indexed(
                "br_if",
                0x0d,
                relative_depth,
                Event::BrIf {
                    depth: relative_depth,
                },
            ),
            Operator::BrTable { targets } => {
                let depths = targets.targets().collect::<Result<Vec<_>, _>>()?;
                self.emit(Event::Opcode {
                    opcode: Opcode::new("br_table", 0x0e),
                })?;
                self.emit(Event::BrTable {
                    targets: &depths,
                    default_target: targets.default(),
                })
            }
            Operator::Return => self.bare("return", 0x0f, Event::Return),
            Operator::Call { function_index } => self.indexed(
                "call",
                0x10,
                function_index,
                Event::Call {
                    func_index: function_index,
                },
            ),
            Operator::CallIndirect {
                type_index,
                table_index,
            } => self.instr(
                Opcode::new("call_indirect", 0x11),
                Event::OpcodeIndexIndex {
                    index: type_index,
                    index2: table_index,
                },
                Event::CallIndirect {
                    sig_index: type_index,
                    table_index,
                },
            ),
            Operator::ReturnCall { function_index } => self.indexed(
                "return_call",
                0x12,
                function_index,
                Event::ReturnCall {
                    func_index: function_index,
                },
            ),
            Operator::ReturnCallIndirect {
                type_index,
                table_index,
            } => self.instr(
                Opcode::new("return_call_indirect", 0x13),
                Event::OpcodeIndexIndex {
                    index: type_index,
                    index2: table_index,
                },
                Event::ReturnCallIndirect {
                    sig_index: type_index,
                    table_index,
                },
            ),
            Operator::Delegate { relative_depth } => self.indexed(
                "delegate",
                0x18,
                relative_depth,
                Event::Delegate {
                    depth: relative_depth,
                },
            ),
            Operator::CatchAll => self.bare("catch_all", 0x19, Event::CatchAll),

            // parametric
            Operator::Drop => self.bare("drop", 0x1a, Event::Drop),
            Operator::Select => self.bare("select", 0x1b, Event::Select),
            Operator::TypedSelect { .. } => self.bare("select", 0x1c, Event::Select),

            // variables
            Operator::LocalGet { local_index } => self.indexed(
                "local.get",
                0x20,
                local_index,
                Event::LocalGet { index: local_index },
            ),
            Operator::LocalSet { local_index } => self.indexed(
                "local.set",
                0x21,
                local_index,
                Event::LocalSet { index: local_index },
            ),
            Operator::LocalTee { local_index } => self.indexed(
                "local.tee",
                0x22,
                local_index,
                Event::LocalTee { index: local_index },
            ),
            Operator::GlobalGet { global_index } => self.indexed(
                "global.get",
                0x23,
                global_index,
                Event::GlobalGet {
                    index: global_index,
                },
            ),
            Operator::GlobalSet { global_index } => self.indexed(
                "global.set",
                0x24,
                global_index,
                Event::GlobalSet {
                    index: global_index,
                },
            ),

            // tables
            Operator::TableGet { table } => self.indexed(
                "table.get",
                0x25,
                table,
                Event::TableGet { table_index: table },
            ),
            Operator::TableSet { table } => self.indexed(
                "table.set",
                0x26,
                table,
                Event::TableSet { table_index: table },
            ),
            Operator::TableInit { elem_index, table } => self.uint32_pair(
                "table.init",
                0xfc0c,
                (elem_index, table),
                Event::TableInit {
                    segment: elem_index,
                },
            ),
            Operator::ElemDrop { elem_index } => self.uint32(
                "elem.drop",
                0xfc0d,
                elem_index,
                Event::ElemDrop {
                    segment: elem_index,
                },
            ),
            Operator::TableCopy {
                dst_table,
                src_table,
            } => self.uint32_pair(
                "table.copy",
                0xfc0e,
                (dst_table, src_table),
                Event::TableCopy,
            ),
            Operator::TableGrow { table } => self.uint32(
                "table.grow",
                0xfc0f,
                table,
                Event::TableGrow { table_index: table },
            ),
            Operator::TableSize { table } => self.uint32(
                "table.size",
                0xfc10,
                table,
                Event::TableSize { table_index: table },
            ),
            Operator::TableFill { table } => self.uint32(
                "table.fill",
                0xfc11,
                table,
                Event::TableFill { table_index: table },
            ),

            // memory
            Operator::MemorySize { mem } => {
                self.uint32("memory.size", 0x3f, mem, Event::MemorySize)
            }
            Operator::MemoryGrow { mem } => {
                self.uint32("memory.grow", 0x40, mem, Event::MemoryGrow)
            }
            Operator::MemoryInit { data_index, mem } => self.uint32_pair(
                "memory.init",
                0xfc08,
                (data_index, mem),
                Event::MemoryInit {
                    segment: data_index,
                },
            ),
            Operator::DataDrop { data_index } => self.uint32(
                "data.drop",
                0xfc09,
                data_index,
                Event::DataDrop {
                    segment: data_index,
                },
            ),
            Operator::MemoryCopy { dst_mem, src_mem } => self.uint32_pair(
                "memory.copy",
                0xfc0a,
                (dst_mem, src_mem),
                Event::MemoryCopy,
            ),
            Operator::MemoryFill { mem } => {
                self.uint32("memory.fill", 0xfc0b, mem, Event::MemoryFill)
            }

            // constants
            Operator::I32Const { value } => {
                let value = value as u32;
                self.uint32("i32.const", 0x41, value, Event::I32Const { value })
            }
            Operator::I64Const { value } => {
                let value = value as u64;
                self.instr(
                    Opcode::new("i64.const", 0x42),
                    Event::OpcodeUint64 { value },
                    Event::I64Const { value },
                )
            }
            Operator::F32Const { value } => {
                let bits = value.bits();
                self.instr(
                    Opcode::new("f32.const", 0x43),
                    Event::OpcodeF32 { bits },
                    Event::F32Const { bits },
                )
            }
            Operator::F64Const { value } => {
                let bits = value.bits();
                self.instr(
                    Opcode::new("f64.const", 0x44),
                    Event::OpcodeF64 { bits },
                    Event::F64Const { bits },
                )
            }
            Operator::V128Const { value } => {
                let value = V128::from_le_bytes(*value.bytes());
                self.instr(
                    Opcode::new("v128.const", 0xfd0c),
                    Event::OpcodeV128 { value },
                    Event::V128Const { value },
                )
            }
            Operator::I8x16Shuffle { lanes } => {
                let opcode = Opcode::new("i8x16.shuffle", 0xfd0d);
                let lanes = V128::from_le_bytes(lanes);
                self.instr(
                    opcode,
                    Event::OpcodeV128 { value: lanes },
                    Event::SimdShuffleOp { opcode, lanes },
                )
            }

            // references
            Operator::RefNull { .. } => self.bare("ref.null", 0xd0, Event::RefNull),
            Operator::RefIsNull => self.bare("ref.is_null", 0xd1, Event::RefIsNull),
            Operator::RefFunc { function_index } => self.indexed(
                "ref.func",
                0xd2,
                function_index,
                Event::RefFunc {
                    func_index: function_index,
                },
            ),

            other => Err(DecodeError::unsupported(
                offset,
                format_args!("operator {:?}", other),
            )),
        }
    }

    /// Constant expression of a global, element or data segment offset
    pub(super) fn init_expr(&mut self, index: Index, expr: &ConstExpr<'_>) -> ReadResult<V> {
        for item in expr.get_operators_reader().into_iter_with_offsets() {
            let (op, offset) = item?;
            let event = match op {
                Operator::I32Const { value } => Event::InitExprI32Const {
                    index,
                    value: value as u32,
                },
                Operator::I64Const { value } => Event::InitExprI64Const {
                    index,
                    value: value as u64,
                },
                Operator::F32Const { value } => Event::InitExprF32Const {
                    index,
                    bits: value.bits(),
                },
                Operator::F64Const { value } => Event::InitExprF64Const {
                    index,
                    bits: value.bits(),
                },
                Operator::V128Const { value } => Event::InitExprV128Const {
                    index,
                    value: V128::from_le_bytes(*value.bytes()),
                },
                Operator::GlobalGet { global_index } => Event::InitExprGlobalGet {
                    index,
                    global_index,
                },
                Operator::RefNull { hty } => Event::InitExprRefNull {
                    index,
                    ty: convert::heap_type(hty),
                },
                Operator::RefFunc { function_index } => Event::InitExprRefFunc {
                    index,
                    func_index: function_index,
                },
                Operator::End => break,
                other => {
                    return Err(DecodeError::unsupported(
                        offset,
                        format_args!("constant expression operator {:?}", other),
                    ));
                }
            };
            self.emit(event)?;
        }
        Ok(())
    }

    /// One item of an expression-encoded element segment
    pub(super) fn elem_expr(&mut self, index: Index, expr: &ConstExpr<'_>) -> ReadResult<V> {
        let mut ops = expr.get_operators_reader().into_iter_with_offsets();
        let (op, offset) = match ops.next() {
            Some(item) => item?,
            None => return Ok(()),
        };
        match op {
            Operator::RefNull { .. } => self.emit(Event::ElemSegmentElemExprRefNull { index }),
            Operator::RefFunc { function_index } => {
                self.emit(Event::ElemSegmentElemExprRefFunc {
                    index,
                    func_index: function_index,
                })
            }
            other => Err(DecodeError::unsupported(
                offset,
                format_args!("element expression {:?}", other),
            )),
        }
    }
}
