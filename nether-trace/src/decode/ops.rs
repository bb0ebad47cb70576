//! Opcode table for operators that map onto a shared event family
//!
//! Control flow, variable access, constants and the bulk memory / table
//! operators carry their own events and are lowered in `code.rs`. Everything
//! listed here is reported as `Opcode`, a routing event for its immediates and
//! one family event (`OnBinaryExpr`, `OnLoadExpr`, ...).

use wasmparser::{MemArg, Operator};

use crate::types::Opcode;

/// Event family of an operator without immediates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Numeric {
    Unary,
    Binary,
    Compare,
    Convert,
    Ternary,
}

/// Event family of an operator with a memarg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Access {
    Load,
    Store,
    AtomicLoad,
    AtomicStore,
    AtomicRmw,
    AtomicRmwCmpxchg,
    AtomicWait,
    AtomicNotify,
}

/// A table operator with its immediates
#[derive(Debug, Clone, Copy)]
pub(super) enum TableOp {
    Bare(Numeric, Opcode),
    Memory(Access, Opcode, MemArg),
    Lane(Opcode, u8),
}

const fn fc(sub: u32) -> u32 {
    0xfc00 | sub
}

const fn fd(sub: u32) -> u32 {
    0xfd00 | sub
}

const fn fe(sub: u32) -> u32 {
    0xfe00 | sub
}

macro_rules! opcode_table {
    (
        bare { $($b:ident => $bf:ident, $bn:literal, $bc:expr;)* }
        memory { $($m:ident => $mf:ident, $mn:literal, $mc:expr;)* }
        lane { $($l:ident => $ln:literal, $lc:expr;)* }
    ) => {
        /// Look up a table operator, `None` for anything lowered elsewhere
        pub(super) fn lookup(op: &Operator<'_>) -> Option<TableOp> {
            Some(match *op {
                $(Operator::$b { .. } => TableOp::Bare(Numeric::$bf, Opcode::new($bn, $bc)),)*
                $(Operator::$m { memarg } => TableOp::Memory(Access::$mf, Opcode::new($mn, $mc), memarg),)*
                $(Operator::$l { lane } => TableOp::Lane(Opcode::new($ln, $lc), lane),)*
                _ => return None,
            })
        }
    };
}

opcode_table! {
    bare {
        // i32 tests and comparisons
        I32Eqz => Convert, "i32.eqz", 0x45;
        I32Eq => Compare, "i32.eq", 0x46;
        I32Ne => Compare, "i32.ne", 0x47;
        I32LtS => Compare, "i32.lt_s", 0x48;
        I32LtU => Compare, "i32.lt_u", 0x49;
        I32GtS => Compare, "i32.gt_s", 0x4a;
        I32GtU => Compare, "i32.gt_u", 0x4b;
        I32LeS => Compare, "i32.le_s", 0x4c;
        I32LeU => Compare, "i32.le_u", 0x4d;
        I32GeS => Compare, "i32.ge_s", 0x4e;
        I32GeU => Compare, "i32.ge_u", 0x4f;

        // i64 tests and comparisons
        I64Eqz => Convert, "i64.eqz", 0x50;
        I64Eq => Compare, "i64.eq", 0x51;
        I64Ne => Compare, "i64.ne", 0x52;
        I64LtS => Compare, "i64.lt_s", 0x53;
        I64LtU => Compare, "i64.lt_u", 0x54;
        I64GtS => Compare, "i64.gt_s", 0x55;
        I64GtU => Compare, "i64.gt_u", 0x56;
        I64LeS => Compare, "i64.le_s", 0x57;
        I64LeU => Compare, "i64.le_u", 0x58;
        I64GeS => Compare, "i64.ge_s", 0x59;
        I64GeU => Compare, "i64.ge_u", 0x5a;

        // float comparisons
        F32Eq => Compare, "f32.eq", 0x5b;
        F32Ne => Compare, "f32.ne", 0x5c;
        F32Lt => Compare, "f32.lt", 0x5d;
        F32Gt => Compare, "f32.gt", 0x5e;
        F32Le => Compare, "f32.le", 0x5f;
        F32Ge => Compare, "f32.ge", 0x60;
        F64Eq => Compare, "f64.eq", 0x61;
        F64Ne => Compare, "f64.ne", 0x62;
        F64Lt => Compare, "f64.lt", 0x63;
        F64Gt => Compare, "f64.gt", 0x64;
        F64Le => Compare, "f64.le", 0x65;
        F64Ge => Compare, "f64.ge", 0x66;

        // i32 arithmetic
        I32Clz => Unary, "i32.clz", 0x67;
        I32Ctz => Unary, "i32.ctz", 0x68;
        I32Popcnt => Unary, "i32.popcnt", 0x69;
        I32Add => Binary, "i32.add", 0x6a;
        I32Sub => Binary, "i32.sub", 0x6b;
        I32Mul => Binary, "i32.mul", 0x6c;
        I32DivS => Binary, "i32.div_s", 0x6d;
        I32DivU => Binary, "i32.div_u", 0x6e;
        I32RemS => Binary, "i32.rem_s", 0x6f;
        I32RemU => Binary, "i32.rem_u", 0x70;
        I32And => Binary, "i32.and", 0x71;
        I32Or => Binary, "i32.or", 0x72;
        I32Xor => Binary, "i32.xor", 0x73;
        I32Shl => Binary, "i32.shl", 0x74;
        I32ShrS => Binary, "i32.shr_s", 0x75;
        I32ShrU => Binary, "i32.shr_u", 0x76;
        I32Rotl => Binary, "i32.rotl", 0x77;
        I32Rotr => Binary, "i32.rotr", 0x78;

        // i64 arithmetic
        I64Clz => Unary, "i64.clz", 0x79;
        I64Ctz => Unary, "i64.ctz", 0x7a;
        I64Popcnt => Unary, "i64.popcnt", 0x7b;
        I64Add => Binary, "i64.add", 0x7c;
        I64Sub => Binary, "i64.sub", 0x7d;
        I64Mul => Binary, "i64.mul", 0x7e;
        I64DivS => Binary, "i64.div_s", 0x7f;
        I64DivU => Binary, "i64.div_u", 0x80;
        I64RemS => Binary, "i64.rem_s", 0x81;
        I64RemU => Binary, "i64.rem_u", 0x82;
        I64And => Binary, "i64.and", 0x83;
        I64Or => Binary, "i64.or", 0x84;
        I64Xor => Binary, "i64.xor", 0x85;
        I64Shl => Binary, "i64.shl", 0x86;
        I64ShrS => Binary, "i64.shr_s", 0x87;
        I64ShrU => Binary, "i64.shr_u", 0x88;
        I64Rotl => Binary, "i64.rotl", 0x89;
        I64Rotr => Binary, "i64.rotr", 0x8a;

        // f32 arithmetic
        F32Abs => Unary, "f32.abs", 0x8b;
        F32Neg => Unary, "f32.neg", 0x8c;
        F32Ceil => Unary, "f32.ceil", 0x8d;
        F32Floor => Unary, "f32.floor", 0x8e;
        F32Trunc => Unary, "f32.trunc", 0x8f;
        F32Nearest => Unary, "f32.nearest", 0x90;
        F32Sqrt => Unary, "f32.sqrt", 0x91;
        F32Add => Binary, "f32.add", 0x92;
        F32Sub => Binary, "f32.sub", 0x93;
        F32Mul => Binary, "f32.mul", 0x94;
        F32Div => Binary, "f32.div", 0x95;
        F32Min => Binary, "f32.min", 0x96;
        F32Max => Binary, "f32.max", 0x97;
        F32Copysign => Binary, "f32.copysign", 0x98;

        // f64 arithmetic
        F64Abs => Unary, "f64.abs", 0x99;
        F64Neg => Unary, "f64.neg", 0x9a;
        F64Ceil => Unary, "f64.ceil", 0x9b;
        F64Floor => Unary, "f64.floor", 0x9c;
        F64Trunc => Unary, "f64.trunc", 0x9d;
        F64Nearest => Unary, "f64.nearest", 0x9e;
        F64Sqrt => Unary, "f64.sqrt", 0x9f;
        F64Add => Binary, "f64.add", 0xa0;
        F64Sub => Binary, "f64.sub", 0xa1;
        F64Mul => Binary, "f64.mul", 0xa2;
        F64Div => Binary, "f64.div", 0xa3;
        F64Min => Binary, "f64.min", 0xa4;
        F64Max => Binary, "f64.max", 0xa5;
        F64Copysign => Binary, "f64.copysign", 0xa6;

        // conversions
        I32WrapI64 => Convert, "i32.wrap_i64", 0xa7;
        I32TruncF32S => Convert, "i32.trunc_f32_s", 0xa8;
        I32TruncF32U => Convert, "i32.trunc_f32_u", 0xa9;
        I32TruncF64S => Convert, "i32.trunc_f64_s", 0xaa;
        I32TruncF64U => Convert, "i32.trunc_f64_u", 0xab;
        I64ExtendI32S => Convert, "i64.extend_i32_s", 0xac;
        I64ExtendI32U => Convert, "i64.extend_i32_u", 0xad;
        I64TruncF32S => Convert, "i64.trunc_f32_s", 0xae;
        I64TruncF32U => Convert, "i64.trunc_f32_u", 0xaf;
        I64TruncF64S => Convert, "i64.trunc_f64_s", 0xb0;
        I64TruncF64U => Convert, "i64.trunc_f64_u", 0xb1;
        F32ConvertI32S => Convert, "f32.convert_i32_s", 0xb2;
        F32ConvertI32U => Convert, "f32.convert_i32_u", 0xb3;
        F32ConvertI64S => Convert, "f32.convert_i64_s", 0xb4;
        F32ConvertI64U => Convert, "f32.convert_i64_u", 0xb5;
        F32DemoteF64 => Convert, "f32.demote_f64", 0xb6;
        F64ConvertI32S => Convert, "f64.convert_i32_s", 0xb7;
        F64ConvertI32U => Convert, "f64.convert_i32_u", 0xb8;
        F64ConvertI64S => Convert, "f64.convert_i64_s", 0xb9;
        F64ConvertI64U => Convert, "f64.convert_i64_u", 0xba;
        F64PromoteF32 => Convert, "f64.promote_f32", 0xbb;
        I32ReinterpretF32 => Convert, "i32.reinterpret_f32", 0xbc;
        I64ReinterpretF64 => Convert, "i64.reinterpret_f64", 0xbd;
        F32ReinterpretI32 => Convert, "f32.reinterpret_i32", 0xbe;
        F64ReinterpretI64 => Convert, "f64.reinterpret_i64", 0xbf;

        // sign extension
        I32Extend8S => Unary, "i32.extend8_s", 0xc0;
        I32Extend16S => Unary, "i32.extend16_s", 0xc1;
        I64Extend8S => Unary, "i64.extend8_s", 0xc2;
        I64Extend16S => Unary, "i64.extend16_s", 0xc3;
        I64Extend32S => Unary, "i64.extend32_s", 0xc4;

        // saturating truncation
        I32TruncSatF32S => Convert, "i32.trunc_sat_f32_s", fc(0x00);
        I32TruncSatF32U => Convert, "i32.trunc_sat_f32_u", fc(0x01);
        I32TruncSatF64S => Convert, "i32.trunc_sat_f64_s", fc(0x02);
        I32TruncSatF64U => Convert, "i32.trunc_sat_f64_u", fc(0x03);
        I64TruncSatF32S => Convert, "i64.trunc_sat_f32_s", fc(0x04);
        I64TruncSatF32U => Convert, "i64.trunc_sat_f32_u", fc(0x05);
        I64TruncSatF64S => Convert, "i64.trunc_sat_f64_s", fc(0x06);
        I64TruncSatF64U => Convert, "i64.trunc_sat_f64_u", fc(0x07);

        // simd
        I8x16Swizzle => Binary, "i8x16.swizzle", fd(0x0e);
        I8x16Splat => Unary, "i8x16.splat", fd(0x0f);
        I16x8Splat => Unary, "i16x8.splat", fd(0x10);
        I32x4Splat => Unary, "i32x4.splat", fd(0x11);
        I64x2Splat => Unary, "i64x2.splat", fd(0x12);
        F32x4Splat => Unary, "f32x4.splat", fd(0x13);
        F64x2Splat => Unary, "f64x2.splat", fd(0x14);
        I8x16Eq => Compare, "i8x16.eq", fd(0x23);
        I8x16Ne => Compare, "i8x16.ne", fd(0x24);
        I16x8Eq => Compare, "i16x8.eq", fd(0x2d);
        I16x8Ne => Compare, "i16x8.ne", fd(0x2e);
        I32x4Eq => Compare, "i32x4.eq", fd(0x37);
        I32x4Ne => Compare, "i32x4.ne", fd(0x38);
        F32x4Eq => Compare, "f32x4.eq", fd(0x41);
        F32x4Ne => Compare, "f32x4.ne", fd(0x42);
        F64x2Eq => Compare, "f64x2.eq", fd(0x47);
        F64x2Ne => Compare, "f64x2.ne", fd(0x48);
        V128Not => Unary, "v128.not", fd(0x4d);
        V128And => Binary, "v128.and", fd(0x4e);
        V128AndNot => Binary, "v128.andnot", fd(0x4f);
        V128Or => Binary, "v128.or", fd(0x50);
        V128Xor => Binary, "v128.xor", fd(0x51);
        V128Bitselect => Ternary, "v128.bitselect", fd(0x52);
        V128AnyTrue => Unary, "v128.any_true", fd(0x53);
        I8x16Add => Binary, "i8x16.add", fd(0x6e);
        I8x16Sub => Binary, "i8x16.sub", fd(0x71);
        I16x8Add => Binary, "i16x8.add", fd(0x8e);
        I16x8Sub => Binary, "i16x8.sub", fd(0x91);
        I16x8Mul => Binary, "i16x8.mul", fd(0x95);
        I32x4Add => Binary, "i32x4.add", fd(0xae);
        I32x4Sub => Binary, "i32x4.sub", fd(0xb1);
        I32x4Mul => Binary, "i32x4.mul", fd(0xb5);
        I64x2Add => Binary, "i64x2.add", fd(0xce);
        I64x2Sub => Binary, "i64x2.sub", fd(0xd1);
        I64x2Mul => Binary, "i64x2.mul", fd(0xd5);
        F32x4Add => Binary, "f32x4.add", fd(0xe4);
        F32x4Sub => Binary, "f32x4.sub", fd(0xe5);
        F32x4Mul => Binary, "f32x4.mul", fd(0xe6);
        F32x4Div => Binary, "f32x4.div", fd(0xe7);
        F64x2Add => Binary, "f64x2.add", fd(0xf0);
        F64x2Sub => Binary, "f64x2.sub", fd(0xf1);
        F64x2Mul => Binary, "f64x2.mul", fd(0xf2);
        F64x2Div => Binary, "f64x2.div", fd(0xf3);
    }
    memory {
        I32Load => Load, "i32.load", 0x28;
        I64Load => Load, "i64.load", 0x29;
        F32Load => Load, "f32.load", 0x2a;
        F64Load => Load, "f64.load", 0x2b;
        I32Load8S => Load, "i32.load8_s", 0x2c;
        I32Load8U => Load, "i32.load8_u", 0x2d;
        I32Load16S => Load, "i32.load16_s", 0x2e;
        I32Load16U => Load, "i32.load16_u", 0x2f;
        I64Load8S => Load, "i64.load8_s", 0x30;
        I64Load8U => Load, "i64.load8_u", 0x31;
        I64Load16S => Load, "i64.load16_s", 0x32;
        I64Load16U => Load, "i64.load16_u", 0x33;
        I64Load32S => Load, "i64.load32_s", 0x34;
        I64Load32U => Load, "i64.load32_u", 0x35;
        I32Store => Store, "i32.store", 0x36;
        I64Store => Store, "i64.store", 0x37;
        F32Store => Store, "f32.store", 0x38;
        F64Store => Store, "f64.store", 0x39;
        I32Store8 => Store, "i32.store8", 0x3a;
        I32Store16 => Store, "i32.store16", 0x3b;
        I64Store8 => Store, "i64.store8", 0x3c;
        I64Store16 => Store, "i64.store16", 0x3d;
        I64Store32 => Store, "i64.store32", 0x3e;
        V128Load => Load, "v128.load", fd(0x00);
        V128Store => Store, "v128.store", fd(0x0b);

        // threads
        MemoryAtomicNotify => AtomicNotify, "memory.atomic.notify", fe(0x00);
        MemoryAtomicWait32 => AtomicWait, "memory.atomic.wait32", fe(0x01);
        MemoryAtomicWait64 => AtomicWait, "memory.atomic.wait64", fe(0x02);
        I32AtomicLoad => AtomicLoad, "i32.atomic.load", fe(0x10);
        I64AtomicLoad => AtomicLoad, "i64.atomic.load", fe(0x11);
        I32AtomicLoad8U => AtomicLoad, "i32.atomic.load8_u", fe(0x12);
        I32AtomicLoad16U => AtomicLoad, "i32.atomic.load16_u", fe(0x13);
        I64AtomicLoad8U => AtomicLoad, "i64.atomic.load8_u", fe(0x14);
        I64AtomicLoad16U => AtomicLoad, "i64.atomic.load16_u", fe(0x15);
        I64AtomicLoad32U => AtomicLoad, "i64.atomic.load32_u", fe(0x16);
        I32AtomicStore => AtomicStore, "i32.atomic.store", fe(0x17);
        I64AtomicStore => AtomicStore, "i64.atomic.store", fe(0x18);
        I32AtomicStore8 => AtomicStore, "i32.atomic.store8", fe(0x19);
        I32AtomicStore16 => AtomicStore, "i32.atomic.store16", fe(0x1a);
        I64AtomicStore8 => AtomicStore, "i64.atomic.store8", fe(0x1b);
        I64AtomicStore16 => AtomicStore, "i64.atomic.store16", fe(0x1c);
        I64AtomicStore32 => AtomicStore, "i64.atomic.store32", fe(0x1d);
        I32AtomicRmwAdd => AtomicRmw, "i32.atomic.rmw.add", fe(0x1e);
        I64AtomicRmwAdd => AtomicRmw, "i64.atomic.rmw.add", fe(0x1f);
        I32AtomicRmwSub => AtomicRmw, "i32.atomic.rmw.sub", fe(0x25);
        I64AtomicRmwSub => AtomicRmw, "i64.atomic.rmw.sub", fe(0x26);
        I32AtomicRmwAnd => AtomicRmw, "i32.atomic.rmw.and", fe(0x2c);
        I64AtomicRmwAnd => AtomicRmw, "i64.atomic.rmw.and", fe(0x2d);
        I32AtomicRmwOr => AtomicRmw, "i32.atomic.rmw.or", fe(0x33);
        I64AtomicRmwOr => AtomicRmw, "i64.atomic.rmw.or", fe(0x34);
        I32AtomicRmwXor => AtomicRmw, "i32.atomic.rmw.xor", fe(0x3a);
        I64AtomicRmwXor => AtomicRmw, "i64.atomic.rmw.xor", fe(0x3b);
        I32AtomicRmwXchg => AtomicRmw, "i32.atomic.rmw.xchg", fe(0x41);
        I64AtomicRmwXchg => AtomicRmw, "i64.atomic.rmw.xchg", fe(0x42);
        I32AtomicRmwCmpxchg => AtomicRmwCmpxchg, "i32.atomic.rmw.cmpxchg", fe(0x48);
        I64AtomicRmwCmpxchg => AtomicRmwCmpxchg, "i64.atomic.rmw.cmpxchg", fe(0x49);
    }
    lane {
        I8x16ExtractLaneS => "i8x16.extract_lane_s", fd(0x15);
        I8x16ExtractLaneU => "i8x16.extract_lane_u", fd(0x16);
        I8x16ReplaceLane => "i8x16.replace_lane", fd(0x17);
        I16x8ExtractLaneS => "i16x8.extract_lane_s", fd(0x18);
        I16x8ExtractLaneU => "i16x8.extract_lane_u", fd(0x19);
        I16x8ReplaceLane => "i16x8.replace_lane", fd(0x1a);
        I32x4ExtractLane => "i32x4.extract_lane", fd(0x1b);
        I32x4ReplaceLane => "i32x4.replace_lane", fd(0x1c);
        I64x2ExtractLane => "i64x2.extract_lane", fd(0x1d);
        I64x2ReplaceLane => "i64x2.replace_lane", fd(0x1e);
        F32x4ExtractLane => "f32x4.extract_lane", fd(0x1f);
        F32x4ReplaceLane => "f32x4.replace_lane", fd(0x20);
        F64x2ExtractLane => "f64x2.extract_lane", fd(0x21);
        F64x2ReplaceLane => "f64x2.replace_lane", fd(0x22);
    }
}
