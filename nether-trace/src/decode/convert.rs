//! Conversions from `wasmparser` descriptors to event values

use wasmparser::{
    AbstractHeapType, BlockType, HeapType, MemoryType, RefType, TableType, ValType,
};

use crate::types::{ExternalKind, Limits, Type};

pub(super) fn val_type(ty: ValType) -> Type {
    match ty {
        ValType::I32 => Type::I32,
        ValType::I64 => Type::I64,
        ValType::F32 => Type::F32,
        ValType::F64 => Type::F64,
        ValType::V128 => Type::V128,
        ValType::Ref(ty) => ref_type(ty),
    }
}

/// Reference types outside funcref/externref/exnref collapse to `anyref`
pub(super) fn ref_type(ty: RefType) -> Type {
    heap_type(ty.heap_type())
}

pub(super) fn heap_type(ty: HeapType) -> Type {
    match ty {
        HeapType::Abstract { ty, .. } => match ty {
            AbstractHeapType::Func => Type::FuncRef,
            AbstractHeapType::Extern => Type::ExternRef,
            AbstractHeapType::Exn => Type::ExnRef,
            _ => Type::AnyRef,
        },
        _ => Type::AnyRef,
    }
}

pub(super) fn block_type(ty: BlockType) -> Type {
    match ty {
        BlockType::Empty => Type::Void,
        BlockType::Type(ty) => val_type(ty),
        BlockType::FuncType(index) => Type::FuncIndex(index),
    }
}

pub(super) fn external_kind(kind: wasmparser::ExternalKind) -> Option<ExternalKind> {
    match kind {
        wasmparser::ExternalKind::Func => Some(ExternalKind::Func),
        wasmparser::ExternalKind::Table => Some(ExternalKind::Table),
        wasmparser::ExternalKind::Memory => Some(ExternalKind::Memory),
        wasmparser::ExternalKind::Global => Some(ExternalKind::Global),
        wasmparser::ExternalKind::Tag => Some(ExternalKind::Tag),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

pub(super) fn table_limits(ty: &TableType) -> Limits {
    Limits {
        initial: ty.initial,
        max: ty.maximum,
        shared: ty.shared,
        is_64: ty.table64,
    }
}

pub(super) fn memory_limits(ty: &MemoryType) -> Limits {
    Limits {
        initial: ty.initial,
        max: ty.maximum,
        shared: ty.shared,
        is_64: ty.memory64,
    }
}
