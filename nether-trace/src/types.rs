//! Value descriptors carried as event arguments

/// Index into one of the module's index spaces (types, functions, tables, ...)
pub type Index = u32;

/// Byte offset or byte length within the module being decoded
pub type Offset = usize;

/// Linear memory address (memarg offsets, data sizes)
pub type Address = u64;

/// Type descriptor
///
/// Either a primitive value/reference type or a reference to a previously
/// declared function signature (used by block signatures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    I32,
    I64,
    F32,
    F64,
    V128,
    FuncRef,
    ExternRef,
    ExnRef,
    /// Any other reference type (GC proposal heap types)
    AnyRef,
    /// The `func` form of a type section entry
    Func,
    /// Empty block signature
    Void,
    /// Block signature referring to a declared function type
    FuncIndex(Index),
}

impl Type {
    /// Canonical short name; an indexed signature reference is `funcidx`
    pub fn name(self) -> &'static str {
        match self {
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::F32 => "f32",
            Type::F64 => "f64",
            Type::V128 => "v128",
            Type::FuncRef => "funcref",
            Type::ExternRef => "externref",
            Type::ExnRef => "exnref",
            Type::AnyRef => "anyref",
            Type::Func => "func",
            Type::Void => "void",
            Type::FuncIndex(_) => "funcidx",
        }
    }
}

/// Size limits of a table or memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Lower bound (elements or pages)
    pub initial: u64,
    /// Optional upper bound
    pub max: Option<u64>,
    /// Shared memory flag (threads proposal)
    pub shared: bool,
    /// 64-bit index type (memory64 / table64)
    pub is_64: bool,
}

impl Limits {
    /// Limits with only a lower bound
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            ..Default::default()
        }
    }

    /// Add an upper bound
    pub fn with_max(mut self, max: u64) -> Self {
        self.max = Some(max);
        self
    }
}

/// 128-bit vector constant as four 32-bit lanes
///
/// Lanes are stored in index order; lane 0 holds the lowest-addressed four
/// bytes of the little-endian encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct V128 {
    lanes: [u32; 4],
}

impl V128 {
    /// Build from lanes in index order
    pub const fn from_lanes(lanes: [u32; 4]) -> Self {
        Self { lanes }
    }

    /// Build from the 16 bytes of the binary encoding
    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        let mut lanes = [0u32; 4];
        for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(4)) {
            *lane = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { lanes }
    }

    /// Lanes in index order 0..3
    pub const fn lanes(&self) -> [u32; 4] {
        self.lanes
    }
}

/// An instruction opcode: its text-format name and binary encoding
///
/// Prefixed opcodes keep the prefix byte in bits 8..16 (`0xfc0a` is
/// `memory.copy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    name: &'static str,
    code: u32,
}

impl Opcode {
    pub const fn new(name: &'static str, code: u32) -> Self {
        Self { name, code }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn code(&self) -> u32 {
        self.code
    }
}

/// Kind of an exported or imported item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    Func,
    Table,
    Memory,
    Global,
    Tag,
}

impl ExternalKind {
    pub fn name(self) -> &'static str {
        match self {
            ExternalKind::Func => "func",
            ExternalKind::Table => "table",
            ExternalKind::Memory => "memory",
            ExternalKind::Global => "global",
            ExternalKind::Tag => "tag",
        }
    }
}

/// Relocation entry type (object-file linking convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelocType {
    FunctionIndexLeb,
    TableIndexSleb,
    TableIndexI32,
    MemoryAddrLeb,
    MemoryAddrSleb,
    MemoryAddrI32,
    TypeIndexLeb,
    GlobalIndexLeb,
    FunctionOffsetI32,
    SectionOffsetI32,
    TagIndexLeb,
    MemoryAddrRelSleb,
    TableIndexRelSleb,
}

impl RelocType {
    pub fn name(self) -> &'static str {
        match self {
            RelocType::FunctionIndexLeb => "R_WASM_FUNCTION_INDEX_LEB",
            RelocType::TableIndexSleb => "R_WASM_TABLE_INDEX_SLEB",
            RelocType::TableIndexI32 => "R_WASM_TABLE_INDEX_I32",
            RelocType::MemoryAddrLeb => "R_WASM_MEMORY_ADDR_LEB",
            RelocType::MemoryAddrSleb => "R_WASM_MEMORY_ADDR_SLEB",
            RelocType::MemoryAddrI32 => "R_WASM_MEMORY_ADDR_I32",
            RelocType::TypeIndexLeb => "R_WASM_TYPE_INDEX_LEB",
            RelocType::GlobalIndexLeb => "R_WASM_GLOBAL_INDEX_LEB",
            RelocType::FunctionOffsetI32 => "R_WASM_FUNCTION_OFFSET_I32",
            RelocType::SectionOffsetI32 => "R_WASM_SECTION_OFFSET_I32",
            RelocType::TagIndexLeb => "R_WASM_TAG_INDEX_LEB",
            RelocType::MemoryAddrRelSleb => "R_WASM_MEMORY_ADDR_REL_SLEB",
            RelocType::TableIndexRelSleb => "R_WASM_TABLE_INDEX_REL_SLEB",
        }
    }
}

/// Symbol table entry kind (linking section)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolType {
    Function,
    Data,
    Global,
    Section,
    Tag,
}

impl SymbolType {
    pub fn name(self) -> &'static str {
        match self {
            SymbolType::Function => "func",
            SymbolType::Data => "data",
            SymbolType::Global => "global",
            SymbolType::Section => "section",
            SymbolType::Tag => "tag",
        }
    }
}

/// COMDAT group member kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComdatType {
    Data,
    Function,
}

impl ComdatType {
    pub fn name(self) -> &'static str {
        match self {
            ComdatType::Data => "data",
            ComdatType::Function => "function",
        }
    }
}

/// Module section, keyed by its binary section id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
    DataCount,
    Tag,
}

impl SectionKind {
    /// Map a binary section id to its kind
    pub fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => SectionKind::Custom,
            1 => SectionKind::Type,
            2 => SectionKind::Import,
            3 => SectionKind::Function,
            4 => SectionKind::Table,
            5 => SectionKind::Memory,
            6 => SectionKind::Global,
            7 => SectionKind::Export,
            8 => SectionKind::Start,
            9 => SectionKind::Element,
            10 => SectionKind::Code,
            11 => SectionKind::Data,
            12 => SectionKind::DataCount,
            13 => SectionKind::Tag,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Custom => "Custom",
            SectionKind::Type => "Type",
            SectionKind::Import => "Import",
            SectionKind::Function => "Function",
            SectionKind::Table => "Table",
            SectionKind::Memory => "Memory",
            SectionKind::Global => "Global",
            SectionKind::Export => "Export",
            SectionKind::Start => "Start",
            SectionKind::Element => "Elem",
            SectionKind::Code => "Code",
            SectionKind::Data => "Data",
            SectionKind::DataCount => "DataCount",
            SectionKind::Tag => "Tag",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v128_from_le_bytes_lane_order() {
        let bytes = [
            0x01, 0x00, 0x00, 0x00, // lane 0
            0x02, 0x00, 0x00, 0x00, // lane 1
            0x03, 0x00, 0x00, 0x00, // lane 2
            0x78, 0x56, 0x34, 0x12, // lane 3
        ];
        let v = V128::from_le_bytes(bytes);
        assert_eq!(v.lanes(), [1, 2, 3, 0x1234_5678]);
    }

    #[test]
    fn test_section_kind_from_id() {
        assert_eq!(SectionKind::from_id(0), Some(SectionKind::Custom));
        assert_eq!(SectionKind::from_id(10), Some(SectionKind::Code));
        assert_eq!(SectionKind::from_id(13), Some(SectionKind::Tag));
        assert_eq!(SectionKind::from_id(14), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Type::I32.name(), "i32");
        assert_eq!(Type::FuncRef.name(), "funcref");
        assert_eq!(Type::FuncIndex(3).name(), "funcidx");
    }

    #[test]
    fn test_limits_builder() {
        let limits = Limits::new(1).with_max(4);
        assert_eq!(limits.initial, 1);
        assert_eq!(limits.max, Some(4));
        assert!(!limits.shared);
    }
}
