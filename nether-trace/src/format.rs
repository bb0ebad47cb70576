//! Value formatting
//!
//! Stateless [`Display`] adapters that render event arguments. Every adapter
//! is total: any bit pattern, including NaN payloads and infinities, renders
//! without error.

use core::fmt::{self, Display};

use crate::types::{Index, Limits, Opcode, Type, V128};

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Type::FuncIndex(index) => write!(f, "{}[{}]", self.name(), index),
            ty => f.write_str(ty.name()),
        }
    }
}

/// `[i32, f64]`, or `[]` when empty
pub struct TypeList<'a>(pub &'a [Type]);

impl Display for TypeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, ty) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ty)?;
        }
        f.write_str("]")
    }
}

/// `initial: N` or `initial: N, max: M`
impl Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "initial: {}, max: {}", self.initial, max),
            None => write!(f, "initial: {}", self.initial),
        }
    }
}

/// Lanes 0..3 as `0x%08x` words separated by spaces
impl Display for V128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.lanes();
        write!(f, "0x{:08x} 0x{:08x} 0x{:08x} 0x{:08x}", a, b, c, d)
    }
}

/// `"i32.add" (106)`
impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.name(), self.code())
    }
}

/// Raw f32 bits: `1.5 (0x3fc00000)`
///
/// The decimal part is for reading; the hex part reproduces the bits exactly.
#[derive(Debug, Clone, Copy)]
pub struct F32Bits(pub u32);

impl Display for F32Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (0x{:08x})", f32::from_bits(self.0), self.0)
    }
}

/// Raw f64 bits: `1.5 (0x3ff8000000000000)`
#[derive(Debug, Clone, Copy)]
pub struct F64Bits(pub u64);

impl Display for F64Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (0x{:016x})", f64::from_bits(self.0), self.0)
    }
}

/// Unsigned integer constant with its hex form: `42 (0x2a)`
#[derive(Debug, Clone, Copy)]
pub struct IntBits(pub u64);

impl Display for IntBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:x})", self.0, self.0)
    }
}

/// Quoted name; control characters and quotes are escaped
pub struct Quoted<'a>(pub &'a str);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// `[0, 1, 2]`
pub struct IndexList<'a>(pub &'a [Index]);

impl Display for IndexList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", index)?;
        }
        f.write_str("]")
    }
}

/// Bit flags: `0x%x`
#[derive(Debug, Clone, Copy)]
pub struct Hex(pub u32);

impl Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// `true` / `false`
pub struct Flag(pub bool);

impl Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "true" } else { "false" })
    }
}

/// Bit-for-bit signed view of a field encoded unsigned (relocation addends)
pub fn signed(value: u32) -> i32 {
    value as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pull the hex field out of a rendered float and parse it back
    fn hex_field(rendered: &str) -> u64 {
        let start = rendered.rfind("(0x").expect("hex field") + 3;
        let end = rendered.len() - 1;
        u64::from_str_radix(&rendered[start..end], 16).unwrap()
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Type::I32.to_string(), "i32");
        assert_eq!(Type::V128.to_string(), "v128");
        assert_eq!(Type::ExternRef.to_string(), "externref");
        assert_eq!(Type::Void.to_string(), "void");
        assert_eq!(Type::FuncIndex(7).to_string(), "funcidx[7]");
    }

    #[test]
    fn test_type_list() {
        assert_eq!(TypeList(&[]).to_string(), "[]");
        assert_eq!(TypeList(&[Type::I32]).to_string(), "[i32]");
        assert_eq!(
            TypeList(&[Type::I64, Type::F32, Type::FuncIndex(2)]).to_string(),
            "[i64, f32, funcidx[2]]"
        );
    }

    #[test]
    fn test_limits_formatting() {
        assert_eq!(Limits::new(1).to_string(), "initial: 1");
        assert_eq!(Limits::new(1).with_max(4).to_string(), "initial: 1, max: 4");
        assert_eq!(
            Limits::new(u64::MAX).with_max(u64::MAX).to_string(),
            "initial: 18446744073709551615, max: 18446744073709551615"
        );
    }

    #[test]
    fn test_f32_rendering() {
        assert_eq!(F32Bits(1.5f32.to_bits()).to_string(), "1.5 (0x3fc00000)");
        assert_eq!(F32Bits(0).to_string(), "0.0 (0x00000000)");
        assert_eq!(F32Bits(0x8000_0000).to_string(), "-0.0 (0x80000000)");
        assert_eq!(F32Bits(0x7f80_0000).to_string(), "inf (0x7f800000)");
        assert_eq!(F32Bits(0xff80_0000).to_string(), "-inf (0xff800000)");
        assert_eq!(F32Bits(0x7fc0_0000).to_string(), "NaN (0x7fc00000)");
    }

    #[test]
    fn test_f64_rendering() {
        assert_eq!(
            F64Bits(1.5f64.to_bits()).to_string(),
            "1.5 (0x3ff8000000000000)"
        );
        assert_eq!(
            F64Bits(0x7ff0_0000_0000_0000).to_string(),
            "inf (0x7ff0000000000000)"
        );
    }

    #[test]
    fn test_f32_hex_round_trip() {
        let patterns = [
            0u32,
            0x8000_0000,             // -0.0
            0x0000_0001,             // smallest subnormal
            0x0080_0000,             // smallest normal
            f32::MAX.to_bits(),
            f32::MIN.to_bits(),
            0x7f80_0000,             // inf
            0xff80_0000,             // -inf
            0x7fc0_0000,             // quiet NaN
            0x7f80_0001,             // signalling NaN
            0xffff_ffff,             // NaN with full payload
        ];
        for bits in patterns {
            let rendered = F32Bits(bits).to_string();
            assert_eq!(hex_field(&rendered), u64::from(bits), "{}", rendered);
        }
    }

    #[test]
    fn test_f64_hex_round_trip() {
        let patterns = [
            0u64,
            0x8000_0000_0000_0000,
            0x0000_0000_0000_0001,
            0x0010_0000_0000_0000,
            f64::MAX.to_bits(),
            f64::MIN.to_bits(),
            0x7ff0_0000_0000_0000,
            0xfff0_0000_0000_0000,
            0x7ff8_0000_0000_0000,
            0x7ff0_0000_0000_0001,
            0xffff_ffff_ffff_ffff,
        ];
        for bits in patterns {
            let rendered = F64Bits(bits).to_string();
            assert_eq!(hex_field(&rendered), bits, "{}", rendered);
        }
    }

    #[test]
    fn test_v128_lane_order() {
        let v = V128::from_lanes([0x0000_0001, 0x0000_0002, 0xdead_beef, 0xffff_ffff]);
        assert_eq!(
            v.to_string(),
            "0x00000001 0x00000002 0xdeadbeef 0xffffffff"
        );
    }

    #[test]
    fn test_opcode_rendering() {
        assert_eq!(Opcode::new("i32.add", 0x6a).to_string(), "\"i32.add\" (106)");
    }

    #[test]
    fn test_int_bits() {
        assert_eq!(IntBits(42).to_string(), "42 (0x2a)");
        assert_eq!(IntBits(u64::from(u32::MAX)).to_string(), "4294967295 (0xffffffff)");
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(Quoted("env").to_string(), "\"env\"");
        assert_eq!(Quoted("a\nb").to_string(), "\"a\\nb\"");
    }

    #[test]
    fn test_index_list() {
        assert_eq!(IndexList(&[]).to_string(), "[]");
        assert_eq!(IndexList(&[0, 1, 2]).to_string(), "[0, 1, 2]");
    }

    #[test]
    fn test_hex_flags() {
        assert_eq!(Hex(0).to_string(), "0x0");
        assert_eq!(Hex(0x10).to_string(), "0x10");
    }

    #[test]
    fn test_signed_reinterpretation() {
        assert_eq!(signed(0), 0);
        assert_eq!(signed(0xffff_ffff), -1);
        assert_eq!(signed(0x8000_0000), i32::MIN);
        assert_eq!(signed(0x7fff_ffff), i32::MAX);
    }
}
