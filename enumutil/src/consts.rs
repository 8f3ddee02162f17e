//! Tagged numeric values
//!
//! [`NumericValue`] carries a value of any [`NumericKind`] together with its
//! kind. It is the currency of the operation IR: immediates, member tables
//! and interpreter registers are all numeric values.
use num_traits::AsPrimitive;
use strum::EnumIs;

use crate::types::{NumericKind, UnderlyingKind};

/// A value of one of the ten supported numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, EnumIs)]
pub enum NumericValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

macro_rules! cast_to {
    ($value:expr, $to:expr) => {{
        let value = $value;
        match $to {
            NumericKind::U8 => NumericValue::U8(value.as_()),
            NumericKind::I8 => NumericValue::I8(value.as_()),
            NumericKind::U16 => NumericValue::U16(value.as_()),
            NumericKind::I16 => NumericValue::I16(value.as_()),
            NumericKind::U32 => NumericValue::U32(value.as_()),
            NumericKind::I32 => NumericValue::I32(value.as_()),
            NumericKind::U64 => NumericValue::U64(value.as_()),
            NumericKind::I64 => NumericValue::I64(value.as_()),
            NumericKind::F32 => NumericValue::F32(value.as_()),
            NumericKind::F64 => NumericValue::F64(value.as_()),
        }
    }};
}

macro_rules! int_binop {
    ($lhs:expr, $rhs:expr, $op:tt) => {
        match ($lhs, $rhs) {
            (NumericValue::U8(a), NumericValue::U8(b)) => Some(NumericValue::U8(a $op b)),
            (NumericValue::I8(a), NumericValue::I8(b)) => Some(NumericValue::I8(a $op b)),
            (NumericValue::U16(a), NumericValue::U16(b)) => Some(NumericValue::U16(a $op b)),
            (NumericValue::I16(a), NumericValue::I16(b)) => Some(NumericValue::I16(a $op b)),
            (NumericValue::U32(a), NumericValue::U32(b)) => Some(NumericValue::U32(a $op b)),
            (NumericValue::I32(a), NumericValue::I32(b)) => Some(NumericValue::I32(a $op b)),
            (NumericValue::U64(a), NumericValue::U64(b)) => Some(NumericValue::U64(a $op b)),
            (NumericValue::I64(a), NumericValue::I64(b)) => Some(NumericValue::I64(a $op b)),
            _ => None,
        }
    };
}

impl NumericValue {
    /// The zero value of `kind`.
    pub fn zero(kind: NumericKind) -> Self {
        NumericValue::U8(0).cast(kind)
    }

    /// The value with every bit set for an integer kind.
    pub fn all_ones(kind: UnderlyingKind) -> Self {
        // Truncating u64::MAX keeps every bit set.
        NumericValue::U64(u64::MAX).cast(kind.into())
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            NumericValue::U8(_) => NumericKind::U8,
            NumericValue::I8(_) => NumericKind::I8,
            NumericValue::U16(_) => NumericKind::U16,
            NumericValue::I16(_) => NumericKind::I16,
            NumericValue::U32(_) => NumericKind::U32,
            NumericValue::I32(_) => NumericKind::I32,
            NumericValue::U64(_) => NumericKind::U64,
            NumericValue::I64(_) => NumericKind::I64,
            NumericValue::F32(_) => NumericKind::F32,
            NumericValue::F64(_) => NumericKind::F64,
        }
    }

    /// Converts the value to `to` following native `as` cast semantics.
    pub fn cast(self, to: NumericKind) -> NumericValue {
        match self {
            NumericValue::U8(v) => cast_to!(v, to),
            NumericValue::I8(v) => cast_to!(v, to),
            NumericValue::U16(v) => cast_to!(v, to),
            NumericValue::I16(v) => cast_to!(v, to),
            NumericValue::U32(v) => cast_to!(v, to),
            NumericValue::I32(v) => cast_to!(v, to),
            NumericValue::U64(v) => cast_to!(v, to),
            NumericValue::I64(v) => cast_to!(v, to),
            NumericValue::F32(v) => cast_to!(v, to),
            NumericValue::F64(v) => cast_to!(v, to),
        }
    }

    /// Bitwise AND of two integers of the same kind.
    pub fn bit_and(self, rhs: NumericValue) -> Option<NumericValue> {
        int_binop!(self, rhs, &)
    }

    /// Bitwise OR of two integers of the same kind.
    pub fn bit_or(self, rhs: NumericValue) -> Option<NumericValue> {
        int_binop!(self, rhs, |)
    }

    /// Bitwise XOR of two integers of the same kind.
    pub fn bit_xor(self, rhs: NumericValue) -> Option<NumericValue> {
        int_binop!(self, rhs, ^)
    }

    /// Bitwise complement of an integer.
    pub fn bit_not(self) -> Option<NumericValue> {
        match self {
            NumericValue::U8(v) => Some(NumericValue::U8(!v)),
            NumericValue::I8(v) => Some(NumericValue::I8(!v)),
            NumericValue::U16(v) => Some(NumericValue::U16(!v)),
            NumericValue::I16(v) => Some(NumericValue::I16(!v)),
            NumericValue::U32(v) => Some(NumericValue::U32(!v)),
            NumericValue::I32(v) => Some(NumericValue::I32(!v)),
            NumericValue::U64(v) => Some(NumericValue::U64(!v)),
            NumericValue::I64(v) => Some(NumericValue::I64(!v)),
            NumericValue::F32(_) | NumericValue::F64(_) => None,
        }
    }
}

impl std::fmt::Display for NumericValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericValue::U8(v) => write!(f, "{}", v),
            NumericValue::I8(v) => write!(f, "{}", v),
            NumericValue::U16(v) => write!(f, "{}", v),
            NumericValue::I16(v) => write!(f, "{}", v),
            NumericValue::U32(v) => write!(f, "{}", v),
            NumericValue::I32(v) => write!(f, "{}", v),
            NumericValue::U64(v) => write!(f, "{}", v),
            NumericValue::I64(v) => write!(f, "{}", v),
            NumericValue::F32(v) => write!(f, "{:?}", v),
            NumericValue::F64(v) => write!(f, "{:?}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casts_follow_native_semantics() {
        assert_eq!(NumericValue::U8(200).cast(NumericKind::I8), NumericValue::I8(-56));
        assert_eq!(NumericValue::I8(-1).cast(NumericKind::U64), NumericValue::U64(u64::MAX));
        assert_eq!(NumericValue::I16(-1).cast(NumericKind::I64), NumericValue::I64(-1));
        assert_eq!(NumericValue::U32(0x1_02).cast(NumericKind::U8), NumericValue::U8(2));
        assert_eq!(NumericValue::F64(8.0).cast(NumericKind::U8), NumericValue::U8(8));
        assert_eq!(NumericValue::F64(-3.7).cast(NumericKind::I32), NumericValue::I32(-3));
        assert_eq!(NumericValue::F32(f32::NAN).cast(NumericKind::I32), NumericValue::I32(0));
        assert_eq!(NumericValue::U8(8).cast(NumericKind::F64), NumericValue::F64(8.0));
    }

    #[test]
    fn bitwise_requires_matching_integer_kinds() {
        let a = NumericValue::U16(0b1100);
        let b = NumericValue::U16(0b1010);
        assert_eq!(a.bit_and(b), Some(NumericValue::U16(0b1000)));
        assert_eq!(a.bit_or(b), Some(NumericValue::U16(0b1110)));
        assert_eq!(a.bit_xor(b), Some(NumericValue::U16(0b0110)));
        assert_eq!(a.bit_not(), Some(NumericValue::U16(!0b1100)));

        assert_eq!(a.bit_and(NumericValue::U32(1)), None);
        assert_eq!(NumericValue::F32(1.0).bit_not(), None);
    }

    #[test]
    fn zero_and_all_ones() {
        assert_eq!(NumericValue::zero(NumericKind::F64), NumericValue::F64(0.0));
        assert_eq!(NumericValue::all_ones(UnderlyingKind::I32), NumericValue::I32(-1));
        assert_eq!(NumericValue::all_ones(UnderlyingKind::U16), NumericValue::U16(u16::MAX));
    }
}
