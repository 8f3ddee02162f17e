use strum::{EnumIter, IntoEnumIterator};

use crate::types::{NumericKind, Signedness};

/// Conversion performed between two numeric kinds.
///
/// The instruction differs depending on whether the target is narrower,
/// wider, of equal width but different signedness, or floating point
/// relative to the source. [`CastOp::between`] picks the one a native `as`
/// cast performs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
pub enum CastOp {
    /// Source and target kinds are identical
    Nop,
    /// Same width, different signedness; the bit pattern is unchanged
    Bitcast,
    /// Integer narrowing, keeps the low bits
    Trunc,
    /// Unsigned integer widening
    ZExt,
    /// Signed integer widening
    SExt,
    /// Unsigned integer to floating point, rounds to nearest
    UIToFp,
    /// Signed integer to floating point, rounds to nearest
    SIToFp,
    /// Floating point to unsigned integer, saturating, NaN maps to zero
    FpToUI,
    /// Floating point to signed integer, saturating, NaN maps to zero
    FpToSI,
    /// `f32` to `f64`
    FpExt,
    /// `f64` to `f32`, rounds to nearest
    FpTrunc,
}

impl CastOp {
    /// Creates a [`CastOp`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        CastOp::iter().find(|op| op.to_str() == s)
    }

    /// Returns the string representation of the [`CastOp`].
    pub fn to_str(&self) -> &'static str {
        match self {
            CastOp::Nop => "nop",
            CastOp::Bitcast => "bitcast",
            CastOp::Trunc => "trunc",
            CastOp::ZExt => "zext",
            CastOp::SExt => "sext",
            CastOp::UIToFp => "uitofp",
            CastOp::SIToFp => "sitofp",
            CastOp::FpToUI => "fptoui",
            CastOp::FpToSI => "fptosi",
            CastOp::FpExt => "fpext",
            CastOp::FpTrunc => "fptrunc",
        }
    }

    /// Classifies the conversion from `from` to `to`.
    pub fn between(from: NumericKind, to: NumericKind) -> CastOp {
        if from == to {
            return CastOp::Nop;
        }

        match (from.signedness(), to.signedness()) {
            (None, None) => {
                if to.num_bits() > from.num_bits() {
                    CastOp::FpExt
                } else {
                    CastOp::FpTrunc
                }
            }
            (None, Some(Signedness::Signed)) => CastOp::FpToSI,
            (None, Some(Signedness::Unsigned)) => CastOp::FpToUI,
            (Some(Signedness::Signed), None) => CastOp::SIToFp,
            (Some(Signedness::Unsigned), None) => CastOp::UIToFp,
            (Some(sign), Some(_)) => {
                let (from_bits, to_bits) = (from.num_bits(), to.num_bits());
                if from_bits == to_bits {
                    CastOp::Bitcast
                } else if from_bits > to_bits {
                    CastOp::Trunc
                } else if sign == Signedness::Signed {
                    CastOp::SExt
                } else {
                    CastOp::ZExt
                }
            }
        }
    }

    /// Returns `true` when the conversion never changes the represented value's bits.
    pub fn preserves_bits(&self) -> bool {
        matches!(self, CastOp::Nop | CastOp::Bitcast)
    }
}

impl std::fmt::Display for CastOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_integer_pairs() {
        use NumericKind::*;

        assert_eq!(CastOp::between(U8, U8), CastOp::Nop);
        assert_eq!(CastOp::between(U8, I8), CastOp::Bitcast);
        assert_eq!(CastOp::between(I64, U64), CastOp::Bitcast);
        assert_eq!(CastOp::between(U32, U8), CastOp::Trunc);
        assert_eq!(CastOp::between(I32, U16), CastOp::Trunc);
        assert_eq!(CastOp::between(U8, I64), CastOp::ZExt);
        assert_eq!(CastOp::between(I8, U64), CastOp::SExt);
    }

    #[test]
    fn classifies_float_pairs() {
        use NumericKind::*;

        assert_eq!(CastOp::between(F32, F64), CastOp::FpExt);
        assert_eq!(CastOp::between(F64, F32), CastOp::FpTrunc);
        assert_eq!(CastOp::between(F64, U8), CastOp::FpToUI);
        assert_eq!(CastOp::between(F32, I16), CastOp::FpToSI);
        assert_eq!(CastOp::between(U64, F32), CastOp::UIToFp);
        assert_eq!(CastOp::between(I8, F64), CastOp::SIToFp);
    }

    #[test]
    fn string_round_trip() {
        for op in CastOp::iter() {
            assert_eq!(CastOp::from_str(op.to_str()), Some(op));
        }
    }
}
