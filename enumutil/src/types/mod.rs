//! Numeric kinds
//!
//! Every enumeration is backed by one of eight fixed-width integer kinds
//! ([`UnderlyingKind`]). Conversions go to and from a slightly larger set of
//! numeric kinds ([`NumericKind`]) that also covers the two IEEE-754 binary
//! floating-point formats.
//!
//! - [`UnderlyingKind`]: storage representation of an enumeration.
//! - [`NumericKind`]: any numeric kind a value can be converted to or from.
//! - [`cast::CastOp`]: classification of a conversion between two kinds.
use strum::{EnumCount, EnumIs, EnumIter, IntoEnumIterator};

pub mod cast;

/// Signedness of an integer kind.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl Signedness {
    /// Creates a [`Signedness`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        Signedness::iter().find(|sign| sign.to_str() == s)
    }

    /// Returns the string representation of the [`Signedness`].
    pub fn to_str(&self) -> &'static str {
        match self {
            Signedness::Signed => "signed",
            Signedness::Unsigned => "unsigned",
        }
    }
}

/// Integer representation backing an enumeration.
///
/// The variant order follows increasing width, unsigned before signed.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, EnumCount, EnumIs,
)]
pub enum UnderlyingKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
}

impl UnderlyingKind {
    /// Creates an [`UnderlyingKind`] from its Rust primitive name (`u8`, `i32`, ...).
    pub fn from_str(s: &str) -> Option<Self> {
        UnderlyingKind::iter().find(|kind| kind.to_str() == s)
    }

    /// Returns the Rust primitive name of the kind.
    pub fn to_str(&self) -> &'static str {
        NumericKind::from(*self).to_str()
    }

    /// Number of bits of the representation.
    #[inline]
    pub const fn num_bits(&self) -> u32 {
        match self {
            UnderlyingKind::U8 | UnderlyingKind::I8 => 8,
            UnderlyingKind::U16 | UnderlyingKind::I16 => 16,
            UnderlyingKind::U32 | UnderlyingKind::I32 => 32,
            UnderlyingKind::U64 | UnderlyingKind::I64 => 64,
        }
    }

    #[inline]
    pub const fn signedness(&self) -> Signedness {
        match self {
            UnderlyingKind::I8 | UnderlyingKind::I16 | UnderlyingKind::I32 | UnderlyingKind::I64 => {
                Signedness::Signed
            }
            _ => Signedness::Unsigned,
        }
    }

    #[inline]
    pub const fn is_signed(&self) -> bool {
        matches!(self.signedness(), Signedness::Signed)
    }
}

impl std::fmt::Display for UnderlyingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Any numeric kind an enumeration value can be converted to or from.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, EnumCount, EnumIs,
)]
pub enum NumericKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    /// 32-bit floating point value (IEEE-754 binary32), Rust's `f32`.
    F32,
    /// 64-bit floating point value (IEEE-754 binary64), Rust's `f64`.
    F64,
}

impl NumericKind {
    /// Creates a [`NumericKind`] from its Rust primitive name.
    pub fn from_str(s: &str) -> Option<Self> {
        NumericKind::iter().find(|kind| kind.to_str() == s)
    }

    /// Returns the Rust primitive name of the kind.
    pub fn to_str(&self) -> &'static str {
        match self {
            NumericKind::U8 => "u8",
            NumericKind::I8 => "i8",
            NumericKind::U16 => "u16",
            NumericKind::I16 => "i16",
            NumericKind::U32 => "u32",
            NumericKind::I32 => "i32",
            NumericKind::U64 => "u64",
            NumericKind::I64 => "i64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }

    #[inline]
    pub const fn num_bits(&self) -> u32 {
        match self {
            NumericKind::U8 | NumericKind::I8 => 8,
            NumericKind::U16 | NumericKind::I16 => 16,
            NumericKind::U32 | NumericKind::I32 | NumericKind::F32 => 32,
            NumericKind::U64 | NumericKind::I64 | NumericKind::F64 => 64,
        }
    }

    /// Returns `true` for `f32` and `f64`.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }

    /// Signedness of an integer kind; `None` for floating-point kinds.
    #[inline]
    pub const fn signedness(&self) -> Option<Signedness> {
        match self {
            NumericKind::F32 | NumericKind::F64 => None,
            NumericKind::I8 | NumericKind::I16 | NumericKind::I32 | NumericKind::I64 => {
                Some(Signedness::Signed)
            }
            _ => Some(Signedness::Unsigned),
        }
    }

    /// Returns the matching [`UnderlyingKind`] for integer kinds.
    pub const fn as_underlying(&self) -> Option<UnderlyingKind> {
        match self {
            NumericKind::U8 => Some(UnderlyingKind::U8),
            NumericKind::I8 => Some(UnderlyingKind::I8),
            NumericKind::U16 => Some(UnderlyingKind::U16),
            NumericKind::I16 => Some(UnderlyingKind::I16),
            NumericKind::U32 => Some(UnderlyingKind::U32),
            NumericKind::I32 => Some(UnderlyingKind::I32),
            NumericKind::U64 => Some(UnderlyingKind::U64),
            NumericKind::I64 => Some(UnderlyingKind::I64),
            NumericKind::F32 | NumericKind::F64 => None,
        }
    }
}

impl From<UnderlyingKind> for NumericKind {
    fn from(kind: UnderlyingKind) -> Self {
        match kind {
            UnderlyingKind::U8 => NumericKind::U8,
            UnderlyingKind::I8 => NumericKind::I8,
            UnderlyingKind::U16 => NumericKind::U16,
            UnderlyingKind::I16 => NumericKind::I16,
            UnderlyingKind::U32 => NumericKind::U32,
            UnderlyingKind::I32 => NumericKind::I32,
            UnderlyingKind::U64 => NumericKind::U64,
            UnderlyingKind::I64 => NumericKind::I64,
        }
    }
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
