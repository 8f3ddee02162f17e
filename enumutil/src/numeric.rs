//! Traits tying the Rust primitives to their numeric kinds.
//!
//! [`Numeric`] is implemented for the ten primitives an enumeration value can
//! be converted to or from; [`Underlying`] narrows it down to the eight
//! integer primitives that may back an enumeration. Both are sealed.
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{BitAnd, BitOr, BitXor, Not},
    str::FromStr,
};

use num_traits::AsPrimitive;

use crate::{
    compiler::CompiledOperationSet,
    consts::NumericValue,
    types::{NumericKind, UnderlyingKind},
};

mod sealed {
    pub trait Sealed {}
}

/// A primitive numeric type (`u8` .. `i64`, `f32`, `f64`).
pub trait Numeric:
    Copy + PartialEq + PartialOrd + Debug + Display + Default + Send + Sync + 'static + sealed::Sealed
{
    const KIND: NumericKind;

    /// Converts an underlying representation to `Self` with `as` semantics.
    fn from_underlying<R: Underlying>(repr: R) -> Self;

    /// Converts `self` to an underlying representation with `as` semantics.
    fn into_underlying<R: Underlying>(self) -> R;

    fn into_value(self) -> NumericValue;

    /// Extracts `Self` from a value of exactly the same kind.
    fn from_value(value: NumericValue) -> Option<Self>;

    #[doc(hidden)]
    fn to_kernel<T: 'static>(ops: &CompiledOperationSet<T>) -> fn(T) -> Self;

    #[doc(hidden)]
    fn from_kernel<T: 'static>(ops: &CompiledOperationSet<T>) -> fn(Self) -> T;

    #[doc(hidden)]
    fn is_defined_kernel<T: 'static>(ops: &CompiledOperationSet<T>) -> fn(Self) -> bool;
}

/// An integer primitive able to back an enumeration.
pub trait Underlying:
    Numeric
    + Eq
    + Ord
    + Hash
    + FromStr
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + AsPrimitive<u8>
    + AsPrimitive<i8>
    + AsPrimitive<u16>
    + AsPrimitive<i16>
    + AsPrimitive<u32>
    + AsPrimitive<i32>
    + AsPrimitive<u64>
    + AsPrimitive<i64>
    + AsPrimitive<f32>
    + AsPrimitive<f64>
{
    const UNDERLYING: UnderlyingKind;
    const ZERO: Self;

    fn from_u8(value: u8) -> Self;
    fn from_i8(value: i8) -> Self;
    fn from_u16(value: u16) -> Self;
    fn from_i16(value: i16) -> Self;
    fn from_u32(value: u32) -> Self;
    fn from_i32(value: i32) -> Self;
    fn from_u64(value: u64) -> Self;
    fn from_i64(value: i64) -> Self;
    fn from_f32(value: f32) -> Self;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_numeric {
    ($($ty:ty => $kind:ident, $from:ident, $to_kernel:ident, $from_kernel:ident, $defined_kernel:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Numeric for $ty {
                const KIND: NumericKind = NumericKind::$kind;

                #[inline]
                fn from_underlying<R: Underlying>(repr: R) -> Self {
                    <R as AsPrimitive<$ty>>::as_(repr)
                }

                #[inline]
                fn into_underlying<R: Underlying>(self) -> R {
                    R::$from(self)
                }

                #[inline]
                fn into_value(self) -> NumericValue {
                    NumericValue::$kind(self)
                }

                fn from_value(value: NumericValue) -> Option<Self> {
                    match value {
                        NumericValue::$kind(v) => Some(v),
                        _ => None,
                    }
                }

                fn to_kernel<T: 'static>(ops: &CompiledOperationSet<T>) -> fn(T) -> Self {
                    ops.$to_kernel
                }

                fn from_kernel<T: 'static>(ops: &CompiledOperationSet<T>) -> fn(Self) -> T {
                    ops.$from_kernel
                }

                fn is_defined_kernel<T: 'static>(ops: &CompiledOperationSet<T>) -> fn(Self) -> bool {
                    ops.$defined_kernel
                }
            }
        )*
    };
}

impl_numeric! {
    u8 => U8, from_u8, to_u8, from_u8, is_defined_u8;
    i8 => I8, from_i8, to_i8, from_i8, is_defined_i8;
    u16 => U16, from_u16, to_u16, from_u16, is_defined_u16;
    i16 => I16, from_i16, to_i16, from_i16, is_defined_i16;
    u32 => U32, from_u32, to_u32, from_u32, is_defined_u32;
    i32 => I32, from_i32, to_i32, from_i32, is_defined_i32;
    u64 => U64, from_u64, to_u64, from_u64, is_defined_u64;
    i64 => I64, from_i64, to_i64, from_i64, is_defined_i64;
    f32 => F32, from_f32, to_f32, from_f32, is_defined_f32;
    f64 => F64, from_f64, to_f64, from_f64, is_defined_f64;
}

macro_rules! impl_underlying {
    ($($ty:ty => $kind:ident;)*) => {
        $(
            impl Underlying for $ty {
                const UNDERLYING: UnderlyingKind = UnderlyingKind::$kind;
                const ZERO: Self = 0;

                #[inline]
                fn from_u8(value: u8) -> Self { value.as_() }
                #[inline]
                fn from_i8(value: i8) -> Self { value.as_() }
                #[inline]
                fn from_u16(value: u16) -> Self { value.as_() }
                #[inline]
                fn from_i16(value: i16) -> Self { value.as_() }
                #[inline]
                fn from_u32(value: u32) -> Self { value.as_() }
                #[inline]
                fn from_i32(value: i32) -> Self { value.as_() }
                #[inline]
                fn from_u64(value: u64) -> Self { value.as_() }
                #[inline]
                fn from_i64(value: i64) -> Self { value.as_() }
                #[inline]
                fn from_f32(value: f32) -> Self { value.as_() }
                #[inline]
                fn from_f64(value: f64) -> Self { value.as_() }
            }
        )*
    };
}

impl_underlying! {
    u8 => U8;
    i8 => I8;
    u16 => U16;
    i16 => I16;
    u32 => U32;
    i32 => I32;
    u64 => U64;
    i64 => I64;
}

/// Invokes `$body` with `$N` bound to the primitive type of a runtime [`NumericKind`].
macro_rules! dispatch_numeric {
    ($kind:expr, $N:ident => $body:expr) => {
        match $kind {
            $crate::types::NumericKind::U8 => {
                type $N = u8;
                $body
            }
            $crate::types::NumericKind::I8 => {
                type $N = i8;
                $body
            }
            $crate::types::NumericKind::U16 => {
                type $N = u16;
                $body
            }
            $crate::types::NumericKind::I16 => {
                type $N = i16;
                $body
            }
            $crate::types::NumericKind::U32 => {
                type $N = u32;
                $body
            }
            $crate::types::NumericKind::I32 => {
                type $N = i32;
                $body
            }
            $crate::types::NumericKind::U64 => {
                type $N = u64;
                $body
            }
            $crate::types::NumericKind::I64 => {
                type $N = i64;
                $body
            }
            $crate::types::NumericKind::F32 => {
                type $N = f32;
                $body
            }
            $crate::types::NumericKind::F64 => {
                type $N = f64;
                $body
            }
        }
    };
}

pub(crate) use dispatch_numeric;
