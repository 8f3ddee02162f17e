//! Monomorphized kernels bound to each opcode.
//!
//! Each kernel computes exactly what the matching lowered program computes.
//! None of them go through the operation set of `T`, so they can run while
//! that set is still being built.
use crate::{Enumeration, numeric::Numeric};

#[inline]
pub fn bitwise_or<T: Enumeration>(lhs: T, rhs: T) -> T {
    T::from_repr(lhs.to_repr() | rhs.to_repr())
}

#[inline]
pub fn bitwise_and<T: Enumeration>(lhs: T, rhs: T) -> T {
    T::from_repr(lhs.to_repr() & rhs.to_repr())
}

#[inline]
pub fn bitwise_xor<T: Enumeration>(lhs: T, rhs: T) -> T {
    T::from_repr(lhs.to_repr() ^ rhs.to_repr())
}

#[inline]
pub fn bitwise_not<T: Enumeration>(value: T) -> T {
    T::from_repr(!value.to_repr())
}

#[inline]
pub fn has_flag<T: Enumeration>(value: T, flag: T) -> bool {
    let flag = flag.to_repr();
    (value.to_repr() & flag) == flag
}

#[inline]
pub fn unset_flag<T: Enumeration>(value: T, flag: T) -> T {
    T::from_repr(value.to_repr() & !flag.to_repr())
}

#[inline]
pub fn to_numeric<T: Enumeration, N: Numeric>(value: T) -> N {
    N::from_underlying(value.to_repr())
}

#[inline]
pub fn from_numeric<T: Enumeration, N: Numeric>(value: N) -> T {
    T::from_repr(value.into_underlying())
}

/// Linear scan of the declared members.
pub fn is_defined<T: Enumeration, N: Numeric>(value: N) -> bool {
    T::metadata().contains_repr(value.into_underlying())
}
