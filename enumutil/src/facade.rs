//! Typed facade
//!
//! Free functions over any [`Enumeration`]. The operations delegate to the
//! compiled operation set of `T`; the reflection helpers read its metadata.
use std::collections::BTreeMap;

use num_traits::AsPrimitive;

use crate::{
    Enumeration,
    numeric::{Numeric, Underlying},
    types::UnderlyingKind,
    utils::{Error, Result},
};

#[inline]
pub fn bitwise_or<T: Enumeration>(lhs: T, rhs: T) -> T {
    T::operations().bitwise_or(lhs, rhs)
}

#[inline]
pub fn bitwise_and<T: Enumeration>(lhs: T, rhs: T) -> T {
    T::operations().bitwise_and(lhs, rhs)
}

#[inline]
pub fn bitwise_xor<T: Enumeration>(lhs: T, rhs: T) -> T {
    T::operations().bitwise_xor(lhs, rhs)
}

#[inline]
pub fn bitwise_not<T: Enumeration>(value: T) -> T {
    T::operations().bitwise_not(value)
}

/// Returns `true` if every bit of `flag` is set in `value`. The zero flag is
/// always set.
#[inline]
pub fn has_flag<T: Enumeration>(value: T, flag: T) -> bool {
    T::operations().has_flag(value, flag)
}

#[inline]
pub fn set_flag<T: Enumeration>(value: T, flag: T) -> T {
    T::operations().bitwise_or(value, flag)
}

/// Clears the bits of `flag` in `value`. Clearing an unset flag is a no-op.
#[inline]
pub fn unset_flag<T: Enumeration>(value: T, flag: T) -> T {
    T::operations().unset_flag(value, flag)
}

#[inline]
pub fn toggle_flag<T: Enumeration>(value: T, flag: T) -> T {
    T::operations().bitwise_xor(value, flag)
}

/// Sets `flag` when `on` is `true`, clears it otherwise.
#[inline]
pub fn toggle_flag_to<T: Enumeration>(value: T, flag: T, on: bool) -> T {
    let operations = T::operations();
    if on {
        operations.bitwise_or(value, flag)
    } else {
        operations.unset_flag(value, flag)
    }
}

/// Converts `value` to `N` as `value.bits() as N` would.
#[inline]
pub fn to_numeric<T: Enumeration, N: Numeric>(value: T) -> N {
    T::operations().to_numeric(value)
}

/// Converts `value` to `T` as `value as T::Repr` would. The result may have
/// no declared name.
#[inline]
pub fn from_numeric<T: Enumeration, N: Numeric>(value: N) -> T {
    T::operations().from_numeric(value)
}

/// Returns `true` if `value` is a declared member. Undeclared flag
/// combinations are not.
pub fn is_defined<T: Enumeration>(value: T) -> bool {
    T::metadata().contains(value)
}

/// Converts `value` to the underlying representation, then tests exact
/// membership.
#[inline]
pub fn is_defined_numeric<T: Enumeration, N: Numeric>(value: N) -> bool {
    T::operations().is_defined_numeric(value)
}

/// Exact, case-sensitive member name lookup.
pub fn is_defined_name<T: Enumeration>(name: &str) -> bool {
    T::metadata().find(name).is_some()
}

/// Exact match against member names and the decimal form of member values.
/// Composite forms (`"A, B"`) and case folding are not supported; see
/// [`parse`].
#[inline]
pub fn quick_parse<T: Enumeration>(input: &str) -> Result<T> {
    T::operations().quick_parse(input)
}

pub fn underlying_kind<T: Enumeration>() -> UnderlyingKind {
    T::Repr::UNDERLYING
}

/// Member names in declaration order.
pub fn names<T: Enumeration>() -> impl Iterator<Item = &'static str> {
    T::metadata().names()
}

/// Member values in declaration order, aliases included.
pub fn values<T: Enumeration>() -> impl Iterator<Item = T> {
    T::metadata().values()
}

/// Name of the first member declared with `value`.
pub fn name_of<T: Enumeration>(value: T) -> Option<&'static str> {
    T::metadata().member_of(value).map(|member| member.name)
}

/// Description of the first member declared with `value`.
pub fn description<T: Enumeration>(value: T) -> Option<&'static str> {
    T::metadata()
        .member_of(value)
        .and_then(|member| member.description)
}

/// Description of the member named `name`, aliases included.
pub fn description_by_name<T: Enumeration>(name: &str) -> Option<&'static str> {
    T::metadata()
        .find(name)
        .and_then(|member| member.description)
}

/// Returns `true` if `T` was declared with the `#[flags]` marker.
pub fn has_flags_attribute<T: Enumeration>() -> bool {
    T::FLAGS
}

/// Parses a member name, a comma-separated list of member names (combined
/// with `|`), or a decimal value of the underlying representation.
///
/// Surrounding whitespace is ignored, also around each name of a list.
/// `ignore_case` folds ASCII case only.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `input` is empty or blank,
/// [`Error::ParseFailure`] when it matches nothing.
pub fn parse<T: Enumeration>(input: &str, ignore_case: bool) -> Result<T> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument {
            reason: format!("cannot parse a `{}` from an empty string", T::NAME),
        });
    }

    let failure = || Error::ParseFailure {
        type_name: T::NAME.to_string(),
        input: input.to_string(),
    };

    if trimmed.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
        return trimmed
            .parse::<T::Repr>()
            .map(T::from_repr)
            .map_err(|_| failure());
    }

    let metadata = T::metadata();
    let operations = T::operations();
    let mut result = T::from_repr(T::Repr::ZERO);
    for part in trimmed.split(',') {
        let part = part.trim();
        let member = if ignore_case {
            metadata.find_ignore_case(part)
        } else {
            metadata.find(part)
        };
        let member = member.ok_or_else(failure)?;
        result = operations.bitwise_or(result, member.value);
    }
    Ok(result)
}

/// Like [`parse`], discarding the error.
pub fn try_parse<T: Enumeration>(input: &str, ignore_case: bool) -> Option<T> {
    parse(input, ignore_case).ok()
}

/// Formats `value` as its member name. An undeclared value of a flags type
/// is written as the `", "`-joined names of the members it is made of; any
/// other undeclared value as its decimal representation.
pub fn format<T: Enumeration>(value: T) -> String {
    let metadata = T::metadata();
    if let Some(member) = metadata.member_of(value) {
        return member.name.to_string();
    }

    let repr = value.to_repr();
    if T::FLAGS && repr != T::Repr::ZERO {
        let bits = |repr: T::Repr| -> u64 { AsPrimitive::<u64>::as_(repr) };

        let mut members: Vec<_> = metadata
            .members()
            .iter()
            .filter(|member| member.value.to_repr() != T::Repr::ZERO)
            .collect();
        members.sort_by(|a, b| bits(b.value.to_repr()).cmp(&bits(a.value.to_repr())));

        let mut remaining = repr;
        let mut names = Vec::new();
        for member in members {
            let flag = member.value.to_repr();
            if remaining & flag == flag {
                remaining = remaining & !flag;
                names.push(member.name);
            }
        }

        if remaining == T::Repr::ZERO {
            names.reverse();
            return names.join(", ");
        }
    }

    repr.to_string()
}

/// Member names mapped to their values.
pub fn name_value_map<T: Enumeration>() -> BTreeMap<&'static str, T> {
    T::metadata()
        .members()
        .iter()
        .map(|member| (member.name, member.value))
        .collect()
}

/// Values mapped to member names. When several members share a value, the
/// last declared one is kept.
pub fn value_name_map<T: Enumeration>() -> BTreeMap<T, &'static str> {
    let mut map = BTreeMap::new();
    for member in T::metadata().members() {
        map.insert(member.value, member.name);
    }
    map
}

/// Values mapped to member descriptions. When several members share a value,
/// the last declared one is kept; values whose kept member has no
/// description are left out.
pub fn value_description_map<T: Enumeration>() -> BTreeMap<T, &'static str> {
    value_name_description_map::<T>()
        .into_iter()
        .filter_map(|(value, (_, description))| description.map(|text| (value, text)))
        .collect()
}

/// Values mapped to the name and optional description of a member. When
/// several members share a value, the last declared one is kept.
pub fn value_name_description_map<T: Enumeration>()
-> BTreeMap<T, (&'static str, Option<&'static str>)> {
    let mut map = BTreeMap::new();
    for member in T::metadata().members() {
        map.insert(member.value, (member.name, member.description));
    }
    map
}
